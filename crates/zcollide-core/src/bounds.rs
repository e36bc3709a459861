//! 轴对齐包围盒 (AABB)
//!
//! `Bounds` 是形状的包围体，也是宽相位网格查询的输入。
//! 两个包围盒的相交结果用独立的 [`BoundsOverlap`] 表示，不能当作普通矩形使用。

use crate::error::CollisionError;
use crate::math::Vector2;
use serde::{Deserialize, Serialize};

/// 2D轴对齐包围盒
///
/// 约定 `min <= max`（分量比较），唯一的例外是全零的空哨兵值。
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vector2,
    pub max: Vector2,
}

impl Bounds {
    /// 创建新的包围盒
    pub fn new(min: Vector2, max: Vector2) -> Self {
        Self { min, max }
    }

    /// 空包围盒（min == max == 0）
    pub fn empty() -> Self {
        Self::default()
    }

    /// 从点集创建包围盒，点集为空时返回空包围盒
    pub fn from_points(points: impl IntoIterator<Item = Vector2>) -> Self {
        let mut iter = points.into_iter();
        let Some(first) = iter.next() else {
            return Self::empty();
        };
        iter.fold(Self::new(first, first), |b, p| Self {
            min: b.min.inf(&p),
            max: b.max.sup(&p),
        })
    }

    /// 合并两个包围盒
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// 检查是否包含指定点（含边界）
    pub fn contains_point(&self, point: &Vector2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// 获取中心点
    pub fn center(&self) -> Vector2 {
        self.min + (self.max - self.min) * 0.5
    }

    /// 获取宽度
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// 获取高度
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// 平移包围盒，返回新的副本
    pub fn move_by(&self, dx: f64, dy: f64) -> Self {
        self.move_vec(Vector2::new(dx, dy))
    }

    /// 按向量平移包围盒，返回新的副本
    pub fn move_vec(&self, delta: Vector2) -> Self {
        Self {
            min: self.min + delta,
            max: self.max + delta,
        }
    }

    /// 计算与另一个包围盒的重叠描述
    ///
    /// 任一轴上不相交时返回空描述。仅接触边界不算分离。
    pub fn intersection(&self, other: &Self) -> BoundsOverlap {
        if other.max.x < self.min.x
            || other.min.x > self.max.x
            || other.max.y < self.min.y
            || other.min.y > self.max.y
        {
            return BoundsOverlap::empty();
        }

        BoundsOverlap {
            lo: self.max.inf(&other.max),
            hi: self.min.sup(&other.min),
        }
    }

    /// 检查是否与另一个包围盒相交
    pub fn is_intersecting(&self, other: &Self) -> bool {
        !self.intersection(other).is_empty()
    }

    /// 宽和高都为零时视为空
    pub fn is_empty(&self) -> bool {
        self.max.x - self.min.x == 0.0 && self.max.y - self.min.y == 0.0
    }

    /// 四个坐标都是有限值
    pub fn is_finite(&self) -> bool {
        self.min.iter().chain(self.max.iter()).all(|v| v.is_finite())
    }

    /// 映射到网格单元坐标（包含两端）
    ///
    /// 坐标非有限或超出 `i32` 单元索引范围时返回 `None`。
    pub fn to_cell_space(&self, cell: CellSize) -> Option<CellRange> {
        Some(CellRange {
            min_x: cell_index(self.min.x, cell.width())?,
            min_y: cell_index(self.min.y, cell.height())?,
            max_x: cell_index(self.max.x, cell.width())?,
            max_y: cell_index(self.max.y, cell.height())?,
        })
    }
}

fn cell_index(coord: f64, size: f64) -> Option<i32> {
    let index = (coord / size).floor();
    (index >= i32::MIN as f64 && index <= i32::MAX as f64).then_some(index as i32)
}

/// 两个包围盒的重叠描述
///
/// `lo` 是两个 max 角的分量最小值，`hi` 是两个 min 角的分量最大值。
/// 这种倒置布局只用于判断是否退化，不对外暴露为矩形。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundsOverlap {
    lo: Vector2,
    hi: Vector2,
}

impl BoundsOverlap {
    /// 空重叠（不相交）
    pub fn empty() -> Self {
        Self {
            lo: Vector2::zeros(),
            hi: Vector2::zeros(),
        }
    }

    /// 两轴上的重叠长度都为零时为空
    pub fn is_empty(&self) -> bool {
        self.hi.x - self.lo.x == 0.0 && self.hi.y - self.lo.y == 0.0
    }

    /// 每个轴上的重叠长度（非负）
    pub fn extent(&self) -> Vector2 {
        (self.lo - self.hi).sup(&Vector2::zeros())
    }
}

/// 网格单元尺寸
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellSize {
    width: f64,
    height: f64,
}

impl CellSize {
    /// 创建单元尺寸，宽高必须是有限正数
    pub fn new(width: f64, height: f64) -> Result<Self, CollisionError> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(CollisionError::InvalidCellSize { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}

/// 网格单元坐标范围（包含两端）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRange {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl CellRange {
    /// 遍历范围内的所有单元
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> {
        let (min_x, max_x) = (self.min_x, self.max_x);
        (self.min_y..=self.max_y).flat_map(move |y| (min_x..=max_x).map(move |x| (x, y)))
    }

    /// 范围内的单元数量，溢出时饱和
    pub fn cell_count(&self) -> u64 {
        let span = |lo: i32, hi: i32| (i64::from(hi) - i64::from(lo) + 1).max(0) as u64;
        span(self.min_x, self.max_x).saturating_mul(span(self.min_y, self.max_y))
    }
}
