//! 接触点与接触流形
//!
//! `IntersectionSet` 汇总调用方与某一个形状之间的全部接触点。

use crate::math::{unit_or_zero, Vector2};
use crate::shape::ShapeId;
use serde::{Deserialize, Serialize};

/// 单个接触点
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Intersection {
    /// 接触位置
    pub point: Vector2,
    /// 被接触表面的单位法线
    pub normal: Vector2,
}

impl Intersection {
    pub fn new(point: Vector2, normal: Vector2) -> Self {
        Self { point, normal }
    }
}

/// 与一个形状之间的接触流形
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IntersectionSet {
    /// 接触点列表
    pub intersections: Vec<Intersection>,
    /// 所有接触点的平均位置
    pub center: Vector2,
    /// 最小平移向量；射线检测中为从射线起点到最近接触点的位移
    pub mtv: Vector2,
    /// 被接触的形状
    pub other_shape: ShapeId,
}

impl IntersectionSet {
    /// 创建零值流形
    pub fn new() -> Self {
        Self::default()
    }

    /// 正常情况下不会为空
    pub fn is_empty(&self) -> bool {
        self.intersections.is_empty()
    }

    pub fn len(&self) -> usize {
        self.intersections.len()
    }

    /// 最左侧（x 最小）的接触点
    pub fn leftmost_point(&self) -> Option<Vector2> {
        self.pick(|candidate, best| candidate.x < best.x)
    }

    /// 最右侧（x 最大）的接触点
    pub fn rightmost_point(&self) -> Option<Vector2> {
        self.pick(|candidate, best| candidate.x > best.x)
    }

    /// 最上方的接触点（y 最小，屏幕坐标系）
    pub fn topmost_point(&self) -> Option<Vector2> {
        self.pick(|candidate, best| candidate.y < best.y)
    }

    /// 最下方的接触点（y 最大，屏幕坐标系）
    pub fn bottommost_point(&self) -> Option<Vector2> {
        self.pick(|candidate, best| candidate.y > best.y)
    }

    /// 所有接触点投影到指定轴上的跨度
    ///
    /// 可用于区分边接触（跨度大）和点接触（跨度接近零）。空流形返回 0。
    pub fn distance(&self, along_axis: Vector2) -> f64 {
        let axis = unit_or_zero(along_axis);
        let (lo, hi) = self
            .points()
            .map(|p| axis.dot(&p))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), d| {
                (lo.min(d), hi.max(d))
            });
        if lo > hi {
            0.0
        } else {
            hi - lo
        }
    }

    /// 线性扫描，相同值保留先出现的点
    fn pick(&self, better: impl Fn(&Vector2, &Vector2) -> bool) -> Option<Vector2> {
        self.points()
            .reduce(|best, candidate| if better(&candidate, &best) { candidate } else { best })
    }

    fn points(&self) -> impl Iterator<Item = Vector2> + '_ {
        self.intersections.iter().map(|i| i.point)
    }
}
