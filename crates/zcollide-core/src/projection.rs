//! 分离轴投影
//!
//! 形状在某一轴上的一维投影区间，是分离轴定理 (SAT) 的基本操作：
//! 两个凸形状相交，当且仅当所有候选轴上的投影都重叠。

use serde::{Deserialize, Serialize};

/// 一维投影区间
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub min: f64,
    pub max: f64,
}

impl Projection {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// 从一组标量创建投影，输入为空时返回 `None`
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        values.into_iter().fold(None, |acc, v| match acc {
            None => Some(Self::new(v, v)),
            Some(p) => Some(Self::new(p.min.min(v), p.max.max(v))),
        })
    }

    /// 沿该轴的有符号穿透深度，小于等于零表示分离或仅接触
    pub fn overlap(&self, other: &Self) -> f64 {
        (self.max - other.min).min(other.max - self.min)
    }

    /// 是否重叠（接触不算）
    pub fn is_overlapping(&self, other: &Self) -> bool {
        self.overlap(other) > 0.0
    }

    /// 是否完全位于另一个区间之内
    pub fn is_inside(&self, other: &Self) -> bool {
        self.min >= other.min && self.max <= other.max
    }
}
