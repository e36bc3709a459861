//! 数学基础类型
//!
//! 基于 nalgebra 提供的向量类型的别名，以及浮点比较辅助函数。

use nalgebra as na;

/// 2D向量类型（同时用于表示点）
pub type Vector2 = na::Vector2<f64>;

/// 数值容差，用于几何比较
pub const EPSILON: f64 = 1e-10;

/// 判断两个浮点数是否近似相等
#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// 判断两个2D向量是否近似相等
#[inline]
pub fn vectors_approx_eq(a: &Vector2, b: &Vector2) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

/// 单位化向量；零向量返回零向量而不是 NaN
#[inline]
pub fn unit_or_zero(v: Vector2) -> Vector2 {
    v.try_normalize(EPSILON).unwrap_or_else(Vector2::zeros)
}

/// 两点距离的平方
#[inline]
pub fn distance_squared(a: &Vector2, b: &Vector2) -> f64 {
    (a - b).norm_squared()
}
