//! 碰撞核心错误定义
//!
//! 几何查询本身从不失败，错误只出现在构造阶段的参数校验中。

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CollisionError {
    #[error("Invalid cell size: {width} x {height} (must be finite and positive)")]
    InvalidCellSize { width: f64, height: f64 },

    #[error("Invalid cast margin: {0} (must be finite and non-negative)")]
    InvalidCastMargin(f64),

    #[error("Degenerate polygon: {0} points (at least 3 required)")]
    DegeneratePolygon(usize),
}
