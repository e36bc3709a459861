//! ZCollide 碰撞检测核心
//!
//! 提供2D碰撞检测的几何基础：包围盒运算、分离轴投影、接触流形和射线检测。
//!
//! # 架构设计
//!
//! - `Bounds` / `Projection`: 宽相位与分离轴的基本运算
//! - `IntersectionSet`: 与单个形状之间的接触点、法线和最小平移向量
//! - `line_test`: 扫描一组形状的射线检测，按距离顺序驱动回调
//! - `Grid`: 均匀网格宽相位，为射线检测预筛选候选形状
//!
//! # 示例
//!
//! ```rust
//! use zcollide_core::prelude::*;
//!
//! let shapes = vec![Shape::circle(Vector2::new(10.0, 0.0), 2.0)];
//! let settings = LineTestSettings::new(Vector2::zeros(), Vector2::new(20.0, 0.0), &shapes)
//!     .on_intersect(|set, index, total| {
//!         println!("hit {}/{} at {:?}", index + 1, total, set.intersections[0].point);
//!         true
//!     });
//!
//! assert!(line_test(settings));
//! ```

pub mod bounds;
pub mod config;
pub mod error;
pub mod grid;
pub mod intersection;
pub mod math;
pub mod projection;
pub mod set;
pub mod shape;

pub use error::CollisionError;

pub mod prelude {
    //! 常用类型的便捷导入
    pub use crate::bounds::{Bounds, CellRange, CellSize};
    pub use crate::config::CollisionConfig;
    pub use crate::error::CollisionError;
    pub use crate::grid::{CellSelection, Grid};
    pub use crate::intersection::{Intersection, IntersectionSet};
    pub use crate::line_test::{line_test, LineTestSettings};
    pub use crate::math::Vector2;
    pub use crate::projection::Projection;
    pub use crate::set::Set;
    pub use crate::shape::{Circle, ConvexPolygon, Geometry, Segment, Shape, ShapeId, ShapeIterator};
}
