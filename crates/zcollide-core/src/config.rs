//! 碰撞配置
//!
//! 网格单元尺寸和射线检测的起点回退量。缺省字段使用默认值。

use crate::bounds::CellSize;
use crate::error::CollisionError;
use serde::{Deserialize, Serialize};

/// 射线起点沿反方向回退的距离
pub const DEFAULT_CAST_MARGIN: f64 = 0.01;

/// 默认网格单元边长
pub const DEFAULT_CELL_SIZE: f64 = 32.0;

/// 碰撞配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// 网格单元宽度
    pub cell_width: f64,
    /// 网格单元高度
    pub cell_height: f64,
    /// 射线检测起点回退量
    pub cast_margin: f64,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            cell_width: DEFAULT_CELL_SIZE,
            cell_height: DEFAULT_CELL_SIZE,
            cast_margin: DEFAULT_CAST_MARGIN,
        }
    }
}

impl CollisionConfig {
    /// 校验全部字段
    pub fn validate(&self) -> Result<(), CollisionError> {
        self.cell_size()?;
        if !(self.cast_margin.is_finite() && self.cast_margin >= 0.0) {
            return Err(CollisionError::InvalidCastMargin(self.cast_margin));
        }
        Ok(())
    }

    /// 网格单元尺寸
    pub fn cell_size(&self) -> Result<CellSize, CollisionError> {
        CellSize::new(self.cell_width, self.cell_height)
    }
}
