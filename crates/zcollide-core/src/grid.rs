//! 宽相位均匀网格
//!
//! 每个形状按包围盒登记到覆盖的所有网格单元中。查询时先取出候选单元
//! 里的形状ID并去重，再交给窄相位（例如射线检测）做精确计算。
//!
//! 覆盖超过 [`MAX_CELLS_PER_SHAPE`] 个单元（或坐标非有限）的形状不按单元登记，
//! 而是放进超大形状列表，每次查询都会带上。同样超限的查询范围退化为全量扫描。

use crate::bounds::{Bounds, CellRange, CellSize};
use crate::config::CollisionConfig;
use crate::error::CollisionError;
use crate::math::Vector2;
use crate::set::Set;
use crate::math::unit_or_zero;
use crate::shape::{Segment, Shape, ShapeId, ShapeIterator};
use std::collections::HashMap;
use tracing::{debug, trace};

/// 单个形状或查询最多展开的单元数量
pub const MAX_CELLS_PER_SHAPE: u64 = 4096;

/// 均匀网格空间
#[derive(Debug, Clone)]
pub struct Grid {
    cell_size: CellSize,
    shapes: HashMap<ShapeId, Shape>,
    cells: HashMap<(i32, i32), Set<ShapeId>>,
    oversized: Set<ShapeId>,
}

impl Grid {
    /// 创建空网格
    pub fn new(cell_size: CellSize) -> Self {
        Self {
            cell_size,
            shapes: HashMap::new(),
            cells: HashMap::new(),
            oversized: Set::new(),
        }
    }

    /// 按配置创建网格
    pub fn from_config(config: &CollisionConfig) -> Result<Self, CollisionError> {
        Ok(Self::new(config.cell_size()?))
    }

    pub fn cell_size(&self) -> CellSize {
        self.cell_size
    }

    /// 形状数量
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// 非空单元数量
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// 不按单元登记的超大形状数量
    pub fn oversized_count(&self) -> usize {
        self.oversized.len()
    }

    /// 包围盒覆盖的单元范围；超限或坐标非有限时返回 `None`
    fn cell_span(&self, bounds: &Bounds) -> Option<CellRange> {
        bounds
            .to_cell_space(self.cell_size)
            .filter(|range| range.cell_count() <= MAX_CELLS_PER_SHAPE)
    }

    /// 插入形状；相同ID的旧形状会被替换
    pub fn insert(&mut self, shape: Shape) -> ShapeId {
        let id = shape.id;
        self.remove(id);

        match self.cell_span(&shape.bounds()) {
            Some(range) => {
                for cell in range.cells() {
                    self.cells.entry(cell).or_default().add([id]);
                }
                trace!(?id, kind = shape.geometry.type_name(), ?range, "grid insert");
            }
            None => {
                self.oversized.add([id]);
                debug!(
                    ?id,
                    kind = shape.geometry.type_name(),
                    bounds = ?shape.bounds(),
                    "grid insert oversized"
                );
            }
        }

        self.shapes.insert(id, shape);
        id
    }

    /// 移除形状
    pub fn remove(&mut self, id: ShapeId) -> Option<Shape> {
        let shape = self.shapes.remove(&id)?;

        if self.oversized.contains(&id) {
            self.oversized.remove(&[id]);
        } else if let Some(range) = self.cell_span(&shape.bounds()) {
            for cell in range.cells() {
                if let Some(ids) = self.cells.get_mut(&cell) {
                    ids.remove(&[id]);
                    if ids.is_empty() {
                        self.cells.remove(&cell);
                    }
                }
            }
        }
        trace!(?id, "grid remove");

        Some(shape)
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    /// 查询包围盒覆盖的单元中的所有形状（含超大形状）
    ///
    /// 查询范围本身超限时返回全部形状。
    pub fn query(&self, bounds: &Bounds) -> CellSelection<'_> {
        let Some(range) = self.cell_span(bounds) else {
            debug!(?bounds, "grid query exceeds cell limit, selecting all shapes");
            return CellSelection {
                grid: self,
                ids: self.shapes.keys().copied().collect(),
            };
        };

        let mut ids = self.oversized.clone();
        for cell in range.cells() {
            if let Some(cell_ids) = self.cells.get(&cell) {
                ids.combine(cell_ids);
            }
        }
        CellSelection { grid: self, ids }
    }

    /// 射线检测的候选形状
    ///
    /// 查询范围与射线检测实际求交的线段一致：起点沿反方向回退 `margin`。
    pub fn query_segment(&self, start: Vector2, end: Vector2, margin: f64) -> CellSelection<'_> {
        let cast_start = start - unit_or_zero(end - start) * margin;
        self.query(&Segment::new(cast_start, end).bounds())
    }
}

impl ShapeIterator for Grid {
    fn for_each_shape(&self, visit: &mut dyn FnMut(&Shape) -> bool) {
        for shape in self.shapes.values() {
            if !visit(shape) {
                break;
            }
        }
    }
}

/// 网格查询结果（已去重）
#[derive(Debug, Clone)]
pub struct CellSelection<'a> {
    grid: &'a Grid,
    ids: Set<ShapeId>,
}

impl CellSelection<'_> {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.ids.contains(&id)
    }
}

impl ShapeIterator for CellSelection<'_> {
    fn for_each_shape(&self, visit: &mut dyn FnMut(&Shape) -> bool) {
        self.ids.for_each(|id| match self.grid.get(*id) {
            Some(shape) => visit(shape),
            None => true,
        });
    }
}
