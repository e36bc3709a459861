//! 形状与线段图元
//!
//! 支持的形状：
//! - 圆 (Circle)
//! - 凸多边形 (ConvexPolygon)
//! - 点 (Point)，没有表面，不参与射线检测
//!
//! 形状种类是封闭的枚举 [`Geometry`]，射线检测按种类分派。

use crate::bounds::Bounds;
use crate::error::CollisionError;
use crate::math::{unit_or_zero, Vector2, EPSILON};
use crate::projection::Projection;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// 全局形状ID生成器
static SHAPE_COUNTER: AtomicU64 = AtomicU64::new(1);

/// 形状唯一标识符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct ShapeId(pub u64);

impl ShapeId {
    /// 分配新的形状ID
    pub fn new() -> Self {
        Self(SHAPE_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// 空ID（无效）
    pub const NULL: ShapeId = ShapeId(0);

    pub fn is_null(&self) -> bool {
        self.0 == 0
    }
}

/// 线段
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Vector2,
    pub end: Vector2,
}

impl Segment {
    pub fn new(start: Vector2, end: Vector2) -> Self {
        Self { start, end }
    }

    /// 方向向量（未单位化）
    pub fn delta(&self) -> Vector2 {
        self.end - self.start
    }

    pub fn midpoint(&self) -> Vector2 {
        (self.start + self.end) * 0.5
    }

    /// 线段的单位法向量 (dy, -dx)
    pub fn normal(&self) -> Vector2 {
        let d = self.delta();
        unit_or_zero(Vector2::new(d.y, -d.x))
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_points([self.start, self.end])
    }

    /// 参数 `t` 处的点，`t = 0` 为起点、`t = 1` 为终点
    pub fn point_at(&self, t: f64) -> Vector2 {
        self.start + self.delta() * t
    }

    /// 与另一条线段相交处在本线段上的参数
    ///
    /// 两条线段都必须在 `[0, 1]` 内相交；平行或共线时返回 `None`。
    pub fn segment_param(&self, other: &Segment) -> Option<f64> {
        let r = self.delta();
        let s = other.delta();
        let denom = r.perp(&s);
        if denom.abs() < EPSILON {
            return None;
        }

        let qp = other.start - self.start;
        let t = qp.perp(&s) / denom;
        let u = qp.perp(&r) / denom;
        (on_segment(t) && on_segment(u)).then_some(t)
    }

    /// 与圆边界相交处的参数，升序；相切时只有一个
    ///
    /// 零长度线段返回空。
    pub fn circle_params(&self, circle: &Circle) -> Vec<f64> {
        let d = self.delta();
        let a = d.norm_squared();
        if a < EPSILON {
            return Vec::new();
        }

        // 半系数形式：a·t² + 2·h·t + c = 0
        let f = self.start - circle.center;
        let h = f.dot(&d);
        let c = f.norm_squared() - circle.radius * circle.radius;
        let disc = h * h - a * c;
        if disc < 0.0 {
            return Vec::new();
        }

        let root = disc.sqrt();
        let near = (-h - root) / a;
        let far = (-h + root) / a;
        let mut params = Vec::with_capacity(2);
        if on_segment(near) {
            params.push(near);
        }
        if far - near > EPSILON && on_segment(far) {
            params.push(far);
        }
        params
    }

    /// 线段-线段交点
    pub fn intersection_point(&self, other: &Segment) -> Option<Vector2> {
        self.segment_param(other).map(|t| self.point_at(t))
    }

    /// 线段-圆交点，从起点到终点排列
    pub fn intersection_points_circle(&self, circle: &Circle) -> Vec<Vector2> {
        self.circle_params(circle)
            .into_iter()
            .map(|t| self.point_at(t))
            .collect()
    }
}

fn on_segment(t: f64) -> bool {
    (0.0..=1.0).contains(&t)
}

/// 圆
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vector2,
    pub radius: f64,
}

impl Circle {
    pub fn new(center: Vector2, radius: f64) -> Self {
        Self { center, radius }
    }

    pub fn bounds(&self) -> Bounds {
        let r = Vector2::new(self.radius, self.radius);
        Bounds::new(self.center - r, self.center + r)
    }

    /// 在指定轴上的投影
    pub fn project(&self, axis: Vector2) -> Projection {
        let c = self.center.dot(&unit_or_zero(axis));
        Projection::new(c - self.radius, c + self.radius)
    }
}

/// 多边形的一条边及其外法线
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub segment: Segment,
    pub normal: Vector2,
}

/// 凸多边形（世界坐标顶点，任意绕向）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvexPolygon {
    points: Vec<Vector2>,
}

impl ConvexPolygon {
    /// 创建凸多边形，至少需要3个顶点
    pub fn new(points: Vec<Vector2>) -> Result<Self, CollisionError> {
        if points.len() < 3 {
            return Err(CollisionError::DegeneratePolygon(points.len()));
        }
        Ok(Self { points })
    }

    /// 轴对齐矩形
    pub fn rectangle(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            points: vec![
                Vector2::new(x, y),
                Vector2::new(x + width, y),
                Vector2::new(x + width, y + height),
                Vector2::new(x, y + height),
            ],
        }
    }

    pub fn points(&self) -> &[Vector2] {
        &self.points
    }

    /// 顶点平均值
    pub fn centroid(&self) -> Vector2 {
        let sum = self.points.iter().fold(Vector2::zeros(), |acc, p| acc + p);
        sum / self.points.len() as f64
    }

    /// 所有边，法线总是指向多边形外侧
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        let centroid = self.centroid();
        let n = self.points.len();
        (0..n).map(move |i| {
            let segment = Segment::new(self.points[i], self.points[(i + 1) % n]);
            let mut normal = segment.normal();
            if normal.dot(&(segment.midpoint() - centroid)) < 0.0 {
                normal = -normal;
            }
            Edge { segment, normal }
        })
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_points(self.points.iter().copied())
    }

    /// 在指定轴上的投影
    pub fn project(&self, axis: Vector2) -> Projection {
        let axis = unit_or_zero(axis);
        self.points.iter().fold(
            Projection::new(f64::INFINITY, f64::NEG_INFINITY),
            |p, v| {
                let d = v.dot(&axis);
                Projection::new(p.min.min(d), p.max.max(d))
            },
        )
    }

    /// 分离轴检测，相交时返回把自身推离 `other` 的最小平移向量
    pub fn separation_mtv(&self, other: &ConvexPolygon) -> Option<Vector2> {
        let mut best: Option<(f64, Vector2)> = None;

        for axis in self.edges().chain(other.edges()).map(|e| e.normal) {
            let a = self.project(axis);
            let b = other.project(axis);
            if !a.is_overlapping(&b) {
                return None;
            }
            let depth = a.overlap(&b);
            if best.map_or(true, |(d, _)| depth < d) {
                best = Some((depth, axis));
            }
        }

        best.map(|(depth, axis)| {
            if axis.dot(&(self.centroid() - other.centroid())) < 0.0 {
                -axis * depth
            } else {
                axis * depth
            }
        })
    }
}

/// 形状种类
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    Circle(Circle),
    ConvexPolygon(ConvexPolygon),
    Point(Vector2),
}

impl Geometry {
    /// 获取包围盒
    pub fn bounds(&self) -> Bounds {
        match self {
            Geometry::Circle(c) => c.bounds(),
            Geometry::ConvexPolygon(p) => p.bounds(),
            Geometry::Point(p) => Bounds::new(*p, *p),
        }
    }

    /// 获取类型名称
    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Circle(_) => "Circle",
            Geometry::ConvexPolygon(_) => "ConvexPolygon",
            Geometry::Point(_) => "Point",
        }
    }
}

/// 带标识的形状
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub id: ShapeId,
    pub geometry: Geometry,
}

impl Shape {
    /// 创建新形状并分配ID
    pub fn new(geometry: Geometry) -> Self {
        Self {
            id: ShapeId::new(),
            geometry,
        }
    }

    pub fn circle(center: Vector2, radius: f64) -> Self {
        Self::new(Geometry::Circle(Circle::new(center, radius)))
    }

    pub fn polygon(polygon: ConvexPolygon) -> Self {
        Self::new(Geometry::ConvexPolygon(polygon))
    }

    pub fn point(position: Vector2) -> Self {
        Self::new(Geometry::Point(position))
    }

    pub fn bounds(&self) -> Bounds {
        self.geometry.bounds()
    }
}

/// 形状遍历能力
///
/// 遍历顺序不作保证；访问函数返回 `false` 时提前终止。
pub trait ShapeIterator {
    fn for_each_shape(&self, visit: &mut dyn FnMut(&Shape) -> bool);
}

impl ShapeIterator for [Shape] {
    fn for_each_shape(&self, visit: &mut dyn FnMut(&Shape) -> bool) {
        for shape in self {
            if !visit(shape) {
                break;
            }
        }
    }
}

impl ShapeIterator for Vec<Shape> {
    fn for_each_shape(&self, visit: &mut dyn FnMut(&Shape) -> bool) {
        self.as_slice().for_each_shape(visit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{approx_eq, vectors_approx_eq};

    #[test]
    fn test_shape_ids_unique() {
        let a = Shape::point(Vector2::zeros());
        let b = Shape::point(Vector2::zeros());
        assert_ne!(a.id, b.id);
        assert!(!a.id.is_null());
        assert!(ShapeId::NULL.is_null());
    }

    #[test]
    fn test_segment_intersection() {
        let a = Segment::new(Vector2::new(0.0, 0.0), Vector2::new(10.0, 10.0));
        let b = Segment::new(Vector2::new(0.0, 10.0), Vector2::new(10.0, 0.0));
        let p = a.intersection_point(&b).unwrap();
        assert!(vectors_approx_eq(&p, &Vector2::new(5.0, 5.0)));

        let parallel = Segment::new(Vector2::new(0.0, 1.0), Vector2::new(10.0, 11.0));
        assert!(a.intersection_point(&parallel).is_none());

        let short = Segment::new(Vector2::new(0.0, 10.0), Vector2::new(2.0, 8.0));
        assert!(a.intersection_point(&short).is_none());
    }

    #[test]
    fn test_segment_circle() {
        let circle = Circle::new(Vector2::new(10.0, 0.0), 2.0);

        let through = Segment::new(Vector2::new(0.0, 0.0), Vector2::new(20.0, 0.0));
        let points = through.intersection_points_circle(&circle);
        assert_eq!(points.len(), 2);
        assert!(vectors_approx_eq(&points[0], &Vector2::new(8.0, 0.0)));
        assert!(vectors_approx_eq(&points[1], &Vector2::new(12.0, 0.0)));

        let tangent = Segment::new(Vector2::new(0.0, 2.0), Vector2::new(20.0, 2.0));
        assert_eq!(tangent.intersection_points_circle(&circle).len(), 1);

        let miss = Segment::new(Vector2::new(0.0, 5.0), Vector2::new(20.0, 5.0));
        assert!(miss.intersection_points_circle(&circle).is_empty());

        let inside = Segment::new(Vector2::new(9.0, 0.0), Vector2::new(20.0, 0.0));
        assert_eq!(inside.intersection_points_circle(&circle).len(), 1);

        let zero = Segment::new(Vector2::new(8.0, 0.0), Vector2::new(8.0, 0.0));
        assert!(zero.intersection_points_circle(&circle).is_empty());
    }

    #[test]
    fn test_segment_params() {
        let ray = Segment::new(Vector2::new(0.0, 0.0), Vector2::new(20.0, 0.0));

        let wall = Segment::new(Vector2::new(5.0, -1.0), Vector2::new(5.0, 1.0));
        assert!(approx_eq(ray.segment_param(&wall).unwrap(), 0.25));
        // 参数针对调用者，而不是另一条线段
        assert!(approx_eq(wall.segment_param(&ray).unwrap(), 0.5));

        let params = ray.circle_params(&Circle::new(Vector2::new(10.0, 0.0), 2.0));
        assert_eq!(params.len(), 2);
        assert!(approx_eq(params[0], 0.4));
        assert!(approx_eq(params[1], 0.6));
        assert!(vectors_approx_eq(&ray.point_at(params[1]), &Vector2::new(12.0, 0.0)));

        // 圆在线段后方
        assert!(ray.circle_params(&Circle::new(Vector2::new(-5.0, 0.0), 2.0)).is_empty());
    }

    #[test]
    fn test_polygon_requires_three_points() {
        let err = ConvexPolygon::new(vec![Vector2::zeros(), Vector2::new(1.0, 0.0)]);
        assert_eq!(err, Err(CollisionError::DegeneratePolygon(2)));
    }

    #[test]
    fn test_edge_normals_point_outward() {
        // 两种绕向都应得到外法线
        let ccw = ConvexPolygon::rectangle(0.0, 0.0, 4.0, 2.0);
        let mut reversed = ccw.points().to_vec();
        reversed.reverse();
        let cw = ConvexPolygon::new(reversed).unwrap();

        for poly in [ccw, cw] {
            let centroid = poly.centroid();
            for edge in poly.edges() {
                assert!(approx_eq(edge.normal.norm(), 1.0));
                assert!(edge.normal.dot(&(edge.segment.midpoint() - centroid)) > 0.0);
            }
        }
    }

    #[test]
    fn test_projection_of_shapes() {
        let rect = ConvexPolygon::rectangle(2.0, 0.0, 2.0, 2.0);
        let p = rect.project(Vector2::new(1.0, 0.0));
        assert!(approx_eq(p.min, 2.0));
        assert!(approx_eq(p.max, 4.0));

        let circle = Circle::new(Vector2::new(0.0, 5.0), 1.0);
        let p = circle.project(Vector2::new(0.0, 3.0));
        assert!(approx_eq(p.min, 4.0));
        assert!(approx_eq(p.max, 6.0));
    }

    #[test]
    fn test_separation_mtv() {
        let a = ConvexPolygon::rectangle(0.0, 0.0, 10.0, 10.0);
        let b = ConvexPolygon::rectangle(8.0, 0.0, 10.0, 10.0);
        let mtv = a.separation_mtv(&b).unwrap();
        assert!(vectors_approx_eq(&mtv, &Vector2::new(-2.0, 0.0)));

        let far = ConvexPolygon::rectangle(30.0, 0.0, 10.0, 10.0);
        assert!(a.separation_mtv(&far).is_none());

        // 仅接触不算相交
        let touching = ConvexPolygon::rectangle(10.0, 0.0, 10.0, 10.0);
        assert!(a.separation_mtv(&touching).is_none());
    }

    #[test]
    fn test_bounds() {
        let shape = Shape::circle(Vector2::new(1.0, 1.0), 2.0);
        let b = shape.bounds();
        assert!(vectors_approx_eq(&b.min, &Vector2::new(-1.0, -1.0)));
        assert!(vectors_approx_eq(&b.max, &Vector2::new(3.0, 3.0)));
        assert_eq!(shape.geometry.type_name(), "Circle");
    }
}
