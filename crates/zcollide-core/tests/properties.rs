//! 几何运算的性质测试

use approx::assert_relative_eq;
use proptest::prelude::*;
use zcollide_core::math::distance_squared;
use zcollide_core::prelude::*;

fn coord() -> impl Strategy<Value = f64> {
    -1.0e3..1.0e3f64
}

fn bounds() -> impl Strategy<Value = Bounds> {
    (coord(), coord(), 0.0..100.0f64, 0.0..100.0f64).prop_map(|(x, y, w, h)| {
        Bounds::new(Vector2::new(x, y), Vector2::new(x + w, y + h))
    })
}

fn points() -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((coord(), coord()), 1..12)
}

fn manifold(points: &[(f64, f64)]) -> IntersectionSet {
    IntersectionSet {
        intersections: points
            .iter()
            .map(|&(x, y)| Intersection::new(Vector2::new(x, y), Vector2::new(1.0, 0.0)))
            .collect(),
        ..IntersectionSet::new()
    }
}

proptest! {
    #[test]
    fn bounds_intersection_is_symmetric(a in bounds(), b in bounds()) {
        prop_assert_eq!(a.is_intersecting(&b), b.is_intersecting(&a));
    }

    #[test]
    fn bounds_zero_move_is_identity(b in bounds()) {
        prop_assert_eq!(b.move_by(0.0, 0.0), b);
        prop_assert_eq!(b.move_vec(Vector2::zeros()), b);
    }

    #[test]
    fn bounds_always_intersect_themselves(b in bounds()) {
        // 宽高都为零时与自身的重叠为空
        prop_assume!(b.width() > 0.0 || b.height() > 0.0);
        prop_assert!(b.is_intersecting(&b));
    }

    #[test]
    fn projection_overlap_is_symmetric(a in coord(), la in 0.0..50.0f64, b in coord(), lb in 0.0..50.0f64) {
        let p = Projection::new(a, a + la);
        let q = Projection::new(b, b + lb);
        prop_assert_eq!(p.overlap(&q), q.overlap(&p));
        if p.is_inside(&q) && la > 0.0 {
            prop_assert!(p.is_overlapping(&q));
        }
    }

    #[test]
    fn manifold_distance_ignores_order(
        (original, shuffled) in points().prop_flat_map(|pts| (Just(pts.clone()), Just(pts).prop_shuffle())),
        ax in -1.0..1.0f64,
        ay in -1.0..1.0f64,
    ) {
        prop_assume!(ax.abs() + ay.abs() > 1e-3);
        let axis = Vector2::new(ax, ay);
        assert_relative_eq!(
            manifold(&original).distance(axis),
            manifold(&shuffled).distance(axis),
            epsilon = 1e-9
        );
    }

    #[test]
    fn set_combine_is_union(a in prop::collection::vec(0u8..32, 0..16), b in prop::collection::vec(0u8..32, 0..16)) {
        let sa: Set<u8> = a.iter().copied().collect();
        let sb: Set<u8> = b.iter().copied().collect();
        let mut union = sa.clone();
        union.combine(&sb);
        for x in 0u8..32 {
            prop_assert_eq!(union.contains(&x), sa.contains(&x) || sb.contains(&x));
        }
    }

    #[test]
    fn line_test_visits_hits_nearest_first(xs in prop::collection::vec(5.0..95.0f64, 1..8)) {
        // 沿 x 轴排布、互不重叠的小圆
        let mut centers: Vec<f64> = xs.iter().map(|x| (x / 10.0).floor() * 10.0 + 5.0).collect();
        centers.sort_by(f64::total_cmp);
        centers.dedup();

        let shapes: Vec<Shape> = centers
            .iter()
            .rev()
            .map(|&x| Shape::circle(Vector2::new(x, 0.0), 1.0))
            .collect();

        let start = Vector2::new(0.0, 0.0);
        let mut distances = Vec::new();
        let mut indices = Vec::new();
        let hit = line_test(
            LineTestSettings::new(start, Vector2::new(100.0, 0.0), &shapes).on_intersect(|set, index, total| {
                distances.push(distance_squared(&set.intersections[0].point, &start));
                indices.push((index, total));
                true
            }),
        );

        prop_assert!(hit);
        prop_assert_eq!(distances.len(), centers.len());
        prop_assert!(distances.windows(2).all(|w| w[0] < w[1]));
        let expected: Vec<(usize, usize)> = (0..centers.len()).map(|i| (i, centers.len())).collect();
        prop_assert_eq!(indices, expected);
    }
}
