// Property tests for contour and point invariants.

use hotwire_core::{AirfoilProfile, Contour, Point2D};
use proptest::prelude::*;
use std::f64::consts::PI;

fn arbitrary_contour() -> impl Strategy<Value = Contour> {
    prop::collection::vec((-100.0f64..100.0, -100.0f64..100.0), 2..40).prop_map(|coords| {
        Contour::new(coords.into_iter().map(Point2D::from).collect())
            .expect("at least two points")
    })
}

/// Upper half of a circle sampled at evenly spaced angles, right to left.
fn arc(radius: f64, points: usize) -> Contour {
    let step = PI / (points - 1) as f64;
    Contour::new(
        (0..points)
            .map(|i| {
                let a = step * i as f64;
                Point2D::new(radius * a.cos(), radius * a.sin())
            })
            .collect(),
    )
    .expect("arc has points")
}

proptest! {
    #[test]
    fn distance_percent_hits_endpoints(contour in arbitrary_contour()) {
        prop_assert_eq!(contour.interpolate_by_distance_percent(0.0), contour.first());
        prop_assert_eq!(contour.interpolate_by_distance_percent(1.0), contour.last());
    }

    #[test]
    fn distance_percent_stays_inside_bounds(contour in arbitrary_contour(), pct in 0.0f64..=1.0) {
        let p = contour.interpolate_by_distance_percent(pct);
        let (min, max) = contour.bounds();
        prop_assert!(p.x >= min.x - 1e-9 && p.x <= max.x + 1e-9);
        prop_assert!(p.y >= min.y - 1e-9 && p.y <= max.y + 1e-9);
    }

    #[test]
    fn translate_round_trip_is_exact(
        coords in prop::collection::vec((-4000i32..4000, -4000i32..4000), 3..20),
        dx in -800i32..800,
        dy in -800i32..800,
    ) {
        // eighths keep every sum exactly representable
        let points: Vec<Point2D> = coords
            .into_iter()
            .map(|(x, y)| Point2D::new(x as f64 / 8.0, y as f64 / 8.0))
            .collect();
        let offset = Point2D::new(dx as f64 / 8.0, dy as f64 / 8.0);
        let contour = Contour::new(points).unwrap();
        prop_assert_eq!(contour.translate(offset).translate(-offset), contour);
    }

    #[test]
    fn offset_is_reversible_on_convex_arc(d in -0.05f64..0.05, points in 16usize..64) {
        let original = arc(1.0, points);
        let restored = original.offset(d).offset(-d);
        for (a, b) in original.points().iter().zip(restored.points()) {
            prop_assert!(a.approx_eq(b, 5e-3), "{} vs {}", a, b);
        }
    }

    #[test]
    fn interpolate_returns_requested_x(contour in arbitrary_contour(), x in -150.0f64..150.0) {
        let p = contour.interpolate(x);
        prop_assert_eq!(p.x, x);
        prop_assert!(p.y.is_finite());
    }

    #[test]
    fn scale_by_one_is_identity(contour in arbitrary_contour(), r in 0.01f64..1.0) {
        let profile = AirfoilProfile::from_contours(contour.clone(), contour)
            .with_spar(Point2D::new(0.5, 0.0), r);
        prop_assert_eq!(profile.scale(1.0), profile);
    }
}
