//! Proptest strategies for geometry and graph-building property tests.

use geo::Coord;
use proptest::prelude::*;

/// Strategy for a coordinate inside `[-extent, extent]²`.
pub fn coord_strategy(extent: f64) -> impl Strategy<Value = Coord<f64>> {
    (-extent..=extent, -extent..=extent).prop_map(|(x, y)| Coord { x, y })
}

/// Strategy for an axis-aligned rectangle ring given as `(min, max)`.
pub fn rect_strategy(extent: f64) -> impl Strategy<Value = (Coord<f64>, Coord<f64>)> {
    (coord_strategy(extent), 1.0..extent, 1.0..extent).prop_map(|(min, width, height)| {
        (
            min,
            Coord {
                x: min.x + width,
                y: min.y + height,
            },
        )
    })
}

/// Strategy for a convex polygon: a regular polygon with jittered radius
/// kept convex by sorting vertices by angle around a centre.
pub fn convex_ring_strategy() -> impl Strategy<Value = Vec<Coord<f64>>> {
    (3_usize..9, 5.0_f64..50.0, coord_strategy(100.0)).prop_map(|(sides, radius, centre)| {
        (0..sides)
            .map(|k| {
                let angle = std::f64::consts::TAU * k as f64 / sides as f64;
                Coord {
                    x: centre.x + radius * angle.cos(),
                    y: centre.y + radius * angle.sin(),
                }
            })
            .collect()
    })
}

/// Closed ring of the rectangle spanned by `min` and `max`.
pub fn rect_ring(min: Coord<f64>, max: Coord<f64>) -> Vec<Coord<f64>> {
    vec![
        min,
        Coord { x: max.x, y: min.y },
        max,
        Coord { x: min.x, y: max.y },
    ]
}

/// Whether `point` is strictly left of every directed edge of a
/// counter-clockwise convex ring, allowing `tolerance` for rounding.
pub fn inside_convex(point: Coord<f64>, ring: &[Coord<f64>], tolerance: f64) -> Option<bool> {
    let mut inside = true;
    for (index, a) in ring.iter().enumerate() {
        let b = ring[(index + 1) % ring.len()];
        let cross = (b.x - a.x) * (point.y - a.y) - (b.y - a.y) * (point.x - a.x);
        if cross.abs() <= tolerance {
            return None;
        }
        inside &= cross > 0.0;
    }
    Some(inside)
}
