//! The two shapes a plant is made of.
use geo_types::{coord, LineString, Polygon};

/// Vertices of the unit leaf, tip pointing up the screen (negative y).
pub const LEAF_KITE: [(f64, f64); 5] = [(0.0, 0.0), (1.0, -1.0), (0.0, -4.0), (-1.0, -1.0), (0.0, 0.0)];

/// Branch segment: a `width` x `length` rectangle with its corner on the
/// origin, growing towards negative y.
pub fn branch_rect(width: f64, length: f64) -> Polygon<f64> {
    Polygon::new(
        LineString::new(vec![
            coord! {x: 0.0, y: 0.0},
            coord! {x: width, y: 0.0},
            coord! {x: width, y: -length},
            coord! {x: 0.0, y: -length},
            coord! {x: 0.0, y: 0.0},
        ]),
        vec![],
    )
}

/// The kite leaf, scaled by (width, length).
pub fn leaf_kite(width: f64, length: f64) -> Polygon<f64> {
    Polygon::new(
        LEAF_KITE
            .iter()
            .map(|(x, y)| coord! {x: x * width, y: y * length})
            .collect::<Vec<_>>()
            .into(),
        vec![],
    )
}
