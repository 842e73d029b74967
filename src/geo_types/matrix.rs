use geo::MapCoords;
use geo::{coord, Coord};
use geo_types::Polygon;
use nalgebra::{Affine2, Matrix3, Point2 as NPoint2};

/// Helper to create a scaling matrix
pub fn scale_matrix(sx: f64, sy: f64) -> Affine2<f64> {
    Affine2::from_matrix_unchecked(Matrix3::new(sx, 0.0, 0.0, 0.0, sy, 0.0, 0.0, 0.0, 1.0))
}

/// Helper to create a translation matrix
pub fn translate_matrix(tx: f64, ty: f64) -> Affine2<f64> {
    Affine2::from_matrix_unchecked(Matrix3::new(1.0, 0.0, tx, 0.0, 1.0, ty, 0.0, 0.0, 1.0))
}

/// Radians, standard orientation. On a y-down surface (canvas, SVG) a
/// positive angle turns clockwise on screen.
pub fn rotate_matrix(radians: f64) -> Affine2<f64> {
    Affine2::from_matrix_unchecked(Matrix3::new(
        radians.cos(),
        -radians.sin(),
        0.0,
        radians.sin(),
        radians.cos(),
        0.0,
        0.0,
        0.0,
        1.0,
    ))
}

/// Unit matrix. Basically a no-op
pub fn unit_matrix() -> Affine2<f64> {
    Affine2::from_matrix_unchecked(Matrix3::new(1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0))
}

/// Where the origin of `affine` lands.
pub fn origin_of(affine: &Affine2<f64>) -> Coord<f64> {
    let out = affine * NPoint2::new(0.0, 0.0);
    coord!(x: out.x, y: out.y)
}

pub trait TransformGeometry {
    fn xform_coord(xy: &Coord<f64>, affine: &Affine2<f64>) -> Coord<f64> {
        let out = affine * NPoint2::new(xy.x, xy.y);
        coord!(x: out.x, y: out.y)
    }

    fn transformed(&self, affine: &Affine2<f64>) -> Self;
}

impl TransformGeometry for Polygon<f64> {
    fn transformed(&self, affine: &Affine2<f64>) -> Polygon<f64> {
        self.map_coords(|xy| Self::xform_coord(&xy, affine))
    }
}
