/// Affine matrix helpers, and a trait to push geo_types geometry through them.
pub mod matrix;

/// Branch and leaf outlines.
pub mod shapes;
