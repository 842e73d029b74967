use svg::node::element::path::Data;
use svg::node::element::Path;
use svg::Document;

use super::{PaintedShape, Surface};
use crate::params::hex_color;

/// One filled path per shape, in paint order.
pub fn to_document(shapes: &[PaintedShape], surface: &Surface) -> Document {
    shapes.iter().fold(
        Document::new()
            .set("viewBox", (0.0, 0.0, surface.width, surface.height))
            .set("width", surface.width)
            .set("height", surface.height),
        |document, shape| document.add(to_path(shape)),
    )
}

pub fn to_path(shape: &PaintedShape) -> Path {
    let mut points = shape.polygon.exterior().points();
    let mut data = Data::new();
    if let Some(first) = points.next() {
        data = data.move_to((first.x(), first.y()));
    }
    for point in points {
        data = data.line_to((point.x(), point.y()));
    }
    let path = Path::new()
        .set("fill", hex_color(&shape.color))
        .set("stroke", "none")
        .set("d", data.close());
    if shape.alpha < 1.0 {
        path.set("fill-opacity", shape.alpha)
    } else {
        path
    }
}
