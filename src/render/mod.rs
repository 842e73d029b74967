//! Replays [`DrawCommand`]s against a drawing backend. The turtle only emits
//! deltas; a [`Renderer`] owns the absolute transform and the save/restore
//! stack, the same way a canvas context would.
use geo::BoundingRect;
use geo_types::{Polygon, Rect};
use log::debug;
use nalgebra::Affine2;

use crate::geo_types::matrix::{rotate_matrix, translate_matrix, TransformGeometry};
use crate::geo_types::shapes::{branch_rect, leaf_kite};
use crate::params::CssColor;
use crate::turtle::DrawCommand;

pub mod svg;

/// A drawing surface of caller-chosen pixel dimensions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Surface {
    pub width: f64,
    pub height: f64,
}

impl Default for Surface {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 1000.0,
        }
    }
}

impl Surface {
    pub fn new(width: f64, height: f64) -> Surface {
        Surface { width, height }
    }

    /// Bottom-center, y growing down the surface. Plants grow up towards
    /// negative y from here.
    pub fn origin(&self) -> Affine2<f64> {
        translate_matrix(self.width / 2.0, self.height)
    }
}

pub trait Renderer {
    fn draw_branch(&mut self, width: f64, length: f64, color: &CssColor);
    fn rotate(&mut self, radians: f64);
    fn push_state(&mut self);
    fn pop_state(&mut self);
    fn draw_leaf(&mut self, width: f64, length: f64, color: &CssColor, alpha: f64);

    /// Replay every command, in order.
    fn render(&mut self, commands: &[DrawCommand]) {
        for command in commands {
            match command {
                DrawCommand::DrawBranch {
                    width,
                    length,
                    color,
                } => self.draw_branch(*width, *length, color),
                DrawCommand::Rotate(radians) => self.rotate(*radians),
                DrawCommand::PushState => self.push_state(),
                DrawCommand::PopState => self.pop_state(),
                DrawCommand::DrawLeaf {
                    width,
                    length,
                    color,
                    alpha,
                } => self.draw_leaf(*width, *length, color, *alpha),
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    Branch,
    Leaf,
}

/// A filled polygon in surface coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct PaintedShape {
    pub kind: ShapeKind,
    pub polygon: Polygon<f64>,
    pub color: CssColor,
    pub alpha: f64,
}

/// Renders into a list of [`PaintedShape`]s, ready for SVG or anything else
/// that can fill a polygon.
#[derive(Clone, Debug)]
pub struct ShapeRenderer {
    transform: Affine2<f64>,
    stack: Vec<Affine2<f64>>,
    shapes: Vec<PaintedShape>,
}

impl ShapeRenderer {
    pub fn new(surface: &Surface) -> ShapeRenderer {
        ShapeRenderer {
            transform: surface.origin(),
            stack: vec![],
            shapes: vec![],
        }
    }

    pub fn shapes(&self) -> &[PaintedShape] {
        &self.shapes
    }

    pub fn into_shapes(self) -> Vec<PaintedShape> {
        self.shapes
    }

    pub fn transform(&self) -> &Affine2<f64> {
        &self.transform
    }

    /// Bounding box of everything painted so far.
    pub fn bounds(&self) -> Option<Rect<f64>> {
        self.shapes
            .iter()
            .filter_map(|shape| shape.polygon.bounding_rect())
            .reduce(|a, b| {
                Rect::new(
                    (a.min().x.min(b.min().x), a.min().y.min(b.min().y)),
                    (a.max().x.max(b.max().x), a.max().y.max(b.max().y)),
                )
            })
    }
}

impl Renderer for ShapeRenderer {
    fn draw_branch(&mut self, width: f64, length: f64, color: &CssColor) {
        self.shapes.push(PaintedShape {
            kind: ShapeKind::Branch,
            polygon: branch_rect(width, length).transformed(&self.transform),
            color: color.clone(),
            alpha: 1.0,
        });
        self.transform = self.transform * translate_matrix(0.0, -length);
    }

    fn rotate(&mut self, radians: f64) {
        self.transform = self.transform * rotate_matrix(radians);
    }

    fn push_state(&mut self) {
        self.stack.push(self.transform);
    }

    fn pop_state(&mut self) {
        match self.stack.pop() {
            Some(transform) => self.transform = transform,
            None => debug!("Ignoring restore on an empty renderer stack"),
        }
    }

    fn draw_leaf(&mut self, width: f64, length: f64, color: &CssColor, alpha: f64) {
        self.shapes.push(PaintedShape {
            kind: ShapeKind::Leaf,
            polygon: leaf_kite(width, length).transformed(&self.transform),
            color: color.clone(),
            alpha,
        });
    }
}

/// Convenience: replay `commands` onto a fresh [`ShapeRenderer`].
pub fn paint(commands: &[DrawCommand], surface: &Surface) -> Vec<PaintedShape> {
    let mut renderer = ShapeRenderer::new(surface);
    renderer.render(commands);
    renderer.into_shapes()
}

#[cfg(test)]
mod test {
    use geo::Coord;

    use super::*;
    use crate::params::ExpansionParameters;
    use crate::turtle::interpret;

    fn near(a: Coord<f64>, x: f64, y: f64) -> bool {
        (a.x - x).abs() < 1e-9 && (a.y - y).abs() < 1e-9
    }

    #[test]
    fn test_branch_from_bottom_center() {
        let params = ExpansionParameters::default();
        let shapes = paint(&interpret("FF", &params, 30.0), &Surface::new(100.0, 200.0));
        assert_eq!(shapes.len(), 2);
        let first: Vec<Coord<f64>> = shapes[0].polygon.exterior().coords().cloned().collect();
        assert!(near(first[0], 50.0, 200.0));
        assert!(near(first[2], 51.0, 170.0));
        let second: Vec<Coord<f64>> = shapes[1].polygon.exterior().coords().cloned().collect();
        assert!(near(second[0], 50.0, 170.0));
        assert!(near(second[3], 50.0, 140.0));
        assert_eq!(shapes[0].kind, ShapeKind::Branch);
        assert_eq!(shapes[0].alpha, 1.0);
    }

    #[test]
    fn test_leaf_restores_transform() {
        let params = ExpansionParameters {
            leaf_width: 2.0,
            leaf_length: 3.0,
            ..Default::default()
        };
        let surface = Surface::new(100.0, 100.0);
        let mut renderer = ShapeRenderer::new(&surface);
        renderer.render(&interpret("[F]F", &params, 10.0));
        let shapes = renderer.shapes();
        assert_eq!(shapes.len(), 3);
        assert_eq!(shapes[1].kind, ShapeKind::Leaf);
        assert_eq!(shapes[1].alpha, 0.75);
        let tip: Vec<Coord<f64>> = shapes[1].polygon.exterior().coords().cloned().collect();
        assert!(near(tip[0], 50.0, 90.0));
        assert!(near(tip[2], 50.0, 78.0));
        // The second branch starts back at the root.
        let second: Vec<Coord<f64>> = shapes[2].polygon.exterior().coords().cloned().collect();
        assert!(near(second[0], 50.0, 100.0));
    }

    #[test]
    fn test_unbalanced_pop_ignored() {
        let surface = Surface::default();
        let mut renderer = ShapeRenderer::new(&surface);
        renderer.render(&[DrawCommand::PopState, DrawCommand::Rotate(0.5)]);
        assert!(renderer.shapes().is_empty());
        assert_eq!(
            renderer.transform(),
            &(surface.origin() * rotate_matrix(0.5))
        );
    }

    #[test]
    fn test_bounds() {
        let params = ExpansionParameters::default();
        let shapes = paint(&interpret("F", &params, 30.0), &Surface::new(100.0, 100.0));
        let mut renderer = ShapeRenderer::new(&Surface::new(100.0, 100.0));
        assert!(renderer.bounds().is_none());
        renderer.render(&interpret("F", &params, 30.0));
        let bounds = renderer.bounds().unwrap();
        assert_eq!(shapes.len(), 1);
        assert!((bounds.width() - 1.0).abs() < 1e-9);
        assert!((bounds.height() - 30.0).abs() < 1e-9);
    }
}
