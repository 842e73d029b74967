//! ArmyOfEvilRobots plant growing tools
//!
//! Grows plant-like fractals from L-system grammars and turns them into
//! something you can actually look at. The pipeline is three small steps:
//!
//! 1. [`l_system`] rewrites an axiom through a handful of generations.
//! 2. [`turtle`] walks the resulting sentence and emits [`turtle::DrawCommand`]s.
//! 3. [`render`] replays those commands into filled polygons, and from there into SVG.
//!
//! [`plant::Plant`] glues the three together.
//!
//! ```rust
//! use aoer_plants::prelude::*;
//!
//! let plant = Plant::from_preset(0, ExpansionParameters::default()).unwrap();
//! let svg = plant.to_svg(&Surface::default()).unwrap();
//! assert!(svg.to_string().contains("<path"));
//! ```

/// Error types
pub mod errors;

/// RON config file helpers
pub mod config;

/// Matrix and shape helpers on top of geo_types.
pub mod geo_types;

/// L-system implementation, with expansion and the preset catalog
pub mod l_system;

/// Visual parameters: lengths, widths, angles, colors and falloff
pub mod params;

/// Turtle graphics implementation, turning sentences into draw commands
pub mod turtle;

/// Replays draw commands into polygons and SVG
pub mod render;

/// The whole pipeline in one struct
pub mod plant;

/// Make your life easy! Just import prelude::* and go.
pub mod prelude {
    pub use crate::errors::{PlantError, Result};
    pub use crate::l_system::presets::{preset, preset_named, presets, Preset};
    pub use crate::l_system::{expand, expand_bounded, ExpansionLimits, Growth, Rule, RuleSet};
    pub use crate::params::{CssColor, ExpansionParameters};
    pub use crate::plant::Plant;
    pub use crate::render::{paint, PaintedShape, Renderer, ShapeRenderer, Surface};
    pub use crate::turtle::{degrees, interpret, interpret_strict, DrawCommand, Turtle, TurtleState};
}
