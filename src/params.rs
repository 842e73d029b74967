//! Everything the turtle needs to know about how a plant should look.
use std::path::Path;

pub use csscolorparser::Color as CssColor;
use serde::{Deserialize, Serialize};

use crate::config;
use crate::errors::{PlantError, Result};

/// Smallest value a "positive" parameter gets clamped up to.
pub const MIN_POSITIVE: f64 = 1e-6;
pub const MAX_ITERATIONS: u32 = 5;
pub const MAX_BRANCH_ANGLE: f64 = 90.0;

/// Parse any CSS color string ("#1c852b", "brown", "rgb(...)").
pub fn parse_color(color: &str) -> Result<CssColor> {
    csscolorparser::parse(color).map_err(|e| PlantError::InvalidColor(format!("{color}: {e}")))
}

/// Lowercase `#rrggbb`, dropping alpha. Alpha travels separately in
/// [`crate::turtle::DrawCommand::DrawLeaf`].
pub fn hex_color(color: &CssColor) -> String {
    let [r, g, b, _a] = color.to_rgba8();
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ExpansionParameters {
    pub iterations: u32,
    pub branch_length: f64,
    pub branch_width: f64,
    /// Degrees.
    pub branch_angle: f64,
    pub branch_color: CssColor,
    /// Multiplied into the branch length once per generation.
    pub branch_length_falloff: f64,
    pub leaf_length: f64,
    pub leaf_width: f64,
    pub leaf_color: CssColor,
    /// Leaf opacity, 0..1.
    pub leaf_alpha: f64,
}

impl Default for ExpansionParameters {
    fn default() -> Self {
        Self {
            iterations: 3,
            branch_length: 30.0,
            branch_width: 1.0,
            branch_angle: 22.5,
            branch_color: CssColor::from_rgba8(0x85, 0x52, 0x1c, 255),
            branch_length_falloff: 0.75,
            leaf_length: 2.0,
            leaf_width: 2.0,
            leaf_color: CssColor::from_rgba8(0x1c, 0x85, 0x2b, 255),
            leaf_alpha: 0.75,
        }
    }
}

fn positive(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PlantError::InvalidParameter {
            name,
            value,
            reason: "must be a positive number",
        })
    }
}

fn in_half_open(name: &'static str, value: f64, max: f64, reason: &'static str) -> Result<()> {
    if value > 0.0 && value <= max {
        Ok(())
    } else {
        Err(PlantError::InvalidParameter {
            name,
            value,
            reason,
        })
    }
}

/// Clamp into `[MIN_POSITIVE, max]`, NaN falls back to `fallback`.
fn clamp_positive(value: f64, max: f64, fallback: f64) -> f64 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(MIN_POSITIVE, max)
    }
}

impl ExpansionParameters {
    /// Reject anything outside the documented domains.
    pub fn validate(&self) -> Result<()> {
        if self.iterations > MAX_ITERATIONS {
            return Err(PlantError::InvalidParameter {
                name: "iterations",
                value: f64::from(self.iterations),
                reason: "must be between 0 and 5",
            });
        }
        positive("branch_length", self.branch_length)?;
        positive("branch_width", self.branch_width)?;
        positive("leaf_length", self.leaf_length)?;
        positive("leaf_width", self.leaf_width)?;
        in_half_open(
            "branch_angle",
            self.branch_angle,
            MAX_BRANCH_ANGLE,
            "must be in (0, 90] degrees",
        )?;
        in_half_open("leaf_alpha", self.leaf_alpha, 1.0, "must be in (0, 1]")?;
        in_half_open(
            "branch_length_falloff",
            self.branch_length_falloff,
            1.0,
            "must be in (0, 1]",
        )?;
        Ok(())
    }

    /// A copy with every value forced into its domain.
    pub fn clamped(&self) -> ExpansionParameters {
        let defaults = ExpansionParameters::default();
        ExpansionParameters {
            iterations: self.iterations.min(MAX_ITERATIONS),
            branch_length: clamp_positive(self.branch_length, f64::MAX, defaults.branch_length),
            branch_width: clamp_positive(self.branch_width, f64::MAX, defaults.branch_width),
            branch_angle: clamp_positive(self.branch_angle, MAX_BRANCH_ANGLE, defaults.branch_angle),
            branch_color: self.branch_color.clone(),
            branch_length_falloff: clamp_positive(
                self.branch_length_falloff,
                1.0,
                defaults.branch_length_falloff,
            ),
            leaf_length: clamp_positive(self.leaf_length, f64::MAX, defaults.leaf_length),
            leaf_width: clamp_positive(self.leaf_width, f64::MAX, defaults.leaf_width),
            leaf_color: self.leaf_color.clone(),
            leaf_alpha: clamp_positive(self.leaf_alpha, 1.0, defaults.leaf_alpha),
        }
    }

    pub fn branch_color(mut self, color: &str) -> Result<Self> {
        self.branch_color = parse_color(color)?;
        Ok(self)
    }

    pub fn leaf_color(mut self, color: &str) -> Result<Self> {
        self.leaf_color = parse_color(color)?;
        Ok(self)
    }

    pub fn to_ron_string(&self) -> Result<String> {
        config::to_ron_string(self)
    }

    pub fn from_ron_str(data: &str) -> Result<ExpansionParameters> {
        config::from_ron_str(data)
    }

    pub fn to_file(&self, path: &Path) -> Result<()> {
        config::to_file(self, path)
    }

    pub fn from_file(path: &Path) -> Result<ExpansionParameters> {
        config::from_file(path)
    }
}
