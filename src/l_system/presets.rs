//! The fixed catalog of plant grammars, plus RON load/save for rule sets.
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{Rule, RuleSet};
use crate::config;
use crate::errors::{PlantError, Result};

/// Index of the preset picked when nobody asks for one.
pub const DEFAULT_PRESET: usize = 2;

pub const PRESET_NAMES: [&str; 4] = ["bush", "weed", "thicket", "fern"];

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Preset {
    pub name: String,
    pub rules: RuleSet,
}

fn rule_set(index: usize) -> Option<RuleSet> {
    let rules = match index {
        0 => RuleSet::new(
            "X",
            vec![
                Rule::new('F', "FF"),
                Rule::new('X', "F+[-F-XF-X][+FF][--XF[+X]][++F-X]"),
            ],
        ),
        1 => RuleSet::new("FX", vec![Rule::new('F', "FF+[+F-F-F]-[-F+F+F]")]),
        2 => RuleSet::new(
            "X",
            vec![
                Rule::new('F', "FX[FX[+XF]]"),
                Rule::new('X', "FF[+XZ++X-F[+ZX]][-X++F-X]"),
                Rule::new('Z', "[+F-X-F][++ZX]"),
            ],
        ),
        // The " > " is part of the successor. The expander passes it through and
        // the turtle ignores it.
        3 => RuleSet::new("F", vec![Rule::new('F', "F > F[+F]F[-F]F")]),
        _ => return None,
    };
    Some(rules)
}

/// Preset by catalog position.
pub fn preset(index: usize) -> Result<Preset> {
    match (PRESET_NAMES.get(index), rule_set(index)) {
        (Some(name), Some(rules)) => Ok(Preset {
            name: name.to_string(),
            rules,
        }),
        _ => Err(PlantError::UnknownPreset(index.to_string())),
    }
}

/// Preset by name, case-insensitive.
pub fn preset_named(name: &str) -> Result<Preset> {
    PRESET_NAMES
        .iter()
        .position(|candidate| candidate.eq_ignore_ascii_case(name))
        .ok_or_else(|| PlantError::UnknownPreset(name.to_string()))
        .and_then(preset)
}

/// The whole catalog, in order.
pub fn presets() -> Vec<Preset> {
    (0..PRESET_NAMES.len()).filter_map(|i| preset(i).ok()).collect()
}

impl RuleSet {
    pub fn to_ron_string(&self) -> Result<String> {
        config::to_ron_string(self)
    }

    pub fn from_ron_str(data: &str) -> Result<RuleSet> {
        config::from_ron_str(data)
    }

    pub fn to_file(&self, path: &Path) -> Result<()> {
        config::to_file(self, path)
    }

    pub fn from_file(path: &Path) -> Result<RuleSet> {
        config::from_file(path)
    }
}
