//! One-stop shopping: a rule set and a parameter snapshot in, draw commands,
//! shapes or an SVG out. Each call grows the plant from scratch, so a `Plant`
//! can be shared between threads without any locking.
use std::path::Path;

use log::info;

use crate::errors::Result;
use crate::l_system::presets::preset;
use crate::l_system::{ExpansionLimits, Growth, RuleSet};
use crate::params::ExpansionParameters;
use crate::render::{paint, svg, PaintedShape, Surface};
use crate::turtle::{interpret, interpret_strict, DrawCommand};

#[derive(Clone, Debug, PartialEq)]
pub struct Plant {
    pub rules: RuleSet,
    pub params: ExpansionParameters,
    pub limits: ExpansionLimits,
}

impl Plant {
    /// Rejects parameters outside their documented domains.
    pub fn new(rules: RuleSet, params: ExpansionParameters) -> Result<Plant> {
        params.validate()?;
        Ok(Plant {
            rules,
            params,
            limits: ExpansionLimits::default(),
        })
    }

    pub fn from_preset(index: usize, params: ExpansionParameters) -> Result<Plant> {
        Plant::new(preset(index)?.rules, params)
    }

    pub fn with_limits(mut self, limits: ExpansionLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Expand for `params.iterations` generations, shrinking the branch
    /// length by the falloff once per generation.
    pub fn grow(&self) -> Result<Growth> {
        self.rules.grow(
            self.params.iterations,
            self.params.branch_length,
            self.params.branch_length_falloff,
            &self.limits,
        )
    }

    pub fn commands(&self) -> Result<Vec<DrawCommand>> {
        let growth = self.grow()?;
        Ok(interpret(&growth.sentence, &self.params, growth.branch_length))
    }

    /// Same as [`Plant::commands`] but an unbalanced `]` is an error.
    pub fn commands_strict(&self) -> Result<Vec<DrawCommand>> {
        let growth = self.grow()?;
        interpret_strict(&growth.sentence, &self.params, growth.branch_length)
    }

    pub fn shapes(&self, surface: &Surface) -> Result<Vec<PaintedShape>> {
        Ok(paint(&self.commands()?, surface))
    }

    pub fn to_svg(&self, surface: &Surface) -> Result<::svg::Document> {
        Ok(svg::to_document(&self.shapes(surface)?, surface))
    }

    pub fn save_svg(&self, path: &Path, surface: &Surface) -> Result<()> {
        ::svg::save(path, &self.to_svg(surface)?)?;
        info!("Saved plant to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::errors::PlantError;
    use crate::l_system::Rule;
    use crate::render::ShapeKind;

    #[test]
    fn test_rejects_bad_params() {
        let params = ExpansionParameters {
            leaf_alpha: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            Plant::from_preset(0, params),
            Err(PlantError::InvalidParameter {
                name: "leaf_alpha",
                ..
            })
        ));
    }

    #[test]
    fn test_every_preset_grows() {
        for index in 0..4 {
            let plant = Plant::from_preset(index, ExpansionParameters::default()).unwrap();
            let commands = plant.commands().unwrap();
            assert!(!commands.is_empty());
            // The catalog grammars are all balanced.
            assert_eq!(plant.commands_strict().unwrap(), commands);
        }
    }

    #[test]
    fn test_falloff_reaches_turtle() {
        let params = ExpansionParameters {
            iterations: 2,
            ..Default::default()
        };
        let plant = Plant::new(
            RuleSet::new("F", vec![Rule::new('F', "F[+F]F[-F]F")]),
            params,
        )
        .unwrap();
        for command in plant.commands().unwrap() {
            if let DrawCommand::DrawBranch { length, .. } = command {
                assert!((length - 16.875).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_zero_iterations_draws_axiom() {
        let params = ExpansionParameters {
            iterations: 0,
            ..Default::default()
        };
        let plant = Plant::new(RuleSet::new("F", vec![Rule::new('F', "FF")]), params).unwrap();
        let growth = plant.grow().unwrap();
        assert_eq!(growth.sentence, "F");
        assert_eq!(growth.branch_length, 30.0);
        assert_eq!(
            plant.commands().unwrap(),
            vec![DrawCommand::DrawBranch {
                width: 1.0,
                length: 30.0,
                color: plant.params.branch_color.clone(),
            }]
        );
    }

    #[test]
    fn test_limits() {
        let plant = Plant::from_preset(0, ExpansionParameters::default())
            .unwrap()
            .with_limits(ExpansionLimits {
                max_generations: 5,
                max_symbols: 50,
            });
        assert!(matches!(
            plant.commands(),
            Err(PlantError::ExpansionTooLarge { .. })
        ));
    }

    #[test]
    fn test_shapes_and_svg() {
        let params = ExpansionParameters {
            iterations: 1,
            ..Default::default()
        };
        let plant = Plant::new(RuleSet::new("F", vec![Rule::new('F', "F[+F]")]), params).unwrap();
        let surface = Surface::new(300.0, 300.0);
        let shapes = plant.shapes(&surface).unwrap();
        let kinds: Vec<ShapeKind> = shapes.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![ShapeKind::Branch, ShapeKind::Branch, ShapeKind::Leaf]
        );
        let text = plant.to_svg(&surface).unwrap().to_string();
        assert_eq!(text.matches("<path").count(), 3);
    }

    #[test]
    fn test_save_svg() {
        let path = std::env::temp_dir().join(format!("aoer-plants-{}.svg", std::process::id()));
        let plant = Plant::from_preset(3, ExpansionParameters::default()).unwrap();
        plant.save_svg(&path, &Surface::default()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert!(text.contains("<svg"));
    }
}
