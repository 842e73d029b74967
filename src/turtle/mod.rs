use log::warn;
use nalgebra::Affine2;
use serde::{Deserialize, Serialize};

use crate::errors::{PlantError, Result};
use crate::geo_types::matrix::{rotate_matrix, translate_matrix, unit_matrix};
use crate::params::{CssColor, ExpansionParameters};

/// Helper function to convert degrees to radians
pub fn degrees(deg: f64) -> f64 {
    std::f64::consts::PI * (deg / 180.0)
}

/// One drawing primitive. The renderer replays these in order, relative to
/// whatever transform it has accumulated so far.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Fill a `width` x `length` rectangle from the current origin towards
    /// negative y, then move the origin to its far end.
    DrawBranch {
        width: f64,
        length: f64,
        color: CssColor,
    },
    /// Radians. Positive turns clockwise on a y-down surface.
    Rotate(f64),
    PushState,
    PopState,
    /// Fill the leaf kite scaled by (`width`, `length`) at the current origin.
    DrawLeaf {
        width: f64,
        length: f64,
        color: CssColor,
        alpha: f64,
    },
}

/// Where the turtle is, which way it faces, and how long its next branch is.
#[derive(Clone, Debug, PartialEq)]
pub struct TurtleState {
    pub transform: Affine2<f64>,
    pub branch_length: f64,
}

impl TurtleState {
    pub fn new(branch_length: f64) -> TurtleState {
        TurtleState {
            transform: unit_matrix(),
            branch_length,
        }
    }
}

/// # Turtle
///
/// Walks an expanded L-system sentence and records the [`DrawCommand`]s it
/// implies. Only `F`, `+`, `-`, `[` and `]` mean anything; every other symbol
/// is grammar scaffolding and is skipped without a trace.
///
/// # Example
///
/// ```
/// use aoer_plants::params::ExpansionParameters;
/// use aoer_plants::turtle::{DrawCommand, Turtle};
///
/// let params = ExpansionParameters::default();
/// let turtle = Turtle::new(&params, 10.0).walk_lpath("[+F]");
/// assert_eq!(turtle.commands().len(), 5);
/// assert_eq!(turtle.commands()[0], DrawCommand::PushState);
/// assert_eq!(turtle.depth(), 0);
/// ```
#[derive(Clone, Debug)]
pub struct Turtle {
    params: ExpansionParameters,
    state: TurtleState,
    stack: Vec<TurtleState>,
    commands: Vec<DrawCommand>,
    unbalanced: Vec<usize>,
    cursor: usize,
}

impl Turtle {
    /// Parameters are clamped into their valid domains on the way in, so the
    /// turtle never draws with a negative length or a NaN angle.
    pub fn new(params: &ExpansionParameters, branch_length: f64) -> Turtle {
        let params = params.clamped();
        let branch_length = if branch_length.is_finite() && branch_length > 0.0 {
            branch_length
        } else {
            params.branch_length
        };
        Turtle {
            params,
            state: TurtleState::new(branch_length),
            stack: vec![],
            commands: vec![],
            unbalanced: vec![],
            cursor: 0,
        }
    }

    pub fn fwd(mut self) -> Self {
        let length = self.state.branch_length;
        self.commands.push(DrawCommand::DrawBranch {
            width: self.params.branch_width,
            length,
            color: self.params.branch_color.clone(),
        });
        self.state.transform = self.state.transform * translate_matrix(0.0, -length);
        self
    }

    /// Turn by `+angle`.
    pub fn right(mut self, angle: f64) -> Self {
        self.state.transform = self.state.transform * rotate_matrix(angle);
        self.commands.push(DrawCommand::Rotate(angle));
        self
    }

    /// Turn by `-angle`.
    pub fn left(self, angle: f64) -> Self {
        self.right(-angle)
    }

    pub fn push(mut self) -> Self {
        self.stack.push(self.state.clone());
        self.commands.push(DrawCommand::PushState);
        self
    }

    /// Restore the last pushed state. Popping an empty stack is recorded as
    /// an unbalanced bracket and otherwise ignored; no `PopState` is emitted.
    pub fn pop(mut self) -> Self {
        match self.stack.pop() {
            Some(state) => {
                self.state = state;
                self.commands.push(DrawCommand::PopState);
            }
            None => {
                warn!(
                    "Unbalanced ']' at symbol {}, turtle stack is empty",
                    self.cursor
                );
                self.unbalanced.push(self.cursor);
            }
        }
        self
    }

    pub fn leaf(mut self) -> Self {
        self.commands.push(DrawCommand::DrawLeaf {
            width: self.params.leaf_width,
            length: self.params.leaf_length,
            color: self.params.leaf_color.clone(),
            alpha: self.params.leaf_alpha,
        });
        self
    }

    pub fn walk_lpath(mut self, lpath: &str) -> Self {
        let angle = degrees(self.params.branch_angle);
        for (i, c) in lpath.chars().enumerate() {
            self.cursor = i;
            self = match c {
                'F' => self.fwd(),
                '+' => self.right(angle),
                '-' => self.left(angle),
                '[' => self.push(),
                ']' => self.leaf().pop(),
                _ => self,
            }
        }
        self
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    /// Current absolute transform and branch length.
    pub fn state(&self) -> &TurtleState {
        &self.state
    }

    /// How many states are pushed right now.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Symbol positions of every `]` that had nothing to pop.
    pub fn unbalanced_brackets(&self) -> &[usize] {
        &self.unbalanced
    }
}

/// Turn a sentence into draw commands. Malformed brackets are logged and
/// skipped, never fatal.
pub fn interpret(
    symbols: &str,
    params: &ExpansionParameters,
    branch_length: f64,
) -> Vec<DrawCommand> {
    Turtle::new(params, branch_length)
        .walk_lpath(symbols)
        .into_commands()
}

/// Like [`interpret`], but a `]` with an empty stack is an error.
pub fn interpret_strict(
    symbols: &str,
    params: &ExpansionParameters,
    branch_length: f64,
) -> Result<Vec<DrawCommand>> {
    let turtle = Turtle::new(params, branch_length).walk_lpath(symbols);
    if let Some(&position) = turtle.unbalanced_brackets().first() {
        return Err(PlantError::UnbalancedBracket { position });
    }
    Ok(turtle.into_commands())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo_types::matrix::origin_of;
    use crate::l_system::{ExpansionLimits, Rule, RuleSet};
    use crate::params::parse_color;

    fn near(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_leaf_on_empty_stack() {
        let params = ExpansionParameters {
            leaf_width: 2.0,
            leaf_length: 3.0,
            leaf_alpha: 0.75,
            ..Default::default()
        }
        .leaf_color("#1c852b")
        .unwrap();
        let turtle = Turtle::new(&params, 30.0).walk_lpath("F]");
        assert_eq!(
            turtle.commands(),
            &[
                DrawCommand::DrawBranch {
                    width: 1.0,
                    length: 30.0,
                    color: params.branch_color.clone(),
                },
                DrawCommand::DrawLeaf {
                    width: 2.0,
                    length: 3.0,
                    color: parse_color("#1c852b").unwrap(),
                    alpha: 0.75,
                },
            ]
        );
        assert_eq!(turtle.unbalanced_brackets(), &[1]);
    }

    #[test]
    fn test_balanced_leaf() {
        let params = ExpansionParameters::default();
        let commands = interpret("[F]", &params, 10.0);
        assert_eq!(commands.len(), 4);
        assert_eq!(commands[0], DrawCommand::PushState);
        assert!(matches!(commands[1], DrawCommand::DrawBranch { .. }));
        assert!(matches!(commands[2], DrawCommand::DrawLeaf { .. }));
        assert_eq!(commands[3], DrawCommand::PopState);
    }

    #[test]
    fn test_rotation() {
        let params = ExpansionParameters::default();
        let commands = interpret("+-", &params, 10.0);
        assert_eq!(
            commands,
            vec![
                DrawCommand::Rotate(degrees(22.5)),
                DrawCommand::Rotate(-degrees(22.5)),
            ]
        );
    }

    #[test]
    fn test_placeholders_are_silent() {
        let params = ExpansionParameters::default();
        let turtle = Turtle::new(&params, 10.0).walk_lpath("XZ > A");
        assert!(turtle.commands().is_empty());
        assert_eq!(turtle.state(), &TurtleState::new(10.0));
    }

    #[test]
    fn test_stack_discipline() {
        let params = ExpansionParameters::default();
        for sentence in ["]]F[", "[[F]]]", "F]+[F]-]", "[F[+F]F[-F]F]", ""] {
            let mut pushes = 0;
            let mut pops = 0;
            for command in interpret(sentence, &params, 5.0) {
                match command {
                    DrawCommand::PushState => pushes += 1,
                    DrawCommand::PopState => pops += 1,
                    _ => {}
                }
                assert!(pops <= pushes, "{} underflowed", sentence);
            }
        }
    }

    #[test]
    fn test_strict() {
        let params = ExpansionParameters::default();
        assert!(interpret_strict("[F]F", &params, 5.0).is_ok());
        match interpret_strict("F[]]", &params, 5.0) {
            Err(PlantError::UnbalancedBracket { position }) => assert_eq!(position, 3),
            other => panic!("Expected UnbalancedBracket, got {:?}", other),
        }
    }

    #[test]
    fn test_uniform_falloff() {
        let system = RuleSet::new("F", vec![Rule::new('F', "F[+F]F[-F]F")]);
        let params = ExpansionParameters::default();
        let growth = system
            .grow(2, 30.0, 0.75, &ExpansionLimits::default())
            .unwrap();
        let lengths: Vec<f64> = interpret(&growth.sentence, &params, growth.branch_length)
            .into_iter()
            .filter_map(|c| match c {
                DrawCommand::DrawBranch { length, .. } => Some(length),
                _ => None,
            })
            .collect();
        assert_eq!(lengths.len(), 25);
        assert!(lengths.iter().all(|l| near(*l, 16.875)));
    }

    #[test]
    fn test_state_tracking() {
        let params = ExpansionParameters {
            branch_angle: 90.0,
            ..Default::default()
        };
        let t = Turtle::new(&params, 10.0).fwd();
        let origin = origin_of(&t.state().transform);
        assert!(near(origin.x, 0.0) && near(origin.y, -10.0));

        // Turn right then walk: on a y-down surface that heads towards +x.
        let t = t.walk_lpath("+F");
        let origin = origin_of(&t.state().transform);
        assert!(near(origin.x, 10.0) && near(origin.y, -10.0));
    }

    #[test]
    fn test_stack() {
        let params = ExpansionParameters::default();
        let result = Turtle::new(&params, 10.0)
            .push()
            .fwd()
            .right(degrees(90.0))
            .fwd()
            .pop();
        assert_eq!(result.state(), &TurtleState::new(10.0));
        assert_eq!(result.depth(), 0);
    }

    #[test]
    fn test_bad_length_falls_back() {
        let params = ExpansionParameters::default();
        let t = Turtle::new(&params, f64::NAN);
        assert_eq!(t.state().branch_length, 30.0);
    }
}
