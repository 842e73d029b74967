use thiserror::Error;

/// Everything that can go wrong while growing or drawing a plant.
#[derive(Error, Debug)]
pub enum PlantError {
    /// A `]` showed up with nothing on the turtle stack to pop.
    #[error("Unbalanced bracket: ']' at symbol {position} has no matching '['")]
    UnbalancedBracket { position: usize },

    #[error("Expansion too large: generation {generation} reached {symbols} symbols (limit {limit})")]
    ExpansionTooLarge {
        generation: u32,
        symbols: usize,
        limit: usize,
    },

    #[error("Expansion too large: {requested} generations requested (limit {limit})")]
    TooManyGenerations { requested: u32, limit: u32 },

    #[error("Invalid parameter {name}={value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("RON parse error: {0}")]
    RonParse(#[from] ron::error::SpannedError),

    #[error("RON write error: {0}")]
    RonWrite(#[from] ron::Error),
}

pub type Result<T> = std::result::Result<T, PlantError>;
