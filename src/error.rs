//! Error types shared across the crate.

/// Errors produced while validating inputs, building tables or loading settings.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid depth {depth}: depth must be non-negative")]
    InvalidDepth { depth: i64 },

    #[error("Depth {depth} exceeds the configured limit of {max}")]
    DepthExceedsLimit { depth: i64, max: usize },

    #[error("Invalid fraction {value}: expected a finite value in [0, 1)")]
    InvalidFraction { value: f64 },

    #[error("Invalid binary literal: {0}")]
    InvalidBinaryLiteral(String),

    #[error("Invalid quadrant table: {0}")]
    InvalidTable(String),

    #[error("Cell ({x}, {y}) lies outside a {side}x{side} grid")]
    CellOutOfRange { x: u64, y: u64, side: u64 },

    #[error("Highlight level {level} is outside 1..={depth}")]
    InvalidHighlight { level: usize, depth: usize },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML syntax: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
