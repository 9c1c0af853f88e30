//! Error types for the liftplan_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for liftplan_core operations
///
/// Line-level and section-level parse misses never surface here; they are
/// recorded in the [`crate::ParseReport`] instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The caller handed us something no cycle can be built from
    /// (empty plan text, non-positive cycle number, zero-week cycle)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Parsing finished but not a single workout had a usable exercise
    #[error("No workouts could be parsed from the plan")]
    NoWorkouts,

    /// Exercise library lookup/insert failure
    #[error("Exercise library error: {0}")]
    Library(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
