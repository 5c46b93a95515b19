//! Error types surfaced by configuration loading and boss sequencing.

use std::path::PathBuf;

use thiserror::Error;

/// Failures raised while loading or validating a boss configuration.
///
/// Components that receive one of these log it and disable themselves; the
/// simulation keeps running.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read boss configuration {path}: {source}")]
    Io {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The configuration is not valid JSON or does not match the schema.
    #[error("invalid boss configuration: {0}")]
    Parse(#[from] serde_json::Error),
    /// No attacks were listed.
    #[error("boss configuration lists no attacks")]
    NoAttacks,
    /// An attack parameter is outside its valid range.
    #[error("attack `{attack}`: {field} must be {requirement}, got {value}")]
    InvalidParameter {
        /// Name of the offending attack.
        attack: String,
        /// Parameter name.
        field: &'static str,
        /// Human readable constraint.
        requirement: &'static str,
        /// Value that was supplied.
        value: f32,
    },
    /// A pattern selector refers to an attack that does not exist.
    #[error("pattern selector references attack {index} but only {count} attacks exist")]
    PatternOutOfRange {
        /// Index found in the pattern table.
        index: usize,
        /// Number of configured attacks.
        count: usize,
    },
    /// A pattern selector has an empty table.
    #[error("pattern selector order must not be empty")]
    EmptyPattern,
    /// Phase thresholds are not descending fractions in `(0, 1)`.
    #[error("phase thresholds must be descending fractions in (0, 1), got {0:?}")]
    PhaseThresholds(Vec<f32>),
    /// Dizzy window parameters are negative or not finite.
    #[error("dizzy {field} must be a finite non-negative number, got {value}")]
    Dizzy {
        /// Parameter name.
        field: &'static str,
        /// Value that was supplied.
        value: f32,
    },
    /// The sequencer rejected the assembled attacks.
    #[error(transparent)]
    Sequencer(#[from] SequencerError),
}

/// Failures raised by [`crate::boss::BossSequencer`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SequencerError {
    /// An attack was about to execute without having been initialised.
    #[error("attack `{attack}` executed before initialise()")]
    NotInitialised {
        /// Name of the offending attack.
        attack: String,
    },
    /// A sequencer was built without any attacks.
    #[error("boss sequencer needs at least one attack")]
    NoAttacks,
    /// The selector picked an index outside the registered attacks.
    #[error("selector chose attack {index} but only {count} are registered")]
    SelectionOutOfRange {
        /// Index returned by the selector.
        index: usize,
        /// Number of registered attacks.
        count: usize,
    },
}
