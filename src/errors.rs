//! Error types for scorepack operations.
//!
//! Library code returns these typed errors. The binary and the command
//! handlers wrap them in `anyhow::Error` at the edges, adding context about
//! which file or argument was involved.

use crate::codec::{PackedValue, Score};
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the score codec.
///
/// The default (non-strict) codec only fails on an unusable bit width, an
/// unbounded field count, or when the packed value would not fit in a
/// [`PackedValue`]. The range
/// variants are produced only in strict mode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Bit width outside `1..=max`.
    #[error("bits per score must be between 1 and {max}, got {bits_per_score}")]
    InvalidBitWidth { bits_per_score: u32, max: u32 },

    /// Strict encode: a score does not fit in its field.
    #[error(
        "score {score} at position {index} does not fit in {bits_per_score} bits (allowed range 0..={max})"
    )]
    ScoreOutOfRange {
        index: usize,
        score: Score,
        bits_per_score: u32,
        max: Score,
    },

    /// Strict decode: the value carries more bits than the requested fields.
    #[error("value {value} does not fit in {total_scores} fields of {bits_per_score} bits")]
    FieldOverflow {
        value: PackedValue,
        total_scores: usize,
        bits_per_score: u32,
    },

    /// Decode was asked to pad to more digits than it will allocate.
    #[error(
        "{total_scores} fields of {bits_per_score} bits exceed the limit of {max_digits} binary digits"
    )]
    FieldCountTooLarge {
        total_scores: usize,
        bits_per_score: u32,
        max_digits: u64,
    },

    /// The concatenated fields need more significant bits than a packed value holds.
    #[error(
        "packed value needs {required_bits} significant bits but only {capacity_bits} are available"
    )]
    CapacityExceeded { required_bits: u64, capacity_bits: u32 },
}

impl CodecError {
    /// Whether this error is a strict-mode range rejection.
    ///
    /// These inputs would have been accepted, with silently shifted field
    /// boundaries, had strict mode been off.
    pub fn is_strict_rejection(&self) -> bool {
        matches!(self, Self::ScoreOutOfRange { .. } | Self::FieldOverflow { .. })
    }
}

/// Errors raised while loading `.scorepack.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration value for {field}: {message}")]
    Invalid { field: String, message: String },
}

impl ConfigError {
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            message: message.into(),
        }
    }
}
