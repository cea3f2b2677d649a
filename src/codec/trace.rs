//! Human-readable traces of encode and decode results.
//!
//! Computation lives in the parent module; a trace only captures an already
//! computed result and renders it, either as the bare result or as the
//! three-line breakdown showing every field in decimal and binary.

use super::{checked_total_digits, PackedValue, Score};
use crate::errors::CodecError;
use serde::{Serialize, Serializer};

const FIELD_SEPARATOR: &str = " | ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraceMode {
    /// Only the result.
    #[default]
    Short,
    /// Three numbered lines with per-field decimal and binary notations.
    Verbose,
}

impl TraceMode {
    pub fn from_verbose(verbose: bool) -> Self {
        if verbose {
            Self::Verbose
        } else {
            Self::Short
        }
    }
}

/// A packed score vector together with its binary breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodeTrace {
    pub scores: Vec<Score>,
    #[serde(serialize_with = "as_decimal_string")]
    pub value: PackedValue,
    pub bits_per_score: u32,
    pub total_scores: usize,
    /// Every score zero-padded to the field width, never truncated.
    pub fields: Vec<String>,
    /// Concatenation of `fields`.
    pub binary: String,
}

impl EncodeTrace {
    pub fn new(scores: &[Score], bits_per_score: u32, value: PackedValue) -> Self {
        let fields: Vec<String> = scores
            .iter()
            .map(|score| zero_padded(*score, bits_per_score as usize))
            .collect();
        let binary = fields.concat();

        Self {
            scores: scores.to_vec(),
            value,
            bits_per_score,
            total_scores: scores.len(),
            fields,
            binary,
        }
    }

    pub fn render(&self, mode: TraceMode) -> String {
        match mode {
            TraceMode::Short => self.value.to_string(),
            TraceMode::Verbose => [
                format!(
                    "1. Decimal notations: {}",
                    space_padded(&self.scores, self.bits_per_score)
                ),
                format!(
                    "2. Binary notations:  {} => {}",
                    self.fields.join(FIELD_SEPARATOR),
                    self.binary
                ),
                format!("3. Decimal notation:  {} = {}", self.value, self.binary),
            ]
            .join("\n"),
        }
    }
}

/// A decoded packed value together with its binary breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodeTrace {
    pub scores: Vec<Score>,
    #[serde(serialize_with = "as_decimal_string")]
    pub value: PackedValue,
    pub bits_per_score: u32,
    pub total_scores: usize,
    /// `binary` split into `bits_per_score`-wide chunks; the last may be shorter.
    pub fields: Vec<String>,
    /// The value in base 2, zero-padded to `total_scores * bits_per_score` digits.
    pub binary: String,
}

impl DecodeTrace {
    /// Fails like decode does when the padded width is out of bounds.
    pub fn new(
        value: PackedValue,
        total_scores: usize,
        bits_per_score: u32,
        scores: &[Score],
    ) -> Result<Self, CodecError> {
        let total_digits = checked_total_digits(total_scores, bits_per_score)? as usize;
        let binary = format!("{value:0total_digits$b}");
        let fields = binary
            .as_bytes()
            .chunks(bits_per_score.max(1) as usize)
            .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
            .collect();

        Ok(Self {
            scores: scores.to_vec(),
            value,
            bits_per_score,
            total_scores,
            fields,
            binary,
        })
    }

    pub fn render(&self, mode: TraceMode) -> String {
        match mode {
            TraceMode::Short => join_scores(&self.scores),
            TraceMode::Verbose => [
                format!("1. Binary number:      {}", self.binary),
                format!("2. Binary notations:   {}", self.fields.join(FIELD_SEPARATOR)),
                format!(
                    "3. Decimal notations:  {}",
                    space_padded(&self.scores, self.bits_per_score)
                ),
            ]
            .join("\n"),
        }
    }
}

/// Comma-separated scores, the form the pack command accepts back.
pub fn join_scores(scores: &[Score]) -> String {
    scores
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

fn zero_padded(score: Score, width: usize) -> String {
    format!("{score:0width$b}")
}

fn space_padded(scores: &[Score], bits_per_score: u32) -> String {
    let width = bits_per_score as usize;
    scores
        .iter()
        .map(|score| format!("{score:>width$}"))
        .collect::<Vec<_>>()
        .join(FIELD_SEPARATOR)
}

fn as_decimal_string<S: Serializer>(value: &PackedValue, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}
