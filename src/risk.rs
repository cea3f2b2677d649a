//! Named risk dimensions for the default seven-field layout.
//!
//! Risk reports pack one score per dimension, always in the order of
//! [`RiskDimension::ALL`]. That order is why the codec decodes seven fields
//! unless told otherwise.

use crate::codec::{PackedValue, Score};
use comfy_table::{presets, Cell, CellAlignment, Table};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskDimension {
    Audit,
    CodeReview,
    Complexity,
    Longevity,
    ProtocolSafety,
    TeamKnowledge,
    Testing,
}

impl RiskDimension {
    /// All dimensions in packed field order.
    pub const ALL: [RiskDimension; 7] = [
        Self::Audit,
        Self::CodeReview,
        Self::Complexity,
        Self::Longevity,
        Self::ProtocolSafety,
        Self::TeamKnowledge,
        Self::Testing,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Audit => "Audit",
            Self::CodeReview => "Code Review",
            Self::Complexity => "Complexity",
            Self::Longevity => "Longevity",
            Self::ProtocolSafety => "Protocol Safety",
            Self::TeamKnowledge => "Team Knowledge",
            Self::Testing => "Testing",
        }
    }
}

impl fmt::Display for RiskDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Decoded scores paired with the dimension each field stands for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskProfile {
    entries: Vec<(RiskDimension, Score)>,
}

impl RiskProfile {
    /// Pair scores with dimensions. `None` unless there is exactly one score
    /// per dimension.
    pub fn from_scores(scores: &[Score]) -> Option<Self> {
        if scores.len() != RiskDimension::ALL.len() {
            return None;
        }
        Some(Self {
            entries: RiskDimension::ALL
                .iter()
                .copied()
                .zip(scores.iter().copied())
                .collect(),
        })
    }

    pub fn entries(&self) -> &[(RiskDimension, Score)] {
        &self.entries
    }

    pub fn score(&self, dimension: RiskDimension) -> Score {
        self.entries
            .iter()
            .find(|(d, _)| *d == dimension)
            .map(|(_, score)| *score)
            .unwrap_or_default()
    }

    pub fn average(&self) -> f64 {
        let total: Score = self.entries.iter().map(|(_, score)| score).sum();
        total as f64 / self.entries.len() as f64
    }
}

/// Render decoded scores as a table, one row per field.
///
/// Fields are labeled with their risk dimension when the vector has the
/// seven-field layout, otherwise numbered.
pub fn render_score_table(
    scores: &[Score],
    bits_per_score: u32,
    packed: PackedValue,
    plain: bool,
) -> String {
    let profile = RiskProfile::from_scores(scores);
    let width = bits_per_score as usize;

    let mut table = Table::new();
    table
        .load_preset(if plain {
            presets::ASCII_FULL
        } else {
            presets::UTF8_FULL
        })
        .set_header(vec!["#", "Dimension", "Score", "Bits"]);

    for (index, score) in scores.iter().enumerate() {
        let label = match &profile {
            Some(profile) => profile.entries[index].0.label().to_string(),
            None => format!("Field {}", index + 1),
        };
        table.add_row(vec![
            Cell::new(index + 1).set_alignment(CellAlignment::Right),
            Cell::new(label),
            Cell::new(score).set_alignment(CellAlignment::Right),
            Cell::new(format!("{score:0width$b}")),
        ]);
    }

    let mut rendered = table.to_string();
    rendered.push_str(&format!("\nDecimal Risk Score: {packed}"));
    if let Some(profile) = profile {
        rendered.push_str(&format!("\nAverage Score: {:.2}", profile.average()));
    }
    rendered
}
