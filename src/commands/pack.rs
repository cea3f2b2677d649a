use crate::codec::{
    self, trace::join_scores, CodecOptions, EncodeTrace, PackedValue, Score, TraceMode,
};
use crate::formatting::FormattingConfig;
use crate::io::{create_writer, OutputFormat};
use anyhow::{Context, Result};
use std::io::Write;
use tracing::{info, info_span};

use super::warn_on_strict_rejection;

#[derive(Debug, Clone)]
pub struct PackConfig {
    pub scores: Vec<Score>,
    pub options: CodecOptions,
    pub explain: bool,
    pub format: OutputFormat,
    pub formatting: FormattingConfig,
}

/// Pack the configured scores and write the report to `out`.
pub fn handle_pack(config: &PackConfig, out: &mut dyn Write) -> Result<PackedValue> {
    let _span = info_span!("pack", fields = config.scores.len()).entered();

    let value = codec::encode_with(&config.scores, &config.options)
        .inspect_err(warn_on_strict_rejection)
        .with_context(|| format!("Failed to pack scores {}", join_scores(&config.scores)))?;

    info!(
        value,
        bits = config.options.bits_per_score,
        required_bits = codec::required_bits(&config.scores, config.options.bits_per_score),
        "packed scores"
    );

    let trace = EncodeTrace::new(&config.scores, config.options.bits_per_score, value);
    let mut writer = create_writer(config.format, out, config.formatting);
    writer.write_pack(&trace, TraceMode::from_verbose(config.explain))?;

    Ok(value)
}
