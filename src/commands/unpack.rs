use crate::codec::{self, CodecOptions, DecodeTrace, PackedValue, Score, TraceMode};
use crate::formatting::FormattingConfig;
use crate::io::{create_writer, OutputFormat};
use anyhow::{Context, Result};
use std::io::Write;
use tracing::{info, info_span, warn};

use super::warn_on_strict_rejection;

#[derive(Debug, Clone)]
pub struct UnpackConfig {
    pub value: PackedValue,
    pub options: CodecOptions,
    pub explain: bool,
    pub format: OutputFormat,
    pub formatting: FormattingConfig,
}

/// Unpack the configured value and write the report to `out`.
pub fn handle_unpack(config: &UnpackConfig, out: &mut dyn Write) -> Result<Vec<Score>> {
    let _span = info_span!("unpack", total_scores = config.options.total_scores).entered();
    let options = &config.options;

    let context = || {
        format!(
            "Failed to unpack {} into {} fields of {} bits",
            config.value, options.total_scores, options.bits_per_score
        )
    };

    let scores = codec::decode_with(config.value, options)
        .inspect_err(warn_on_strict_rejection)
        .with_context(context)?;

    // Zero still decodes to the single digit "0" when no fields are requested.
    if config.value != 0 && scores.len() > options.total_scores {
        warn!(
            "{} has more bits than {} fields of {} bits; decoded {} fields",
            config.value,
            options.total_scores,
            options.bits_per_score,
            scores.len()
        );
    }
    info!(value = config.value, fields = scores.len(), "unpacked value");

    let trace = DecodeTrace::new(
        config.value,
        options.total_scores,
        options.bits_per_score,
        &scores,
    )
    .with_context(context)?;
    let mut writer = create_writer(config.format, out, config.formatting);
    writer.write_unpack(&trace, TraceMode::from_verbose(config.explain))?;

    Ok(scores)
}
