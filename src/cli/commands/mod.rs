//! Command handlers for CLI subcommands
//!
//! Each handler resolves the parsed arguments against the loaded
//! configuration into a command config, then delegates to `crate::commands`.

use crate::cli::args::Commands;
use crate::commands::{PackConfig, UnpackConfig};
use crate::config::ScorepackConfig;
use crate::formatting::FormattingConfig;
use anyhow::Result;

/// Build the pack config from the Pack command variant.
pub fn extract_pack_params(
    command: Commands,
    config: &ScorepackConfig,
    formatting: FormattingConfig,
) -> Result<PackConfig> {
    if let Commands::Pack {
        scores,
        bits_per_score,
        strict,
        explain,
        format,
    } = command
    {
        Ok(PackConfig {
            options: config.resolve_codec_options(bits_per_score, Some(scores.len()), strict),
            scores,
            explain,
            format: format.unwrap_or_else(|| config.default_format()),
            formatting,
        })
    } else {
        Err(anyhow::anyhow!("Invalid command: expected Pack variant"))
    }
}

/// Build the unpack config from the Unpack command variant.
pub fn extract_unpack_params(
    command: Commands,
    config: &ScorepackConfig,
    formatting: FormattingConfig,
) -> Result<UnpackConfig> {
    if let Commands::Unpack {
        number,
        total_scores,
        bits_per_score,
        strict,
        explain,
        format,
    } = command
    {
        Ok(UnpackConfig {
            value: number,
            options: config.resolve_codec_options(bits_per_score, total_scores, strict),
            explain,
            format: format.unwrap_or_else(|| config.default_format()),
            formatting,
        })
    } else {
        Err(anyhow::anyhow!("Invalid command: expected Unpack variant"))
    }
}

pub fn handle_pack_command(
    command: Commands,
    config: &ScorepackConfig,
    formatting: FormattingConfig,
) -> Result<()> {
    let pack_config = extract_pack_params(command, config, formatting)?;
    crate::commands::handle_pack(&pack_config, &mut std::io::stdout().lock())?;
    Ok(())
}

pub fn handle_unpack_command(
    command: Commands,
    config: &ScorepackConfig,
    formatting: FormattingConfig,
) -> Result<()> {
    let unpack_config = extract_unpack_params(command, config, formatting)?;
    crate::commands::handle_unpack(&unpack_config, &mut std::io::stdout().lock())?;
    Ok(())
}

pub fn handle_init_command(force: bool) -> Result<()> {
    let path = crate::commands::init::init_config(force)?;
    println!("Created {} configuration file", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CodecConfig, OutputConfig};
    use crate::io::OutputFormat;

    fn configured() -> ScorepackConfig {
        ScorepackConfig {
            codec: Some(CodecConfig {
                bits_per_score: Some(4),
                total_scores: Some(3),
                strict: Some(false),
            }),
            output: Some(OutputConfig {
                default_format: Some(OutputFormat::Json),
            }),
        }
    }

    #[test]
    fn test_extract_pack_params_uses_config_defaults() {
        let command = Commands::Pack {
            scores: vec![1, 2],
            bits_per_score: None,
            strict: false,
            explain: false,
            format: None,
        };
        let pack = extract_pack_params(command, &configured(), FormattingConfig::plain()).unwrap();
        assert_eq!(pack.options.bits_per_score, 4);
        assert_eq!(pack.options.total_scores, 2);
        assert_eq!(pack.format, OutputFormat::Json);
    }

    #[test]
    fn test_extract_unpack_params_flags_win() {
        let command = Commands::Unpack {
            number: 42,
            total_scores: Some(2),
            bits_per_score: Some(6),
            strict: true,
            explain: true,
            format: Some(OutputFormat::Text),
        };
        let unpack =
            extract_unpack_params(command, &configured(), FormattingConfig::plain()).unwrap();
        assert_eq!(unpack.value, 42);
        assert_eq!(unpack.options.total_scores, 2);
        assert_eq!(unpack.options.bits_per_score, 6);
        assert!(unpack.options.strict);
        assert_eq!(unpack.format, OutputFormat::Text);
    }

    #[test]
    fn test_extract_wrong_variant_fails() {
        let command = Commands::Init { force: false };
        assert!(
            extract_pack_params(command, &ScorepackConfig::default(), FormattingConfig::plain())
                .is_err()
        );
    }
}
