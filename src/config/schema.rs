use serde::{Deserialize, Serialize};

use crate::codec::{CodecOptions, MAX_BITS_PER_SCORE};
use crate::errors::ConfigError;
use crate::io::OutputFormat;

/// Root configuration structure for scorepack
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScorepackConfig {
    /// Codec defaults
    #[serde(default)]
    pub codec: Option<CodecConfig>,

    /// Output configuration
    #[serde(default)]
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecConfig {
    #[serde(default)]
    pub bits_per_score: Option<u32>,

    #[serde(default)]
    pub total_scores: Option<usize>,

    #[serde(default)]
    pub strict: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub default_format: Option<OutputFormat>,
}

impl ScorepackConfig {
    /// Codec options from this config, built-in defaults for anything unset.
    pub fn codec_options(&self) -> CodecOptions {
        self.resolve_codec_options(None, None, false)
    }

    /// Merge command-line overrides over this config.
    ///
    /// A flag wins over the config file, which wins over the built-in
    /// default. `strict` can only be switched on from the command line.
    pub fn resolve_codec_options(
        &self,
        bits_per_score: Option<u32>,
        total_scores: Option<usize>,
        strict: bool,
    ) -> CodecOptions {
        let defaults = CodecOptions::default();
        let codec = self.codec.clone().unwrap_or_default();

        CodecOptions {
            bits_per_score: bits_per_score
                .or(codec.bits_per_score)
                .unwrap_or(defaults.bits_per_score),
            total_scores: total_scores
                .or(codec.total_scores)
                .unwrap_or(defaults.total_scores),
            strict: strict || codec.strict.unwrap_or(defaults.strict),
        }
    }

    pub fn default_format(&self) -> OutputFormat {
        self.output
            .as_ref()
            .and_then(|output| output.default_format)
            .unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let Some(codec) = &self.codec else {
            return Ok(());
        };

        if let Some(bits) = codec.bits_per_score {
            if !(1..=MAX_BITS_PER_SCORE).contains(&bits) {
                return Err(ConfigError::invalid(
                    "codec.bits_per_score",
                    format!("must be between 1 and {MAX_BITS_PER_SCORE}, got {bits}"),
                ));
            }
        }

        if codec.total_scores == Some(0) {
            return Err(ConfigError::invalid(
                "codec.total_scores",
                "must be at least 1",
            ));
        }

        Ok(())
    }
}
