// Export modules for library usage
pub mod cli;
pub mod codec;
pub mod commands;
pub mod config;
pub mod errors;
pub mod formatting;
pub mod io;
pub mod risk;

// Re-export commonly used types
pub use crate::codec::{
    decode, decode_with, encode, encode_with, CodecOptions, DecodeTrace, EncodeTrace,
    PackedValue, Score, TraceMode, DEFAULT_BITS_PER_SCORE, DEFAULT_TOTAL_SCORES,
};

pub use crate::errors::{CodecError, ConfigError};

pub use crate::config::{load_config, ScorepackConfig};

pub use crate::io::output::{create_writer, OutputFormat, ReportWriter};

pub use crate::risk::{render_score_table, RiskDimension, RiskProfile};
