use clap::builder::RangedU64ValueParser;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::codec::{PackedValue, Score};
use crate::io::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "scorepack")]
#[command(about = "Pack and unpack risk scores as fixed-width binary fields", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (can be repeated: -v, -vv, -vvv)
    /// -v: info
    /// -vv: debug, shows widened fields
    /// -vvv: trace
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub plain: bool,

    /// Configuration file (defaults to the nearest .scorepack.toml)
    #[arg(short = 'c', long = "config", global = true, env = "SCOREPACK_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Pack an ordered list of scores into a single integer
    Pack {
        /// Scores in field order, space or comma separated (e.g. 3,4,5,4,3,4,2)
        #[arg(required = true, num_args = 1.., value_delimiter = ',')]
        scores: Vec<Score>,

        /// Bits per score field [default: 5]
        #[arg(
            short = 'b',
            long = "bits-per-score",
            value_parser = clap::value_parser!(u32).range(1..=64)
        )]
        bits_per_score: Option<u32>,

        /// Reject scores that do not fit in a field
        #[arg(long)]
        strict: bool,

        /// Print the decimal and binary breakdown of every field
        #[arg(long)]
        explain: bool,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Unpack an integer into its score fields
    Unpack {
        /// Packed decimal value (e.g. 3360820354)
        number: PackedValue,

        /// Number of fields to recover [default: 7]
        #[arg(
            short = 'n',
            long = "total-scores",
            value_parser = RangedU64ValueParser::<usize>::new().range(1..)
        )]
        total_scores: Option<usize>,

        /// Bits per score field [default: 5]
        #[arg(
            short = 'b',
            long = "bits-per-score",
            value_parser = clap::value_parser!(u32).range(1..=64)
        )]
        bits_per_score: Option<u32>,

        /// Reject values with more bits than the requested fields
        #[arg(long)]
        strict: bool,

        /// Print the binary breakdown of every field
        #[arg(long)]
        explain: bool,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Write a default .scorepack.toml to the current directory
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
