//! Configuration loaded from `.scorepack.toml`.
//!
//! The file is looked up in the current directory and its ancestors, then in
//! the per-user config directory. Every setting is optional; anything unset
//! falls back to the codec defaults, and command-line flags override both.

mod loader;
mod schema;

pub use schema::{CodecConfig, OutputConfig, ScorepackConfig};

pub use loader::{
    directory_ancestors, discover_config, load_config, load_config_from_path,
    parse_and_validate_config, resolve_config, user_config_path, CONFIG_FILE_NAME,
};
