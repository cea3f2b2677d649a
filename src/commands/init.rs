use crate::config::CONFIG_FILE_NAME;
use crate::io;
use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEFAULT_CONFIG: &str = r#"# Scorepack Configuration

[codec]
# Binary digits per score field; scores must stay below 2^bits_per_score
bits_per_score = 5
# Fields recovered by `scorepack unpack`
total_scores = 7
# Reject out-of-range scores instead of widening their field
strict = false

[output]
default_format = "text"
"#;

pub fn init_config(force: bool) -> Result<PathBuf> {
    init_config_in(Path::new("."), force)
}

pub fn init_config_in(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if io::file_exists(&config_path) && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    io::write_file(&config_path, DEFAULT_CONFIG)?;
    info!("wrote {}", config_path.display());
    Ok(config_path)
}
