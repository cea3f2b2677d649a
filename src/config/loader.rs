use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use super::schema::ScorepackConfig;
use crate::errors::ConfigError;

pub const CONFIG_FILE_NAME: &str = ".scorepack.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

pub(crate) fn read_config_file(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a TOML document and validate its values.
pub fn parse_and_validate_config(
    contents: &str,
    path: &Path,
) -> Result<ScorepackConfig, ConfigError> {
    let config =
        toml::from_str::<ScorepackConfig>(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    config.validate()?;
    Ok(config)
}

/// Load a config file the user named explicitly. Any failure is an error.
pub fn load_config_from_path(path: &Path) -> Result<ScorepackConfig, ConfigError> {
    let contents = read_config_file(path)?;
    let config = parse_and_validate_config(&contents, path)?;
    debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Try a discovered config path; unreadable or invalid files are skipped.
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<ScorepackConfig> {
    match load_config_from_path(config_path) {
        Ok(config) => Some(config),
        Err(ConfigError::Read { source, .. })
            if source.kind() == std::io::ErrorKind::NotFound =>
        {
            None
        }
        Err(e) => {
            warn!("{}. Using defaults.", e);
            None
        }
    }
}

pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search `start` and its ancestors for `.scorepack.toml`.
pub fn discover_config(start: PathBuf) -> Option<ScorepackConfig> {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
}

/// Per-user config file, e.g. `~/.config/scorepack/config.toml`.
pub fn user_config_path() -> Option<PathBuf> {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg_config).join("scorepack").join("config.toml"));
    }
    dirs::config_dir().map(|dir| dir.join("scorepack").join("config.toml"))
}

pub fn load_config() -> ScorepackConfig {
    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            warn!("Failed to get current directory: {}. Using default config.", e);
            return ScorepackConfig::default();
        }
    };

    discover_config(current)
        .or_else(|| user_config_path().and_then(|path| try_load_config_from_path(&path)))
        .unwrap_or_else(|| {
            debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            ScorepackConfig::default()
        })
}

/// Explicit `--config` path if given, discovery otherwise.
pub fn resolve_config(explicit: Option<&Path>) -> Result<ScorepackConfig> {
    match explicit {
        Some(path) => load_config_from_path(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => Ok(load_config()),
    }
}
