use std::fs;
use std::path::{Path, PathBuf};

use super::core::BlinkConfig;
use crate::errors::{AnalysisError, Result};
use tracing::{debug, warn};

pub const CONFIG_FILE_NAME: &str = ".blinkreact.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Parse and validate config from a TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<BlinkConfig> {
    let config = toml::from_str::<BlinkConfig>(contents)
        .map_err(|e| AnalysisError::config(format!("Failed to parse {CONFIG_FILE_NAME}: {e}")))?;
    config.validate()?;
    Ok(config)
}

/// Load an explicitly named config file. Unlike [`load_config`], every
/// failure is reported.
pub fn load_config_from(path: &Path) -> Result<BlinkConfig> {
    let contents = fs::read_to_string(path).map_err(|e| AnalysisError::io(e, path))?;
    parse_and_validate_config(&contents).map_err(|e| match e {
        AnalysisError::Config { message, .. } => AnalysisError::config_in(message, path),
        other => other,
    })
}

fn try_load_config_from_path(config_path: &Path) -> Option<BlinkConfig> {
    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            // Only log actual errors, not "file not found"
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!("Failed to read config file {}: {}", config_path.display(), e);
            }
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            warn!("{} ({}). Using defaults.", e, config_path.display());
            Some(BlinkConfig::default())
        }
    }
}

/// Generate directory ancestors up to a depth limit
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

/// Find `.blinkreact.toml` in `start` or its ancestors. Missing or invalid
/// files yield the defaults.
pub fn load_config_starting_at(start: PathBuf) -> BlinkConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            BlinkConfig::default()
        })
}

pub fn load_config() -> BlinkConfig {
    match std::env::current_dir() {
        Ok(dir) => load_config_starting_at(dir),
        Err(e) => {
            warn!("Failed to get current directory: {}. Using default config.", e);
            BlinkConfig::default()
        }
    }
}
