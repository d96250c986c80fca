//! Configuration file parsing for lunar.toml.

use lunar_bytecode::DecodeLimits;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Decode guards applied to every chunk
    #[serde(default)]
    pub limits: DecodeLimits,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// Output configuration.
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// Pretty-print JSON output
    #[serde(default = "default_true")]
    pub pretty_json: bool,

    /// Include constants, locals and upvalues in listings
    #[serde(default)]
    pub full_listing: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty_json: true,
            full_listing: false,
        }
    }
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Apply command-line overrides on top of the file settings
    pub fn with_overrides(mut self, max_depth: Option<u32>, max_array_len: Option<u32>) -> Self {
        if let Some(depth) = max_depth {
            self.limits = self.limits.with_max_depth(depth);
        }
        if let Some(len) = max_array_len {
            self.limits = self.limits.with_max_array_len(len);
        }
        self
    }
}

/// Load configuration from a file or search for default config files.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config_path = match path {
        // An explicit path must exist
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file {} not found", path.display());
            }
            Some(path.to_path_buf())
        }
        None => find_config_file(),
    };

    match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;
            tracing::debug!("Loaded config from {:?}", path);
            Ok(config)
        }
        None => Ok(Config::default()),
    }
}

/// Search for configuration file in the current directory and parent directories.
fn find_config_file() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_ancestors(&cwd)
}

fn find_config_in_ancestors(start: &Path) -> Option<PathBuf> {
    // Config file names to search for
    const CONFIG_NAMES: &[&str] = &["lunar.toml", ".lunarrc.toml"];

    let mut dir = Some(start);
    while let Some(current) = dir {
        for name in CONFIG_NAMES {
            let path = current.join(name);
            if path.exists() {
                return Some(path);
            }
        }
        dir = current.parent();
    }

    None
}
