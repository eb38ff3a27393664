//! Bundler configuration
//!
//! Configuration merges three layers, strongest first: CLI flags (applied by
//! the binary), a `skein.toml` in the working directory, and a user-level
//! `skein.toml` in the platform config directory. Every field has a default,
//! so running with no configuration at all is fine.

use std::{fs, path::{Path, PathBuf}};

use anyhow::{Context, Result};
use etcetera::{BaseStrategy, choose_base_strategy};
use log::debug;
use serde::{Deserialize, Serialize};

/// File name probed in the working directory and the user config directory
const CONFIG_FILE_NAME: &str = "skein.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Source roots to scan for candidate files; when empty, the entry
    /// file's directory is used
    pub src: Vec<PathBuf>,

    /// Extension of candidate source files
    pub extension: String,

    /// Where to write the bundle; `None` means stdout
    pub output: Option<PathBuf>,

    /// Import paths under these prefixes are always externally scoped,
    /// short-circuiting any catalog lookup
    pub external_prefixes: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            src: Vec::new(),
            extension: "scala".to_owned(),
            output: None,
            external_prefixes: vec!["scala".to_owned(), "java".to_owned()],
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicitly given path must exist and parse; otherwise the first
    /// existing of `./skein.toml` and `<config dir>/skein/skein.toml` is
    /// used, and defaults apply when neither does.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let local = PathBuf::from(CONFIG_FILE_NAME);
        if local.is_file() {
            return Self::from_file(&local);
        }

        if let Ok(strategy) = choose_base_strategy() {
            let user = strategy.config_dir().join("skein").join(CONFIG_FILE_NAME);
            if user.is_file() {
                return Self::from_file(&user);
            }
        }

        debug!("no configuration file found, using defaults");
        Ok(Self::default())
    }

    fn from_file(path: &Path) -> Result<Self> {
        debug!("loading configuration from {}", path.display());
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }
}
