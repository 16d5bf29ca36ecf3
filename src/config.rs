//! Configuration for echoremind.
//!
//! Configuration sources (highest priority first):
//! 1. Command-line flags, or their environment variables
//!    (`--home`/ECHOREMIND_HOME, `--storage-key`/ECHOREMIND_STORAGE_KEY)
//! 2. Config file (.echoremind/config.yaml)
//! 3. Defaults (~/.echoremind)
//!
//! Config file discovery:
//! - Searches current directory and parents for .echoremind/config.yaml
//! - Paths in config file are relative to the .echoremind/ directory

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::core::DEFAULT_STORAGE_KEY;

const CONFIG_DIR: &str = ".echoremind";
const DEFAULT_VOICE_DELAY_MS: u64 = 1500;

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub seed: Option<SeedConfig>,
    #[serde(default)]
    pub voice: Option<VoiceConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    /// Data directory (relative to .echoremind/)
    pub home: Option<String>,
    /// Blob key the collection is stored under
    pub key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedConfig {
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VoiceConfig {
    pub processing_delay_ms: Option<u64>,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Directory holding persisted blobs
    pub home: PathBuf,
    /// Key of the reminder collection blob
    pub storage_key: String,
    /// Load the sample reminders when nothing is stored yet
    pub seed_when_empty: bool,
    /// Simulated processing time after a recording stops
    pub voice_processing_delay: Duration,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

/// Find config file by searching `start` and its parents
fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_DIR).join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to `base`
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

/// Merge a parsed config file (if any) with command-line overrides
fn resolve(
    config_file: Option<(PathBuf, ConfigFile)>,
    home_override: Option<PathBuf>,
    key_override: Option<String>,
    default_home: PathBuf,
) -> ResolvedConfig {
    let (path, file) = match config_file {
        Some((path, file)) => (Some(path), Some(file)),
        None => (None, None),
    };

    let home = if let Some(home) = home_override {
        home
    } else if let (Some(path), Some(home)) = (
        path.as_ref(),
        file.as_ref().and_then(|f| f.storage.home.as_ref()),
    ) {
        let config_dir = path.parent().unwrap_or(Path::new("."));
        resolve_path(config_dir, home)
    } else {
        default_home
    };

    let storage_key = key_override
        .or_else(|| file.as_ref().and_then(|f| f.storage.key.clone()))
        .unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string());

    let seed_when_empty = file
        .as_ref()
        .and_then(|f| f.seed.as_ref())
        .and_then(|s| s.enabled)
        .unwrap_or(true);

    let delay_ms = file
        .as_ref()
        .and_then(|f| f.voice.as_ref())
        .and_then(|v| v.processing_delay_ms)
        .unwrap_or(DEFAULT_VOICE_DELAY_MS);

    ResolvedConfig {
        home,
        storage_key,
        seed_when_empty,
        voice_processing_delay: Duration::from_millis(delay_ms),
        config_file: path,
    }
}

/// Load configuration, letting `home` and `storage_key` (already merged with
/// their environment variables by the CLI) win over the config file
pub fn load(home: Option<PathBuf>, storage_key: Option<String>) -> Result<ResolvedConfig> {
    let default_home = dirs::home_dir()
        .context("Failed to determine home directory")?
        .join(CONFIG_DIR);

    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    let config_file = match find_config_file(&cwd) {
        Some(path) => {
            let file = load_config_file(&path)?;
            Some((path, file))
        }
        None => None,
    };

    Ok(resolve(config_file, home, storage_key, default_home))
}
