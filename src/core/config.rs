//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.imgseek/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use simplelog::LevelFilter;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::notify::DEFAULT_TOAST_DURATION;
use crate::core::state::DEFAULT_PER_PAGE;
use crate::search::providers::pixabay::{DEFAULT_BASE_URL, DEFAULT_IMAGE_TYPE, DEFAULT_ORIENTATION};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ImgseekConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub pixabay: PixabayConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub per_page: Option<u32>,
    pub toast_duration_ms: Option<u64>,
    pub log_level: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PixabayConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub image_type: Option<String>,
    pub orientation: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

/// Pixabay rejects `per_page` outside 3..=200.
pub const MIN_PER_PAGE: u32 = 3;
pub const MAX_PER_PAGE: u32 = 200;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub per_page: u32,
    pub toast_duration: Duration,
    pub log_level: LevelFilter,
    pub api_key: Option<String>,
    pub base_url: String,
    pub image_type: String,
    pub orientation: String,
}

/// Values from command-line flags (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub per_page: Option<u32>,
    pub api_key: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.imgseek/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".imgseek").join("config.toml"))
}

/// Load config from `~/.imgseek/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `ImgseekConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<ImgseekConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(ImgseekConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<ImgseekConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(ImgseekConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: ImgseekConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: per_page={:?}, toast_duration_ms={:?}", config.general.per_page, config.general.toast_duration_ms);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# imgseek configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# per_page = 12                 # images per page (3..=200)
# toast_duration_ms = 2800      # how long notifications stay on screen
# log_level = "debug"           # "error", "warn", "info", "debug", "trace", "off"

# [pixabay]
# api_key = "..."               # Or set PIXABAY_API_KEY env var
# base_url = "https://pixabay.com/api/"
# image_type = "photo"          # "all", "photo", "illustration", "vector"
# orientation = "horizontal"    # "all", "horizontal", "vertical"
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &ImgseekConfig, cli: &CliOverrides) -> ResolvedConfig {
    // API key: CLI → env → config
    let api_key = cli
        .api_key
        .clone()
        .or_else(|| std::env::var("PIXABAY_API_KEY").ok())
        .or_else(|| config.pixabay.api_key.clone())
        .filter(|k| !k.trim().is_empty());

    // Base URL: env → config → default
    let base_url = std::env::var("PIXABAY_BASE_URL")
        .ok()
        .or_else(|| config.pixabay.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let per_page = cli
        .per_page
        .or(config.general.per_page)
        .unwrap_or(DEFAULT_PER_PAGE)
        .clamp(MIN_PER_PAGE, MAX_PER_PAGE);

    let toast_duration = config
        .general
        .toast_duration_ms
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_TOAST_DURATION);

    let log_level = config
        .general
        .log_level
        .as_deref()
        .map(parse_level)
        .unwrap_or(LevelFilter::Debug);

    ResolvedConfig {
        per_page,
        toast_duration,
        log_level,
        api_key,
        base_url,
        image_type: config
            .pixabay
            .image_type
            .clone()
            .unwrap_or_else(|| DEFAULT_IMAGE_TYPE.to_string()),
        orientation: config
            .pixabay
            .orientation
            .clone()
            .unwrap_or_else(|| DEFAULT_ORIENTATION.to_string()),
    }
}

fn parse_level(s: &str) -> LevelFilter {
    match s.to_ascii_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        other => {
            warn!("Unknown log level {:?}, using debug", other);
            LevelFilter::Debug
        }
    }
}
