//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.chirp/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::OutputFormat;
use crate::core::autocomplete::{DEFAULT_MAX_QUERY_CHARS, DEFAULT_SUGGESTION_LIMIT};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ChirpConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub autocomplete: AutocompleteConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub roster_file: Option<String>,
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AutocompleteConfig {
    pub max_query_chars: Option<usize>,
    pub suggestion_limit: Option<usize>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_LOG_FILE: &str = "chirp.log";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub roster_file: Option<PathBuf>,
    pub format: OutputFormat,
    pub log_level: LevelFilter,
    pub max_query_chars: usize,
    pub suggestion_limit: usize,
}

/// Values supplied on the command line. `None` = not specified.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub roster_file: Option<PathBuf>,
    pub format: Option<OutputFormat>,
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

/// Returns `~/.chirp/`.
pub fn chirp_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".chirp"))
}

/// Returns the path to `~/.chirp/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    chirp_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.chirp/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `ChirpConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<ChirpConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(ChirpConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(ChirpConfig::default());
    }

    load_config_from(&path)
}

/// Load config from an explicit path. The file must exist.
pub fn load_config_from(path: &Path) -> Result<ChirpConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: ChirpConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Chirp Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# roster_file = "roster.json"       # Relative to ~/.chirp/, or absolute. Or set CHIRP_ROSTER
# format = "json"                    # "json" or "lines". Or set CHIRP_FORMAT

# [logging]
# level = "info"                     # "off", "error", "warn", "info", "debug", "trace"

# [autocomplete]
# max_query_chars = 20
# suggestion_limit = 5
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &ChirpConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Roster: CLI → env → config
    let roster_file = cli
        .roster_file
        .clone()
        .or_else(|| std::env::var("CHIRP_ROSTER").ok().map(PathBuf::from))
        .or_else(|| config.general.roster_file.as_deref().map(in_chirp_dir));

    // Format: CLI → env → config → default
    let format = cli
        .format
        .or_else(|| {
            std::env::var("CHIRP_FORMAT")
                .ok()
                .and_then(|s| parse_format(&s))
        })
        .or(config.general.format)
        .unwrap_or_default();

    // Log level: env → config → default
    let log_level = std::env::var("CHIRP_LOG_LEVEL")
        .ok()
        .or_else(|| config.logging.level.clone())
        .and_then(|s| parse_level(&s))
        .unwrap_or(DEFAULT_LOG_LEVEL);

    ResolvedConfig {
        roster_file,
        format,
        log_level,
        max_query_chars: config
            .autocomplete
            .max_query_chars
            .unwrap_or(DEFAULT_MAX_QUERY_CHARS),
        suggestion_limit: config
            .autocomplete
            .suggestion_limit
            .unwrap_or(DEFAULT_SUGGESTION_LIMIT),
    }
}

// ============================================================================
// Logging
// ============================================================================

/// Log file location: `CHIRP_LOG_FILE` → `~/.chirp/chirp.log`.
///
/// Known before the config file is read, so loading the config is logged.
pub fn log_file_path() -> PathBuf {
    log_file_from(std::env::var("CHIRP_LOG_FILE").ok())
}

fn log_file_from(env: Option<String>) -> PathBuf {
    in_chirp_dir(env.as_deref().unwrap_or(DEFAULT_LOG_FILE))
}

/// Level to log at until the config file has been resolved:
/// `CHIRP_LOG_LEVEL` → default.
pub fn initial_log_level() -> LevelFilter {
    std::env::var("CHIRP_LOG_LEVEL")
        .ok()
        .and_then(|s| parse_level(&s))
        .unwrap_or(DEFAULT_LOG_LEVEL)
}

/// Relative paths are taken relative to `~/.chirp/`.
fn in_chirp_dir(file: &str) -> PathBuf {
    let path = PathBuf::from(file);
    if path.is_absolute() {
        return path;
    }
    match chirp_dir() {
        Some(dir) => dir.join(path),
        None => path,
    }
}

fn parse_format(s: &str) -> Option<OutputFormat> {
    match s.trim().to_ascii_lowercase().as_str() {
        "json" => Some(OutputFormat::Json),
        "lines" => Some(OutputFormat::Lines),
        other => {
            warn!("Unknown output format {:?}, ignoring", other);
            None
        }
    }
}

fn parse_level(s: &str) -> Option<LevelFilter> {
    match LevelFilter::from_str(s.trim()) {
        Ok(level) => Some(level),
        Err(_) => {
            warn!("Unknown log level {:?}, ignoring", s);
            None
        }
    }
}
