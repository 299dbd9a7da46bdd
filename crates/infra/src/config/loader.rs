//! Configuration loader
//!
//! Loads the client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If `FINCONTROL_API_URL` is missing, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `FINCONTROL_API_URL`: API base URL (required for env loading)
//! - `FINCONTROL_LOGIN_PATH`: Path signalled when the session expires
//! - `FINCONTROL_REQUEST_TIMEOUT`: Request timeout in seconds
//! - `FINCONTROL_CACHE_CAPACITY`: Maximum number of cached queries
//! - `FINCONTROL_CACHE_STALE_SECS`: Default query stale time in seconds
//! - `FINCONTROL_LOG_FILTER`: `EnvFilter` directive
//! - `FINCONTROL_LOG_JSON`: Emit JSON log lines (true/false)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./fincontrol.json` or `./fincontrol.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use fincontrol_domain::{ApiConfig, CacheConfig, ClientConfig, LoggingConfig};

use super::{ConfigError, ConfigResult};

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `ConfigError` if neither the environment nor a config file
/// yields a valid configuration.
pub fn load() -> ConfigResult<ClientConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// Only `FINCONTROL_API_URL` is required; every other setting keeps its
/// default when unset.
///
/// # Errors
/// Returns `ConfigError::MissingVar` if the API URL is not set and
/// `ConfigError::InvalidValue` if a numeric variable does not parse.
pub fn load_from_env() -> ConfigResult<ClientConfig> {
    let api_defaults = ApiConfig::default();
    let cache_defaults = CacheConfig::default();
    let logging_defaults = LoggingConfig::default();

    let base_url = env_var("FINCONTROL_API_URL")?;
    let login_path = optional_env("FINCONTROL_LOGIN_PATH").unwrap_or(api_defaults.login_path);
    let request_timeout_secs = env_parse::<u64>("FINCONTROL_REQUEST_TIMEOUT")?;

    let max_capacity =
        env_parse::<u64>("FINCONTROL_CACHE_CAPACITY")?.unwrap_or(cache_defaults.max_capacity);
    let stale_time_secs =
        env_parse::<u64>("FINCONTROL_CACHE_STALE_SECS")?.unwrap_or(cache_defaults.stale_time_secs);

    let filter = optional_env("FINCONTROL_LOG_FILTER").unwrap_or(logging_defaults.filter);
    let json = env_bool("FINCONTROL_LOG_JSON", logging_defaults.json);

    Ok(ClientConfig {
        api: ApiConfig { base_url, login_path, request_timeout_secs, user_agent: None },
        cache: CacheConfig { max_capacity, stale_time_secs },
        logging: LoggingConfig { filter, json },
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Format is detected by file extension.
///
/// # Errors
/// Returns `ConfigError` if the file is missing, unreadable or malformed.
pub fn load_from_file(path: Option<PathBuf>) -> ConfigResult<ClientConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ConfigError::NotFound(p));
            }
            p
        }
        None => probe_config_paths().ok_or(ConfigError::NoConfigFile)?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| ConfigError::Read { path: config_path.clone(), message: e.to_string() })?;

    parse_config(&contents, &config_path)
}

fn parse_config(contents: &str, path: &Path) -> ConfigResult<ClientConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents).map_err(|e| ConfigError::Parse(format!("TOML: {e}"))),
        "json" => {
            serde_json::from_str(contents).map_err(|e| ConfigError::Parse(format!("JSON: {e}")))
        }
        other => Err(ConfigError::UnsupportedFormat(other.to_string())),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    const NAMES: [&str; 6] = [
        "config.json",
        "config.toml",
        "fincontrol.json",
        "fincontrol.toml",
        "../config.json",
        "../config.toml",
    ];

    let mut roots = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        roots.push(cwd);
    }
    if let Some(exe_dir) =
        std::env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        roots.push(exe_dir);
    }

    roots
        .iter()
        .flat_map(|root| NAMES.iter().map(move |name| root.join(name)))
        .find(|path| path.exists())
}

fn env_var(key: &str) -> ConfigResult<String> {
    std::env::var(key).map_err(|_| ConfigError::MissingVar(key.to_string()))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn env_parse<T>(key: &str) -> ConfigResult<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    optional_env(key)
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })
        })
        .transpose()
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
