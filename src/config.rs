// Configuration loading and parsing (config/navdeck.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::search::SearchMode;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// navdeck.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire navdeck.toml file.
#[derive(Debug, Clone, Deserialize)]
struct ConfigFile {
    directory: DirectoryConfig,
    #[serde(default)]
    search: SearchConfig,
    #[serde(default)]
    clock: ClockConfig,
    #[serde(default)]
    custom: Option<CustomConfig>,
}

/// Where the site directory lives and how to render its sites.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryConfig {
    /// URL of the directory document (a JSON array of categories plus the
    /// page_config / announcement_config pseudo-entries).
    pub url: String,
    /// Asset path substituted for the `no-logo` sentinel.
    #[serde(default = "default_logo")]
    pub default_logo: String,
}

fn default_logo() -> String {
    "/static/logo.svg".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Prefix the URL-encoded query is appended to for external searches.
    #[serde(default = "default_engine_url")]
    pub engine_url: String,
    /// Which mode the search box starts in.
    #[serde(default = "default_search_mode")]
    pub default_mode: SearchMode,
}

fn default_engine_url() -> String {
    "https://www.bing.com/search?q=".to_string()
}

fn default_search_mode() -> SearchMode {
    SearchMode::External
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            engine_url: default_engine_url(),
            default_mode: default_search_mode(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClockConfig {
    /// Cities shown by the world clock, in display order.
    #[serde(default = "default_cities")]
    pub cities: Vec<ClockCity>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClockCity {
    pub name: String,
    /// Whole-hour offset from UTC. Fixed offsets, no DST, matching the
    /// original dashboard's clock.
    pub utc_offset_hours: i32,
}

fn default_cities() -> Vec<ClockCity> {
    let city = |name: &str, utc_offset_hours: i32| ClockCity {
        name: name.to_string(),
        utc_offset_hours,
    };
    vec![
        city("Beijing", 8),
        city("London", 0),
        city("Amsterdam", 1),
        city("New York", -5),
        city("Sydney", 10),
    ]
}

impl Default for ClockConfig {
    fn default() -> Self {
        ClockConfig {
            cities: default_cities(),
        }
    }
}

/// Optional custom-filter module (the `?p=<url>&f=<filter>` mode of the
/// original page). Absent section disables the module entirely.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomConfig {
    /// URL of the custom directory document (entries carry a `filter` field).
    pub url: String,
    /// Filter value to show. When unset, every custom entry is shown and no
    /// rotation happens.
    #[serde(default)]
    pub filter: Option<String>,
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub directory: DirectoryConfig,
    pub search: SearchConfig,
    pub clock: ClockConfig,
    pub custom: Option<CustomConfig>,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/navdeck.toml` relative to
/// the given `base_dir`.
///
/// This is the lower-level loading primitive that does not auto-copy
/// defaults. Prefer `load_config()` which handles default initialization
/// automatically.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join("navdeck.toml");
    let text = read_file(&path)?;
    let file: ConfigFile = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    let config = Config {
        directory: file.directory,
        search: file.search,
        clock: file.clock,
        custom: file.custom,
    };

    validate(&config)?;

    Ok(config)
}

/// Seed `config/navdeck.toml` from `defaults/navdeck.toml` when it does not
/// exist yet. Returns the paths that were created; an existing config file
/// is never clobbered.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let template = base_dir.join("defaults").join("navdeck.toml");
    let config_dir = base_dir.join("config");
    let target = config_dir.join("navdeck.toml");

    if target.exists() {
        return Ok(vec![]);
    }
    if !template.exists() {
        return Err(ConfigError::DefaultsCopyError {
            message: format!(
                "no config/navdeck.toml and no defaults/navdeck.toml template under {}; \
                 run from the project root",
                base_dir.display()
            ),
        });
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create {}: {e}", config_dir.display()),
    })?;
    std::fs::copy(&template, &target).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to seed {}: {e}", target.display()),
    })?;

    Ok(vec![target])
}

/// Convenience wrapper: loads config relative to the current working
/// directory. Ensures default config files are copied before loading.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.directory.url.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "directory.url".into(),
            message: "must not be empty".into(),
        });
    }

    if config.search.engine_url.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "search.engine_url".into(),
            message: "must not be empty".into(),
        });
    }

    if config.clock.cities.is_empty() {
        return Err(ConfigError::ValidationError {
            field: "clock.cities".into(),
            message: "must list at least one city".into(),
        });
    }

    for city in &config.clock.cities {
        // UTC offsets in use range from -12 to +14
        if !(-12..=14).contains(&city.utc_offset_hours) {
            return Err(ConfigError::ValidationError {
                field: format!("clock.cities[{}].utc_offset_hours", city.name),
                message: format!("must be between -12 and 14, got {}", city.utc_offset_hours),
            });
        }
    }

    if let Some(custom) = &config.custom {
        if custom.url.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: "custom.url".into(),
                message: "must not be empty when [custom] is present".into(),
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
