//! # Configuration
//!
//! Centralizes playground settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.navkit/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NavkitConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub playground: PlaygroundConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub log_level: Option<String>,
    pub log_file: Option<String>,
    pub animated: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PlaygroundConfig {
    pub destinations: Option<Vec<String>>,
    pub start: Option<String>,
    pub full_screen_modals: Option<bool>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_LOG_FILE: &str = "navkit.log";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

const DEFAULT_DESTINATIONS: &[&str] = &[
    "home",
    "library",
    "messaging",
    "message-reorder",
    "configuration",
    "calibration",
];

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
    pub animated: bool,
    pub destinations: Vec<String>,
    pub start: String,
    pub full_screen_modals: bool,
}

/// Values taken from CLI flags. `None` = not specified.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub start: Option<String>,
    pub log_level: Option<String>,
    pub full_screen: bool,
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

/// Returns the path to `~/.navkit/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".navkit").join("config.toml"))
}

/// Load config from `~/.navkit/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `NavkitConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<NavkitConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(NavkitConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<NavkitConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(NavkitConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: NavkitConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# navkit Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# log_level = "debug"                # "off", "error", "warn", "info", "debug", "trace"
# log_file = "navkit.log"            # Or set NAVKIT_LOG_FILE env var
# animated = true                    # Animate transitions issued from the playground

# [playground]
# destinations = ["home", "library", "messaging", "configuration"]
# start = "home"                     # Must be one of `destinations`
# full_screen_modals = false         # Present with full screen style by default
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
pub fn resolve(config: &NavkitConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Log level: CLI → env → config → default
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| std::env::var("NAVKIT_LOG_LEVEL").ok())
        .or_else(|| config.general.log_level.clone())
        .and_then(|level| parse_level(&level))
        .unwrap_or(DEFAULT_LOG_LEVEL);

    // Log file: env → config → default
    let log_file = std::env::var("NAVKIT_LOG_FILE")
        .ok()
        .or_else(|| config.general.log_file.clone())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

    let destinations = config
        .playground
        .destinations
        .clone()
        .filter(|list| !list.is_empty())
        .unwrap_or_else(|| DEFAULT_DESTINATIONS.iter().map(|d| d.to_string()).collect());

    // Start: CLI → config → first destination. Unknown names fall back.
    let start = cli
        .start
        .clone()
        .or_else(|| config.playground.start.clone())
        .filter(|name| {
            let known = destinations.contains(name);
            if !known {
                warn!("Unknown start destination {:?}, using {:?}", name, destinations[0]);
            }
            known
        })
        .unwrap_or_else(|| destinations[0].clone());

    ResolvedConfig {
        log_level,
        log_file,
        animated: config.general.animated.unwrap_or(true),
        start,
        full_screen_modals: cli.full_screen
            || config.playground.full_screen_modals.unwrap_or(false),
        destinations,
    }
}

fn parse_level(level: &str) -> Option<LevelFilter> {
    match level.parse::<LevelFilter>() {
        Ok(filter) => Some(filter),
        Err(_) => {
            warn!("Ignoring unknown log level {:?}", level);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = NavkitConfig::default();
        assert!(config.playground.destinations.is_none());
        assert!(config.general.log_level.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = NavkitConfig::default();
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(resolved.destinations.len(), DEFAULT_DESTINATIONS.len());
        assert_eq!(resolved.start, "home");
        assert!(resolved.animated);
        assert!(!resolved.full_screen_modals);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = NavkitConfig {
            general: GeneralConfig {
                log_level: Some("warn".to_string()),
                log_file: None,
                animated: Some(false),
            },
            playground: PlaygroundConfig {
                destinations: Some(vec!["a".to_string(), "b".to_string()]),
                start: Some("b".to_string()),
                full_screen_modals: Some(true),
            },
        };
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(resolved.destinations, vec!["a", "b"]);
        assert_eq!(resolved.start, "b");
        assert!(!resolved.animated);
        assert!(resolved.full_screen_modals);
    }

    #[test]
    fn test_resolve_cli_start_wins() {
        let config = NavkitConfig {
            playground: PlaygroundConfig {
                start: Some("library".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let cli = CliOverrides {
            start: Some("messaging".to_string()),
            log_level: Some("trace".to_string()),
            full_screen: true,
        };
        let resolved = resolve(&config, &cli);
        assert_eq!(resolved.start, "messaging");
        assert_eq!(resolved.log_level, LevelFilter::Trace);
        assert!(resolved.full_screen_modals);
    }

    #[test]
    fn test_unknown_start_falls_back_to_first_destination() {
        let cli = CliOverrides {
            start: Some("nowhere".to_string()),
            ..Default::default()
        };
        let resolved = resolve(&NavkitConfig::default(), &cli);
        assert_eq!(resolved.start, "home");
    }

    #[test]
    fn test_empty_destination_list_uses_defaults() {
        let config = NavkitConfig {
            playground: PlaygroundConfig {
                destinations: Some(Vec::new()),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(resolved.destinations[0], "home");
    }

    #[test]
    fn test_parse_level_rejects_garbage() {
        assert_eq!(parse_level("info"), Some(LevelFilter::Info));
        assert_eq!(parse_level("loud"), None);
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[general]
log_level = "info"
log_file = "/tmp/navkit.log"
animated = false

[playground]
destinations = ["home", "library"]
start = "library"
full_screen_modals = true
"#;
        let config: NavkitConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level.as_deref(), Some("info"));
        assert_eq!(config.general.animated, Some(false));
        assert_eq!(
            config.playground.destinations,
            Some(vec!["home".to_string(), "library".to_string()])
        );
        assert_eq!(config.playground.full_screen_modals, Some(true));
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing; everything else stays default
        let toml_str = r#"
[playground]
start = "library"
"#;
        let config: NavkitConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.playground.start.as_deref(), Some("library"));
        assert!(config.playground.destinations.is_none());
        assert!(config.general.animated.is_none());
    }

    #[test]
    fn test_missing_file_generates_commented_default() {
        let dir = std::env::temp_dir().join(format!("navkit-config-{}", std::process::id()));
        let path = dir.join("config.toml");
        let _ = fs::remove_file(&path);

        let config = load_config_from(&path).unwrap();
        assert!(config.playground.start.is_none());

        // The generated file is all comments and parses back to defaults.
        let reloaded = load_config_from(&path).unwrap();
        assert!(reloaded.playground.destinations.is_none());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_malformed_file_is_a_parse_error() {
        let dir = std::env::temp_dir().join(format!("navkit-bad-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, "[playground\nstart = ").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("config parse error"));
        let _ = fs::remove_dir_all(&dir);
    }
}
