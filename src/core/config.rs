//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.phonefolio/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::navigator::{DEFAULT_STAGGER_INTERVAL_MS, DEFAULT_TRANSITION_DELAY_MS, Timing};
use crate::core::registry::{DEFAULT_HOME, ScreenDescriptor, default_screens};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PhonefolioConfig {
    #[serde(default)]
    pub navigation: NavigationConfig,
    /// Replaces the stock screens entirely when non-empty.
    #[serde(default)]
    pub screens: Vec<ScreenDescriptor>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NavigationConfig {
    pub home: Option<String>,
    pub transition_delay_ms: Option<u64>,
    pub stagger_interval_ms: Option<u64>,
}

/// Values given on the command line (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub home: Option<String>,
    pub transition_delay_ms: Option<u64>,
    pub stagger_interval_ms: Option<u64>,
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub home: String,
    pub timing: Timing,
    pub screens: Vec<ScreenDescriptor>,
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

/// Returns the path to `~/.phonefolio/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".phonefolio").join("config.toml"))
}

/// Load config from `explicit` if given, otherwise `~/.phonefolio/config.toml`.
///
/// A missing default file is generated (commented out) and the defaults are
/// returned. A missing explicit file is an error. Malformed files return
/// `ConfigError::Parse`.
pub fn load_config(explicit: Option<&Path>) -> Result<PhonefolioConfig, ConfigError> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => match config_path() {
            Some(p) => p,
            None => {
                warn!("Could not determine home directory, using default config");
                return Ok(PhonefolioConfig::default());
            }
        },
    };

    if explicit.is_none() && !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(PhonefolioConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config = parse_config(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

pub fn parse_config(contents: &str) -> Result<PhonefolioConfig, ConfigError> {
    toml::from_str(contents).map_err(ConfigError::Parse)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# phonefolio configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [navigation]
# home = "home"
# transition_delay_ms = 150         # Or set PHONEFOLIO_TRANSITION_MS
# stagger_interval_ms = 100         # Or set PHONEFOLIO_STAGGER_MS

# Defining any [[screens]] replaces the built-in portfolio.
# placement is "grid", "dock" or "hidden".

# [[screens]]
# id = "home"
# title = "Home"
# placement = "hidden"

# [[screens]]
# id = "about"
# title = "About"
# icon = "☺"
# placement = "grid"
#
# [[screens.content]]
# heading = "Profile"
# body = "Software engineer."
#
# [[screens.content]]
# heading = "More"
# link = "projects"
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
pub fn resolve(config: &PhonefolioConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Home: CLI → env → config → default
    let home = cli
        .home
        .clone()
        .or_else(|| std::env::var("PHONEFOLIO_HOME").ok())
        .or_else(|| config.navigation.home.clone())
        .unwrap_or_else(|| DEFAULT_HOME.to_string());

    let transition_delay_ms = cli
        .transition_delay_ms
        .or_else(|| env_millis("PHONEFOLIO_TRANSITION_MS"))
        .or(config.navigation.transition_delay_ms)
        .unwrap_or(DEFAULT_TRANSITION_DELAY_MS);

    let stagger_interval_ms = cli
        .stagger_interval_ms
        .or_else(|| env_millis("PHONEFOLIO_STAGGER_MS"))
        .or(config.navigation.stagger_interval_ms)
        .unwrap_or(DEFAULT_STAGGER_INTERVAL_MS);

    let screens = if config.screens.is_empty() {
        default_screens()
    } else {
        config.screens.clone()
    };

    ResolvedConfig {
        home,
        timing: Timing {
            transition_delay_ms,
            stagger_interval_ms,
        },
        screens,
    }
}

/// Reads a millisecond count from the environment, ignoring junk.
fn env_millis(key: &str) -> Option<u64> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(ms) => Some(ms),
        Err(e) => {
            warn!("Ignoring {}={:?}: {}", key, raw, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::registry::Placement;

    #[test]
    fn test_default_config_parses() {
        let config = PhonefolioConfig::default();
        assert!(config.screens.is_empty());
        assert!(config.navigation.home.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve(&PhonefolioConfig::default(), &CliOverrides::default());
        assert_eq!(resolved.timing, Timing::default());
        assert_eq!(resolved.screens.len(), default_screens().len());
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = PhonefolioConfig {
            navigation: NavigationConfig {
                home: Some("lobby".to_string()),
                transition_delay_ms: Some(300),
                stagger_interval_ms: Some(40),
            },
            screens: vec![ScreenDescriptor::new("lobby", "Lobby", "", Placement::Hidden)],
        };
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(resolved.home, "lobby");
        assert_eq!(resolved.timing.transition_delay_ms, 300);
        assert_eq!(resolved.timing.stagger_interval_ms, 40);
        assert_eq!(resolved.screens.len(), 1);
    }

    #[test]
    fn test_resolve_cli_wins() {
        let config = PhonefolioConfig {
            navigation: NavigationConfig {
                transition_delay_ms: Some(300),
                ..Default::default()
            },
            ..Default::default()
        };
        let cli = CliOverrides {
            transition_delay_ms: Some(0),
            ..Default::default()
        };
        assert_eq!(resolve(&config, &cli).timing.transition_delay_ms, 0);
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[navigation]
home = "home"
transition_delay_ms = 200
stagger_interval_ms = 50

[[screens]]
id = "home"
title = "Home"
placement = "hidden"

[[screens]]
id = "about"
title = "About"
icon = "A"

[[screens.content]]
heading = "Profile"
body = "Hi."

[[screens.content]]
heading = "Work"
link = "projects"

[[screens]]
id = "contact"
title = "Contact"
placement = "dock"
"#;
        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.navigation.transition_delay_ms, Some(200));
        assert_eq!(config.screens.len(), 3);
        assert_eq!(config.screens[0].placement, Placement::Hidden);
        assert_eq!(config.screens[1].placement, Placement::Grid);
        assert_eq!(config.screens[1].content.len(), 2);
        assert_eq!(config.screens[1].content[1].link.as_deref(), Some("projects"));
        assert!(config.screens[1].content[1].body.is_empty());
        assert_eq!(config.screens[2].placement, Placement::Dock);
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing. Everything else stays default
        let config = parse_config("[navigation]\nstagger_interval_ms = 0\n").unwrap();
        assert_eq!(config.navigation.stagger_interval_ms, Some(0));
        assert!(config.navigation.transition_delay_ms.is_none());
        assert!(config.screens.is_empty());
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let err = parse_config("[navigation\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("config parse error"));
    }

    #[test]
    fn test_missing_explicit_file_is_io_error() {
        let err = load_config(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
