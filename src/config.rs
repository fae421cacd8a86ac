//! Configuration management for muz-workshop.
//!
//! Configuration is loaded from multiple sources in priority order:
//! 1. Environment variables (MUZ_TRACE, MUZ_STEPS, MUZ_HEX_DIGITS)
//! 2. Project-local config file (`./muz-workshop.toml`)
//! 3. User config file (`~/.config/muz-workshop/config.toml`)
//! 4. Built-in defaults
//!
//! # Config File Format
//!
//! ```toml
//! # muz-workshop.toml
//!
//! # Register trace replayed when no live engine is attached
//! trace_path = "/home/user/traces/scmonitor.toml"
//!
//! # Steps taken by the headless front-end
//! steps = 16
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Global cached configuration.
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Default number of steps for the headless front-end.
const DEFAULT_STEPS: u64 = 8;

/// Default register display width in hex digits.
const DEFAULT_HEX_DIGITS: usize = 4;

/// muz-workshop configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Path to a register trace (see `bridge::scripted`).
    pub trace_path: Option<String>,

    /// Number of steps to take and display.
    pub steps: Option<u64>,

    /// Minimum hex digits per register value.
    pub hex_digits: Option<usize>,

    /// Show the extended register panel (SP and alternate set).
    pub extended_registers: Option<bool>,
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables
    /// 2. Project-local `muz-workshop.toml`
    /// 3. User config `~/.config/muz-workshop/config.toml`
    /// 4. Defaults
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(user_config) = Self::load_user_config() {
            config.merge(user_config);
        }

        if let Some(local_config) = Self::load_local_config() {
            config.merge(local_config);
        }

        config.apply_env_overrides();

        config
    }

    /// Get the cached global configuration.
    ///
    /// Loads configuration on first call and caches it.
    pub fn get() -> &'static Config {
        CONFIG.get_or_init(|| {
            let config = Self::load();
            log::debug!("Loaded configuration: {:?}", config);
            config
        })
    }

    /// Trace path, if one is configured.
    pub fn trace_path(&self) -> Option<PathBuf> {
        self.trace_path.as_ref().map(PathBuf::from)
    }

    pub fn steps(&self) -> u64 {
        self.steps.unwrap_or(DEFAULT_STEPS)
    }

    /// Hex digits per register, never fewer than one.
    pub fn hex_digits(&self) -> usize {
        self.hex_digits.unwrap_or(DEFAULT_HEX_DIGITS).max(1)
    }

    pub fn extended_registers(&self) -> bool {
        self.extended_registers.unwrap_or(false)
    }

    /// Load user configuration from ~/.config/muz-workshop/config.toml
    fn load_user_config() -> Option<Self> {
        let config_path = Self::user_config_path()?;
        Self::load_from_file(&config_path)
    }

    /// Load project-local configuration from ./muz-workshop.toml
    fn load_local_config() -> Option<Self> {
        Self::load_from_file(Path::new("muz-workshop.toml"))
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    Some(config)
                }
                Err(e) => {
                    log::warn!("Failed to parse {}: {}", path.display(), e);
                    None
                }
            },
            Err(e) => {
                log::warn!("Failed to read {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Merge another config into this one.
    /// Only overrides fields that are Some in the other config.
    fn merge(&mut self, other: Self) {
        if other.trace_path.is_some() {
            self.trace_path = other.trace_path;
        }
        if other.steps.is_some() {
            self.steps = other.steps;
        }
        if other.hex_digits.is_some() {
            self.hex_digits = other.hex_digits;
        }
        if other.extended_registers.is_some() {
            self.extended_registers = other.extended_registers;
        }
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Some(path) = env_path("MUZ_TRACE") {
            log::info!("Using MUZ_TRACE from environment: {}", path);
            self.trace_path = Some(path);
        }
        if let Some(steps) = env_number("MUZ_STEPS") {
            self.steps = Some(steps);
        }
        if let Some(digits) = env_number("MUZ_HEX_DIGITS") {
            self.hex_digits = Some(digits);
        }
    }

    /// Get the path to the user config file (for display/creation).
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("muz-workshop").join("config.toml"))
    }

    /// Generate a sample config file content.
    pub fn sample_config() -> String {
        r#"# muz-workshop configuration
# Place this file at ~/.config/muz-workshop/config.toml or ./muz-workshop.toml

# Register trace to replay (optional, a built-in demo trace is used otherwise)
# trace_path = "/home/user/traces/scmonitor.toml"

# Number of steps the headless front-end takes
steps = 8

# Minimum hex digits per register value
hex_digits = 4

# Show SP and the alternate register set
extended_registers = false
"#
        .to_string()
    }
}

/// Read a path environment variable. Empty or blank values count as unset.
fn env_path(name: &str) -> Option<String> {
    let raw = std::env::var(name).ok()?;
    if raw.trim().is_empty() {
        log::warn!("Ignoring {}: empty value", name);
        return None;
    }
    Some(raw)
}

/// Read a numeric environment variable, ignoring (with a warning) bad values.
fn env_number<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => {
            log::info!("Using {} from environment: {}", name, raw);
            Some(value)
        }
        Err(_) => {
            log::warn!("Ignoring {}: not a number: {}", name, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.trace_path(), None);
        assert_eq!(config.steps(), 8);
        assert_eq!(config.hex_digits(), 4);
        assert!(!config.extended_registers());
    }

    #[test]
    fn test_hex_digits_floor() {
        let config = Config {
            hex_digits: Some(0),
            ..Default::default()
        };
        assert_eq!(config.hex_digits(), 1);
    }

    #[test]
    fn test_config_merge() {
        let mut base = Config {
            trace_path: Some("/base/trace.toml".to_string()),
            steps: Some(4),
            hex_digits: None,
            extended_registers: Some(true),
        };

        let overlay = Config {
            trace_path: None,
            steps: Some(32),
            hex_digits: Some(8),
            extended_registers: None,
        };

        base.merge(overlay);

        // trace_path unchanged (overlay was None)
        assert_eq!(base.trace_path, Some("/base/trace.toml".to_string()));
        // steps overridden by overlay
        assert_eq!(base.steps(), 32);
        // hex_digits set from overlay
        assert_eq!(base.hex_digits(), 8);
        assert!(base.extended_registers());
    }

    #[test]
    fn test_sample_config_parses() {
        let sample = Config::sample_config();
        let config: Config = toml::from_str(&sample).expect("Sample config should parse");
        assert_eq!(config.steps(), 8);
        assert_eq!(config.trace_path, None);
    }

    #[test]
    fn test_blank_env_path_is_unset() {
        std::env::set_var("MUZ_TEST_BLANK_TRACE", "  ");
        assert_eq!(env_path("MUZ_TEST_BLANK_TRACE"), None);
        std::env::set_var("MUZ_TEST_BLANK_TRACE", "");
        assert_eq!(env_path("MUZ_TEST_BLANK_TRACE"), None);
        std::env::set_var("MUZ_TEST_BLANK_TRACE", "traces/boot.toml");
        assert_eq!(
            env_path("MUZ_TEST_BLANK_TRACE"),
            Some("traces/boot.toml".to_string())
        );
        std::env::remove_var("MUZ_TEST_BLANK_TRACE");
        assert_eq!(env_path("MUZ_TEST_BLANK_TRACE"), None);
    }

    #[test]
    fn test_missing_file_is_none() {
        assert!(Config::load_from_file(Path::new("/nonexistent/muz-workshop.toml")).is_none());
    }
}
