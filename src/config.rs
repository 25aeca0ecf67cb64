//! Configuration file parser for `podtag.toml`.
//!
//! The config file is optional: a missing file yields `Config::default()`.
//! Unknown keys are silently ignored by serde (with `deny_unknown_fields` off),
//! though we log a warning when the file contains potential typos.
//! `PODTAG_ENV` and `PODTAG_LOG` override the file.
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::phase::ParseOptions;

/// Environment variable selecting the runtime environment.
pub const ENV_VAR: &str = "PODTAG_ENV";
/// Environment variable overriding the log level.
pub const LOG_VAR: &str = "PODTAG_LOG";

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// SEC-014: Config file exceeds maximum allowed size.
    #[error("Config file too large: {0}")]
    TooLarge(String),
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Top-level configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `development`, `production` or `test`; picks the default log level.
    pub environment: String,

    /// Explicit log filter (e.g. `debug`, `podtag=trace`). Wins over the
    /// environment default.
    pub log_level: Option<String>,

    /// Whether pending-phase tags such as `podcast:chat` are parsed.
    pub include_pending_phase: bool,

    /// Highest released namespace phase to parse. Unset parses all phases.
    pub max_phase: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            log_level: None,
            include_pending_phase: true,
            max_phase: None,
        }
    }
}

impl Config {
    /// SEC-014: Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Unknown keys → silently accepted (serde default behavior), logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        // SEC-014: Check file size before reading to prevent memory exhaustion
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // Race condition: file deleted between metadata and read
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text. Blank text yields defaults.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            tracing::debug!("Config file is empty, using defaults");
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            let known_keys = [
                "environment",
                "log_level",
                "include_pending_phase",
                "max_phase",
            ];
            for key in raw.keys() {
                if !known_keys.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(content)?;
        tracing::debug!(environment = %config.environment, "Loaded configuration");
        Ok(config)
    }

    /// Applies `PODTAG_ENV` / `PODTAG_LOG` from the process environment.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary variable source. Empty values are ignored.
    #[must_use]
    pub fn with_overrides_from(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(environment) = var(ENV_VAR).filter(|v| !v.is_empty()) {
            self.environment = environment;
        }
        if let Some(level) = var(LOG_VAR).filter(|v| !v.is_empty()) {
            self.log_level = Some(level);
        }
        self
    }

    /// The log filter to install: the explicit level, else the environment's
    /// default (`development` → info, `production` → warn, `test` → off),
    /// else warn. `silent` is accepted as a synonym for `off`.
    pub fn effective_log_level(&self) -> &str {
        let level = match self.log_level.as_deref() {
            Some(level) => level,
            None => match self.environment.as_str() {
                "development" => "info",
                "production" => "warn",
                "test" => "off",
                _ => "warn",
            },
        };
        if level.eq_ignore_ascii_case("silent") {
            "off"
        } else {
            level
        }
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            max_phase: self.max_phase,
            include_pending: self.include_pending_phase,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.environment, "development");
        assert!(config.log_level.is_none());
        assert!(config.include_pending_phase);
        assert!(config.max_phase.is_none());
        assert_eq!(config.effective_log_level(), "info");
    }

    #[test]
    fn test_missing_file_returns_default() {
        let path = Path::new("/tmp/podtag_test_nonexistent_config.toml");
        let config = Config::load(path).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_whitespace_only_returns_default() {
        assert_eq!(Config::from_toml("   \n  \n  ").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_config_uses_defaults_for_missing() {
        let config = Config::from_toml("max_phase = 4\n").unwrap();
        assert_eq!(config.max_phase, Some(4));
        assert_eq!(config.environment, "development");
        assert!(config.include_pending_phase);
    }

    #[test]
    fn test_full_config() {
        let content = r#"
environment = "production"
log_level = "debug"
include_pending_phase = false
max_phase = 6
"#;
        let config = Config::from_toml(content).unwrap();
        assert_eq!(config.environment, "production");
        assert_eq!(config.effective_log_level(), "debug");
        assert_eq!(
            config.parse_options(),
            ParseOptions {
                max_phase: Some(6),
                include_pending: false,
            }
        );
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        let err = Config::from_toml("this is not [valid toml").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("Invalid TOML"));
    }

    #[test]
    fn test_unknown_keys_accepted() {
        let config = Config::from_toml("environment = \"test\"\ntheme = \"dark\"\n").unwrap();
        assert_eq!(config.environment, "test");
    }

    #[test]
    fn test_wrong_type_returns_error() {
        assert!(Config::from_toml("max_phase = \"four\"\n").is_err());
    }

    #[test]
    fn test_environment_default_levels() {
        let level = |env: &str| {
            let config = Config {
                environment: env.to_string(),
                ..Config::default()
            };
            config.effective_log_level().to_string()
        };
        assert_eq!(level("development"), "info");
        assert_eq!(level("production"), "warn");
        assert_eq!(level("test"), "off");
        assert_eq!(level("staging"), "warn");
    }

    #[test]
    fn test_silent_maps_to_off() {
        let config = Config {
            log_level: Some("silent".to_string()),
            ..Config::default()
        };
        assert_eq!(config.effective_log_level(), "off");
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::default().with_overrides_from(|key| match key {
            ENV_VAR => Some("production".to_string()),
            LOG_VAR => Some(String::new()),
            _ => None,
        });
        assert_eq!(config.environment, "production");
        assert!(config.log_level.is_none());
        assert_eq!(config.effective_log_level(), "warn");

        let config = Config::default().with_overrides_from(|key| {
            (key == LOG_VAR).then(|| "trace".to_string())
        });
        assert_eq!(config.effective_log_level(), "trace");
    }

    // SEC-014: File size limit
    #[test]
    fn test_too_large_file_rejected() {
        let dir = std::env::temp_dir().join("podtag_config_test_too_large");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("podtag.toml");

        let content = "a".repeat(1_048_577);
        std::fs::write(&path, content).unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::TooLarge(_)));
        assert!(err.to_string().contains("too large"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_from_file() {
        let dir = std::env::temp_dir().join("podtag_config_test_load");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("podtag.toml");
        std::fs::write(&path, "include_pending_phase = false\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert!(!config.include_pending_phase);

        std::fs::remove_dir_all(&dir).ok();
    }
}
