//! Configuration management for cw.
//!
//! Parses `cw.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [diagrams]
//! layout_command = ["dot", "-Tpng"]
//! encode_command = ["base64"]
//! timeout_secs = 30
//! classes = ["dot", "graphviz"]
//!
//! [render]
//! strict = false
//!
//! [storage]
//! stylesheet = "table { width: 100%; }"
//!
//! # Only read by custom writers; the storage and wiki writers ignore it.
//! [variables]
//! title = "Release notes"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override strict rendering.
    pub strict: Option<bool>,
    /// Override the diagram command timeout.
    pub timeout_secs: Option<u64>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "cw.toml";

/// Upper bound for `diagrams.timeout_secs`.
const MAX_TIMEOUT_SECS: u64 = 600;

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Diagram pipeline configuration.
    pub diagrams: DiagramsConfig,
    /// Render policy.
    pub render: RenderConfig,
    /// Storage format options.
    pub storage: StorageConfig,
    /// Template variables passed through to the document handler.
    ///
    /// They reach `Writer::doc` as opaque values. The built-in storage and
    /// wiki writers do not use them, so setting them does not change their
    /// output.
    pub variables: BTreeMap<String, String>,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Diagram pipeline configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DiagramsConfig {
    /// Layout program and its fixed arguments.
    pub layout_command: Vec<String>,
    /// Encoder program and its fixed arguments.
    pub encode_command: Vec<String>,
    /// Per-command timeout in seconds.
    pub timeout_secs: u64,
    /// Code block classes rendered as diagrams.
    pub classes: Vec<String>,
}

impl DiagramsConfig {
    /// Per-command timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for DiagramsConfig {
    fn default() -> Self {
        Self {
            layout_command: vec!["dot".to_owned(), "-Tpng".to_owned()],
            encode_command: vec!["base64".to_owned()],
            timeout_secs: 30,
            classes: vec!["dot".to_owned(), "graphviz".to_owned()],
        }
    }
}

/// Render policy.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Abort the whole render when a diagram fails.
    pub strict: bool,
}

/// Storage format options.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// CSS replacing the built-in stylesheet. An empty string disables it.
    pub stylesheet: Option<String>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a list field to be non-empty.
fn require_non_empty(values: &[String], field: &str) -> Result<(), ConfigError> {
    if values.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a command list to name a program.
fn require_command(command: &[String], field: &str) -> Result<(), ConfigError> {
    require_non_empty(command, field)?;
    if command[0].trim().is_empty() {
        return Err(ConfigError::Validation(format!(
            "{field} must start with a program name"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `cw.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values. The result is validated last.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails or
    /// a value is out of range.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(strict) = settings.strict {
            self.render.strict = strict;
        }
        if let Some(timeout_secs) = settings.timeout_secs {
            self.diagrams.timeout_secs = timeout_secs;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::discover_from(&current)
    }

    /// Search for config file in `start` and its parents.
    fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_diagrams()
    }

    /// Validate diagrams configuration.
    fn validate_diagrams(&self) -> Result<(), ConfigError> {
        require_command(&self.diagrams.layout_command, "diagrams.layout_command")?;
        require_command(&self.diagrams.encode_command, "diagrams.encode_command")?;
        require_non_empty(&self.diagrams.classes, "diagrams.classes")?;

        let timeout = self.diagrams.timeout_secs;
        if timeout == 0 {
            return Err(ConfigError::Validation(
                "diagrams.timeout_secs must be greater than 0".to_owned(),
            ));
        }
        if timeout > MAX_TIMEOUT_SECS {
            return Err(ConfigError::Validation(format!(
                "diagrams.timeout_secs cannot exceed {MAX_TIMEOUT_SECS}"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.diagrams.layout_command, vec!["dot", "-Tpng"]);
        assert_eq!(config.diagrams.encode_command, vec!["base64"]);
        assert_eq!(config.diagrams.timeout(), Duration::from_secs(30));
        assert_eq!(config.diagrams.classes, vec!["dot", "graphviz"]);
        assert!(!config.render.strict);
        assert!(config.storage.stylesheet.is_none());
        assert!(config.variables.is_empty());
        config.validate().unwrap();
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.diagrams.timeout_secs, 30);
        assert!(!config.render.strict);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[diagrams]
layout_command = ["dot", "-Tsvg"]
encode_command = ["base64", "-w0"]
timeout_secs = 5
classes = ["dot"]

[render]
strict = true

[storage]
stylesheet = "p { margin: 0; }"

[variables]
title = "Guide"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.diagrams.layout_command, vec!["dot", "-Tsvg"]);
        assert_eq!(config.diagrams.encode_command, vec!["base64", "-w0"]);
        assert_eq!(config.diagrams.timeout_secs, 5);
        assert_eq!(config.diagrams.classes, vec!["dot"]);
        assert!(config.render.strict);
        assert_eq!(config.storage.stylesheet.as_deref(), Some("p { margin: 0; }"));
        assert_eq!(config.variables.get("title").map(String::as_str), Some("Guide"));
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let toml = r"
[diagrams]
timeout_secs = 10
";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.diagrams.timeout_secs, 10);
        assert_eq!(config.diagrams.layout_command, vec!["dot", "-Tpng"]);
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let err = toml::from_str::<Config>("[render]\nstrict = 1").unwrap_err();
        let err = ConfigError::from(err);
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validate_empty_layout_command() {
        let mut config = Config::default();
        config.diagrams.layout_command.clear();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("diagrams.layout_command"));
    }

    #[test]
    fn test_validate_blank_program() {
        let mut config = Config::default();
        config.diagrams.encode_command = vec![String::new()];
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("diagrams.encode_command"));
    }

    #[test]
    fn test_validate_empty_classes() {
        let mut config = Config::default();
        config.diagrams.classes.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_timeout_range() {
        let mut config = Config::default();
        config.diagrams.timeout_secs = 0;
        assert!(config.validate().is_err());

        config.diagrams.timeout_secs = 601;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("600"));

        config.diagrams.timeout_secs = 600;
        config.validate().unwrap();
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default();
        let overrides = CliSettings {
            strict: Some(true),
            timeout_secs: Some(3),
        };

        config.apply_cli_settings(&overrides);

        assert!(config.render.strict);
        assert_eq!(config.diagrams.timeout_secs, 3);
    }

    #[test]
    fn test_apply_cli_settings_none_keeps_values() {
        let mut config = Config::default();
        config.render.strict = true;

        config.apply_cli_settings(&CliSettings::default());

        assert!(config.render.strict);
        assert_eq!(config.diagrams.timeout_secs, 30);
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[render]\nstrict = true\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();
        assert!(config.render.strict);
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_validates_cli_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "").unwrap();
        let overrides = CliSettings {
            timeout_secs: Some(0),
            ..Default::default()
        };

        let err = Config::load(Some(&path), Some(&overrides)).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[diagrams]\nclasses = []\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(err.to_string().contains("diagrams.classes"));
    }

    #[test]
    fn test_discover_from_parent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "").unwrap();

        assert_eq!(
            Config::discover_from(&nested),
            Some(dir.path().join(CONFIG_FILENAME))
        );
    }
}
