//! Tinct configuration file handling

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tinct_theme::{OutputFormat, DEFAULT_PROPERTY_NAMES};

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "tinct.toml";

/// Top-level Tinct configuration (tinct.toml)
#[derive(Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct TinctConfig {
    #[serde(default)]
    pub expand: ExpandConfig,
}

/// Settings for `tinct expand`
#[derive(Debug, PartialEq, Deserialize, Serialize)]
pub struct ExpandConfig {
    /// Color properties to expand, without the `--` prefix
    #[serde(default = "default_names")]
    pub names: Vec<String>,
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_names() -> Vec<String> {
    DEFAULT_PROPERTY_NAMES.iter().map(|s| s.to_string()).collect()
}

impl Default for ExpandConfig {
    fn default() -> Self {
        Self {
            names: default_names(),
            format: OutputFormat::default(),
        }
    }
}

impl ExpandConfig {
    /// Apply command-line overrides; an empty `names` keeps the configured list
    pub fn with_overrides(mut self, names: Vec<String>, format: Option<OutputFormat>) -> Self {
        if !names.is_empty() {
            self.names = names;
        }
        if let Some(format) = format {
            self.format = format;
        }
        self
    }
}

impl TinctConfig {
    /// Load an explicitly requested configuration file
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let config_path = if path.is_dir() {
            path.join(CONFIG_FILE_NAME)
        } else {
            path.to_path_buf()
        };

        if !config_path.exists() {
            anyhow::bail!("No config file found at {}", config_path.display());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        Self::from_toml(&content).with_context(|| format!("Failed to parse {}", config_path.display()))
    }

    /// Load `tinct.toml` from `dir` if present, defaults otherwise
    pub fn discover(dir: &Path) -> Result<Self> {
        let config_path = dir.join(CONFIG_FILE_NAME);
        if config_path.is_file() {
            Self::load_from_path(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid configuration")
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = TinctConfig::from_toml("").unwrap();
        assert_eq!(config, TinctConfig::default());
        assert_eq!(config.expand.names.len(), 6);
        assert_eq!(config.expand.names[0], "primary");
        assert_eq!(config.expand.format, OutputFormat::Css);
    }

    #[test]
    fn test_partial_expand_section() {
        let config = TinctConfig::from_toml(
            r#"
            [expand]
            format = "pretty"
            "#,
        )
        .unwrap();
        assert_eq!(config.expand.format, OutputFormat::Pretty);
        assert_eq!(config.expand.names, default_names());
    }

    #[test]
    fn test_names_and_format() {
        let config = TinctConfig::from_toml(
            r#"
            [expand]
            names = ["primary", "accent"]
            format = "style-tag"
            "#,
        )
        .unwrap();
        assert_eq!(config.expand.names, vec!["primary", "accent"]);
        assert_eq!(config.expand.format, OutputFormat::StyleTag);
    }

    #[test]
    fn test_unknown_format_is_error() {
        assert!(TinctConfig::from_toml("[expand]\nformat = \"yaml\"").is_err());
    }

    #[test]
    fn test_overrides() {
        let expand = ExpandConfig::default().with_overrides(Vec::new(), Some(OutputFormat::Pretty));
        assert_eq!(expand.names, default_names());
        assert_eq!(expand.format, OutputFormat::Pretty);

        let expand = expand.with_overrides(vec!["accent".to_string()], None);
        assert_eq!(expand.names, vec!["accent"]);
        assert_eq!(expand.format, OutputFormat::Pretty);
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = TinctConfig {
            expand: ExpandConfig {
                names: vec!["brand".to_string()],
                format: OutputFormat::StyleTag,
            },
        };
        let text = config.to_toml().unwrap();
        assert_eq!(TinctConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        assert!(TinctConfig::load_from_path(Path::new("/definitely/not/tinct.toml")).is_err());
    }

    #[test]
    fn test_discover_without_file() {
        let config = TinctConfig::discover(Path::new("/definitely/not/here")).unwrap();
        assert_eq!(config, TinctConfig::default());
    }
}
