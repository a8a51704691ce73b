//! Project configuration
//!
//! A TOML file supplies the deployment directory layout, the ambient values
//! merged into every template, and the default log level. Every section is
//! optional.
//!
//! ```toml
//! [deploy]
//! local_root = "/home/me/project"
//! templates_dir = "deploy/templates"
//! output_dir = "deploy/.jobscripts"
//! inherit_environment = true
//!
//! [env]
//! remote = "cluster.example.org"
//! cores = 64
//!
//! [logging]
//! level = "info"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::template::Bindings;

/// Errors that can occur when loading or parsing the project config
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Top-level project configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub deploy: DeployConfig,
    /// Ambient template values; non-string values are rendered with TOML syntax
    pub env: BTreeMap<String, toml::Value>,
    pub logging: LoggingConfig,
}

/// Where templates are read from and scripts written to
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DeployConfig {
    /// Base for relative template and output directories
    pub local_root: PathBuf,
    pub templates_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Seed ambient values from the process environment
    pub inherit_environment: bool,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            local_root: PathBuf::from("."),
            templates_dir: PathBuf::from("deploy/templates"),
            output_dir: PathBuf::from("deploy/.jobscripts"),
            inherit_environment: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default `tracing` filter directive, overridden by `RUST_LOG`
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl ProjectConfig {
    /// Load config from TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load config from TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Enable or disable seeding ambient values from the process environment
    pub fn with_inherit_environment(mut self, inherit: bool) -> Self {
        self.deploy.inherit_environment = inherit;
        self
    }

    /// Directory templates are read from
    pub fn templates_path(&self) -> PathBuf {
        self.deploy.local_root.join(&self.deploy.templates_dir)
    }

    /// Directory generated scripts are written to
    pub fn output_path(&self) -> PathBuf {
        self.deploy.local_root.join(&self.deploy.output_dir)
    }

    /// The `[env]` table as string bindings
    pub fn env_bindings(&self) -> Bindings {
        self.env
            .iter()
            .map(|(key, value)| {
                let text = match value {
                    toml::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (key.clone(), text)
            })
            .collect()
    }

    /// Ambient template bindings.
    ///
    /// Precedence, lowest first:
    /// 1. Process environment (when `inherit_environment` is set)
    /// 2. The `[env]` table
    pub fn ambient(&self) -> Bindings {
        let mut bindings = Bindings::new();
        if self.deploy.inherit_environment {
            // Variables that are not valid UTF-8 cannot be substituted and are skipped
            bindings.extend(std::env::vars_os().filter_map(|(key, value)| {
                Some((key.into_string().ok()?, value.into_string().ok()?))
            }));
        }
        bindings.extend(self.env_bindings());
        bindings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ProjectConfig::default();
        assert_eq!(config.templates_path(), PathBuf::from("./deploy/templates"));
        assert_eq!(config.output_path(), PathBuf::from("./deploy/.jobscripts"));
        assert!(config.deploy.inherit_environment);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_partial_toml() {
        let toml_str = r#"
[deploy]
local_root = "/srv/project"

[env]
remote = "cluster"
cores = 64
"#;
        let config = ProjectConfig::from_str(toml_str).expect("Should parse");
        assert_eq!(
            config.templates_path(),
            PathBuf::from("/srv/project/deploy/templates")
        );
        let env = config.env_bindings();
        assert_eq!(env.get("remote").map(String::as_str), Some("cluster"));
        assert_eq!(env.get("cores").map(String::as_str), Some("64"));
    }

    #[test]
    fn test_ambient_without_environment() {
        let config = ProjectConfig::from_str("[env]\nuser = \"me\"\n")
            .expect("Should parse")
            .with_inherit_environment(false);
        let ambient = config.ambient();
        assert_eq!(ambient.len(), 1);
        assert_eq!(ambient.get("user").map(String::as_str), Some("me"));
    }

    #[test]
    fn test_env_table_overrides_process_environment() {
        let config = ProjectConfig::from_str("[env]\nPATH = \"/opt/bin\"\n").expect("Should parse");
        assert_eq!(
            config.ambient().get("PATH").map(String::as_str),
            Some("/opt/bin")
        );
    }

    #[test]
    fn test_invalid_toml_error() {
        let result = ProjectConfig::from_str("this is not valid toml {{{{");
        assert!(result.is_err());
    }
}
