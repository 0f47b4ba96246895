//! Dashboard Configuration
//! TOML settings for where report files come from and how much of them to show.

use crate::data::ReportKind;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming an alternate configuration file.
pub const CONFIG_ENV: &str = "FRAUD_DASHBOARD_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "dashboard.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Unknown report key in [files]: {0}")]
    UnknownReport(String),
}

/// How report bytes reach the loader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngressMode {
    /// Files under `data_dir`, resolved at startup.
    Path,
    /// Files picked by the user, held in memory.
    Upload,
}

impl Default for IngressMode {
    fn default() -> Self {
        IngressMode::Path
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub ingress: IngressMode,
    pub data_dir: PathBuf,
    /// Rows of the raw dataset shown in the overview table.
    pub preview_rows: usize,
    /// How many repeated patterns the suspicious-patterns chart ranks.
    pub top_patterns: usize,
    /// File name overrides keyed by report, e.g. `fraud_by_step = "steps.tsv"`.
    pub files: HashMap<String, String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            ingress: IngressMode::Path,
            data_dir: PathBuf::from("data"),
            preview_rows: 50,
            top_patterns: 10,
            files: HashMap::new(),
        }
    }
}

impl DashboardConfig {
    /// Load from `path`; a missing file yields the defaults.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content).map_err(|err| match err {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the configuration file from the environment, falling back to the default name.
    pub fn config_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    pub fn file_name(&self, kind: ReportKind) -> &str {
        self.files
            .get(kind.config_key())
            .map(String::as_str)
            .unwrap_or_else(|| kind.default_file_name())
    }

    pub fn path_for(&self, kind: ReportKind) -> PathBuf {
        self.data_dir.join(self.file_name(kind))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for key in self.files.keys() {
            if !ReportKind::ALL.iter().any(|k| k.config_key() == key) {
                return Err(ConfigError::UnknownReport(key.clone()));
            }
        }
        Ok(())
    }
}
