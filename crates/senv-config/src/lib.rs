use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Input required and not supplied: {0}")]
    MissingInput(&'static str),

    #[error("Cannot read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Raw host inputs, as strings, before any parsing
///
/// Every field is optional so several sources can be layered with
/// [`ActionInputs::overlay`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActionInputs {
    #[serde(default)]
    pub secrets: Option<String>,

    #[serde(default)]
    pub path: Option<PathBuf>,

    #[serde(default)]
    pub include_regexp: Option<String>,

    #[serde(default)]
    pub exclude_regexp: Option<String>,

    #[serde(default)]
    pub replace_regexp: Option<String>,
}

/// Trimmed value, or `None` when nothing but whitespace is left.
fn trim_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn trim_path(value: Option<PathBuf>) -> Option<PathBuf> {
    value
        .map(|p| match p.to_str() {
            Some(s) => PathBuf::from(s.trim()),
            None => p,
        })
        .filter(|p| !p.as_os_str().is_empty())
}

/// Inputs with the required values present and the optional ones defaulted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInputs {
    pub secrets: String,
    pub path: PathBuf,
    pub include_regexp: String,
    pub exclude_regexp: String,
    pub replace_regexp: String,
}

impl ActionInputs {
    /// Load inputs from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Trim every value; whitespace-only values become unset.
    pub fn trimmed(self) -> Self {
        Self {
            secrets: trim_text(self.secrets),
            path: trim_path(self.path),
            include_regexp: trim_text(self.include_regexp),
            exclude_regexp: trim_text(self.exclude_regexp),
            replace_regexp: trim_text(self.replace_regexp),
        }
    }

    /// Values set in `higher` win over the ones in `self`.
    pub fn overlay(self, higher: ActionInputs) -> Self {
        Self {
            secrets: higher.secrets.or(self.secrets),
            path: higher.path.or(self.path),
            include_regexp: higher.include_regexp.or(self.include_regexp),
            exclude_regexp: higher.exclude_regexp.or(self.exclude_regexp),
            replace_regexp: higher.replace_regexp.or(self.replace_regexp),
        }
    }

    /// Check required inputs after trimming. A blank value counts as not supplied.
    pub fn resolve(self) -> Result<ResolvedInputs> {
        let inputs = self.trimmed();
        let secrets = inputs
            .secrets
            .ok_or(ConfigError::MissingInput("secrets"))?;
        let path = inputs.path.ok_or(ConfigError::MissingInput("path"))?;

        Ok(ResolvedInputs {
            secrets,
            path,
            include_regexp: inputs.include_regexp.unwrap_or_default(),
            exclude_regexp: inputs.exclude_regexp.unwrap_or_default(),
            replace_regexp: inputs.replace_regexp.unwrap_or_default(),
        })
    }
}
