//! Dropdown configuration types.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Label shown when a dropdown has no value.
pub const DEFAULT_PLACEHOLDER: &str = "Не выбрано";

/// Shared configuration for every dropdown variant.
///
/// All fields have defaults, so a config file only needs to name what it
/// overrides:
///
/// ```
/// use dropdown::config::{DisabledPolicy, DropdownConfig};
///
/// let config = DropdownConfig::from_json_str(r#"{ "disabled_policy": "presentation_only" }"#)?;
/// assert_eq!(config.disabled_policy, DisabledPolicy::PresentationOnly);
/// assert_eq!(config.placeholder, "Не выбрано");
/// # Ok::<(), dropdown::config::ConfigError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DropdownConfig {
    /// Display text when no value is selected.
    pub placeholder: String,

    /// Marker appended to the label of required fields.
    pub required_marker: String,

    /// Whether disabled options can be committed.
    pub disabled_policy: DisabledPolicy,

    /// Maximum option rows the panel shows at once.
    pub max_visible_options: usize,
}

impl Default for DropdownConfig {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            required_marker: "*".to_string(),
            disabled_policy: DisabledPolicy::default(),
            max_visible_options: 8,
        }
    }
}

impl DropdownConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the placeholder label.
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Set the required marker.
    pub fn required_marker(mut self, marker: impl Into<String>) -> Self {
        self.required_marker = marker.into();
        self
    }

    /// Set the disabled-option policy.
    pub fn disabled_policy(mut self, policy: DisabledPolicy) -> Self {
        self.disabled_policy = policy;
        self
    }

    /// Limit how many option rows the panel shows at once.
    pub fn max_visible_options(mut self, max: usize) -> Self {
        self.max_visible_options = max.max(1);
        self
    }

    /// Parse a JSON document. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_json::from_str(json)?;
        config.max_visible_options = config.max_visible_options.max(1);
        Ok(config)
    }

    /// Read and parse a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}

/// What happens when a disabled option is clicked or accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisabledPolicy {
    /// Disabled options cannot be committed.
    #[default]
    Enforce,

    /// Disabled options are only styled differently and still commit.
    PresentationOnly,
}

/// Errors that can occur when loading a config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}
