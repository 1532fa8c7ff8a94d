//! Attach-time configuration.
//!
//! Configuration is supplied once per schema when it is attached to a
//! [`ModelRegistry`](crate::db::ModelRegistry). Every key is optional and
//! falls back to its documented default; unknown keys are rejected.

use serde::Deserialize;
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("invalid attach config: {0}")]
    Toml(#[from] toml::de::Error),
}

///
/// AttachConfig
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AttachConfig {
    /// Let compiled pipelines spill intermediate results to disk.
    /// Chained joins over large collections can exceed in-memory limits.
    pub allow_disk_use: bool,
}

impl AttachConfig {
    /// Parse an attach config from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    #[must_use]
    pub const fn allow_disk_use(mut self, allow: bool) -> Self {
        self.allow_disk_use = allow;
        self
    }
}

impl Default for AttachConfig {
    fn default() -> Self {
        Self {
            allow_disk_use: true,
        }
    }
}

///
/// TESTS
///
