//! Engine configuration
//!
//! Loaded from TOML. Every field has a default, so an empty file (or no file)
//! yields `EngineConfig::default()`. The default `log_profile` is
//! `interactive` (warnings only); set `RUST_LOG` or pick `development` for
//! lifecycle events.
//!
//! ```toml
//! default_project = "APOLLO"
//! log_profile = "production"
//!
//! [sequencer]
//! ask_priority = true
//! ask_owner = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::{ChatError, Result};
use crate::logging_facility::Profile;

/// Which optional creation steps the sequencer appends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequencerPolicy {
    pub ask_priority: bool,
    pub ask_owner: bool,
}

impl Default for SequencerPolicy {
    fn default() -> Self {
        Self {
            ask_priority: true,
            ask_owner: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub sequencer: SequencerPolicy,

    /// Project used when the caller does not name one
    pub default_project: Option<String>,

    pub log_profile: Profile,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sequencer: SequencerPolicy::default(),
            default_project: None,
            log_profile: Profile::Interactive,
        }
    }
}

impl EngineConfig {
    /// Parse a TOML document
    ///
    /// # Errors
    ///
    /// * `Config` - If the document is not valid TOML or has wrong types
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Read and parse a TOML file
    ///
    /// # Errors
    ///
    /// * `Config` - If the file cannot be read or parsed
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| ChatError::Config {
            reason: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&source)
    }
}
