pub mod chat;
pub mod steps;

use anyhow::Context;
use raidchat_core::EngineConfig;
use std::path::Path;

/// Load `--config` when given, defaults otherwise
pub fn load_config(path: Option<&Path>) -> anyhow::Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display())),
        None => Ok(EngineConfig::default()),
    }
}
