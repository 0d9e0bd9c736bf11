//! Logging initialization

use serde::{Deserialize, Serialize};
use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Logging profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Human-readable output, warnings only; keeps the chat dialog clean
    Interactive,
    /// Human-readable output, debug level
    Development,
    /// JSON output, info level
    Production,
    /// Bare registry; tests install their own capture layer
    Test,
}

impl Profile {
    fn default_directives(self) -> &'static str {
        match self {
            Profile::Interactive => "raidchat=warn,raidchat_core=warn,raidchat_engine=warn",
            Profile::Development => "raidchat=debug,raidchat_core=debug,raidchat_engine=debug",
            Profile::Production => "raidchat=info,raidchat_core=info,raidchat_engine=info",
            Profile::Test => "off",
        }
    }

    fn filter(self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.default_directives()))
    }
}

static INIT_ONCE: Once = Once::new();

/// Install the global subscriber for `profile`
///
/// Only the first call has an effect. `RUST_LOG` overrides the profile's
/// default filter.
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| match profile {
        Profile::Interactive | Profile::Development => {
            tracing_subscriber::fmt()
                .with_env_filter(profile.filter())
                .with_writer(std::io::stderr)
                .init();
        }
        Profile::Production => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(profile.filter())
                .with_writer(std::io::stderr)
                .init();
        }
        Profile::Test => {
            tracing_subscriber::registry().init();
        }
    });
}
