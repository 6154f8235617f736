//! Root configuration types.

use super::logging::LoggingConfig;
use super::settings::TransportSettings;
use serde::{Deserialize, Serialize};

/// Root configuration document.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub transport: TransportSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
}
