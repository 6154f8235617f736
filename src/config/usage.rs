//! Transport usage policy.

use super::error::SettingsError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// When the channel stack upgrades a connection to the WebSocket transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransportUsage {
    /// Only for contracts that require a duplex channel.
    WhenDuplex,
    /// For every contract.
    Always,
    /// Never; the transport falls back to plain request/reply.
    Never,
}

impl TransportUsage {
    /// Every member, ordered by wire code.
    pub const ALL: [Self; 3] = [Self::WhenDuplex, Self::Always, Self::Never];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::WhenDuplex => "WhenDuplex",
            Self::Always => "Always",
            Self::Never => "Never",
        }
    }

    /// Numeric code used by configuration documents.
    #[must_use]
    pub const fn code(&self) -> u8 {
        match self {
            Self::WhenDuplex => 0,
            Self::Always => 1,
            Self::Never => 2,
        }
    }
}

impl fmt::Display for TransportUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<u8> for TransportUsage {
    type Error = SettingsError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|usage| usage.code() == code)
            .ok_or_else(|| SettingsError::InvalidEnumerationValue {
                type_name: "TransportUsage",
                value: code.to_string(),
            })
    }
}

impl FromStr for TransportUsage {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|usage| usage.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| SettingsError::InvalidEnumerationValue {
                type_name: "TransportUsage",
                value: s.to_string(),
            })
    }
}
