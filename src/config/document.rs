//! Serialized form of [`TransportSettings`].
//!
//! Loading goes through `TryFrom`, which replays every field through the
//! validated setters.

use super::defaults::{
    default_create_notification_on_connection, default_disable_payload_masking,
    default_keep_alive_interval, default_max_pending_connections, default_transport_usage,
    infinite_keep_alive_interval,
};
use super::error::SettingsError;
use super::settings::TransportSettings;
use super::usage::TransportUsage;
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

const INFINITE_KEYWORD: &str = "infinite";

/// Transport usage as written in a document: a member name or its numeric code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UsageRepr {
    Code(u64),
    Name(String),
}

/// Keep-alive as written in a document: milliseconds or `"infinite"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeepAliveRepr {
    Millis(i64),
    Keyword(String),
}

fn default_usage_repr() -> UsageRepr {
    UsageRepr::Name(default_transport_usage().as_str().to_string())
}

fn default_keep_alive_repr() -> KeepAliveRepr {
    KeepAliveRepr::Millis(default_keep_alive_interval().num_milliseconds())
}

/// Document shape of the `transport` configuration section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportSettingsDocument {
    #[serde(default = "default_usage_repr")]
    pub transport_usage: UsageRepr,
    #[serde(default = "default_create_notification_on_connection")]
    pub create_notification_on_connection: bool,
    #[serde(default = "default_keep_alive_repr")]
    pub keep_alive_interval_ms: KeepAliveRepr,
    #[serde(default)]
    pub sub_protocol: Option<String>,
    #[serde(default = "default_disable_payload_masking")]
    pub disable_payload_masking: bool,
    #[serde(default = "default_max_pending_connections")]
    pub max_pending_connections: i32,
}

impl TryFrom<UsageRepr> for TransportUsage {
    type Error = SettingsError;

    fn try_from(repr: UsageRepr) -> Result<Self, Self::Error> {
        match repr {
            UsageRepr::Code(code) => u8::try_from(code)
                .map_err(|_| SettingsError::InvalidEnumerationValue {
                    type_name: "TransportUsage",
                    value: code.to_string(),
                })
                .and_then(<Self as TryFrom<u8>>::try_from),
            UsageRepr::Name(name) => name.parse(),
        }
    }
}

impl TryFrom<KeepAliveRepr> for TimeDelta {
    type Error = SettingsError;

    fn try_from(repr: KeepAliveRepr) -> Result<Self, Self::Error> {
        match repr {
            KeepAliveRepr::Millis(ms) => {
                TimeDelta::try_milliseconds(ms).ok_or_else(|| SettingsError::OutOfRange {
                    field: "keep_alive_interval",
                    detail: format!("{ms} ms is not representable"),
                })
            }
            KeepAliveRepr::Keyword(word) if word.trim().eq_ignore_ascii_case(INFINITE_KEYWORD) => {
                Ok(infinite_keep_alive_interval())
            }
            KeepAliveRepr::Keyword(word) => Err(SettingsError::OutOfRange {
                field: "keep_alive_interval",
                detail: format!("`{word}` is neither milliseconds nor `{INFINITE_KEYWORD}`"),
            }),
        }
    }
}

impl TryFrom<TransportSettingsDocument> for TransportSettings {
    type Error = SettingsError;

    fn try_from(doc: TransportSettingsDocument) -> Result<Self, Self::Error> {
        let mut settings = Self::new();
        settings.set_transport_usage(doc.transport_usage.try_into()?);
        settings.set_create_notification_on_connection(doc.create_notification_on_connection);
        settings.set_keep_alive_interval(doc.keep_alive_interval_ms.try_into()?)?;
        settings.set_sub_protocol(doc.sub_protocol.as_deref())?;
        settings.set_disable_payload_masking(doc.disable_payload_masking);
        settings.set_max_pending_connections(doc.max_pending_connections)?;
        Ok(settings)
    }
}

impl From<TransportSettings> for TransportSettingsDocument {
    fn from(settings: TransportSettings) -> Self {
        let keep_alive_interval_ms = if settings.is_keep_alive_infinite() {
            KeepAliveRepr::Keyword(INFINITE_KEYWORD.to_string())
        } else {
            KeepAliveRepr::Millis(settings.keep_alive_interval().num_milliseconds())
        };

        Self {
            transport_usage: UsageRepr::Name(settings.transport_usage().as_str().to_string()),
            create_notification_on_connection: settings.create_notification_on_connection(),
            keep_alive_interval_ms,
            sub_protocol: settings.sub_protocol().map(str::to_string),
            disable_payload_masking: settings.disable_payload_masking(),
            max_pending_connections: settings.max_pending_connections(),
        }
    }
}
