//! Default value functions for configuration fields.
//!
//! These back both the process-wide [`TRANSPORT_DEFAULTS`] table read by
//! [`TransportSettings::new`](super::TransportSettings::new) and serde's
//! `#[serde(default = ...)]` attributes.

use super::logging::LogFormat;
use super::usage::TransportUsage;
use chrono::TimeDelta;
use std::sync::LazyLock;

// =============================================================================
// Timeouts
// =============================================================================

/// Keep-alive sentinel that disables liveness pinging.
pub fn infinite_keep_alive_interval() -> TimeDelta {
    TimeDelta::milliseconds(-1)
}

/// Largest timeout a transport timer can represent (`i32::MAX` milliseconds).
pub fn default_max_keep_alive_interval() -> TimeDelta {
    TimeDelta::milliseconds(i64::from(i32::MAX))
}

// =============================================================================
// Transport Defaults
// =============================================================================

pub const fn default_transport_usage() -> TransportUsage {
    TransportUsage::Never
}

pub const fn default_create_notification_on_connection() -> bool {
    false
}

pub fn default_keep_alive_interval() -> TimeDelta {
    TimeDelta::zero()
}

pub const fn default_sub_protocol() -> Option<&'static str> {
    None // no negotiation
}

pub const fn default_disable_payload_masking() -> bool {
    false
}

pub const fn default_max_pending_connections() -> i32 {
    0
}

/// Default values of every [`TransportSettings`](super::TransportSettings) field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportDefaults {
    pub transport_usage: TransportUsage,
    pub create_notification_on_connection: bool,
    pub keep_alive_interval: TimeDelta,
    pub sub_protocol: Option<&'static str>,
    pub disable_payload_masking: bool,
    pub max_pending_connections: i32,
}

/// Process-wide defaults table.
pub static TRANSPORT_DEFAULTS: LazyLock<TransportDefaults> = LazyLock::new(|| TransportDefaults {
    transport_usage: default_transport_usage(),
    create_notification_on_connection: default_create_notification_on_connection(),
    keep_alive_interval: default_keep_alive_interval(),
    sub_protocol: default_sub_protocol(),
    disable_payload_masking: default_disable_payload_masking(),
    max_pending_connections: default_max_pending_connections(),
});

// =============================================================================
// Logging Defaults
// =============================================================================

pub fn default_log_dir() -> String {
    "logs".to_string()
}

pub fn default_log_filename() -> String {
    "ws-transport.log".to_string()
}

pub fn default_rotation() -> String {
    "daily".to_string()
}

pub const fn default_enable_file_logging() -> bool {
    false
}

pub const fn default_log_format() -> LogFormat {
    LogFormat::Text
}
