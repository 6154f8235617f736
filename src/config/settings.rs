//! WebSocket transport settings.

use super::defaults::{infinite_keep_alive_interval, TRANSPORT_DEFAULTS};
use super::document::TransportSettingsDocument;
use super::error::SettingsError;
use super::policy::ValidationPolicy;
use super::usage::TransportUsage;
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::time::Duration;

const NANOS_PER_MILLI: i32 = 1_000_000;

/// How a channel-based transport negotiates and operates a WebSocket connection.
///
/// Fields are private and only change through the `set_*` methods, which
/// validate before assigning: a rejected write leaves the previous value in
/// place. Listeners and channel factories should take a [`duplicate`] of a
/// shared instance rather than holding on to it, so later edits to the
/// shared copy do not leak into connections already configured.
///
/// Equality ignores the casing of the sub-protocol and the injected
/// [`ValidationPolicy`].
///
/// [`duplicate`]: TransportSettings::duplicate
#[derive(Debug, Serialize, Deserialize)]
#[serde(try_from = "TransportSettingsDocument", into = "TransportSettingsDocument")]
pub struct TransportSettings {
    transport_usage: TransportUsage,
    create_notification_on_connection: bool,
    keep_alive_interval: TimeDelta,
    sub_protocol: Option<String>,
    disable_payload_masking: bool,
    max_pending_connections: i32,
    policy: Arc<ValidationPolicy>,
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl TransportSettings {
    /// Settings populated from the process-wide defaults table.
    #[must_use]
    pub fn new() -> Self {
        Self::with_policy(ValidationPolicy::default())
    }

    /// Default settings whose setters enforce `policy`.
    ///
    /// A [`ValidationPolicy`] can only be built with a ceiling at or above the
    /// default keep-alive, so the defaults always satisfy `policy`.
    #[must_use]
    pub fn with_policy(policy: impl Into<Arc<ValidationPolicy>>) -> Self {
        let defaults = &*TRANSPORT_DEFAULTS;
        Self {
            transport_usage: defaults.transport_usage,
            create_notification_on_connection: defaults.create_notification_on_connection,
            keep_alive_interval: defaults.keep_alive_interval,
            sub_protocol: defaults.sub_protocol.map(str::to_string),
            disable_payload_masking: defaults.disable_payload_masking,
            max_pending_connections: defaults.max_pending_connections,
            policy: policy.into(),
        }
    }

    /// Copy every field into a new instance through the validated setters.
    ///
    /// The copy shares only the immutable policy with `self`.
    pub fn duplicate(&self) -> Result<Self, SettingsError> {
        let mut copy = Self::with_policy(Arc::clone(&self.policy));
        copy.set_transport_usage(self.transport_usage);
        copy.set_create_notification_on_connection(self.create_notification_on_connection);
        copy.set_keep_alive_interval(self.keep_alive_interval)?;
        copy.set_sub_protocol(self.sub_protocol())?;
        copy.set_disable_payload_masking(self.disable_payload_masking);
        copy.set_max_pending_connections(self.max_pending_connections)?;
        Ok(copy)
    }

    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    pub fn transport_usage(&self) -> TransportUsage {
        self.transport_usage
    }

    pub fn set_transport_usage(&mut self, usage: TransportUsage) {
        self.transport_usage = usage;
    }

    /// Set the usage from its numeric code.
    pub fn set_transport_usage_value(&mut self, code: u8) -> Result<(), SettingsError> {
        let usage = TransportUsage::try_from(code).map_err(|err| rejected("transport_usage", err))?;
        self.transport_usage = usage;
        Ok(())
    }

    /// Whether a notification message is raised when a connection opens.
    pub fn create_notification_on_connection(&self) -> bool {
        self.create_notification_on_connection
    }

    pub fn set_create_notification_on_connection(&mut self, enabled: bool) {
        self.create_notification_on_connection = enabled;
    }

    pub fn keep_alive_interval(&self) -> TimeDelta {
        self.keep_alive_interval
    }

    /// Set the ping interval.
    ///
    /// Accepts zero, any positive whole number of milliseconds up to the
    /// policy maximum, and [`infinite_keep_alive_interval`].
    pub fn set_keep_alive_interval(&mut self, interval: TimeDelta) -> Result<(), SettingsError> {
        if interval < TimeDelta::zero() && interval != infinite_keep_alive_interval() {
            return Err(rejected(
                "keep_alive_interval",
                SettingsError::OutOfRange {
                    field: "keep_alive_interval",
                    detail: format!(
                        "{} ms is negative and not the infinite sentinel",
                        interval.num_milliseconds()
                    ),
                },
            ));
        }

        if interval.subsec_nanos() % NANOS_PER_MILLI != 0 {
            return Err(rejected(
                "keep_alive_interval",
                SettingsError::OutOfRange {
                    field: "keep_alive_interval",
                    detail: format!("{interval} is not a whole number of milliseconds"),
                },
            ));
        }

        let max = self.policy.max_keep_alive_interval();
        if interval > max {
            return Err(rejected(
                "keep_alive_interval",
                SettingsError::OutOfRange {
                    field: "keep_alive_interval",
                    detail: format!(
                        "{} ms exceeds the maximum of {} ms",
                        interval.num_milliseconds(),
                        max.num_milliseconds()
                    ),
                },
            ));
        }

        self.keep_alive_interval = interval;
        Ok(())
    }

    pub fn is_keep_alive_infinite(&self) -> bool {
        self.keep_alive_interval == infinite_keep_alive_interval()
    }

    /// Period between liveness pings, or `None` when pinging is disabled.
    pub fn keep_alive_period(&self) -> Option<Duration> {
        if self.is_keep_alive_infinite() || self.keep_alive_interval.is_zero() {
            return None;
        }
        self.keep_alive_interval.to_std().ok()
    }

    /// Negotiated sub-protocol, in the casing it was set with.
    pub fn sub_protocol(&self) -> Option<&str> {
        self.sub_protocol.as_deref()
    }

    /// Set or clear (`None`) the sub-protocol.
    pub fn set_sub_protocol(&mut self, sub_protocol: Option<&str>) -> Result<(), SettingsError> {
        if let Some(value) = sub_protocol {
            self.policy.sub_protocol_rules().check(value).map_err(|reason| {
                rejected(
                    "sub_protocol",
                    SettingsError::InvalidArgument {
                        field: "sub_protocol",
                        reason,
                    },
                )
            })?;
        }

        self.sub_protocol = sub_protocol.map(str::to_string);
        Ok(())
    }

    pub fn disable_payload_masking(&self) -> bool {
        self.disable_payload_masking
    }

    pub fn set_disable_payload_masking(&mut self, disabled: bool) {
        self.disable_payload_masking = disabled;
    }

    pub fn max_pending_connections(&self) -> i32 {
        self.max_pending_connections
    }

    pub fn set_max_pending_connections(&mut self, limit: i32) -> Result<(), SettingsError> {
        if limit < 0 {
            return Err(rejected(
                "max_pending_connections",
                SettingsError::OutOfRange {
                    field: "max_pending_connections",
                    detail: format!("{limit} is negative"),
                },
            ));
        }

        self.max_pending_connections = limit;
        Ok(())
    }
}

fn rejected(field: &'static str, err: SettingsError) -> SettingsError {
    tracing::debug!(field, error = %err, "Rejected transport setting");
    err
}

fn fold_case(value: &str) -> impl Iterator<Item = char> + '_ {
    value.chars().flat_map(char::to_lowercase)
}

fn sub_protocols_match(left: Option<&str>, right: Option<&str>) -> bool {
    match (left, right) {
        (None, None) => true,
        (Some(left), Some(right)) => fold_case(left).eq(fold_case(right)),
        _ => false,
    }
}

impl Clone for TransportSettings {
    // SAFETY: `self` starts from defaults that every `ValidationPolicy`
    // admits, and each later write was checked against the same policy the
    // copy validates against, so `duplicate` cannot fail.
    #[allow(clippy::expect_used)]
    fn clone(&self) -> Self {
        self.duplicate()
            .expect("fields of live settings always satisfy their own policy")
    }
}

impl PartialEq for TransportSettings {
    fn eq(&self, other: &Self) -> bool {
        self.transport_usage == other.transport_usage
            && self.create_notification_on_connection == other.create_notification_on_connection
            && self.keep_alive_interval == other.keep_alive_interval
            && self.disable_payload_masking == other.disable_payload_masking
            && self.max_pending_connections == other.max_pending_connections
            && sub_protocols_match(self.sub_protocol(), other.sub_protocol())
    }
}

impl Eq for TransportSettings {}

/// Feeds each field into the one hasher rather than XOR-ing per-field hashes;
/// equal values still hash equally and sub-protocol case is folded first.
impl Hash for TransportSettings {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.transport_usage.hash(state);
        self.create_notification_on_connection.hash(state);
        self.keep_alive_interval.hash(state);
        self.disable_payload_masking.hash(state);
        self.max_pending_connections.hash(state);
        if let Some(sub_protocol) = &self.sub_protocol {
            for ch in fold_case(sub_protocol) {
                ch.hash(state);
            }
        }
    }
}
