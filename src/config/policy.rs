//! Validation policies injected into [`TransportSettings`](super::TransportSettings).
//!
//! The bounds enforced here are not part of the settings contract itself, so
//! they live in a separate value that callers can replace.

use super::defaults::{default_keep_alive_interval, default_max_keep_alive_interval};
use super::error::{SettingsError, SubProtocolError};
use chrono::TimeDelta;

/// Characters RFC 2616 reserves as token separators, plus space and tab.
const HTTP_SEPARATORS: &str = "()<>@,;:\\\"/[]?={} \t";

/// Whether `ch` may appear in a sub-protocol token (RFC 6455 §4.1).
#[must_use]
pub fn is_rfc6455_token_char(ch: char) -> bool {
    matches!(ch, '\u{21}'..='\u{7e}') && !HTTP_SEPARATORS.contains(ch)
}

/// Character class and separator set used to validate a sub-protocol.
#[derive(Debug, Clone)]
pub struct SubProtocolRules {
    separators: Vec<char>,
    is_token_char: fn(char) -> bool,
}

impl Default for SubProtocolRules {
    fn default() -> Self {
        Self {
            separators: vec![','],
            is_token_char: is_rfc6455_token_char,
        }
    }
}

impl SubProtocolRules {
    pub fn new(separators: impl IntoIterator<Item = char>, is_token_char: fn(char) -> bool) -> Self {
        Self {
            separators: separators.into_iter().collect(),
            is_token_char,
        }
    }

    pub fn is_separator(&self, ch: char) -> bool {
        self.separators.contains(&ch)
    }

    pub fn is_valid_char(&self, ch: char) -> bool {
        (self.is_token_char)(ch)
    }

    /// Check that `value` is exactly one well-formed sub-protocol token.
    ///
    /// Separators are reported ahead of other invalid characters so a list
    /// such as `"a,b"` is identified as multiple protocols.
    pub fn check(&self, value: &str) -> Result<(), SubProtocolError> {
        if value.is_empty() {
            return Err(SubProtocolError::Empty);
        }

        if let Some(separator) = value.chars().find(|&ch| self.is_separator(ch)) {
            return Err(SubProtocolError::MultipleProtocols {
                value: value.to_string(),
                separator,
            });
        }

        if let Some(character) = value.chars().find(|&ch| !self.is_valid_char(ch)) {
            return Err(SubProtocolError::InvalidCharacter {
                value: value.to_string(),
                character,
            });
        }

        Ok(())
    }
}

/// Bounds applied by the validated setters.
///
/// Built through [`ValidationPolicy::new`], which refuses a ceiling the
/// default keep-alive interval would already exceed.
#[derive(Debug, Clone)]
pub struct ValidationPolicy {
    max_keep_alive_interval: TimeDelta,
    sub_protocol: SubProtocolRules,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            max_keep_alive_interval: default_max_keep_alive_interval(),
            sub_protocol: SubProtocolRules::default(),
        }
    }
}

impl ValidationPolicy {
    pub fn new(
        max_keep_alive_interval: TimeDelta,
        sub_protocol: SubProtocolRules,
    ) -> Result<Self, SettingsError> {
        if max_keep_alive_interval < default_keep_alive_interval() {
            return Err(SettingsError::OutOfRange {
                field: "max_keep_alive_interval",
                detail: format!(
                    "{} ms is below the default keep-alive of {} ms",
                    max_keep_alive_interval.num_milliseconds(),
                    default_keep_alive_interval().num_milliseconds()
                ),
            });
        }

        Ok(Self {
            max_keep_alive_interval,
            sub_protocol,
        })
    }

    /// Default sub-protocol rules with a custom keep-alive ceiling.
    pub fn with_max_keep_alive_interval(max: TimeDelta) -> Result<Self, SettingsError> {
        Self::new(max, SubProtocolRules::default())
    }

    /// Largest finite keep-alive interval accepted.
    pub fn max_keep_alive_interval(&self) -> TimeDelta {
        self.max_keep_alive_interval
    }

    pub fn sub_protocol_rules(&self) -> &SubProtocolRules {
        &self.sub_protocol
    }
}
