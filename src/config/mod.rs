//! Configuration module.
//!
//! The core of this module is [`TransportSettings`], the validated value
//! object a WebSocket channel stack reads when it builds connections and
//! listeners. Around it sits the configuration document used by the CLI:
//!
//! - [`crate::config::defaults`]: Process-wide defaults table and default value functions
//! - [`usage`]: Transport usage policy enumeration
//! - [`error`]: Setting validation errors
//! - [`policy`]: Injectable validation bounds (keep-alive ceiling, sub-protocol token rules)
//! - [`settings`]: The `TransportSettings` value object
//! - [`document`]: Serialized form of `TransportSettings`
//! - [`logging`]: Logging configuration
//! - [`crate::config::types`]: Root `Config` struct
//! - [`crate::config::loader`]: Configuration loading functions
//! - [`crate::config::validation`]: Configuration validation functions

// Submodules
pub mod defaults;
pub mod document;
pub mod error;
pub mod loader;
pub mod logging;
pub mod policy;
pub mod settings;
pub mod types;
pub mod usage;
pub mod validation;

// Re-exports for convenience
pub use defaults::{infinite_keep_alive_interval, TransportDefaults, TRANSPORT_DEFAULTS};

pub use document::{KeepAliveRepr, TransportSettingsDocument, UsageRepr};

pub use error::{SettingsError, SubProtocolError};

pub use loader::load;

pub use logging::{LogFormat, LogLevel, LoggingConfig};

pub use policy::{is_rfc6455_token_char, SubProtocolRules, ValidationPolicy};

pub use settings::TransportSettings;

pub use types::Config;

pub use usage::TransportUsage;

pub use validation::{config_warnings, validate_config};
