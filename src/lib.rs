#![cfg_attr(not(test), deny(clippy::panic))]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

//! # WebSocket Transport Settings
//!
//! Validated settings describing how a channel-based transport negotiates and
//! operates WebSocket connections: transport usage, keep-alive cadence,
//! sub-protocol selection, payload masking, and the pending-connection backlog.

/// Transport settings, defaults, and configuration loading
pub mod config;

/// Structured logging configuration
pub mod logging;

/// Message-action and header tokens of the WebSocket transport
pub mod protocol;

pub use config::{SettingsError, TransportSettings, TransportUsage};
