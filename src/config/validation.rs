//! Configuration validation functions.

use super::Config;

/// Validate the loaded configuration.
///
/// Transport settings are valid by construction; only the sections that are
/// plain data are checked here.
pub fn validate_config(config: &Config) -> anyhow::Result<()> {
    config.logging.validate()?;
    Ok(())
}

/// Settings that are valid but deviate from a conformant WebSocket deployment.
pub fn config_warnings(config: &Config) -> Vec<String> {
    let transport = &config.transport;
    let mut warnings = Vec::new();

    if transport.disable_payload_masking() {
        warnings.push(
            "transport.disable_payload_masking=true violates RFC 6455; \
             only use it between trusted endpoints"
                .to_string(),
        );
    }

    if transport.is_keep_alive_infinite() {
        warnings.push(
            "transport.keep_alive_interval_ms is infinite; dead peers are only noticed on write"
                .to_string(),
        );
    }

    warnings
}
