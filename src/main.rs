#![cfg_attr(not(test), deny(clippy::panic))]

use clap::Parser;
use ws_transport_settings::config;
use ws_transport_settings::logging;

/// Load, validate and inspect WebSocket transport settings
#[derive(Parser, Debug)]
#[command(name = "ws-transport-settings")]
#[command(about = "Load, validate and inspect WebSocket transport settings")]
#[command(version)]
struct Cli {
    /// Validate configuration and exit.
    /// Useful for CI/CD pipelines and pre-deployment checks.
    #[arg(long, short = 'c', conflicts_with = "print_config")]
    validate_config: bool,

    /// Print the effective configuration to stdout (as JSON) and exit.
    #[arg(long, conflicts_with = "validate_config")]
    print_config: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cfg = match config::load() {
        Ok(cfg) => cfg,
        Err(e) if cli.validate_config => {
            eprintln!("Configuration validation failed:\n{e:#}");
            std::process::exit(1);
        }
        Err(e) => return Err(e),
    };

    if cli.print_config {
        let json = serde_json::to_string_pretty(&cfg)
            .map_err(|e| anyhow::anyhow!("Failed to serialize config: {e}"))?;
        println!("{json}");
        return Ok(());
    }

    let validation_result = config::validate_config(&cfg);
    let warnings = config::config_warnings(&cfg);

    if cli.validate_config {
        match validation_result {
            Ok(()) => {
                let transport = &cfg.transport;
                println!("Configuration validation passed");
                println!();
                println!("Transport settings:");
                println!("  Transport usage: {}", transport.transport_usage());
                println!(
                    "  Notify on connection: {}",
                    transport.create_notification_on_connection()
                );
                if transport.is_keep_alive_infinite() {
                    println!("  Keep-alive interval: infinite");
                } else {
                    println!(
                        "  Keep-alive interval: {} ms",
                        transport.keep_alive_interval().num_milliseconds()
                    );
                }
                println!(
                    "  Sub-protocol: {}",
                    transport.sub_protocol().unwrap_or("(none)")
                );
                println!(
                    "  Payload masking disabled: {}",
                    transport.disable_payload_masking()
                );
                println!(
                    "  Max pending connections: {}",
                    transport.max_pending_connections()
                );
                for warning in &warnings {
                    println!("WARNING: {warning}");
                }
                return Ok(());
            }
            Err(e) => {
                eprintln!("Configuration validation failed:\n{e:#}");
                std::process::exit(1);
            }
        }
    }

    validation_result?;

    // Held until return so the file appender flushes before exit.
    let _log_guard = logging::init_with_config(&cfg.logging);

    for warning in &warnings {
        tracing::warn!("{warning}");
    }

    let transport = &cfg.transport;
    tracing::info!(
        transport_usage = %transport.transport_usage(),
        create_notification_on_connection = transport.create_notification_on_connection(),
        keep_alive_ms = transport.keep_alive_interval().num_milliseconds(),
        keep_alive_infinite = transport.is_keep_alive_infinite(),
        sub_protocol = transport.sub_protocol().unwrap_or_default(),
        disable_payload_masking = transport.disable_payload_masking(),
        max_pending_connections = transport.max_pending_connections(),
        "Effective transport settings"
    );

    Ok(())
}
