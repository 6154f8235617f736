//! Subscriber setup for the CLI.
//!
//! Console output always goes to stderr so it never interleaves with the
//! JSON printed by `--print-config`. File output is optional and written
//! through a non-blocking appender whose [`WorkerGuard`] the caller holds.

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::{time::UtcTime, MakeWriter};
use tracing_subscriber::{prelude::*, EnvFilter, Layer, Registry};

use crate::config::{LogFormat, LoggingConfig};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Install the global subscriber.
///
/// Level precedence: `logging.level` > `RUST_LOG` > "info". Keep the returned
/// guard alive until the process is done logging; dropping it flushes the
/// file appender.
#[must_use = "dropping the guard stops file logging"]
pub fn init_with_config(cfg: &LoggingConfig) -> Option<WorkerGuard> {
    let env_filter = match &cfg.level {
        Some(level) => EnvFilter::new(level.as_str()),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    let mut layers = vec![fmt_layer(cfg.format, std::io::stderr, true)];
    let mut guard = None;

    if cfg.enable_file_logging {
        match file_writer(cfg) {
            Ok((writer, file_guard)) => {
                layers.push(fmt_layer(cfg.format, writer, false));
                guard = Some(file_guard);
            }
            Err(err) => eprintln!(
                "Failed to open log directory '{}' ({err}), continuing with console logs",
                cfg.dir
            ),
        }
    }

    let _ = tracing_subscriber::registry()
        .with(layers)
        .with(env_filter)
        .try_init();
    guard
}

fn fmt_layer<W>(format: LogFormat, writer: W, ansi: bool) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = tracing_subscriber::fmt::layer()
        .with_ansi(ansi)
        .with_timer(UtcTime::rfc_3339())
        .with_writer(writer);

    match format {
        LogFormat::Json => layer.json().with_ansi(false).boxed(),
        LogFormat::Text => layer.boxed(),
    }
}

fn file_writer(cfg: &LoggingConfig) -> std::io::Result<(NonBlocking, WorkerGuard)> {
    std::fs::create_dir_all(&cfg.dir)?;
    let appender = RollingFileAppender::new(rotation_for(cfg), &cfg.dir, &cfg.filename);
    Ok(tracing_appender::non_blocking(appender))
}

fn rotation_for(cfg: &LoggingConfig) -> Rotation {
    match cfg.rotation.trim().to_lowercase().as_str() {
        "hourly" => Rotation::HOURLY,
        "never" => Rotation::NEVER,
        _ => Rotation::DAILY,
    }
}
