//! Tracing subscriber setup

use crate::config::{DaemonConfig, LogFormat};
use crate::telemetry;
use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::{Layered, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

/// Output layer stacked on top of the env filter
pub type BoxedLayer = Box<dyn Layer<Layered<EnvFilter, Registry>> + Send + Sync>;

const DEFAULT_FILTER: &str = "queueup=info";
const LOG_FILE_PREFIX: &str = "queueup-daemon.log";

/// Install the global subscriber
///
/// The returned guard flushes the file writer on drop; hold it until exit.
pub fn init(config: &DaemonConfig) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))
        .context("Failed to create env filter")?;

    let mut layers: Vec<BoxedLayer> = Vec::new();

    layers.push(match config.log_format {
        // Production: JSON structured logging
        LogFormat::Json => fmt::layer().json().boxed(),
        // Development: Pretty formatting with colors
        LogFormat::Pretty => fmt::layer().pretty().boxed(),
    });

    let guard = match &config.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(
                shellexpand::tilde(dir).into_owned(),
                LOG_FILE_PREFIX,
            );
            let (writer, guard) = tracing_appender::non_blocking(appender);
            layers.push(
                fmt::layer()
                    .json()
                    .with_ansi(false)
                    .with_writer(writer)
                    .boxed(),
            );
            Some(guard)
        }
        None => None,
    };

    if let Some(otel) = telemetry::layer()? {
        layers.push(otel);
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layers)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}
