//! Telemetry setup for OpenTelemetry integration

use crate::logging::BoxedLayer;
use anyhow::Result;

/// Build the OpenTelemetry layer if export is configured
///
/// # Environment Variables
///
/// - `OTEL_EXPORTER_OTLP_ENDPOINT`: OTLP/HTTP endpoint (e.g., http://localhost:4318)
/// - `OTEL_SERVICE_NAME`: Service name (default: queueup-daemon)
///
/// # Example
///
/// ```text
/// OTEL_EXPORTER_OTLP_ENDPOINT=http://localhost:4318 \
/// OTEL_SERVICE_NAME=queueup-dev \
///     ./queueup-daemon
/// ```
pub fn layer() -> Result<Option<BoxedLayer>> {
    match std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT") {
        Ok(endpoint) => otlp_layer(&endpoint),
        Err(_) => Ok(None),
    }
}

// The subscriber is not installed yet, so report on stderr
#[cfg(not(feature = "telemetry"))]
fn otlp_layer(endpoint: &str) -> Result<Option<BoxedLayer>> {
    eprintln!(
        "OTEL_EXPORTER_OTLP_ENDPOINT={} set but feature 'telemetry' not enabled; rebuild with --features telemetry",
        endpoint
    );
    Ok(None)
}

#[cfg(feature = "telemetry")]
fn otlp_layer(endpoint: &str) -> Result<Option<BoxedLayer>> {
    use opentelemetry::trace::TracerProvider as _;
    use opentelemetry_otlp::WithExportConfig;
    use opentelemetry_sdk::trace::TracerProvider;
    use tracing_subscriber::Layer;

    let service_name =
        std::env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| "queueup-daemon".to_string());

    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_http()
        .with_endpoint(endpoint)
        .build()?;

    let provider = TracerProvider::builder()
        .with_batch_exporter(exporter, opentelemetry_sdk::runtime::Tokio)
        .build();
    let tracer = provider.tracer(service_name);
    opentelemetry::global::set_tracer_provider(provider);

    Ok(Some(tracing_opentelemetry::layer().with_tracer(tracer).boxed()))
}

/// Flush batched spans and stop the exporter; no-op when export is off
pub fn shutdown() {
    #[cfg(feature = "telemetry")]
    opentelemetry::global::shutdown_tracer_provider();
}
