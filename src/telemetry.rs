use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

/// Initialize structured JSON logging. Correlation ids and span fields
/// end up as structured data for downstream aggregation.
pub fn init_telemetry() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true),
        )
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("copydesk telemetry initialized with structured logging");
    Ok(())
}

/// Generate a correlation ID for linking related operations.
pub fn generate_correlation_id() -> String {
    Uuid::new_v4().to_string()
}

/// Span carrying the common workflow fields.
pub fn create_workflow_span(
    operation: &str,
    content_key: Option<&str>,
    correlation_id: Option<&str>,
) -> tracing::Span {
    tracing::info_span!(
        "workflow",
        operation = operation,
        content.key = content_key,
        correlation.id = correlation_id,
        otel.kind = "internal"
    )
}

/// Shutdown telemetry gracefully.
pub fn shutdown_telemetry() {
    tracing::info!("copydesk telemetry shutdown complete");
}
