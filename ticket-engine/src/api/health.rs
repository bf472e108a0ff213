use crate::adapters::{AdapterRegistry, HealthStatus};
use axum::extract::State;
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize)]
pub struct AdapterHealth {
    pub platform: String,
    pub status: &'static str,
}

#[derive(Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub adapters: Vec<AdapterHealth>,
}

fn status_label(status: HealthStatus) -> &'static str {
    match status {
        HealthStatus::Healthy => "healthy",
        HealthStatus::Degraded => "degraded",
        HealthStatus::Down => "down",
    }
}

async fn health_handler(State(registry): State<Arc<AdapterRegistry>>) -> Json<HealthReport> {
    let mut adapters = Vec::new();
    let mut overall = "healthy";
    for adapter in registry.all() {
        let status = adapter.health_status().await;
        if !matches!(status, HealthStatus::Healthy) {
            overall = "degraded";
        }
        adapters.push(AdapterHealth { platform: adapter.platform_name().to_string(), status: status_label(status) });
    }
    Json(HealthReport { status: overall, adapters })
}

async fn metrics_handler() -> String {
    use prometheus::Encoder;
    let encoder = prometheus::TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer).unwrap_or_default();
    String::from_utf8(buffer).unwrap_or_default()
}

/// §10.5: the health/metrics HTTP surface.
pub fn router(registry: Arc<AdapterRegistry>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_registry_is_reported_healthy() {
        let registry = Arc::new(AdapterRegistry::new());
        let report = health_handler(State(registry)).await;
        assert_eq!(report.0.status, "healthy");
        assert!(report.0.adapters.is_empty());
    }
}
