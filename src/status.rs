//! Status surface (AMBIENT): a tiny axum router exposing `/health` and
//! `/status`, grounded in the teacher's `health_handler`/`status_handler`
//! pattern — unauthenticated liveness probe plus a richer JSON detail
//! view, generalized from per-backend RPC health to per-source poller
//! health.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use axum::routing::get;
use axum::Router;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceHealth {
    Healthy,
    Degraded,
}

#[derive(Debug, Clone)]
struct SourceStatus {
    health: SourceHealth,
    last_cycle_at: Option<Instant>,
    last_error: Option<String>,
    consecutive_failures: u32,
}

impl Default for SourceStatus {
    fn default() -> Self {
        Self { health: SourceHealth::Healthy, last_cycle_at: None, last_error: None, consecutive_failures: 0 }
    }
}

/// Shared handle every poller reports its cycle outcome to; the status
/// router reads the same handle to answer `/health` and `/status`.
#[derive(Clone, Default)]
pub struct StatusBoard {
    sources: Arc<RwLock<std::collections::HashMap<String, SourceStatus>>>,
}

impl StatusBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn record_success(&self, source_id: &str) {
        let mut sources = self.sources.write().await;
        let entry = sources.entry(source_id.to_string()).or_default();
        entry.health = SourceHealth::Healthy;
        entry.last_cycle_at = Some(Instant::now());
        entry.last_error = None;
        entry.consecutive_failures = 0;
    }

    pub async fn record_failure(&self, source_id: &str, error: impl std::fmt::Display) {
        let mut sources = self.sources.write().await;
        let entry = sources.entry(source_id.to_string()).or_default();
        entry.health = SourceHealth::Degraded;
        entry.last_cycle_at = Some(Instant::now());
        entry.last_error = Some(error.to_string());
        entry.consecutive_failures += 1;
    }

    async fn all_healthy(&self) -> bool {
        self.sources.read().await.values().all(|s| s.health == SourceHealth::Healthy)
    }

    /// True once `source_id` has reported at least one cycle and its
    /// most recent report was a success. Unreported sources read healthy
    /// (nothing has failed yet), matching `all_healthy`'s empty-board case.
    pub async fn is_healthy(&self, source_id: &str) -> bool {
        self.sources.read().await.get(source_id).map(|s| s.health == SourceHealth::Healthy).unwrap_or(true)
    }
}

pub fn router(board: StatusBoard) -> Router {
    Router::new().route("/health", get(health_handler)).route("/status", get(status_handler)).with_state(board)
}

async fn health_handler(State(board): State<StatusBoard>) -> impl IntoResponse {
    if board.all_healthy().await {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    }
}

async fn status_handler(State(board): State<StatusBoard>) -> impl IntoResponse {
    let sources = board.sources.read().await;
    let body: Vec<_> = sources
        .iter()
        .map(|(id, status)| {
            serde_json::json!({
                "source_id": id,
                "health": match status.health { SourceHealth::Healthy => "healthy", SourceHealth::Degraded => "degraded" },
                "last_cycle_age_secs": status.last_cycle_at.map(|t| t.elapsed().as_secs()),
                "last_error": status.last_error,
                "consecutive_failures": status.consecutive_failures,
            })
        })
        .collect();

    (StatusCode::OK, Json(serde_json::json!({"sources": body})))
}
