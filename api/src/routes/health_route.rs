//! GET /health: model probes plus index and session counters. Never fails.

use ai_llm_service::health_service::HealthStatus;
use axum::{Json, extract::State};
use chrono::{SecondsFormat, Utc};
use rag_store::IndexStats;
use serde::Serialize;

use crate::core::app_state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `"ok"` when every probe passed, otherwise `"degraded"`.
    pub status: &'static str,
    pub checked_at: String,
    pub index: IndexStats,
    pub sessions: usize,
    pub models: Vec<HealthStatus>,
}

pub async fn health_route(State(state): State<AppState>) -> Json<HealthResponse> {
    let models = match &state.llm {
        Some(llm) => llm.health_all().await,
        None => Vec::new(),
    };
    let status = if models.iter().all(|m| m.ok) {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status,
        checked_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        index: state.assistant.chain().store().stats(),
        sessions: state.assistant.sessions().len(),
        models,
    })
}
