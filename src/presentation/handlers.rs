// HTTP request handlers
use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use futures::Stream;

use crate::infrastructure::live_feed::LivePayload;
use crate::presentation::app_state::AppState;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// List the helmet roster
pub async fn list_helmets(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.dashboard_service.roster().await)
}

#[derive(serde::Serialize)]
pub struct Overview {
    pub active_helmets: usize,
    pub alerting_helmets: usize,
    pub tiers: Vec<HelmetTier>,
}

#[derive(serde::Serialize)]
pub struct HelmetTier {
    pub helmet_id: String,
    pub worst_tier: crate::domain::safety::SafetyTier,
}

/// Fleet-wide status bar data: active and alerting helmet counts plus each
/// helmet's worst tier
pub async fn get_overview(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let roster = state.dashboard_service.roster().await;
    let active_helmets = roster.iter().filter(|h| !h.is_offline()).count();

    let tiers: Vec<HelmetTier> = state
        .dashboard_service
        .worst_tiers()
        .await
        .into_iter()
        .map(|(helmet_id, worst_tier)| HelmetTier {
            helmet_id,
            worst_tier,
        })
        .collect();
    let alerting_helmets = tiers.iter().filter(|t| t.worst_tier.is_alerting()).count();

    Json(Overview {
        active_helmets,
        alerting_helmets,
        tiers,
    })
}

/// One-shot dashboard snapshot for a helmet
pub async fn get_dashboard(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    match state.dashboard_service.snapshot(&id).await {
        Some(snapshot) => Json(snapshot).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Server-Sent Events stream of dashboard snapshots, one per tick interval
pub async fn stream_dashboard(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    if !state.helmet_ids.contains(&id) {
        return StatusCode::NOT_FOUND.into_response();
    }

    let service = state.dashboard_service.clone();
    let period = state.stream_interval;

    let stream: std::pin::Pin<Box<dyn Stream<Item = Result<Event, Infallible>> + Send>> =
        Box::pin(async_stream::stream! {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                let Some(snapshot) = service.snapshot(&id).await else {
                    break;
                };
                match Event::default().json_data(&snapshot) {
                    Ok(event) => yield Ok(event),
                    Err(e) => {
                        tracing::warn!(helmet_id = %id, "snapshot serialization failed: {e}");
                    }
                }
            }
        });

    Sse::new(stream).keep_alive(KeepAlive::default()).into_response()
}

/// Ingest a live sensor payload from helmet hardware
pub async fn ingest_reading(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LivePayload>,
) -> impl IntoResponse {
    if !state.helmet_ids.contains(&payload.helmet_id) {
        return StatusCode::NOT_FOUND;
    }

    tracing::debug!(helmet_id = %payload.helmet_id, "live sample received");
    state.live_feed.store(payload, Utc::now()).await;
    StatusCode::ACCEPTED
}
