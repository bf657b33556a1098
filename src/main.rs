// Main entry point - Dependency injection and server setup
use std::{collections::HashSet, net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use helmet_telemetry::application::dashboard_service::DashboardService;
use helmet_telemetry::application::engine::SimulationEngine;
use helmet_telemetry::infrastructure::config::{load_channels_config, load_helmets_config};
use helmet_telemetry::infrastructure::live_feed::LiveFeedStore;
use helmet_telemetry::presentation::app_state::AppState;
use helmet_telemetry::presentation::handlers::{
    get_dashboard, get_overview, health_check, ingest_reading, list_helmets, stream_dashboard,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load and validate configuration (fails fast on malformed settings)
    let channels_config = load_channels_config()?;
    let helmets_config = load_helmets_config(channels_config.simulation.max_helmets)?;
    let roster = helmets_config.roster();

    // Shared live-feed store (infrastructure layer)
    let live_feed = Arc::new(LiveFeedStore::new());

    // Simulation engine owns the state; services read through its handle
    let engine = SimulationEngine::new(channels_config.clone(), roster.clone(), live_feed.clone());
    let dashboard_service = DashboardService::new(channels_config.clone(), engine.state());

    let helmet_ids: HashSet<String> = roster.iter().map(|h| h.id.clone()).collect();
    let stream_interval = Duration::from_millis(channels_config.simulation.update_interval_ms);

    let state = Arc::new(AppState {
        dashboard_service,
        live_feed,
        helmet_ids,
        stream_interval,
    });

    // Spawn the tick loop
    tokio::spawn(engine.run());

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/helmets", get(list_helmets))
        .route("/overview", get(get_overview))
        .route("/helmets/:id/dashboard", get(get_dashboard))
        .route("/helmets/:id/stream", get(stream_dashboard))
        .route("/ingest", post(ingest_reading))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = channels_config.simulation.bind_addr.parse()?;
    tracing::info!("starting helmet-telemetry service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
