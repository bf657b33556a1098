// Application state for HTTP handlers
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use crate::application::dashboard_service::DashboardService;
use crate::infrastructure::live_feed::LiveFeedStore;

pub struct AppState {
    pub dashboard_service: DashboardService,
    pub live_feed: Arc<LiveFeedStore>,
    /// Known helmet ids, used to reject ingest for unknown hardware.
    pub helmet_ids: HashSet<String>,
    /// Cadence of SSE snapshot pushes, matching the simulation tick.
    pub stream_interval: Duration,
}
