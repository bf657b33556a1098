// Reading-source strategy: live feed vs synthetic generation
use chrono::{DateTime, Duration, Utc};

use crate::infrastructure::live_feed::LiveSample;

/// Where a helmet's readings come from for one tick. The choice is made
/// once per helmet per tick, so all six channels of that tick come from the
/// same source.
#[derive(Debug, Clone)]
pub enum ReadingSource {
    Live(LiveSample),
    Synthetic,
}

impl ReadingSource {
    pub fn is_live(&self) -> bool {
        matches!(self, ReadingSource::Live(_))
    }
}

/// Prefer the live feed while it is fresh; fall back to the generator once
/// the last sample is older than the staleness timeout.
pub fn select(
    sample: Option<LiveSample>,
    now: DateTime<Utc>,
    staleness_timeout: Duration,
) -> ReadingSource {
    match sample {
        Some(sample) if now - sample.received_at <= staleness_timeout => {
            ReadingSource::Live(sample)
        }
        _ => ReadingSource::Synthetic,
    }
}
