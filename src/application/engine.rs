// Simulation engine - owns the tick loop and the shared state
use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::application::source::{self, ReadingSource};
use crate::domain::channel::ChannelKind;
use crate::domain::generator::ReadingGenerator;
use crate::domain::helmet::Helmet;
use crate::domain::reading::{Reading, ReadingHistory};
use crate::infrastructure::config::ChannelsConfig;
use crate::infrastructure::live_feed::LiveFeedStore;

/// All per-helmet history buffers, owned explicitly rather than living in a
/// process-wide singleton. One instance per server, or per test.
#[derive(Debug)]
pub struct SimulationState {
    helmets: Vec<Helmet>,
    histories: HashMap<String, HashMap<ChannelKind, ReadingHistory>>,
}

impl SimulationState {
    pub fn new(helmets: Vec<Helmet>, capacity: usize) -> Self {
        let histories = helmets
            .iter()
            .map(|helmet| {
                let per_channel = ChannelKind::ALL
                    .iter()
                    .map(|&channel| (channel, ReadingHistory::new(capacity)))
                    .collect();
                (helmet.id.clone(), per_channel)
            })
            .collect();
        Self { helmets, histories }
    }

    pub fn helmets(&self) -> &[Helmet] {
        &self.helmets
    }

    pub fn helmet(&self, id: &str) -> Option<&Helmet> {
        self.helmets.iter().find(|h| h.id == id)
    }

    pub fn history(&self, helmet_id: &str, channel: ChannelKind) -> Option<&ReadingHistory> {
        self.histories.get(helmet_id)?.get(&channel)
    }

    pub fn latest_value(&self, helmet_id: &str, channel: ChannelKind) -> Option<f64> {
        self.history(helmet_id, channel)?.latest().map(|r| r.value)
    }

    fn append(&mut self, helmet_id: &str, reading: Reading) {
        if let Some(per_channel) = self.histories.get_mut(helmet_id) {
            if let Some(history) = per_channel.get_mut(&reading.channel) {
                history.push(reading);
            }
        }
    }
}

/// Drives the simulation: once per tick it resolves each helmet's reading
/// source (fresh live feed or synthetic generator), produces one reading per
/// channel, and appends it to the history buffers. The engine is the sole
/// writer of `SimulationState`; dashboard consumers read through the shared
/// handle.
pub struct SimulationEngine {
    channels: ChannelsConfig,
    state: Arc<RwLock<SimulationState>>,
    live_feed: Arc<LiveFeedStore>,
    generator: ReadingGenerator,
    staleness_timeout: chrono::Duration,
}

impl SimulationEngine {
    pub fn new(
        channels: ChannelsConfig,
        roster: Vec<Helmet>,
        live_feed: Arc<LiveFeedStore>,
    ) -> Self {
        Self::build(channels, roster, live_feed, ReadingGenerator::new())
    }

    /// Seeded engine for reproducible runs.
    pub fn with_seed(
        channels: ChannelsConfig,
        roster: Vec<Helmet>,
        live_feed: Arc<LiveFeedStore>,
        seed: u64,
    ) -> Self {
        Self::build(channels, roster, live_feed, ReadingGenerator::with_seed(seed))
    }

    fn build(
        channels: ChannelsConfig,
        roster: Vec<Helmet>,
        live_feed: Arc<LiveFeedStore>,
        generator: ReadingGenerator,
    ) -> Self {
        let capacity = channels.simulation.buffer_capacity;
        let staleness_timeout =
            chrono::Duration::seconds(channels.simulation.staleness_timeout_secs as i64);
        Self {
            channels,
            state: Arc::new(RwLock::new(SimulationState::new(roster, capacity))),
            live_feed,
            generator,
            staleness_timeout,
        }
    }

    /// Shared read handle for dashboard and alerting consumers.
    pub fn state(&self) -> Arc<RwLock<SimulationState>> {
        self.state.clone()
    }

    /// Produce one reading per helmet per channel.
    pub async fn tick(&mut self, now: DateTime<Utc>) {
        let roster: Vec<Helmet> = {
            let state = self.state.read().await;
            state.helmets().to_vec()
        };

        // Resolve sources before taking the write lock; the source choice is
        // atomic per helmet per tick.
        let mut sources = Vec::with_capacity(roster.len());
        for helmet in &roster {
            let source = if helmet.is_offline() {
                ReadingSource::Synthetic
            } else {
                let sample = self.live_feed.latest(&helmet.id).await;
                source::select(sample, now, self.staleness_timeout)
            };
            sources.push(source);
        }

        let mut live_count = 0usize;
        let mut state = self.state.write().await;
        for (helmet, source) in roster.iter().zip(&sources) {
            if source.is_live() {
                live_count += 1;
            }
            for channel in ChannelKind::ALL {
                let profile = &self.channels.channel(channel).profile;
                let value = match source {
                    ReadingSource::Live(sample) => {
                        profile.quantize(sample.payload.value(channel))
                    }
                    ReadingSource::Synthetic => {
                        let previous = state.latest_value(&helmet.id, channel);
                        self.generator.next_value(profile, previous, helmet.status)
                    }
                };
                state.append(&helmet.id, Reading::new(channel, value, now));
            }
        }

        tracing::debug!(
            helmets = roster.len(),
            live = live_count,
            synthetic = roster.len() - live_count,
            "tick complete"
        );
    }

    /// Run the periodic tick loop forever.
    pub async fn run(mut self) {
        let period = std::time::Duration::from_millis(self.channels.simulation.update_interval_ms);
        tracing::info!(period_ms = period.as_millis() as u64, "starting simulation loop");

        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            self.tick(Utc::now()).await;
        }
    }
}
