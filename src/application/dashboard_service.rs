// Dashboard service - Use case for building helmet snapshots
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::application::engine::SimulationState;
use crate::domain::alert;
use crate::domain::channel::ChannelKind;
use crate::domain::dashboard::{ChannelSeries, DashboardSnapshot, MetricCard, SeriesPoint};
use crate::domain::helmet::Helmet;
use crate::domain::safety::SafetyTier;
use crate::infrastructure::config::ChannelsConfig;

#[derive(Clone)]
pub struct DashboardService {
    channels: ChannelsConfig,
    state: Arc<RwLock<SimulationState>>,
}

impl DashboardService {
    pub fn new(channels: ChannelsConfig, state: Arc<RwLock<SimulationState>>) -> Self {
        Self { channels, state }
    }

    pub async fn roster(&self) -> Vec<Helmet> {
        let state = self.state.read().await;
        state.helmets().to_vec()
    }

    /// Build one helmet's dashboard view from the latest readings. Returns
    /// `None` for unknown helmet ids.
    pub async fn snapshot(&self, helmet_id: &str) -> Option<DashboardSnapshot> {
        let state = self.state.read().await;
        let helmet = state.helmet(helmet_id)?.clone();

        let mut cards = Vec::with_capacity(ChannelKind::ALL.len());
        let mut series = Vec::with_capacity(ChannelKind::ALL.len());
        let mut classified = Vec::with_capacity(ChannelKind::ALL.len());

        for channel in ChannelKind::ALL {
            let thresholds = &self.channels.channel(channel).thresholds;
            let value = state.latest_value(helmet_id, channel).unwrap_or(0.0);
            let tier = thresholds.classify(value);

            cards.push(MetricCard::new(channel, value, tier));
            classified.push((channel, value, tier));

            let points = state
                .history(helmet_id, channel)
                .map(|history| {
                    history
                        .iter()
                        .map(|reading| SeriesPoint {
                            timestamp: reading.timestamp,
                            value: reading.value,
                        })
                        .collect()
                })
                .unwrap_or_default();
            series.push(ChannelSeries { channel, points });
        }

        let now = Utc::now();
        let alert = alert::evaluate(helmet_id, &classified, now);
        if let Some(ref alert) = alert {
            tracing::warn!(
                helmet_id,
                tier = alert.worst_tier.label(),
                reasons = alert.reasons.len(),
                "helmet alerting"
            );
        }

        Some(DashboardSnapshot {
            helmet_id: helmet.id.clone(),
            miner: helmet.miner.clone(),
            location: helmet.location.clone(),
            status: helmet.status,
            generated_at: now,
            cards,
            series,
            alert,
        })
    }

    /// Tier summary across the whole roster, used by the status bar.
    pub async fn worst_tiers(&self) -> Vec<(String, SafetyTier)> {
        let state = self.state.read().await;
        state
            .helmets()
            .iter()
            .map(|helmet| {
                let worst = ChannelKind::ALL
                    .iter()
                    .map(|&channel| {
                        let thresholds = &self.channels.channel(channel).thresholds;
                        let value = state.latest_value(&helmet.id, channel).unwrap_or(0.0);
                        thresholds.classify(value)
                    })
                    .max()
                    .unwrap_or(SafetyTier::Offline);
                (helmet.id.clone(), worst)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::engine::SimulationEngine;
    use crate::domain::helmet::HelmetStatus;
    use crate::infrastructure::config::test_fixtures::channels_config;
    use crate::infrastructure::live_feed::{LiveFeedStore, LivePayload};

    fn roster() -> Vec<Helmet> {
        vec![
            Helmet::new(
                "HELMET_001".to_string(),
                "John Smith".to_string(),
                "Tunnel A-1".to_string(),
                HelmetStatus::Active,
            ),
            Helmet::new(
                "HELMET_006".to_string(),
                "Lisa Wilson".to_string(),
                "Tunnel C-2".to_string(),
                HelmetStatus::Offline,
            ),
        ]
    }

    #[tokio::test]
    async fn test_unknown_helmet_is_none() {
        let engine = SimulationEngine::with_seed(
            channels_config(),
            roster(),
            Arc::new(LiveFeedStore::new()),
            1,
        );
        let service = DashboardService::new(channels_config(), engine.state());
        assert!(service.snapshot("HELMET_999").await.is_none());
    }

    #[tokio::test]
    async fn test_offline_helmet_cards_are_offline() {
        let mut engine = SimulationEngine::with_seed(
            channels_config(),
            roster(),
            Arc::new(LiveFeedStore::new()),
            1,
        );
        engine.tick(Utc::now()).await;

        let service = DashboardService::new(channels_config(), engine.state());
        let snapshot = service.snapshot("HELMET_006").await.unwrap();
        assert_eq!(snapshot.cards.len(), 6);
        for card in &snapshot.cards {
            assert_eq!(card.tier, SafetyTier::Offline);
            assert_eq!(card.color, "#6c757d");
        }
        assert!(snapshot.alert.is_none());
    }

    #[tokio::test]
    async fn test_dangerous_live_reading_raises_alert() {
        let live_feed = Arc::new(LiveFeedStore::new());
        let mut engine = SimulationEngine::with_seed(
            channels_config(),
            roster(),
            live_feed.clone(),
            1,
        );

        let now = Utc::now();
        live_feed
            .store(
                LivePayload {
                    helmet_id: "HELMET_001".to_string(),
                    co2: 1350.0,
                    ch4: 0.8,
                    o2: 20.5,
                    h2s: 3.0,
                    temp: 28.0,
                    humidity: 72.0,
                    timestamp: None,
                },
                now,
            )
            .await;
        engine.tick(now).await;

        let service = DashboardService::new(channels_config(), engine.state());
        let snapshot = service.snapshot("HELMET_001").await.unwrap();

        let co2_card = snapshot
            .cards
            .iter()
            .find(|c| c.channel == ChannelKind::Co2)
            .unwrap();
        assert_eq!(co2_card.tier, SafetyTier::Critical);
        assert_eq!(co2_card.color, "#dc3545");

        let alert = snapshot.alert.unwrap();
        assert_eq!(alert.worst_tier, SafetyTier::Critical);
        assert!(alert.reasons.iter().any(|r| r.contains("Carbon Dioxide")));
    }

    #[tokio::test]
    async fn test_series_track_history() {
        let mut engine = SimulationEngine::with_seed(
            channels_config(),
            roster(),
            Arc::new(LiveFeedStore::new()),
            1,
        );
        for _ in 0..4 {
            engine.tick(Utc::now()).await;
        }

        let service = DashboardService::new(channels_config(), engine.state());
        let snapshot = service.snapshot("HELMET_001").await.unwrap();
        for series in &snapshot.series {
            assert_eq!(series.points.len(), 4);
        }
    }
}
