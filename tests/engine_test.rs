// End-to-end simulation tests against the shipped configuration
use std::sync::Arc;

use chrono::Utc;

use helmet_telemetry::application::dashboard_service::DashboardService;
use helmet_telemetry::application::engine::SimulationEngine;
use helmet_telemetry::domain::channel::ChannelKind;
use helmet_telemetry::domain::safety::SafetyTier;
use helmet_telemetry::infrastructure::config::{
    load_channels_config, load_helmets_config, ChannelsConfig,
};
use helmet_telemetry::infrastructure::live_feed::{LiveFeedStore, LivePayload};

fn shipped_config() -> ChannelsConfig {
    load_channels_config().expect("shipped channels config should validate")
}

fn seeded_engine(seed: u64, live_feed: Arc<LiveFeedStore>) -> SimulationEngine {
    let channels = shipped_config();
    let helmets = load_helmets_config(channels.simulation.max_helmets)
        .expect("shipped helmet roster should validate");
    SimulationEngine::with_seed(channels, helmets.roster(), live_feed, seed)
}

#[tokio::test]
async fn simulation_respects_clamps_and_buffer_bounds() {
    let channels = shipped_config();
    let capacity = channels.simulation.buffer_capacity;
    let mut engine = seeded_engine(1, Arc::new(LiveFeedStore::new()));

    for _ in 0..capacity + 40 {
        engine.tick(Utc::now()).await;
    }

    let state = engine.state();
    let state = state.read().await;
    for channel in ChannelKind::ALL {
        let profile = &channels.channel(channel).profile;
        let history = state.history("HELMET_001", channel).unwrap();
        assert_eq!(history.len(), capacity);
        for reading in history.iter() {
            assert!(
                (profile.clamp_min..=profile.clamp_max).contains(&reading.value),
                "{:?} value {} escaped [{}, {}]",
                channel,
                reading.value,
                profile.clamp_min,
                profile.clamp_max
            );
        }
    }
}

#[tokio::test]
async fn offline_helmet_is_zero_and_classified_offline() {
    let mut engine = seeded_engine(2, Arc::new(LiveFeedStore::new()));
    engine.tick(Utc::now()).await;

    let channels = shipped_config();
    let service = DashboardService::new(channels, engine.state());

    // HELMET_006 ships as OFFLINE in the roster
    let snapshot = service.snapshot("HELMET_006").await.unwrap();
    for card in &snapshot.cards {
        assert_eq!(card.value, 0.0);
        assert_eq!(card.tier, SafetyTier::Offline);
    }
    assert!(snapshot.alert.is_none());
}

#[tokio::test]
async fn identical_seeds_yield_identical_runs() {
    let now = Utc::now();
    let mut runs = Vec::new();

    for _ in 0..2 {
        let mut engine = seeded_engine(99, Arc::new(LiveFeedStore::new()));
        for _ in 0..60 {
            engine.tick(now).await;
        }
        let state = engine.state();
        let state = state.read().await;
        let values: Vec<f64> = state
            .helmets()
            .iter()
            .flat_map(|helmet| {
                ChannelKind::ALL.iter().flat_map(|&channel| {
                    state
                        .history(&helmet.id, channel)
                        .unwrap()
                        .iter()
                        .map(|r| r.value)
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        runs.push(values);
    }

    assert_eq!(runs[0], runs[1]);
}

#[tokio::test]
async fn live_feed_supersedes_simulation_until_stale() {
    let live_feed = Arc::new(LiveFeedStore::new());
    let mut engine = seeded_engine(7, live_feed.clone());

    let now = Utc::now();
    live_feed
        .store(
            LivePayload {
                helmet_id: "HELMET_002".to_string(),
                co2: 951.5,
                ch4: 1.7,
                o2: 19.2,
                h2s: 12.0,
                temp: 33.0,
                humidity: 82.0,
                timestamp: Some(now.timestamp() as f64),
            },
            now,
        )
        .await;

    // Fresh sample: the whole tick comes from the live feed
    engine.tick(now).await;
    {
        let state = engine.state();
        let state = state.read().await;
        assert_eq!(state.latest_value("HELMET_002", ChannelKind::Co2), Some(951.5));
        assert_eq!(state.latest_value("HELMET_002", ChannelKind::Ch4), Some(1.7));
        assert_eq!(state.latest_value("HELMET_002", ChannelKind::H2s), Some(12.0));
    }

    // The live sample also drives classification and alerting
    let service = DashboardService::new(shipped_config(), engine.state());
    let tiers = service.worst_tiers().await;
    let (_, helmet_2_tier) = tiers.iter().find(|(id, _)| id == "HELMET_002").unwrap();
    assert!(*helmet_2_tier >= SafetyTier::Danger);

    // Same sample 31s later is stale: generation resumes from the live value
    let later = now + chrono::Duration::seconds(31);
    engine.tick(later).await;
    {
        let state = engine.state();
        let state = state.read().await;
        let history = state.history("HELMET_002", ChannelKind::Co2).unwrap();
        assert_eq!(history.len(), 2);
    }
}

#[tokio::test]
async fn classifier_fixtures_match_safety_tables() {
    let channels = shipped_config();

    let co2 = &channels.channel(ChannelKind::Co2).thresholds;
    assert_eq!(co2.classify(300.0), SafetyTier::Safe);
    assert_eq!(co2.classify(650.0), SafetyTier::Warning);
    assert_eq!(co2.classify(1000.0), SafetyTier::Danger);
    assert_eq!(co2.classify(1600.0), SafetyTier::Critical);

    let o2 = &channels.channel(ChannelKind::O2).thresholds;
    assert!(o2.inverted);
    assert_eq!(o2.classify(20.0), SafetyTier::Safe);
    assert_eq!(o2.classify(19.2), SafetyTier::Warning);
    assert_eq!(o2.classify(18.7), SafetyTier::Danger);
    assert_eq!(o2.classify(17.9), SafetyTier::Critical);
}
