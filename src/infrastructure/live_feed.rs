// Live-feed store - latest ingested sample per helmet
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::domain::channel::ChannelKind;

/// Sensor payload posted by helmet hardware through the HTTP bridge.
#[derive(Debug, Clone, Deserialize)]
pub struct LivePayload {
    pub helmet_id: String,
    pub co2: f64,
    pub ch4: f64,
    pub o2: f64,
    pub h2s: f64,
    pub temp: f64,
    pub humidity: f64,
    #[serde(default)]
    pub timestamp: Option<f64>,
}

impl LivePayload {
    pub fn value(&self, channel: ChannelKind) -> f64 {
        match channel {
            ChannelKind::Co2 => self.co2,
            ChannelKind::Ch4 => self.ch4,
            ChannelKind::O2 => self.o2,
            ChannelKind::H2s => self.h2s,
            ChannelKind::Temperature => self.temp,
            ChannelKind::Humidity => self.humidity,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LiveSample {
    pub payload: LivePayload,
    pub received_at: DateTime<Utc>,
}

/// Keeps the most recent live sample per helmet. Written by the ingest
/// handler, read by the tick loop when deciding the reading source.
#[derive(Debug, Default)]
pub struct LiveFeedStore {
    samples: RwLock<HashMap<String, LiveSample>>,
}

impl LiveFeedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn store(&self, payload: LivePayload, received_at: DateTime<Utc>) {
        let mut samples = self.samples.write().await;
        samples.insert(
            payload.helmet_id.clone(),
            LiveSample {
                payload,
                received_at,
            },
        );
    }

    /// Latest sample for a helmet, regardless of age.
    pub async fn latest(&self, helmet_id: &str) -> Option<LiveSample> {
        let samples = self.samples.read().await;
        samples.get(helmet_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(helmet_id: &str, co2: f64) -> LivePayload {
        LivePayload {
            helmet_id: helmet_id.to_string(),
            co2,
            ch4: 0.8,
            o2: 20.5,
            h2s: 3.0,
            temp: 28.0,
            humidity: 72.0,
            timestamp: None,
        }
    }

    #[tokio::test]
    async fn test_store_keeps_latest_per_helmet() {
        let store = LiveFeedStore::new();
        let now = Utc::now();
        store.store(payload("HELMET_001", 420.0), now).await;
        store.store(payload("HELMET_001", 510.0), now).await;

        let sample = store.latest("HELMET_001").await.unwrap();
        assert_eq!(sample.payload.co2, 510.0);
        assert!(store.latest("HELMET_002").await.is_none());
    }

    #[test]
    fn test_payload_channel_lookup() {
        let p = payload("HELMET_001", 420.0);
        assert_eq!(p.value(ChannelKind::Co2), 420.0);
        assert_eq!(p.value(ChannelKind::Temperature), 28.0);
        assert_eq!(p.value(ChannelKind::Humidity), 72.0);
    }
}
