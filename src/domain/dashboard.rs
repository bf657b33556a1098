// Dashboard snapshot domain models
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::alert::Alert;
use crate::domain::channel::ChannelKind;
use crate::domain::helmet::HelmetStatus;
use crate::domain::safety::SafetyTier;

/// One color-coded metric card, mirroring a dashboard tile.
#[derive(Debug, Clone, Serialize)]
pub struct MetricCard {
    pub channel: ChannelKind,
    pub title: String,
    pub unit: String,
    pub value: f64,
    pub tier: SafetyTier,
    pub color: String,
    pub status: String,
}

impl MetricCard {
    pub fn new(channel: ChannelKind, value: f64, tier: SafetyTier) -> Self {
        Self {
            channel,
            title: channel.title().to_string(),
            unit: channel.unit().to_string(),
            value,
            tier,
            color: tier.color().to_string(),
            status: tier.label().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SeriesPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

/// History series for one channel, oldest first.
#[derive(Debug, Clone, Serialize)]
pub struct ChannelSeries {
    pub channel: ChannelKind,
    pub points: Vec<SeriesPoint>,
}

/// Everything the UI needs to render one helmet's view for one tick.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub helmet_id: String,
    pub miner: String,
    pub location: String,
    pub status: HelmetStatus,
    pub generated_at: DateTime<Utc>,
    pub cards: Vec<MetricCard>,
    pub series: Vec<ChannelSeries>,
    pub alert: Option<Alert>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_card_wire_shape() {
        let card = MetricCard::new(ChannelKind::Co2, 650.0, SafetyTier::Warning);
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["channel"], "co2");
        assert_eq!(json["title"], "Carbon Dioxide");
        assert_eq!(json["unit"], "ppm");
        assert_eq!(json["value"], 650.0);
        assert_eq!(json["tier"], "warning");
        assert_eq!(json["color"], "#ffc107");
        assert_eq!(json["status"], "CAUTION");
    }

    #[test]
    fn test_helmet_status_wire_shape() {
        assert_eq!(
            serde_json::to_value(HelmetStatus::Active).unwrap(),
            "ACTIVE"
        );
        assert_eq!(
            serde_json::to_value(HelmetStatus::Offline).unwrap(),
            "OFFLINE"
        );
    }
}
