// Alert derivation from classified readings
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::channel::ChannelKind;
use crate::domain::safety::SafetyTier;

/// One active alert for a helmet, rebuilt fresh every tick from the latest
/// reading of each channel. No hysteresis: a value oscillating across the
/// warning boundary will raise and clear the alert on successive ticks,
/// matching the original dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct Alert {
    pub helmet_id: String,
    pub worst_tier: SafetyTier,
    pub reasons: Vec<String>,
    pub raised_at: DateTime<Utc>,
}

/// Evaluate a helmet's latest classified values. Returns `None` when no
/// channel is at `Warning` or above.
pub fn evaluate(
    helmet_id: &str,
    latest: &[(ChannelKind, f64, SafetyTier)],
    now: DateTime<Utc>,
) -> Option<Alert> {
    let mut reasons = Vec::new();
    let mut worst = SafetyTier::Safe;

    for (channel, value, tier) in latest {
        if tier.is_alerting() {
            reasons.push(format!(
                "{} {}: {}{}",
                channel.title(),
                tier.label(),
                value,
                channel.unit()
            ));
            worst = worst.max(*tier);
        }
    }

    if reasons.is_empty() {
        None
    } else {
        Some(Alert {
            helmet_id: helmet_id.to_string(),
            worst_tier: worst,
            reasons,
            raised_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_alert_when_all_safe() {
        let latest = vec![
            (ChannelKind::Co2, 420.0, SafetyTier::Safe),
            (ChannelKind::O2, 20.5, SafetyTier::Safe),
        ];
        assert!(evaluate("HELMET_001", &latest, Utc::now()).is_none());
    }

    #[test]
    fn test_alert_collects_reasons_and_worst_tier() {
        let latest = vec![
            (ChannelKind::Co2, 900.0, SafetyTier::Danger),
            (ChannelKind::Ch4, 1.2, SafetyTier::Warning),
            (ChannelKind::O2, 20.5, SafetyTier::Safe),
        ];
        let alert = evaluate("HELMET_004", &latest, Utc::now()).unwrap();
        assert_eq!(alert.helmet_id, "HELMET_004");
        assert_eq!(alert.worst_tier, SafetyTier::Danger);
        assert_eq!(alert.reasons.len(), 2);
        assert!(alert.reasons[0].contains("Carbon Dioxide"));
        assert!(alert.reasons[0].contains("900"));
    }

    #[test]
    fn test_offline_channels_do_not_alert() {
        let latest = vec![(ChannelKind::H2s, 0.0, SafetyTier::Offline)];
        assert!(evaluate("HELMET_006", &latest, Utc::now()).is_none());
    }
}
