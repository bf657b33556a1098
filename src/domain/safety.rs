// Safety tier classification against per-channel thresholds
use serde::{Deserialize, Serialize};

/// Discrete safety classification for one reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyTier {
    Offline,
    Safe,
    Warning,
    Danger,
    Critical,
}

impl SafetyTier {
    /// Dashboard color for this tier.
    pub fn color(&self) -> &'static str {
        match self {
            SafetyTier::Offline => "#6c757d",
            SafetyTier::Safe => "#28a745",
            SafetyTier::Warning => "#ffc107",
            SafetyTier::Danger => "#fd7e14",
            SafetyTier::Critical => "#dc3545",
        }
    }

    /// Status text shown on a metric card.
    pub fn label(&self) -> &'static str {
        match self {
            SafetyTier::Offline => "OFFLINE",
            SafetyTier::Safe => "NORMAL",
            SafetyTier::Warning => "CAUTION",
            SafetyTier::Danger => "WARNING",
            SafetyTier::Critical => "CRITICAL",
        }
    }

    pub fn is_alerting(&self) -> bool {
        *self >= SafetyTier::Warning
    }
}

/// Ordered tier boundaries for one channel.
///
/// For non-inverted channels higher is worse and the boundaries ascend;
/// for the inverted channel (oxygen) lower is worse and they descend. The
/// direction is carried explicitly in `inverted` rather than inferred from
/// the boundary values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdTable {
    pub safe: f64,
    pub warning: f64,
    pub danger: f64,
    pub critical: f64,
    #[serde(default)]
    pub inverted: bool,
}

impl ThresholdTable {
    /// Classify a value into exactly one tier.
    ///
    /// A value of exactly 0.0 is the offline sentinel inherited from the
    /// original dashboard: an offline helmet reads zero on every channel, so
    /// zero always classifies as `Offline` even though a live channel could
    /// legitimately read zero (e.g. H2S at 0 ppm). Callers that need to tell
    /// the two apart must consult the helmet status, not the tier.
    pub fn classify(&self, value: f64) -> SafetyTier {
        if value == 0.0 {
            return SafetyTier::Offline;
        }

        let crossed = [self.safe, self.warning, self.danger, self.critical]
            .iter()
            .filter(|&&bound| {
                if self.inverted {
                    value < bound
                } else {
                    value > bound
                }
            })
            .count();

        match crossed {
            0 => SafetyTier::Safe,
            1 => SafetyTier::Warning,
            2 => SafetyTier::Danger,
            _ => SafetyTier::Critical,
        }
    }
}
