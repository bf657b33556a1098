// Sensor channel domain model
use serde::{Deserialize, Serialize};

/// One monitored physical quantity on a helmet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    Co2,
    Ch4,
    O2,
    H2s,
    Temperature,
    Humidity,
}

impl ChannelKind {
    pub const ALL: [ChannelKind; 6] = [
        ChannelKind::Co2,
        ChannelKind::Ch4,
        ChannelKind::O2,
        ChannelKind::H2s,
        ChannelKind::Temperature,
        ChannelKind::Humidity,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            ChannelKind::Co2 => "co2",
            ChannelKind::Ch4 => "ch4",
            ChannelKind::O2 => "o2",
            ChannelKind::H2s => "h2s",
            ChannelKind::Temperature => "temp",
            ChannelKind::Humidity => "humidity",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ChannelKind::Co2 => "Carbon Dioxide",
            ChannelKind::Ch4 => "Methane",
            ChannelKind::O2 => "Oxygen",
            ChannelKind::H2s => "Hydrogen Sulfide",
            ChannelKind::Temperature => "Temperature",
            ChannelKind::Humidity => "Humidity",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            ChannelKind::Co2 | ChannelKind::H2s => "ppm",
            ChannelKind::Ch4 | ChannelKind::O2 | ChannelKind::Humidity => "%",
            ChannelKind::Temperature => "°C",
        }
    }
}

/// Simulation parameters for one channel.
///
/// `noise_sigma` is the per-tick Gaussian jitter; `drift_rate` scales the
/// nominal `base_value` into a slow baseline-shift sigma; spikes model
/// transient events (a blast of gas, a door opening) and are drawn with
/// probability `spike_chance` each tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelProfile {
    pub base_value: f64,
    pub noise_sigma: f64,
    pub drift_rate: f64,
    pub spike_chance: f64,
    pub spike_magnitude: f64,
    pub clamp_min: f64,
    pub clamp_max: f64,
}

impl ChannelProfile {
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.clamp_min, self.clamp_max)
    }

    /// Round to the 2-decimal precision all readings carry (synthetic or
    /// ingested live), then clamp to the physical range. Clamping last means
    /// a fractional clamp bound always wins over the rounding step, so no
    /// reading can escape the range.
    pub fn quantize(&self, value: f64) -> f64 {
        self.clamp(round2(value))
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
