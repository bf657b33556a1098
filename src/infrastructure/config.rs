// Configuration loading and fail-fast validation
use serde::Deserialize;
use thiserror::Error;

use crate::domain::channel::{ChannelKind, ChannelProfile};
use crate::domain::helmet::{Helmet, HelmetStatus};
use crate::domain::safety::ThresholdTable;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("channel {channel}: clamp_min {min} must be below clamp_max {max}")]
    InvalidClampRange {
        channel: &'static str,
        min: f64,
        max: f64,
    },
    #[error("channel {channel}: base_value {base} lies outside clamp range [{min}, {max}]")]
    BaseOutOfRange {
        channel: &'static str,
        base: f64,
        min: f64,
        max: f64,
    },
    #[error("channel {channel}: {parameter} must be non-negative, got {value}")]
    NegativeParameter {
        channel: &'static str,
        parameter: &'static str,
        value: f64,
    },
    #[error("channel {channel}: spike_chance {value} must lie in [0, 1]")]
    SpikeChanceOutOfRange { channel: &'static str, value: f64 },
    #[error("channel {channel}: thresholds must be strictly {direction} (safe, warning, danger, critical)")]
    NonMonotonicThresholds {
        channel: &'static str,
        direction: &'static str,
    },
    #[error("helmet roster is empty")]
    EmptyRoster,
    #[error("helmet roster has {count} entries, maximum is {max}")]
    TooManyHelmets { count: usize, max: usize },
    #[error("duplicate helmet id {id}")]
    DuplicateHelmetId { id: String },
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChannelSettings {
    pub profile: ChannelProfile,
    pub thresholds: ThresholdTable,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SimulationSettings {
    #[serde(default = "default_update_interval_ms")]
    pub update_interval_ms: u64,
    #[serde(default = "default_buffer_capacity")]
    pub buffer_capacity: usize,
    #[serde(default = "default_staleness_timeout_secs")]
    pub staleness_timeout_secs: u64,
    #[serde(default = "default_max_helmets")]
    pub max_helmets: usize,
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

fn default_update_interval_ms() -> u64 {
    2000
}

fn default_buffer_capacity() -> usize {
    100
}

fn default_staleness_timeout_secs() -> u64 {
    30
}

fn default_max_helmets() -> usize {
    50
}

fn default_bind_addr() -> String {
    "0.0.0.0:8050".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChannelsConfig {
    pub simulation: SimulationSettings,
    pub co2: ChannelSettings,
    pub ch4: ChannelSettings,
    pub o2: ChannelSettings,
    pub h2s: ChannelSettings,
    pub temperature: ChannelSettings,
    pub humidity: ChannelSettings,
}

impl ChannelsConfig {
    pub fn channel(&self, kind: ChannelKind) -> &ChannelSettings {
        match kind {
            ChannelKind::Co2 => &self.co2,
            ChannelKind::Ch4 => &self.ch4,
            ChannelKind::O2 => &self.o2,
            ChannelKind::H2s => &self.h2s,
            ChannelKind::Temperature => &self.temperature,
            ChannelKind::Humidity => &self.humidity,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for kind in ChannelKind::ALL {
            let settings = self.channel(kind);
            validate_profile(kind, &settings.profile)?;
            validate_thresholds(kind, &settings.thresholds)?;
        }
        Ok(())
    }
}

fn validate_profile(kind: ChannelKind, profile: &ChannelProfile) -> Result<(), ConfigError> {
    let channel = kind.key();

    if profile.clamp_min >= profile.clamp_max {
        return Err(ConfigError::InvalidClampRange {
            channel,
            min: profile.clamp_min,
            max: profile.clamp_max,
        });
    }
    if !(profile.clamp_min..=profile.clamp_max).contains(&profile.base_value) {
        return Err(ConfigError::BaseOutOfRange {
            channel,
            base: profile.base_value,
            min: profile.clamp_min,
            max: profile.clamp_max,
        });
    }
    for (parameter, value) in [
        ("noise_sigma", profile.noise_sigma),
        ("drift_rate", profile.drift_rate),
        ("spike_magnitude", profile.spike_magnitude),
    ] {
        if value < 0.0 {
            return Err(ConfigError::NegativeParameter {
                channel,
                parameter,
                value,
            });
        }
    }
    if !(0.0..=1.0).contains(&profile.spike_chance) {
        return Err(ConfigError::SpikeChanceOutOfRange {
            channel,
            value: profile.spike_chance,
        });
    }

    Ok(())
}

fn validate_thresholds(kind: ChannelKind, table: &ThresholdTable) -> Result<(), ConfigError> {
    let bounds = [table.safe, table.warning, table.danger, table.critical];
    let ordered = if table.inverted {
        bounds.windows(2).all(|pair| pair[0] > pair[1])
    } else {
        bounds.windows(2).all(|pair| pair[0] < pair[1])
    };

    if !ordered {
        return Err(ConfigError::NonMonotonicThresholds {
            channel: kind.key(),
            direction: if table.inverted {
                "descending"
            } else {
                "ascending"
            },
        });
    }
    Ok(())
}

#[derive(Debug, Deserialize, Clone)]
pub struct HelmetEntry {
    pub id: String,
    pub miner: String,
    pub location: String,
    #[serde(default = "default_status")]
    pub status: HelmetStatus,
}

fn default_status() -> HelmetStatus {
    HelmetStatus::Active
}

#[derive(Debug, Deserialize, Clone)]
pub struct HelmetsConfig {
    pub helmets: Vec<HelmetEntry>,
}

impl HelmetsConfig {
    pub fn validate(&self, max_helmets: usize) -> Result<(), ConfigError> {
        if self.helmets.is_empty() {
            return Err(ConfigError::EmptyRoster);
        }
        if self.helmets.len() > max_helmets {
            return Err(ConfigError::TooManyHelmets {
                count: self.helmets.len(),
                max: max_helmets,
            });
        }
        let mut seen = std::collections::HashSet::new();
        for entry in &self.helmets {
            if !seen.insert(entry.id.as_str()) {
                return Err(ConfigError::DuplicateHelmetId {
                    id: entry.id.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn roster(&self) -> Vec<Helmet> {
        self.helmets
            .iter()
            .map(|entry| {
                Helmet::new(
                    entry.id.clone(),
                    entry.miner.clone(),
                    entry.location.clone(),
                    entry.status,
                )
            })
            .collect()
    }
}

pub fn load_channels_config() -> anyhow::Result<ChannelsConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/channels"))
        .build()?;

    let channels: ChannelsConfig = settings.try_deserialize()?;
    channels.validate()?;
    Ok(channels)
}

pub fn load_helmets_config(max_helmets: usize) -> anyhow::Result<HelmetsConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/helmets"))
        .build()?;

    let helmets: HelmetsConfig = settings.try_deserialize()?;
    helmets.validate(max_helmets)?;
    Ok(helmets)
}
