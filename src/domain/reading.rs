// Reading and history-buffer domain models
use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::channel::ChannelKind;

/// One sensor sample. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Reading {
    pub channel: ChannelKind,
    pub value: f64,
    pub timestamp: DateTime<Utc>,
}

impl Reading {
    pub fn new(channel: ChannelKind, value: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            channel,
            value,
            timestamp,
        }
    }
}

/// Bounded, ordered sequence of readings for one (helmet, channel) pair.
/// Appending past capacity evicts the oldest entry.
#[derive(Debug, Clone)]
pub struct ReadingHistory {
    readings: VecDeque<Reading>,
    capacity: usize,
}

impl ReadingHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            readings: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, reading: Reading) {
        if self.readings.len() == self.capacity {
            self.readings.pop_front();
        }
        self.readings.push_back(reading);
    }

    pub fn latest(&self) -> Option<&Reading> {
        self.readings.back()
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Reading> {
        self.readings.iter()
    }

    /// Oldest-to-newest copy for dashboard series.
    pub fn snapshot(&self) -> Vec<Reading> {
        self.readings.iter().copied().collect()
    }
}
