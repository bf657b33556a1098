// Helmet domain model
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HelmetStatus {
    Active,
    Offline,
}

#[derive(Debug, Clone, Serialize)]
pub struct Helmet {
    pub id: String,
    pub miner: String,
    pub location: String,
    pub status: HelmetStatus,
}

impl Helmet {
    pub fn new(id: String, miner: String, location: String, status: HelmetStatus) -> Self {
        Self {
            id,
            miner,
            location,
            status,
        }
    }

    pub fn is_offline(&self) -> bool {
        self.status == HelmetStatus::Offline
    }

    /// Label shown in the helmet selector, e.g.
    /// "HELMET_001 - John Smith (Tunnel A-1)".
    pub fn display_label(&self) -> String {
        format!("{} - {} ({})", self.id, self.miner, self.location)
    }
}
