//! Device snapshot — an ephemeral reading of one controller.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Whether the heating relay is currently calling for heat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    On,
    Off,
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::On => write!(f, "on"),
            Self::Off => write!(f, "off"),
        }
    }
}

/// A fresh reading of the device, taken on every operation and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Whether the backend could meaningfully reach the device. Some backends
    /// answer with a sentinel reading instead of an error when they cannot.
    pub contactable: bool,
    pub current_temperature: f64,
    pub target_temperature: f64,
    pub status: DeviceStatus,
}

impl Snapshot {
    /// True when the heating is calling for heat.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.status == DeviceStatus::On
    }
}

/// Presentation card rendered by the front end alongside the spoken messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub title: String,
    pub image: CardImage,
}

/// Image pair for a presentation card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardImage {
    pub small_image_url: String,
    pub large_image_url: String,
}
