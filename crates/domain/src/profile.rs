//! Profile — per-user persisted device config, defaults, and hold handle.

use serde::{Deserialize, Serialize};

use crate::duration::HoldDuration;

/// Reserved id of the seed record copied when provisioning a new user.
pub const TEMPLATE_USER_ID: &str = "template";

/// One end-user's persisted settings.
///
/// `execution_id` is `Some` exactly while a hold is believed outstanding for
/// this user; it is the only hold state stored locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: String,
    /// Identity supplied by a linked external account, resolved through a
    /// secondary index.
    pub linked_user_id: Option<String>,
    /// Tag selecting the device driver variant.
    pub device_type: String,
    /// Opaque driver credentials and options.
    pub device_options: serde_json::Value,
    pub default_on_temp: f64,
    pub default_off_temp: f64,
    pub default_duration: HoldDuration,
    pub default_water_duration: HoldDuration,
    pub execution_id: Option<String>,
}

impl Profile {
    /// Minimal stub created for a new user when no template profile exists.
    #[must_use]
    pub fn stub(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            linked_user_id: None,
            device_type: String::new(),
            device_options: serde_json::Value::Object(serde_json::Map::new()),
            default_on_temp: 20.0,
            default_off_temp: 14.0,
            default_duration: HoldDuration::from_hours(1),
            default_water_duration: HoldDuration::from_hours(1),
            execution_id: None,
        }
    }

    /// Re-key this profile (typically the template) under a new user id.
    #[must_use]
    pub fn for_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }
}
