//! Driver for the Salus IT-500 web portal.
//!
//! The portal has no API proper: sessions come from a form login plus a
//! `devId`/`token` pair scraped off the devices page, readings come from the
//! ajax endpoints the portal's own frontend polls, and writes go through
//! `includes/set.php`. When the portal cannot reach the receiver it still
//! answers with a sentinel setpoint of 32 degrees instead of an error.

use chrono::Utc;
use serde::Deserialize;

use heathub_domain::device::{Card, CardImage, DeviceStatus, Snapshot};

use crate::error::DriverError;

const DEFAULT_BASE_URL: &str = "https://salus-it500.com";

/// Setpoint the portal reports when the receiver is unreachable.
const UNCONTACTABLE_SETPOINT: f64 = 32.0;

/// Credentials and overrides stored in the profile's options blob.
#[derive(Debug, Clone, Deserialize)]
pub struct SalusOptions {
    pub username: String,
    pub password: String,
    /// Portal base URL override, used by tests.
    #[serde(default)]
    pub base_url: Option<String>,
}

/// Session-holding client for one IT-500 account.
#[derive(Debug)]
pub struct SalusDriver {
    http: reqwest::Client,
    base_url: String,
    username: String,
    password: String,
    dev_id: Option<String>,
    token: Option<String>,
}

impl SalusDriver {
    /// Build a driver from the profile's options.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Http`] if the HTTP client cannot be built.
    pub fn new(options: SalusOptions) -> Result<Self, DriverError> {
        // The portal tracks the session in a cookie on top of the token pair.
        let http = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self {
            http,
            base_url: options
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            username: options.username,
            password: options.password,
            dev_id: None,
            token: None,
        })
    }

    fn page_url(&self, page: &str) -> String {
        format!("{}/public/{page}.php", self.base_url)
    }

    fn credentials(&self) -> Result<(&str, &str), DriverError> {
        match (self.dev_id.as_deref(), self.token.as_deref()) {
            (Some(dev_id), Some(token)) => Ok((dev_id, token)),
            _ => Err(DriverError::MissingCredentials),
        }
    }

    fn authenticated_url(&self, page: &str) -> Result<String, DriverError> {
        let (dev_id, token) = self.credentials()?;
        // The trailing timestamp is the portal's cache buster.
        Ok(format!(
            "{}?devId={dev_id}&token={token}&_={}",
            self.page_url(page),
            Utc::now().timestamp()
        ))
    }

    pub async fn login(&mut self) -> Result<(), DriverError> {
        tracing::debug!(base_url = %self.base_url, "logging in");
        self.http
            .post(self.page_url("login"))
            .form(&[
                ("IDemail", self.username.as_str()),
                ("password", self.password.as_str()),
                ("login", "Login"),
            ])
            .send()
            .await?
            .error_for_status()?;

        tracing::debug!("loading devices page");
        let body = self
            .http
            .get(self.page_url("devices"))
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let dev_id = attribute_value(&body, "name=\"devId\"");
        let token = attribute_value(&body, "id=\"token\"");
        match (dev_id, token) {
            (Some(dev_id), Some(token)) => {
                tracing::debug!(dev_id, "logged on");
                self.dev_id = Some(dev_id);
                self.token = Some(token);
                Ok(())
            }
            _ => Err(DriverError::MissingCredentials),
        }
    }

    pub async fn logout(&mut self) -> Result<(), DriverError> {
        tracing::debug!("logging out");
        self.http
            .get(self.page_url("logout"))
            .send()
            .await?
            .error_for_status()?;
        self.dev_id = None;
        self.token = None;
        Ok(())
    }

    pub async fn online(&self) -> Result<bool, DriverError> {
        let url = self.authenticated_url("ajax_device_online_status")?;
        let body = self.http.get(url).send().await?.text().await?;
        tracing::debug!(status = %body, "device online status");
        Ok(matches!(body.trim(), "\"online\"" | "\"online lowBat\""))
    }

    pub async fn device(&self) -> Result<Snapshot, DriverError> {
        let url = self.authenticated_url("ajax_device_values")?;
        let values: serde_json::Value = self.http.get(url).send().await?.json().await?;

        let current_temperature = number_field(&values, "CH1currentRoomTemp")?;
        let target_temperature = number_field(&values, "CH1currentSetPoint")?;
        let heat_on = flag_field(&values, "CH1heatOnOffStatus");

        Ok(Snapshot {
            contactable: (target_temperature - UNCONTACTABLE_SETPOINT).abs() > f64::EPSILON,
            current_temperature,
            target_temperature,
            status: if heat_on {
                DeviceStatus::On
            } else {
                DeviceStatus::Off
            },
        })
    }

    pub async fn set_temperature(&self, target: f64) -> Result<(), DriverError> {
        let (dev_id, token) = self.credentials()?;
        let temp = format!("{target:.1}");
        tracing::debug!(temp, "setting temperature");
        self.http
            .post(format!("{}/includes/set.php", self.base_url))
            .form(&[
                ("token", token),
                ("tempUnit", "0"),
                ("devId", dev_id),
                ("current_tempZ1_set", "1"),
                ("current_tempZ1", temp.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    pub async fn turn_water_on_for(&self, hours: u64) -> Result<(), DriverError> {
        let (dev_id, token) = self.credentials()?;
        let hours = hours.to_string();
        tracing::debug!(hours, "setting water boost time");
        self.http
            .post(format!("{}/includes/set.php", self.base_url))
            .form(&[
                ("token", token),
                ("devId", dev_id),
                ("hwboosthours_set", "1"),
                ("hwboosthours", hours.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    pub fn friendly_name(&self) -> &str {
        "thermostat"
    }

    pub fn manufacturer_name(&self) -> &str {
        "Salus"
    }

    pub fn description(&self) -> &str {
        "Controls the Salus IT-500"
    }

    pub fn card(&self) -> Card {
        Card {
            title: "Salus".to_string(),
            image: CardImage {
                small_image_url: format!("{}/public/assets/it500_icon.png", self.base_url),
                large_image_url: format!("{}/public/assets/logo.png", self.base_url),
            },
        }
    }

    /// Setpoint writes regularly take the portal longer than an interactive
    /// request allows, so they are handed to the command bus.
    pub fn should_defer(&self) -> bool {
        true
    }
}

/// Pull the `value` attribute out of the HTML tag containing `marker`.
fn attribute_value(html: &str, marker: &str) -> Option<String> {
    let at = html.find(marker)?;
    let tag_start = html[..at].rfind('<')?;
    let tag_end = at + html[at..].find('>')?;
    let tag = &html[tag_start..tag_end];

    let value_at = tag.find("value=\"")? + "value=\"".len();
    let value = &tag[value_at..];
    let end = value.find('"')?;
    Some(value[..end].to_string())
}

/// The ajax endpoints serve numbers as numbers or quoted strings, depending
/// on the field and the portal's mood.
fn number_field(values: &serde_json::Value, key: &str) -> Result<f64, DriverError> {
    let field = &values[key];
    field
        .as_f64()
        .or_else(|| field.as_str().and_then(|s| s.parse().ok()))
        .ok_or_else(|| DriverError::Protocol(format!("missing numeric field {key}")))
}

fn flag_field(values: &serde_json::Value, key: &str) -> bool {
    let field = &values[key];
    field.as_i64() == Some(1) || field.as_str() == Some("1")
}
