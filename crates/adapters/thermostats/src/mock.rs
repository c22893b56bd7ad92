//! Simulated driver for tests and demo deployments.

use std::sync::{Mutex, PoisonError};

use heathub_domain::device::{Card, CardImage, DeviceStatus, Snapshot};

use crate::error::DriverError;

/// The room temperature the simulated sensor always reads.
const ROOM_TEMPERATURE: f64 = 19.0;

/// An always-online thermostat that remembers its setpoint in memory and
/// calls for heat whenever the setpoint is above the room reading.
#[derive(Debug)]
pub struct MockDriver {
    target_temperature: Mutex<f64>,
}

impl Default for MockDriver {
    fn default() -> Self {
        Self {
            target_temperature: Mutex::new(20.0),
        }
    }
}

impl MockDriver {
    pub async fn login(&mut self) -> Result<(), DriverError> {
        tracing::debug!("logging in");
        Ok(())
    }

    pub async fn logout(&mut self) -> Result<(), DriverError> {
        tracing::debug!("logging out");
        Ok(())
    }

    pub async fn online(&self) -> Result<bool, DriverError> {
        Ok(true)
    }

    pub async fn device(&self) -> Result<Snapshot, DriverError> {
        let target = self.target();
        Ok(Snapshot {
            contactable: true,
            current_temperature: ROOM_TEMPERATURE,
            target_temperature: target,
            status: if target > ROOM_TEMPERATURE {
                DeviceStatus::On
            } else {
                DeviceStatus::Off
            },
        })
    }

    pub async fn set_temperature(&self, target: f64) -> Result<(), DriverError> {
        tracing::debug!(target, "setting temperature");
        *self
            .target_temperature
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = target;
        Ok(())
    }

    pub async fn turn_water_on_for(&self, hours: u64) -> Result<(), DriverError> {
        tracing::debug!(hours, "boosting water");
        Ok(())
    }

    pub fn friendly_name(&self) -> &str {
        "Mock Thermostat"
    }

    pub fn manufacturer_name(&self) -> &str {
        "Acme Ltd"
    }

    pub fn description(&self) -> &str {
        "Mock thermostat used for testing"
    }

    pub fn card(&self) -> Card {
        Card {
            title: "Mock Thermostat".to_string(),
            image: CardImage {
                small_image_url: "http://smallimage.url".to_string(),
                large_image_url: "http://largeimage.url".to_string(),
            },
        }
    }

    fn target(&self) -> f64 {
        *self
            .target_temperature
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn should_call_for_heat_above_room_temperature() {
        let driver = MockDriver::default();
        driver.set_temperature(21.0).await.unwrap();

        let snapshot = driver.device().await.unwrap();
        assert_eq!(snapshot.target_temperature, 21.0);
        assert_eq!(snapshot.status, DeviceStatus::On);
    }

    #[tokio::test]
    async fn should_idle_at_or_below_room_temperature() {
        let driver = MockDriver::default();
        driver.set_temperature(14.0).await.unwrap();

        let snapshot = driver.device().await.unwrap();
        assert_eq!(snapshot.status, DeviceStatus::Off);
        assert!(snapshot.contactable);
    }
}
