//! Factory selecting a driver from the profile's device-type tag.

use heathub_app::ports::DriverFactory;
use heathub_domain::error::{ConfigurationError, HeatHubError};

use crate::driver::Driver;
use crate::error::DriverError;
use crate::mock::MockDriver;
use crate::salus::{SalusDriver, SalusOptions};

/// Builds drivers for the device types heathub knows about.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThermostatFactory;

impl DriverFactory for ThermostatFactory {
    type Driver = Driver;

    fn create(
        &self,
        device_type: &str,
        options: &serde_json::Value,
    ) -> Result<Self::Driver, HeatHubError> {
        match device_type {
            "salus" => {
                let options: SalusOptions = serde_json::from_value(options.clone())
                    .map_err(DriverError::Options)?;
                Ok(Driver::Salus(SalusDriver::new(options)?))
            }
            "mock" => Ok(Driver::Mock(MockDriver::default())),
            other => Err(ConfigurationError::UnknownDeviceType(other.to_string()).into()),
        }
    }
}
