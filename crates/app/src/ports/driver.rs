//! Device driver port — one physical or remote heating controller.

use std::future::Future;

use heathub_domain::device::{Card, Snapshot};
use heathub_domain::error::HeatHubError;

/// Capability set of one heating controller backend.
///
/// Implementations live in adapter crates and are selected at runtime by a
/// [`DriverFactory`] keyed on the profile's device-type tag.
pub trait ThermostatDriver: Send + Sync {
    /// Authenticate against the backend. Must be called before any reads
    /// or writes.
    fn login(&mut self) -> impl Future<Output = Result<(), HeatHubError>> + Send;

    /// Release the session. Called on every exit path of an operation.
    fn logout(&mut self) -> impl Future<Output = Result<(), HeatHubError>> + Send;

    /// Whether the backend reports the device online.
    fn online(&self) -> impl Future<Output = Result<bool, HeatHubError>> + Send;

    /// Take a fresh reading of the device.
    fn device(&self) -> impl Future<Output = Result<Snapshot, HeatHubError>> + Send;

    /// Write a new target temperature.
    fn set_temperature(
        &self,
        target: f64,
    ) -> impl Future<Output = Result<(), HeatHubError>> + Send;

    /// Boost hot water for the given number of whole hours (zero turns it off).
    fn turn_water_on_for(
        &self,
        hours: u64,
    ) -> impl Future<Output = Result<(), HeatHubError>> + Send;

    fn friendly_name(&self) -> &str;

    fn manufacturer_name(&self) -> &str;

    fn description(&self) -> &str;

    /// Presentation card for the front end.
    fn card(&self) -> Card;

    /// Whether setpoint writes are asynchronous at the protocol level and
    /// should be handed to the message channel instead of completed in-band.
    fn should_defer(&self) -> bool {
        false
    }
}

/// Factory selecting a driver variant from the profile's device-type tag.
pub trait DriverFactory: Send + Sync {
    type Driver: ThermostatDriver;

    /// Build a driver for `device_type` with the profile's opaque options.
    ///
    /// # Errors
    ///
    /// Returns [`HeatHubError::Configuration`] for an unrecognized type —
    /// never a silent default.
    fn create(
        &self,
        device_type: &str,
        options: &serde_json::Value,
    ) -> Result<Self::Driver, HeatHubError>;
}
