//! Set-temperature dispatch — in-band writes vs. deferral to the command bus.

use std::future::Future;

use heathub_domain::command::TemperatureCommand;
use heathub_domain::device::{DeviceStatus, Snapshot};
use heathub_domain::error::HeatHubError;

use crate::ports::{CommandPublisher, ThermostatDriver};

/// Topic deferred set-temperature commands are republished on.
pub const SET_TEMPERATURE_TOPIC: &str = "set-temperature";

/// How a setpoint write reaches the device.
///
/// Both strategies resolve to the device view the caller should report:
/// the immediate one re-reads the device after writing, the deferred one
/// answers with the view the write will produce once reprocessed.
pub trait SetTemperatureStrategy: Send + Sync {
    fn set_temperature<D: ThermostatDriver>(
        &self,
        driver: &D,
        target: f64,
    ) -> impl Future<Output = Result<Snapshot, HeatHubError>> + Send;
}

/// Write the setpoint in-band and re-read the device.
pub struct ImmediateSetTemperature;

impl SetTemperatureStrategy for ImmediateSetTemperature {
    fn set_temperature<D: ThermostatDriver>(
        &self,
        driver: &D,
        target: f64,
    ) -> impl Future<Output = Result<Snapshot, HeatHubError>> + Send {
        async move {
            driver.set_temperature(target).await?;
            driver.device().await
        }
    }
}

/// Hand slow writes to the command bus instead of completing them in-band.
///
/// Deferral happens only when the inbound command still carries its defer
/// flag *and* the driver asks for it. The republished copy has the flag
/// cleared, so the reprocessing pass always writes for real.
pub struct DeferredSetTemperature<'a, P> {
    publisher: &'a P,
    command: &'a TemperatureCommand,
}

impl<'a, P> DeferredSetTemperature<'a, P> {
    pub fn new(publisher: &'a P, command: &'a TemperatureCommand) -> Self {
        Self { publisher, command }
    }
}

impl<P: CommandPublisher> SetTemperatureStrategy for DeferredSetTemperature<'_, P> {
    fn set_temperature<D: ThermostatDriver>(
        &self,
        driver: &D,
        target: f64,
    ) -> impl Future<Output = Result<Snapshot, HeatHubError>> + Send {
        async move {
            if !(self.command.defer && driver.should_defer()) {
                return ImmediateSetTemperature.set_temperature(driver, target).await;
            }
            self.publisher
                .publish(SET_TEMPERATURE_TOPIC, &self.command.consumed())
                .await?;
            tracing::debug!(target, "setpoint write deferred to command bus");
            // Answer with the view the reprocessed write will produce.
            let mut snapshot = driver.device().await?;
            snapshot.target_temperature = target;
            snapshot.status = if target > snapshot.current_temperature {
                DeviceStatus::On
            } else {
                DeviceStatus::Off
            };
            Ok(snapshot)
        }
    }
}
