//! Thermostat service — heating status, setpoint changes, and timed holds.

use heathub_domain::command::{CommandContext, OnOff};
use heathub_domain::device::{Card, Snapshot};
use heathub_domain::duration::HoldDuration;
use heathub_domain::error::{HeatHubError, PreconditionError};
use heathub_domain::hold::HoldIntent;
use heathub_domain::time::now;

use crate::dispatch::SetTemperatureStrategy;
use crate::ports::{DriverFactory, HoldScheduler, ProfileRepository, ThermostatDriver};
use crate::response::ServiceResponse;
use crate::services::core::{ServiceCore, speak_temperature};

/// Driver metadata for device discovery.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ThermostatDetails {
    pub friendly_name: String,
    pub manufacturer_name: String,
    pub description: String,
    pub card: Card,
}

/// Use-cases for reading and driving the heating.
///
/// State-free across requests: everything persistent lives in the profile
/// store and on the timer service. The dispatch strategy is a per-call
/// argument because the deferred variant borrows the inbound command.
pub struct ThermostatService<F, R, H> {
    core: ServiceCore<F, R>,
    scheduler: H,
}

impl<F, R, H> ThermostatService<F, R, H>
where
    F: DriverFactory,
    R: ProfileRepository,
    H: HoldScheduler,
{
    pub fn new(core: ServiceCore<F, R>, scheduler: H) -> Self {
        Self { core, scheduler }
    }

    pub fn core(&self) -> &ServiceCore<F, R> {
        &self.core
    }

    /// Greeting: just whether the device is reachable.
    #[tracing::instrument(skip(self))]
    pub async fn launch(&self, ctx: &CommandContext) -> Result<ServiceResponse, HeatHubError> {
        let profile = self.core.obtain_profile(&ctx.user_id).await?;
        let mut driver = self.core.login(&profile).await?;
        let result = self.launch_with(&driver).await;
        self.core.logout_quietly(&mut driver).await;
        result
    }

    async fn launch_with(&self, driver: &F::Driver) -> Result<ServiceResponse, HeatHubError> {
        let message = if driver.online().await? {
            "Thermostat is online."
        } else {
            "Sorry, the thermostat is offline at the moment."
        };
        Ok(ServiceResponse::message(message).with_card(driver.card()))
    }

    /// Current and target temperature, plus the hold countdown when one runs.
    #[tracing::instrument(skip(self))]
    pub async fn status(&self, ctx: &CommandContext) -> Result<ServiceResponse, HeatHubError> {
        let profile = self.core.obtain_profile(&ctx.user_id).await?;
        let mut driver = self.core.login(&profile).await?;
        let result = self.status_with(ctx, &driver).await;
        self.core.logout_quietly(&mut driver).await;
        result
    }

    async fn status_with(
        &self,
        ctx: &CommandContext,
        driver: &F::Driver,
    ) -> Result<ServiceResponse, HeatHubError> {
        self.core.verify_online(driver).await?;
        let device = driver.device().await?;
        self.core.verify_contactable(&device)?;

        let mut messages = vec![
            format!(
                "The current temperature is {} degrees.",
                speak_temperature(device.current_temperature)
            ),
            format!(
                "The target is {} degrees.",
                speak_temperature(device.target_temperature)
            ),
        ];
        self.describe_holding(&ctx.user_id, &device, &mut messages, None)
            .await?;
        log_status(&device);

        Ok(ServiceResponse {
            messages,
            card: Some(driver.card()),
            current_temperature: Some(device.current_temperature),
            target_temperature: Some(device.target_temperature),
        })
    }

    /// Raise the target one degree. Refused while the heating is on.
    pub async fn turn_up<S: SetTemperatureStrategy>(
        &self,
        ctx: &CommandContext,
        strategy: &S,
    ) -> Result<ServiceResponse, HeatHubError> {
        self.adjust_temperature(ctx, strategy, 1.0).await
    }

    /// Lower the target one degree.
    pub async fn turn_down<S: SetTemperatureStrategy>(
        &self,
        ctx: &CommandContext,
        strategy: &S,
    ) -> Result<ServiceResponse, HeatHubError> {
        self.adjust_temperature(ctx, strategy, -1.0).await
    }

    #[tracing::instrument(skip(self, strategy))]
    async fn adjust_temperature<S: SetTemperatureStrategy>(
        &self,
        ctx: &CommandContext,
        strategy: &S,
        delta: f64,
    ) -> Result<ServiceResponse, HeatHubError> {
        let profile = self.core.obtain_profile(&ctx.user_id).await?;
        let mut driver = self.core.login(&profile).await?;
        let result = self.adjust_with(ctx, strategy, &driver, delta).await;
        self.core.logout_quietly(&mut driver).await;
        result
    }

    async fn adjust_with<S: SetTemperatureStrategy>(
        &self,
        ctx: &CommandContext,
        strategy: &S,
        driver: &F::Driver,
        delta: f64,
    ) -> Result<ServiceResponse, HeatHubError> {
        self.core.verify_online(driver).await?;
        let device = driver.device().await?;
        self.core.verify_contactable(&device)?;

        if delta > 0.0 && device.is_on() {
            return Err(PreconditionError::AlreadyOn.into());
        }

        let updated = strategy
            .set_temperature(driver, device.target_temperature + delta)
            .await?;

        let mut messages = vec![format!(
            "The target temperature is now {} degrees.",
            speak_temperature(updated.target_temperature)
        )];
        let qualifier = if delta < 0.0 { "still" } else { "now" };
        self.describe_holding(&ctx.user_id, &updated, &mut messages, Some(qualifier))
            .await?;
        log_status(&updated);

        Ok(ServiceResponse {
            messages,
            card: Some(driver.card()),
            current_temperature: Some(updated.current_temperature),
            target_temperature: Some(updated.target_temperature),
        })
    }

    /// Turn the heating on or off at the profile's default setpoint.
    #[tracing::instrument(skip(self, strategy))]
    pub async fn turn<S: SetTemperatureStrategy>(
        &self,
        ctx: &CommandContext,
        strategy: &S,
        mode: OnOff,
        duration: Option<HoldDuration>,
    ) -> Result<ServiceResponse, HeatHubError> {
        let profile = self.core.obtain_profile(&ctx.user_id).await?;
        let target = match mode {
            OnOff::On => profile.default_on_temp,
            OnOff::Off => profile.default_off_temp,
        };
        self.set_temperature(ctx, strategy, target, duration, mode)
            .await
    }

    /// Write a setpoint and reconcile the hold.
    ///
    /// Fresh user commands arm a hold on the way on (falling back to the
    /// profile's default duration) and cancel the outstanding one on the way
    /// off. Callback invocations skip both branches, which is what stops a
    /// fired turn-off from re-scheduling itself.
    #[tracing::instrument(skip(self, strategy))]
    pub async fn set_temperature<S: SetTemperatureStrategy>(
        &self,
        ctx: &CommandContext,
        strategy: &S,
        target: f64,
        for_duration: Option<HoldDuration>,
        mode: OnOff,
    ) -> Result<ServiceResponse, HeatHubError> {
        let profile = self.core.obtain_profile(&ctx.user_id).await?;
        let mut driver = self.core.login(&profile).await?;
        let result = self
            .set_temperature_with(ctx, strategy, &driver, target, for_duration, mode)
            .await;
        self.core.logout_quietly(&mut driver).await;
        result
    }

    async fn set_temperature_with<S: SetTemperatureStrategy>(
        &self,
        ctx: &CommandContext,
        strategy: &S,
        driver: &F::Driver,
        target: f64,
        for_duration: Option<HoldDuration>,
        mode: OnOff,
    ) -> Result<ServiceResponse, HeatHubError> {
        self.core.verify_online(driver).await?;
        let device = driver.device().await?;
        self.core.verify_contactable(&device)?;

        let updated = strategy.set_temperature(driver, target).await?;

        let mut messages = vec![format!(
            "The target temperature is now {} degrees.",
            speak_temperature(updated.target_temperature)
        )];
        log_status(&updated);

        if ctx.is_user() {
            // Re-read the profile: the scheduler may have rewritten the
            // execution id since login.
            let profile = self.core.obtain_profile(&ctx.user_id).await?;
            match mode {
                OnOff::On => {
                    let duration = for_duration.unwrap_or(profile.default_duration);
                    let intent = self
                        .scheduler
                        .hold_if_required_for(&ctx.user_id, Some(duration))
                        .await?;
                    messages.extend(summarize(Some(duration), &intent, &updated));
                }
                OnOff::Off => {
                    self.scheduler
                        .stop_hold_if_required(profile.execution_id.as_deref())
                        .await?;
                }
            }
        }

        Ok(ServiceResponse {
            messages,
            card: Some(driver.card()),
            current_temperature: Some(updated.current_temperature),
            target_temperature: Some(updated.target_temperature),
        })
    }

    /// Driver metadata and presentation card, without opening a session.
    #[tracing::instrument(skip(self))]
    pub async fn thermostat_details(
        &self,
        ctx: &CommandContext,
    ) -> Result<ThermostatDetails, HeatHubError> {
        let profile = self.core.obtain_profile(&ctx.user_id).await?;
        let driver = self
            .core
            .factory()
            .create(&profile.device_type, &profile.device_options)?;
        Ok(ThermostatDetails {
            friendly_name: driver.friendly_name().to_string(),
            manufacturer_name: driver.manufacturer_name().to_string(),
            description: driver.description().to_string(),
            card: driver.card(),
        })
    }

    /// Append the hold countdown when the device is on, mirroring the live
    /// scheduler state.
    async fn describe_holding(
        &self,
        user_id: &str,
        device: &Snapshot,
        messages: &mut Vec<String>,
        qualifier: Option<&str>,
    ) -> Result<(), HeatHubError> {
        if !device.is_on() {
            return Ok(());
        }
        let qualifier = qualifier.map_or_else(String::new, |q| format!(" {q}"));
        let state = self.scheduler.status(user_id).await?;
        match state.remaining_at(now()) {
            Some(remaining) => messages.push(format!(
                "The heating is{qualifier} on and will turn off in {}.",
                remaining.speak()
            )),
            None => messages.push(format!("The heating is{qualifier} on.")),
        }
        Ok(())
    }
}

fn summarize(
    requested: Option<HoldDuration>,
    intent: &HoldIntent,
    updated: &Snapshot,
) -> Vec<String> {
    let Some(armed) = intent.duration.filter(|_| intent.holding) else {
        let mut messages = Vec::new();
        if requested.is_some() {
            messages.push("Hold time is not supported on this device.".to_string());
        }
        if updated.is_on() {
            messages.push("The heating is now on.".to_string());
        }
        return messages;
    };

    let text = armed.speak();
    tracing::debug!(duration = %armed, execution_id = ?intent.execution_id, "holding");
    if updated.is_on() {
        vec![format!("The heating is now on and will turn off in {text}.")]
    } else {
        vec![format!("The heating will turn off in {text}.")]
    }
}

fn log_status(device: &Snapshot) {
    tracing::debug!(
        current = device.current_temperature,
        target = device.target_temperature,
        status = %device.status,
        "device status",
    );
}
