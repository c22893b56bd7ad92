//! Water service — boosting the hot water for a spoken duration.

use heathub_domain::command::CommandContext;
use heathub_domain::duration::HoldDuration;
use heathub_domain::error::HeatHubError;

use crate::ports::{DriverFactory, ProfileRepository, ThermostatDriver};
use crate::response::ServiceResponse;
use crate::services::core::ServiceCore;

/// Use-cases for the hot-water boost. The backend only takes whole hours,
/// so the requested duration is truncated on the wire but spoken in full.
pub struct WaterService<F, R> {
    core: ServiceCore<F, R>,
}

impl<F, R> WaterService<F, R>
where
    F: DriverFactory,
    R: ProfileRepository,
{
    pub fn new(core: ServiceCore<F, R>) -> Self {
        Self { core }
    }

    pub fn core(&self) -> &ServiceCore<F, R> {
        &self.core
    }

    /// Boost the water for `duration`, falling back to the profile default.
    #[tracing::instrument(skip(self))]
    pub async fn turn_water_on(
        &self,
        ctx: &CommandContext,
        duration: Option<HoldDuration>,
    ) -> Result<ServiceResponse, HeatHubError> {
        let profile = self.core.obtain_profile(&ctx.user_id).await?;
        let duration = duration.unwrap_or(profile.default_water_duration);
        let mut driver = self.core.login(&profile).await?;
        let result = self.turn_water_on_with(&driver, duration).await;
        self.core.logout_quietly(&mut driver).await;
        result
    }

    async fn turn_water_on_with(
        &self,
        driver: &F::Driver,
        duration: HoldDuration,
    ) -> Result<ServiceResponse, HeatHubError> {
        self.core.verify_online(driver).await?;
        let device = driver.device().await?;
        self.core.verify_contactable(&device)?;

        driver.turn_water_on_for(duration.whole_hours()).await?;

        Ok(ServiceResponse::message(format!(
            "The water is now on for {}.",
            duration.speak()
        ))
        .with_card(driver.card()))
    }

    /// Turn the boost off by writing a zero-hour boost.
    #[tracing::instrument(skip(self))]
    pub async fn turn_water_off(
        &self,
        ctx: &CommandContext,
    ) -> Result<ServiceResponse, HeatHubError> {
        let profile = self.core.obtain_profile(&ctx.user_id).await?;
        let mut driver = self.core.login(&profile).await?;
        let result = self.turn_water_off_with(&driver).await;
        self.core.logout_quietly(&mut driver).await;
        result
    }

    async fn turn_water_off_with(
        &self,
        driver: &F::Driver,
    ) -> Result<ServiceResponse, HeatHubError> {
        self.core.verify_online(driver).await?;
        let device = driver.device().await?;
        self.core.verify_contactable(&device)?;

        driver.turn_water_on_for(0).await?;

        Ok(ServiceResponse::message("The water is now off.").with_card(driver.card()))
    }
}
