//! Defaults service — reading and updating the per-user default settings.

use heathub_domain::command::CommandContext;
use heathub_domain::duration::HoldDuration;
use heathub_domain::error::HeatHubError;
use heathub_domain::profile::Profile;

use crate::ports::{DriverFactory, ProfileRepository, ThermostatDriver};
use crate::response::ServiceResponse;
use crate::services::core::{ServiceCore, speak_temperature};

/// One of the four default fields and its new value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultSetting {
    OnTemp(f64),
    OffTemp(f64),
    Duration(HoldDuration),
    WaterDuration(HoldDuration),
}

impl DefaultSetting {
    fn apply(self, profile: &mut Profile) {
        match self {
            Self::OnTemp(value) => profile.default_on_temp = value,
            Self::OffTemp(value) => profile.default_off_temp = value,
            Self::Duration(value) => profile.default_duration = value,
            Self::WaterDuration(value) => profile.default_water_duration = value,
        }
    }

    fn name_text(self) -> &'static str {
        match self {
            Self::OnTemp(_) => "on temperature",
            Self::OffTemp(_) => "off temperature",
            Self::Duration(_) => "duration",
            Self::WaterDuration(_) => "water duration",
        }
    }

    fn value_text(self) -> String {
        match self {
            Self::OnTemp(value) | Self::OffTemp(value) => {
                format!("{} degrees", speak_temperature(value))
            }
            Self::Duration(value) | Self::WaterDuration(value) => value.speak(),
        }
    }
}

/// Use-cases for the profile's default settings. Never touches the device,
/// though the presentation card still comes from the driver's metadata.
pub struct DefaultsService<F, R> {
    core: ServiceCore<F, R>,
}

impl<F, R> DefaultsService<F, R>
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

    /// Update one default field and persist it.
    #[tracing::instrument(skip(self))]
    pub async fn set_default(
        &self,
        ctx: &CommandContext,
        setting: DefaultSetting,
    ) -> Result<ServiceResponse, HeatHubError> {
        let mut profile = self.core.obtain_profile(&ctx.user_id).await?;
        setting.apply(&mut profile);
        self.core.repository().save(&profile).await?;

        let driver = self
            .core
            .factory()
            .create(&profile.device_type, &profile.device_options)?;
        Ok(ServiceResponse::message(format!(
            "The default {} has been set to {}.",
            setting.name_text(),
            setting.value_text()
        ))
        .with_card(driver.card()))
    }

    /// Read all four defaults back.
    #[tracing::instrument(skip(self))]
    pub async fn defaults(&self, ctx: &CommandContext) -> Result<ServiceResponse, HeatHubError> {
        let profile = self.core.obtain_profile(&ctx.user_id).await?;
        let driver = self
            .core
            .factory()
            .create(&profile.device_type, &profile.device_options)?;

        Ok(ServiceResponse {
            messages: vec![
                format!(
                    "The default on temperature is {} degrees.",
                    speak_temperature(profile.default_on_temp)
                ),
                format!(
                    "The default off temperature is {} degrees.",
                    speak_temperature(profile.default_off_temp)
                ),
                format!(
                    "The default duration is {}.",
                    profile.default_duration.speak()
                ),
                format!(
                    "The default water duration is {}.",
                    profile.default_water_duration.speak()
                ),
            ],
            card: Some(driver.card()),
            ..ServiceResponse::default()
        })
    }
}
