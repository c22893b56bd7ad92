//! Shared service plumbing — profile resolution, driver sessions, checks.

use heathub_domain::device::Snapshot;
use heathub_domain::error::{HeatHubError, PreconditionError};
use heathub_domain::profile::{Profile, TEMPLATE_USER_ID};

use crate::ports::{DriverFactory, ProfileRepository, ThermostatDriver};

/// Profile resolution and driver session handling shared by every service.
pub struct ServiceCore<F, R> {
    factory: F,
    repository: R,
}

impl<F, R> ServiceCore<F, R>
where
    F: DriverFactory,
    R: ProfileRepository,
{
    pub fn new(factory: F, repository: R) -> Self {
        Self { factory, repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Resolve the caller's profile, provisioning one on first contact.
    ///
    /// A new user gets a copy of the `"template"` profile re-keyed under
    /// their id when one exists, otherwise a minimal stub. Either way the
    /// new profile is persisted before use.
    #[tracing::instrument(skip(self))]
    pub async fn obtain_profile(&self, user_id: &str) -> Result<Profile, HeatHubError> {
        if let Some(profile) = self.repository.find(user_id).await? {
            return Ok(profile);
        }

        let profile = match self.repository.find(TEMPLATE_USER_ID).await? {
            Some(template) => template.for_user(user_id),
            None => Profile::stub(user_id),
        };
        tracing::info!(user_id, "provisioning profile for new user");
        self.repository.add(&profile).await?;
        Ok(profile)
    }

    /// Build the profile's driver and open a session on it.
    pub async fn login(&self, profile: &Profile) -> Result<F::Driver, HeatHubError> {
        tracing::debug!(device_type = %profile.device_type, "finding thermostat");
        let mut driver = self
            .factory
            .create(&profile.device_type, &profile.device_options)?;
        driver.login().await?;
        Ok(driver)
    }

    /// Fail fast when the backend reports the device offline.
    pub async fn verify_online<D: ThermostatDriver>(
        &self,
        driver: &D,
    ) -> Result<(), HeatHubError> {
        if driver.online().await? {
            Ok(())
        } else {
            Err(PreconditionError::Offline.into())
        }
    }

    /// Fail fast when the backend answered with its "could not reach the
    /// device" sentinel reading.
    pub fn verify_contactable(&self, snapshot: &Snapshot) -> Result<(), HeatHubError> {
        if snapshot.contactable {
            Ok(())
        } else {
            Err(PreconditionError::Uncontactable.into())
        }
    }

    /// Close the driver session, logging instead of propagating failures so
    /// an operation's own outcome is never masked by logout.
    pub async fn logout_quietly<D: ThermostatDriver>(&self, driver: &mut D) {
        if let Err(error) = driver.logout().await {
            tracing::warn!(%error, "logout failed");
        }
    }
}

/// Spoken rendering of a temperature: whole degrees without a decimal,
/// fractional ones with exactly one.
#[must_use]
pub fn speak_temperature(temp: f64) -> String {
    if (temp - temp.round()).abs() > f64::EPSILON {
        format!("{temp:.1}")
    } else {
        format!("{temp:.0}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heathub_domain::duration::HoldDuration;

    use crate::test_support::{FakeFactory, InMemoryProfileRepository};

    #[test]
    fn should_speak_whole_temperatures_without_decimals() {
        assert_eq!(speak_temperature(20.0), "20");
        assert_eq!(speak_temperature(21.5), "21.5");
        assert_eq!(speak_temperature(19.25), "19.2");
    }

    #[tokio::test]
    async fn should_return_existing_profile() {
        let mut profile = Profile::stub("user-1");
        profile.default_on_temp = 22.0;
        let core = ServiceCore::new(
            FakeFactory::idle(),
            InMemoryProfileRepository::with_profiles([profile]),
        );

        let found = core.obtain_profile("user-1").await.unwrap();
        assert_eq!(found.default_on_temp, 22.0);
    }

    #[tokio::test]
    async fn should_provision_new_user_from_template() {
        let mut template = Profile::stub(TEMPLATE_USER_ID);
        template.device_type = "mock".to_string();
        template.default_on_temp = 21.0;
        let core = ServiceCore::new(
            FakeFactory::idle(),
            InMemoryProfileRepository::with_profiles([template]),
        );

        let profile = core.obtain_profile("user-2").await.unwrap();

        assert_eq!(profile.user_id, "user-2");
        assert_eq!(profile.device_type, "mock");
        assert_eq!(profile.default_on_temp, 21.0);
        assert!(core.repository().get("user-2").is_some(), "persisted");
    }

    #[tokio::test]
    async fn should_provision_stub_without_template() {
        let core = ServiceCore::new(FakeFactory::idle(), InMemoryProfileRepository::default());

        let profile = core.obtain_profile("user-3").await.unwrap();

        assert_eq!(profile.user_id, "user-3");
        assert!(profile.execution_id.is_none());
        assert_eq!(profile.default_duration, HoldDuration::from_hours(1));
        assert!(core.repository().get("user-3").is_some(), "persisted");
    }

    #[tokio::test]
    async fn should_reject_offline_device() {
        let factory = FakeFactory::offline();
        let core = ServiceCore::new(factory, InMemoryProfileRepository::default());
        let profile = core.obtain_profile("user-1").await.unwrap();
        let driver = core.login(&profile).await.unwrap();

        let error = core.verify_online(&driver).await.unwrap_err();
        assert_eq!(
            error.to_string(),
            "Sorry, the thermostat is offline at the moment."
        );
    }

    #[tokio::test]
    async fn should_reject_uncontactable_reading() {
        let factory = FakeFactory::uncontactable();
        let core = ServiceCore::new(factory, InMemoryProfileRepository::default());
        let snapshot = core.factory().current_snapshot();

        let error = core.verify_contactable(&snapshot).unwrap_err();
        assert_eq!(error.to_string(), "Sorry, I couldn't contact the thermostat.");
    }
}
