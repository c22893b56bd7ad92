//! The driver variants behind one [`ThermostatDriver`] implementation.

use std::future::Future;

use heathub_app::ports::ThermostatDriver;
use heathub_domain::device::{Card, Snapshot};
use heathub_domain::error::HeatHubError;

use crate::mock::MockDriver;
use crate::salus::SalusDriver;

/// A concrete driver picked by the factory.
///
/// The port trait is not object safe, so runtime selection goes through this
/// enum instead of a boxed trait object.
#[derive(Debug)]
pub enum Driver {
    Salus(SalusDriver),
    Mock(MockDriver),
}

impl ThermostatDriver for Driver {
    fn login(&mut self) -> impl Future<Output = Result<(), HeatHubError>> + Send {
        async move {
            match self {
                Self::Salus(driver) => driver.login().await?,
                Self::Mock(driver) => driver.login().await?,
            }
            Ok(())
        }
    }

    fn logout(&mut self) -> impl Future<Output = Result<(), HeatHubError>> + Send {
        async move {
            match self {
                Self::Salus(driver) => driver.logout().await?,
                Self::Mock(driver) => driver.logout().await?,
            }
            Ok(())
        }
    }

    fn online(&self) -> impl Future<Output = Result<bool, HeatHubError>> + Send {
        async move {
            let online = match self {
                Self::Salus(driver) => driver.online().await?,
                Self::Mock(driver) => driver.online().await?,
            };
            Ok(online)
        }
    }

    fn device(&self) -> impl Future<Output = Result<Snapshot, HeatHubError>> + Send {
        async move {
            let snapshot = match self {
                Self::Salus(driver) => driver.device().await?,
                Self::Mock(driver) => driver.device().await?,
            };
            Ok(snapshot)
        }
    }

    fn set_temperature(
        &self,
        target: f64,
    ) -> impl Future<Output = Result<(), HeatHubError>> + Send {
        async move {
            match self {
                Self::Salus(driver) => driver.set_temperature(target).await?,
                Self::Mock(driver) => driver.set_temperature(target).await?,
            }
            Ok(())
        }
    }

    fn turn_water_on_for(
        &self,
        hours: u64,
    ) -> impl Future<Output = Result<(), HeatHubError>> + Send {
        async move {
            match self {
                Self::Salus(driver) => driver.turn_water_on_for(hours).await?,
                Self::Mock(driver) => driver.turn_water_on_for(hours).await?,
            }
            Ok(())
        }
    }

    fn friendly_name(&self) -> &str {
        match self {
            Self::Salus(driver) => driver.friendly_name(),
            Self::Mock(driver) => driver.friendly_name(),
        }
    }

    fn manufacturer_name(&self) -> &str {
        match self {
            Self::Salus(driver) => driver.manufacturer_name(),
            Self::Mock(driver) => driver.manufacturer_name(),
        }
    }

    fn description(&self) -> &str {
        match self {
            Self::Salus(driver) => driver.description(),
            Self::Mock(driver) => driver.description(),
        }
    }

    fn card(&self) -> Card {
        match self {
            Self::Salus(driver) => driver.card(),
            Self::Mock(driver) => driver.card(),
        }
    }

    fn should_defer(&self) -> bool {
        match self {
            Self::Salus(driver) => driver.should_defer(),
            Self::Mock(_) => false,
        }
    }
}
