//! Shared application state injected into every handler.

use std::sync::Arc;

use heathub_app::command_bus::InProcessCommandBus;
use heathub_app::services::defaults_service::DefaultsService;
use heathub_app::services::thermostat_service::ThermostatService;
use heathub_app::services::water_service::WaterService;

/// All application services behind one cheaply-clonable handle.
///
/// Generic over the driver factory `F`, profile repository `R`, and hold
/// scheduler `H` so the composition root decides the concrete wiring.
pub struct AppState<F, R, H> {
    inner: Arc<Inner<F, R, H>>,
}

struct Inner<F, R, H> {
    thermostat: ThermostatService<F, R, H>,
    defaults: DefaultsService<F, R>,
    water: WaterService<F, R>,
    command_bus: InProcessCommandBus,
}

impl<F, R, H> Clone for AppState<F, R, H> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<F, R, H> AppState<F, R, H> {
    #[must_use]
    pub fn new(
        thermostat: ThermostatService<F, R, H>,
        defaults: DefaultsService<F, R>,
        water: WaterService<F, R>,
        command_bus: InProcessCommandBus,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                thermostat,
                defaults,
                water,
                command_bus,
            }),
        }
    }

    #[must_use]
    pub fn thermostat(&self) -> &ThermostatService<F, R, H> {
        &self.inner.thermostat
    }

    #[must_use]
    pub fn defaults(&self) -> &DefaultsService<F, R> {
        &self.inner.defaults
    }

    #[must_use]
    pub fn water(&self) -> &WaterService<F, R> {
        &self.inner.water
    }

    #[must_use]
    pub fn command_bus(&self) -> &InProcessCommandBus {
        &self.inner.command_bus
    }
}
