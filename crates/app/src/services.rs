//! Orchestration services — use-cases driving profiles, drivers, and holds.

pub mod core;
pub mod defaults_service;
pub mod thermostat_service;
pub mod water_service;

pub use core::ServiceCore;
pub use defaults_service::{DefaultSetting, DefaultsService};
pub use thermostat_service::{ThermostatDetails, ThermostatService};
pub use water_service::WaterService;
