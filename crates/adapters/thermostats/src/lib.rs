//! # heathub-adapter-thermostats
//!
//! Device drivers for the heating controllers heathub can operate, plus the
//! factory that picks one from a profile's device-type tag.
//!
//! ## Responsibilities
//! - Implement the `ThermostatDriver` and `DriverFactory` ports from
//!   `heathub-app`
//! - Speak the Salus IT-500 web portal protocol (form login, ajax reads,
//!   `set.php` writes) over HTTP
//! - Provide a mock driver for tests and demo deployments
//!
//! ## Dependency rule
//! Depends on `heathub-app` (for port traits) and `heathub-domain` (for
//! domain types). The `app` and `domain` crates must never reference this
//! adapter.

pub mod driver;
pub mod error;
pub mod factory;
pub mod mock;
pub mod salus;

pub use driver::Driver;
pub use factory::ThermostatFactory;
