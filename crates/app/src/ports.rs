//! Port definitions — traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod driver;
pub mod publisher;
pub mod repository;
pub mod scheduler;
pub mod timer;

pub use driver::{DriverFactory, ThermostatDriver};
pub use publisher::CommandPublisher;
pub use repository::ProfileRepository;
pub use scheduler::HoldScheduler;
pub use timer::{ExecutionRecord, TimerClient};
