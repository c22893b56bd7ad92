//! # heathub-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `ProfileRepository` — find/add/save per-user profiles
//!   - `ThermostatDriver` + `DriverFactory` — one physical/remote controller
//!   - `TimerClient` — the external durable-timer service
//!   - `CommandPublisher` — the asynchronous message channel
//! - Define **driving/inbound ports** as use-case structs:
//!   - `ThermostatService` — launch, status, turn up/down/on/off, set temperature
//!   - `DefaultsService` — read and update per-user defaults
//!   - `WaterService` — hot-water boost
//! - Provide the **hold scheduler** (durable + no-op variants) and the
//!   set-temperature **dispatch strategies** (immediate + deferred)
//! - Provide **in-process infrastructure** (command bus) that doesn't need IO
//!
//! ## Dependency rule
//! Depends on `heathub-domain` only (plus `tokio::sync` for channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod command_bus;
pub mod dispatch;
pub mod hold;
pub mod ports;
pub mod response;
pub mod services;

#[cfg(test)]
pub(crate) mod test_support;
