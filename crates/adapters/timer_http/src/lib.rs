//! # heathub-adapter-timer-http
//!
//! HTTP client for the external durable-timer service.
//!
//! ## Responsibilities
//! - Implement the `TimerClient` port from `heathub-app`
//! - Start, describe, and stop delayed turn-off executions over the timer
//!   service's REST API
//!
//! ## Dependency rule
//! Depends on `heathub-app` (for port traits) and `heathub-domain` (for
//! domain types). The `app` and `domain` crates must never reference this
//! adapter.

pub mod client;
pub mod error;

pub use client::HttpTimerClient;
