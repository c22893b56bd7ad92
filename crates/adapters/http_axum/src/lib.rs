//! # heathub-adapter-http-axum
//!
//! HTTP adapter using axum.
//!
//! ## Responsibilities
//! - Serve the REST API that front ends (voice skills, dashboards) call
//! - Expose the callback endpoint the durable-timer service posts to when an
//!   armed hold fires
//! - Translate [`HeatHubError`](heathub_domain::error::HeatHubError) into
//!   HTTP status codes while preserving the spoken error text
//!
//! ## Dependency rule
//! Depends on `heathub-app` (services and ports) and `heathub-domain`. The
//! `app` and `domain` crates must never reference this adapter.

pub mod error;
pub mod handlers;
pub mod router;
pub mod state;
