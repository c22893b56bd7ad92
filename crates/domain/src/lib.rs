//! # heathub-domain
//!
//! Pure domain model for the heathub heating orchestration system.
//!
//! ## Responsibilities
//! - Foundational types: error conventions, timestamps, spoken durations
//! - Define **Profiles** (per-user device config, defaults, and the
//!   outstanding hold handle)
//! - Define **Device snapshots** (ephemeral readings of one controller)
//! - Define **Holds** (the timer service's view of a scheduled turn-off)
//! - Define **Commands** (per-request context and the deferred
//!   set-temperature command)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod time;

pub mod command;
pub mod device;
pub mod duration;
pub mod hold;
pub mod profile;
