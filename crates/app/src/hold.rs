//! Hold scheduling — durable turn-off timers and the no-op fallback.

pub mod durable;
pub mod noop;

pub use durable::DurableHoldScheduler;
pub use noop::NoopHoldScheduler;
