//! Glint Animation System
//!
//! Easing curves and tick scheduling shared by all Glint effects.
//!
//! # Features
//!
//! - **Easing Curves**: pure normalized-progress mappings selected by name
//! - **Scheduling**: cancellable per-instance frame and interval handles
//! - **Clocks**: monotonic millisecond timestamps

pub mod easing;
pub mod scheduler;

pub use easing::{ease, Curve};
pub use scheduler::{
    Clock, ManualScheduler, MonotonicClock, Scheduler, Tick, TickHandle, MIN_INTERVAL_MS,
};
