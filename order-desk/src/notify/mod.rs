//! Notification Scheduler
//!
//! Transient user feedback with per-notification expiry timers.

pub mod scheduler;

pub use scheduler::{DEFAULT_TTL, NotificationCenter};
