//! Scheduling - timers the driver uses for ticks, motions and timeouts
//!
//! Everything runs on one cooperative queue. A scheduler never runs a task
//! while another one is still executing, and a task may schedule or cancel
//! timers from inside its own callback.

pub mod gloo;
pub mod manual;

use std::time::Duration;

pub use gloo::GlooScheduler;
pub use manual::ManualScheduler;

/// Handle to a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Source of repeating and one-shot callbacks
pub trait Scheduler {
    /// Run `task` every `every` until cancelled
    fn repeat(&self, every: Duration, task: Box<dyn FnMut()>) -> TimerId;

    /// Run `task` once after `after`
    fn once(&self, after: Duration, task: Box<dyn FnOnce()>) -> TimerId;

    /// Cancel a task; unknown or finished ids are ignored
    fn cancel(&self, id: TimerId);
}

/// Milliseconds for browser timer APIs, at least 1
pub(crate) fn millis(duration: Duration) -> u32 {
    duration.as_millis().clamp(1, u32::MAX as u128) as u32
}
