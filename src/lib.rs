//! Hotline - an endlessly looping strip of elements
//!
//! A strip of sibling items inside a container scrolls continuously along
//! one axis. When the lead item leaves the container it is physically moved
//! to the other end of the strip, so the loop never shows a gap. Users can
//! pause it by hovering, drag it, scroll it with the wheel, or snap an item
//! into a zone of the container.
//!
//! ## Layers
//!
//! - [`engine`]: the pure state machine. Loop tick, gestures, motions,
//!   options, notifications. Testable without a browser.
//! - [`host`]: the [`Strip`] trait the engine measures and mutates, with an
//!   in-memory layout and a web-sys backed DOM implementation.
//! - [`schedule`]: the [`Scheduler`] trait plus a virtual clock and a
//!   gloo-timers implementation.
//! - [`Hotline`]: drives an engine with a scheduler, fans events out to
//!   listeners and hands out [`Pending`] results for timed motions.
//!
//! ## Example
//!
//! ```rust
//! use hotline::{Hotline, ManualScheduler, MemoryStrip, Rect};
//!
//! let mut strip = MemoryStrip::horizontal(Rect::new(0.0, 0.0, 300.0, 40.0));
//! for _ in 0..5 {
//!     strip.push_item(100.0, 40.0, 10.0);
//! }
//!
//! let clock = ManualScheduler::new();
//! let hotline = Hotline::new(strip, clock.clone());
//! hotline.start().unwrap();
//! clock.advance_by(100);
//! assert!(hotline.position() < 0.0);
//! ```

pub mod engine;
pub mod error;
pub mod host;
pub mod schedule;

mod hotline;
mod pending;

pub use engine::{
    Axis, Engine, EngineState, Event, EventKind, Gesture, Hold, Input, MotionId, Moved, Options,
    Phase, Pointer, Tick, Value, Zone,
};
pub use error::{HotlineError, Result};
pub use host::{DomStrip, MemoryStrip, NodeId, Rect, Strip};
pub use hotline::{Hotline, MotionResult};
pub use pending::{Pending, Resolver};
pub use schedule::{GlooScheduler, ManualScheduler, Scheduler, TimerId};

/// Attribute prefix recognised on the container element
pub const ATTRIBUTE_PREFIX: &str = "data-hotline-";
