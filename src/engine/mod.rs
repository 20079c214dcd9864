//! Engine - the loop, gesture and motion state machine
//!
//! An [`Engine`] owns a [`Strip`] and an [`EngineState`]. It never keeps
//! time itself: the loop advances when [`Engine::tick`] is called, motions
//! advance on [`Engine::step_motion`], and gestures arrive as method calls.
//! Every change of position goes through [`Engine::set_position`].
//!
//! - [`transfer`]: the loop tick and item recycling
//! - [`gesture`]: hover, press, drag, release, wheel
//! - [`motion`]: forward, backward and magnetize
//! - [`config`]: options and attribute coercion
//! - [`event`]: notifications

pub mod config;
pub mod event;
pub mod gesture;
pub mod motion;
pub mod position;
pub mod state;
pub mod transfer;

use crate::error::{HotlineError, Result};
use crate::host::{Strip, finite_or_zero};

pub use crate::host::Axis;
pub use config::{Options, Value};
pub use event::{Event, EventKind, Notifier};
pub use motion::{MIN_TRAVEL, MOTION_TIMEOUT, MotionId, Moved};
pub use state::{EngineState, Gesture, Hold, Input, Phase, Pointer, Zone};
pub use transfer::Tick;

use motion::Motion;

/// Fewest items a strip needs before it can loop
pub const MIN_ITEMS: usize = 2;

/// Looping strip engine over a host strip
pub struct Engine<S: Strip> {
    strip: S,
    state: EngineState,
    notifier: Notifier<S::Node>,
    motion: Option<Motion<S::Node>>,
    finished: Vec<(MotionId, Result<Moved>)>,
    next_motion: u64,
}

impl<S: Strip> Engine<S> {
    pub fn new(strip: S) -> Self {
        Self::with_options(strip, Options::default())
    }

    pub fn with_options(strip: S, options: Options) -> Self {
        let mut engine = Self {
            strip,
            state: EngineState {
                options,
                ..EngineState::default()
            },
            notifier: Notifier::default(),
            motion: None,
            finished: Vec::new(),
            next_motion: 0,
        };
        engine.state.position = engine.read_position();
        if engine.strip.len() >= MIN_ITEMS {
            engine.emit(Event::Ready);
        }
        engine
    }

    /// Begin looping. Refused while the strip has fewer than
    /// [`MIN_ITEMS`] items; the engine then stays stopped.
    pub fn start(&mut self) -> Result<()> {
        if self.state.phase.is_started() {
            return Ok(());
        }
        let found = self.strip.len();
        if found < MIN_ITEMS {
            tracing::debug!("not starting, strip has {} items", found);
            return Err(HotlineError::TooFewItems {
                required: MIN_ITEMS,
                found,
            });
        }
        self.state.position = self.read_position();
        self.state.phase = Phase::Idle;
        tracing::info!(
            "hotline started: {} items, {} axis",
            found,
            self.state.options.axis.name()
        );
        self.emit(Event::Started);
        Ok(())
    }

    /// Stop looping. Drops any gesture and cancels the running motion.
    pub fn stop(&mut self) {
        if !self.state.phase.is_started() {
            return;
        }
        self.cancel_motion();
        self.state.phase = Phase::Stopped;
        tracing::info!("hotline stopped at {}", self.state.position);
        self.emit(Event::Stopped);
    }

    /// Apply one attribute-style option, e.g. `("data-hotline-step", "5")`
    pub fn configure(&mut self, name: &str, raw: &str) -> Result<()> {
        let previous_axis = self.state.options.axis;
        let (name, value) = self
            .state
            .options
            .apply(name, raw)
            .inspect_err(|err| tracing::warn!("configuration rejected: {}", err))?;

        if self.state.options.axis != previous_axis {
            if let Some(lead) = self.strip.first() {
                self.strip.set_margin(&lead, previous_axis, None);
            }
            self.state.position = self.read_position();
        }
        tracing::debug!("configured {} = {}", name, value);
        self.emit(Event::Configured { name, value });
        Ok(())
    }

    /// Apply every `data-hotline-*` attribute found on the container.
    /// Returns how many were accepted.
    pub fn configure_from_attributes(&mut self) -> usize {
        self.strip
            .attributes()
            .into_iter()
            .filter(|(name, _)| config::is_option_attribute(name))
            .filter(|(name, value)| self.configure(name, value).is_ok())
            .count()
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn options(&self) -> &Options {
        &self.state.options
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn position(&self) -> f64 {
        self.state.position
    }

    pub fn strip(&self) -> &S {
        &self.strip
    }

    pub fn strip_mut(&mut self) -> &mut S {
        &mut self.strip
    }

    pub fn set_event_enabled(&mut self, kind: EventKind, enabled: bool) {
        self.notifier.set_enabled(kind, enabled);
    }

    /// Take every event emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<Event<S::Node>> {
        self.notifier.drain()
    }

    /// Record that the attribute observer started or stopped
    pub fn observer_changed(&mut self, running: bool) {
        let event = if running {
            Event::ObserverStarted
        } else {
            Event::ObserverStopped
        };
        self.emit(event);
    }

    pub(crate) fn emit(&mut self, event: Event<S::Node>) {
        self.notifier.emit(event);
    }

    /// Lead margin as stored on the item, zero when unset
    fn read_position(&self) -> f64 {
        self.strip
            .first()
            .map(|lead| finite_or_zero(self.strip.margin(&lead, self.state.options.axis)))
            .unwrap_or(0.0)
    }
}
