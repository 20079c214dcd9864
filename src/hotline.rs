//! Hotline - an engine wired to timers, listeners and the page
//!
//! The driver owns the [`Engine`] behind `Rc<RefCell<_>>` and is the only
//! thing that borrows it. After each call it settles:
//!
//! 1. motion timers follow the engine's running motion (one stepping
//!    timer plus one timeout per motion)
//! 2. finished motions resolve their [`Pending`] results
//! 3. collected events go to listeners, with the engine borrow released
//!
//! Listeners may call back into the driver. Events raised while a dispatch
//! is running are queued behind it.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::{Rc, Weak};

use crate::engine::{
    Engine, Event, EventKind, MOTION_TIMEOUT, MotionId, Moved, Options, Phase, Pointer, Tick,
    Zone, config,
};
use crate::error::Result;
use crate::host::Strip;
use crate::pending::{Pending, Resolver};
use crate::schedule::{Scheduler, TimerId};

/// Outcome of a forward, backward or magnetize motion
pub type MotionResult = Result<Moved>;

type Listener<N> = Rc<dyn Fn(&Event<N>)>;

struct MotionTimers {
    motion: MotionId,
    step: TimerId,
    timeout: TimerId,
}

struct Shared<S: Strip, T: Scheduler> {
    engine: RefCell<Engine<S>>,
    scheduler: T,
    ticker: Cell<Option<TimerId>>,
    observing: Cell<bool>,
    motion_timers: RefCell<Option<MotionTimers>>,
    resolvers: RefCell<HashMap<MotionId, Resolver<MotionResult>>>,
    listeners: RefCell<Vec<Listener<S::Node>>>,
    /// Events raised while the driver was built, replayed to each listener
    greeting: Vec<Event<S::Node>>,
    queue: RefCell<VecDeque<Event<S::Node>>>,
    dispatching: Cell<bool>,
}

/// A running (or startable) looping strip.
///
/// Cloning gives another handle to the same strip.
pub struct Hotline<S: Strip + 'static, T: Scheduler + 'static> {
    shared: Rc<Shared<S, T>>,
}

impl<S: Strip + 'static, T: Scheduler + 'static> Clone for Hotline<S, T> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<S: Strip + 'static, T: Scheduler + 'static> Hotline<S, T> {
    /// Wrap a strip. Options come from the defaults and then from the
    /// container's `data-hotline-*` attributes.
    pub fn new(strip: S, scheduler: T) -> Self {
        Self::with_options(strip, scheduler, Options::default())
    }

    pub fn with_options(strip: S, scheduler: T, options: Options) -> Self {
        let mut engine = Engine::with_options(strip, options);
        let applied = engine.configure_from_attributes();
        if applied > 0 {
            tracing::debug!("{} options read from container attributes", applied);
        }
        let greeting = engine.drain_events();
        let hotline = Self {
            shared: Rc::new(Shared {
                engine: RefCell::new(engine),
                scheduler,
                ticker: Cell::new(None),
                observing: Cell::new(false),
                motion_timers: RefCell::new(None),
                resolvers: RefCell::new(HashMap::new()),
                listeners: RefCell::new(Vec::new()),
                greeting,
                queue: RefCell::new(VecDeque::new()),
                dispatching: Cell::new(false),
            }),
        };
        hotline.settle();
        hotline
    }

    fn from_weak(weak: &Weak<Shared<S, T>>) -> Option<Self> {
        weak.upgrade().map(|shared| Self { shared })
    }

    /// Start the loop timer and, when `observe` is set, the attribute
    /// observer
    pub fn start(&self) -> Result<()> {
        let started = self.shared.engine.borrow_mut().start();
        if started.is_ok() {
            if self.shared.ticker.get().is_none() {
                self.schedule_ticker();
            }
            if self.shared.engine.borrow().options().observe {
                self.start_observer();
            }
        }
        self.settle();
        started
    }

    /// Stop the loop. Timers and the observer are released, a running
    /// motion is rejected as cancelled.
    pub fn stop(&self) {
        if let Some(ticker) = self.shared.ticker.take() {
            self.shared.scheduler.cancel(ticker);
        }
        self.stop_observer();
        self.shared.engine.borrow_mut().stop();
        self.settle();
    }

    /// Run one loop tick now
    pub fn tick(&self) -> Tick {
        let tick = self.shared.engine.borrow_mut().tick();
        self.settle();
        tick
    }

    /// Apply one option by name, with or without the attribute prefix
    pub fn configure(&self, name: &str, raw: &str) -> Result<()> {
        let (interval, observe) = {
            let engine = self.shared.engine.borrow();
            (engine.options().interval, engine.options().observe)
        };
        let result = self.shared.engine.borrow_mut().configure(name, raw);

        let (options, running) = {
            let engine = self.shared.engine.borrow();
            (engine.options().clone(), engine.phase().is_started())
        };
        if result.is_ok() && running {
            if options.interval != interval {
                if let Some(ticker) = self.shared.ticker.take() {
                    self.shared.scheduler.cancel(ticker);
                }
                self.schedule_ticker();
            }
            if options.observe != observe {
                if options.observe {
                    self.start_observer();
                } else {
                    self.stop_observer();
                }
            }
        }
        self.settle();
        result
    }

    /// Register a listener for every enabled event. The listener first
    /// receives the events raised while the driver was built (`ready`,
    /// options read from attributes).
    pub fn on(&self, listener: impl Fn(&Event<S::Node>) + 'static) {
        let listener: Listener<S::Node> = Rc::new(listener);
        self.shared.listeners.borrow_mut().push(Rc::clone(&listener));
        for event in &self.shared.greeting {
            listener(event);
        }
    }

    pub fn set_event_enabled(&self, kind: EventKind, enabled: bool) {
        self.shared
            .engine
            .borrow_mut()
            .set_event_enabled(kind, enabled);
    }

    pub fn set_position(&self, to: f64) -> Option<f64> {
        let delta = self.shared.engine.borrow_mut().set_position(to);
        self.settle();
        delta
    }

    /// Scroll until the next item is recycled to the end
    pub fn forward(&self) -> Pending<MotionResult> {
        self.track(|engine| engine.forward())
    }

    /// Scroll until the next item is recycled to the beginning
    pub fn backward(&self) -> Pending<MotionResult> {
        self.track(|engine| engine.backward())
    }

    /// Snap `item` (or the item containing it) into `zone`
    pub fn magnetize(&self, item: S::Node, zone: Zone) -> Pending<MotionResult> {
        self.track(move |engine| engine.magnetize(item, zone))
    }

    pub fn hover_enter(&self) {
        self.shared.engine.borrow_mut().hover_enter();
        self.settle();
    }

    pub fn hover_leave(&self) {
        self.shared.engine.borrow_mut().hover_leave();
        self.settle();
    }

    pub fn freeze(&self) -> bool {
        let frozen = self.shared.engine.borrow_mut().freeze();
        self.settle();
        frozen
    }

    pub fn unfreeze(&self) {
        self.shared.engine.borrow_mut().unfreeze();
        self.settle();
    }

    pub fn press(&self, pointer: Pointer) -> bool {
        let pressed = self.shared.engine.borrow_mut().press(pointer);
        self.settle();
        pressed
    }

    pub fn drag(&self, pointer: Pointer) -> Option<f64> {
        let delta = self.shared.engine.borrow_mut().drag(pointer);
        self.settle();
        delta
    }

    /// End a gesture. `target` is the node under the pointer, used to
    /// pick the item to magnetize.
    pub fn release(&self, pointer: Pointer, target: Option<S::Node>) -> Option<MotionId> {
        let motion = self.shared.engine.borrow_mut().release(pointer, target);
        self.settle();
        motion
    }

    pub fn wheel(&self, native: f64) -> Option<f64> {
        let delta = self.shared.engine.borrow_mut().wheel(native);
        self.settle();
        delta
    }

    pub fn position(&self) -> f64 {
        self.shared.engine.borrow().position()
    }

    pub fn phase(&self) -> Phase {
        self.shared.engine.borrow().phase()
    }

    pub fn is_observing(&self) -> bool {
        self.shared.observing.get()
    }

    /// Read access to the engine; do not call back into the driver from `f`
    pub fn with_engine<R>(&self, f: impl FnOnce(&Engine<S>) -> R) -> R {
        f(&self.shared.engine.borrow())
    }

    pub fn scheduler(&self) -> &T {
        &self.shared.scheduler
    }

    fn track(
        &self,
        begin: impl FnOnce(&mut Engine<S>) -> Result<MotionId>,
    ) -> Pending<MotionResult> {
        let begun = begin(&mut self.shared.engine.borrow_mut());
        let pending = match begun {
            Ok(id) => {
                let (pending, resolver) = Pending::new();
                self.shared.resolvers.borrow_mut().insert(id, resolver);
                pending
            }
            Err(err) => Pending::ready(Err(err)),
        };
        self.settle();
        pending
    }

    fn schedule_ticker(&self) {
        let every = self.shared.engine.borrow().options().interval;
        let weak = Rc::downgrade(&self.shared);
        let id = self.shared.scheduler.repeat(
            every,
            Box::new(move || {
                if let Some(hotline) = Self::from_weak(&weak) {
                    hotline.tick();
                }
            }),
        );
        self.shared.ticker.set(Some(id));
    }

    fn start_observer(&self) {
        if self.shared.observing.get() {
            return;
        }
        let weak = Rc::downgrade(&self.shared);
        let watching = self
            .shared
            .engine
            .borrow_mut()
            .strip_mut()
            .watch(Box::new(move |name, value| {
                if !config::is_option_attribute(name) {
                    return;
                }
                if let Some(hotline) = Self::from_weak(&weak) {
                    // Rejections are logged by the engine.
                    let _ = hotline.configure(name, value);
                }
            }));
        if watching {
            self.shared.observing.set(true);
            self.shared.engine.borrow_mut().observer_changed(true);
        } else {
            tracing::warn!("host cannot observe attributes");
        }
    }

    fn stop_observer(&self) {
        if !self.shared.observing.replace(false) {
            return;
        }
        let mut engine = self.shared.engine.borrow_mut();
        engine.strip_mut().unwatch();
        engine.observer_changed(false);
    }

    fn settle(&self) {
        self.sync_motion_timers();
        self.resolve_finished();
        self.dispatch();
    }

    fn sync_motion_timers(&self) {
        let (current, interval) = {
            let engine = self.shared.engine.borrow();
            (engine.motion_id(), engine.options().interval)
        };
        let stale = {
            let mut timers = self.shared.motion_timers.borrow_mut();
            match timers.as_ref() {
                Some(t) if Some(t.motion) == current => return,
                _ => timers.take(),
            }
        };
        if let Some(stale) = stale {
            self.shared.scheduler.cancel(stale.step);
            self.shared.scheduler.cancel(stale.timeout);
        }
        let Some(motion) = current else {
            return;
        };

        let weak = Rc::downgrade(&self.shared);
        let step = self.shared.scheduler.repeat(
            interval,
            Box::new(move || {
                if let Some(hotline) = Self::from_weak(&weak) {
                    hotline.shared.engine.borrow_mut().step_motion(motion);
                    hotline.settle();
                }
            }),
        );
        let weak = Rc::downgrade(&self.shared);
        let timeout = self.shared.scheduler.once(
            MOTION_TIMEOUT,
            Box::new(move || {
                if let Some(hotline) = Self::from_weak(&weak) {
                    hotline.shared.engine.borrow_mut().expire_motion(motion);
                    hotline.settle();
                }
            }),
        );
        *self.shared.motion_timers.borrow_mut() = Some(MotionTimers {
            motion,
            step,
            timeout,
        });
    }

    fn resolve_finished(&self) {
        let finished = self.shared.engine.borrow_mut().take_finished();
        for (id, outcome) in finished {
            let resolver = self.shared.resolvers.borrow_mut().remove(&id);
            if let Some(resolver) = resolver {
                resolver.settle(outcome);
            }
        }
    }

    fn dispatch(&self) {
        let events = self.shared.engine.borrow_mut().drain_events();
        self.shared.queue.borrow_mut().extend(events);
        if self.shared.dispatching.replace(true) {
            return;
        }
        loop {
            let Some(event) = self.shared.queue.borrow_mut().pop_front() else {
                break;
            };
            let listeners = self.shared.listeners.borrow().clone();
            for listener in listeners {
                listener(&event);
            }
        }
        self.shared.dispatching.set(false);
    }
}

impl<S: Strip, T: Scheduler> Drop for Shared<S, T> {
    fn drop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            self.scheduler.cancel(ticker);
        }
        if let Some(timers) = self.motion_timers.get_mut().take() {
            self.scheduler.cancel(timers.step);
            self.scheduler.cancel(timers.timeout);
        }
        let engine = self.engine.get_mut();
        engine.cancel_motion();
        let resolvers = self.resolvers.get_mut();
        for (id, outcome) in engine.take_finished() {
            if let Some(resolver) = resolvers.remove(&id) {
                resolver.settle(outcome);
            }
        }
        if self.observing.get() {
            engine.strip_mut().unwatch();
        }
    }
}
