//! Notifications emitted by the engine
//!
//! Every kind can be switched off individually. The engine collects
//! enabled events in an outbox during a call; the driver drains it once
//! the engine is no longer borrowed and hands each event to listeners.

use std::collections::HashSet;
use std::fmt;

use super::config::Value;
use super::state::Zone;

/// Name-level identity of an [`Event`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Ready,
    Started,
    Stopped,
    Configured,
    Move,
    MoveMouse,
    MoveTouch,
    Position,
    Moving,
    MovedForward,
    MovedBackward,
    Magnetized,
    TransferBeginning,
    TransferEnd,
    ObserverStarted,
    ObserverStopped,
}

impl EventKind {
    pub const ALL: &[Self] = &[
        Self::Ready,
        Self::Started,
        Self::Stopped,
        Self::Configured,
        Self::Move,
        Self::MoveMouse,
        Self::MoveTouch,
        Self::Position,
        Self::Moving,
        Self::MovedForward,
        Self::MovedBackward,
        Self::Magnetized,
        Self::TransferBeginning,
        Self::TransferEnd,
        Self::ObserverStarted,
        Self::ObserverStopped,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::Started => "started",
            Self::Stopped => "stopped",
            Self::Configured => "configured",
            Self::Move => "move",
            Self::MoveMouse => "move.mouse",
            Self::MoveTouch => "move.touch",
            Self::Position => "position",
            Self::Moving => "moving",
            Self::MovedForward => "moved.forward",
            Self::MovedBackward => "moved.backward",
            Self::Magnetized => "magnetized",
            Self::TransferBeginning => "transfer.beginning",
            Self::TransferEnd => "transfer.end",
            Self::ObserverStarted => "observer.started",
            Self::ObserverStopped => "observer.stopped",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.name() == name)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A notification with its payload. `N` is the host's node handle.
#[derive(Debug, Clone, PartialEq)]
pub enum Event<N> {
    Ready,
    Started,
    Stopped,
    Configured { name: String, value: Value },
    Move { from: f64, to: f64 },
    MoveMouse { from: f64, to: f64 },
    MoveTouch { from: f64, to: f64 },
    Position { from: f64, to: f64 },
    Moving { from: f64, to: f64 },
    MovedForward,
    MovedBackward,
    Magnetized { zone: Zone },
    TransferBeginning { element: N, offset: f64 },
    TransferEnd { element: N, offset: f64 },
    ObserverStarted,
    ObserverStopped,
}

impl<N> Event<N> {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Ready => EventKind::Ready,
            Self::Started => EventKind::Started,
            Self::Stopped => EventKind::Stopped,
            Self::Configured { .. } => EventKind::Configured,
            Self::Move { .. } => EventKind::Move,
            Self::MoveMouse { .. } => EventKind::MoveMouse,
            Self::MoveTouch { .. } => EventKind::MoveTouch,
            Self::Position { .. } => EventKind::Position,
            Self::Moving { .. } => EventKind::Moving,
            Self::MovedForward => EventKind::MovedForward,
            Self::MovedBackward => EventKind::MovedBackward,
            Self::Magnetized { .. } => EventKind::Magnetized,
            Self::TransferBeginning { .. } => EventKind::TransferBeginning,
            Self::TransferEnd { .. } => EventKind::TransferEnd,
            Self::ObserverStarted => EventKind::ObserverStarted,
            Self::ObserverStopped => EventKind::ObserverStopped,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Signed size+gap carried by a transfer event
    pub fn transfer_offset(&self) -> Option<f64> {
        match self {
            Self::TransferBeginning { offset, .. } | Self::TransferEnd { offset, .. } => {
                Some(*offset)
            }
            _ => None,
        }
    }
}

/// Outbox with per-kind enable flags
#[derive(Debug)]
pub struct Notifier<N> {
    disabled: HashSet<EventKind>,
    outbox: Vec<Event<N>>,
}

impl<N> Default for Notifier<N> {
    fn default() -> Self {
        Self {
            disabled: HashSet::new(),
            outbox: Vec::new(),
        }
    }
}

impl<N> Notifier<N> {
    pub fn is_enabled(&self, kind: EventKind) -> bool {
        !self.disabled.contains(&kind)
    }

    pub fn set_enabled(&mut self, kind: EventKind, enabled: bool) {
        if enabled {
            self.disabled.remove(&kind);
        } else {
            self.disabled.insert(kind);
        }
    }

    pub fn emit(&mut self, event: Event<N>) {
        if self.is_enabled(event.kind()) {
            self.outbox.push(event);
        }
    }

    pub fn drain(&mut self) -> Vec<Event<N>> {
        std::mem::take(&mut self.outbox)
    }
}
