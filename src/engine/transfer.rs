//! Loop tick - passive movement and recycling
//!
//! Each tick measures the lead item before touching anything:
//!
//! - lead (plus its separator) entirely before the container's leading
//!   edge: it moves to the tail, `transfer.end`
//! - lead starting after the leading edge: the tail moves in front of it,
//!   pre-positioned just outside the edge, `transfer.beginning`
//! - otherwise the strip advances by one step unless frozen
//!
//! Edges are compared after rounding so sub-pixel jitter cannot flip a
//! decision back and forth.

use crate::host::{Strip, finite_or_zero};

use super::{Engine, Event, MIN_ITEMS};

/// What a tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Engine is not started
    Stopped,
    /// Too few items to loop
    Stalled,
    /// An exit test fired but transfer is disabled
    Held,
    /// Frozen, driven by a motion, or zero step
    Idle,
    Advanced,
    TransferredToEnd,
    TransferredToBeginning,
}

impl<S: Strip> Engine<S> {
    /// Run one loop tick
    pub fn tick(&mut self) -> Tick {
        if !self.state.phase.is_started() {
            return Tick::Stopped;
        }
        if self.strip.len() < MIN_ITEMS {
            return Tick::Stalled;
        }
        let Some(lead) = self.strip.first() else {
            return Tick::Stalled;
        };

        let axis = self.state.options.axis;
        let edge = axis.start(&self.strip.container_rect()).round();
        let rect = self.strip.rect(&lead);
        let position = finite_or_zero(self.strip.margin(&lead, axis));
        let separator = finite_or_zero(self.strip.trailing_gap(&lead, axis));
        self.state.position = position;

        let start = axis.start(&rect);
        let size = axis.extent(&rect);
        let end = start + size + separator;

        if end.round() < edge {
            if !self.state.options.transfer {
                return Tick::Held;
            }
            self.transfer_to_end(lead, size + separator);
            return Tick::TransferredToEnd;
        }

        if start.round() > edge {
            if !self.state.options.transfer {
                return Tick::Held;
            }
            self.transfer_to_beginning(lead, separator);
            return Tick::TransferredToBeginning;
        }

        let step = self.state.options.step;
        if self.state.phase.is_frozen() || self.motion.is_some() || step == 0.0 {
            return Tick::Idle;
        }

        let to = position - step;
        self.set_position(to);
        self.emit(Event::Move { from: position, to });
        Tick::Advanced
    }

    fn transfer_to_end(&mut self, lead: S::Node, span: f64) {
        let axis = self.state.options.axis;
        self.strip.set_margin(&lead, axis, None);
        self.strip.append(&lead);
        self.state.position = self.read_position();

        let offset = -span;
        tracing::debug!("transfer to end: {:?} offset {}", lead, offset);
        self.emit(Event::TransferEnd {
            element: lead,
            offset,
        });
        self.recycled(offset);
    }

    fn transfer_to_beginning(&mut self, lead: S::Node, lead_separator: f64) {
        let Some(tail) = self.strip.last() else {
            return;
        };
        let axis = self.state.options.axis;

        let mut gap = self.strip.trailing_gap(&tail, axis);
        if !gap.is_finite() || gap == 0.0 {
            gap = lead_separator;
        }
        let size = axis.extent(&self.strip.rect(&tail));
        let span = size + gap;

        self.strip.set_margin(&tail, axis, Some(-span));
        self.strip.insert_before(&tail, &lead);
        self.strip.set_margin(&lead, axis, None);
        self.state.position = -span;

        tracing::debug!("transfer to beginning: {:?} offset {}", tail, span);
        self.emit(Event::TransferBeginning {
            element: tail,
            offset: span,
        });
        self.recycled(span);
    }

    /// Feed a recycle to the gesture accumulator and the running motion
    fn recycled(&mut self, offset: f64) {
        if let Some(gesture) = self.state.phase.gesture_mut() {
            gesture.recycled += offset;
        }
        self.motion_saw_transfer(offset);
    }
}
