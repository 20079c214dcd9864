//! The one place position changes

use crate::host::Strip;

use super::{Engine, Event};

impl<S: Strip> Engine<S> {
    /// Move the lead item to an absolute offset.
    ///
    /// Returns the change from the previous position, or `None` when the
    /// strip has no lead item. After a successful call the lead margin
    /// equals [`Engine::position`].
    pub fn set_position(&mut self, to: f64) -> Option<f64> {
        let lead = self.strip.first()?;
        let from = self.state.position;
        self.strip.set_margin(&lead, self.state.options.axis, Some(to));
        self.state.position = to;
        self.emit(Event::Position { from, to });
        Some(to - from)
    }
}
