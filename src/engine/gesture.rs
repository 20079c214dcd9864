//! Gestures - hover freeze, drag, release and wheel
//!
//! A press records where the pointer went down and where the lead was.
//! While the gesture lives, every recycle adds its signed span to the
//! gesture so the lead position stays a continuous function of the
//! pointer even though the lead item itself changes.

use crate::host::Strip;

use super::state::{Gesture, Hold, Input, Phase, Pointer};
use super::{Engine, Event, MotionId};

/// Parent hops tried when resolving a release target to an item
pub const MAX_ANCESTOR_HOPS: usize = 16;

impl<S: Strip> Engine<S> {
    /// Pointer entered the container
    pub fn hover_enter(&mut self) {
        if self.state.options.hover && self.state.phase == Phase::Idle {
            self.state.phase = Phase::Frozen(Hold::Hover);
        }
    }

    /// Pointer left the container. Pinned freezes and gestures are kept.
    pub fn hover_leave(&mut self) {
        if self.state.phase == Phase::Frozen(Hold::Hover) {
            self.state.phase = Phase::Idle;
        }
    }

    /// Hold passive movement until [`Engine::unfreeze`]
    pub fn freeze(&mut self) -> bool {
        match self.state.phase {
            Phase::Idle | Phase::Frozen(_) => {
                self.state.phase = Phase::Frozen(Hold::Pinned);
                true
            }
            _ => false,
        }
    }

    pub fn unfreeze(&mut self) {
        if let Phase::Frozen(_) = self.state.phase {
            self.state.phase = Phase::Idle;
        }
    }

    /// Pointer or finger went down. Returns whether a gesture began.
    pub fn press(&mut self, pointer: Pointer) -> bool {
        if !self.state.phase.is_started() || !self.state.options.movable {
            return false;
        }
        if pointer.input == Input::Mouse && pointer.button != self.state.options.button {
            return false;
        }

        self.cancel_motion();
        let origin = self.state.options.axis.pick(pointer.x, pointer.y);
        self.state.position = self.read_position();
        self.state.phase = Phase::Pressed(Gesture {
            input: pointer.input,
            origin,
            origin_position: self.state.position,
            recycled: 0.0,
        });
        true
    }

    /// Pointer moved during a gesture. Returns the position change.
    pub fn drag(&mut self, pointer: Pointer) -> Option<f64> {
        let gesture = *self.state.phase.gesture()?;
        let to = gesture.position_at(self.state.options.axis.pick(pointer.x, pointer.y));
        self.state.phase = Phase::Dragging(gesture);

        let from = self.state.position;
        let delta = self.set_position(to)?;
        let event = match gesture.input {
            Input::Mouse => Event::MoveMouse { from, to },
            Input::Touch => Event::MoveTouch { from, to },
        };
        self.emit(event);
        Some(delta)
    }

    /// Pointer or finger went up.
    ///
    /// Ends the gesture, settles the freeze, and when a magnetic zone is
    /// configured starts snapping the item under `target`.
    pub fn release(&mut self, pointer: Pointer, target: Option<S::Node>) -> Option<MotionId> {
        self.state.phase.gesture()?;

        let options = &self.state.options;
        let inside = self.strip.container_rect().contains(pointer.x, pointer.y);
        self.state.phase = if options.sticky {
            Phase::Frozen(Hold::Pinned)
        } else if options.hover && inside {
            Phase::Frozen(Hold::Hover)
        } else {
            Phase::Idle
        };

        let zone = self.state.options.magnetic?;
        let item = self.resolve_item(target?)?;
        self.magnetize(item, zone)
            .inspect_err(|err| tracing::warn!("magnetize on release failed: {}", err))
            .ok()
    }

    /// Wheel turned over the container. Works while frozen.
    ///
    /// Only the sign of `native` is used. The strip moves by `delta`, or by
    /// the size of `step` when no delta is configured.
    pub fn wheel(&mut self, native: f64) -> Option<f64> {
        let options = &self.state.options;
        if !self.state.phase.is_started() || !options.wheel || native == 0.0 {
            return None;
        }
        let magnitude = options.delta.unwrap_or(options.step.abs());
        if magnitude == 0.0 {
            return None;
        }
        self.set_position(self.state.position - magnitude * native.signum())
    }

    /// Walk up from any node to the item that contains it
    pub fn resolve_item(&self, node: S::Node) -> Option<S::Node> {
        let mut current = node;
        for _ in 0..=MAX_ANCESTOR_HOPS {
            if self.strip.is_item(&current) {
                return Some(current);
            }
            current = self.strip.parent(&current)?;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::testing::*;
    use crate::engine::{Axis, Engine, Event, Hold, Options, Phase, Pointer, Tick, Zone};
    use crate::host::{MemoryStrip, NodeId, Strip};

    use proptest::prelude::*;

    #[test]
    fn hover_freezes_and_releases() {
        let mut engine = started(3);
        engine.hover_enter();
        assert_eq!(engine.phase(), Phase::Frozen(Hold::Hover));
        engine.hover_leave();
        assert_eq!(engine.phase(), Phase::Idle);

        engine.configure("hover", "off").unwrap();
        engine.hover_enter();
        assert_eq!(engine.phase(), Phase::Idle);
    }

    #[test]
    fn pinned_freeze_survives_hover_leave() {
        let mut engine = started(3);
        assert!(engine.freeze());
        engine.hover_leave();
        assert_eq!(engine.phase(), Phase::Frozen(Hold::Pinned));
        engine.unfreeze();
        assert_eq!(engine.phase(), Phase::Idle);
    }

    #[test]
    fn press_requires_configured_button() {
        let mut engine = started(3);
        assert!(!engine.press(Pointer::mouse(10.0, 10.0).with_button(2)));
        assert_eq!(engine.phase(), Phase::Idle);
        assert!(engine.press(Pointer::mouse(10.0, 10.0)));
        assert!(engine.phase().is_frozen());
        assert!(!engine.phase().is_moving());
    }

    #[test]
    fn press_ignored_when_not_movable_or_stopped() {
        let mut engine = Engine::new(strip(3));
        assert!(!engine.press(Pointer::touch(0.0, 0.0)));
        engine.start().unwrap();
        engine.configure("movable", "no").unwrap();
        assert!(!engine.press(Pointer::touch(0.0, 0.0)));
    }

    #[test]
    fn drag_follows_pointer() {
        let mut engine = started(5);
        engine.set_position(-10.0);
        engine.drain_events();

        engine.press(Pointer::mouse(150.0, 20.0));
        assert_eq!(engine.drag(Pointer::mouse(130.0, 25.0)), Some(-20.0));
        assert!(engine.phase().is_moving());
        assert_eq!(engine.position(), -30.0);

        let events = engine.drain_events();
        assert_eq!(
            events,
            vec![
                Event::Position { from: -10.0, to: -30.0 },
                Event::MoveMouse { from: -10.0, to: -30.0 },
            ]
        );
    }

    #[test]
    fn touch_drag_reports_touch_moves() {
        let mut engine = started(5);
        engine.press(Pointer::touch(100.0, 0.0));
        engine.drag(Pointer::touch(104.0, 0.0));
        assert!(
            engine
                .drain_events()
                .contains(&Event::MoveTouch { from: 0.0, to: 4.0 })
        );
    }

    #[test]
    fn drag_without_press_does_nothing() {
        let mut engine = started(3);
        assert_eq!(engine.drag(Pointer::mouse(50.0, 0.0)), None);
        assert_eq!(engine.position(), 0.0);
    }

    #[test]
    fn release_outside_unfreezes() {
        let mut engine = started(3);
        engine.press(Pointer::mouse(100.0, 10.0));
        engine.drag(Pointer::mouse(90.0, 10.0));
        assert_eq!(engine.release(Pointer::mouse(400.0, 10.0), None), None);
        assert_eq!(engine.phase(), Phase::Idle);
        assert_eq!(engine.tick(), Tick::Advanced);
    }

    #[test]
    fn release_inside_keeps_hover_freeze() {
        let mut engine = started(3);
        engine.hover_enter();
        engine.press(Pointer::mouse(100.0, 10.0));
        engine.release(Pointer::mouse(120.0, 10.0), None);
        assert_eq!(engine.phase(), Phase::Frozen(Hold::Hover));
    }

    #[test]
    fn sticky_release_pins() {
        let mut engine = started(3);
        engine.configure("sticky", "yes").unwrap();
        engine.press(Pointer::mouse(100.0, 10.0));
        engine.release(Pointer::mouse(400.0, 10.0), None);
        assert_eq!(engine.phase(), Phase::Frozen(Hold::Pinned));
    }

    #[test]
    fn release_starts_magnetize_on_resolved_item() {
        let mut strip = strip(5);
        let label = strip.add_child(NodeId(2));
        let text = strip.add_child(label);
        let mut engine = Engine::with_options(
            strip,
            Options {
                magnetic: Some(Zone::Center),
                ..Options::default()
            },
        );
        engine.start().unwrap();
        engine.press(Pointer::mouse(250.0, 10.0));
        let motion = engine.release(Pointer::mouse(250.0, 10.0), Some(text));
        assert!(motion.is_some());
        assert_eq!(engine.motion_id(), motion);
    }

    #[test]
    fn ancestor_search_is_bounded() {
        let mut strip = strip(3);
        let mut node = strip.add_child(NodeId(1));
        for _ in 0..30 {
            node = strip.add_child(node);
        }
        let engine = Engine::new(strip);
        assert_eq!(engine.resolve_item(node), None);
        assert_eq!(engine.resolve_item(NodeId(1)), Some(NodeId(1)));
    }

    #[test]
    fn wheel_moves_even_when_frozen() {
        let mut engine = started(5);
        engine.hover_enter();
        assert_eq!(engine.wheel(12.0), Some(-1.0));
        assert_eq!(engine.position(), -1.0);

        engine.configure("delta", "40").unwrap();
        assert_eq!(engine.wheel(-3.0), Some(40.0));
        assert_eq!(engine.position(), 39.0);

        engine.configure("wheel", "off").unwrap();
        assert_eq!(engine.wheel(5.0), None);
    }

    #[test]
    fn wheel_ignores_native_magnitude() {
        let mut engine = started(5);
        engine.configure("step", "-4").unwrap();
        // pixel and line mode deltas move the same distance
        assert_eq!(engine.wheel(120.0), Some(-4.0));
        assert_eq!(engine.wheel(3.0), Some(-4.0));
        assert_eq!(engine.wheel(-0.5), Some(4.0));
        assert_eq!(engine.position(), -4.0);

        engine.configure("step", "0").unwrap();
        assert_eq!(engine.wheel(120.0), None);
        engine.configure("delta", "25").unwrap();
        assert_eq!(engine.wheel(120.0), Some(-25.0));
    }

    #[test]
    fn recycle_during_drag_keeps_pointer_mapping() {
        let mut engine = started(5);
        engine.press(Pointer::mouse(200.0, 10.0));
        engine.drag(Pointer::mouse(85.0, 10.0));
        assert_eq!(engine.position(), -115.0);

        assert_eq!(engine.tick(), Tick::TransferredToEnd);
        engine.drag(Pointer::mouse(84.0, 10.0));
        // NodeId(1) started at 110 - 115 = -5 and moves one more pixel.
        assert_eq!(engine.strip().rect(&NodeId(1)).x, -6.0);
        assert_eq!(engine.position(), -6.0);

        engine.release(Pointer::mouse(84.0, 10.0), None);
        assert!(engine.phase().gesture().is_none());
    }

    proptest! {
        #[test]
        fn drag_is_continuous_across_recycles(
            moves in prop::collection::vec(-60i32..60, 1..80),
        ) {
            let mut engine: Engine<MemoryStrip> = started(6);
            let axis = Axis::Horizontal;
            let mut pointer = 500.0;
            engine.press(Pointer::mouse(pointer, 10.0));

            for dx in moves {
                let before = engine.strip().starts();
                engine.tick();
                let transferred: Vec<NodeId> = engine
                    .drain_events()
                    .iter()
                    .filter_map(|e| match e {
                        Event::TransferEnd { element, .. }
                        | Event::TransferBeginning { element, .. } => Some(*element),
                        _ => None,
                    })
                    .collect();

                pointer += dx as f64;
                engine.drag(Pointer::mouse(pointer, 10.0));
                engine.drain_events();

                let after = engine.strip().starts();
                for (id, start) in before {
                    if transferred.contains(&id) {
                        continue;
                    }
                    let now = after.iter().find(|(n, _)| *n == id).map(|(_, x)| *x).unwrap();
                    prop_assert!(
                        (now - start - dx as f64).abs() < 1e-9,
                        "{:?} moved {} for pointer {}", id, now - start, dx
                    );
                }
                let lead = engine.strip().first().unwrap();
                prop_assert_eq!(engine.strip().margin(&lead, axis), engine.position());
            }
        }
    }
}
