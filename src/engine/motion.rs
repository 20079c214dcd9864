//! Motions - forward, backward and magnetize
//!
//! A motion drives the strip one step at a time on its own timer, faster
//! on every step. Forward and backward finish on the first recycle in
//! their direction once they have travelled more than [`MIN_TRAVEL`].
//! Magnetize finishes when the target item sits in its zone. Each motion
//! is given [`MOTION_TIMEOUT`] to finish; passive movement waits for it.

use std::time::Duration;

use crate::error::{HotlineError, Result};
use crate::host::Strip;

use super::state::Zone;
use super::{Engine, Event};

/// Time a motion gets before it is rejected
pub const MOTION_TIMEOUT: Duration = Duration::from_secs(5);

/// Distance a forward/backward motion must cover before a recycle counts
pub const MIN_TRAVEL: f64 = 1.0;

/// Handle to a started motion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MotionId(pub u64);

/// Successful outcome of a motion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Moved {
    Forward,
    Backward,
    Magnetized(Zone),
}

#[derive(Debug, Clone)]
pub(crate) enum Drive<N> {
    Forward,
    Backward,
    Magnetize { item: N, zone: Zone },
}

impl<N> Drive<N> {
    fn operation(&self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Backward => "backward",
            Self::Magnetize { .. } => "magnetize",
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Motion<N> {
    id: MotionId,
    drive: Drive<N>,
    speed: f64,
    travelled: f64,
}

impl<S: Strip> Engine<S> {
    /// Scroll forward until the next item is recycled to the end
    pub fn forward(&mut self) -> Result<MotionId> {
        self.begin(Drive::Forward)
    }

    /// Scroll backward until the next item is recycled to the beginning
    pub fn backward(&mut self) -> Result<MotionId> {
        self.begin(Drive::Backward)
    }

    /// Move the strip until `item` (or the item containing it) sits in `zone`
    pub fn magnetize(&mut self, item: S::Node, zone: Zone) -> Result<MotionId> {
        let item = self.resolve_item(item).ok_or(HotlineError::NotAnItem)?;
        self.begin(Drive::Magnetize { item, zone })
    }

    /// Running motion, if any
    pub fn motion_id(&self) -> Option<MotionId> {
        self.motion.as_ref().map(|m| m.id)
    }

    /// Motions that ended since the last call, with their outcome
    pub fn take_finished(&mut self) -> Vec<(MotionId, Result<Moved>)> {
        std::mem::take(&mut self.finished)
    }

    /// Signed distance between the item and its zone along the axis.
    /// Positive when the item lies further along than the zone.
    pub fn zone_offset(&self, item: &S::Node, zone: Zone) -> f64 {
        let axis = self.state.options.axis;
        let rect = self.strip.rect(item);
        let container = self.strip.container_rect();
        match zone {
            Zone::Leading => axis.start(&rect) - axis.start(&container),
            Zone::Center => axis.center(&rect) - axis.center(&container),
            Zone::Trailing => axis.end(&rect) - axis.end(&container),
        }
    }

    /// Advance motion `id` by one step. Returns whether it is still running.
    pub fn step_motion(&mut self, id: MotionId) -> bool {
        let magnet = self.state.options.magnet;
        let (drive, speed, travelled) = match self.motion.as_mut() {
            Some(motion) if motion.id == id => {
                motion.speed += magnet;
                (motion.drive.clone(), motion.speed, motion.travelled)
            }
            _ => return false,
        };

        let from = self.state.position;
        match drive {
            Drive::Forward => {
                self.drive_to(from - speed);
                self.set_travelled(travelled + speed);
            }
            Drive::Backward => {
                self.drive_to(from + speed);
                self.set_travelled(travelled + speed);
            }
            Drive::Magnetize { item, zone } => {
                let offset = self.zone_offset(&item, zone);
                if offset.round() == 0.0 {
                    self.finish(id, Ok(Moved::Magnetized(zone)));
                    return false;
                }
                let distance = speed.min(offset.abs());
                self.drive_to(from - distance * offset.signum());
                self.set_travelled(travelled + distance);
                if self.zone_offset(&item, zone).round() == 0.0 {
                    self.finish(id, Ok(Moved::Magnetized(zone)));
                    return false;
                }
            }
        }
        self.motion_id() == Some(id)
    }

    /// Reject motion `id` for running out of time
    pub fn expire_motion(&mut self, id: MotionId) {
        let Some(operation) = self
            .motion
            .as_ref()
            .filter(|m| m.id == id)
            .map(|m| m.drive.operation())
        else {
            return;
        };
        tracing::debug!("{} timed out", operation);
        self.finish(
            id,
            Err(HotlineError::Timeout {
                operation,
                after: MOTION_TIMEOUT,
            }),
        );
    }

    /// Cancel the running motion, if any
    pub fn cancel_motion(&mut self) {
        if let Some(motion) = &self.motion {
            let (id, operation) = (motion.id, motion.drive.operation());
            self.finish(id, Err(HotlineError::Cancelled { operation }));
        }
    }

    /// A recycle happened; forward/backward motions may be done
    pub(crate) fn motion_saw_transfer(&mut self, offset: f64) {
        let Some(motion) = &self.motion else {
            return;
        };
        if motion.travelled <= MIN_TRAVEL {
            return;
        }
        let done = match motion.drive {
            Drive::Forward if offset < 0.0 => Moved::Forward,
            Drive::Backward if offset > 0.0 => Moved::Backward,
            _ => return,
        };
        let id = motion.id;
        self.finish(id, Ok(done));
    }

    fn begin(&mut self, drive: Drive<S::Node>) -> Result<MotionId> {
        if !self.state.phase.is_started() {
            return Err(HotlineError::NotStarted);
        }
        self.cancel_motion();
        self.next_motion += 1;
        let id = MotionId(self.next_motion);
        tracing::debug!("{} motion {:?} started", drive.operation(), id);
        self.motion = Some(Motion {
            id,
            drive,
            speed: 0.0,
            travelled: 0.0,
        });
        Ok(id)
    }

    fn drive_to(&mut self, to: f64) {
        let from = self.state.position;
        if self.set_position(to).is_some() {
            self.emit(Event::Moving { from, to });
        }
    }

    fn set_travelled(&mut self, travelled: f64) {
        if let Some(motion) = self.motion.as_mut() {
            motion.travelled = travelled;
        }
    }

    fn finish(&mut self, id: MotionId, outcome: Result<Moved>) {
        if self.motion_id() != Some(id) {
            return;
        }
        self.motion = None;
        match &outcome {
            Ok(Moved::Forward) => self.emit(Event::MovedForward),
            Ok(Moved::Backward) => self.emit(Event::MovedBackward),
            Ok(Moved::Magnetized(zone)) => self.emit(Event::Magnetized { zone: *zone }),
            Err(err) => tracing::debug!("motion {:?} ended: {}", id, err),
        }
        self.finished.push((id, outcome));
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::testing::*;
    use crate::engine::{Event, Moved, Phase, Pointer, Tick, Zone};
    use crate::error::HotlineError;
    use crate::host::NodeId;

    use super::*;

    #[test]
    fn motions_need_a_started_engine() {
        let mut engine = Engine::new(strip(3));
        assert_eq!(engine.forward(), Err(HotlineError::NotStarted));
        assert_eq!(engine.motion_id(), None);
    }

    #[test]
    fn magnetize_converges_on_center() {
        // Container center 150; NodeId(2) spans 137..237 at position -83,
        // so its center sits 37px ahead.
        let mut engine = started(5);
        engine.set_position(-83.0);
        let id = engine.magnetize(NodeId(2), Zone::Center).unwrap();
        assert_eq!(engine.zone_offset(&NodeId(2), Zone::Center), 37.0);

        let mut steps = 1;
        while engine.step_motion(id) {
            steps += 1;
            assert!(steps < 50, "magnetize did not converge");
        }
        assert_eq!(steps, 9);
        assert_eq!(engine.zone_offset(&NodeId(2), Zone::Center), 0.0);
        assert_eq!(engine.position(), -120.0);
        assert_eq!(engine.motion_id(), None);
        assert_eq!(engine.take_finished(), vec![(id, Ok(Moved::Magnetized(Zone::Center)))]);
        assert!(
            engine
                .drain_events()
                .contains(&Event::Magnetized { zone: Zone::Center })
        );
    }

    #[test]
    fn magnetize_steps_accelerate_and_clamp() {
        let mut engine = started(5);
        engine.set_position(-83.0);
        let id = engine.magnetize(NodeId(2), Zone::Center).unwrap();
        engine.drain_events();
        while engine.step_motion(id) {}

        let moving: Vec<f64> = engine
            .drain_events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Moving { from, to } => Some(from - to),
                _ => None,
            })
            .collect();
        assert_eq!(moving, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 1.0]);
    }

    #[test]
    fn magnetize_leading_and_trailing_edges() {
        let mut engine = started(5);
        assert_eq!(engine.zone_offset(&NodeId(1), Zone::Leading), 110.0);
        assert_eq!(engine.zone_offset(&NodeId(1), Zone::Trailing), -90.0);

        let id = engine.magnetize(NodeId(1), Zone::Trailing).unwrap();
        while engine.step_motion(id) {}
        assert_eq!(engine.zone_offset(&NodeId(1), Zone::Trailing), 0.0);
        assert_eq!(engine.position(), 90.0);
    }

    #[test]
    fn magnetize_rejects_foreign_nodes() {
        let mut engine = started(3);
        assert_eq!(
            engine.magnetize(NodeId(99), Zone::Center),
            Err(HotlineError::NotAnItem)
        );
    }

    #[test]
    fn forward_resolves_on_next_recycle() {
        let mut engine = started(5);
        let id = engine.forward().unwrap();
        let mut ticks = 0;
        loop {
            engine.step_motion(id);
            let tick = engine.tick();
            ticks += 1;
            if tick == Tick::TransferredToEnd {
                break;
            }
            assert!(tick == Tick::Idle, "passive advance while driven: {tick:?}");
            assert!(ticks < 100);
        }
        assert_eq!(engine.take_finished(), vec![(id, Ok(Moved::Forward))]);
        assert!(engine.drain_events().contains(&Event::MovedForward));
        assert!(!engine.step_motion(id));
    }

    #[test]
    fn backward_resolves_on_backward_recycle() {
        let mut engine = started(5);
        engine.set_position(-105.0);
        let id = engine.backward().unwrap();
        engine.step_motion(id);
        engine.step_motion(id);
        assert_eq!(engine.position(), -102.0);
        assert_eq!(engine.tick(), Tick::Idle);

        loop {
            engine.step_motion(id);
            if engine.tick() == Tick::TransferredToBeginning {
                break;
            }
        }
        assert_eq!(engine.take_finished(), vec![(id, Ok(Moved::Backward))]);
    }

    #[test]
    fn recycle_before_min_travel_is_ignored() {
        let mut engine = started(5);
        engine.set_position(-110.0);
        let id = engine.forward().unwrap();
        engine.step_motion(id);
        assert_eq!(engine.tick(), Tick::TransferredToEnd);
        assert_eq!(engine.motion_id(), Some(id));
        assert!(engine.take_finished().is_empty());
    }

    #[test]
    fn expire_rejects_with_timeout() {
        let mut engine = started(3);
        let id = engine.forward().unwrap();
        engine.expire_motion(MotionId(id.0 + 1));
        assert_eq!(engine.motion_id(), Some(id));

        engine.expire_motion(id);
        assert_eq!(
            engine.take_finished(),
            vec![(
                id,
                Err(HotlineError::Timeout {
                    operation: "forward",
                    after: MOTION_TIMEOUT,
                })
            )]
        );
        assert!(!engine.step_motion(id));
    }

    #[test]
    fn new_motion_cancels_previous() {
        let mut engine = started(3);
        let first = engine.forward().unwrap();
        let second = engine.backward().unwrap();
        assert_ne!(first, second);
        assert_eq!(
            engine.take_finished(),
            vec![(first, Err(HotlineError::Cancelled { operation: "forward" }))]
        );
        assert_eq!(engine.motion_id(), Some(second));
    }

    #[test]
    fn press_and_stop_cancel_motions() {
        let mut engine = started(3);
        let first = engine.forward().unwrap();
        engine.press(Pointer::mouse(10.0, 10.0));
        assert_eq!(engine.motion_id(), None);
        assert_eq!(engine.take_finished()[0].0, first);

        let second = engine.backward().unwrap();
        engine.stop();
        assert_eq!(engine.phase(), Phase::Stopped);
        assert_eq!(
            engine.take_finished(),
            vec![(second, Err(HotlineError::Cancelled { operation: "backward" }))]
        );
    }
}
