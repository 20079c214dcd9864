//! ManualScheduler - a virtual clock advanced by hand
//!
//! Time only moves when [`ManualScheduler::advance_by`] is called. Due
//! tasks fire in order of due time, then in order of scheduling, which
//! makes tick sequences reproducible in tests.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

use super::{Scheduler, TimerId};

enum Task {
    Repeat(Box<dyn FnMut()>),
    Once(Box<dyn FnOnce()>),
}

struct Entry {
    due: u64,
    every: u64,
    task: Option<Task>,
}

#[derive(Default)]
struct Clock {
    now: u64,
    next_id: u64,
    entries: BTreeMap<TimerId, Entry>,
}

impl Clock {
    fn next_due(&self, limit: u64) -> Option<TimerId> {
        self.entries
            .iter()
            .filter(|(_, e)| e.task.is_some() && e.due <= limit)
            .min_by_key(|(id, e)| (e.due, **id))
            .map(|(id, _)| *id)
    }
}

/// Deterministic scheduler with a virtual millisecond clock.
///
/// Cloning shares the clock, so a test can keep a handle while the driver
/// owns another.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    clock: Rc<RefCell<Clock>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds
    pub fn now(&self) -> u64 {
        self.clock.borrow().now
    }

    /// Number of scheduled tasks that have not finished or been cancelled
    pub fn pending(&self) -> usize {
        self.clock.borrow().entries.len()
    }

    /// Move the clock forward, firing every task that falls due
    pub fn advance_by(&self, millis: u64) {
        let target = self.now() + millis;
        loop {
            let (id, task) = {
                let mut clock = self.clock.borrow_mut();
                let Some(id) = clock.next_due(target) else {
                    break;
                };
                let Some(entry) = clock.entries.get_mut(&id) else {
                    break;
                };
                let due = entry.due;
                let Some(task) = entry.task.take() else {
                    break;
                };
                clock.now = due;
                (id, task)
            };

            // The borrow is released so the task may schedule or cancel.
            match task {
                Task::Repeat(mut run) => {
                    run();
                    let mut clock = self.clock.borrow_mut();
                    if let Some(entry) = clock.entries.get_mut(&id) {
                        entry.due += entry.every;
                        entry.task = Some(Task::Repeat(run));
                    }
                }
                Task::Once(run) => {
                    run();
                    self.clock.borrow_mut().entries.remove(&id);
                }
            }
        }
        self.clock.borrow_mut().now = target;
    }

    fn schedule(&self, delay: Duration, every: u64, task: Task) -> TimerId {
        let mut clock = self.clock.borrow_mut();
        clock.next_id += 1;
        let id = TimerId(clock.next_id);
        let due = clock.now + (delay.as_millis() as u64).max(1);
        clock.entries.insert(
            id,
            Entry {
                due,
                every,
                task: Some(task),
            },
        );
        id
    }
}

impl Scheduler for ManualScheduler {
    fn repeat(&self, every: Duration, task: Box<dyn FnMut()>) -> TimerId {
        let step = (every.as_millis() as u64).max(1);
        self.schedule(every, step, Task::Repeat(task))
    }

    fn once(&self, after: Duration, task: Box<dyn FnOnce()>) -> TimerId {
        self.schedule(after, 0, Task::Once(task))
    }

    fn cancel(&self, id: TimerId) {
        self.clock.borrow_mut().entries.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn repeat_fires_every_interval() {
        let clock = ManualScheduler::new();
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        clock.repeat(Duration::from_millis(10), Box::new(move || c.set(c.get() + 1)));

        clock.advance_by(35);
        assert_eq!(count.get(), 3);
        assert_eq!(clock.now(), 35);

        clock.advance_by(5);
        assert_eq!(count.get(), 4);
    }

    #[test]
    fn once_fires_a_single_time() {
        let clock = ManualScheduler::new();
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        clock.once(Duration::from_millis(50), Box::new(move || c.set(c.get() + 1)));

        clock.advance_by(49);
        assert_eq!(count.get(), 0);
        clock.advance_by(100);
        assert_eq!(count.get(), 1);
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn cancel_stops_a_task() {
        let clock = ManualScheduler::new();
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        let id = clock.repeat(Duration::from_millis(10), Box::new(move || c.set(c.get() + 1)));

        clock.advance_by(20);
        clock.cancel(id);
        clock.advance_by(100);
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn task_can_cancel_itself() {
        let clock = ManualScheduler::new();
        let count = Rc::new(Cell::new(0));
        let id_slot: Rc<Cell<Option<TimerId>>> = Rc::new(Cell::new(None));

        let c = Rc::clone(&count);
        let slot = Rc::clone(&id_slot);
        let handle = clock.clone();
        let id = clock.repeat(
            Duration::from_millis(10),
            Box::new(move || {
                c.set(c.get() + 1);
                if c.get() == 3 {
                    if let Some(id) = slot.get() {
                        handle.cancel(id);
                    }
                }
            }),
        );
        id_slot.set(Some(id));

        clock.advance_by(100);
        assert_eq!(count.get(), 3);
    }

    #[test]
    fn equal_due_times_fire_in_schedule_order() {
        let clock = ManualScheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        for name in ["a", "b", "c"] {
            let log = Rc::clone(&log);
            clock.once(Duration::from_millis(10), Box::new(move || log.borrow_mut().push(name)));
        }
        clock.advance_by(10);
        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
    }
}
