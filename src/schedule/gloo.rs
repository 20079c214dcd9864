//! GlooScheduler - browser timers through gloo-timers

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use gloo_timers::callback::{Interval, Timeout};

use super::{Scheduler, TimerId, millis};

// Held only so that dropping the entry clears the browser timer.
enum Handle {
    Interval { _interval: Interval },
    Timeout { _timeout: Timeout },
}

/// Scheduler backed by `setInterval` / `setTimeout`.
///
/// Dropping a handle clears the browser timer, so cancelling is removal
/// from the table. One-shot timers remove themselves once they fire.
#[derive(Default)]
pub struct GlooScheduler {
    next: Cell<u64>,
    handles: Rc<RefCell<HashMap<TimerId, Handle>>>,
}

impl GlooScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> TimerId {
        let id = self.next.get() + 1;
        self.next.set(id);
        TimerId(id)
    }

    /// Number of live timers
    pub fn active(&self) -> usize {
        self.handles.borrow().len()
    }
}

impl Scheduler for GlooScheduler {
    fn repeat(&self, every: Duration, mut task: Box<dyn FnMut()>) -> TimerId {
        let id = self.next_id();
        let interval = Interval::new(millis(every), move || task());
        self.handles
            .borrow_mut()
            .insert(id, Handle::Interval { _interval: interval });
        id
    }

    fn once(&self, after: Duration, task: Box<dyn FnOnce()>) -> TimerId {
        let id = self.next_id();
        let handles = Rc::downgrade(&self.handles);
        let timeout = Timeout::new(millis(after), move || {
            task();
            if let Some(handles) = handles.upgrade() {
                let fired = handles.borrow_mut().remove(&id);
                drop(fired);
            }
        });
        self.handles.borrow_mut().insert(id, Handle::Timeout { _timeout: timeout });
        id
    }

    fn cancel(&self, id: TimerId) {
        let removed = self.handles.borrow_mut().remove(&id);
        drop(removed);
    }
}
