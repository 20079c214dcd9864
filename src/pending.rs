//! Pending - a deferred result over a oneshot channel
//!
//! A [`Pending`] is settled once by its [`Resolver`]. It can be awaited
//! like any future, or checked synchronously with [`Pending::try_take`]
//! from code that drives its own clock. Awaiting yields `None` when the
//! resolver was dropped without settling.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::channel::oneshot;

/// Receiving half of a deferred result
pub struct Pending<T> {
    receiver: oneshot::Receiver<T>,
    arrived: Option<T>,
    settled: bool,
}

/// Settling half of a deferred result
pub struct Resolver<T> {
    sender: oneshot::Sender<T>,
}

impl<T> Pending<T> {
    /// Create a connected pending/resolver pair
    pub fn new() -> (Self, Resolver<T>) {
        let (sender, receiver) = oneshot::channel();
        (
            Self {
                receiver,
                arrived: None,
                settled: false,
            },
            Resolver { sender },
        )
    }

    /// Already settled with `value`
    pub fn ready(value: T) -> Self {
        let (mut pending, resolver) = Self::new();
        resolver.settle(value);
        pending.collect();
        pending
    }

    pub fn is_settled(&mut self) -> bool {
        self.collect();
        self.settled
    }

    /// Take the value if it has arrived
    pub fn try_take(&mut self) -> Option<T> {
        self.collect();
        self.arrived.take()
    }

    fn collect(&mut self) {
        if self.settled {
            return;
        }
        if let Ok(Some(value)) = self.receiver.try_recv() {
            self.arrived = Some(value);
            self.settled = true;
        }
    }
}

impl<T> Resolver<T> {
    pub fn settle(self, value: T) {
        if self.sender.send(value).is_err() {
            tracing::trace!("result settled after its receiver was dropped");
        }
    }
}

// The value is never pinned in place.
impl<T> Unpin for Pending<T> {}

impl<T> Future for Pending<T> {
    type Output = Option<T>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        let this = self.get_mut();
        if this.settled {
            return Poll::Ready(this.arrived.take());
        }
        match Pin::new(&mut this.receiver).poll(cx) {
            Poll::Ready(Ok(value)) => {
                this.settled = true;
                Poll::Ready(Some(value))
            }
            Poll::Ready(Err(oneshot::Canceled)) => Poll::Ready(None),
            Poll::Pending => Poll::Pending,
        }
    }
}

impl<T> fmt::Debug for Pending<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pending")
            .field("settled", &self.settled)
            .finish()
    }
}
