//! Single-shot future carrier (§3 "Future").
//!
//! A minimal producer/consumer future, grounded in the custom-future
//! pattern used by the parallel work-stealing scheduler in the corpus
//! (`concurrency/parallel.rs`'s `super::futures::Future`), but built on
//! `std::future::Future` directly rather than pulling in an async runtime
//! the teacher never depends on. State machine: `Created → Submitted →
//! Running → (Done-Value | Done-Exception)` (§4.8); awaiting after
//! completion is a no-op that replays the stored result (§8).

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll, Waker};

use crate::error::Result;

struct Shared<T> {
    result: Mutex<Option<Result<T>>>,
    waker: Mutex<Option<Waker>>,
}

/// The consumer handle returned to callers of an async-mode algorithm.
pub struct AlgoFuture<T> {
    shared: Arc<Shared<T>>,
}

/// The producer handle used internally by the partitioner to resolve an
/// [`AlgoFuture`] once the fold completes.
pub struct AlgoFutureSender<T> {
    shared: Arc<Shared<T>>,
}

/// Creates a linked (future, sender) pair.
pub fn channel<T>() -> (AlgoFuture<T>, AlgoFutureSender<T>) {
    let shared = Arc::new(Shared {
        result: Mutex::new(None),
        waker: Mutex::new(None),
    });
    (
        AlgoFuture {
            shared: shared.clone(),
        },
        AlgoFutureSender { shared },
    )
}

impl<T> AlgoFutureSender<T> {
    /// Resolves the linked future with `value`, waking the consumer if it
    /// is already polling.
    pub fn resolve(self, value: Result<T>) {
        *self.shared.result.lock().unwrap() = Some(value);
        if let Some(waker) = self.shared.waker.lock().unwrap().take() {
            waker.wake();
        }
    }
}

impl<T> AlgoFuture<T> {
    /// Builds a future that is already resolved: used for `seq+async`,
    /// which per §3 must yield futures on the calling thread without ever
    /// suspending.
    pub fn ready(value: Result<T>) -> Self {
        let (future, sender) = channel();
        sender.resolve(value);
        future
    }

    /// Blocking wait, for call sites that need the value outside of an
    /// async context (tests, and the "blocking" algorithm wrappers built
    /// on top of an async core).
    pub fn block_on(self) -> Result<T> {
        loop {
            if let Some(result) = self.shared.result.lock().unwrap().take() {
                return result;
            }
            std::thread::yield_now();
        }
    }
}

impl<T> Future for AlgoFuture<T> {
    type Output = Result<T>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut slot = self.shared.result.lock().unwrap();
        if let Some(result) = slot.take() {
            return Poll::Ready(result);
        }
        drop(slot);
        *self.shared.waker.lock().unwrap() = Some(cx.waker().clone());
        // Re-check: the producer may have resolved between the first lock
        // and registering the waker.
        slot = self.shared.result.lock().unwrap();
        match slot.take() {
            Some(result) => Poll::Ready(result),
            None => Poll::Pending,
        }
    }
}
