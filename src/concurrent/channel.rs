//! The concurrent fold channel.
//!
//! [`par_eval`] moves a fold onto a dedicated worker thread and hands the
//! producer a [`ChannelFold`] in its place. The producer's `step` enqueues
//! into a bounded FIFO queue (blocking when full — backpressure, never
//! drops); the worker drains the queue in enqueue order and feeds the inner
//! fold. Two wake signals avoid busy-polling: the queue's own blocking
//! receive is the worker's doorbell, and a condvar on the one-slot output
//! register is the producer's.
//!
//! Within one channel, elements reach the inner fold in exact enqueue order;
//! concurrency changes only the producer/worker timing relationship.
//! Independent sibling channels (see [`par_tee_with`]) have no ordering
//! relationship with each other and are combined only after each has
//! terminated on its own.

use std::panic::resume_unwind;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Receiver, Sender};
use log::{debug, trace};
use parking_lot::{Condvar, Mutex};
use thiserror::Error;

use crate::concurrent::config::{Config, ConfigError};
use crate::fold::{tee_with, Fold, FoldStep, TeeWith};

/// Failure to construct a channel.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// The supplied [`Config`] is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The worker thread could not be spawned.
    #[error("failed to spawn channel worker: {0}")]
    Spawn(#[from] std::io::Error),
}

enum Msg<A> {
    Item(A),
    /// Stop sentinel, FIFO-ordered after every previously enqueued item.
    Flush,
}

/// The one-slot output register shared between producer and worker.
struct Slot<B> {
    result: Option<B>,
    worker_exited: bool,
}

struct Shared<B> {
    slot: Mutex<Slot<B>>,
    doorbell: Condvar,
}

/// Marks the worker as exited and rings the producer doorbell, even when the
/// worker unwinds. Keeps a producer blocked in `finish` from sleeping
/// forever behind a dead worker.
struct ExitGuard<B>(Arc<Shared<B>>);

impl<B> Drop for ExitGuard<B> {
    fn drop(&mut self) {
        let mut slot = self.0.slot.lock();
        slot.worker_exited = true;
        drop(slot);
        self.0.doorbell.notify_all();
    }
}

#[derive(Debug, Default)]
struct Counters {
    enqueued: AtomicU64,
    dequeued: AtomicU64,
    max_depth: AtomicUsize,
}

struct Inspect {
    counters: Counters,
    created_at: Instant,
}

/// Point-in-time dump of a channel's inspection counters.
///
/// Available when the channel was built with
/// [`Config::inspect`](crate::concurrent::Config::inspect).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSnapshot {
    /// Items accepted into the input queue.
    pub enqueued: u64,
    /// Items the worker has taken off the queue.
    pub dequeued: u64,
    /// Largest queue depth observed at enqueue time.
    pub max_depth: usize,
    /// Time since the channel was constructed.
    pub age: Duration,
}

/// A fold evaluated asynchronously by a dedicated worker.
///
/// Created by [`par_eval`]; satisfies the identical [`Fold`] contract as the
/// fold it wraps, so it composes with any fold combinator. A channel fold
/// represents a single run:
///
/// - **Open** — `step` enqueues, the worker consumes. `start` is idempotent
///   here (the worker already started the inner fold).
/// - **Stopping** — `finish` has enqueued the stop sentinel and is blocked
///   on the output doorbell.
/// - **Closed** — the result is published and cached; further `finish`
///   calls return it deterministically, and `step` reports `Done`.
///
/// Items submitted after the inner fold completed are accepted but not
/// forwarded; they never crash the caller. `extract` panics: the worker,
/// not the caller, decides when a result exists, so there is no meaningful
/// mid-flight peek.
///
/// A panic inside the inner fold unwinds the worker and is re-raised on the
/// producer thread by the next `finish` (or a `step` that observes the dead
/// worker). Dropping a channel fold without calling `finish` disconnects
/// the queue, discards any queued input, and reaps the worker.
pub struct ChannelFold<A, B> {
    sender: Option<Sender<Msg<A>>>,
    shared: Arc<Shared<B>>,
    worker: Option<JoinHandle<()>>,
    cached: Option<B>,
    inspect: Option<Arc<Inspect>>,
}

impl<A, B> std::fmt::Debug for ChannelFold<A, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelFold").finish_non_exhaustive()
    }
}

/// Wrap `fold` in a channel evaluated by its own worker thread.
///
/// The configuration is validated synchronously; a zero buffer capacity is
/// an error here, not on first use.
///
/// # Examples
///
/// ```rust
/// use rill::prelude::*;
///
/// let mut f = par_eval(Config::new(), sum::<i64>()).unwrap();
/// for i in 1..=100 {
///     f.step(i);
/// }
/// assert_eq!(f.finish(), 5050);
/// ```
pub fn par_eval<A, F>(config: Config, fold: F) -> Result<ChannelFold<A, F::Output>, ChannelError>
where
    A: Send + 'static,
    F: Fold<A> + Send + 'static,
    F::Output: Send + 'static,
{
    let config = config.validated()?;
    let (sender, receiver) = bounded(config.buffer_capacity);
    let shared = Arc::new(Shared {
        slot: Mutex::new(Slot {
            result: None,
            worker_exited: false,
        }),
        doorbell: Condvar::new(),
    });
    let inspect = config.inspect.then(|| {
        Arc::new(Inspect {
            counters: Counters::default(),
            created_at: Instant::now(),
        })
    });

    let worker = {
        let shared = Arc::clone(&shared);
        let inspect = inspect.clone();
        thread::Builder::new()
            .name("rill-channel-worker".into())
            .spawn(move || run_worker(receiver, fold, shared, inspect))?
    };
    debug!(
        "channel worker started (buffer capacity {})",
        config.buffer_capacity
    );

    Ok(ChannelFold {
        sender: Some(sender),
        shared,
        worker: Some(worker),
        cached: None,
        inspect,
    })
}

/// Run `left` and `right` over the same input on two sibling channels and
/// combine their results.
///
/// Equivalent to `tee_with(combine, par_eval(_, left), par_eval(_, right))`:
/// the channel-backed folds compose with [`tee_with`] exactly like plain
/// ones. Concurrency does not change the result — see the tests.
pub fn par_tee_with<A, R, F1, F2, FN>(
    config: Config,
    combine: FN,
    left: F1,
    right: F2,
) -> Result<TeeWith<ChannelFold<A, F1::Output>, ChannelFold<A, F2::Output>, FN, F1::Output, F2::Output>, ChannelError>
where
    A: Clone + Send + 'static,
    F1: Fold<A> + Send + 'static,
    F1::Output: Clone + Send + 'static,
    F2: Fold<A> + Send + 'static,
    F2::Output: Clone + Send + 'static,
    FN: FnMut(F1::Output, F2::Output) -> R,
{
    let left = par_eval(config.clone(), left)?;
    let right = par_eval(config, right)?;
    Ok(tee_with(combine, left, right))
}

fn run_worker<A, F>(
    receiver: Receiver<Msg<A>>,
    mut fold: F,
    shared: Arc<Shared<F::Output>>,
    inspect: Option<Arc<Inspect>>,
) where
    F: Fold<A>,
{
    let _exit = ExitGuard(Arc::clone(&shared));

    let result = match fold.start() {
        FoldStep::Done(b) => b,
        FoldStep::Partial => loop {
            match receiver.recv() {
                Ok(Msg::Item(item)) => {
                    if let Some(i) = &inspect {
                        i.counters.dequeued.fetch_add(1, Ordering::Relaxed);
                    }
                    if let FoldStep::Done(b) = fold.step(item) {
                        break b;
                    }
                }
                Ok(Msg::Flush) => break fold.finish(),
                Err(_) => {
                    trace!("channel abandoned before flush; worker exiting");
                    return;
                }
            }
        },
    };

    // Publish and ring the producer doorbell: the one transition into Closed.
    let mut slot = shared.slot.lock();
    slot.result = Some(result);
    drop(slot);
    shared.doorbell.notify_all();
    trace!("channel worker published its result");
}

impl<A, B> ChannelFold<A, B> {
    /// Dump the inspection counters, if the channel was built with
    /// [`Config::inspect`](crate::concurrent::Config::inspect).
    pub fn stats(&self) -> Option<ChannelSnapshot> {
        self.inspect.as_ref().map(|i| ChannelSnapshot {
            enqueued: i.counters.enqueued.load(Ordering::Relaxed),
            dequeued: i.counters.dequeued.load(Ordering::Relaxed),
            max_depth: i.counters.max_depth.load(Ordering::Relaxed),
            age: i.created_at.elapsed(),
        })
    }

    fn peek_result(&self) -> Option<B>
    where
        B: Clone,
    {
        if let Some(b) = &self.cached {
            return Some(b.clone());
        }
        self.shared.slot.lock().result.clone()
    }

    /// Block on the output doorbell until the worker publishes, then cache
    /// and return the result. An explicit loop: spurious wakeups re-poll
    /// without stack growth.
    fn await_result(&mut self) -> B
    where
        B: Clone,
    {
        if let Some(b) = &self.cached {
            return b.clone();
        }
        let shared = Arc::clone(&self.shared);
        let mut slot = shared.slot.lock();
        let result = loop {
            if let Some(b) = slot.result.take() {
                break b;
            }
            if slot.worker_exited {
                drop(slot);
                self.dead_worker();
            }
            shared.doorbell.wait(&mut slot);
        };
        drop(slot);
        if let Some(handle) = self.worker.take() {
            if let Err(payload) = handle.join() {
                resume_unwind(payload);
            }
        }
        self.sender = None;
        self.cached = Some(result.clone());
        result
    }

    /// The worker exited without publishing: re-raise its panic on this
    /// thread.
    fn dead_worker(&mut self) -> ! {
        if let Some(handle) = self.worker.take() {
            match handle.join() {
                Err(payload) => resume_unwind(payload),
                Ok(()) => panic!("channel worker exited without publishing a result"),
            }
        }
        panic!("channel worker exited without publishing a result")
    }
}

impl<A, B: Clone> Fold<A> for ChannelFold<A, B> {
    type Output = B;

    fn start(&mut self) -> FoldStep<B> {
        match self.peek_result() {
            Some(b) => FoldStep::Done(b),
            None => FoldStep::Partial,
        }
    }

    fn step(&mut self, item: A) -> FoldStep<B> {
        if let Some(b) = self.peek_result() {
            return FoldStep::Done(b);
        }
        let outcome = match &self.sender {
            Some(sender) => {
                if let Some(i) = &self.inspect {
                    i.counters
                        .max_depth
                        .fetch_max(sender.len() + 1, Ordering::Relaxed);
                }
                // blocking send into the bounded queue: backpressure
                sender.send(Msg::Item(item))
            }
            None => {
                return match &self.cached {
                    Some(b) => FoldStep::Done(b.clone()),
                    None => panic!("channel fold stepped after finish"),
                }
            }
        };
        match outcome {
            Ok(()) => {
                if let Some(i) = &self.inspect {
                    i.counters.enqueued.fetch_add(1, Ordering::Relaxed);
                }
                FoldStep::Partial
            }
            // The worker only drops its end after publishing (or dying);
            // resolve through the output register either way.
            Err(_) => FoldStep::Done(self.await_result()),
        }
    }

    fn extract(&mut self) -> B {
        panic!("extract is not supported on a channel-backed fold; the worker owns the accumulator")
    }

    fn finish(&mut self) -> B {
        if let Some(b) = &self.cached {
            return b.clone();
        }
        if let Some(sender) = self.sender.take() {
            if sender.send(Msg::Flush).is_err() {
                trace!("worker finished before the flush sentinel");
            }
        }
        self.await_result()
    }
}

impl<A, B> Drop for ChannelFold<A, B> {
    fn drop(&mut self) {
        // disconnect; an unflushed worker observes it and exits
        self.sender = None;
        if let Some(handle) = self.worker.take() {
            if self.cached.is_none() {
                debug!("channel fold dropped before finish; discarding queued input");
            }
            // a panic payload cannot be re-raised from Drop
            let _ = handle.join();
        }
    }
}
