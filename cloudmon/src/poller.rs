//! Interval pollers: fetch on a fixed cadence and publish the result into a
//! watch-backed slot.
//!
//! Fetches of one poller may overlap when the service is slower than the
//! interval. Each request is tagged with a sequence number when it is started and a
//! result is only published if no newer request has already been published, so the
//! slot always reflects the most recently *initiated* request that succeeded.
//! Every poller owns a cancellation token; once it fires nothing is published
//! anymore, including fetches that were already in flight.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::FetchError;

/// Current value of a slot plus the sequence number of the request that produced it.
#[derive(Debug, Clone)]
pub struct Latest<T> {
    pub seq: u64,
    pub value: Option<T>,
}

impl<T> Default for Latest<T> {
    fn default() -> Self {
        Self { seq: 0, value: None }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Publish {
    Applied,
    Stale,
    Cancelled,
}

#[derive(Debug)]
pub struct Slot<T> {
    tx: watch::Sender<Latest<T>>,
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Slot<T> {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Latest::default());
        Self { tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<Latest<T>> {
        self.tx.subscribe()
    }

    /// Replace the value wholesale if `seq` is newer than what is stored and
    /// `cancel` has not fired. Both checks run under the channel lock.
    pub fn publish(&self, seq: u64, value: T, cancel: &CancellationToken) -> Publish {
        let mut outcome = Publish::Stale;
        let mut value = Some(value);
        self.tx.send_if_modified(|cur| {
            if cancel.is_cancelled() {
                outcome = Publish::Cancelled;
                return false;
            }
            if seq <= cur.seq {
                return false;
            }
            cur.seq = seq;
            cur.value = value.take();
            outcome = Publish::Applied;
            true
        });
        outcome
    }
}

impl<T: Clone> Slot<T> {
    pub fn current(&self) -> Option<T> {
        self.tx.borrow().value.clone()
    }
}

/// Owns a running poller. Dropping it cancels the poller.
pub struct PollerHandle {
    name: &'static str,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl PollerHandle {
    /// Cancel and wait until every in-flight fetch has been dropped.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!(poller = self.name, "poller task ended abnormally: {e}");
            }
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Start a poller: one fetch immediately, then one per `every`.
/// The poller stops when `parent` (or the returned handle) is cancelled.
pub fn spawn_poller<T, F, Fut>(
    name: &'static str,
    every: Duration,
    slot: Arc<Slot<T>>,
    parent: &CancellationToken,
    fetch: F,
) -> PollerHandle
where
    T: Send + Sync + 'static,
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, FetchError>> + Send + 'static,
{
    let cancel = parent.child_token();
    let task = tokio::spawn(run(name, every, slot, cancel.clone(), fetch));
    PollerHandle {
        name,
        cancel,
        task: Some(task),
    }
}

async fn run<T, F, Fut>(
    name: &'static str,
    every: Duration,
    slot: Arc<Slot<T>>,
    cancel: CancellationToken,
    fetch: F,
) where
    T: Send + Sync + 'static,
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, FetchError>> + Send + 'static,
{
    info!(poller = name, every_ms = every.as_millis() as u64, "poller started");

    let mut ticker = tokio::time::interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut in_flight = JoinSet::new();
    let mut next_seq: u64 = 0;

    loop {
        // the first tick completes immediately
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {
                next_seq += 1;
                let seq = next_seq;
                let request = fetch();
                let slot = slot.clone();
                let cancel = cancel.clone();
                in_flight.spawn(async move {
                    let result = tokio::select! {
                        _ = cancel.cancelled() => return,
                        r = request => r,
                    };
                    complete(name, seq, result, &slot, &cancel);
                });
            }
            Some(_) = in_flight.join_next(), if !in_flight.is_empty() => {}
        }
    }

    in_flight.abort_all();
    while in_flight.join_next().await.is_some() {}
    info!(poller = name, "poller stopped");
}

fn complete<T>(
    name: &'static str,
    seq: u64,
    result: Result<T, FetchError>,
    slot: &Slot<T>,
    cancel: &CancellationToken,
) {
    match result {
        Ok(value) => match slot.publish(seq, value, cancel) {
            Publish::Applied => {}
            Publish::Stale => debug!(poller = name, seq, "dropping response overtaken by a newer request"),
            Publish::Cancelled => debug!(poller = name, seq, "dropping response after teardown"),
        },
        // previous value stays in place; the next tick is the retry
        Err(e) => warn!(poller = name, seq, error = %e, "fetch failed"),
    }
}
