//! Cancellable periodic polling of a backend resource.
//!
//! A poller runs on its own tokio task: it fetches immediately, then once per
//! period, and forwards each classified outcome to an `mpsc` receiver.
//!
//! The task stops when:
//! - the backend reports the competition window closed ([`PollEvent::Ended`])
//! - [`PollerHandle::shutdown`] is called
//! - the [`PollerHandle`] is dropped
//! - the event receiver is dropped
//!
//! An in-flight fetch is abandoned as soon as shutdown is requested, so no
//! event is delivered after the consumer has gone away.

use std::future::Future;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::transport::FetchError;

/// Events buffered between the poller and its consumer.
const EVENT_BUFFER: usize = 8;

/// Shortest accepted period; `tokio::time::interval` rejects zero.
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Outcome of one poll.
#[derive(Clone, Debug, PartialEq)]
pub enum PollEvent<T> {
    Updated(T),
    /// Recoverable failure; polling continues on the next tick.
    Failed(FetchError),
    /// Competition window closed; this is the last event.
    Ended,
}

pub struct Poller;

impl Poller {
    /// Spawn a poller named `name` that calls `fetch` every `period`.
    ///
    /// Periods below one millisecond are raised to one millisecond.
    pub fn spawn<T, F, Fut>(
        name: &'static str,
        period: Duration,
        fetch: F,
    ) -> (PollerHandle, mpsc::Receiver<PollEvent<T>>)
    where
        T: Send + 'static,
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, FetchError>> + Send + 'static,
    {
        let (event_tx, event_rx) = mpsc::channel(EVENT_BUFFER);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let period = period.max(MIN_PERIOD);

        let task = tokio::spawn(run(name, period, fetch, event_tx, shutdown_rx));

        let handle = PollerHandle {
            name,
            shutdown_tx: Some(shutdown_tx),
            task: Some(task),
        };
        (handle, event_rx)
    }
}

/// Owner of a running poller. Dropping it cancels the poller.
pub struct PollerHandle {
    name: &'static str,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl PollerHandle {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// True once the polling task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Request shutdown and wait for the task to exit.
    pub async fn shutdown(mut self) {
        if let Some(shutdown_tx) = self.shutdown_tx.take() {
            let _ = shutdown_tx.send(());
        }
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!("{} poller task failed: {}", self.name, e);
            }
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

async fn run<T, F, Fut>(
    name: &'static str,
    period: Duration,
    mut fetch: F,
    event_tx: mpsc::Sender<PollEvent<T>>,
    mut shutdown_rx: oneshot::Receiver<()>,
) where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!("{} poller started: period={:?}", name, period);

    loop {
        tokio::select! {
            _ = &mut shutdown_rx => {
                info!("{} poller shut down", name);
                break;
            }
            _ = ticker.tick() => {
                let outcome = tokio::select! {
                    outcome = fetch() => outcome,
                    _ = &mut shutdown_rx => {
                        info!("{} poller shut down during fetch", name);
                        break;
                    }
                };

                let event = match outcome {
                    Ok(value) => PollEvent::Updated(value),
                    Err(err) if err.game_ended() => PollEvent::Ended,
                    Err(err) => {
                        warn!("{} poll failed, retrying next tick: {}", name, err);
                        PollEvent::Failed(err)
                    }
                };
                let ended = matches!(event, PollEvent::Ended);

                if event_tx.send(event).await.is_err() {
                    debug!("{} poller receiver dropped", name);
                    break;
                }
                if ended {
                    info!("{} poller stopped: competition ended", name);
                    break;
                }
            }
        }
    }
}
