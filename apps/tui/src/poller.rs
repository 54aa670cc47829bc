//! Periodic snapshot fetching.
//!
//! The first fetch fires immediately, then one per period. Ticks are
//! fire-and-forget: a slow fetch does not hold back the next one, so two
//! requests can be in flight and finish in either order. Results reach the
//! callback in completion order.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::api::GatewayError;
use crate::store::{Snapshot, SnapshotSource};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Idle,
    Running,
}

#[derive(Debug, Clone, Copy)]
pub struct Poller {
    period: Duration,
}

impl Poller {
    pub const fn new(period: Duration) -> Self {
        Self { period }
    }

    /// Start polling `source`, handing every result to `on_result`.
    pub fn start<S, F>(self, source: Arc<S>, on_result: F) -> PollerHandle
    where
        S: SnapshotSource,
        F: Fn(Result<Snapshot, GatewayError>) + Send + Sync + 'static,
    {
        let token = CancellationToken::new();
        let refresh = Arc::new(Notify::new());
        let on_result = Arc::new(on_result);
        let period = self.period;

        tracing::info!(period_ms = period.as_millis(), "poller started");

        let task = tokio::spawn({
            let token = token.clone();
            let refresh = Arc::clone(&refresh);
            async move {
                let mut ticker = tokio::time::interval(period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

                loop {
                    tokio::select! {
                        () = token.cancelled() => break,
                        _ = ticker.tick() => {}
                        () = refresh.notified() => {
                            tracing::debug!("out-of-cycle refresh requested");
                        }
                    }
                    spawn_fetch(&source, &on_result, &token);
                }

                tracing::info!("poller stopped");
            }
        });

        PollerHandle {
            token,
            refresh,
            task: Some(task),
        }
    }
}

impl Default for Poller {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL)
    }
}

fn spawn_fetch<S, F>(source: &Arc<S>, on_result: &Arc<F>, token: &CancellationToken)
where
    S: SnapshotSource,
    F: Fn(Result<Snapshot, GatewayError>) + Send + Sync + 'static,
{
    let source = Arc::clone(source);
    let on_result = Arc::clone(on_result);
    let token = token.clone();

    tokio::spawn(async move {
        tokio::select! {
            () = token.cancelled() => {}
            result = source.fetch_snapshot() => {
                if !token.is_cancelled() {
                    on_result(result);
                }
            }
        }
    });
}

/// Handle to a running poller. Dropping it stops the poller.
#[derive(Debug)]
pub struct PollerHandle {
    token: CancellationToken,
    refresh: Arc<Notify>,
    task: Option<JoinHandle<()>>,
}

impl PollerHandle {
    pub fn state(&self) -> PollState {
        if self.token.is_cancelled() {
            PollState::Idle
        } else {
            PollState::Running
        }
    }

    /// Fetch now, outside the regular schedule.
    pub fn refresh_now(&self) {
        if !self.token.is_cancelled() {
            self.refresh.notify_one();
        }
    }

    /// Stop issuing fetches and drop results of fetches still in flight.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Cancel and wait for the scheduling task to wind down.
    pub async fn stop(mut self) {
        self.token.cancel();
        if let Some(task) = self.task.take() {
            if let Err(error) = task.await {
                tracing::warn!(%error, "poller task ended abnormally");
            }
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ShipStatus;
    use crate::store::fixtures::ship;
    use reqwest::StatusCode;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Source whose n-th fetch takes `delays[n]` ms and yields a ship "S{n}".
    struct ScriptedSource {
        calls: AtomicUsize,
        delays: Vec<u64>,
        fail_on: Option<usize>,
    }

    impl ScriptedSource {
        fn new(delays: Vec<u64>) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                delays,
                fail_on: None,
            })
        }

        fn failing_on(call: usize) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                delays: Vec::new(),
                fail_on: Some(call),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl SnapshotSource for ScriptedSource {
        async fn fetch_snapshot(&self) -> Result<Snapshot, GatewayError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            let delay = self.delays.get(call).copied().unwrap_or(0);
            tokio::time::sleep(Duration::from_millis(delay)).await;

            if self.fail_on == Some(call) {
                return Err(GatewayError::Http {
                    status: StatusCode::SERVICE_UNAVAILABLE,
                    message: "Failed to load ships.".to_string(),
                });
            }

            Ok(Snapshot::new(
                vec![ship(&format!("S{call}"), ShipStatus::Idle, 1, &[])],
                Vec::new(),
                Vec::new(),
            ))
        }
    }

    type Received = Arc<Mutex<Vec<Result<String, String>>>>;

    fn recorder() -> (Received, impl Fn(Result<Snapshot, GatewayError>) + Send + Sync) {
        let received: Received = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&received);
        let callback = move |result: Result<Snapshot, GatewayError>| {
            let entry = result
                .map(|snapshot| snapshot.ships[0].id.clone())
                .map_err(|error| error.to_string());
            sink.lock().unwrap().push(entry);
        };
        (received, callback)
    }

    fn ids(received: &Received) -> Vec<String> {
        received
            .lock()
            .unwrap()
            .iter()
            .map(|entry| entry.clone().unwrap_or_else(|error| format!("err:{error}")))
            .collect()
    }

    async fn settle(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn fetches_immediately_then_every_period() {
        let source = ScriptedSource::new(Vec::new());
        let (received, callback) = recorder();
        let handle = Poller::new(Duration::from_secs(3)).start(Arc::clone(&source), callback);

        settle(10).await;
        assert_eq!(ids(&received), vec!["S0"]);

        settle(3_000).await;
        assert_eq!(ids(&received), vec!["S0", "S1"]);

        settle(3_000).await;
        assert_eq!(source.calls(), 3);
        assert_eq!(handle.state(), PollState::Running);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_ticks_and_silences_in_flight_fetches() {
        let source = ScriptedSource::new(vec![0, 2_000]);
        let (received, callback) = recorder();
        let handle = Poller::new(Duration::from_secs(3)).start(Arc::clone(&source), callback);

        // second fetch starts at t=3000 and would land at t=5000
        settle(3_500).await;
        handle.cancel();
        assert_eq!(handle.state(), PollState::Idle);

        settle(20_000).await;
        assert_eq!(ids(&received), vec!["S0"]);
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn overlapping_fetches_land_in_completion_order() {
        // first fetch is slower than the period, second one is quick
        let source = ScriptedSource::new(vec![4_000, 100]);
        let (received, callback) = recorder();
        let handle = Poller::new(Duration::from_secs(3)).start(Arc::clone(&source), callback);

        settle(4_500).await;
        assert_eq!(ids(&received), vec!["S1", "S0"]);
        handle.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn refresh_now_triggers_an_extra_fetch() {
        let source = ScriptedSource::new(Vec::new());
        let (received, callback) = recorder();
        let handle = Poller::new(Duration::from_secs(3)).start(Arc::clone(&source), callback);

        settle(10).await;
        handle.refresh_now();
        settle(10).await;

        assert_eq!(ids(&received), vec!["S0", "S1"]);
    }

    #[tokio::test(start_paused = true)]
    async fn failures_are_delivered_and_polling_continues() {
        let source = ScriptedSource::failing_on(0);
        let (received, callback) = recorder();
        let _handle = Poller::new(Duration::from_secs(3)).start(Arc::clone(&source), callback);

        settle(3_010).await;
        assert_eq!(ids(&received), vec!["err:Failed to load ships.", "S1"]);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_stops_polling() {
        let source = ScriptedSource::new(Vec::new());
        let (received, callback) = recorder();
        let handle = Poller::new(Duration::from_secs(3)).start(Arc::clone(&source), callback);

        settle(10).await;
        drop(handle);
        settle(10_000).await;

        assert_eq!(ids(&received).len(), 1);
    }
}
