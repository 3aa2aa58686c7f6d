use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chart_data_core::candle::CandlePoint;
use chart_data_core::normalize::normalize;
use chart_data_providers::source::ChartSource;
use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::state::FetchState;

const DEFAULT_MAX_RETRIES: u32 = 2;
const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(1000);

/// Coordinates chart-history fetches for one consumer.
///
/// A fetch runs the source call with bounded linear-backoff retry
/// (1s, then 2s with the defaults) and publishes each lifecycle phase
/// through a watch channel. Every invocation takes the next value of a
/// monotonic generation counter; once a newer invocation has started,
/// an older chain's writes (including late retries) are discarded, so the
/// latest request always wins.
pub struct ChartFetcher {
    source: Arc<dyn ChartSource>,
    tx: watch::Sender<FetchState>,
    generation: AtomicU64,
    max_retries: u32,
    base_delay: Duration,
}

impl ChartFetcher {
    pub fn new(source: Arc<dyn ChartSource>) -> Self {
        Self::with_retry_policy(source, DEFAULT_MAX_RETRIES, DEFAULT_BASE_DELAY)
    }

    /// Create with an explicit retry bound and base delay.
    pub fn with_retry_policy(
        source: Arc<dyn ChartSource>,
        max_retries: u32,
        base_delay: Duration,
    ) -> Self {
        let (tx, _rx) = watch::channel(FetchState::idle());
        Self {
            source,
            tx,
            generation: AtomicU64::new(0),
            max_retries,
            base_delay,
        }
    }

    /// Register an observer. Teardown is dropping the receiver.
    pub fn subscribe(&self) -> watch::Receiver<FetchState> {
        self.tx.subscribe()
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> FetchState {
        self.tx.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.tx.borrow().is_loading()
    }

    pub fn error(&self) -> Option<String> {
        self.tx.borrow().error.clone()
    }

    pub fn data(&self) -> Vec<CandlePoint> {
        self.tx.borrow().data.clone()
    }

    /// Fetch and normalize the series for `symbol`, retrying source
    /// failures up to the bound. Source errors are consumed into the
    /// published state, never returned.
    pub async fn fetch(&self, symbol: &str) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let mut attempt = 0u32;
        self.publish(generation, FetchState::loading(symbol, attempt));

        loop {
            match self.source.fetch_history(symbol).await {
                Ok(raw) => {
                    match normalize(&raw) {
                        Ok(points) => {
                            info!("{symbol}: fetched {} candle(s)", points.len());
                            self.publish(generation, FetchState::success(symbol, points, attempt));
                        }
                        // Malformed payloads are not transient; retrying cannot help.
                        Err(e) => {
                            warn!("{symbol}: malformed payload: {e}");
                            self.publish(
                                generation,
                                FetchState::failed(symbol, e.to_string(), attempt),
                            );
                        }
                    }
                    return;
                }
                Err(e) => {
                    if attempt >= self.max_retries {
                        warn!("{symbol}: fetch failed after {} attempt(s): {e}", attempt + 1);
                        self.publish(generation, FetchState::failed(symbol, e.to_string(), attempt));
                        return;
                    }

                    let delay = self.base_delay * (attempt + 1);
                    warn!(
                        "{symbol}: fetch attempt {} failed: {e}; retrying in {delay:?}",
                        attempt + 1
                    );
                    sleep(delay).await;

                    attempt += 1;
                    if !self.publish(generation, FetchState::loading(symbol, attempt)) {
                        debug!("{symbol}: fetch superseded, dropping retry");
                        return;
                    }
                }
            }
        }
    }

    /// Apply a state write unless a newer fetch has started. Discarded
    /// writes do not notify subscribers. Returns whether the write landed.
    fn publish(&self, generation: u64, state: FetchState) -> bool {
        self.tx.send_if_modified(|current| {
            if self.generation.load(Ordering::SeqCst) == generation {
                *current = state;
                true
            } else {
                false
            }
        })
    }
}
