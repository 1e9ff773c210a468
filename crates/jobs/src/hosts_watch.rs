use ferrous_hosts_application::ports::{HostsChange, HostsChangeFeed, HostsTablePort};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Background job that rebuilds the hosts table whenever a source changes.
///
///   - `start` performs the initial load before spawning, so the table is
///     populated by the time it returns
///   - bursts of events are coalesced: the loop waits `debounce` after the
///     first event, drains whatever queued up, then rebuilds once
///   - a failed rebuild is logged and the previous table stays published
///   - cancellation ends the loop and drops the feed, releasing watch handles
pub struct HostsWatchJob {
    table: Arc<dyn HostsTablePort>,
    feed: Box<dyn HostsChangeFeed>,
    debounce: Duration,
    shutdown: CancellationToken,
}

impl HostsWatchJob {
    pub fn new(table: Arc<dyn HostsTablePort>, feed: Box<dyn HostsChangeFeed>) -> Self {
        Self {
            table,
            feed,
            debounce: Duration::from_millis(50),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_debounce(mut self, debounce_ms: u64) -> Self {
        self.debounce = Duration::from_millis(debounce_ms);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self) -> JoinHandle<()> {
        info!(
            debounce_ms = self.debounce.as_millis() as u64,
            "Starting hosts watch job"
        );

        if let Err(e) = self.table.reload().await {
            error!(error = %e, "HostsWatchJob: initial load failed, serving empty table");
        }

        tokio::spawn(self.run())
    }

    async fn run(mut self) {
        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    info!("HostsWatchJob: shutting down");
                    break;
                }
                change = self.feed.next_change() => {
                    let Some(change) = change else {
                        warn!("HostsWatchJob: change feed closed, stopping");
                        break;
                    };

                    let changed = self.settle(change).await;
                    if self.shutdown.is_cancelled() {
                        info!("HostsWatchJob: shutting down");
                        break;
                    }

                    debug!(paths = changed, "HostsWatchJob: sources changed, rebuilding");
                    match self.table.reload().await {
                        Ok(stats) => info!(
                            entries = stats.entries,
                            generation = stats.generation,
                            "HostsWatchJob: rebuild completed"
                        ),
                        Err(e) => error!(error = %e, "HostsWatchJob: rebuild failed"),
                    }
                }
            }
        }
    }

    /// Lets a burst of events land, then drains it. Returns the number of
    /// changed paths folded into this rebuild.
    async fn settle(&mut self, first: HostsChange) -> usize {
        if !self.debounce.is_zero() {
            tokio::select! {
                _ = self.shutdown.cancelled() => {}
                _ = tokio::time::sleep(self.debounce) => {}
            }
        }

        let mut changed = first.paths.len();
        while let Some(change) = self.feed.try_next_change() {
            changed += change.paths.len();
        }
        changed
    }
}
