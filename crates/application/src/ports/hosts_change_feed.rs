use async_trait::async_trait;
use std::path::PathBuf;

/// A batch of filesystem paths that changed under a watched source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostsChange {
    pub paths: Vec<PathBuf>,
}

/// Stream of change notifications for the configured hosts sources.
#[async_trait]
pub trait HostsChangeFeed: Send {
    /// Waits for the next change. Returns `None` once the feed is closed.
    async fn next_change(&mut self) -> Option<HostsChange>;

    /// Returns an already queued change without waiting.
    fn try_next_change(&mut self) -> Option<HostsChange>;
}
