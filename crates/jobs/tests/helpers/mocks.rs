#![allow(dead_code)]

use async_trait::async_trait;
use ferrous_hosts_application::ports::{
    HostsChange, HostsChangeFeed, HostsTablePort, HostsTableStats,
};
use ferrous_hosts_domain::{DomainError, RecordType};
use std::collections::HashMap;
use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Counts reloads; optionally fails them.
#[derive(Default)]
pub struct MockHostsTable {
    reloads: AtomicU64,
    published: AtomicU64,
    fail_reload: AtomicBool,
}

impl MockHostsTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let table = Self::new();
        table.set_fail_reload(true);
        table
    }

    pub fn set_fail_reload(&self, fail: bool) {
        self.fail_reload.store(fail, Ordering::SeqCst);
    }

    pub fn reload_count(&self) -> u64 {
        self.reloads.load(Ordering::SeqCst)
    }

    pub fn published_count(&self) -> u64 {
        self.published.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HostsTablePort for MockHostsTable {
    fn resolve(&self, _name: &str, _record_type: RecordType) -> Vec<IpAddr> {
        Vec::new()
    }

    fn resolve_reverse(&self, _reverse_name: &str, _record_type: RecordType) -> Option<Arc<str>> {
        None
    }

    fn snapshot(&self) -> HashMap<String, Vec<IpAddr>> {
        HashMap::new()
    }

    fn stats(&self) -> HostsTableStats {
        HostsTableStats {
            generation: self.published_count(),
            ..Default::default()
        }
    }

    async fn reload(&self) -> Result<HostsTableStats, DomainError> {
        self.reloads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reload.load(Ordering::SeqCst) {
            return Err(DomainError::HostsSourceRead {
                path: "/mock/hosts".to_string(),
                reason: "mock failure".to_string(),
            });
        }
        self.published.fetch_add(1, Ordering::SeqCst);
        Ok(self.stats())
    }
}

/// Change feed driven by the test through a `FeedSender`.
pub struct ChannelChangeFeed {
    rx: mpsc::UnboundedReceiver<HostsChange>,
}

#[derive(Clone)]
pub struct FeedSender {
    tx: mpsc::UnboundedSender<HostsChange>,
}

impl FeedSender {
    pub fn touch(&self, path: &str) {
        let _ = self.tx.send(HostsChange {
            paths: vec![PathBuf::from(path)],
        });
    }
}

pub fn channel_feed() -> (FeedSender, ChannelChangeFeed) {
    let (tx, rx) = mpsc::unbounded_channel();
    (FeedSender { tx }, ChannelChangeFeed { rx })
}

#[async_trait]
impl HostsChangeFeed for ChannelChangeFeed {
    async fn next_change(&mut self) -> Option<HostsChange> {
        self.rx.recv().await
    }

    fn try_next_change(&mut self) -> Option<HostsChange> {
        self.rx.try_recv().ok()
    }
}
