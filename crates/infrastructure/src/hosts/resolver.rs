use super::sources::HostsSources;
use super::table::HostsTable;
use arc_swap::ArcSwap;
use async_trait::async_trait;
use ferrous_hosts_application::ports::{HostsTablePort, HostsTableStats};
use ferrous_hosts_domain::{reverse_name, DomainError, RecordType};
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tracing::{error, info};

/// Query facade over the live hosts table.
///
/// The table sits behind an `ArcSwap`: every lookup loads one snapshot and
/// answers from it alone, while `reload` builds a complete replacement off
/// to the side and publishes it with a single store.
pub struct HostsResolver {
    table: ArcSwap<HostsTable>,
    sources: HostsSources,
    generation: watch::Sender<u64>,
    reload_lock: Mutex<()>,
}

impl HostsResolver {
    pub fn new(sources: HostsSources) -> Self {
        let (generation, _) = watch::channel(0);
        Self {
            table: ArcSwap::from_pointee(HostsTable::empty()),
            sources,
            generation,
            reload_lock: Mutex::new(()),
        }
    }

    pub fn sources(&self) -> &HostsSources {
        &self.sources
    }

    /// Current table, kept alive for as long as the caller holds it.
    pub fn current(&self) -> Arc<HostsTable> {
        self.table.load_full()
    }

    /// Notified with the new generation after every publish.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.generation.subscribe()
    }

    fn publish(&self, table: HostsTable) -> HostsTableStats {
        let generation = self.table.load().generation() + 1;
        let table = Arc::new(table.with_generation(generation));
        let stats = stats_of(&table);

        self.table.store(table);
        self.generation.send_replace(generation);
        stats
    }
}

fn stats_of(table: &HostsTable) -> HostsTableStats {
    HostsTableStats {
        entries: table.entry_count(),
        aliases: table.alias_count(),
        addresses: table.address_count(),
        generation: table.generation(),
    }
}

#[async_trait]
impl HostsTablePort for HostsResolver {
    fn resolve(&self, name: &str, record_type: RecordType) -> Vec<IpAddr> {
        if !record_type.is_address() {
            return Vec::new();
        }

        let table = self.table.load();
        table
            .lookup(name)
            .iter()
            .copied()
            .filter(|ip| record_type.accepts_address(ip))
            .collect()
    }

    fn resolve_reverse(&self, reverse_name: &str, record_type: RecordType) -> Option<Arc<str>> {
        if record_type != RecordType::PTR {
            return None;
        }

        let ip = reverse_name::decode(reverse_name)?;
        self.table.load().reverse_lookup(&ip).cloned()
    }

    fn snapshot(&self) -> HashMap<String, Vec<IpAddr>> {
        self.table.load().to_map()
    }

    fn stats(&self) -> HostsTableStats {
        stats_of(&self.table.load())
    }

    async fn reload(&self) -> Result<HostsTableStats, DomainError> {
        // Rebuilds are serialised so generations are published in order.
        let _guard = self.reload_lock.lock().await;

        let entries = self.sources.load_entries().await.map_err(|e| {
            error!(error = %e, "Hosts reload failed, keeping previous table");
            e
        })?;

        let stats = self.publish(HostsTable::build(&entries));

        info!(
            entries = stats.entries,
            aliases = stats.aliases,
            addresses = stats.addresses,
            generation = stats.generation,
            "Hosts table published"
        );

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hosts::parser::parse_hosts_text;

    fn resolver_with(text: &str) -> HostsResolver {
        let resolver = HostsResolver::new(HostsSources::new(Vec::<String>::new()));
        resolver.publish(HostsTable::build(&parse_hosts_text(text)));
        resolver
    }

    fn ip(raw: &str) -> IpAddr {
        raw.parse().unwrap()
    }

    #[test]
    fn test_resolve_filters_by_family() {
        let resolver = resolver_with("127.0.0.1 host localhost\n::1 localhost\n");

        assert_eq!(resolver.resolve("localhost", RecordType::A), vec![ip("127.0.0.1")]);
        assert_eq!(resolver.resolve("localhost", RecordType::AAAA), vec![ip("::1")]);
        assert!(resolver.resolve("host", RecordType::AAAA).is_empty());
        assert!(resolver.resolve("newhost", RecordType::A).is_empty());
    }

    #[test]
    fn test_resolve_other_types_yield_nothing() {
        let resolver = resolver_with("127.0.0.1 localhost\n");

        assert!(resolver.resolve("localhost", RecordType::PTR).is_empty());
        assert!(resolver.resolve("localhost", RecordType::MX).is_empty());
        assert!(resolver.resolve("localhost", RecordType::ANY).is_empty());
    }

    #[test]
    fn test_resolve_reverse() {
        let resolver = resolver_with(
            "127.0.0.1 host localhost\n\
             ::1 localhost\n\
             127.0.0.1 later\n",
        );

        let v4 = reverse_name::encode(&ip("127.0.0.1"));
        let v6 = reverse_name::encode(&ip("::1"));

        assert_eq!(resolver.resolve_reverse(&v4, RecordType::PTR).as_deref(), Some("host"));
        assert_eq!(resolver.resolve_reverse(&v6, RecordType::PTR).as_deref(), Some("localhost"));
        assert_eq!(resolver.resolve_reverse(&v4, RecordType::A), None);
        assert_eq!(
            resolver.resolve_reverse("1.0.0.127.in-addr.arpa.", RecordType::PTR),
            None
        );
        assert_eq!(
            resolver.resolve_reverse("2.0.0.127.in-addr.arpa", RecordType::PTR),
            None
        );
    }

    #[test]
    fn test_snapshot_is_detached_copy() {
        let resolver = resolver_with("10.0.0.1 a\n");

        let mut snapshot = resolver.snapshot();
        snapshot.insert("injected".to_string(), vec![ip("10.9.9.9")]);

        assert!(resolver.resolve("injected", RecordType::A).is_empty());
        assert_eq!(resolver.snapshot().len(), 1);
    }

    #[test]
    fn test_publish_bumps_generation() {
        let resolver = HostsResolver::new(HostsSources::new(Vec::<String>::new()));
        let rx = resolver.subscribe();
        assert_eq!(resolver.stats().generation, 0);

        let stats = resolver.publish(HostsTable::build(&parse_hosts_text("10.0.0.1 a\n")));
        assert_eq!(stats.generation, 1);
        assert_eq!(stats.entries, 1);
        assert_eq!(*rx.borrow(), 1);

        resolver.publish(HostsTable::empty());
        assert_eq!(resolver.stats().generation, 2);
        assert_eq!(*rx.borrow(), 2);
    }

    #[test]
    fn test_held_snapshot_survives_publish() {
        let resolver = resolver_with("10.0.0.1 a\n");
        let held = resolver.current();

        resolver.publish(HostsTable::build(&parse_hosts_text("10.0.0.2 b\n")));

        assert_eq!(held.lookup("a"), &[ip("10.0.0.1")]);
        assert!(resolver.resolve("a", RecordType::A).is_empty());
        assert_eq!(resolver.resolve("b", RecordType::A), vec![ip("10.0.0.2")]);
    }
}
