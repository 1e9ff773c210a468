use async_trait::async_trait;
use ferrous_hosts_domain::{DomainError, RecordType};
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;

/// Counters describing one published hosts table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostsTableStats {
    pub entries: usize,
    pub aliases: usize,
    pub addresses: usize,
    pub generation: u64,
}

/// Read side of the local hosts override layer plus its rebuild trigger.
///
/// Lookups never block and never fail: a miss, an unsupported query type and
/// an undecodable reverse name all come back as an empty answer.
#[async_trait]
pub trait HostsTablePort: Send + Sync {
    /// Addresses for `name` matching the family of `record_type` (A or AAAA).
    fn resolve(&self, name: &str, record_type: RecordType) -> Vec<IpAddr>;

    /// First-seen alias for the address encoded in `reverse_name` (PTR only).
    fn resolve_reverse(&self, reverse_name: &str, record_type: RecordType) -> Option<Arc<str>>;

    /// Owned copy of the forward table, alias to addresses.
    fn snapshot(&self) -> HashMap<String, Vec<IpAddr>>;

    fn stats(&self) -> HostsTableStats;

    /// Re-reads every source and publishes a new table. The current table
    /// stays in place when this fails.
    async fn reload(&self) -> Result<HostsTableStats, DomainError>;
}
