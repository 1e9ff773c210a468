#![allow(dead_code)]

use async_trait::async_trait;
use ferrous_hosts_application::ports::{HostsTablePort, HostsTableStats};
use ferrous_hosts_domain::{reverse_name, DomainError, RecordType};
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

#[derive(Default)]
pub struct MockHostsTable {
    forward: RwLock<HashMap<String, Vec<IpAddr>>>,
    reverse: RwLock<HashMap<IpAddr, Arc<str>>>,
    reload_calls: AtomicUsize,
}

impl MockHostsTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hosts(hosts: Vec<(&str, &str)>) -> Self {
        let table = Self::new();
        for (ip, alias) in hosts {
            table.add_host(ip, alias);
        }
        table
    }

    pub fn add_host(&self, ip: &str, alias: &str) {
        let ip: IpAddr = ip.parse().unwrap();
        self.forward
            .write()
            .unwrap()
            .entry(alias.to_string())
            .or_default()
            .push(ip);
        self.reverse
            .write()
            .unwrap()
            .entry(ip)
            .or_insert_with(|| Arc::from(alias));
    }

    pub fn reload_calls(&self) -> usize {
        self.reload_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HostsTablePort for MockHostsTable {
    fn resolve(&self, name: &str, record_type: RecordType) -> Vec<IpAddr> {
        self.forward
            .read()
            .unwrap()
            .get(name)
            .map(|ips| {
                ips.iter()
                    .copied()
                    .filter(|ip| record_type.accepts_address(ip))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn resolve_reverse(&self, reverse_name: &str, record_type: RecordType) -> Option<Arc<str>> {
        if record_type != RecordType::PTR {
            return None;
        }
        let ip = reverse_name::decode(reverse_name)?;
        self.reverse.read().unwrap().get(&ip).cloned()
    }

    fn snapshot(&self) -> HashMap<String, Vec<IpAddr>> {
        self.forward.read().unwrap().clone()
    }

    fn stats(&self) -> HostsTableStats {
        let forward = self.forward.read().unwrap();
        HostsTableStats {
            entries: forward.len(),
            aliases: forward.len(),
            addresses: self.reverse.read().unwrap().len(),
            generation: self.reload_calls() as u64,
        }
    }

    async fn reload(&self) -> Result<HostsTableStats, DomainError> {
        self.reload_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.stats())
    }
}
