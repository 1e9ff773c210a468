use ferrous_hosts_domain::{DnsQuery, RecordType};
use std::net::IpAddr;
use std::sync::Arc;
use tracing::debug;

use crate::ports::HostsTablePort;

/// Outcome of consulting the hosts override layer for one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalAnswer {
    Addresses(Vec<IpAddr>),
    Hostname(Arc<str>),
    /// No local mapping; the query goes upstream.
    NotFound,
}

impl LocalAnswer {
    pub fn is_found(&self) -> bool {
        !matches!(self, LocalAnswer::NotFound)
    }
}

pub struct ResolveLocalHostUseCase {
    table: Arc<dyn HostsTablePort>,
    enabled: bool,
}

impl ResolveLocalHostUseCase {
    pub fn new(table: Arc<dyn HostsTablePort>) -> Self {
        Self {
            table,
            enabled: true,
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn execute(&self, query: &DnsQuery) -> LocalAnswer {
        if !self.enabled {
            return LocalAnswer::NotFound;
        }

        let answer = match query.record_type {
            RecordType::A | RecordType::AAAA => {
                let addresses = self.table.resolve(&query.domain, query.record_type);
                if addresses.is_empty() {
                    LocalAnswer::NotFound
                } else {
                    LocalAnswer::Addresses(addresses)
                }
            }
            RecordType::PTR => match self.table.resolve_reverse(&query.domain, query.record_type) {
                Some(hostname) => LocalAnswer::Hostname(hostname),
                None => LocalAnswer::NotFound,
            },
            _ => LocalAnswer::NotFound,
        };

        if answer.is_found() {
            debug!(
                domain = %query.domain,
                record_type = %query.record_type,
                "Answered from hosts table"
            );
        }

        answer
    }
}
