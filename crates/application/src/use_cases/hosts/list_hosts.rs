use std::net::IpAddr;
use std::sync::Arc;

use crate::ports::HostsTablePort;

/// Administrative listing of the forward table, sorted by alias.
pub struct ListHostsUseCase {
    table: Arc<dyn HostsTablePort>,
}

impl ListHostsUseCase {
    pub fn new(table: Arc<dyn HostsTablePort>) -> Self {
        Self { table }
    }

    pub fn execute(&self) -> Vec<(String, Vec<IpAddr>)> {
        let mut hosts: Vec<_> = self.table.snapshot().into_iter().collect();
        hosts.sort_by(|a, b| a.0.cmp(&b.0));
        hosts
    }
}
