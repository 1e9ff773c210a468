mod hosts_change_feed;
mod hosts_table;

pub use hosts_change_feed::{HostsChange, HostsChangeFeed};
pub use hosts_table::{HostsTablePort, HostsTableStats};

// Re-export for convenience
pub use ferrous_hosts_domain::DnsQuery;
