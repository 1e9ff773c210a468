mod mock_hosts_table;

pub use mock_hosts_table::MockHostsTable;
