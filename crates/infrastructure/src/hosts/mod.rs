pub mod parser;
pub mod resolver;
pub mod sources;
pub mod table;
pub mod watcher;

pub use parser::{parse_hosts_line, parse_hosts_text};
pub use resolver::HostsResolver;
pub use sources::HostsSources;
pub use table::HostsTable;
pub use watcher::NotifyChangeFeed;
