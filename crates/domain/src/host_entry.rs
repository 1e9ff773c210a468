use std::net::IpAddr;
use std::sync::Arc;

/// One line of a hosts file: an address and the names that point at it.
///
/// Aliases are stored lower-cased, in the order they appeared on the line,
/// with repeats removed. IPv4-mapped IPv6 addresses are stored as IPv4.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEntry {
    ip: IpAddr,
    aliases: Vec<Arc<str>>,
}

impl HostEntry {
    pub fn new<'a>(ip: IpAddr, aliases: impl IntoIterator<Item = &'a str>) -> Self {
        let mut normalized: Vec<Arc<str>> = Vec::new();
        for alias in aliases {
            let alias = alias.to_ascii_lowercase();
            if alias.is_empty() || normalized.iter().any(|a| **a == *alias) {
                continue;
            }
            normalized.push(Arc::from(alias));
        }

        Self {
            ip: ip.to_canonical(),
            aliases: normalized,
        }
    }

    pub fn ip(&self) -> IpAddr {
        self.ip
    }

    pub fn aliases(&self) -> &[Arc<str>] {
        &self.aliases
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}
