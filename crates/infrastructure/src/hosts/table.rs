use compact_str::CompactString;
use ferrous_hosts_domain::HostEntry;
use rustc_hash::{FxBuildHasher, FxHashMap};
use smallvec::SmallVec;
use std::borrow::Cow;
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;

type AddressList = SmallVec<[IpAddr; 2]>;

/// Immutable bidirectional index built from one pass over every hosts source.
///
/// Forward lookups keep every address an alias was given, in the order the
/// lines were scanned. Reverse lookups keep the first alias ever seen for an
/// address; later lines never replace it.
#[derive(Debug, Default)]
pub struct HostsTable {
    forward: FxHashMap<CompactString, AddressList>,
    reverse: FxHashMap<IpAddr, Arc<str>>,
    entries: usize,
    generation: u64,
}

impl HostsTable {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn build(entries: &[HostEntry]) -> Self {
        let mut forward: FxHashMap<CompactString, AddressList> =
            HashMap::with_capacity_and_hasher(entries.len(), FxBuildHasher);
        let mut reverse: FxHashMap<IpAddr, Arc<str>> =
            HashMap::with_capacity_and_hasher(entries.len(), FxBuildHasher);

        for entry in entries {
            let ip = entry.ip();

            for alias in entry.aliases() {
                let addresses = forward
                    .entry(CompactString::from(&**alias))
                    .or_default();
                if !addresses.contains(&ip) {
                    addresses.push(ip);
                }
            }

            if let Some(first) = entry.aliases().first() {
                reverse.entry(ip).or_insert_with(|| Arc::clone(first));
            }
        }

        Self {
            forward,
            reverse,
            entries: entries.len(),
            generation: 0,
        }
    }

    pub(crate) fn with_generation(mut self, generation: u64) -> Self {
        self.generation = generation;
        self
    }

    /// All addresses recorded for `name`, both families.
    pub fn lookup(&self, name: &str) -> &[IpAddr] {
        let key = normalize_name(name);
        self.forward
            .get(&*key)
            .map(|addresses| addresses.as_slice())
            .unwrap_or(&[])
    }

    /// Name for `ip`; an IPv4-mapped IPv6 address matches its IPv4 form.
    pub fn reverse_lookup(&self, ip: &IpAddr) -> Option<&Arc<str>> {
        self.reverse.get(&ip.to_canonical())
    }

    pub fn to_map(&self) -> HashMap<String, Vec<IpAddr>> {
        self.forward
            .iter()
            .map(|(alias, addresses)| (alias.to_string(), addresses.to_vec()))
            .collect()
    }

    pub fn entry_count(&self) -> usize {
        self.entries
    }

    pub fn alias_count(&self) -> usize {
        self.forward.len()
    }

    pub fn address_count(&self) -> usize {
        self.reverse.len()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}

/// Lower-cases and drops a single root dot, allocating only when needed.
fn normalize_name(name: &str) -> Cow<'_, str> {
    let name = name.strip_suffix('.').unwrap_or(name);
    if name.bytes().any(|b| b.is_ascii_uppercase()) {
        Cow::Owned(name.to_ascii_lowercase())
    } else {
        Cow::Borrowed(name)
    }
}
