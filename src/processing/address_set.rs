//! Aggregation of a comma-separated address list.
//!
//! Handles parsing every entry, rejecting the whole list on the first bad
//! entry, and removing duplicates.

use crate::error::{AddrError, AddrResult};
use crate::models::{Family, IpAddress, IpNetwork};
use log::{debug, trace};
use std::fmt;
use std::str::FromStr;

/// One parsed list entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetEntry {
    Address(IpAddress),
    Network(IpNetwork),
}

impl SetEntry {
    pub fn family(&self) -> Family {
        match self {
            SetEntry::Address(a) => a.family(),
            SetEntry::Network(n) => n.family(),
        }
    }
}

impl FromStr for SetEntry {
    type Err = AddrError;

    fn from_str(token: &str) -> AddrResult<SetEntry> {
        if token.contains('/') {
            IpNetwork::from_str(token).map(SetEntry::Network)
        } else {
            IpAddress::from_str(token).map(SetEntry::Address)
        }
    }
}

impl fmt::Display for SetEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SetEntry::Address(a) => write!(f, "{a}"),
            SetEntry::Network(n) => write!(f, "{n}"),
        }
    }
}

/// Distinct addresses and networks from one input list.
///
/// An address and a network are never duplicates of each other, even when
/// the network is a `/32`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressSet {
    addresses: Vec<IpAddress>,
    networks: Vec<IpNetwork>,
}

impl AddressSet {
    /// Parse `text` as a comma-separated list.
    ///
    /// Blank input gives an empty set. Any entry that is neither an address
    /// nor a network fails the whole list with its 0-based index.
    pub fn build(text: &str) -> AddrResult<AddressSet> {
        let mut set = AddressSet::default();
        if text.trim().is_empty() {
            debug!("AddressSet::build empty input");
            return Ok(set);
        }

        for (index, token) in text.split(',').enumerate() {
            let token = token.trim();
            trace!("AddressSet::build entry {} '{}'", index, token);
            let entry = SetEntry::from_str(token).map_err(|e| AddrError::InvalidSetEntry {
                index,
                token: token.to_string(),
                source: Box::new(e),
            })?;
            match entry {
                SetEntry::Address(a) => set.addresses.push(a),
                SetEntry::Network(n) => set.networks.push(n),
            }
        }

        // Dedup - must be sorted first
        set.addresses.sort();
        set.addresses.dedup();
        set.networks.sort();
        set.networks.dedup();

        debug!(
            "AddressSet::build {} distinct entries from '{}'",
            set.len(),
            text
        );
        Ok(set)
    }

    /// Number of distinct entries.
    pub fn len(&self) -> usize {
        self.addresses.len() + self.networks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn addresses(&self) -> &[IpAddress] {
        &self.addresses
    }

    pub fn networks(&self) -> &[IpNetwork] {
        &self.networks
    }

    /// All entries, addresses first, each kind in ascending order.
    pub fn entries(&self) -> impl Iterator<Item = SetEntry> + '_ {
        self.addresses
            .iter()
            .map(|a| SetEntry::Address(*a))
            .chain(self.networks.iter().map(|n| SetEntry::Network(*n)))
    }

    pub fn count_family(&self, family: Family) -> usize {
        self.entries().filter(|e| e.family() == family).count()
    }

    /// e.g. `2 entries: 1 address, 1 network (2 IPv4, 0 IPv6)`.
    pub fn summary(&self) -> String {
        format!(
            "{}: {}, {} ({} IPv4, {} IPv6)",
            plural(self.len(), "entry", "entries"),
            plural(self.addresses.len(), "address", "addresses"),
            plural(self.networks.len(), "network", "networks"),
            self.count_family(Family::V4),
            self.count_family(Family::V6),
        )
    }
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}
