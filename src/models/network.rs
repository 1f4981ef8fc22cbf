//! CIDR network model and lazy subnetting.
//!
//! An [`IpNetwork`] keeps the address it was given (not necessarily the
//! network address) plus a prefix length. Everything else is derived on
//! demand.

use super::bits;
use super::ip::{Family, IpAddress};
use crate::error::{AddrError, AddrResult};
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IpNetwork {
    addr: IpAddress,
    prefix: u8,
}

fn prefix_out_of_range<T: ToString>(prefix: T, min: u8, max: u8) -> AddrError {
    AddrError::PrefixOutOfRange {
        prefix: prefix.to_string(),
        min,
        max,
    }
}

/// Parse a decimal prefix length that must lie in `min..=max`.
///
/// Non-digit text is `InvalidFormat` against `input`; a number outside the
/// range (including one too large for `u32`) keeps its original text.
fn parse_prefix(input: &str, text: &str, min: u8, max: u8) -> AddrResult<u32> {
    let text = text.trim();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AddrError::invalid(
            input,
            format!("prefix length '{text}' is not a number"),
        ));
    }
    match text.parse::<u32>() {
        Ok(prefix) if prefix >= min as u32 && prefix <= max as u32 => Ok(prefix),
        _ => Err(prefix_out_of_range(text, min, max)),
    }
}

impl IpNetwork {
    /// Build a network, checking the prefix against the family's width.
    pub fn new(addr: IpAddress, prefix: u32) -> AddrResult<IpNetwork> {
        let width = addr.family().width();
        if prefix > width as u32 {
            return Err(prefix_out_of_range(prefix, 0, width));
        }
        Ok(IpNetwork {
            addr,
            prefix: prefix as u8,
        })
    }

    /// The address the network was built from.
    pub fn address(&self) -> IpAddress {
        self.addr
    }

    pub fn prefix_len(&self) -> u8 {
        self.prefix
    }

    pub fn family(&self) -> Family {
        self.addr.family()
    }

    fn width(&self) -> u8 {
        self.family().width()
    }

    fn host_bits(&self) -> u8 {
        self.width() - self.prefix
    }

    pub fn netmask(&self) -> IpAddress {
        self.addr.map_bytes(|b| bits::write_mask(b, self.prefix))
    }

    pub fn hostmask(&self) -> IpAddress {
        !self.netmask()
    }

    pub fn network_address(&self) -> IpAddress {
        self.addr.map_bytes(|b| bits::cut(b, self.prefix))
    }

    /// Highest address in the block (the "last address" for IPv6).
    pub fn broadcast_address(&self) -> IpAddress {
        self.addr.map_bytes(|b| bits::fill_host(b, self.prefix))
    }

    /// Every address in the block, saturating at `u128::MAX` for `::/0`.
    pub fn address_count(&self) -> u128 {
        1u128.checked_shl(self.host_bits() as u32).unwrap_or(u128::MAX)
    }

    /// Usable hosts. IPv4 blocks of four or more lose the network and
    /// broadcast addresses; `/31` keeps both (RFC 3021).
    pub fn host_count(&self) -> u128 {
        let count = self.address_count();
        if self.reserves_edges() {
            count - 2
        } else {
            count
        }
    }

    fn reserves_edges(&self) -> bool {
        self.family() == Family::V4 && self.host_bits() >= 2
    }

    pub fn first_host(&self) -> IpAddress {
        let network = self.network_address();
        if self.reserves_edges() {
            network.map_bytes(|b| {
                bits::increment(b);
            })
        } else {
            network
        }
    }

    pub fn last_host(&self) -> IpAddress {
        let broadcast = self.broadcast_address();
        if self.reserves_edges() {
            broadcast.map_bytes(|b| {
                bits::decrement(b);
            })
        } else {
            broadcast
        }
    }

    /// Same block with the host bits cleared.
    pub fn trunc(&self) -> IpNetwork {
        IpNetwork {
            addr: self.network_address(),
            prefix: self.prefix,
        }
    }

    /// The enclosing block one bit shorter, `None` at `/0`.
    pub fn supernet(&self) -> Option<IpNetwork> {
        let prefix = self.prefix.checked_sub(1)?;
        Some(IpNetwork {
            addr: self.addr.map_bytes(|b| bits::cut(b, prefix)),
            prefix,
        })
    }

    pub fn contains(&self, addr: &IpAddress) -> AddrResult<bool> {
        self.addr.check_family(addr)?;
        Ok(bits::prefix_matches(
            addr.as_bytes(),
            self.addr.as_bytes(),
            self.prefix,
        ))
    }

    pub fn overlaps(&self, other: &IpNetwork) -> AddrResult<bool> {
        self.addr.check_family(&other.addr)?;
        let shorter = self.prefix.min(other.prefix);
        Ok(bits::prefix_matches(
            self.addr.as_bytes(),
            other.addr.as_bytes(),
            shorter,
        ))
    }

    /// True when every address of `other` lies inside this block.
    pub fn contains_network(&self, other: &IpNetwork) -> AddrResult<bool> {
        self.addr.check_family(&other.addr)?;
        Ok(other.prefix >= self.prefix
            && bits::prefix_matches(other.addr.as_bytes(), self.addr.as_bytes(), self.prefix))
    }

    /// Parse text as a child prefix for [`IpNetwork::subnets`].
    pub fn parse_subnet_prefix(&self, text: &str) -> AddrResult<u32> {
        parse_prefix(text, text, self.prefix, self.width())
    }

    /// Split into children of `new_prefix`, which must lie between the
    /// current prefix and the family width.
    pub fn subnets(&self, new_prefix: u32) -> AddrResult<Subnets> {
        let width = self.width();
        if new_prefix < self.prefix as u32 || new_prefix > width as u32 {
            return Err(prefix_out_of_range(new_prefix, self.prefix, width));
        }
        let new_prefix = new_prefix as u8;
        let split_bits = (new_prefix - self.prefix) as u32;
        Ok(Subnets {
            base: self.network_address(),
            new_prefix,
            shift: (width - new_prefix) as u32,
            front: 0,
            back: u128::MAX.checked_shr(128 - split_bits).unwrap_or(0),
            done: false,
        })
    }
}

/// Smallest list of blocks covering exactly the same addresses.
///
/// Inputs are truncated to their network address; blocks inside another
/// block are dropped and sibling halves are joined into their parent until
/// nothing changes. The result is sorted, IPv4 first.
pub fn cidr_merge(networks: &[IpNetwork]) -> Vec<IpNetwork> {
    let mut merged: Vec<IpNetwork> = networks.iter().map(IpNetwork::trunc).collect();
    loop {
        // sort puts a block before everything it contains
        merged.sort();
        merged.dedup();
        let before = merged.len();

        let mut out: Vec<IpNetwork> = Vec::with_capacity(before);
        for net in merged {
            if let Some(last) = out.last_mut() {
                if last.contains_network(&net).unwrap_or(false) {
                    continue;
                }
                if last.prefix == net.prefix {
                    if let Some(parent) = last.supernet().filter(|p| net.supernet() == Some(*p)) {
                        *last = parent;
                        continue;
                    }
                }
            }
            out.push(net);
        }

        merged = out;
        if merged.len() == before {
            return merged;
        }
    }
}

/// Lazy sequence of the child networks produced by [`IpNetwork::subnets`].
///
/// Child `k` is `base + (k << (width - new_prefix))`; nothing is computed
/// until it is asked for.
#[derive(Debug, Clone)]
pub struct Subnets {
    base: IpAddress,
    new_prefix: u8,
    shift: u32,
    front: u128,
    // inclusive index of the last child
    back: u128,
    done: bool,
}

impl Subnets {
    /// Number of children in the full sequence, saturating at `u128::MAX`.
    pub fn total(&self) -> u128 {
        self.back.saturating_add(1)
    }

    pub fn new_prefix(&self) -> u8 {
        self.new_prefix
    }

    fn child(&self, index: u128) -> IpNetwork {
        let offset = index.checked_shl(self.shift).unwrap_or(0);
        let addr = IpAddress::from_u128(self.base.family(), self.base.to_u128() | offset);
        IpNetwork {
            addr,
            prefix: self.new_prefix,
        }
    }

    fn remaining(&self) -> Option<u128> {
        if self.done {
            Some(0)
        } else {
            (self.back - self.front).checked_add(1)
        }
    }
}

impl Iterator for Subnets {
    type Item = IpNetwork;

    fn next(&mut self) -> Option<IpNetwork> {
        if self.done {
            return None;
        }
        let net = self.child(self.front);
        if self.front == self.back {
            self.done = true;
        } else {
            self.front += 1;
        }
        Some(net)
    }

    fn nth(&mut self, n: usize) -> Option<IpNetwork> {
        if self.done {
            return None;
        }
        if n as u128 > self.back - self.front {
            self.done = true;
            return None;
        }
        self.front += n as u128;
        self.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.remaining().and_then(|n| usize::try_from(n).ok()) {
            Some(n) => (n, Some(n)),
            None => (usize::MAX, None),
        }
    }
}

impl FromStr for IpNetwork {
    type Err = AddrError;

    /// Parse `address/prefix`.
    fn from_str(s: &str) -> AddrResult<IpNetwork> {
        let text = s.trim();
        let (addr, prefix) = text
            .split_once('/')
            .ok_or_else(|| AddrError::invalid(text, "missing '/' prefix length"))?;
        let addr = IpAddress::from_str(addr)?;
        let prefix = parse_prefix(text, prefix, 0, addr.family().width())?;
        IpNetwork::new(addr, prefix)
    }
}

impl fmt::Display for IpNetwork {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefix)
    }
}

impl Serialize for IpNetwork {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for IpNetwork {
    fn deserialize<D>(deserializer: D) -> Result<IpNetwork, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        IpNetwork::from_str(&s).map_err(de::Error::custom)
    }
}
