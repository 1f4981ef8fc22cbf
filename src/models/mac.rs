//! MAC-48 hardware address model.

use super::ip::IpAddress;
use crate::codec;
use crate::error::{AddrError, AddrResult};
use itertools::Itertools;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

const MULTICAST_BIT: u8 = 0x01;
const LOCAL_BIT: u8 = 0x02;

/// Textual notations a MAC address can be rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MacFormat {
    /// `01:23:45:67:89:AB`
    #[default]
    Colon,
    /// `01-23-45-67-89-AB`
    Hyphen,
    /// `0123456789ab`
    Bare,
    /// `0123.4567.89ab`
    Cisco,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MacAddress([u8; 6]);

impl MacAddress {
    pub fn new(bytes: [u8; 6]) -> MacAddress {
        MacAddress(bytes)
    }

    pub fn bytes(&self) -> &[u8; 6] {
        &self.0
    }

    /// Organizationally unique identifier: the first three bytes.
    pub fn oui(&self) -> String {
        self.0[..3].iter().map(|b| format!("{b:02X}")).join(":")
    }

    /// Device part: the last three bytes.
    pub fn nic(&self) -> String {
        self.0[3..].iter().map(|b| format!("{b:02X}")).join(":")
    }

    pub fn is_multicast(&self) -> bool {
        self.0[0] & MULTICAST_BIT != 0
    }

    pub fn is_unicast(&self) -> bool {
        !self.is_multicast()
    }

    pub fn is_universal(&self) -> bool {
        self.0[0] & LOCAL_BIT == 0
    }

    pub fn is_local(&self) -> bool {
        !self.is_universal()
    }

    pub fn is_broadcast(&self) -> bool {
        self.0.iter().all(|b| *b == 0xFF)
    }

    /// Short classification, e.g. `unicast, universally administered`.
    pub fn kind_label(&self) -> String {
        if self.is_broadcast() {
            return "broadcast".to_string();
        }
        let cast = if self.is_multicast() { "multicast" } else { "unicast" };
        let admin = if self.is_universal() {
            "universally administered"
        } else {
            "locally administered"
        };
        format!("{cast}, {admin}")
    }

    pub fn format(&self, format: MacFormat) -> String {
        codec::format_mac(self, format)
    }

    /// Modified EUI-64 interface identifier (RFC 4291 appendix A).
    pub fn modified_eui64(&self) -> [u8; 8] {
        let b = self.0;
        [b[0] ^ LOCAL_BIT, b[1], b[2], 0xFF, 0xFE, b[3], b[4], b[5]]
    }

    /// SLAAC link-local address `fe80::/64` + modified EUI-64.
    pub fn link_local_ipv6(&self) -> IpAddress {
        let mut bytes = [0u8; 16];
        bytes[0] = 0xFE;
        bytes[1] = 0x80;
        bytes[8..].copy_from_slice(&self.modified_eui64());
        IpAddress::V6(bytes)
    }
}

impl FromStr for MacAddress {
    type Err = AddrError;

    fn from_str(s: &str) -> AddrResult<MacAddress> {
        codec::parse_mac(s)
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.format(MacFormat::Colon))
    }
}

impl Serialize for MacAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for MacAddress {
    fn deserialize<D>(deserializer: D) -> Result<MacAddress, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        MacAddress::from_str(&s).map_err(de::Error::custom)
    }
}
