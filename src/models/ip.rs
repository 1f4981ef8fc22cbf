//! IPv4 / IPv6 address model.
//!
//! Provides [`IpAddress`], a closed enum over the two families holding the
//! big-endian bytes, with classification predicates and sequential stepping.

use super::bits;
use crate::codec;
use crate::error::{AddrError, AddrResult, Step};
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::ops::Not;
use std::str::FromStr;

/// Address family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Family {
    V4,
    V6,
}

impl Family {
    /// Number of bits in an address of this family.
    pub fn width(self) -> u8 {
        match self {
            Family::V4 => 32,
            Family::V6 => 128,
        }
    }

    pub fn version(self) -> u8 {
        match self {
            Family::V4 => 4,
            Family::V6 => 6,
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "IPv{}", self.version())
    }
}

/// An IP address; the variant fixes the byte length.
///
/// Ordering puts every IPv4 address before every IPv6 address, then compares
/// numerically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IpAddress {
    V4([u8; 4]),
    V6([u8; 16]),
}

type Block = (&'static [u8], u8);

const V4_PRIVATE: [Block; 3] = [(&[10], 8), (&[172, 16], 12), (&[192, 168], 16)];
const V4_LOOPBACK: Block = (&[127], 8);
const V4_LINK_LOCAL: Block = (&[169, 254], 16);
const V4_MULTICAST: Block = (&[224], 4);
const V4_RESERVED: [Block; 2] = [(&[0], 8), (&[240], 4)];

const V6_PRIVATE: Block = (&[0xfc], 7);
const V6_LINK_LOCAL: Block = (&[0xfe, 0x80], 10);
const V6_MULTICAST: Block = (&[0xff], 8);
const V6_RESERVED: Block = (&[0x00], 8);
const V6_LOOPBACK: [u8; 16] = [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1];

fn in_block(bytes: &[u8], (prefix, len): Block) -> bool {
    bits::prefix_matches(bytes, prefix, len)
}

impl IpAddress {
    /// Build an address of `family` from its integer value.
    ///
    /// IPv4 keeps only the low 32 bits.
    pub fn from_u128(family: Family, value: u128) -> IpAddress {
        let zero = match family {
            Family::V4 => IpAddress::V4([0; 4]),
            Family::V6 => IpAddress::V6([0; 16]),
        };
        zero.map_bytes(|b| bits::write_u128(b, value))
    }

    pub fn family(&self) -> Family {
        match self {
            IpAddress::V4(_) => Family::V4,
            IpAddress::V6(_) => Family::V6,
        }
    }

    /// 4 or 6.
    pub fn version(&self) -> u8 {
        self.family().version()
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            IpAddress::V4(b) => b,
            IpAddress::V6(b) => b,
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }

    pub fn to_u128(&self) -> u128 {
        bits::to_u128(self.as_bytes())
    }

    pub fn to_hex(&self) -> String {
        codec::to_hex(self)
    }

    pub fn reverse_dns(&self) -> String {
        codec::reverse_dns_name(self)
    }

    /// Fully expanded text (IPv6 groups zero-padded).
    pub fn exploded(&self) -> String {
        codec::exploded(self)
    }

    /// Copy the address, let `f` rewrite the bytes, keep the family.
    pub(crate) fn map_bytes(&self, f: impl FnOnce(&mut [u8])) -> IpAddress {
        let mut out = *self;
        match &mut out {
            IpAddress::V4(b) => f(&mut b[..]),
            IpAddress::V6(b) => f(&mut b[..]),
        }
        out
    }

    /// Fail with `FamilyMismatch` unless `other` has the same family.
    pub fn check_family(&self, other: &IpAddress) -> AddrResult<()> {
        if self.family() == other.family() {
            Ok(())
        } else {
            Err(AddrError::FamilyMismatch {
                expected: self.version(),
                found: other.version(),
            })
        }
    }

    /// Bitwise AND with a same-family address.
    pub fn and_mask(&self, other: &IpAddress) -> AddrResult<IpAddress> {
        self.check_family(other)?;
        Ok(self.map_bytes(|b| bits::and_assign(b, other.as_bytes())))
    }

    /// Bitwise OR with a same-family address.
    pub fn or_mask(&self, other: &IpAddress) -> AddrResult<IpAddress> {
        self.check_family(other)?;
        Ok(self.map_bytes(|b| bits::or_assign(b, other.as_bytes())))
    }

    /// The address one above this one.
    pub fn increment(&self) -> AddrResult<IpAddress> {
        let mut stepped = true;
        let next = self.map_bytes(|b| stepped = bits::increment(b));
        if stepped {
            Ok(next)
        } else {
            Err(self.exhausted(Step::Next))
        }
    }

    /// The address one below this one.
    pub fn decrement(&self) -> AddrResult<IpAddress> {
        let mut stepped = true;
        let prev = self.map_bytes(|b| stepped = bits::decrement(b));
        if stepped {
            Ok(prev)
        } else {
            Err(self.exhausted(Step::Prev))
        }
    }

    fn exhausted(&self, step: Step) -> AddrError {
        AddrError::AddressSpaceExhausted {
            address: self.to_string(),
            step,
        }
    }

    /// RFC 1918 for IPv4, unique local `fc00::/7` for IPv6.
    pub fn is_private(&self) -> bool {
        match self {
            IpAddress::V4(b) => V4_PRIVATE.iter().any(|block| in_block(b, *block)),
            IpAddress::V6(b) => in_block(b, V6_PRIVATE),
        }
    }

    pub fn is_loopback(&self) -> bool {
        match self {
            IpAddress::V4(b) => in_block(b, V4_LOOPBACK),
            IpAddress::V6(b) => *b == V6_LOOPBACK,
        }
    }

    pub fn is_multicast(&self) -> bool {
        match self {
            IpAddress::V4(b) => in_block(b, V4_MULTICAST),
            IpAddress::V6(b) => in_block(b, V6_MULTICAST),
        }
    }

    pub fn is_link_local(&self) -> bool {
        match self {
            IpAddress::V4(b) => in_block(b, V4_LINK_LOCAL),
            IpAddress::V6(b) => in_block(b, V6_LINK_LOCAL),
        }
    }

    pub fn is_unspecified(&self) -> bool {
        bits::is_zero(self.as_bytes())
    }

    /// Single summary label for the address.
    pub fn class(&self) -> AddressClass {
        if self.is_unspecified() {
            AddressClass::Unspecified
        } else if self.is_loopback() {
            AddressClass::Loopback
        } else if self.is_multicast() {
            AddressClass::Multicast
        } else if self.is_link_local() {
            AddressClass::LinkLocal
        } else if self.is_private() {
            AddressClass::Private
        } else {
            match self {
                IpAddress::V4(b) if b.iter().all(|o| *o == 0xFF) => AddressClass::Broadcast,
                IpAddress::V4(b) if V4_RESERVED.iter().any(|block| in_block(b, *block)) => {
                    AddressClass::Reserved
                }
                IpAddress::V6(b) if in_block(b, V6_RESERVED) => AddressClass::Reserved,
                _ => AddressClass::Global,
            }
        }
    }
}

/// Classification picked by [`IpAddress::class`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressClass {
    Unspecified,
    Loopback,
    Multicast,
    LinkLocal,
    Private,
    Broadcast,
    Reserved,
    Global,
}

impl AddressClass {
    pub fn description(&self) -> &'static str {
        match self {
            AddressClass::Unspecified => "Unspecified Address",
            AddressClass::Loopback => "Loopback Address",
            AddressClass::Multicast => "Multicast Address",
            AddressClass::LinkLocal => "Link-Local Address",
            AddressClass::Private => "Private/Local Address",
            AddressClass::Broadcast => "Broadcast Address",
            AddressClass::Reserved => "Reserved Address",
            AddressClass::Global => "Global/Public Address",
        }
    }
}

impl fmt::Display for AddressClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

impl Not for IpAddress {
    type Output = IpAddress;

    fn not(self) -> IpAddress {
        self.map_bytes(bits::invert)
    }
}

impl FromStr for IpAddress {
    type Err = AddrError;

    fn from_str(s: &str) -> AddrResult<IpAddress> {
        codec::parse_address(s)
    }
}

impl fmt::Display for IpAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", codec::format_address(self))
    }
}

impl Serialize for IpAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for IpAddress {
    fn deserialize<D>(deserializer: D) -> Result<IpAddress, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        IpAddress::from_str(&s).map_err(de::Error::custom)
    }
}
