//! Domain models for network addresses.
//!
//! This module contains the core value types used throughout the crate:
//! - [`IpAddress`] - IPv4 / IPv6 address with classification and stepping
//! - [`IpNetwork`] - CIDR block with derived addresses and lazy [`Subnets`]
//! - [`MacAddress`] - MAC-48 hardware address

pub mod bits;
mod ip;
mod mac;
mod network;

// Re-export public types
pub use ip::{AddressClass, Family, IpAddress};
pub use mac::{MacAddress, MacFormat};
pub use network::{cidr_merge, IpNetwork, Subnets};
