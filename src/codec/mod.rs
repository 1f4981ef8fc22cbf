//! Parsing and formatting of address text.
//!
//! - [`address`] - IPv4 / IPv6 text forms, hex and reverse-DNS views
//! - [`mac`] - MAC-48 text forms

mod address;
mod mac;

pub use address::{
    exploded, format_address, format_v6, parse_address, parse_v4, parse_v6, reverse_dns_name,
    to_hex,
};
pub use mac::{format_mac, parse_mac};
