// cargo watch -x 'fmt' -x 'test'

//! Network address engine.
//!
//! - [`codec`] - address and MAC text parsing / formatting
//! - [`models`] - [`IpAddress`], [`IpNetwork`], [`MacAddress`]
//! - [`processing`] - [`AddressSet`] aggregation
//! - [`facade`] - text-in, record-out operations
//! - [`output`] - JSON and table rendering for the binary

pub mod cli;
pub mod codec;
pub mod config;
pub mod error;
pub mod facade;
pub mod models;
pub mod output;
pub mod processing;

pub use error::{AddrError, AddrResult, ErrorKind};
pub use models::{
    cidr_merge, AddressClass, Family, IpAddress, IpNetwork, MacAddress, MacFormat, Subnets,
};
pub use processing::{AddressSet, SetEntry};
