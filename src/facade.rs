//! Text-in, record-out entry points.
//!
//! Every function takes raw user text, runs it through the codecs and
//! models, and returns a serializable record or the [`AddrError`] that
//! stopped it. [`dispatch`] wraps them for hosts that only pass strings.

use crate::config;
use crate::error::{AddrError, AddrResult};
use crate::models::{IpAddress, IpNetwork, MacAddress};
use crate::processing::AddressSet;
use log::{debug, info};
use serde::Serialize;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IpInfo {
    pub address: IpAddress,
    pub version: u8,
    pub hex: String,
    pub binary: Vec<u8>,
    pub reverse_dns: String,
    pub is_private: bool,
    pub is_loopback: bool,
    pub is_multicast: bool,
    pub is_link_local: bool,
    pub is_unspecified: bool,
    pub class: String,
    pub exploded: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkInfo {
    pub network: IpNetwork,
    pub network_address: IpAddress,
    pub broadcast_address: IpAddress,
    pub netmask: IpAddress,
    pub hostmask: IpAddress,
    pub prefix_len: u8,
    pub num_hosts: u128,
    pub num_addresses: u128,
    pub first_host: IpAddress,
    pub last_host: IpAddress,
    pub subnets: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MacInfo {
    pub address: MacAddress,
    pub oui: String,
    pub length: usize,
    pub bytes: Vec<u8>,
    #[serde(rename = "type")]
    pub kind: String,
    pub is_unicast: bool,
    pub is_multicast: bool,
    pub is_universal: bool,
    pub is_local: bool,
    pub is_broadcast: bool,
    pub link_local_ipv6: IpAddress,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetInfo {
    pub count: usize,
    pub summary: String,
    pub entries: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubnetListing {
    pub original: IpNetwork,
    pub new_prefix: u8,
    pub subnets: Vec<IpNetwork>,
    pub total: u128,
    pub truncated: bool,
}

/// Canonical text of an address.
pub fn parse_ip(text: &str) -> AddrResult<String> {
    debug!("parse_ip '{}'", text);
    Ok(IpAddress::from_str(text)?.to_string())
}

pub fn get_ip_info(text: &str) -> AddrResult<IpInfo> {
    debug!("get_ip_info '{}'", text);
    let addr = IpAddress::from_str(text)?;
    Ok(IpInfo {
        address: addr,
        version: addr.version(),
        hex: addr.to_hex(),
        binary: addr.to_bytes(),
        reverse_dns: addr.reverse_dns(),
        is_private: addr.is_private(),
        is_loopback: addr.is_loopback(),
        is_multicast: addr.is_multicast(),
        is_link_local: addr.is_link_local(),
        is_unspecified: addr.is_unspecified(),
        class: addr.class().to_string(),
        exploded: addr.exploded(),
    })
}

pub fn parse_network(text: &str) -> AddrResult<NetworkInfo> {
    debug!("parse_network '{}'", text);
    let net = IpNetwork::from_str(text)?;
    Ok(NetworkInfo {
        network: net,
        network_address: net.network_address(),
        broadcast_address: net.broadcast_address(),
        netmask: net.netmask(),
        hostmask: net.hostmask(),
        prefix_len: net.prefix_len(),
        num_hosts: net.host_count(),
        num_addresses: net.address_count(),
        first_host: net.first_host(),
        last_host: net.last_host(),
        subnets: describe_split(&net),
    })
}

fn describe_split(net: &IpNetwork) -> String {
    let width = net.family().width();
    if net.prefix_len() == width {
        "single address, no subnets".to_string()
    } else {
        format!("splits into 2 subnets of /{}", net.prefix_len() + 1)
    }
}

pub fn parse_mac(text: &str) -> AddrResult<MacInfo> {
    debug!("parse_mac '{}'", text);
    let mac = MacAddress::from_str(text)?;
    Ok(MacInfo {
        address: mac,
        oui: mac.oui(),
        length: mac.bytes().len(),
        bytes: mac.bytes().to_vec(),
        kind: mac.kind_label(),
        is_unicast: mac.is_unicast(),
        is_multicast: mac.is_multicast(),
        is_universal: mac.is_universal(),
        is_local: mac.is_local(),
        is_broadcast: mac.is_broadcast(),
        link_local_ipv6: mac.link_local_ipv6(),
    })
}

pub fn create_ip_set(text: &str) -> AddrResult<SetInfo> {
    debug!("create_ip_set '{}'", text);
    let set = AddressSet::build(text)?;
    Ok(SetInfo {
        count: set.len(),
        summary: set.summary(),
        entries: set.entries().map(|e| e.to_string()).collect(),
    })
}

pub fn get_next_ip(text: &str) -> AddrResult<String> {
    debug!("get_next_ip '{}'", text);
    Ok(IpAddress::from_str(text)?.increment()?.to_string())
}

pub fn get_prev_ip(text: &str) -> AddrResult<String> {
    debug!("get_prev_ip '{}'", text);
    Ok(IpAddress::from_str(text)?.decrement()?.to_string())
}

/// List at most `limit` children of `new_prefix`, in order.
pub fn subnet_network(text: &str, new_prefix: u32, limit: usize) -> AddrResult<SubnetListing> {
    debug!("subnet_network '{}' /{} limit {}", text, new_prefix, limit);
    let net = IpNetwork::from_str(text)?;
    let subnets = net.subnets(new_prefix)?;
    let total = subnets.total();
    let new_prefix = subnets.new_prefix();
    let listed: Vec<IpNetwork> = subnets.take(limit).collect();
    let truncated = (listed.len() as u128) < total;
    if truncated {
        info!(
            "subnet_network {} -> /{}: listing {} of {} subnets",
            net,
            new_prefix,
            listed.len(),
            total
        );
    }
    Ok(SubnetListing {
        original: net,
        new_prefix,
        subnets: listed,
        total,
        truncated,
    })
}

fn to_json<T: Serialize>(record: &T) -> Result<String, String> {
    serde_json::to_string(record).map_err(|e| e.to_string())
}

fn arg<'a>(op: &str, args: &[&'a str], index: usize) -> Result<&'a str, String> {
    args.get(index)
        .copied()
        .ok_or_else(|| format!("{op}: missing argument {}", index + 1))
}

fn reason(e: AddrError) -> String {
    e.to_string()
}

/// Run a named operation on string arguments.
///
/// Address results come back as plain text, records as JSON; any failure is
/// the human-readable reason.
pub fn dispatch(op: &str, args: &[&str]) -> Result<String, String> {
    match op {
        "parseIP" => parse_ip(arg(op, args, 0)?).map_err(reason),
        "getIPInfo" => to_json(&get_ip_info(arg(op, args, 0)?).map_err(reason)?),
        "parseNetwork" => to_json(&parse_network(arg(op, args, 0)?).map_err(reason)?),
        "parseMAC" => to_json(&parse_mac(arg(op, args, 0)?).map_err(reason)?),
        "createIPSet" => to_json(&create_ip_set(arg(op, args, 0)?).map_err(reason)?),
        "getNextIP" => get_next_ip(arg(op, args, 0)?).map_err(reason),
        "getPrevIP" => get_prev_ip(arg(op, args, 0)?).map_err(reason),
        "subnetNetwork" => {
            let cidr = arg(op, args, 0)?;
            let prefix = arg(op, args, 1)?;
            let prefix = IpNetwork::from_str(cidr)
                .and_then(|net| net.parse_subnet_prefix(prefix))
                .map_err(reason)?;
            let listing =
                subnet_network(cidr, prefix, config::SUBNET_LIMIT).map_err(reason)?;
            to_json(&listing)
        }
        _ => Err(format!("unknown operation '{op}'")),
    }
}
