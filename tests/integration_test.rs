//! Integration tests for netaddr-summary
//!
//! These tests drive the public API from text input to result records.

use netaddr_summary::{facade, AddressSet, ErrorKind, IpAddress, IpNetwork, MacAddress};
use std::str::FromStr;

fn ip(s: &str) -> IpAddress {
    IpAddress::from_str(s).expect("valid address")
}

fn net(s: &str) -> IpNetwork {
    IpNetwork::from_str(s).expect("valid network")
}

#[test]
fn test_round_trip_both_families() {
    let inputs = [
        "0.0.0.0",
        "192.168.001.010",
        "255.255.255.255",
        "::",
        "::ffff:10.0.0.1",
        "2001:0db8:0000:0000:0001:0000:0000:0001",
        "FE80::1",
        "1:2:3:4:5:6:7:8",
    ];
    for text in inputs {
        let addr = ip(text);
        let formatted = addr.to_string();
        assert_eq!(ip(&formatted), addr, "{text} -> {formatted}");
        assert_eq!(ip(&formatted).to_string(), formatted);
    }
}

#[test]
fn test_increment_decrement_inverse() {
    let mut addr = ip("10.255.255.250");
    for _ in 0..10 {
        let next = addr.increment().expect("not at the edge");
        assert_eq!(next.decrement().expect("not at the edge"), addr);
        addr = next;
    }
    assert_eq!(addr, ip("11.0.0.4"));

    let v6 = ip("2001:db8::ffff:ffff");
    assert_eq!(v6.increment().unwrap(), ip("2001:db8::1:0:0"));
}

#[test]
fn test_subnet_coverage() {
    for (parent, prefix) in [("10.0.0.0/22", 25), ("172.16.0.0/12", 14), ("2001:db8::/48", 52)] {
        let parent = net(parent);
        let children: Vec<IpNetwork> = parent.subnets(prefix).unwrap().collect();
        let expected = 1usize << (prefix - parent.prefix_len() as u32);
        assert_eq!(children.len(), expected);

        assert_eq!(children[0].network_address(), parent.network_address());
        assert_eq!(
            children[children.len() - 1].broadcast_address(),
            parent.broadcast_address()
        );
        for pair in children.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(!pair[0].overlaps(&pair[1]).unwrap());
            assert_eq!(
                pair[0].broadcast_address().increment().unwrap(),
                pair[1].network_address()
            );
        }
        for child in &children {
            assert!(parent.contains(&child.network_address()).unwrap());
        }
    }
}

#[test]
fn test_host_counts() {
    assert_eq!(net("192.168.1.0/24").host_count(), 254);
    assert_eq!(net("192.168.1.1/32").host_count(), 1);
    assert_eq!(net("192.168.1.0/31").host_count(), 2);
    assert_eq!(net("2001:db8::/64").host_count(), 1u128 << 64);
    assert_eq!(net("2001:db8::1/128").host_count(), 1);
}

#[test]
fn test_classification_examples() {
    assert!(ip("10.0.0.1").is_private());
    assert!(ip("127.0.0.1").is_loopback());
    assert!(ip("169.254.1.1").is_link_local());
    assert!(ip("0.0.0.0").is_unspecified());
}

#[test]
fn test_mac_example() {
    let mac = MacAddress::from_str("01:23:45:67:89:AB").unwrap();
    assert_eq!(mac.oui(), "01:23:45");
    assert!(mac.is_multicast());
    assert!(mac.is_universal());
    assert_eq!(MacAddress::from_str("0123.4567.89ab").unwrap(), mac);
    assert_eq!(MacAddress::from_str("01-23-45-67-89-ab").unwrap(), mac);
}

#[test]
fn test_address_set_example() {
    let set = AddressSet::build("10.0.0.1,10.0.0.1,10.0.0.0/24").unwrap();
    assert_eq!(set.len(), 2);
    assert_eq!(set.addresses(), &[ip("10.0.0.1")]);
    assert_eq!(set.networks(), &[net("10.0.0.0/24")]);
}

#[test]
fn test_error_kinds() {
    assert_eq!(
        IpAddress::from_str("999.1.1.1").unwrap_err().kind(),
        ErrorKind::OctetOutOfRange
    );
    assert_eq!(
        IpNetwork::from_str("10.0.0.0/99").unwrap_err().kind(),
        ErrorKind::PrefixOutOfRange
    );
    assert_eq!(
        IpAddress::from_str("::1::2").unwrap_err().kind(),
        ErrorKind::AmbiguousCompression
    );
    assert_eq!(
        ip("255.255.255.255").increment().unwrap_err().kind(),
        ErrorKind::AddressSpaceExhausted
    );
    assert_eq!(
        ip("::").decrement().unwrap_err().kind(),
        ErrorKind::AddressSpaceExhausted
    );
    assert_eq!(
        net("10.0.0.0/8").contains(&ip("fe80::1")).unwrap_err().kind(),
        ErrorKind::FamilyMismatch
    );
}

#[test]
fn test_facade_workflow() {
    let canonical = facade::parse_ip("2001:DB8:0:0:0:0:0:1").unwrap();
    assert_eq!(canonical, "2001:db8::1");

    let info = facade::get_ip_info(&canonical).unwrap();
    assert_eq!(info.version, 6);
    assert_eq!(info.exploded, "2001:0db8:0000:0000:0000:0000:0000:0001");

    let network = facade::parse_network("2001:db8::/126").unwrap();
    assert_eq!(network.num_hosts, 4);
    assert_eq!(network.last_host.to_string(), "2001:db8::3");

    let listing = facade::subnet_network("2001:db8::/32", 64, 20).unwrap();
    assert_eq!(listing.subnets.len(), 20);
    assert_eq!(listing.total, 1u128 << 32);
    assert!(listing.truncated);
    assert_eq!(listing.subnets[1].to_string(), "2001:db8:0:1::/64");

    let set = facade::create_ip_set("2001:db8::1, 2001:db8::/32, 2001:db8::1").unwrap();
    assert_eq!(set.count, 2);
    assert_eq!(set.summary, "2 entries: 1 address, 1 network (0 IPv4, 2 IPv6)");
}

#[test]
fn test_dispatch_contract() {
    let info = facade::dispatch("getIPInfo", &["127.0.0.1"]).unwrap();
    let value: serde_json::Value = serde_json::from_str(&info).unwrap();
    assert_eq!(value["is_loopback"], true);
    assert_eq!(value["version"], 4);

    let err = facade::dispatch("parseNetwork", &["10.0.0.0/99"]).unwrap_err();
    assert_eq!(err, "prefix length 99 out of range (0..=32)");

    let err = facade::dispatch("createIPSet", &["10.0.0.1, nope"]).unwrap_err();
    assert!(err.starts_with("entry 1 ('nope')"), "{err}");
}
