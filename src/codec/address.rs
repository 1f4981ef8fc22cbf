//! Text <-> binary conversion for IPv4 and IPv6 addresses.
//!
//! Parsing is strict about the error it reports: grammar problems are
//! `InvalidFormat`, numeric overflow of a group is `OctetOutOfRange` and a
//! second `::` is `AmbiguousCompression`. Formatting produces the canonical
//! text (RFC 5952 for IPv6).

use crate::error::{AddrError, AddrResult};
use crate::models::IpAddress;
use itertools::Itertools;

const V4_GROUPS: usize = 4;
const V6_GROUPS: usize = 8;

/// Parse an IPv4 or IPv6 address, picking the family from its separators.
pub fn parse_address(text: &str) -> AddrResult<IpAddress> {
    let text = text.trim();
    if text.contains(':') {
        parse_v6(text).map(IpAddress::V6)
    } else if text.contains('.') {
        parse_v4(text).map(IpAddress::V4)
    } else {
        Err(AddrError::invalid(
            text,
            "not a dotted-quad or colon-hex address",
        ))
    }
}

/// Parse a dotted-quad. Leading zeros are read as decimal.
pub fn parse_v4(text: &str) -> AddrResult<[u8; 4]> {
    let parts: Vec<&str> = text.split('.').collect();
    if parts.len() != V4_GROUPS {
        return Err(AddrError::invalid(
            text,
            format!("expected 4 octets, found {}", parts.len()),
        ));
    }
    let mut octets = [0u8; 4];
    for (i, part) in parts.iter().enumerate() {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AddrError::invalid(
                text,
                format!("octet '{part}' is not a decimal number"),
            ));
        }
        octets[i] = parse_octet(part)?;
    }
    Ok(octets)
}

fn parse_octet(part: &str) -> AddrResult<u8> {
    let out_of_range = || AddrError::OctetOutOfRange {
        token: part.to_string(),
        max: u8::MAX as u32,
    };
    let digits = part.trim_start_matches('0');
    if digits.len() > 3 {
        return Err(out_of_range());
    }
    let value: u16 = if digits.is_empty() {
        0
    } else {
        digits.parse().map_err(|_| out_of_range())?
    };
    u8::try_from(value).map_err(|_| out_of_range())
}

/// Parse colon-hex text with optional `::` and dotted-quad tail.
pub fn parse_v6(text: &str) -> AddrResult<[u8; 16]> {
    let (head, tail) = match text.find("::") {
        Some(pos) => {
            let rest = &text[pos + 2..];
            if rest.contains("::") {
                return Err(AddrError::AmbiguousCompression {
                    input: text.to_string(),
                });
            }
            (&text[..pos], Some(rest))
        }
        None => (text, None),
    };

    let head_groups = parse_groups(text, head, tail.is_none())?;
    let tail_groups = match tail {
        Some(tail) => parse_groups(text, tail, true)?,
        None => Vec::new(),
    };

    let explicit = head_groups.len() + tail_groups.len();
    let zeros = match tail {
        None if explicit == V6_GROUPS => 0,
        None => {
            return Err(AddrError::invalid(
                text,
                format!("expected 8 groups, found {explicit}"),
            ))
        }
        Some(_) if explicit < V6_GROUPS => V6_GROUPS - explicit,
        Some(_) => {
            return Err(AddrError::invalid(
                text,
                format!("'::' with {explicit} explicit groups leaves nothing to compress"),
            ))
        }
    };

    let mut bytes = [0u8; 16];
    let groups = head_groups
        .iter()
        .chain(std::iter::repeat(&0u16).take(zeros))
        .chain(tail_groups.iter());
    for (i, group) in groups.enumerate() {
        bytes[i * 2..i * 2 + 2].copy_from_slice(&group.to_be_bytes());
    }
    Ok(bytes)
}

/// Parse one side of a `::` split into 16-bit groups.
fn parse_groups(text: &str, side: &str, dotted_tail_allowed: bool) -> AddrResult<Vec<u16>> {
    if side.is_empty() {
        return Ok(Vec::new());
    }
    let parts: Vec<&str> = side.split(':').collect();
    let last = parts.len() - 1;
    let mut groups = Vec::with_capacity(parts.len() + 1);
    for (i, part) in parts.iter().enumerate() {
        if part.contains('.') {
            if !dotted_tail_allowed || i != last {
                return Err(AddrError::invalid(
                    text,
                    "a dotted-quad may only appear as the final group",
                ));
            }
            let v4 = parse_v4(part)?;
            groups.push(u16::from_be_bytes([v4[0], v4[1]]));
            groups.push(u16::from_be_bytes([v4[2], v4[3]]));
        } else {
            groups.push(parse_hextet(text, part)?);
        }
    }
    Ok(groups)
}

fn parse_hextet(text: &str, part: &str) -> AddrResult<u16> {
    if part.is_empty() {
        return Err(AddrError::invalid(text, "empty group"));
    }
    if !part.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(AddrError::invalid(
            text,
            format!("group '{part}' is not hexadecimal"),
        ));
    }
    let digits = part.trim_start_matches('0');
    if digits.len() > 4 {
        return Err(AddrError::OctetOutOfRange {
            token: part.to_string(),
            max: u16::MAX as u32,
        });
    }
    if part.len() > 4 {
        return Err(AddrError::invalid(
            text,
            format!("group '{part}' has more than 4 hex digits"),
        ));
    }
    if digits.is_empty() {
        return Ok(0);
    }
    u16::from_str_radix(digits, 16).map_err(|_| AddrError::invalid(text, "bad hex group"))
}

/// Canonical text of an address.
pub fn format_address(addr: &IpAddress) -> String {
    match addr {
        IpAddress::V4(octets) => octets.iter().join("."),
        IpAddress::V6(bytes) => format_v6(bytes),
    }
}

fn segments(bytes: &[u8; 16]) -> [u16; 8] {
    let mut segments = [0u16; 8];
    for (i, chunk) in bytes.chunks_exact(2).enumerate() {
        segments[i] = u16::from_be_bytes([chunk[0], chunk[1]]);
    }
    segments
}

/// RFC 5952 text: lowercase, no leading zeros, longest zero run (of two or
/// more groups, leftmost on a tie) replaced by `::`.
pub fn format_v6(bytes: &[u8; 16]) -> String {
    let segments = segments(bytes);

    let mut best: Option<(usize, usize)> = None;
    let mut run_start = None;
    for i in 0..=V6_GROUPS {
        let zero = i < V6_GROUPS && segments[i] == 0;
        match (zero, run_start) {
            (true, None) => run_start = Some(i),
            (false, Some(start)) => {
                let len = i - start;
                if len >= 2 && best.map_or(true, |(_, best_len)| len > best_len) {
                    best = Some((start, len));
                }
                run_start = None;
            }
            _ => {}
        }
    }

    match best {
        None => segments.iter().map(|s| format!("{s:x}")).join(":"),
        Some((start, len)) => {
            let head = segments[..start].iter().map(|s| format!("{s:x}")).join(":");
            let tail = segments[start + len..]
                .iter()
                .map(|s| format!("{s:x}"))
                .join(":");
            format!("{head}::{tail}")
        }
    }
}

/// Fully expanded form: every IPv6 group as four hex digits.
pub fn exploded(addr: &IpAddress) -> String {
    match addr {
        IpAddress::V4(_) => format_address(addr),
        IpAddress::V6(bytes) => segments(bytes).iter().map(|s| format!("{s:04x}")).join(":"),
    }
}

/// Lowercase hex of the raw bytes, two digits per byte.
pub fn to_hex(addr: &IpAddress) -> String {
    addr.as_bytes().iter().map(|b| format!("{b:02x}")).collect()
}

/// PTR name for the address: reversed octets under `in-addr.arpa` for IPv4,
/// reversed nibbles under `ip6.arpa` for IPv6.
pub fn reverse_dns_name(addr: &IpAddress) -> String {
    match addr {
        IpAddress::V4(octets) => {
            format!("{}.in-addr.arpa", octets.iter().rev().join("."))
        }
        IpAddress::V6(bytes) => {
            let nibbles = bytes
                .iter()
                .rev()
                .flat_map(|b| [b & 0x0F, b >> 4])
                .map(|n| format!("{n:x}"))
                .join(".");
            format!("{nibbles}.ip6.arpa")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn v6(text: &str) -> String {
        format_address(&parse_address(text).unwrap())
    }

    #[test]
    fn test_parse_v4() {
        assert_eq!(parse_v4("192.168.1.1").unwrap(), [192, 168, 1, 1]);
        assert_eq!(parse_v4("0.0.0.0").unwrap(), [0, 0, 0, 0]);
        assert_eq!(parse_v4("010.020.030.040").unwrap(), [10, 20, 30, 40]);
        assert_eq!(
            parse_address(" 10.0.0.1 ").unwrap(),
            IpAddress::V4([10, 0, 0, 1])
        );
    }

    #[test]
    fn test_parse_v4_errors() {
        assert_eq!(
            parse_address("999.1.1.1").unwrap_err().kind(),
            ErrorKind::OctetOutOfRange
        );
        assert_eq!(
            parse_address("256.0.0.0").unwrap_err().kind(),
            ErrorKind::OctetOutOfRange
        );
        assert_eq!(
            parse_address("1.2.3.40000").unwrap_err().kind(),
            ErrorKind::OctetOutOfRange
        );
        for bad in ["1.2.3", "1.2.3.4.5", "1..2.3", "a.b.c.d", "1.2.3.-4", "", "hello"] {
            assert_eq!(
                parse_address(bad).unwrap_err().kind(),
                ErrorKind::InvalidFormat,
                "{bad}"
            );
        }
    }

    #[test]
    fn test_parse_v6() {
        assert_eq!(v6("2001:0db8:0000:0000:0000:0000:0000:0001"), "2001:db8::1");
        assert_eq!(v6("::"), "::");
        assert_eq!(v6("::1"), "::1");
        assert_eq!(v6("fe80::"), "fe80::");
        assert_eq!(v6("1:2:3:4:5:6:7::"), "1:2:3:4:5:6:7:0");
        assert_eq!(v6("FF02::1"), "ff02::1");
        assert_eq!(v6("::ffff:192.168.1.1"), "::ffff:c0a8:101");
        assert_eq!(v6("1:2:3:4:5:6:1.2.3.4"), "1:2:3:4:5:6:102:304");
    }

    #[test]
    fn test_parse_v6_errors() {
        assert_eq!(
            parse_address("::1::2").unwrap_err().kind(),
            ErrorKind::AmbiguousCompression
        );
        assert_eq!(
            parse_address("1::2::3").unwrap_err().kind(),
            ErrorKind::AmbiguousCompression
        );
        assert_eq!(
            parse_address("12345::").unwrap_err().kind(),
            ErrorKind::OctetOutOfRange
        );
        for bad in [
            ":::",
            "1:2:3:4:5:6:7",
            "1:2:3:4:5:6:7:8:9",
            "1:2:3:4:5:6:7:8::",
            "g::1",
            "1.2.3.4::",
            "::1.2.3.4:5",
            ":1::",
            "1:",
        ] {
            assert_eq!(
                parse_address(bad).unwrap_err().kind(),
                ErrorKind::InvalidFormat,
                "{bad}"
            );
        }
        assert_eq!(
            parse_address("::300.1.1.1").unwrap_err().kind(),
            ErrorKind::OctetOutOfRange
        );
    }

    #[test]
    fn test_hextet_digit_limit() {
        for bad in ["000001::", "00000::", "::00001", "1:2:3:4:5:6:7:00008"] {
            assert_eq!(
                parse_address(bad).unwrap_err().kind(),
                ErrorKind::InvalidFormat,
                "{bad}"
            );
        }
        assert_eq!(
            parse_address("0012345::").unwrap_err().kind(),
            ErrorKind::OctetOutOfRange
        );
        assert_eq!(v6("0001:0db8::0000"), "1:db8::");
    }

    #[test]
    fn test_format_v6_rfc5952() {
        // a single zero group is not compressed
        assert_eq!(v6("2001:db8:0:1:1:1:1:1"), "2001:db8:0:1:1:1:1:1");
        // longest run wins
        assert_eq!(v6("2001:0:0:1:0:0:0:1"), "2001:0:0:1::1");
        // leftmost run on a tie
        assert_eq!(v6("2001:db8:0:0:1:0:0:1"), "2001:db8::1:0:0:1");
        assert_eq!(v6("0:0:0:0:0:0:0:1"), "::1");
        assert_eq!(v6("1:0:0:0:0:0:0:0"), "1::");
    }

    #[test]
    fn test_round_trip() {
        for text in [
            "0.0.0.0",
            "255.255.255.255",
            "10.20.30.40",
            "::",
            "::1",
            "2001:db8::",
            "fe80::1:2",
            "ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff",
            "1:0:1:0:1:0:1:0",
        ] {
            let addr = parse_address(text).unwrap();
            let formatted = format_address(&addr);
            assert_eq!(formatted, text);
            assert_eq!(parse_address(&formatted).unwrap(), addr);
        }
    }

    #[test]
    fn test_exploded() {
        let addr = parse_address("2001:db8::1").unwrap();
        assert_eq!(
            exploded(&addr),
            "2001:0db8:0000:0000:0000:0000:0000:0001"
        );
        let addr = parse_address("10.0.0.1").unwrap();
        assert_eq!(exploded(&addr), "10.0.0.1");
    }

    #[test]
    fn test_hex_and_reverse_dns() {
        let addr = parse_address("192.168.1.1").unwrap();
        assert_eq!(to_hex(&addr), "c0a80101");
        assert_eq!(reverse_dns_name(&addr), "1.1.168.192.in-addr.arpa");

        let addr = parse_address("2001:db8::567:89ab").unwrap();
        assert_eq!(to_hex(&addr), "20010db80000000000000000056789ab");
        assert_eq!(
            reverse_dns_name(&addr),
            "b.a.9.8.7.6.5.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.8.b.d.0.1.0.0.2.ip6.arpa"
        );
    }
}
