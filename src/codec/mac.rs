//! Text <-> binary conversion for MAC-48 addresses.

use crate::error::{AddrError, AddrResult};
use crate::models::{MacAddress, MacFormat};
use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // six 1-2 digit groups; uniform separators are checked after matching
    static ref SEPARATED: Regex =
        Regex::new(r"^[0-9A-Fa-f]{1,2}(?:[:-][0-9A-Fa-f]{1,2}){5}$").expect("Invalid Regex?");
    static ref BARE: Regex = Regex::new(r"^[0-9A-Fa-f]{12}$").expect("Invalid Regex?");
    static ref CISCO: Regex =
        Regex::new(r"^[0-9A-Fa-f]{4}\.[0-9A-Fa-f]{4}\.[0-9A-Fa-f]{4}$").expect("Invalid Regex?");
}

/// Parse `01:23:45:67:89:ab`, `01-23-45-67-89-ab`, `0123456789ab` or
/// `0123.4567.89ab`. Groups in the separated forms may drop a leading zero.
pub fn parse_mac(text: &str) -> AddrResult<MacAddress> {
    let text = text.trim();

    if SEPARATED.is_match(text) {
        if text.contains(':') && text.contains('-') {
            return Err(AddrError::invalid(text, "mixed ':' and '-' separators"));
        }
        let separator = if text.contains(':') { ':' } else { '-' };
        let mut bytes = [0u8; 6];
        for (i, group) in text.split(separator).enumerate() {
            bytes[i] = hex_byte(text, group)?;
        }
        return Ok(MacAddress::new(bytes));
    }

    if BARE.is_match(text) || CISCO.is_match(text) {
        let digits: String = text.chars().filter(|c| *c != '.').collect();
        let mut bytes = [0u8; 6];
        for (i, pair) in digits.as_bytes().chunks(2).enumerate() {
            let pair = std::str::from_utf8(pair)
                .map_err(|_| AddrError::invalid(text, "non-ASCII content"))?;
            bytes[i] = hex_byte(text, pair)?;
        }
        return Ok(MacAddress::new(bytes));
    }

    let groups = text.split([':', '-']).count();
    let reason = if groups != 6 && (text.contains(':') || text.contains('-')) {
        format!("expected 6 groups, found {groups}")
    } else {
        "expected six hex byte groups".to_string()
    };
    Err(AddrError::invalid(text, reason))
}

fn hex_byte(text: &str, group: &str) -> AddrResult<u8> {
    u8::from_str_radix(group, 16)
        .map_err(|_| AddrError::invalid(text, format!("'{group}' is not a hex byte")))
}

/// Render the address in the requested notation.
pub fn format_mac(mac: &MacAddress, format: MacFormat) -> String {
    let bytes = mac.bytes();
    match format {
        MacFormat::Colon => bytes.iter().map(|b| format!("{b:02X}")).join(":"),
        MacFormat::Hyphen => bytes.iter().map(|b| format!("{b:02X}")).join("-"),
        MacFormat::Bare => bytes.iter().map(|b| format!("{b:02x}")).collect(),
        MacFormat::Cisco => bytes
            .chunks(2)
            .map(|pair| format!("{:02x}{:02x}", pair[0], pair[1]))
            .join("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const EXPECTED: [u8; 6] = [0x01, 0x23, 0x45, 0x67, 0x89, 0xAB];

    #[test]
    fn test_parse_all_notations() {
        for text in [
            "01:23:45:67:89:AB",
            "01:23:45:67:89:ab",
            "01-23-45-67-89-ab",
            "0123456789ab",
            "0123.4567.89AB",
            "1:23:45:67:89:ab",
        ] {
            assert_eq!(parse_mac(text).unwrap().bytes(), &EXPECTED, "{text}");
        }
    }

    #[test]
    fn test_parse_errors() {
        for bad in [
            "01:23:45:67:89",
            "01:23:45:67:89:ab:cd",
            "01:23-45:67:89:ab",
            "01:23:45:67:89:zz",
            "001:23:45:67:89:ab",
            "0123456789a",
            "0123456789abc",
            "",
            "hello",
        ] {
            let err = parse_mac(bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidFormat, "{bad}");
        }
        assert_eq!(
            parse_mac("01:23:45").unwrap_err().to_string(),
            "invalid format '01:23:45': expected 6 groups, found 3"
        );
    }

    #[test]
    fn test_format_mac() {
        let mac = MacAddress::new(EXPECTED);
        assert_eq!(format_mac(&mac, MacFormat::Colon), "01:23:45:67:89:AB");
        assert_eq!(format_mac(&mac, MacFormat::Hyphen), "01-23-45-67-89-AB");
        assert_eq!(format_mac(&mac, MacFormat::Bare), "0123456789ab");
        assert_eq!(format_mac(&mac, MacFormat::Cisco), "0123.4567.89ab");
    }
}
