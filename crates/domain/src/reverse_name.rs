//! Conversion between IP addresses and their reverse-lookup names.
//!
//! `10.1.0.127` ⇄ `127.0.1.10.in-addr.arpa` and
//! `::abcd:1234` ⇄ `4.3.2.1.d.c.b.a.0.0...0.ip6.arpa` (32 nibble labels).
//!
//! Names are relative: a trailing root dot is rejected, as is any empty
//! label, a wrong label count or a label that is not a decimal octet
//! (IPv4) or a single hex nibble (IPv6).

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

const IPV4_SUFFIX: &str = ".in-addr.arpa";
const IPV6_SUFFIX: &str = ".ip6.arpa";
const IPV6_NIBBLES: usize = 32;

pub fn encode(ip: &IpAddr) -> String {
    match ip {
        IpAddr::V4(ipv4) => {
            let octets = ipv4.octets();
            format!(
                "{}.{}.{}.{}{}",
                octets[3], octets[2], octets[1], octets[0], IPV4_SUFFIX
            )
        }
        IpAddr::V6(ipv6) => {
            let mut name = String::with_capacity(IPV6_NIBBLES * 2 + IPV6_SUFFIX.len());
            for byte in ipv6.octets().iter().rev() {
                name.push(nibble_char(byte & 0x0f));
                name.push('.');
                name.push(nibble_char(byte >> 4));
                name.push('.');
            }
            name.pop();
            name.push_str(IPV6_SUFFIX);
            name
        }
    }
}

pub fn decode(name: &str) -> Option<IpAddr> {
    if let Some(labels) = strip_suffix_ignore_case(name, IPV4_SUFFIX) {
        return decode_v4(labels).map(IpAddr::V4);
    }
    if let Some(labels) = strip_suffix_ignore_case(name, IPV6_SUFFIX) {
        return decode_v6(labels).map(IpAddr::V6);
    }
    None
}

fn decode_v4(labels: &str) -> Option<Ipv4Addr> {
    let mut octets = [0u8; 4];
    let mut count = 0;

    for label in labels.split('.') {
        if count == octets.len() {
            return None;
        }
        if label.is_empty() || label.len() > 3 || !label.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        octets[3 - count] = label.parse().ok()?;
        count += 1;
    }

    (count == octets.len()).then(|| Ipv4Addr::from(octets))
}

fn decode_v6(labels: &str) -> Option<Ipv6Addr> {
    let mut octets = [0u8; 16];
    let mut count = 0;

    for label in labels.split('.') {
        if count == IPV6_NIBBLES || label.len() != 1 {
            return None;
        }
        let nibble = (label.as_bytes()[0] as char).to_digit(16)? as u8;

        // Label 0 is the low nibble of the last byte.
        let byte = &mut octets[15 - count / 2];
        if count % 2 == 0 {
            *byte |= nibble;
        } else {
            *byte |= nibble << 4;
        }
        count += 1;
    }

    (count == IPV6_NIBBLES).then(|| Ipv6Addr::from(octets))
}

fn strip_suffix_ignore_case<'a>(name: &'a str, suffix: &str) -> Option<&'a str> {
    let split = name.len().checked_sub(suffix.len())?;
    let tail = name.get(split..)?;
    if tail.eq_ignore_ascii_case(suffix) {
        name.get(..split)
    } else {
        None
    }
}

fn nibble_char(nibble: u8) -> char {
    char::from_digit(u32::from(nibble), 16).unwrap_or('0')
}
