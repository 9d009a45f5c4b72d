//! Text to [`Address`] parsing for IPv4, IPv6 and IPv4-mapped IPv6.

use crate::error::{AddrError, Result};
use crate::models::{Address, IpVersion, Prefix, Wide};
use regex::Regex;
use std::sync::OnceLock;

/// A colon followed later by a dot: `::ffff:1.2.3.4`.
static MAPPED_REGEX: OnceLock<Regex> = OnceLock::new();
static DEC_REGEX: OnceLock<Regex> = OnceLock::new();
static HEX_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_mapped_regex() -> &'static Regex {
    MAPPED_REGEX.get_or_init(|| Regex::new(r":.+\.").expect("Invalid Regex"))
}

fn get_dec_regex() -> &'static Regex {
    DEC_REGEX.get_or_init(|| Regex::new(r"^[0-9]+$").expect("Invalid Regex"))
}

fn get_hex_regex() -> &'static Regex {
    HEX_REGEX.get_or_init(|| Regex::new(r"^[0-9a-fA-F]{1,4}$").expect("Invalid Regex"))
}

/// Parse any supported address text.
///
/// # Arguments
/// * `addr` - IPv4, IPv6 or IPv4-mapped IPv6 text, optionally with `/len` or `/netmask`
///
/// # Returns
/// * The parsed [`Address`], or the first `AddrError` met
///
/// # Examples
/// ```
/// use subnet_summary::parse::parse;
/// assert_eq!(parse("10.1.2.3/24").unwrap().to_string(), "10.1.2.3/24");
/// assert_eq!(parse("2001:db8::1/64").unwrap().to_string(), "2001:db8::1/64");
/// assert!(parse("::ffff:192.168.0.1").unwrap().is_mapped());
/// ```
pub fn parse(addr: &str) -> Result<Address> {
    let addr = addr.trim();
    if get_mapped_regex().is_match(addr) {
        parse_mapped(addr)
    } else if addr.contains('.') {
        parse_ipv4(addr)
    } else if addr.contains(':') {
        parse_ipv6(addr)
    } else {
        Err(AddrError::InvalidAddress(addr.to_string()))
    }
}

/// Split `addr/len` into its two halves. More than one `/` is an error.
fn split_at_slash(addr: &str) -> Result<(&str, Option<&str>)> {
    let mut parts = addr.trim().split('/');
    let ip = parts.next().unwrap_or_default().trim();
    let netmask = parts.next().map(str::trim);
    if parts.next().is_some() {
        return Err(AddrError::InvalidAddress(addr.to_string()));
    }
    Ok((ip, netmask))
}

fn parse_dec_str(s: &str) -> Result<usize> {
    if !get_dec_regex().is_match(s) {
        return Err(AddrError::InvalidNumber(s.to_string()));
    }
    s.parse()
        .map_err(|_| AddrError::InvalidNumber(s.to_string()))
}

fn parse_hex_group(s: &str) -> Result<u32> {
    if !get_hex_regex().is_match(s) {
        return Err(AddrError::InvalidNumber(s.to_string()));
    }
    u32::from_str_radix(s, 16).map_err(|_| AddrError::InvalidNumber(s.to_string()))
}

fn parse_ipv4_part(s: &str) -> Result<u32> {
    let n = parse_dec_str(s)?;
    if n > 255 {
        return Err(AddrError::InvalidNumber(s.to_string()));
    }
    Ok(n as u32)
}

/// Dotted IPv4 text to its 32-bit value. `a.b.c.d`, `a.b.d` and `a.d` are accepted;
/// the last component is always the low octet.
fn split_to_u32(addr: &str) -> Result<u32> {
    let mut parts: Vec<&str> = addr.split('.').collect();
    if parts.len() > 4 {
        return Err(AddrError::InvalidAddress(addr.to_string()));
    }
    let mut ip = 0u32;
    if parts.len() < 4 {
        if let Some(last) = parts.pop() {
            ip = parse_ipv4_part(last)?;
        }
    }
    for (i, part) in parts.iter().enumerate() {
        ip |= parse_ipv4_part(part)? << (24 - 8 * i);
    }
    Ok(ip)
}

/// Colon-separated hex groups to their value and group count. Empty text is zero groups.
fn split_on_colon(addr: &str) -> Result<(Wide, usize)> {
    if addr.is_empty() {
        return Ok((Wide::zero(), 0));
    }
    let mut ip = Wide::zero();
    let mut count = 0;
    for group in addr.split(':') {
        let value = parse_hex_group(group)?;
        ip = &(&ip << 16) + value;
        count += 1;
    }
    Ok((ip, count))
}

/// IPv6 text without prefix to its 128-bit value.
fn split_to_num(addr: &str) -> Result<Wide> {
    let invalid = || AddrError::InvalidAddress(addr.to_string());
    match addr.split_once("::") {
        Some((head, tail)) => {
            if tail.contains("::") {
                return Err(invalid());
            }
            let (head_num, head_count) = split_on_colon(head).map_err(|_| invalid())?;
            let (tail_num, tail_count) = split_on_colon(tail).map_err(|_| invalid())?;
            if head_count + tail_count > 7 {
                return Err(invalid());
            }
            Ok(&(&head_num << (128 - 16 * head_count)) + &tail_num)
        }
        None => {
            let (num, count) = split_on_colon(addr).map_err(|_| invalid())?;
            if count != 8 {
                return Err(invalid());
            }
            Ok(num)
        }
    }
}

/// Prefix length from a contiguous netmask value of `version`.
fn netmask_to_prefix(mask: &Wide, version: IpVersion) -> Result<usize> {
    let bits = version.bits() as usize;
    let host_bits = mask.trailing_zeros().unwrap_or(bits).min(bits);
    let prefix = Prefix::new(version, bits - host_bits)?;
    if prefix.netmask() != *mask {
        return Err(AddrError::InvalidNetmask(format!("{mask:#x}")));
    }
    Ok(prefix.num() as usize)
}

/// Prefix length from `24`, `255.255.255.0` or `ffff:ffff::`.
pub fn parse_netmask_to_prefix(netmask: &str) -> Result<usize> {
    let netmask = netmask.trim();
    if get_dec_regex().is_match(netmask) {
        return parse_dec_str(netmask);
    }
    let mask = parse(netmask).map_err(|_| AddrError::InvalidNetmask(netmask.to_string()))?;
    netmask_to_prefix(mask.host_address(), mask.version())
        .map_err(|_| AddrError::InvalidNetmask(netmask.to_string()))
}

/// Parse `a.b.c.d`, `a.b.c.d/len` or `a.b.c.d/m.m.m.m`.
pub fn parse_ipv4(addr: &str) -> Result<Address> {
    let (ip, netmask) = split_at_slash(addr)?;
    let host = split_to_u32(ip).map_err(|_| AddrError::InvalidAddress(addr.to_string()))?;
    let len = match netmask {
        Some(netmask) => parse_netmask_to_prefix(netmask)?,
        None => 32,
    };
    Address::from_u32(host, len)
}

/// Parse a bare IPv4 address with the prefix its RFC 791 class implies: `/8` for
/// class A, `/16` for class B, `/24` for class C. Classes D and E keep `/32`.
///
/// # Arguments
/// * `addr` - Dotted IPv4 text without a prefix, e.g. `"10.1.1.1"`
///
/// # Returns
/// * The address with its classful prefix, or `InvalidAddress`
pub fn parse_classful(addr: &str) -> Result<Address> {
    if !is_valid_ipv4(addr) {
        return Err(AddrError::InvalidAddress(addr.to_string()));
    }
    let ip = parse_ipv4(addr)?;
    let len = if ip.is_class_a() {
        8
    } else if ip.is_class_b() {
        16
    } else if ip.is_class_c() {
        24
    } else {
        32
    };
    ip.change_prefix(len)
}

/// True for IPv4 or IPv6 address text without a prefix.
pub fn is_valid(addr: &str) -> bool {
    is_valid_ipv4(addr) || is_valid_ipv6(addr)
}

/// True for `a.b.c.d` (or a short form such as `10.1`) without a prefix.
pub fn is_valid_ipv4(addr: &str) -> bool {
    split_to_u32(addr.trim()).is_ok()
}

/// True for colon-hex IPv6 text without a prefix.
pub fn is_valid_ipv6(addr: &str) -> bool {
    split_to_num(addr.trim()).is_ok()
}

/// True when [`parse_netmask_to_prefix`] accepts `netmask`.
pub fn is_valid_netmask(netmask: &str) -> bool {
    parse_netmask_to_prefix(netmask).is_ok()
}

/// Parse `x:x:x:x:x:x:x:x[/len]` with optional `::` compression.
pub fn parse_ipv6(addr: &str) -> Result<Address> {
    let (ip, netmask) = split_at_slash(addr)?;
    let host = split_to_num(ip)?;
    let len = match netmask {
        Some(netmask) => parse_dec_str(netmask)?,
        None => 128,
    };
    let ipv6 = Address::from_prefix(host, Prefix::v6(len)?)?;
    Ok(enhance_if_mapped(ipv6))
}

/// Attach the embedded IPv4 to `::ffff:x:x` addresses whose prefix covers it.
fn enhance_if_mapped(ipv6: Address) -> Address {
    if ipv6.is_mapped() {
        return ipv6;
    }
    let host = ipv6.host_address();
    if (host >> 32) != Wide::from(0xffffu32) {
        return ipv6;
    }
    let low = host.low_u32();
    let host_prefix = ipv6.prefix().host_prefix() as usize;
    if low == 0 || host_prefix > 32 {
        return ipv6;
    }
    match Address::from_u32(low, 32 - host_prefix) {
        Ok(ipv4) => ipv6.with_mapped(ipv4),
        Err(_) => ipv6,
    }
}

/// Parse `::ffff:a.b.c.d[/len]` or `::a.b.c.d[/len]`; `len` is the IPv4 length.
pub fn parse_mapped(addr: &str) -> Result<Address> {
    let invalid = || AddrError::InvalidAddress(addr.to_string());
    let (ip, netmask) = split_at_slash(addr)?;
    let (head, ipv4_str) = ip.rsplit_once(':').ok_or_else(invalid)?;
    let ipv4 = match netmask {
        Some(netmask) => parse_ipv4(&format!("{ipv4_str}/{netmask}"))?,
        None => parse_ipv4(ipv4_str)?,
    };
    let v4_host = ipv4.host_address().low_u32();
    let len = 96 + ipv4.prefix().num() as usize;
    let rebuilt = format!("{head}:{:x}:{:x}/{len}", v4_host >> 16, v4_host & 0xffff);
    let ipv6 = parse_ipv6(&rebuilt).map_err(|_| invalid())?;
    if ipv6.is_mapped() {
        return Ok(ipv6);
    }
    if !(ipv6.host_address() >> 32).is_zero() {
        return Err(invalid());
    }
    let host = &(&Wide::from(0xffffu32) << 32) + v4_host;
    Ok(Address::from_prefix(host, Prefix::v6(len)?)?.with_mapped(ipv4))
}
