//! IP address with CIDR prefix, for both IPv4 and IPv6.
//!
//! [`Address`] is the value type every other module works on. The host part
//! is kept as a [`Wide`] so IPv4 and IPv6 share one code path; the version tag
//! decides the bit width and display rules.

use super::{IpVersion, Prefix, Wide};
use crate::error::{AddrError, Result};
use crate::output::text;
use crate::{parse, processing};
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Network address for `host` with `host_prefix` host bits.
pub fn to_network(host: &Wide, host_prefix: u8) -> Wide {
    let host_prefix = host_prefix as usize;
    &(host >> host_prefix) << host_prefix
}

/// An address together with its prefix, e.g. `10.0.0.1/24` or `2001:db8::/32`.
///
/// Equality, hashing and ordering look at version, host address and prefix
/// only; the embedded IPv4 of a mapped address is a display detail.
#[derive(Debug, Clone)]
pub struct Address {
    version: IpVersion,
    host_address: Wide,
    prefix: Prefix,
    mapped: Option<Box<Address>>,
}

impl Address {
    /// Parse a textual address such as `"10.0.0.1/24"`, `"2001:db8::1"` or
    /// `"::ffff:192.168.1.1"`.
    ///
    /// # Examples
    /// ```
    /// use subnet_summary::models::Address;
    /// let ip = Address::new("10.0.0.1/24").unwrap();
    /// assert_eq!(ip.network().to_string(), "10.0.0.0/24");
    /// ```
    pub fn new(addr_cidr: &str) -> Result<Address> {
        parse::parse(addr_cidr)
    }

    /// Build an address from a raw host value and prefix length.
    pub fn from_wide(version: IpVersion, host_address: Wide, len: usize) -> Result<Address> {
        Address::from_prefix(host_address, Prefix::new(version, len)?)
    }

    /// Build an address from a raw host value, checking it fits the prefix's version.
    pub fn from_prefix(host_address: Wide, prefix: Prefix) -> Result<Address> {
        let bits = prefix.bit_length();
        if host_address.bit_len() > bits as usize {
            return Err(AddrError::AddressOutOfRange {
                address: format!("{host_address:#x}"),
                bits,
            });
        }
        Ok(Address {
            version: prefix.version(),
            host_address,
            prefix,
            mapped: None,
        })
    }

    pub fn from_u32(addr: u32, len: usize) -> Result<Address> {
        Address::from_wide(IpVersion::V4, Wide::from(addr), len)
    }

    pub fn from_u128(addr: u128, len: usize) -> Result<Address> {
        Address::from_wide(IpVersion::V6, Wide::from(addr), len)
    }

    /// Attach the IPv4 address embedded in a mapped IPv6 address.
    pub(crate) fn with_mapped(mut self, mapped: Address) -> Address {
        self.mapped = Some(Box::new(mapped));
        self
    }

    /// New address of the same version. Derived values never carry a mapped payload.
    fn derive(&self, host_address: Wide, prefix: Prefix) -> Address {
        Address {
            version: self.version,
            host_address,
            prefix,
            mapped: None,
        }
    }

    pub fn version(&self) -> IpVersion {
        self.version
    }

    pub fn host_address(&self) -> &Wide {
        &self.host_address
    }

    pub fn prefix(&self) -> Prefix {
        self.prefix
    }

    /// The embedded IPv4 address of a mapped IPv6 address, if any.
    pub fn mapped(&self) -> Option<&Address> {
        self.mapped.as_deref()
    }

    pub fn is_ipv4(&self) -> bool {
        self.version == IpVersion::V4
    }

    pub fn is_ipv6(&self) -> bool {
        self.version == IpVersion::V6
    }

    /// Display groups of the host address, most significant first.
    pub fn parts(&self) -> Vec<u16> {
        text::parts(self.version, &self.host_address)
    }

    /// Groups as zero-padded hex: 2 digits for IPv4, 4 for IPv6.
    pub fn parts_hex_str(&self) -> Vec<String> {
        let width = (self.version.ip_bits().part_bits / 4) as usize;
        self.parts()
            .iter()
            .map(|p| format!("{p:0width$x}"))
            .collect()
    }

    pub fn network(&self) -> Address {
        let host = to_network(&self.host_address, self.prefix.host_prefix());
        self.derive(host, self.prefix)
    }

    /// Highest address of the network.
    pub fn broadcast(&self) -> Address {
        let network = to_network(&self.host_address, self.prefix.host_prefix());
        self.derive(&network | &self.prefix.host_mask(), self.prefix)
    }

    /// First usable host: network + 1 for IPv4, the network itself for IPv6.
    pub fn first(&self) -> Address {
        let network = to_network(&self.host_address, self.prefix.host_prefix());
        let ofs = self.version.ip_bits().host_ofs;
        self.derive(&network + ofs, self.prefix)
    }

    /// Last usable host: broadcast - 1 for IPv4, the broadcast for IPv6.
    pub fn last(&self) -> Address {
        let broadcast = self.broadcast().host_address;
        let ofs = Wide::from(self.version.ip_bits().host_ofs);
        let host = broadcast.checked_sub(&ofs).unwrap_or_default();
        self.derive(host, self.prefix)
    }

    /// Number of addresses in the network.
    pub fn size(&self) -> Wide {
        self.prefix.size()
    }

    /// The netmask as an address of the same version, prefix kept.
    pub fn netmask(&self) -> Address {
        self.derive(self.prefix.netmask(), self.prefix)
    }

    /// True when the host bits are all zero.
    pub fn is_network(&self) -> bool {
        self.prefix.num() != self.prefix.bit_length()
            && self.host_address == to_network(&self.host_address, self.prefix.host_prefix())
    }

    /// True when `other` lies entirely inside this network.
    pub fn includes(&self, other: &Address) -> bool {
        let host_prefix = self.prefix.host_prefix();
        self.version == other.version
            && self.prefix.num() <= other.prefix.num()
            && to_network(&self.host_address, host_prefix)
                == to_network(&other.host_address, host_prefix)
    }

    pub fn includes_all(&self, others: &[Address]) -> bool {
        others.iter().all(|o| self.includes(o))
    }

    /// Same host address under a new prefix length.
    pub fn change_prefix(&self, len: usize) -> Result<Address> {
        let prefix = self.prefix.with_num(len)?;
        Ok(self.derive(self.host_address.clone(), prefix))
    }

    /// Same host address under a prefix given as a netmask or a decimal length.
    pub fn change_netmask(&self, netmask: &str) -> Result<Address> {
        let len = parse::parse_netmask_to_prefix(netmask)?;
        self.change_prefix(len)
    }

    /// The enclosing network with prefix `len`, which must be shorter than the current one.
    pub fn supernet(&self, len: usize) -> Result<Address> {
        processing::supernet(self, len)
    }

    /// All networks of prefix `len` inside this one.
    pub fn subnet(&self, len: usize) -> Result<Vec<Address>> {
        processing::subnet(self, len)
    }

    /// Divide the network into exactly `count` contiguous networks.
    pub fn split(&self, count: usize) -> Result<Vec<Address>> {
        processing::split(self, count)
    }

    /// Summarize this network together with `other`.
    pub fn add(&self, other: &Address) -> Result<Vec<Address>> {
        processing::aggregate(&[self.clone(), other.clone()])
    }

    /// Absolute difference between two host addresses.
    pub fn distance(&self, other: &Address) -> Wide {
        self.host_address.abs_diff(&other.host_address)
    }

    /// Next host address, `None` once past [`last`](Address::last).
    pub fn inc(&self) -> Option<Address> {
        let host = &self.host_address + 1u32;
        if host > self.last().host_address {
            return None;
        }
        Some(self.derive(host, self.prefix))
    }

    /// Previous host address, `None` once below [`first`](Address::first).
    pub fn dec(&self) -> Option<Address> {
        let host = self.host_address.checked_sub(&Wide::one()).ok()?;
        if host < self.first().host_address {
            return None;
        }
        Some(self.derive(host, self.prefix))
    }

    /// Iterate the usable hosts from [`first`](Address::first) to [`last`](Address::last).
    pub fn hosts(&self) -> impl Iterator<Item = Address> + '_ {
        self.walk(self.first().host_address, self.last().host_address)
    }

    /// Iterate every address of the network, [`network`](Address::network) to
    /// [`broadcast`](Address::broadcast) inclusive, all with this prefix.
    pub fn each(&self) -> impl Iterator<Item = Address> + '_ {
        self.walk(self.network().host_address, self.broadcast().host_address)
    }

    fn walk(&self, from: Wide, to: Wide) -> impl Iterator<Item = Address> + '_ {
        let mut next = Some(from);
        std::iter::from_fn(move || {
            let host = next.take()?;
            if host > to {
                return None;
            }
            next = Some(&host + 1u32);
            Some(self.derive(host, self.prefix))
        })
    }

    /// The address `num` hosts further on, keeping the prefix.
    ///
    /// Fails with `AddressOutOfRange` past the end of the address space.
    pub fn add_num(&self, num: &Wide) -> Result<Address> {
        Address::from_prefix(&self.host_address + num, self.prefix)
    }

    /// RFC 791 class A (`0.0.0.0` to `127.255.255.255`), whatever the prefix.
    pub fn is_class_a(&self) -> bool {
        self.is_ipv4() && self.host_address < Wide::from(0x8000_0000u32)
    }

    /// RFC 791 class B (`128.0.0.0` to `191.255.255.255`).
    pub fn is_class_b(&self) -> bool {
        self.is_ipv4()
            && Wide::from(0x8000_0000u32) <= self.host_address
            && self.host_address < Wide::from(0xc000_0000u32)
    }

    /// RFC 791 class C (`192.0.0.0` to `223.255.255.255`).
    pub fn is_class_c(&self) -> bool {
        self.is_ipv4()
            && Wide::from(0xc000_0000u32) <= self.host_address
            && self.host_address < Wide::from(0xe000_0000u32)
    }

    /// True when this address lies inside `net/len` of its own version.
    fn within(&self, net: u128, len: u8) -> bool {
        let host_prefix = self.prefix.bit_length() - len;
        self.prefix.num() >= len
            && to_network(&self.host_address, host_prefix) == Wide::from(net)
    }

    /// RFC 1918 ranges for IPv4, `fd00::/8` for IPv6.
    pub fn is_private(&self) -> bool {
        match self.version {
            IpVersion::V4 => {
                self.within(0x0a00_0000, 8)
                    || self.within(0xac10_0000, 12)
                    || self.within(0xc0a8_0000, 16)
            }
            IpVersion::V6 => self.within(0xfd << 120, 8),
        }
    }

    pub fn is_loopback(&self) -> bool {
        match self.version {
            IpVersion::V4 => self.within(0x7f00_0000, 8),
            IpVersion::V6 => self.host_address == Wide::one(),
        }
    }

    pub fn is_unspecified(&self) -> bool {
        self.host_address.is_zero()
    }

    /// True for `::ffff:a.b.c.d` addresses that carry their IPv4 payload.
    pub fn is_mapped(&self) -> bool {
        self.mapped.is_some() && (&self.host_address >> 32) == Wide::from(0xffffu32)
    }

    /// Reinterpret the host value and prefix length as IPv6.
    pub fn to_ipv6(&self) -> Address {
        match self.version {
            IpVersion::V6 => self.clone(),
            IpVersion::V4 => Address {
                version: IpVersion::V6,
                host_address: self.host_address.clone(),
                prefix: self.prefix.to_v6(),
                mapped: None,
            },
        }
    }

    /// Host address without prefix, compressed form.
    pub fn to_addr_string(&self) -> String {
        text::compressed(self.version, &self.host_address)
    }

    pub fn to_addr_string_uncompressed(&self) -> String {
        text::uncompressed(self.version, &self.host_address)
    }

    pub fn to_cidr_string_uncompressed(&self) -> String {
        format!("{}/{}", self.to_addr_string_uncompressed(), self.prefix)
    }

    /// `::ffff:a.b.c.d` for mapped addresses, otherwise the compressed form.
    pub fn to_addr_string_mapped(&self) -> String {
        match self.mapped() {
            Some(v4) if self.is_mapped() => format!("::ffff:{}", v4.to_addr_string()),
            _ => self.to_addr_string(),
        }
    }

    pub fn to_cidr_string_mapped(&self) -> String {
        match self.mapped() {
            Some(v4) if self.is_mapped() => {
                format!("{}/{}", self.to_addr_string_mapped(), v4.prefix)
            }
            _ => self.to_string(),
        }
    }

    /// Host address as lowercase hex without padding.
    pub fn to_hex(&self) -> String {
        format!("{:x}", self.host_address)
    }

    /// Host address as `bit_length` binary digits.
    pub fn bits(&self) -> String {
        format!(
            "{:0>width$b}",
            self.host_address,
            width = self.prefix.bit_length() as usize
        )
    }
}

impl FromStr for Address {
    type Err = AddrError;

    fn from_str(s: &str) -> Result<Address> {
        parse::parse(s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.to_addr_string(), self.prefix)
    }
}

impl PartialEq for Address {
    fn eq(&self, other: &Address) -> bool {
        self.version == other.version
            && self.host_address == other.host_address
            && self.prefix == other.prefix
    }
}

impl Eq for Address {}

impl Hash for Address {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.version.hash(state);
        self.host_address.hash(state);
        self.prefix.hash(state);
    }
}

impl Ord for Address {
    fn cmp(&self, other: &Address) -> Ordering {
        self.version
            .cmp(&other.version)
            .then_with(|| self.host_address.cmp(&other.host_address))
            .then_with(|| self.prefix.num().cmp(&other.prefix.num()))
    }
}

impl PartialOrd for Address {
    fn partial_cmp(&self, other: &Address) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Address, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse::parse(&s).map_err(|e| de::Error::custom(format!("invalid address {s}: {e}")))
    }
}
