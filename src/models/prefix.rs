//! CIDR prefix length bound to an IP version.

use super::{IpVersion, Wide};
use crate::error::{AddrError, Result};
use crate::output::text;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix length (number of fixed leading bits) of a given IP version.
///
/// The length is always within `0..=version.bits()`; every constructor checks it.
/// Ordering is by version, then by length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPrefix")]
pub struct Prefix {
    version: IpVersion,
    num: u8,
}

/// Unchecked serialized form, validated through [`Prefix::new`].
#[derive(Deserialize)]
struct RawPrefix {
    version: IpVersion,
    num: usize,
}

impl TryFrom<RawPrefix> for Prefix {
    type Error = AddrError;

    fn try_from(raw: RawPrefix) -> Result<Prefix> {
        Prefix::new(raw.version, raw.num)
    }
}

impl Prefix {
    /// Create a prefix, failing when `len` exceeds the version's bit length.
    ///
    /// # Examples
    /// ```
    /// use subnet_summary::models::{IpVersion, Prefix};
    /// assert_eq!(Prefix::new(IpVersion::V4, 24).unwrap().num(), 24);
    /// assert!(Prefix::new(IpVersion::V4, 33).is_err());
    /// ```
    pub fn new(version: IpVersion, len: usize) -> Result<Prefix> {
        let max = version.bits();
        if len > max as usize {
            return Err(AddrError::PrefixOutOfRange { len, max });
        }
        Ok(Prefix {
            version,
            num: len as u8,
        })
    }

    /// IPv4 prefix, `0..=32`.
    pub fn v4(len: usize) -> Result<Prefix> {
        Prefix::new(IpVersion::V4, len)
    }

    /// IPv6 prefix, `0..=128`.
    pub fn v6(len: usize) -> Result<Prefix> {
        Prefix::new(IpVersion::V6, len)
    }

    /// The same length as an IPv6 prefix. Every valid length fits in 128 bits.
    pub(crate) fn to_v6(self) -> Prefix {
        Prefix {
            version: IpVersion::V6,
            num: self.num,
        }
    }

    /// Same version, different length.
    pub fn with_num(&self, len: usize) -> Result<Prefix> {
        Prefix::new(self.version, len)
    }

    pub fn version(&self) -> IpVersion {
        self.version
    }

    /// The prefix length.
    pub fn num(&self) -> u8 {
        self.num
    }

    pub fn bit_length(&self) -> u8 {
        self.version.bits()
    }

    /// Number of host bits: `bit_length - num`.
    pub fn host_prefix(&self) -> u8 {
        self.bit_length() - self.num
    }

    /// Lengthen the prefix by `n` bits.
    pub fn checked_add(&self, n: usize) -> Result<Prefix> {
        self.with_num(self.num as usize + n)
    }

    /// Shorten the prefix by `n` bits.
    pub fn checked_sub(&self, n: usize) -> Result<Prefix> {
        let len = (self.num as usize)
            .checked_sub(n)
            .ok_or(AddrError::PrefixOutOfRange {
                len: n,
                max: self.num,
            })?;
        self.with_num(len)
    }

    /// Mask with the top `num` bits of `bit_length` set.
    pub fn netmask(&self) -> Wide {
        let host = self.host_prefix() as usize;
        let all_bits = Wide::all_ones(self.bit_length() as usize);
        &(&all_bits >> host) << host
    }

    /// Complement of the netmask within `bit_length` bits.
    pub fn host_mask(&self) -> Wide {
        Wide::all_ones(self.host_prefix() as usize)
    }

    /// Number of addresses covered: `2^host_prefix`.
    pub fn size(&self) -> Wide {
        Wide::pow2(self.host_prefix() as usize)
    }

    /// Netmask as `bit_length` binary digits.
    pub fn bits(&self) -> String {
        format!(
            "{:0>width$b}",
            self.netmask(),
            width = self.bit_length() as usize
        )
    }

    /// Netmask rendered as an address, e.g. `255.255.255.0`.
    pub fn to_ip_str(&self) -> String {
        text::compressed(self.version, &self.netmask())
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.num)
    }
}
