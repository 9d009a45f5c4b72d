//! IP version tag and the fixed geometry of each version.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Bit layout of one IP version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IpBits {
    /// Total address width.
    pub bits: u8,
    /// Width of one display group (octet or hextet).
    pub part_bits: u8,
    /// Offset of the first usable host from the network address.
    pub host_ofs: u32,
}

impl IpBits {
    /// Number of display groups in an address.
    pub const fn parts(&self) -> usize {
        (self.bits / self.part_bits) as usize
    }
}

pub const V4_BITS: IpBits = IpBits {
    bits: 32,
    part_bits: 8,
    host_ofs: 1,
};

pub const V6_BITS: IpBits = IpBits {
    bits: 128,
    part_bits: 16,
    host_ofs: 0,
};

/// IP protocol version. IPv4 orders before IPv6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IpVersion {
    V4,
    V6,
}

impl IpVersion {
    pub const fn ip_bits(self) -> &'static IpBits {
        match self {
            IpVersion::V4 => &V4_BITS,
            IpVersion::V6 => &V6_BITS,
        }
    }

    /// Total address width in bits.
    pub const fn bits(self) -> u8 {
        self.ip_bits().bits
    }
}

impl fmt::Display for IpVersion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            IpVersion::V4 => write!(f, "IPv4"),
            IpVersion::V6 => write!(f, "IPv6"),
        }
    }
}
