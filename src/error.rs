//! Error type shared by the address model, the parser and the network algorithms.

use crate::models::IpVersion;

/// Reasons an address operation can fail.
///
/// Errors never escape the call that produced them and never leave a partially
/// built value behind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddrError {
    #[error("prefix length {len} is out of range 0..={max}")]
    PrefixOutOfRange { len: usize, max: u8 },

    #[error("subnet count {count} is out of range 1..=2^{host_bits}")]
    SubnetCountOutOfRange { count: usize, host_bits: u8 },

    #[error("subnet prefix /{len} must be within /{min}..=/{max}")]
    SubnetOutOfRange { len: usize, min: u8, max: u8 },

    #[error("supernet prefix /{len} must be shorter than /{current}")]
    SupernetOutOfRange { len: usize, current: u8 },

    #[error("refusing to enumerate 2^{bits} subnets (limit 2^{limit})")]
    TooManySubnets { bits: u8, limit: u8 },

    #[error("host address {address} does not fit in {bits} bits")]
    AddressOutOfRange { address: String, bits: u8 },

    #[error("version mismatch: expected {expected}, found {found}")]
    VersionMismatch {
        expected: IpVersion,
        found: IpVersion,
    },

    #[error("unsigned subtraction underflow")]
    Underflow,

    #[error("division by zero")]
    DivisionByZero,

    #[error("invalid number {0:?}")]
    InvalidNumber(String),

    #[error("unsupported radix {0}")]
    InvalidRadix(u32),

    #[error("invalid address {0:?}")]
    InvalidAddress(String),

    #[error("invalid netmask {0:?}")]
    InvalidNetmask(String),

    #[error("could not re-merge {count} subnets down to {target}")]
    SplitStalled { count: usize, target: usize },
}

pub type Result<T> = std::result::Result<T, AddrError>;
