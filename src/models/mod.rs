//! Domain models for subnet summary.
//!
//! This module contains the core data structures used throughout the application:
//! - [`Address`] - IPv4 or IPv6 address with CIDR prefix
//! - [`Prefix`] - prefix length bound to an IP version
//! - [`IpVersion`] and [`IpBits`] - version tag and its bit geometry
//! - [`Wide`] - unsigned integer wide enough for any IPv6 calculation

mod address;
mod prefix;
mod version;
mod wide;

// Re-export public types
pub use address::{to_network, Address};
pub use prefix::Prefix;
pub use version::{IpBits, IpVersion, V4_BITS, V6_BITS};
pub use wide::Wide;
