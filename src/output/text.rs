//! Text rendering of host addresses: dotted quad and colon-hex forms.

use super::rle;
use crate::models::{IpVersion, Wide};
use itertools::Itertools;

/// Split a host address into its display groups, most significant first.
pub fn parts(version: IpVersion, host: &Wide) -> Vec<u16> {
    let ip_bits = version.ip_bits();
    let part_bits = ip_bits.part_bits as usize;
    let part_mask = Wide::all_ones(part_bits);
    (0..ip_bits.parts())
        .rev()
        .map(|i| (&(host >> (i * part_bits)) & &part_mask).low_u32() as u16)
        .collect()
}

/// Canonical text: dotted quad for IPv4, zero-compressed hex for IPv6.
pub fn compressed(version: IpVersion, host: &Wide) -> String {
    match version {
        IpVersion::V4 => dotted(&parts(version, host)),
        IpVersion::V6 => ipv6_compressed(&parts(version, host)),
    }
}

/// Full text: dotted quad for IPv4, eight 4-digit hex groups for IPv6.
pub fn uncompressed(version: IpVersion, host: &Wide) -> String {
    match version {
        IpVersion::V4 => dotted(&parts(version, host)),
        IpVersion::V6 => parts(version, host)
            .iter()
            .map(|p| format!("{p:04x}"))
            .join(":"),
    }
}

fn dotted(parts: &[u16]) -> String {
    parts.iter().join(".")
}

/// Render IPv6 groups, replacing the first longest run of zero groups with `::`.
pub fn ipv6_compressed(parts: &[u16]) -> String {
    let mut ret = String::new();
    let mut colon = "";
    let mut done = false;
    for run in rle::code(parts) {
        if !done && run.value == 0 && run.is_longest {
            ret.push_str("::");
            colon = "";
            done = true;
            continue;
        }
        for _ in 0..run.count {
            ret.push_str(colon);
            ret.push_str(&format!("{:x}", run.value));
            colon = ":";
        }
    }
    ret
}
