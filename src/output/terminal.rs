//! Terminal output utilities.
//!
//! Provides formatting helpers for terminal output.

use crate::models::Address;
use colored::Colorize;
use std::error::Error;

/// Format a value as a quoted, right-aligned field.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
///
/// # Returns
/// A quoted, right-aligned string
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string();
    let quoted = format!("\"{value_str}\"");
    let quoted_len = quoted.len();

    if quoted_len >= width {
        quoted
    } else {
        format!("{quoted:>width$}")
    }
}

/// Labelled properties of one address, in display order.
pub fn address_details(addr: &Address) -> Vec<(&'static str, String)> {
    let mut rows = vec![
        ("address", addr.to_string()),
        ("version", addr.version().to_string()),
        ("network", addr.network().to_string()),
        ("broadcast", addr.broadcast().to_addr_string()),
        ("first", addr.first().to_addr_string()),
        ("last", addr.last().to_addr_string()),
        ("netmask", addr.netmask().to_addr_string()),
        ("size", addr.size().to_string()),
        ("uncompressed", addr.to_cidr_string_uncompressed()),
        ("hex", addr.to_hex()),
        ("private", addr.is_private().to_string()),
        ("loopback", addr.is_loopback().to_string()),
    ];
    if let Some(ipv4) = addr.mapped() {
        rows.push(("mapped", ipv4.to_string()));
    }
    rows
}

/// Print [`address_details`] with highlighted labels.
pub fn print_details(addr: &Address) {
    for (label, value) in address_details(addr) {
        println!("{:>14}: {}", label.cyan(), value);
    }
}

/// Print an error to stderr, highlighted.
pub fn print_error(err: &dyn Error) {
    eprintln!("{} {}", "ERROR".on_red(), err.to_string().red());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_field_short() {
        assert_eq!(format_field("test", 10), "    \"test\"");
    }

    #[test]
    fn test_format_field_exact() {
        assert_eq!(format_field("test", 6), "\"test\"");
    }

    #[test]
    fn test_format_field_long() {
        assert_eq!(format_field("long_value", 5), "\"long_value\"");
    }

    #[test]
    fn test_format_field_address() {
        let addr = Address::new("10.0.0.0/8").unwrap();
        assert_eq!(format_field(&addr, 14), "  \"10.0.0.0/8\"");
    }

    #[test]
    fn test_address_details() {
        let details = address_details(&Address::new("192.168.1.77/24").unwrap());
        let get = |key: &str| {
            details
                .iter()
                .find(|(label, _)| *label == key)
                .map(|(_, v)| v.clone())
                .unwrap()
        };
        assert_eq!(get("network"), "192.168.1.0/24");
        assert_eq!(get("broadcast"), "192.168.1.255");
        assert_eq!(get("netmask"), "255.255.255.0");
        assert_eq!(get("size"), "256");
        assert_eq!(get("private"), "true");
        assert!(details.iter().all(|(label, _)| *label != "mapped"));

        let mapped = address_details(&Address::new("::ffff:10.1.2.3").unwrap());
        assert_eq!(mapped.last().unwrap().1, "10.1.2.3/32");
    }
}
