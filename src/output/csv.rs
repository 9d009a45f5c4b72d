//! CSV-style table output for network lists.

use crate::models::Address;
use colored::Colorize;

use super::terminal::format_field;

const INDEX_WIDTH: usize = 6;
const SIZE_WIDTH: usize = 12;

/// Width of the address columns: wide enough for the longest CIDR in `networks`.
fn column_width(networks: &[Address]) -> usize {
    networks
        .iter()
        .map(|n| n.to_string().len() + 2)
        .max()
        .unwrap_or(0)
        .max(18)
}

/// Header line matching [`format_row`].
pub fn format_header(width: usize) -> String {
    format!(
        "{},{},{},{},{}",
        format_field("cnt", INDEX_WIDTH),
        format_field("network", width),
        format_field("first", width),
        format_field("last", width),
        format_field("size", SIZE_WIDTH),
    )
}

/// One network as a row: index, CIDR, first host, last host, number of addresses.
pub fn format_row(index: usize, network: &Address, width: usize) -> String {
    format!(
        "{},{},{},{},{}",
        format_field(index, INDEX_WIDTH),
        format_field(network, width),
        format_field(network.first().to_addr_string(), width),
        format_field(network.last().to_addr_string(), width),
        format_field(network.size(), SIZE_WIDTH),
    )
}

/// Print `networks` as an aligned table to stdout.
pub fn network_print(networks: &[Address]) {
    log::info!("# Got network count = {}", networks.len());
    let width = column_width(networks);
    println!("{}", format_header(width).bold());
    for (i, network) in networks.iter().enumerate() {
        println!("{}", format_row(i + 1, network, width));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_row() {
        let net = Address::new("10.0.0.0/24").unwrap();
        let row = format_row(1, &net, 18);
        assert_eq!(
            row,
            r#"   "1",     "10.0.0.0/24",        "10.0.0.1",      "10.0.0.254",       "256""#
        );
    }

    #[test]
    fn test_format_header_matches_row_width() {
        let nets = vec![
            Address::new("10.0.0.0/8").unwrap(),
            Address::new("2001:db8::/32").unwrap(),
        ];
        let width = column_width(&nets);
        assert_eq!(width, 18);
        assert_eq!(
            format_header(width).len(),
            format_row(1, &nets[0], width).len()
        );
    }

    #[test]
    fn test_column_width_grows() {
        let nets = vec![Address::new("2001:db8:1234:5678:9abc:def0:1234:5678/128").unwrap()];
        assert_eq!(column_width(&nets), 44);
    }
}
