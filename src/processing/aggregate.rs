//! Summarization of address lists into the fewest covering networks.

use crate::error::{AddrError, Result};
use crate::models::Address;

/// Collapse `networks` into the minimal sorted list of networks covering exactly
/// the same addresses.
///
/// Every input is reduced to its network address first. Networks contained in an
/// earlier one are dropped and sibling pairs are merged into their parent. After a
/// merge the scan steps back one position so the new parent can merge with its
/// left neighbour.
///
/// # Arguments
/// * `networks` - Addresses of one IP version, in any order
///
/// # Returns
/// * The sorted, non-overlapping networks, or `VersionMismatch` for mixed input
///
/// # Examples
/// ```
/// use subnet_summary::models::Address;
/// use subnet_summary::processing::aggregate;
/// let nets: Vec<Address> = ["10.0.0.0/24", "10.0.1.0/24"]
///     .iter()
///     .map(|s| Address::new(s).unwrap())
///     .collect();
/// let merged = aggregate(&nets).unwrap();
/// assert_eq!(merged[0].to_string(), "10.0.0.0/23");
/// ```
pub fn aggregate(networks: &[Address]) -> Result<Vec<Address>> {
    let Some(head) = networks.first() else {
        return Ok(Vec::new());
    };
    if let Some(other) = networks.iter().find(|n| n.version() != head.version()) {
        return Err(AddrError::VersionMismatch {
            expected: head.version(),
            found: other.version(),
        });
    }
    if networks.len() == 1 {
        return Ok(vec![head.network()]);
    }

    let mut stack: Vec<Address> = networks.iter().map(Address::network).collect();
    stack.sort();
    log::debug!("aggregate {} networks", stack.len());

    let mut pos = 0;
    while pos + 1 < stack.len() {
        let first = &stack[pos];
        let second = &stack[pos + 1];
        if first.includes(second) {
            log::trace!("{first} includes {second}");
            stack.remove(pos + 1);
            continue;
        }
        match sibling_parent(first, second) {
            Some(parent) => {
                log::trace!("{first} + {second} -> {parent}");
                stack[pos] = parent;
                stack.remove(pos + 1);
                pos = pos.saturating_sub(1);
            }
            None => pos += 1,
        }
    }
    log::debug!("aggregated to {} networks", stack.len());
    Ok(stack)
}

/// The parent of `first` when `first` and `second` are its two halves.
fn sibling_parent(first: &Address, second: &Address) -> Option<Address> {
    let prefix = first.prefix();
    if prefix.num() == 0 || prefix.num() != second.prefix().num() {
        return None;
    }
    let parent = first.change_prefix(prefix.num() as usize - 1).ok()?.network();
    if parent.includes(second) {
        Some(parent)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IpVersion;

    fn nets(list: &[&str]) -> Vec<Address> {
        list.iter().map(|s| Address::new(s).unwrap()).collect()
    }

    fn summarize(list: &[&str]) -> Vec<String> {
        aggregate(&nets(list))
            .unwrap()
            .iter()
            .map(|n| n.to_string())
            .collect()
    }

    #[test]
    fn test_aggregate_siblings() {
        assert_eq!(summarize(&["10.0.0.0/24", "10.0.1.0/24"]), ["10.0.0.0/23"]);
        assert_eq!(
            summarize(&["10.0.0.1/24", "10.0.1.77/24"]),
            ["10.0.0.0/23"]
        );
        assert_eq!(
            summarize(&["10.0.1.0/24", "10.0.2.0/24"]),
            ["10.0.1.0/24", "10.0.2.0/24"]
        );
    }

    #[test]
    fn test_aggregate_drops_contained() {
        assert_eq!(summarize(&["10.0.0.0/16", "10.0.5.0/24"]), ["10.0.0.0/16"]);
        assert_eq!(
            summarize(&["10.0.5.0/24", "10.0.0.0/16", "10.0.5.0/24"]),
            ["10.0.0.0/16"]
        );
    }

    #[test]
    fn test_aggregate_ipv6() {
        assert_eq!(
            summarize(&["2001:db8::/33", "2001:db8:8000::/33"]),
            ["2001:db8::/32"]
        );
        assert_eq!(summarize(&["::/1", "8000::/1"]), ["::/0"]);
    }

    #[test]
    fn test_summarize_cases() {
        assert_eq!(summarize(&["10.1.0.4/24"]), ["10.1.0.0/24"]);
        assert_eq!(
            summarize(&["10.1.0.4/24", "7.0.0.0/0", "1.2.3.4/4"]),
            ["0.0.0.0/0"]
        );
        assert_eq!(
            summarize(&["10.0.0.0/23", "10.0.2.0/24", "10.0.3.0/24"]),
            ["10.0.0.0/22"]
        );
        assert_eq!(
            summarize(&["10.0.0.0/24", "10.0.1.0/24", "10.1.0.0/24", "10.1.1.0/24"]),
            ["10.0.0.0/23", "10.1.0.0/23"]
        );
        assert_eq!(
            summarize(&["10.0.0.0/24", "10.0.1.0/24", "10.0.2.0/23"]),
            ["10.0.0.0/22"]
        );
        assert_eq!(
            summarize(&["10.0.0.1/22", "10.0.4.0/22", "10.0.8.0/21"]),
            ["10.0.0.0/20"]
        );
        assert_eq!(
            summarize(&["10.0.0.0/16", "10.1.0.0/16", "10.2.0.0/16", "10.3.0.0/16"]),
            ["10.0.0.0/14"]
        );
        assert_eq!(
            summarize(&["10.0.0.0/24", "10.0.1.0/24", "10.0.2.0/24", "10.0.4.0/24"]),
            ["10.0.0.0/23", "10.0.2.0/24", "10.0.4.0/24"]
        );
        assert_eq!(
            summarize(&["10.0.1.1/24", "10.0.2.1/24", "10.0.3.1/24", "10.0.4.1/24"]),
            ["10.0.1.0/24", "10.0.2.0/23", "10.0.4.0/24"]
        );
    }

    #[test]
    fn test_summarize_with_backtrack() {
        assert_eq!(
            summarize(&[
                "10.0.1.1/24",
                "10.0.2.1/24",
                "10.0.3.1/24",
                "10.0.4.1/24",
                "10.0.0.0/24",
                "10.0.5.0/24",
                "10.0.6.0/24",
                "10.0.7.0/24",
            ]),
            ["10.0.0.0/21"]
        );
        assert_eq!(
            summarize(&[
                "10.0.1.1/24",
                "10.0.2.1/24",
                "10.0.3.1/24",
                "10.0.4.1/24",
                "10.0.5.0/24",
                "10.0.6.0/24",
                "10.0.7.0/24",
            ]),
            ["10.0.1.0/24", "10.0.2.0/23", "10.0.4.0/22"]
        );
    }

    #[test]
    fn test_summarize_long_chain() {
        let list: Vec<String> = (0..16).map(|i| format!("10.0.{i}.0/24")).collect();
        let refs: Vec<&str> = list.iter().map(String::as_str).collect();
        assert_eq!(summarize(&refs), ["10.0.0.0/20"]);

        let mut reversed = refs.clone();
        reversed.reverse();
        assert_eq!(summarize(&reversed), ["10.0.0.0/20"]);
    }

    #[test]
    fn test_summarize_mixed_sizes() {
        assert_eq!(
            summarize(&[
                "10.0.0.0/24",
                "10.0.1.0/25",
                "10.0.1.128/26",
                "10.0.1.192/26",
                "10.0.2.0/23",
            ]),
            ["10.0.0.0/22"]
        );
        assert_eq!(
            summarize(&["192.168.0.0/24", "192.168.1.0/24", "192.168.3.0/24"]),
            ["192.168.0.0/23", "192.168.3.0/24"]
        );
    }

    #[test]
    fn test_aggregate_idempotent() {
        let first = aggregate(&nets(&[
            "10.0.0.0/24",
            "10.0.1.0/24",
            "10.0.3.0/24",
            "172.16.0.0/12",
            "172.20.0.0/16",
        ]))
        .unwrap();
        assert_eq!(aggregate(&first).unwrap(), first);
    }

    #[test]
    fn test_aggregate_empty_and_mixed() {
        assert!(aggregate(&[]).unwrap().is_empty());
        assert_eq!(
            aggregate(&nets(&["10.0.0.0/24", "2001:db8::/32"])).unwrap_err(),
            AddrError::VersionMismatch {
                expected: IpVersion::V4,
                found: IpVersion::V6
            }
        );
    }
}
