//! Dividing a network into smaller ones, and widening it into a supernet.

use super::aggregate;
use crate::config::MAX_SUBNET_BITS;
use crate::error::{AddrError, Result};
use crate::models::{Address, Wide};

/// All networks with prefix length `len` inside `network`, in ascending order.
///
/// Refuses to produce more than `2^MAX_SUBNET_BITS` networks.
pub fn subnet(network: &Address, len: usize) -> Result<Vec<Address>> {
    let prefix = network.prefix();
    if len < prefix.num() as usize || len > prefix.bit_length() as usize {
        return Err(AddrError::SubnetOutOfRange {
            len,
            min: prefix.num(),
            max: prefix.bit_length(),
        });
    }
    let extra_bits = len - prefix.num() as usize;
    if extra_bits > MAX_SUBNET_BITS as usize {
        return Err(AddrError::TooManySubnets {
            bits: extra_bits as u8,
            limit: MAX_SUBNET_BITS,
        });
    }

    let sub_prefix = prefix.with_num(len)?;
    let step = sub_prefix.size();
    let mut host = network.network().host_address().clone();
    let mut ret = Vec::with_capacity(1 << extra_bits);
    for _ in 0..(1usize << extra_bits) {
        ret.push(Address::from_prefix(host.clone(), sub_prefix)?);
        host = &host + &step;
    }
    log::debug!("{network} -> {} subnets of /{len}", ret.len());
    Ok(ret)
}

/// The network with the shorter prefix `len` that contains `network`.
pub fn supernet(network: &Address, len: usize) -> Result<Address> {
    let current = network.prefix().num();
    if len >= current as usize {
        return Err(AddrError::SupernetOutOfRange { len, current });
    }
    Ok(network.change_prefix(len)?.network())
}

/// Divide `network` into exactly `count` contiguous networks covering it.
///
/// The network is cut into the next power of two of equal parts, then adjacent
/// pairs are merged starting from the high end until `count` remain. Earlier
/// results are therefore the smaller ones.
///
/// # Arguments
/// * `network` - The network to divide; host bits are ignored
/// * `count` - Number of networks wanted, `1..=2^host_prefix`
///
/// # Returns
/// * `count` networks in ascending order, or `SubnetCountOutOfRange`
///
/// # Examples
/// ```
/// use subnet_summary::models::Address;
/// let parts = Address::new("172.16.10.0/24").unwrap().split(3).unwrap();
/// let parts: Vec<String> = parts.iter().map(|p| p.to_string()).collect();
/// assert_eq!(parts, ["172.16.10.0/26", "172.16.10.64/26", "172.16.10.128/25"]);
/// ```
pub fn split(network: &Address, count: usize) -> Result<Vec<Address>> {
    let host_bits = network.prefix().host_prefix();
    let out_of_range = AddrError::SubnetCountOutOfRange { count, host_bits };
    if count == 0 || Wide::from(count) > network.size() {
        return Err(out_of_range);
    }
    let extra_bits = count
        .checked_next_power_of_two()
        .ok_or(out_of_range)?
        .trailing_zeros() as usize;

    let networks = subnet(network, network.prefix().num() as usize + extra_bits)?;
    let ret = merge_from_end(networks, count)?;
    log::debug!("{network} split into {} networks", ret.len());
    Ok(ret)
}

/// Repeated [`sum_first_found`] until `count` networks remain, in one sweep.
///
/// `left` holds the networks up to the cursor, `right` the checked ones after it in
/// reverse. Pairs right of the last merge did not change, so a pass resumes at the
/// cursor instead of the high end.
fn merge_from_end(networks: Vec<Address>, count: usize) -> Result<Vec<Address>> {
    let total = networks.len();
    let mut left = networks;
    let mut right: Vec<Address> = Vec::with_capacity(total);
    if let Some(last) = left.pop() {
        right.push(last);
    }
    while left.len() + right.len() > count {
        let (Some(low), Some(high)) = (left.last(), right.last()) else {
            return Err(AddrError::SplitStalled {
                count: left.len() + right.len(),
                target: count,
            });
        };
        let merged = aggregate(&[low.clone(), high.clone()])?;
        if let [single] = merged.as_slice() {
            log::trace!("merged {low} and {high} into {single}");
            let single = single.clone();
            left.pop();
            right.pop();
            if right.is_empty() {
                right.push(single);
            } else {
                left.push(single);
            }
        } else if let Some(low) = left.pop() {
            right.push(low);
        }
    }
    left.extend(right.into_iter().rev());
    Ok(left)
}

/// Merge the last adjacent pair (scanning from the high end) that summarizes to a
/// single network. Returns the input unchanged when no pair merges.
pub fn sum_first_found(networks: &[Address]) -> Result<Vec<Address>> {
    let mut ret = networks.to_vec();
    if ret.len() < 2 {
        return Ok(ret);
    }
    for i in (0..ret.len() - 1).rev() {
        let merged = aggregate(&ret[i..=i + 1])?;
        if let [single] = merged.as_slice() {
            log::trace!("merged {} and {} into {single}", ret[i], ret[i + 1]);
            ret[i] = single.clone();
            ret.remove(i + 1);
            break;
        }
    }
    Ok(ret)
}
