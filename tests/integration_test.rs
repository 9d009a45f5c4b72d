//! Integration tests for subnet-summary
//!
//! These tests exercise parsing, summarization, splitting and rendering together.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::Write;
use subnet_summary::cli::{execute, Cli};
use subnet_summary::models::{Address, Prefix};
use subnet_summary::output::text::ipv6_compressed;
use subnet_summary::processing::aggregate;
use subnet_summary::summarize_str;

use clap::Parser;

fn strings(list: &[Address]) -> Vec<String> {
    list.iter().map(|a| a.to_string()).collect()
}

fn nets(list: &[&str]) -> Vec<Address> {
    list.iter().map(|s| Address::new(s).unwrap()).collect()
}

#[test]
fn test_scenario_sibling_merge() {
    let result = summarize_str(&["172.16.10.0/24", "172.16.11.0/24"]).unwrap();
    assert_eq!(strings(&result), ["172.16.10.0/23"]);
}

#[test]
fn test_scenario_host_bits_dropped() {
    let result =
        summarize_str(&["10.0.0.1/24", "10.0.1.1/24", "10.0.2.1/24", "10.0.3.1/24"]).unwrap();
    assert_eq!(strings(&result), ["10.0.0.0/22"]);
}

#[test]
fn test_scenario_unequal_neighbours_stay() {
    let result = summarize_str(&["10.0.0.0/23", "10.0.2.0/24"]).unwrap();
    assert_eq!(strings(&result), ["10.0.0.0/23", "10.0.2.0/24"]);
}

#[test]
fn test_scenario_split_three() {
    let parts = Address::new("172.16.10.0/24").unwrap().split(3).unwrap();
    assert_eq!(
        strings(&parts),
        ["172.16.10.0/26", "172.16.10.64/26", "172.16.10.128/25"]
    );
}

#[test]
fn test_scenario_compression() {
    assert_eq!(
        ipv6_compressed(&[0x2001, 0x0888, 0, 0x6630, 0, 0, 0, 0]),
        "2001:888:0:6630::"
    );
    let addr = Address::new("2001:888:0:6630:0:0:0:0/64").unwrap();
    assert_eq!(addr.to_string(), "2001:888:0:6630::/64");
}

#[test]
fn test_scenario_prefix_bounds() {
    assert!(Prefix::v4(33).is_err());
    assert!(Prefix::v6(129).is_err());
    assert!(Prefix::v4(32).is_ok());
    assert!(Prefix::v6(128).is_ok());
}

#[test]
fn test_sibling_chain_collapses() {
    for len in [8usize, 16, 64, 256] {
        let list: Vec<Address> = (0..len as u32)
            .map(|i| Address::from_u32(0x0a00_0000 + (i << 8), 24).unwrap())
            .collect();
        let expected_len = 24 - len.trailing_zeros() as usize;
        let result = aggregate(&list).unwrap();
        assert_eq!(result.len(), 1, "{len} siblings");
        assert_eq!(result[0].prefix().num() as usize, expected_len);
        assert_eq!(result[0].to_addr_string(), "10.0.0.0");
    }
}

#[test]
fn test_ipv6_chain_collapses() {
    let list: Vec<Address> = (0..32u128)
        .map(|i| Address::from_u128((0x2001_0db8u128 << 96) | (i << 64), 64).unwrap())
        .collect();
    assert_eq!(strings(&aggregate(&list).unwrap()), ["2001:db8::/59"]);
}

/// Random networks inside 10.0.0.0/20, small enough to check address by address.
fn random_networks(rng: &mut StdRng, count: usize) -> Vec<Address> {
    (0..count)
        .map(|_| {
            let len = rng.gen_range(22..=30);
            let host = 0x0a00_0000u32 + rng.gen_range(0..4096u32);
            Address::from_u32(host, len).unwrap()
        })
        .collect()
}

/// Bitmap of the 10.0.0.0/20 addresses covered by `networks`.
fn coverage(networks: &[Address]) -> Vec<bool> {
    let mut covered = vec![false; 4096];
    for net in networks {
        let start = (net.network().host_address().low_u32() - 0x0a00_0000) as usize;
        let size = net.size().to_u128().unwrap() as usize;
        for slot in covered.iter_mut().skip(start).take(size) {
            *slot = true;
        }
    }
    covered
}

#[test]
fn test_aggregate_random_coverage_and_idempotence() {
    let mut rng = StdRng::seed_from_u64(4711);
    for _ in 0..200 {
        let count = rng.gen_range(1..40);
        let input = random_networks(&mut rng, count);
        let result = aggregate(&input).unwrap();

        assert_eq!(coverage(&input), coverage(&result));
        assert_eq!(aggregate(&result).unwrap(), result);
        for pair in result.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].broadcast().host_address() < pair[1].host_address());
        }
        for net in &result {
            assert!(net.is_network() || net.prefix().num() == 32);
        }
    }
}

#[test]
fn test_split_random_partition() {
    let mut rng = StdRng::seed_from_u64(1234);
    for _ in 0..100 {
        let len = rng.gen_range(8..=28);
        let host: u32 = rng.gen();
        let network = Address::from_u32(host, len).unwrap().network();
        let max = 1usize << (32 - len).min(6);
        let count = rng.gen_range(1..=max);

        let parts = network.split(count).unwrap();
        assert_eq!(parts.len(), count, "{network} / {count}");
        assert_eq!(parts[0].host_address(), network.host_address());
        assert_eq!(
            parts[count - 1].broadcast().host_address(),
            network.broadcast().host_address()
        );
        for pair in parts.windows(2) {
            let next = pair[0].broadcast().host_address() + 1u32;
            assert_eq!(&next, pair[1].host_address());
        }
    }
}

#[test]
fn test_ipv6_canonical_round_trip() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..500 {
        let mut groups = [0u16; 8];
        for g in groups.iter_mut() {
            if rng.gen_bool(0.5) {
                *g = rng.gen();
            }
        }
        let host = groups
            .iter()
            .fold(0u128, |acc, &g| (acc << 16) | g as u128);
        let addr = Address::from_u128(host, 128).unwrap();
        let text = addr.to_addr_string();

        assert!(text.matches("::").count() <= 1, "{text}");
        let parsed = Address::new(&text).unwrap();
        assert_eq!(parsed, addr, "{text}");
        assert_eq!(parsed.parts(), groups);
        assert_eq!(
            Address::new(&addr.to_addr_string_uncompressed()).unwrap(),
            addr
        );
    }
}

#[test]
fn test_mixed_versions_rejected() {
    let err = summarize_str(&["10.0.0.0/8", "2001:db8::/32"]).unwrap_err();
    assert_eq!(err.to_string(), "version mismatch: expected IPv4, found IPv6");
}

#[test]
fn test_json_round_trip() {
    let list = nets(&["10.0.0.0/24", "2001:db8::/32", "::ffff:10.1.2.3"]);
    let json = serde_json::to_string(&list).unwrap();
    assert_eq!(
        json,
        r#"["10.0.0.0/24","2001:db8::/32","::ffff:a01:203/128"]"#
    );
    let back: Vec<Address> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, list);
}

#[test]
fn test_cli_with_input_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"["10.0.0.1/24", "10.0.1.1/24", "10.0.2.1/24", "10.0.3.1/24"]"#
    )
    .unwrap();
    let path = file.path().to_str().unwrap();
    let cli = Cli::parse_from(["subnet-summary", "--input", path, "aggregate"]);
    assert_eq!(strings(&execute(&cli).unwrap()), ["10.0.0.0/22"]);

    let cli = Cli::parse_from(["subnet-summary", "show", "10.0.0.1/8"]);
    assert_eq!(strings(&execute(&cli).unwrap()), ["10.0.0.1/8"]);
}
