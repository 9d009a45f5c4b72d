// cargo watch -x 'fmt' -x 'test'

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod parse;
pub mod processing;

pub use error::{AddrError, Result};
pub use models::{Address, IpVersion, Prefix, Wide};

/// Parse each CIDR string and summarize the lot.
///
/// # Examples
/// ```
/// let nets = subnet_summary::summarize_str(&["10.0.0.1/24", "10.0.1.1/24"]).unwrap();
/// assert_eq!(nets[0].to_string(), "10.0.0.0/23");
/// ```
pub fn summarize_str(cidrs: &[&str]) -> Result<Vec<Address>> {
    let networks = cidrs
        .iter()
        .map(|s| parse::parse(s))
        .collect::<Result<Vec<Address>>>()?;
    processing::aggregate(&networks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_str() {
        let nets = summarize_str(&["10.0.0.1/24", "10.0.1.1/24", "10.0.2.1/24", "10.0.3.1/24"])
            .unwrap();
        assert_eq!(nets.len(), 1);
        assert_eq!(nets[0].to_string(), "10.0.0.0/22");
        assert!(summarize_str(&["10.0.0.0/24", "nope"]).is_err());
        assert!(summarize_str(&[]).unwrap().is_empty());
    }
}
