//! Command line interface.

use crate::models::Address;
use crate::output::{network_print, print_details};
use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "subnet-summary")]
#[command(about = "Summarize, split and inspect IPv4/IPv6 networks")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Print results as a JSON array of CIDR strings
    #[arg(long)]
    pub json: bool,

    /// JSON file with an array of CIDR strings, added to the command's addresses
    #[arg(short, long)]
    pub input: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Merge networks into the fewest covering networks
    Aggregate {
        /// Networks in CIDR notation
        cidrs: Vec<String>,
    },

    /// Divide a network into COUNT contiguous networks
    Split {
        cidr: String,
        count: usize,
    },

    /// List all networks of prefix LENGTH inside a network
    Subnet {
        cidr: String,
        length: usize,
    },

    /// Show details of one or more addresses
    Show {
        addrs: Vec<String>,
    },
}

/// Parse every string, stopping at the first bad one.
pub fn parse_all(list: &[String]) -> Result<Vec<Address>, Box<dyn Error>> {
    list.iter().map(|s| Ok(Address::new(s)?)).collect()
}

/// Read a JSON array of CIDR strings.
pub fn read_input(path: &Path) -> Result<Vec<Address>, Box<dyn Error>> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("Error reading input file {}: {e}", path.display()))?;
    log::info!("Reading addresses from {}", path.display());
    let mut json_deserializer = serde_json::Deserializer::from_str(&json);
    let addrs: Vec<Address> = serde_path_to_error::deserialize(&mut json_deserializer)
        .map_err(|e| {
            format!(
                "Error parsing input file {}: path={} error={}",
                path.display(),
                e.path(),
                e.inner()
            )
        })?;
    Ok(addrs)
}

/// Networks or addresses the command works on: positional ones first, then `--input`.
fn collect_addresses(cli: &Cli, positional: &[String]) -> Result<Vec<Address>, Box<dyn Error>> {
    let mut addrs = parse_all(positional)?;
    if let Some(path) = &cli.input {
        addrs.extend(read_input(path)?);
    }
    Ok(addrs)
}

/// The addresses a command prints; `show` yields its inputs unchanged.
pub fn execute(cli: &Cli) -> Result<Vec<Address>, Box<dyn Error>> {
    let result = match &cli.command {
        Commands::Aggregate { cidrs } => {
            let networks = collect_addresses(cli, cidrs)?;
            crate::processing::aggregate(&networks)?
        }
        Commands::Split { cidr, count } => Address::new(cidr)?.split(*count)?,
        Commands::Subnet { cidr, length } => Address::new(cidr)?.subnet(*length)?,
        Commands::Show { addrs } => collect_addresses(cli, addrs)?,
    };
    log::debug!("{:?} -> {} results", cli.command, result.len());
    Ok(result)
}

/// Run the command and print its result.
pub fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let result = execute(cli)?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if let Commands::Show { .. } = cli.command {
        for addr in &result {
            print_details(addr);
            println!();
        }
    } else {
        network_print(&result);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("subnet-summary").chain(args.iter().copied()))
    }

    fn strings(list: &[Address]) -> Vec<String> {
        list.iter().map(|a| a.to_string()).collect()
    }

    #[test]
    fn test_execute_aggregate() {
        let result = execute(&cli(&["aggregate", "172.16.10.0/24", "172.16.11.0/24"])).unwrap();
        assert_eq!(strings(&result), ["172.16.10.0/23"]);
    }

    #[test]
    fn test_execute_split_and_subnet() {
        let result = execute(&cli(&["split", "172.16.10.0/24", "3"])).unwrap();
        assert_eq!(
            strings(&result),
            ["172.16.10.0/26", "172.16.10.64/26", "172.16.10.128/25"]
        );
        let result = execute(&cli(&["subnet", "10.0.0.0/30", "31"])).unwrap();
        assert_eq!(strings(&result), ["10.0.0.0/31", "10.0.0.2/31"]);
    }

    #[test]
    fn test_execute_errors() {
        assert!(execute(&cli(&["split", "10.0.0.0/30", "5"])).is_err());
        let err = execute(&cli(&["aggregate", "10.0.0.0/24", "bogus"])).unwrap_err();
        assert_eq!(err.to_string(), "invalid address \"bogus\"");
    }

    #[test]
    fn test_json_flag_and_input() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"["10.0.1.0/24", "10.0.2.0/23"]"#).unwrap();
        let path = file.path().to_str().unwrap();
        let cli = cli(&["--json", "--input", path, "aggregate", "10.0.0.0/24"]);
        assert!(cli.json);
        assert_eq!(strings(&execute(&cli).unwrap()), ["10.0.0.0/22"]);
    }

    #[test]
    fn test_read_input_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"["10.0.1.0/24", "10.0.2.0/33"]"#).unwrap();
        let err = read_input(file.path()).unwrap_err().to_string();
        assert!(err.contains("path=[1]"), "{err}");
        assert!(read_input(Path::new("/nonexistent/input.json")).is_err());
    }
}
