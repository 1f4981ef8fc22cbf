//! Command line definition for the `netaddr` binary.

use crate::config::{Config, OutputFormat};
use crate::facade;
use crate::models::IpNetwork;
use crate::output;
use clap::{Parser, Subcommand};
use std::error::Error;
use std::str::FromStr;

#[derive(Parser, Debug)]
#[command(name = "netaddr")]
#[command(about = "Parse, classify and subnet IP and MAC addresses.")]
pub struct CommandLine {
    /// Print indented JSON
    #[arg(long, global = true, conflicts_with = "table")]
    pub pretty: bool,
    /// Print an aligned key/value table
    #[arg(long, global = true)]
    pub table: bool,
    /// Print compact JSON (default)
    #[arg(long, global = true, conflicts_with_all = ["pretty", "table"])]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Canonical form of an address
    Ip { address: String },
    /// Classification and derived views of an address
    #[command(alias = "i")]
    Info { address: String },
    /// Derived addresses and host count of a CIDR block
    #[command(alias = "n")]
    Network { cidr: String },
    /// OUI and flags of a MAC address
    Mac { address: String },
    /// Distinct entries of a comma-separated list
    Set { list: String },
    /// The following address
    Next { address: String },
    /// The preceding address
    Prev { address: String },
    /// Split a CIDR block into longer-prefix children
    #[command(alias = "s")]
    Subnet {
        cidr: String,
        prefix: String,
        /// Most children to list [env: NETADDR_SUBNET_LIMIT, default 20]
        #[arg(long)]
        limit: Option<usize>,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Flags win over the configured default.
    pub fn output_format(&self, config: &Config) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else if self.pretty {
            OutputFormat::Pretty
        } else if self.table {
            OutputFormat::Table
        } else {
            config.output
        }
    }
}

/// Run one command and return the text to print.
pub fn run(cli: &CommandLine, config: &Config) -> Result<String, Box<dyn Error>> {
    let format = cli.output_format(config);
    let text = match &cli.command {
        Commands::Ip { address } => facade::parse_ip(address)?,
        Commands::Info { address } => output::render(&facade::get_ip_info(address)?, format)?,
        Commands::Network { cidr } => output::render(&facade::parse_network(cidr)?, format)?,
        Commands::Mac { address } => output::render(&facade::parse_mac(address)?, format)?,
        Commands::Set { list } => output::render(&facade::create_ip_set(list)?, format)?,
        Commands::Next { address } => facade::get_next_ip(address)?,
        Commands::Prev { address } => facade::get_prev_ip(address)?,
        Commands::Subnet {
            cidr,
            prefix,
            limit,
        } => {
            let limit = limit.unwrap_or(config.subnet_limit);
            let prefix = IpNetwork::from_str(cidr)?.parse_subnet_prefix(prefix)?;
            output::render(&facade::subnet_network(cidr, prefix, limit)?, format)?
        }
    };
    Ok(text)
}
