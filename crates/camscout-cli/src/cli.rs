//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};

/// camscout - Discover ONVIF network video devices via WS-Discovery
#[derive(Parser, Debug)]
#[command(name = "camscout")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Discover devices on the network
    Discover(DiscoverArgs),

    /// List interfaces usable for discovery
    Interfaces,
}

// ==================== Discover ====================

#[derive(Args, Debug)]
pub struct DiscoverArgs {
    /// Interface to probe on (name or IPv4 address)
    #[arg(short, long, env = "CAMSCOUT_INTERFACE")]
    pub interface: Option<String>,

    /// Probe every viable interface and merge the results
    #[arg(long, conflicts_with = "interface")]
    pub all: bool,
}
