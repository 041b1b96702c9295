//! Error types for the camscout CLI.
//!
//! CliError wraps DiscoveryError from the core library and adds
//! CLI-specific variants.

use camscout_core::DiscoveryError;
use thiserror::Error;

/// Exit codes for the CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const NETWORK_ERROR: i32 = 2;
    pub const INVALID_ARGS: i32 = 4;
}

/// Main error type for the CLI
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Discovery error: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("No multicast-capable IPv4 interface found")]
    NoInterfaceFound,

    #[error("No devices found")]
    NoDevicesFound,
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Discovery(_) => exit_codes::NETWORK_ERROR,
            CliError::Io(_) => exit_codes::GENERAL_ERROR,
            CliError::InvalidArgument(_) => exit_codes::INVALID_ARGS,
            CliError::NoInterfaceFound => exit_codes::NETWORK_ERROR,
            CliError::NoDevicesFound => exit_codes::GENERAL_ERROR,
        }
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
