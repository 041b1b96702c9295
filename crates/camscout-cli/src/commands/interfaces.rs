//! Interfaces command implementation.

use crate::error::CliError;
use crate::net;
use crate::output::get_formatter;

/// Run the interfaces command
pub fn run_interfaces(json: bool) -> Result<(), CliError> {
    let formatter = get_formatter(json);
    let interfaces = net::candidate_interfaces()?;
    println!("{}", formatter.format_interfaces(&interfaces));
    Ok(())
}
