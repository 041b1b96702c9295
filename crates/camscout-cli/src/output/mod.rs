//! Output formatting for CLI results.

pub mod json;
pub mod table;

pub use json::JsonOutput;
pub use table::TableOutput;

use camscout_core::Device;

use crate::net::NetInterface;

/// Output formatter trait
pub trait OutputFormatter {
    /// Format device list
    fn format_devices(&self, devices: &[Device]) -> String;

    /// Format interface list
    fn format_interfaces(&self, interfaces: &[NetInterface]) -> String;
}

/// Get the appropriate formatter based on JSON flag
pub fn get_formatter(json: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonOutput::new())
    } else {
        Box::new(TableOutput::new())
    }
}
