//! Table-formatted output for CLI.

use comfy_table::{Cell, ContentArrangement, Table};

use camscout_core::Device;

use super::OutputFormatter;
use crate::net::NetInterface;

pub struct TableOutput;

impl TableOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TableOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for TableOutput {
    fn format_devices(&self, devices: &[Device]) -> String {
        if devices.is_empty() {
            return "No devices found.".to_string();
        }

        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Endpoint", "IPv6", "Hardware", "Name", "Location"]);

        for device in devices {
            table.add_row(vec![
                Cell::new(&device.xaddr),
                Cell::new(device.xaddr_v6.as_deref().unwrap_or("-")),
                Cell::new(&device.hardware),
                Cell::new(&device.name),
                Cell::new(&device.location),
            ]);
        }

        format!("{}\n\nFound {} device(s)", table, devices.len())
    }

    fn format_interfaces(&self, interfaces: &[NetInterface]) -> String {
        if interfaces.is_empty() {
            return "No multicast-capable IPv4 interfaces found.".to_string();
        }

        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Interface", "IPv4"]);

        for iface in interfaces {
            table.add_row(vec![
                Cell::new(&iface.name),
                Cell::new(iface.addr.to_string()),
            ]);
        }

        table.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_device_table() {
        let out = TableOutput::new().format_devices(&[]);
        assert_eq!(out, "No devices found.");
    }

    #[test]
    fn test_device_table_contains_fields() {
        let devices = vec![Device {
            xaddr: "192.0.2.10".to_string(),
            xaddr_v6: None,
            hardware: "DS-1".to_string(),
            name: "Camera".to_string(),
            location: "Lobby".to_string(),
        }];

        let out = TableOutput::new().format_devices(&devices);
        assert!(out.contains("192.0.2.10"));
        assert!(out.contains("DS-1"));
        assert!(out.contains("Lobby"));
        assert!(out.contains("Found 1 device(s)"));
    }
}
