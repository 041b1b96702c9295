//! JSON output for scripting.

use camscout_core::Device;

use super::OutputFormatter;
use crate::net::NetInterface;

pub struct JsonOutput;

impl JsonOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for JsonOutput {
    fn format_devices(&self, devices: &[Device]) -> String {
        let output = serde_json::json!({
            "devices": devices,
            "count": devices.len(),
        });
        serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_interfaces(&self, interfaces: &[NetInterface]) -> String {
        let output = serde_json::json!({
            "interfaces": interfaces,
            "count": interfaces.len(),
        });
        serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_json_shape() {
        let devices = vec![Device {
            xaddr: "192.0.2.10".to_string(),
            xaddr_v6: Some("2001:db8::10".to_string()),
            hardware: "DS-1".to_string(),
            name: "Camera".to_string(),
            location: "Lobby".to_string(),
        }];

        let out = JsonOutput::new().format_devices(&devices);
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["count"], 1);
        assert_eq!(parsed["devices"][0]["xaddr"], "192.0.2.10");
        assert_eq!(parsed["devices"][0]["xaddr_v6"], "2001:db8::10");
    }

    #[test]
    fn test_absent_ipv6_is_omitted() {
        let devices = vec![Device {
            xaddr: "192.0.2.10".to_string(),
            xaddr_v6: None,
            hardware: String::new(),
            name: String::new(),
            location: String::new(),
        }];

        let out = JsonOutput::new().format_devices(&devices);
        assert!(!out.contains("xaddr_v6"));
    }
}
