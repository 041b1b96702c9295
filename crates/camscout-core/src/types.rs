//! Shared result types for device discovery.

use serde::{Deserialize, Serialize};

/// A network video device that answered a WS-Discovery probe.
///
/// `xaddr` is the primary service endpoint host extracted from the reply's
/// XAddrs list, preferring an IPv4 form when the device advertises both
/// address families. `xaddr_v6` carries the IPv6 form when one was present
/// in addition to the primary.
///
/// The descriptive fields come from the reply's scope URIs and are empty
/// strings when the device did not advertise them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    /// Primary service endpoint host (IPv4 address, hostname, or IPv6
    /// address when nothing else was advertised).
    pub xaddr: String,

    /// IPv6 endpoint host, when advertised alongside the primary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaddr_v6: Option<String>,

    /// Hardware model, e.g. `DS-2CD2042WD-I`.
    pub hardware: String,

    /// Friendly name with the hardware token stripped out.
    pub name: String,

    /// Free-text physical location.
    pub location: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization_omits_absent_ipv6() {
        let device = Device {
            xaddr: "192.0.2.10".to_string(),
            xaddr_v6: None,
            hardware: "DS-1".to_string(),
            name: "Camera".to_string(),
            location: String::new(),
        };

        let json = serde_json::to_string(&device).unwrap();
        assert!(json.contains("\"xaddr\":\"192.0.2.10\""));
        assert!(!json.contains("xaddr_v6"));
    }
}
