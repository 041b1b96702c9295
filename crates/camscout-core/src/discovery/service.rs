//! Discovery orchestration: one probe, one collection window, one device list.

use std::collections::BTreeMap;
use std::net::{IpAddr, Ipv4Addr};

use uuid::Uuid;

use crate::discovery::reply::parse_probe_match;
use crate::discovery::transport::send_probe;
use crate::error::Result;
use crate::probe::build_probe_message;
use crate::types::Device;

/// Qualified type token probed for.
pub const NVT_TYPE: &str = "dn:NetworkVideoTransmitter";

/// ONVIF network WSDL namespace bound to the `dn` prefix.
pub const ONVIF_NETWORK_NAMESPACE: &str = "http://www.onvif.org/ver10/network/wsdl";

/// Stateless discovery entry point.
///
/// Every call is self-contained: a fresh message ID, a call-scoped socket,
/// no state shared with other calls. Concurrent calls on different
/// interfaces are independent.
pub struct DiscoveryService;

impl DiscoveryService {
    /// Run one discovery pass on `interface` (the interface's IPv4 address).
    ///
    /// Probes for `NetworkVideoTransmitter` with no scope filter and returns
    /// the devices that answered within the collection window, sorted by
    /// endpoint address. An empty list with no error means no responders.
    pub async fn discover(interface: Ipv4Addr) -> Result<Vec<Device>> {
        let message_id = Uuid::new_v4();
        let namespaces = BTreeMap::from([(
            "dn".to_string(),
            ONVIF_NETWORK_NAMESPACE.to_string(),
        )]);
        let probe =
            build_probe_message(&message_id.to_string(), &[], &[NVT_TYPE.to_string()], &namespaces)?;

        log::debug!("sending probe {} on {}", message_id, interface);
        let replies = send_probe(interface, probe.as_bytes()).await?;
        log::debug!("collected {} replies on {}", replies.len(), interface);

        let mut devices = parse_replies(&replies);
        sort_by_endpoint(&mut devices);
        Ok(devices)
    }
}

/// Parse every reply, skipping the ones that yield no device.
pub fn parse_replies(replies: &[String]) -> Vec<Device> {
    replies
        .iter()
        .filter_map(|raw| parse_probe_match(raw))
        .collect()
}

/// Stable sort by the parsed IP of the primary endpoint. Endpoints that are
/// not IP literals (hostnames) sort after the parseable ones.
pub fn sort_by_endpoint(devices: &mut [Device]) {
    devices.sort_by_key(|d| match d.xaddr.parse::<IpAddr>() {
        Ok(ip) => (0u8, Some(ip)),
        Err(_) => (1u8, None),
    });
}
