//! Interface selection for discovery.

use std::net::{IpAddr, Ipv4Addr};

use serde::Serialize;

use crate::error::CliError;

/// An interface the probe can be multicast on.
#[derive(Debug, Clone, Serialize)]
pub struct NetInterface {
    pub name: String,
    pub addr: Ipv4Addr,
}

/// Enumerate non-loopback IPv4 interfaces, skipping link-local addresses.
pub fn candidate_interfaces() -> Result<Vec<NetInterface>, CliError> {
    let mut interfaces: Vec<NetInterface> = if_addrs::get_if_addrs()?
        .into_iter()
        .filter(|iface| !iface.is_loopback())
        .filter_map(|iface| match iface.ip() {
            IpAddr::V4(addr) if !addr.is_link_local() => Some(NetInterface {
                name: iface.name,
                addr,
            }),
            _ => None,
        })
        .collect();
    interfaces.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(interfaces)
}

/// Resolve the `--interface` argument to a concrete interface.
///
/// Accepts an IPv4 literal or an interface name; without an argument the
/// first candidate interface is used.
pub fn resolve_interface(arg: Option<&str>) -> Result<NetInterface, CliError> {
    match arg {
        Some(arg) => {
            if let Ok(addr) = arg.parse::<Ipv4Addr>() {
                return Ok(NetInterface {
                    name: arg.to_string(),
                    addr,
                });
            }
            candidate_interfaces()?
                .into_iter()
                .find(|iface| iface.name == arg)
                .ok_or_else(|| {
                    CliError::InvalidArgument(format!(
                        "no IPv4 interface named '{}'",
                        arg
                    ))
                })
        }
        None => candidate_interfaces()?
            .into_iter()
            .next()
            .ok_or(CliError::NoInterfaceFound),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_ipv4_literal() {
        let iface = resolve_interface(Some("192.0.2.1")).unwrap();
        assert_eq!(iface.addr, Ipv4Addr::new(192, 0, 2, 1));
        assert_eq!(iface.name, "192.0.2.1");
    }

    #[test]
    fn test_resolve_unknown_name_is_invalid_argument() {
        let err = resolve_interface(Some("definitely-not-an-interface")).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
    }
}
