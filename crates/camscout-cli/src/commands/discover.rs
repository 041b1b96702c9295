//! Discover command implementation.

use std::collections::HashSet;

use colored::Colorize;

use camscout_core::discovery::service::sort_by_endpoint;
use camscout_core::{Device, DiscoveryService};

use crate::cli::DiscoverArgs;
use crate::error::CliError;
use crate::net;
use crate::output::get_formatter;

/// Run the discover command
pub async fn run_discover(args: DiscoverArgs, json: bool) -> Result<(), CliError> {
    let formatter = get_formatter(json);

    let devices = if args.all {
        discover_all(json).await?
    } else {
        let iface = net::resolve_interface(args.interface.as_deref())?;
        if !json {
            println!("{}", format!("Probing on {} ({})...", iface.name, iface.addr).dimmed());
        }
        DiscoveryService::discover(iface.addr).await?
    };

    println!("{}", formatter.format_devices(&devices));

    if devices.is_empty() {
        return Err(CliError::NoDevicesFound);
    }

    Ok(())
}

/// Probe every candidate interface in turn, merging results by endpoint.
///
/// An interface that fails setup is logged and skipped; the whole run only
/// fails when no interface could be probed at all.
async fn discover_all(json: bool) -> Result<Vec<Device>, CliError> {
    let interfaces = net::candidate_interfaces()?;
    if interfaces.is_empty() {
        return Err(CliError::NoInterfaceFound);
    }

    let mut devices: Vec<Device> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut last_error: Option<CliError> = None;
    let mut probed = false;

    for iface in interfaces {
        if !json {
            println!("{}", format!("Probing on {} ({})...", iface.name, iface.addr).dimmed());
        }
        match DiscoveryService::discover(iface.addr).await {
            Ok(found) => {
                probed = true;
                for device in found {
                    if seen.insert(device.xaddr.clone()) {
                        devices.push(device);
                    }
                }
            }
            Err(e) => {
                log::warn!("discovery failed on {} ({}): {}", iface.name, iface.addr, e);
                last_error = Some(e.into());
            }
        }
    }

    if !probed {
        if let Some(e) = last_error {
            return Err(e);
        }
    }

    sort_by_endpoint(&mut devices);
    Ok(devices)
}
