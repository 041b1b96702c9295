//! WS-Discovery device discovery module.
//!
//! Provides probe multicast transport, ProbeMatch reply parsing, and the
//! discovery service tying them together for a single pass.

pub mod reply;
pub mod service;
pub mod transport;

pub use reply::parse_probe_match;
pub use service::DiscoveryService;
