//! Core library for discovering ONVIF network video devices.
//!
//! Implements a single pass of the WS-Discovery Probe/ProbeMatch exchange:
//! build a SOAP Probe envelope, multicast it on a chosen interface, collect
//! unicast replies for a short window and parse each one into a [`Device`].

pub mod discovery;
pub mod error;
pub mod probe;
pub mod types;

pub use discovery::service::DiscoveryService;
pub use error::{DiscoveryError, Result};
pub use types::Device;
