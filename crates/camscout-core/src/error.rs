//! Error types for camscout core.

use thiserror::Error;

/// Errors raised by a discovery pass.
///
/// Only setup-level failures surface here. Individual replies that fail to
/// parse are dropped by the reply parser, and the collection window running
/// out is the normal end of a pass, not an error.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Failed to build probe message: {0}")]
    ProbeBuild(#[from] quick_xml::Error),

    #[error("Socket error while trying to {step}: {source}")]
    Socket {
        step: &'static str,
        source: std::io::Error,
    },
}

impl DiscoveryError {
    /// Attach the setup step that failed to an IO error.
    pub(crate) fn socket(step: &'static str) -> impl FnOnce(std::io::Error) -> Self {
        move |source| DiscoveryError::Socket { step, source }
    }
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, DiscoveryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_error_display() {
        let err = DiscoveryError::socket("join multicast group")(std::io::Error::new(
            std::io::ErrorKind::AddrNotAvailable,
            "no such device",
        ));
        let msg = format!("{}", err);
        assert!(msg.contains("join multicast group"));
        assert!(msg.contains("no such device"));
    }
}
