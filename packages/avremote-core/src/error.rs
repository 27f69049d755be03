//! Centralized error types for the receiver control library.
//!
//! The transport error itself lives with the SOAP code (`upnp::soap`); this
//! module adds machine-readable codes for hosts that report failures.

pub use crate::upnp::soap::{FaultKind, SoapError, SoapResult};

/// Trait for error types that provide machine-readable error codes.
///
/// Implement this trait to provide consistent error codes across different
/// error conversion paths.
pub trait ErrorCode {
    /// Returns a machine-readable error code.
    fn code(&self) -> &'static str;
}

impl ErrorCode for SoapError {
    fn code(&self) -> &'static str {
        match self.kind() {
            FaultKind::Configuration => "device_not_configured",
            FaultKind::Network => "http_request_failed",
            FaultKind::Http(_) => "http_error_status",
            FaultKind::Upnp(_) => "upnp_fault",
        }
    }
}
