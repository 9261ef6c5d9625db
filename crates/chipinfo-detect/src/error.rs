//! Error types for device opening and controller selection

use thiserror::Error;

/// Detection and registry errors
#[derive(Debug, Error)]
pub enum DetectError {
    /// Device spec could not be parsed
    #[error("Invalid device spec '{spec}': {reason}")]
    InvalidDeviceSpec {
        /// The spec as given
        spec: String,
        /// What is wrong with it
        reason: String,
    },

    /// No backend with that name is compiled in
    #[error("Unknown device backend: {name} (available: {available})")]
    UnknownBackend {
        /// Requested backend
        name: String,
        /// Compiled-in backends
        available: String,
    },

    /// The backend failed to open the device
    #[error("Failed to open device {device}: {message}")]
    OpenFailed {
        /// Device spec
        device: String,
        /// Backend error
        message: String,
    },

    /// No controller decoder with that name
    #[error("Unknown controller: {name} (available: {available})")]
    UnknownController {
        /// Requested controller
        name: String,
        /// Registered controllers
        available: String,
    },

    /// Controller option not in `CTRL:key=value` form
    #[error("Invalid controller option '{0}' (expected CTRL:key=value)")]
    InvalidOption(String),

    /// Error from a decoder or the transport
    #[error(transparent)]
    Core(#[from] chipinfo_core::Error),
}

impl From<chipinfo_core::TransportError> for DetectError {
    fn from(e: chipinfo_core::TransportError) -> Self {
        DetectError::Core(e.into())
    }
}

/// Result type for detection operations
pub type Result<T> = std::result::Result<T, DetectError>;
