//! Error types for Linux SG_IO operations

use chipinfo_core::error::TransportError;
use thiserror::Error;

/// Linux SG_IO specific errors
#[derive(Debug, Error)]
pub enum LinuxSgError {
    /// Failed to open device
    #[error("Failed to open {path}: {source}")]
    OpenFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The SG_IO ioctl itself failed
    #[error("SG_IO failed for command 0x{opcode:02X}: {source}")]
    IoctlFailed {
        opcode: u8,
        #[source]
        source: std::io::Error,
    },

    /// Capacity query failed
    #[error("BLKGETSIZE64 failed: {0}")]
    CapacityFailed(#[source] std::io::Error),

    /// Transfer too large for a single request
    #[error("Transfer of {0} bytes is too large")]
    TransferTooLarge(usize),

    /// Invalid parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Device not specified
    #[error("No device specified. Use dev=/dev/sdX")]
    NoDevice,
}

impl From<LinuxSgError> for TransportError {
    fn from(e: LinuxSgError) -> Self {
        match e {
            LinuxSgError::OpenFailed { path, source } => TransportError::Open { path, source },
            LinuxSgError::IoctlFailed { source, .. } | LinuxSgError::CapacityFailed(source) => {
                TransportError::Io(source)
            }
            other => TransportError::Unsupported(other.to_string()),
        }
    }
}

/// Result type for Linux SG_IO operations
pub type Result<T> = std::result::Result<T, LinuxSgError>;
