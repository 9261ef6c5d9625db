//! Error types for chipinfo operations

use thiserror::Error;

use crate::chip::ChipDbError;

/// Failures reported by a device transport
///
/// Any of these aborts the current run; the caller turns it into a single
/// `Error` report entry.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Failed to open the device node
    #[error("Failed to open {path}: {source}")]
    Open {
        /// Device path
        path: String,
        /// Underlying OS error
        #[source]
        source: std::io::Error,
    },

    /// The device or the host adapter rejected a command
    #[error(
        "Command 0x{opcode:02X} failed (status=0x{status:02X}, host=0x{host_status:04X}, driver=0x{driver_status:04X})"
    )]
    CommandFailed {
        /// Opcode of the failing CDB
        opcode: u8,
        /// SCSI status byte
        status: u8,
        /// Host adapter status
        host_status: u16,
        /// Driver status
        driver_status: u16,
    },

    /// The passthrough call itself failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The transport cannot perform the request
    #[error("Unsupported: {0}")]
    Unsupported(String),
}

/// Core error type
#[derive(Debug, Error)]
pub enum Error {
    /// Device transport failure
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A CDB field does not fit inside the command block
    #[error("CDB field at offset {offset} with size {size} exceeds CDB length {len}")]
    OutOfRange {
        /// Field offset
        offset: usize,
        /// Field size in bytes
        size: usize,
        /// CDB length
        len: usize,
    },

    /// A response was shorter than the decoder requires
    #[error("Response to {command} too short: expected {expected} bytes, got {actual}")]
    ResponseTooShort {
        /// Human readable command name
        command: &'static str,
        /// Minimum length needed
        expected: usize,
        /// Length received
        actual: usize,
    },

    /// A controller was given a parameter it does not know
    #[error("Unknown parameter '{key}' for controller {controller}")]
    UnknownParameter {
        /// Controller name
        controller: &'static str,
        /// Parameter key
        key: String,
    },

    /// A controller parameter value could not be parsed
    #[error("Invalid value '{value}' for parameter '{key}'")]
    InvalidParameter {
        /// Parameter key
        key: String,
        /// Offending value
        value: String,
    },

    /// Chip database error
    #[error(transparent)]
    ChipDb(#[from] ChipDbError),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;
