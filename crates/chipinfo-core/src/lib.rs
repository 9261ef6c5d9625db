//! chipinfo-core - Core library for USB flash controller identification
//!
//! This crate provides the pieces shared by every controller decoder:
//! building SCSI command descriptor blocks, talking to a device through a
//! passthrough transport, decoding NAND flash IDs, and collecting the
//! findings into an ordered report.
//!
//! Controller decoders implement [`controller::ControllerDriver`]. They only
//! ever see a [`scsi::ScsiTransport`], so the same decoder runs against a
//! real block device or against an emulated one in tests.
//!
//! # Example
//!
//! ```ignore
//! use chipinfo_core::scsi::{self, Cdb, CdbSize, ScsiTransport};
//!
//! fn read_status(dev: &mut dyn ScsiTransport) -> chipinfo_core::Result<Vec<u8>> {
//!     let cdb = Cdb::with_prefix(CdbSize::Cdb16, &[0x9A]);
//!     scsi::request(dev, &cdb, 512)
//! }
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod chip;
pub mod controller;
pub mod error;
pub mod flash;
pub mod report;
pub mod scsi;

pub use error::{Error, Result, TransportError};
