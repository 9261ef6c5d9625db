//! SCSI command layer
//!
//! Everything needed to issue a command to a device: the [`Cdb`] builder, the
//! [`ScsiTransport`] port implemented by device backends, standard INQUIRY,
//! and small helpers for picking fields out of fixed-layout responses.

mod cdb;
mod inquiry;
mod response;
mod transport;

pub use cdb::{Cdb, CdbSize, Endian, MAX_CDB_LEN};
pub use inquiry::{inquiry, inquiry_cdb, InquiryData, INQUIRY, INQUIRY_LEN};
pub use response::{text_until_nul, be16, require_len};
pub use transport::{request, Direction, DumpTransport, ScsiTransport, SECTOR_SIZE};
