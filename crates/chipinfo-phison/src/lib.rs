//! chipinfo-phison - Phison USB flash controllers
//!
//! Phison firmware marks its INQUIRY data with `PMAP` at offset 0x24. The
//! controller is then identified from the 528-byte info page returned by
//! vendor command `06 05`, and the flash IDs come from `06 56`.

mod controller;
pub mod protocol;

pub use controller::{Phison, PhisonProbe, VENDOR};
