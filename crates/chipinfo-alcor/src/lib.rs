//! chipinfo-alcor - Alcor Micro USB flash controllers
//!
//! Alcor parts answer INQUIRY with a product revision of `8.00`, `8.01` or
//! `8.07`. Identification then goes through the vendor command set:
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `9A` | status: chip id, firmware state, bad block counter |
//! | `FA 0E` | firmware version bytes and chip revision |
//! | `FA 10` | extended firmware block (newer chips only) |
//! | `FA 00` | flash ID block |
//! | `D0 ch ...` | raw NAND READ ID per channel (generation 0) |
//!
//! The chip id alone is ambiguous; [`chips::ALCOR_CHIPS`] maps it, together
//! with the revision, to part names and to the firmware generation that
//! decides which commands apply.

pub mod chips;
mod controller;
pub mod protocol;

pub use controller::{Alcor, AlcorProbe, VENDOR};
