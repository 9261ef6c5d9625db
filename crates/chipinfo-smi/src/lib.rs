//! chipinfo-smi - Silicon Motion USB flash controllers
//!
//! SMI firmware puts `smi` into its INQUIRY data, at offset 5 on older parts
//! and at 0x35 on newer ones. Vendor command `F0 2A` returns a sector with
//! the model and firmware strings; `F0 06` returns the flash ID block.

mod controller;
pub mod protocol;

pub use controller::{Smi, SmiProbe, VENDOR};
