//! chipinfo-dummy - Example decoder and emulated SCSI device
//!
//! [`Dummy`] is the smallest possible controller decoder. It never claims a
//! device unless told to with `detect=yes` and then reports a fixed model.
//!
//! [`DummyDevice`] is a scriptable SCSI device: canned INQUIRY data and
//! capacity, responses keyed by CDB prefix, and commands that fail on
//! purpose. The decoder crates test against it, and the CLI exposes it as
//! the `dummy` device with a handful of built-in [`profiles`].
//!
//! # Usage with chipinfo CLI
//!
//! ```bash
//! # Emulated Alcor drive
//! chipinfo identify dummy:profile=alcor
//!
//! # Let the Dummy decoder claim it as well
//! chipinfo identify dummy:profile=blank -o dummy:detect=yes
//! ```

mod controller;
mod device;
pub mod profiles;

pub use controller::{Dummy, DummyProbe};
pub use device::{parse_options, DummyConfig, DummyDevice};

/// Open an emulated device from `key=value` options
///
/// This is a convenience function for the CLI device dispatch.
///
/// # Options
///
/// - `profile=<name>` - Built-in profile (default: `blank`)
/// - `capacity=<bytes>` - Override the reported capacity
pub fn open_dummy(
    options: &[(&str, &str)],
) -> std::result::Result<Box<dyn chipinfo_core::scsi::ScsiTransport>, Box<dyn std::error::Error>> {
    let config = parse_options(options)?;
    Ok(Box::new(DummyDevice::new(config)))
}
