//! chipinfo-linux-sg - Linux SCSI generic passthrough
//!
//! This crate sends raw CDBs to USB mass storage devices through the
//! `SG_IO` ioctl, which the Linux block layer accepts on `/dev/sdX` as well
//! as on `/dev/sgN` nodes. Capacity comes from `BLKGETSIZE64`.
//!
//! # Example
//!
//! ```no_run
//! use chipinfo_core::scsi::{inquiry, ScsiTransport};
//! use chipinfo_linux_sg::{LinuxSg, LinuxSgConfig};
//!
//! let mut dev = LinuxSg::open(&LinuxSgConfig::new("/dev/sdb"))?;
//! let inq = inquiry(&mut dev)?;
//! println!("{} bytes of INQUIRY data, capacity {}", inq.len(), dev.capacity()?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Usage with chipinfo CLI
//!
//! ```bash
//! chipinfo identify /dev/sdb
//! chipinfo identify sg:dev=/dev/sg2,timeout=10000
//! ```
//!
//! # System Requirements
//!
//! - Read/write access to the device node
//! - Vendor opcodes are filtered by the kernel for unprivileged users, so
//!   in practice root or `CAP_SYS_RAWIO` is needed

pub mod device;
pub mod error;

pub use device::{parse_options, LinuxSg, LinuxSgConfig};
pub use error::{LinuxSgError, Result};

/// Open a device and return a boxed transport
///
/// This is a convenience function for the CLI device dispatch.
///
/// # Options
///
/// - `dev=/dev/sdX` - Required: device path
/// - `timeout=<ms>` - Optional: command timeout (default: 5000)
pub fn open_linux_sg(
    options: &[(&str, &str)],
) -> std::result::Result<Box<dyn chipinfo_core::scsi::ScsiTransport>, Box<dyn std::error::Error>> {
    let config = parse_options(options)?;
    let dev = LinuxSg::open(&config)?;
    Ok(Box::new(dev))
}
