//! Linux SG_IO device implementation
//!
//! This module provides the `LinuxSg` struct that implements the
//! `ScsiTransport` trait using the kernel's `sg_io_hdr` interface.

use crate::error::{LinuxSgError, Result};

use chipinfo_core::error::TransportError;
use chipinfo_core::scsi::{Cdb, Direction, ScsiTransport, MAX_CDB_LEN};

use libc::{c_int, c_void};
use std::fs::{File, OpenOptions};
use std::os::unix::io::AsRawFd;

/// Default command timeout in milliseconds
const DEFAULT_TIMEOUT_MS: u32 = 5000;

/// Sense buffer size handed to the kernel
const SENSE_LEN: usize = 32;

/// Linux SG_IO ioctl constants
mod ioctl {
    use super::SgIoHdr;

    const SG_IO: nix::sys::ioctl::ioctl_num_type = 0x2285;

    pub const SG_INTERFACE_ID: libc::c_int = b'S' as libc::c_int;
    pub const SG_DXFER_NONE: libc::c_int = -1;
    pub const SG_DXFER_TO_DEV: libc::c_int = -2;
    pub const SG_DXFER_FROM_DEV: libc::c_int = -3;

    /// `info & SG_INFO_OK_MASK` is zero when nothing went wrong
    pub const SG_INFO_OK_MASK: u32 = 0x1;

    nix::ioctl_readwrite_bad!(sg_io, SG_IO, SgIoHdr);

    // BLKGETSIZE64 is declared with size_t, but the kernel always stores a u64
    nix::ioctl_read_bad!(
        blk_getsize64,
        nix::request_code_read!(0x12, 114, std::mem::size_of::<usize>()),
        u64
    );
}

/// Request header for the SG_IO ioctl
/// This must match the kernel's struct sg_io_hdr layout
#[repr(C)]
#[derive(Debug)]
struct SgIoHdr {
    interface_id: c_int,    // int interface_id
    dxfer_direction: c_int, // int dxfer_direction
    cmd_len: u8,            // unsigned char cmd_len
    mx_sb_len: u8,          // unsigned char mx_sb_len
    iovec_count: u16,       // unsigned short iovec_count
    dxfer_len: u32,         // unsigned int dxfer_len
    dxferp: *mut c_void,    // void *dxferp
    cmdp: *const u8,        // unsigned char *cmdp
    sbp: *mut c_void,       // void *sbp
    timeout: u32,           // unsigned int timeout (ms)
    flags: u32,             // unsigned int flags
    pack_id: c_int,         // int pack_id
    usr_ptr: *mut c_void,   // void *usr_ptr
    status: u8,             // unsigned char status
    masked_status: u8,      // unsigned char masked_status
    msg_status: u8,         // unsigned char msg_status
    sb_len_wr: u8,          // unsigned char sb_len_wr
    host_status: u16,       // unsigned short host_status
    driver_status: u16,     // unsigned short driver_status
    resid: c_int,           // int resid
    duration: u32,          // unsigned int duration
    info: u32,              // unsigned int info
}

impl SgIoHdr {
    fn new() -> Self {
        Self {
            interface_id: ioctl::SG_INTERFACE_ID,
            dxfer_direction: ioctl::SG_DXFER_NONE,
            cmd_len: 0,
            mx_sb_len: 0,
            iovec_count: 0,
            dxfer_len: 0,
            dxferp: std::ptr::null_mut(),
            cmdp: std::ptr::null(),
            sbp: std::ptr::null_mut(),
            timeout: 0,
            flags: 0,
            pack_id: 0,
            usr_ptr: std::ptr::null_mut(),
            status: 0,
            masked_status: 0,
            msg_status: 0,
            sb_len_wr: 0,
            host_status: 0,
            driver_status: 0,
            resid: 0,
            duration: 0,
            info: 0,
        }
    }

    fn failed(&self) -> bool {
        self.info & ioctl::SG_INFO_OK_MASK != 0
            || self.status != 0
            || self.host_status != 0
            || self.driver_status != 0
    }
}

/// Configuration for opening a SCSI generic device
#[derive(Debug, Clone)]
pub struct LinuxSgConfig {
    /// Device path (e.g., "/dev/sdb" or "/dev/sg2")
    pub device: String,
    /// Per-command timeout in milliseconds (default: 5000)
    pub timeout_ms: u32,
}

impl Default for LinuxSgConfig {
    fn default() -> Self {
        Self {
            device: String::new(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl LinuxSgConfig {
    /// Create a new configuration with the given device path
    pub fn new(device: impl Into<String>) -> Self {
        Self {
            device: device.into(),
            ..Default::default()
        }
    }

    /// Set the per-command timeout in milliseconds
    pub fn with_timeout(mut self, timeout_ms: u32) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

/// SCSI passthrough transport using SG_IO
///
/// The device node is closed when the value is dropped.
#[derive(Debug)]
pub struct LinuxSg {
    /// File handle for the device node
    file: File,
    /// Device path, kept for error messages
    path: String,
    /// Per-command timeout in milliseconds
    timeout_ms: u32,
}

impl LinuxSg {
    /// Open a device with the given configuration
    pub fn open(config: &LinuxSgConfig) -> Result<Self> {
        if config.device.is_empty() {
            return Err(LinuxSgError::NoDevice);
        }
        if config.timeout_ms == 0 {
            return Err(LinuxSgError::InvalidParameter(
                "timeout must be non-zero".into(),
            ));
        }

        log::debug!("linux_sg: Opening device {}", config.device);

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&config.device)
            .map_err(|e| LinuxSgError::OpenFailed {
                path: config.device.clone(),
                source: e,
            })?;

        Ok(Self {
            file,
            path: config.device.clone(),
            timeout_ms: config.timeout_ms,
        })
    }

    /// Device path this transport was opened on
    pub fn path(&self) -> &str {
        &self.path
    }

    fn execute(&mut self, cdb: &Cdb, buf: &mut [u8], direction: Direction) -> Result<SgIoHdr> {
        let dxfer_len =
            u32::try_from(buf.len()).map_err(|_| LinuxSgError::TransferTooLarge(buf.len()))?;
        // Always hand the kernel a full 16 byte block; cmd_len bounds what is sent
        let cmd: [u8; MAX_CDB_LEN] = cdb.padded();
        let mut sense = [0u8; SENSE_LEN];

        let mut hdr = SgIoHdr::new();
        hdr.dxfer_direction = match direction {
            _ if buf.is_empty() => ioctl::SG_DXFER_NONE,
            Direction::In => ioctl::SG_DXFER_FROM_DEV,
            Direction::Out => ioctl::SG_DXFER_TO_DEV,
        };
        hdr.cmd_len = cdb.len() as u8;
        hdr.mx_sb_len = SENSE_LEN as u8;
        hdr.dxfer_len = dxfer_len;
        hdr.dxferp = if buf.is_empty() {
            std::ptr::null_mut()
        } else {
            buf.as_mut_ptr().cast()
        };
        hdr.cmdp = cmd.as_ptr();
        hdr.sbp = sense.as_mut_ptr().cast();
        hdr.timeout = self.timeout_ms;

        // SAFETY: every pointer in hdr refers to a buffer that outlives the call,
        // and the lengths passed match those buffers
        unsafe { ioctl::sg_io(self.file.as_raw_fd(), &mut hdr) }.map_err(|e| {
            LinuxSgError::IoctlFailed {
                opcode: cdb.opcode(),
                source: std::io::Error::from(e),
            }
        })?;

        if hdr.sb_len_wr > 0 {
            let n = (hdr.sb_len_wr as usize).min(SENSE_LEN);
            log::debug!(
                "linux_sg: sense for 0x{:02X}: {:02X?}",
                cdb.opcode(),
                &sense[..n]
            );
        }

        Ok(hdr)
    }
}

impl ScsiTransport for LinuxSg {
    fn send(
        &mut self,
        cdb: &Cdb,
        buf: &mut [u8],
        direction: Direction,
    ) -> std::result::Result<usize, TransportError> {
        let hdr = self.execute(cdb, buf, direction)?;

        if hdr.failed() {
            return Err(TransportError::CommandFailed {
                opcode: cdb.opcode(),
                status: hdr.status,
                host_status: hdr.host_status,
                driver_status: hdr.driver_status,
            });
        }

        let resid = usize::try_from(hdr.resid).unwrap_or(0);
        Ok(buf.len().saturating_sub(resid))
    }

    fn capacity(&mut self) -> std::result::Result<u64, TransportError> {
        let mut size: u64 = 0;
        // SAFETY: size is a valid u64 the kernel writes into
        unsafe { ioctl::blk_getsize64(self.file.as_raw_fd(), &mut size) }
            .map_err(|e| LinuxSgError::CapacityFailed(std::io::Error::from(e)))?;
        log::debug!("linux_sg: {} capacity {} bytes", self.path, size);
        Ok(size)
    }
}

/// Parse programmer options into a LinuxSgConfig
///
/// # Options
///
/// - `dev=/dev/sdX` - Required: device path
/// - `timeout=<ms>` - Optional: command timeout (default: 5000)
pub fn parse_options(options: &[(&str, &str)]) -> std::result::Result<LinuxSgConfig, String> {
    let mut config = LinuxSgConfig::default();

    for (key, value) in options {
        match *key {
            "dev" => {
                config.device = value.to_string();
            }
            "timeout" => {
                let timeout: u32 = value
                    .parse()
                    .map_err(|_| format!("Invalid timeout value: {}", value))?;
                if timeout == 0 {
                    return Err("Invalid timeout: must be non-zero".to_string());
                }
                config.timeout_ms = timeout;
            }
            _ => {
                log::warn!("linux_sg: Unknown option: {}={}", key, value);
            }
        }
    }

    if config.device.is_empty() {
        return Err(LinuxSgError::NoDevice.to_string());
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_device_and_timeout() {
        let config = parse_options(&[("dev", "/dev/sdb"), ("timeout", "10000")]).unwrap();
        assert_eq!(config.device, "/dev/sdb");
        assert_eq!(config.timeout_ms, 10000);
    }

    #[test]
    fn default_timeout() {
        let config = parse_options(&[("dev", "/dev/sg0")]).unwrap();
        assert_eq!(config.timeout_ms, DEFAULT_TIMEOUT_MS);
    }

    #[test]
    fn missing_device_is_rejected() {
        assert!(parse_options(&[("timeout", "100")]).is_err());
        assert!(parse_options(&[]).is_err());
    }

    #[test]
    fn bad_timeout_is_rejected() {
        assert!(parse_options(&[("dev", "/dev/sdb"), ("timeout", "soon")]).is_err());
        assert!(parse_options(&[("dev", "/dev/sdb"), ("timeout", "0")]).is_err());
    }

    #[test]
    fn unknown_options_are_ignored() {
        let config = parse_options(&[("dev", "/dev/sdb"), ("speed", "fast")]).unwrap();
        assert_eq!(config.device, "/dev/sdb");
    }

    #[test]
    fn open_missing_node_fails() {
        let err = LinuxSg::open(&LinuxSgConfig::new("/nonexistent/sdz")).unwrap_err();
        assert!(matches!(err, LinuxSgError::OpenFailed { .. }));
        assert!(matches!(
            LinuxSg::open(&LinuxSgConfig::default()),
            Err(LinuxSgError::NoDevice)
        ));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn header_matches_kernel_layout() {
        assert_eq!(std::mem::size_of::<SgIoHdr>(), 88);
        assert_eq!(std::mem::offset_of!(SgIoHdr, dxferp), 16);
        assert_eq!(std::mem::offset_of!(SgIoHdr, timeout), 40);
        assert_eq!(std::mem::offset_of!(SgIoHdr, status), 64);
        assert_eq!(std::mem::offset_of!(SgIoHdr, info), 80);
    }

    #[test]
    fn header_status_check() {
        let mut hdr = SgIoHdr::new();
        assert!(!hdr.failed());
        hdr.status = 0x02;
        assert!(hdr.failed());
        let mut hdr = SgIoHdr::new();
        hdr.info = 1;
        assert!(hdr.failed());
    }
}
