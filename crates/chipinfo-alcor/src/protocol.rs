//! Alcor Micro vendor commands and response layouts

use zerocopy::byteorder::{BigEndian, U16};
use zerocopy::{FromBytes, Immutable, KnownLayout, Unaligned};

use chipinfo_core::error::{Error, Result};
use chipinfo_core::scsi::{Cdb, CdbSize, SECTOR_SIZE};

/// Controller status (chip id, firmware state, bad blocks)
pub const CMD_STATUS: u8 = 0x9A;
/// Vendor command group, sub-opcode in byte 1
pub const CMD_VENDOR: u8 = 0xFA;
/// Flash ID block (`FA 00`)
pub const SUB_FLASH_ID: u8 = 0x00;
/// Firmware version and chip revision (`FA 0E`)
pub const SUB_VERSION: u8 = 0x0E;
/// Extended firmware block (`FA 10`), missing on older chips
pub const SUB_EXT_VERSION: u8 = 0x10;
/// Raw NAND access on generation 0 parts
pub const CMD_NAND: u8 = 0xD0;

/// Channels queried by the raw NAND READ ID sequence
pub const LEGACY_CHANNELS: [u8; 4] = [0, 1, 3, 7];

/// Chips whose bad block counter is not scaled
pub const UNSCALED_BAD_BLOCK_CHIPS: [u16; 2] = [0x0C0E, 0xAA06];

/// Sectors transferred by `FA 10`
pub const EXT_VERSION_SECTORS: u32 = 18;

/// Marker in byte 0x2B of a valid firmware status block
const FW_STATUS_VALID: u8 = 0xAA;

/// Offset of the marker byte in the `FA 10` block
const EXT_MARKER_OFFSET: usize = 0xFFB;
/// Expected marker value
const EXT_MARKER: u8 = 0x51;
/// Offset of the extra version byte
const EXT_VERSION_OFFSET: usize = 0xFFA;

/// Offset of the revision byte in the `FA 0E` response
pub const REVISION_OFFSET: usize = 0x0B;

/// Leading part of the `9A` status response
#[derive(FromBytes, KnownLayout, Immutable, Unaligned)]
#[repr(C)]
struct StatusHeader {
    _reserved0: [u8; 4],
    chip: U16<BigEndian>,
    _reserved1: [u8; 0x1F],
    bad_blocks: u8,
    _reserved2: [u8; 5],
    fw_status: u8,
    fw_loaded: u8,
    fw_version: U16<BigEndian>,
    _reserved3: u8,
}

/// Decoded `9A` status response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    /// Chip id
    pub chip: u16,
    /// Raw bad block counter (byte 0x25)
    pub bad_blocks_raw: u8,
    /// Firmware is loaded; false when the status block is absent
    pub fw_loaded: bool,
    /// 16-bit firmware version used by generation 0 parts
    pub fw_version_legacy: u16,
}

impl Status {
    /// Decode a status response
    pub fn parse(data: &[u8]) -> Result<Self> {
        let (raw, _) = StatusHeader::read_from_prefix(data).map_err(|_| Error::ResponseTooShort {
            command: "Alcor 9A",
            expected: core::mem::size_of::<StatusHeader>(),
            actual: data.len(),
        })?;

        let valid = raw.fw_status == FW_STATUS_VALID;
        Ok(Self {
            chip: raw.chip.get(),
            bad_blocks_raw: raw.bad_blocks,
            fw_loaded: valid && raw.fw_loaded != 0,
            fw_version_legacy: if valid { raw.fw_version.get() } else { 0 },
        })
    }

    /// Bad block count
    ///
    /// Two early chips report the count directly; newer firmware counts in
    /// units of four and only once loaded.
    pub fn bad_blocks(&self) -> u32 {
        if UNSCALED_BAD_BLOCK_CHIPS.contains(&self.chip) {
            self.bad_blocks_raw.into()
        } else if self.fw_loaded {
            u32::from(self.bad_blocks_raw) * 4
        } else {
            0
        }
    }
}

/// `9A` status command
pub fn status_cdb() -> Cdb {
    Cdb::with_prefix(CdbSize::Cdb16, &[CMD_STATUS])
}

/// `FA 0E` version/revision command
pub fn version_cdb() -> Cdb {
    Cdb::with_prefix(CdbSize::Cdb16, &[CMD_VENDOR, SUB_VERSION])
}

/// `FA 00` flash ID command
pub fn flash_id_cdb() -> Cdb {
    Cdb::with_prefix(CdbSize::Cdb16, &[CMD_VENDOR, SUB_FLASH_ID])
}

/// `FA 10` extended version command over [`EXT_VERSION_SECTORS`] sectors
pub fn ext_version_cdb() -> Result<Cdb> {
    let mut cdb = Cdb::with_prefix(CdbSize::Cdb16, &[CMD_VENDOR, SUB_EXT_VERSION]);
    cdb.put_triplet_le(2, EXT_VERSION_SECTORS)?.put_byte(4, 0xC0)?;
    Ok(cdb)
}

/// Transfer length of `FA 10`
pub const fn ext_version_len() -> usize {
    EXT_VERSION_SECTORS as usize * SECTOR_SIZE
}

/// Raw NAND READ ID on one channel (generation 0)
///
/// The sequence is: command latch 0x90, address latch 0x00, read 4 bytes.
pub fn nand_id_cdb(channel: u8) -> Cdb {
    Cdb::with_prefix(
        CdbSize::Cdb16,
        &[CMD_NAND, channel, 0xF0, 0x90, 0xF1, 0x01, 0x00, 0xF2, 0x04],
    )
}

/// Combine bytes 4..8 of the `FA 0E` response into a firmware version
pub fn decode_version(data: &[u8]) -> Result<u64> {
    chipinfo_core::scsi::require_len(data, 8, "Alcor FA0E")?;
    let (b4, b5, b6, b7) = (
        u64::from(data[4]),
        u64::from(data[5]),
        u64::from(data[6]),
        u64::from(data[7]),
    );
    Ok(if b6 >= 0xF0 {
        (b6 << 24) | (b4 << 16) | (b5 << 8) | b7
    } else if b6 == 0x36 {
        (b6 << 24) | (b7 << 16) | (b4 << 8) | b5
    } else {
        (b6 << 8) | b7
    })
}

/// Merge the extra version byte from an `FA 10` block, if marked
pub fn apply_ext_version(version: u64, ext: &[u8]) -> u64 {
    match (ext.get(EXT_VERSION_OFFSET), ext.get(EXT_MARKER_OFFSET)) {
        (Some(&extra), Some(&EXT_MARKER)) => version | (u64::from(extra) << 32),
        _ => version,
    }
}

/// Render a firmware version
///
/// Short versions use 4 hex digits, long ones 8. Versions of the `F0xxxxxx`
/// class carry the extra byte as a `_XX` suffix.
pub fn format_version(version: u64) -> String {
    let mut s = if version <= 0xFFFF {
        format!("{:04X}", version)
    } else {
        format!("{:08X}", version & 0xFFFF_FFFF)
    };
    if version & 0xFF00_0000 == 0xF000_0000 {
        s.push_str(&format!("_{:02X}", version >> 32));
    }
    s
}

/// Render a generation 0 version as two decimal byte groups
pub fn format_legacy_version(version: u16) -> String {
    format!("{:02}{:02}", version >> 8, version & 0xFF)
}
