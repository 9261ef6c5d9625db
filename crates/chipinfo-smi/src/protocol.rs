//! SMI vendor commands and response layout

use chipinfo_core::error::Result;
use chipinfo_core::scsi::{text_until_nul, require_len, Cdb, CdbSize};

/// Vendor command group
pub const CMD_VENDOR: u8 = 0xF0;
/// Controller info sector
pub const SUB_INFO: u8 = 0x2A;
/// Flash ID sector
pub const SUB_FLASH_ID: u8 = 0x06;

/// Offset of the flash ID slots in the `F0 06` response
pub const FLASH_ID_BASE: usize = 0x30;

const MODEL_OFFSET: usize = 0x1AE;
const MODEL_LEN: usize = 8;
const VERSION_OFFSET: usize = 0x190;

/// Vendor command transferring one sector (count in byte 11)
fn sector_cdb(sub: u8) -> Result<Cdb> {
    let mut cdb = Cdb::with_prefix(CdbSize::Cdb16, &[CMD_VENDOR, sub]);
    cdb.put_byte(11, 1)?;
    Ok(cdb)
}

/// `F0 2A` info command
pub fn info_cdb() -> Result<Cdb> {
    sector_cdb(SUB_INFO)
}

/// `F0 06` flash ID command
pub fn flash_id_cdb() -> Result<Cdb> {
    sector_cdb(SUB_FLASH_ID)
}

/// Decoded info sector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Info {
    /// Model, e.g. `SM3257EN`
    pub model: String,
    /// Firmware version string
    pub version: String,
}

impl Info {
    /// Decode an info sector, `None` without the `SM` model signature
    pub fn parse(data: &[u8]) -> Result<Option<Self>> {
        require_len(data, MODEL_OFFSET + MODEL_LEN, "SMI F02A")?;

        let model = &data[MODEL_OFFSET..MODEL_OFFSET + MODEL_LEN];
        if !model.starts_with(b"SM") {
            return Ok(None);
        }
        Ok(Some(Self {
            model: text_until_nul(model),
            version: text_until_nul(&data[VERSION_OFFSET..MODEL_OFFSET]),
        }))
    }
}
