//! Phison vendor commands and info page layout

use chipinfo_core::error::Result;
use chipinfo_core::scsi::{text_until_nul, require_len, Cdb, CdbSize, SECTOR_SIZE};

/// Vendor command group
pub const CMD_VENDOR: u8 = 0x06;
/// Info page
pub const SUB_INFO: u8 = 0x05;
/// Flash ID block
pub const SUB_FLASH_ID: u8 = 0x56;

/// Info page length: one sector plus a 16-byte trailer
pub const INFO_LEN: usize = SECTOR_SIZE + 16;

/// Longest info page sub-tag that fits the CDB
pub const MAX_TAG_LEN: usize = 10;

/// Trailer signature at offset 512 of the info page
const INFO_MARK: &[u8] = b"IF";

/// `06 05` info page command with an optional sub-tag in bytes 2..12
///
/// Tags longer than [`MAX_TAG_LEN`] are cut.
pub fn info_cdb(tag: &str) -> Cdb {
    let mut prefix = vec![CMD_VENDOR, SUB_INFO];
    prefix.extend(tag.bytes().take(MAX_TAG_LEN));
    Cdb::with_prefix(CdbSize::Cdb12, &prefix)
}

/// `06 56` flash ID command
pub fn flash_id_cdb() -> Cdb {
    Cdb::with_prefix(CdbSize::Cdb12, &[CMD_VENDOR, SUB_FLASH_ID])
}

/// Decoded info page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoPage {
    /// Chip id byte
    pub chip: u8,
    /// Model, e.g. `PS2251 (0x0D)`
    pub model: String,
    /// Product string
    pub product: String,
    /// Firmware version, e.g. `1.02.03`
    pub version: String,
    /// Firmware build date, `YY/MM/DD`
    pub date: String,
    /// USB specification byte in hex
    pub usb: String,
    /// Trailer signature present
    pub marked: bool,
}

impl InfoPage {
    /// Decode an info page
    pub fn parse(data: &[u8]) -> Result<Self> {
        require_len(data, 0x1C7, "Phison 0605")?;

        let chip = data[0x1C6];
        Ok(Self {
            chip,
            model: format!("PS{:02X}{:02X} (0x{:02X})", data[0x17E], data[0x17F], chip),
            product: text_until_nul(&data[0x9C..0xAC]),
            version: format!("{}.{:02X}.{:02X}", data[0x94], data[0x95], data[0x96]),
            date: format!("{:02}/{:02}/{:02}", data[0x97], data[0x98], data[0x99]),
            usb: format!("{:X}", data[0xF5]),
            marked: data.len() != INFO_LEN || &data[SECTOR_SIZE..SECTOR_SIZE + 2] == INFO_MARK,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_cdb() {
        assert_eq!(info_cdb("").as_bytes()[..3], [0x06, 0x05, 0x00]);

        let cdb = info_cdb("INFOBLOCK-EXTRA");
        assert_eq!(cdb.len(), 12);
        assert_eq!(&cdb.as_bytes()[2..12], b"INFOBLOCK-");
    }

    #[test]
    fn test_parse_info_page() {
        let mut data = vec![0u8; INFO_LEN];
        data[0x94..0x9A].copy_from_slice(&[1, 0x02, 0x03, 19, 10, 27]);
        data[0x9C..0xA9].copy_from_slice(b"USB DISK 2.0\0");
        data[0xF5] = 0x30;
        data[0x17E] = 0x22;
        data[0x17F] = 0x51;
        data[0x1C6] = 0x0D;

        let page = InfoPage::parse(&data).unwrap();
        assert_eq!(page.model, "PS2251 (0x0D)");
        assert_eq!(page.product, "USB DISK 2.0");
        assert_eq!(page.version, "1.02.03");
        assert_eq!(page.date, "19/10/27");
        assert_eq!(page.usb, "30");
        assert!(!page.marked);

        data[512..514].copy_from_slice(b"IF");
        assert!(InfoPage::parse(&data).unwrap().marked);
    }

    #[test]
    fn test_parse_short_page() {
        assert!(InfoPage::parse(&[0u8; 0x100]).is_err());
    }
}
