//! NAND flash ID decoding
//!
//! Controllers report the raw READ ID bytes of each attached flash chip. The
//! first byte is the JEDEC manufacturer code; it also decides how many of the
//! following bytes are meaningful.

use core::fmt;

/// Known flash manufacturer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlashIdRecord {
    /// Manufacturer byte (first ID byte)
    pub maker_byte: u8,
    /// Manufacturer name
    pub maker_name: &'static str,
    /// Number of significant ID bytes
    pub significant_len: usize,
}

impl FlashIdRecord {
    const fn new(maker_byte: u8, maker_name: &'static str, significant_len: usize) -> Self {
        Self {
            maker_byte,
            maker_name,
            significant_len,
        }
    }
}

/// Known flash manufacturers
pub const FLASH_VENDORS: &[FlashIdRecord] = &[
    FlashIdRecord::new(0x98, "Toshiba", 8),
    FlashIdRecord::new(0x45, "Sandisk", 8),
    FlashIdRecord::new(0x2C, "Intel/Micron", 8),
    FlashIdRecord::new(0xEC, "Samsung", 6),
    FlashIdRecord::new(0xAD, "Hynix", 8),
    FlashIdRecord::new(0xC2, "Macronix", 6),
];

/// Name used for manufacturer bytes missing from [`FLASH_VENDORS`]
pub const UNKNOWN_MAKER: &str = "Unknown";

/// Significant length assumed for unknown manufacturers
pub const DEFAULT_ID_LEN: usize = 8;

/// Number of per-chip slots in a controller flash ID block
pub const FLASH_SLOTS: usize = 8;

/// Size of one slot
pub const SLOT_SIZE: usize = 16;

/// Look up a manufacturer byte
pub fn find_vendor(maker_byte: u8) -> Option<&'static FlashIdRecord> {
    FLASH_VENDORS.iter().find(|v| v.maker_byte == maker_byte)
}

/// A decoded flash ID
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashId {
    /// Manufacturer name, [`UNKNOWN_MAKER`] if not recognized
    pub maker: &'static str,
    /// Significant ID bytes (at most the manufacturer's significant length)
    pub id: Vec<u8>,
}

impl FlashId {
    /// Decode raw ID bytes
    pub fn decode(raw: &[u8]) -> Self {
        let (maker, len) = match raw.first().and_then(|&b| find_vendor(b)) {
            Some(v) => (v.maker_name, v.significant_len),
            None => (UNKNOWN_MAKER, DEFAULT_ID_LEN),
        };
        Self {
            maker,
            id: raw[..len.min(raw.len())].to_vec(),
        }
    }

    /// Number of significant bytes
    pub fn len(&self) -> usize {
        self.id.len()
    }

    /// True if no ID bytes were available
    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
    }

    /// Space separated upper-case hex of the significant bytes
    pub fn hex(&self) -> String {
        self.id
            .iter()
            .map(|b| format!("{:02X}", b))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for FlashId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.hex(), self.maker)
    }
}

/// Pick the populated chip slot out of a flash ID block
///
/// The block holds [`FLASH_SLOTS`] slots of [`SLOT_SIZE`] bytes starting at
/// `base`. A slot is populated if its first `key_len` bytes are not all
/// zero. Returns the first `window` bytes of the first populated slot, or of
/// slot 0 when none is. Slots cut short by the end of `data` are shortened.
pub fn pick_slot(data: &[u8], base: usize, key_len: usize, window: usize) -> &[u8] {
    let slot = |i: usize| -> &[u8] {
        let start = (base + i * SLOT_SIZE).min(data.len());
        let end = (start + window).min(data.len());
        &data[start..end]
    };

    (0..FLASH_SLOTS)
        .map(slot)
        .find(|s| s.iter().take(key_len).any(|&b| b != 0))
        .unwrap_or_else(|| slot(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_known_vendor() {
        let raw = [0x98, 0xD7, 0x84, 0x93, 0x72, 0x57, 0x08, 0x04, 0xAA, 0xBB];
        let fid = FlashId::decode(&raw);
        assert_eq!(fid.maker, "Toshiba");
        assert_eq!(fid.len(), 8);
        assert_eq!(fid.hex(), "98 D7 84 93 72 57 08 04");
        assert_eq!(fid.to_string(), "98 D7 84 93 72 57 08 04 (Toshiba)");
    }

    #[test]
    fn test_decode_short_id_vendor() {
        let fid = FlashId::decode(&[0xEC, 0xD7, 0x94, 0x7A, 0x54, 0x43, 0x00, 0x00]);
        assert_eq!(fid.maker, "Samsung");
        assert_eq!(fid.to_string(), "EC D7 94 7A 54 43 (Samsung)");
    }

    #[test]
    fn test_decode_unknown_vendor() {
        let fid = FlashId::decode(&[0x11, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
        assert_eq!(fid.maker, UNKNOWN_MAKER);
        assert_eq!(fid.len(), 8);
    }

    #[test]
    fn test_decode_truncated_input() {
        let fid = FlashId::decode(&[0x2C, 0x44]);
        assert_eq!(fid.maker, "Intel/Micron");
        assert_eq!(fid.id, vec![0x2C, 0x44]);
        assert!(FlashId::decode(&[]).is_empty());
    }

    #[test]
    fn test_pick_first_populated_slot() {
        let mut data = vec![0u8; 512];
        data[0x30 + 2 * SLOT_SIZE] = 0x45;
        data[0x30 + 2 * SLOT_SIZE + 1] = 0xDE;
        data[0x30 + 5 * SLOT_SIZE] = 0x98;

        let slot = pick_slot(&data, 0x30, 8, 16);
        assert_eq!(slot.len(), 16);
        assert_eq!(slot[..2], [0x45, 0xDE]);
    }

    #[test]
    fn test_pick_defaults_to_slot_zero() {
        let mut data = vec![0u8; 128];
        // populated only past the key bytes
        data[SLOT_SIZE + 7] = 0xFF;
        let slot = pick_slot(&data, 0, 6, 6);
        assert_eq!(slot, &[0u8; 6]);
    }

    #[test]
    fn test_pick_key_length() {
        let mut data = vec![0u8; 128];
        data[7] = 0x01;
        data[SLOT_SIZE] = 0xAD;
        assert_eq!(pick_slot(&data, 0, 8, 16)[7], 0x01);
        assert_eq!(pick_slot(&data, 0, 6, 6)[0], 0xAD);
    }
}
