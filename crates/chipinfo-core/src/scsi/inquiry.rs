//! Standard INQUIRY

use zerocopy::{FromBytes, Immutable, KnownLayout};

use super::cdb::{Cdb, CdbSize};
use super::transport::{request, ScsiTransport};
use crate::error::Result;

/// INQUIRY operation code
pub const INQUIRY: u8 = 0x12;

/// Allocation length requested from the device
///
/// Vendor tags live past the standard 36-byte header, so ask for more.
pub const INQUIRY_LEN: usize = 0x38;

/// Build an INQUIRY CDB for `len` bytes of standard data
pub fn inquiry_cdb(len: u8) -> Cdb {
    Cdb::with_prefix(CdbSize::Cdb12, &[INQUIRY, 0, 0, 0, len])
}

/// Fetch the raw INQUIRY response
pub fn inquiry<D: ScsiTransport + ?Sized>(dev: &mut D) -> Result<Vec<u8>> {
    request(dev, &inquiry_cdb(INQUIRY_LEN as u8), INQUIRY_LEN)
}

#[derive(FromBytes, KnownLayout, Immutable)]
#[repr(C)]
struct StandardInquiry {
    peripheral: u8,
    rmb: u8,
    version: u8,
    response_format: u8,
    additional_length: u8,
    flags: [u8; 3],
    vendor: [u8; 8],
    product: [u8; 16],
    revision: [u8; 4],
}

/// Decoded standard INQUIRY header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InquiryData {
    /// Peripheral device type (0 = direct access block device)
    pub device_type: u8,
    /// Removable medium bit
    pub removable: bool,
    /// T10 vendor identification
    pub vendor: String,
    /// Product identification
    pub product: String,
    /// Product revision level
    pub revision: String,
}

impl InquiryData {
    /// Decode the 36-byte standard header, `None` if the data is shorter
    pub fn parse(data: &[u8]) -> Option<Self> {
        let (raw, _) = StandardInquiry::read_from_prefix(data).ok()?;
        Some(Self {
            device_type: raw.peripheral & 0x1F,
            removable: raw.rmb & 0x80 != 0,
            vendor: trimmed(&raw.vendor),
            product: trimmed(&raw.product),
            revision: trimmed(&raw.revision),
        })
    }
}

fn trimmed(field: &[u8]) -> String {
    let text: String = field.iter().map(|&b| char::from(b)).collect();
    text.trim_end_matches(['\0', ' ']).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inquiry_cdb() {
        let cdb = inquiry_cdb(0x38);
        assert_eq!(cdb.len(), 12);
        assert_eq!(cdb.as_bytes()[..5], [0x12, 0, 0, 0, 0x38]);
    }

    #[test]
    fn test_parse_standard_header() {
        let mut data = vec![0u8; INQUIRY_LEN];
        data[1] = 0x80;
        data[8..16].copy_from_slice(b"Generic ");
        data[16..32].copy_from_slice(b"Flash Disk      ");
        data[32..36].copy_from_slice(b"8.07");

        let inq = InquiryData::parse(&data).unwrap();
        assert_eq!(inq.device_type, 0);
        assert!(inq.removable);
        assert_eq!(inq.vendor, "Generic");
        assert_eq!(inq.product, "Flash Disk");
        assert_eq!(inq.revision, "8.07");
    }

    #[test]
    fn test_parse_short() {
        assert!(InquiryData::parse(&[0u8; 35]).is_none());
    }
}
