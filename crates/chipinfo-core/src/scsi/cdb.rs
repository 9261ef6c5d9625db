//! Command descriptor block builder
//!
//! A [`Cdb`] is a zero-filled 12 or 16 byte command packet. Vendor commands
//! put sub-fields at fixed offsets in either byte order; the `put_*` helpers
//! write those fields and return the same builder so calls can be chained:
//!
//! ```ignore
//! let mut cdb = Cdb::with_prefix(CdbSize::Cdb16, &[0xFA, 0x10]);
//! cdb.put_triplet_le(2, 18)?.put_byte(4, 0xC0)?;
//! ```

use core::fmt;

use crate::error::{Error, Result};

/// Largest CDB any transport is handed
pub const MAX_CDB_LEN: usize = 16;

/// Command block length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CdbSize {
    /// 12-byte block (standard commands and most legacy vendor commands)
    Cdb12,
    /// 16-byte block
    Cdb16,
}

impl CdbSize {
    /// Length in bytes
    pub const fn len(self) -> usize {
        match self {
            CdbSize::Cdb12 => 12,
            CdbSize::Cdb16 => 16,
        }
    }
}

/// Byte order of a multi-byte CDB field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    /// Least significant byte first
    Little,
    /// Most significant byte first
    Big,
}

/// SCSI command descriptor block
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Cdb {
    bytes: [u8; MAX_CDB_LEN],
    len: usize,
}

impl Cdb {
    /// Create a zero-filled CDB
    pub fn new(size: CdbSize) -> Self {
        Self {
            bytes: [0; MAX_CDB_LEN],
            len: size.len(),
        }
    }

    /// Create a CDB whose leading bytes are copied from `prefix`
    ///
    /// Bytes beyond the CDB length are dropped.
    pub fn with_prefix(size: CdbSize, prefix: &[u8]) -> Self {
        let mut cdb = Self::new(size);
        let n = prefix.len().min(cdb.len);
        cdb.bytes[..n].copy_from_slice(&prefix[..n]);
        cdb
    }

    /// Declared length of the CDB
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false, a CDB has at least 12 bytes
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Operation code (byte 0)
    pub fn opcode(&self) -> u8 {
        self.bytes[0]
    }

    /// The CDB bytes, exactly `len()` long
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// The CDB zero-padded to [`MAX_CDB_LEN`] bytes
    pub fn padded(&self) -> [u8; MAX_CDB_LEN] {
        self.bytes
    }

    fn check(&self, offset: usize, size: usize) -> Result<()> {
        match offset.checked_add(size) {
            Some(end) if end <= self.len => Ok(()),
            _ => Err(Error::OutOfRange {
                offset,
                size,
                len: self.len,
            }),
        }
    }

    /// Write a single byte
    pub fn put_byte(&mut self, offset: usize, value: u8) -> Result<&mut Self> {
        self.check(offset, 1)?;
        self.bytes[offset] = value;
        Ok(self)
    }

    /// Write `size` bytes of `value` at `offset`
    ///
    /// With `size` of `None` the width is the minimum number of bytes that
    /// holds `value`. A zero value therefore writes nothing at all.
    pub fn put(
        &mut self,
        offset: usize,
        value: u64,
        size: Option<usize>,
        endian: Endian,
    ) -> Result<&mut Self> {
        let size = size.unwrap_or_else(|| significant_bytes(value));
        self.check(offset, size)?;

        let mut value = value;
        for i in 0..size {
            let pos = match endian {
                Endian::Little => offset + i,
                Endian::Big => offset + size - i - 1,
            };
            self.bytes[pos] = (value & 0xFF) as u8;
            value >>= 8;
        }
        Ok(self)
    }

    /// Write a little-endian 16-bit word
    pub fn put_word_le(&mut self, offset: usize, value: u16) -> Result<&mut Self> {
        self.put(offset, value.into(), Some(2), Endian::Little)
    }

    /// Write a big-endian 16-bit word
    pub fn put_word_be(&mut self, offset: usize, value: u16) -> Result<&mut Self> {
        self.put(offset, value.into(), Some(2), Endian::Big)
    }

    /// Write a little-endian 24-bit triplet
    pub fn put_triplet_le(&mut self, offset: usize, value: u32) -> Result<&mut Self> {
        self.put(offset, value.into(), Some(3), Endian::Little)
    }

    /// Write a big-endian 24-bit triplet
    pub fn put_triplet_be(&mut self, offset: usize, value: u32) -> Result<&mut Self> {
        self.put(offset, value.into(), Some(3), Endian::Big)
    }

    /// Write a little-endian 32-bit dword
    pub fn put_dword_le(&mut self, offset: usize, value: u32) -> Result<&mut Self> {
        self.put(offset, value.into(), Some(4), Endian::Little)
    }

    /// Write a big-endian 32-bit dword
    pub fn put_dword_be(&mut self, offset: usize, value: u32) -> Result<&mut Self> {
        self.put(offset, value.into(), Some(4), Endian::Big)
    }
}

fn significant_bytes(value: u64) -> usize {
    (64 - value.leading_zeros() as usize).div_ceil(8)
}

impl fmt::Debug for Cdb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cdb({})", self)
    }
}

impl fmt::Display for Cdb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, b) in self.as_bytes().iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{:02X}", b)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zeroed() {
        let cdb = Cdb::new(CdbSize::Cdb12);
        assert_eq!(cdb.len(), 12);
        assert!(cdb.as_bytes().iter().all(|&b| b == 0));
        assert_eq!(Cdb::new(CdbSize::Cdb16).as_bytes().len(), 16);
    }

    #[test]
    fn test_with_prefix_truncates() {
        let long = [0xAAu8; 20];
        let cdb = Cdb::with_prefix(CdbSize::Cdb12, &long);
        assert_eq!(cdb.as_bytes(), &[0xAA; 12]);
        assert_eq!(cdb.padded()[12..], [0; 4]);
    }

    #[test]
    fn test_word_endianness() {
        let mut cdb = Cdb::new(CdbSize::Cdb16);
        cdb.put(2, 0x1234, Some(2), Endian::Little).unwrap();
        assert_eq!(&cdb.as_bytes()[2..4], &[0x34, 0x12]);

        let mut cdb = Cdb::new(CdbSize::Cdb16);
        cdb.put(2, 0x1234, Some(2), Endian::Big).unwrap();
        assert_eq!(&cdb.as_bytes()[2..4], &[0x12, 0x34]);
    }

    #[test]
    fn test_fixed_width_wrappers() {
        let mut cdb = Cdb::new(CdbSize::Cdb16);
        cdb.put_triplet_be(1, 0x0A0B0C)
            .unwrap()
            .put_dword_le(4, 0x11223344)
            .unwrap()
            .put_word_be(8, 0xBEEF)
            .unwrap();
        assert_eq!(
            &cdb.as_bytes()[..10],
            &[0, 0x0A, 0x0B, 0x0C, 0x44, 0x33, 0x22, 0x11, 0xBE, 0xEF]
        );
    }

    #[test]
    fn test_values_wider_than_field_are_truncated() {
        let mut cdb = Cdb::new(CdbSize::Cdb12);
        cdb.put(0, 0x11223344, Some(2), Endian::Little).unwrap();
        assert_eq!(&cdb.as_bytes()[..3], &[0x44, 0x33, 0]);
    }

    #[test]
    fn test_inferred_size() {
        let mut cdb = Cdb::new(CdbSize::Cdb16);
        cdb.put(0, 0x012345, None, Endian::Big).unwrap();
        assert_eq!(&cdb.as_bytes()[..4], &[0x01, 0x23, 0x45, 0]);
    }

    #[test]
    fn test_inferred_size_of_zero_writes_nothing() {
        let mut cdb = Cdb::with_prefix(CdbSize::Cdb12, &[0xFF; 12]);
        cdb.put(3, 0, None, Endian::Little).unwrap();
        assert_eq!(cdb.as_bytes(), &[0xFF; 12]);
    }

    #[test]
    fn test_out_of_range() {
        let mut cdb = Cdb::new(CdbSize::Cdb12);
        assert!(matches!(
            cdb.put_dword_le(10, 1),
            Err(Error::OutOfRange {
                offset: 10,
                size: 4,
                len: 12
            })
        ));
        assert!(cdb.put_byte(12, 1).is_err());
        assert!(cdb.as_bytes().iter().all(|&b| b == 0));
        assert!(cdb.put_byte(11, 1).is_ok());
    }

    #[test]
    fn test_display() {
        let cdb = Cdb::with_prefix(CdbSize::Cdb12, &[0x12, 0, 0, 0, 0x38]);
        assert_eq!(cdb.to_string(), "12 00 00 00 38 00 00 00 00 00 00 00");
    }
}
