//! Helpers for fixed-layout vendor responses

use crate::error::{Error, Result};

/// Fail unless `data` holds at least `len` bytes
pub fn require_len(data: &[u8], len: usize, command: &'static str) -> Result<()> {
    if data.len() < len {
        return Err(Error::ResponseTooShort {
            command,
            expected: len,
            actual: data.len(),
        });
    }
    Ok(())
}

/// Big-endian 16-bit value at `offset`
///
/// The caller checks the length first.
pub fn be16(data: &[u8], offset: usize) -> u16 {
    u16::from_be_bytes([data[offset], data[offset + 1]])
}

/// Text up to the first NUL byte
///
/// Bytes are read as Latin-1, so each one maps to exactly one character.
pub fn text_until_nul(data: &[u8]) -> String {
    let end = data.iter().position(|&b| b == 0).unwrap_or(data.len());
    data[..end].iter().map(|&b| char::from(b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_until_nul() {
        assert_eq!(text_until_nul(b"SM3257\0\0junk"), "SM3257");
        assert_eq!(text_until_nul(b"no-nul"), "no-nul");
        assert_eq!(text_until_nul(b"\0abc"), "");
        assert_eq!(text_until_nul(b"v1.\xB5\xFF\0"), "v1.\u{B5}\u{FF}");
    }

    #[test]
    fn test_be16() {
        assert_eq!(be16(&[0, 0xBD, 0x06], 1), 0xBD06);
    }

    #[test]
    fn test_require_len() {
        assert!(require_len(&[0; 4], 4, "test").is_ok());
        assert!(matches!(
            require_len(&[0; 3], 4, "test"),
            Err(Error::ResponseTooShort {
                expected: 4,
                actual: 3,
                ..
            })
        ));
    }
}
