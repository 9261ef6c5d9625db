//! Built-in emulated devices
//!
//! Each profile mimics what one kind of drive answers to the commands the
//! decoders send. The byte layouts follow the controllers' vendor responses.

use crate::device::DummyConfig;

/// Names accepted by [`by_name`]
pub const NAMES: &[&str] = &[
    "blank",
    "alcor",
    "alcor-legacy",
    "phison",
    "smi",
    "broken",
];

/// Look up a profile
pub fn by_name(name: &str) -> Option<DummyConfig> {
    match name {
        "blank" => Some(DummyConfig::default()),
        "alcor" => Some(alcor()),
        "alcor-legacy" | "alcor_legacy" => Some(alcor_legacy()),
        "phison" => Some(phison()),
        "smi" => Some(smi()),
        "broken" => Some(broken()),
        _ => None,
    }
}

/// 0x38-byte INQUIRY response with the given identification strings
pub fn standard_inquiry(vendor: &[u8; 8], product: &[u8; 16], revision: &[u8; 4]) -> Vec<u8> {
    let mut inq = vec![0u8; 0x38];
    inq[1] = 0x80; // removable
    inq[2] = 0x04; // SPC-2
    inq[3] = 0x02;
    inq[4] = 0x1F;
    inq[8..16].copy_from_slice(vendor);
    inq[16..32].copy_from_slice(product);
    inq[32..36].copy_from_slice(revision);
    inq
}

fn put(buf: &mut [u8], offset: usize, bytes: &[u8]) {
    buf[offset..offset + bytes.len()].copy_from_slice(bytes);
}

/// Alcor INQUIRY: revision field reads "8.07"
pub fn alcor_inquiry() -> Vec<u8> {
    standard_inquiry(b"Generic ", b"Mass-Storage    ", b"8.07")
}

/// AU6983/AU6986 (chip BD06 rev 08) with firmware loaded
pub fn alcor() -> DummyConfig {
    let mut status = vec![0u8; 512];
    put(&mut status, 4, &[0xBD, 0x06]);
    status[0x25] = 3;
    status[0x2B] = 0xAA;
    status[0x2C] = 1;
    put(&mut status, 0x2D, &[0x01, 0x02]);

    let mut version = vec![0u8; 512];
    put(&mut version, 4, &[0x12, 0x34, 0xF5, 0x78]);
    version[0x0B] = 0x08;

    let mut fids = vec![0u8; 512];
    put(&mut fids, 16, &[0x98, 0xD7, 0x84, 0x93, 0x72, 0x57, 0x08, 0x04]);

    DummyConfig::new()
        .with_inquiry(alcor_inquiry())
        .with_capacity(15_518_924_800)
        .with_response(&[0x9A], status)
        .with_response(&[0xFA, 0x0E], version)
        .with_failure(&[0xFA, 0x10])
        .with_response(&[0xFA, 0x00], fids)
}

/// AU9386 (chip 0C0E), generation 0 firmware "0705"
pub fn alcor_legacy() -> DummyConfig {
    let mut status = vec![0u8; 512];
    put(&mut status, 4, &[0x0C, 0x0E]);
    status[0x25] = 5;
    status[0x2B] = 0xAA;
    status[0x2C] = 1;
    put(&mut status, 0x2D, &[0x07, 0x05]);

    let mut ch0 = vec![0u8; 512];
    put(&mut ch0, 0, &[0xEC, 0xD7, 0x94, 0x7A, 0x54, 0x43]);

    DummyConfig::new()
        .with_inquiry(standard_inquiry(b"Generic ", b"USB Flash Disk  ", b"8.01"))
        .with_capacity(1_014_497_280)
        .with_response(&[0x9A], status)
        .with_failure(&[0xFA, 0x0E])
        .with_response(&[0xD0, 0x00], ch0)
        .with_response(&[0xD0], vec![0u8; 512])
}

/// Phison PS2251 with info page and a Sandisk flash
pub fn phison() -> DummyConfig {
    let mut inq = standard_inquiry(b"USB DISK", b" 2.0            ", b"1100");
    put(&mut inq, 0x24, b"PMAP");

    let mut info = vec![0u8; 528];
    put(&mut info, 0x94, &[1, 0x02, 0x03, 19, 10, 27]);
    put(&mut info, 0x9C, b"USB DISK 2.0\0");
    info[0xF5] = 0x30;
    put(&mut info, 0x17E, &[0x22, 0x51]);
    info[0x1C6] = 0x0D;
    put(&mut info, 512, b"IF");

    let mut fids = vec![0u8; 512];
    put(&mut fids, 0, &[0x45, 0xDE, 0x94, 0x93, 0x76, 0x50, 0x00, 0x00]);

    DummyConfig::new()
        .with_inquiry(inq)
        .with_capacity(31_004_295_168)
        .with_response(&[0x06, 0x05], info)
        .with_response(&[0x06, 0x56], fids)
}

/// SMI SM3257EN with a Micron flash
pub fn smi() -> DummyConfig {
    let mut inq = standard_inquiry(b"SMI Corp", b"USB DISK        ", b"1100");
    put(&mut inq, 0x35, b"smi");

    let mut info = vec![0u8; 512];
    put(&mut info, 0x190, b"ISP 180514-AA-\0");
    put(&mut info, 0x1AE, b"SM3257ENBA");

    let mut fids = vec![0u8; 512];
    put(&mut fids, 0x30, &[0x2C, 0x88, 0x01, 0xA7, 0xA9, 0x00, 0x00, 0x00]);

    DummyConfig::new()
        .with_inquiry(inq)
        .with_capacity(62_008_590_336)
        .with_response(&[0xF0, 0x2A], info)
        .with_response(&[0xF0, 0x06], fids)
}

/// Alcor-tagged drive that rejects every vendor command
pub fn broken() -> DummyConfig {
    DummyConfig::new()
        .with_inquiry(alcor_inquiry())
        .with_capacity(4_009_754_624)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_profiles_resolve() {
        for name in NAMES {
            let config = by_name(name).unwrap();
            assert_eq!(config.inquiry.len(), 0x38, "{}", name);
        }
        assert!(by_name("unknown").is_none());
    }

    #[test]
    fn test_alcor_tag() {
        assert_eq!(&alcor().inquiry[0x20..0x24], b"8.07");
        assert_eq!(&alcor_legacy().inquiry[0x20..0x24], b"8.01");
    }
}
