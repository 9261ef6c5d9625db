//! Emulated SCSI device

use chipinfo_core::error::TransportError;
use chipinfo_core::scsi::{Cdb, Direction, ScsiTransport, INQUIRY};

use crate::profiles;

/// SCSI status CHECK CONDITION
const CHECK_CONDITION: u8 = 0x02;
/// Linux DRIVER_SENSE, sense data is available
const DRIVER_SENSE: u16 = 0x08;

/// Configuration for the emulated device
#[derive(Debug, Clone)]
pub struct DummyConfig {
    /// Standard INQUIRY response
    pub inquiry: Vec<u8>,
    /// Capacity in bytes
    pub capacity: u64,
    /// Make the capacity query fail
    pub fail_capacity: bool,
    /// Canned data-in responses, first matching CDB prefix wins
    pub responses: Vec<(Vec<u8>, Vec<u8>)>,
    /// CDB prefixes that are rejected with CHECK CONDITION
    pub failing: Vec<Vec<u8>>,
}

impl Default for DummyConfig {
    fn default() -> Self {
        Self {
            inquiry: profiles::standard_inquiry(b"Generic ", b"Flash Disk      ", b"1.00"),
            capacity: 7_743_995_904,
            fail_capacity: false,
            responses: Vec::new(),
            failing: Vec::new(),
        }
    }
}

impl DummyConfig {
    /// Create the default (blank) configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the INQUIRY data
    pub fn with_inquiry(mut self, inquiry: Vec<u8>) -> Self {
        self.inquiry = inquiry;
        self
    }

    /// Set the capacity in bytes
    pub fn with_capacity(mut self, capacity: u64) -> Self {
        self.capacity = capacity;
        self
    }

    /// Make the capacity query fail
    pub fn with_failing_capacity(mut self) -> Self {
        self.fail_capacity = true;
        self
    }

    /// Answer commands starting with `prefix` with `data`
    pub fn with_response(mut self, prefix: &[u8], data: Vec<u8>) -> Self {
        self.responses.push((prefix.to_vec(), data));
        self
    }

    /// Reject commands starting with `prefix`
    pub fn with_failure(mut self, prefix: &[u8]) -> Self {
        self.failing.push(prefix.to_vec());
        self
    }
}

/// Emulated SCSI device
///
/// Every command is recorded. Commands with neither a canned response nor
/// a failure entry are rejected the way a real device rejects an unknown
/// vendor opcode.
pub struct DummyDevice {
    config: DummyConfig,
    sent: Vec<Cdb>,
}

impl DummyDevice {
    /// Create a device with the given configuration
    pub fn new(config: DummyConfig) -> Self {
        Self {
            config,
            sent: Vec::new(),
        }
    }

    /// Create a blank device
    pub fn new_default() -> Self {
        Self::new(DummyConfig::default())
    }

    /// Get the configuration
    pub fn config(&self) -> &DummyConfig {
        &self.config
    }

    /// Commands received so far
    pub fn commands(&self) -> &[Cdb] {
        &self.sent
    }

    /// Commands received so far whose CDB starts with `prefix`
    pub fn count(&self, prefix: &[u8]) -> usize {
        self.sent
            .iter()
            .filter(|c| c.as_bytes().starts_with(prefix))
            .count()
    }

    fn reject(cdb: &Cdb) -> TransportError {
        TransportError::CommandFailed {
            opcode: cdb.opcode(),
            status: CHECK_CONDITION,
            host_status: 0,
            driver_status: DRIVER_SENSE,
        }
    }
}

fn fill(buf: &mut [u8], data: &[u8]) -> usize {
    let n = buf.len().min(data.len());
    buf[..n].copy_from_slice(&data[..n]);
    n
}

impl ScsiTransport for DummyDevice {
    fn send(
        &mut self,
        cdb: &Cdb,
        buf: &mut [u8],
        direction: Direction,
    ) -> Result<usize, TransportError> {
        self.sent.push(*cdb);
        let bytes = cdb.as_bytes();
        log::trace!("dummy: [{}] {:?} {} bytes", cdb, direction, buf.len());

        if self.config.failing.iter().any(|p| bytes.starts_with(p)) {
            log::debug!("dummy: rejecting 0x{:02X}", cdb.opcode());
            return Err(Self::reject(cdb));
        }

        if let Some((_, data)) = self
            .config
            .responses
            .iter()
            .find(|(p, _)| bytes.starts_with(p))
        {
            return Ok(match direction {
                Direction::In => fill(buf, data),
                Direction::Out => buf.len(),
            });
        }

        if cdb.opcode() == INQUIRY && direction == Direction::In {
            return Ok(fill(buf, &self.config.inquiry));
        }

        Err(Self::reject(cdb))
    }

    fn capacity(&mut self) -> Result<u64, TransportError> {
        if self.config.fail_capacity {
            return Err(TransportError::Unsupported(
                "capacity query disabled".to_string(),
            ));
        }
        Ok(self.config.capacity)
    }
}

/// Parse device options from a list of key-value pairs
pub fn parse_options(options: &[(&str, &str)]) -> Result<DummyConfig, String> {
    let mut config = DummyConfig::default();
    let mut capacity = None;

    for (key, value) in options {
        match *key {
            "profile" => {
                config = profiles::by_name(value).ok_or_else(|| {
                    format!(
                        "Unknown dummy profile: {} (available: {})",
                        value,
                        profiles::NAMES.join(", ")
                    )
                })?;
            }
            "capacity" => {
                capacity = Some(
                    value
                        .parse::<u64>()
                        .map_err(|_| format!("Invalid capacity value: {}", value))?,
                );
            }
            _ => {
                log::warn!("dummy: Unknown option: {}={}", key, value);
            }
        }
    }

    if let Some(capacity) = capacity {
        config.capacity = capacity;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chipinfo_core::scsi::{inquiry, request, CdbSize};

    #[test]
    fn test_inquiry_and_capacity() {
        let mut dev = DummyDevice::new_default();
        let inq = inquiry(&mut dev).unwrap();
        assert_eq!(&inq[8..16], b"Generic ");
        assert_eq!(dev.capacity().unwrap(), 7_743_995_904);
        assert_eq!(dev.commands().len(), 1);
    }

    #[test]
    fn test_prefix_responses() {
        let config = DummyConfig::new()
            .with_response(&[0xD0, 0x00], vec![1; 4])
            .with_response(&[0xD0], vec![2; 4]);
        let mut dev = DummyDevice::new(config);

        let ch0 = Cdb::with_prefix(CdbSize::Cdb16, &[0xD0, 0x00, 0xF0]);
        let ch3 = Cdb::with_prefix(CdbSize::Cdb16, &[0xD0, 0x03, 0xF0]);
        assert_eq!(request(&mut dev, &ch0, 6).unwrap(), vec![1, 1, 1, 1, 0, 0]);
        assert_eq!(request(&mut dev, &ch3, 4).unwrap(), vec![2; 4]);
        assert_eq!(dev.count(&[0xD0]), 2);
    }

    #[test]
    fn test_unknown_and_failing_commands() {
        let config = DummyConfig::new()
            .with_response(&[0xFA, 0x10], vec![0; 16])
            .with_failure(&[0xFA, 0x10])
            .with_failing_capacity();
        let mut dev = DummyDevice::new(config);

        let fa10 = Cdb::with_prefix(CdbSize::Cdb16, &[0xFA, 0x10]);
        let unknown = Cdb::with_prefix(CdbSize::Cdb16, &[0xC6]);
        assert!(request(&mut dev, &fa10, 16).is_err());
        assert!(matches!(
            request(&mut dev, &unknown, 16),
            Err(chipinfo_core::Error::Transport(TransportError::CommandFailed {
                opcode: 0xC6,
                ..
            }))
        ));
        assert!(dev.capacity().is_err());
    }

    #[test]
    fn test_parse_options() {
        let config = parse_options(&[("profile", "phison"), ("capacity", "1024")]).unwrap();
        assert_eq!(&config.inquiry[0x24..0x28], b"PMAP");
        assert_eq!(config.capacity, 1024);

        assert!(parse_options(&[("profile", "nope")]).is_err());
        assert!(parse_options(&[("capacity", "lots")]).is_err());
        assert!(parse_options(&[]).unwrap().responses.is_empty());
    }
}
