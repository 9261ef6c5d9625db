//! SMI controller decoder

use chipinfo_core::controller::{controller_name, has_tag, ControllerDriver};
use chipinfo_core::error::Result;
use chipinfo_core::flash::pick_slot;
use chipinfo_core::report::{FormatKind, Report, Value};
use chipinfo_core::scsi::{request, ScsiTransport, SECTOR_SIZE};

use crate::protocol::{self, Info, FLASH_ID_BASE};

/// Vendor name
pub const VENDOR: &str = "SMI";

/// Silicon Motion decoder
#[derive(Debug, Clone, Default)]
pub struct Smi;

/// State gathered about one SMI device
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SmiProbe {
    /// Decoded info sector
    pub info: Option<Info>,
}

impl Smi {
    /// Create the decoder
    pub fn new() -> Self {
        Self
    }
}

impl ControllerDriver for Smi {
    type Probe = SmiProbe;

    fn name(&self) -> &'static str {
        "SMI"
    }

    fn description(&self) -> &'static str {
        "Silicon Motion SM32xx USB flash controllers"
    }

    fn shallow_detect(&self, inquiry: &[u8], force: bool) -> Option<SmiProbe> {
        if has_tag(inquiry, 5, b"smi") || has_tag(inquiry, 0x35, b"smi") {
            return Some(SmiProbe::default());
        }
        log::debug!("smi: no smi tag found in inquiry data");
        force.then(SmiProbe::default)
    }

    fn deep_detect(
        &self,
        dev: &mut dyn ScsiTransport,
        probe: &mut SmiProbe,
        _force: bool,
    ) -> Result<bool> {
        let data = request(dev, &protocol::info_cdb()?, SECTOR_SIZE)?;
        probe.info = Info::parse(&data)?;
        match &probe.info {
            Some(info) => {
                log::debug!("smi: model {}, firmware {}", info.model, info.version);
                Ok(true)
            }
            None => {
                log::debug!("smi: no SM signature in info sector");
                Ok(false)
            }
        }
    }

    fn process_device(
        &self,
        dev: &mut dyn ScsiTransport,
        probe: &mut SmiProbe,
        report: &mut Report,
    ) -> Result<()> {
        let (model, version) = match &probe.info {
            Some(info) => (info.model.as_str(), info.version.as_str()),
            None => ("Unknown", ""),
        };
        report.add("Controller", controller_name(VENDOR, model));
        report.add("Firmware", version);

        match request(dev, &protocol::flash_id_cdb()?, SECTOR_SIZE) {
            Ok(block) => {
                let fid = pick_slot(&block, FLASH_ID_BASE, 8, 16);
                report.add_formatted("Flash ID", fid, FormatKind::FlashId);
            }
            Err(e) => {
                log::debug!("smi: flash ID read failed: {}", e);
                report.add("Flash ID", Value::Unavailable);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chipinfo_dummy::{profiles, DummyConfig, DummyDevice};

    #[test]
    fn test_shallow_detect_offsets() {
        let smi = Smi::new();
        let mut inq = vec![0u8; 0x38];
        assert!(smi.shallow_detect(&inq, false).is_none());

        inq[5..8].copy_from_slice(b"smi");
        assert!(smi.shallow_detect(&inq, false).is_some());

        let mut inq = vec![0u8; 0x38];
        inq[0x35..0x38].copy_from_slice(b"smi");
        assert!(smi.shallow_detect(&inq, false).is_some());
        assert!(smi.shallow_detect(&inq[..0x37], false).is_none());
    }

    #[test]
    fn test_deep_detect_requires_signature() {
        let config = DummyConfig::new().with_response(&[0xF0, 0x2A], vec![0u8; 512]);
        let mut dev = DummyDevice::new(config);
        let mut probe = SmiProbe::default();
        assert!(!Smi::new().deep_detect(&mut dev, &mut probe, true).unwrap());
    }

    #[test]
    fn test_process_device() {
        let smi = Smi::new();
        let mut dev = DummyDevice::new(profiles::smi());
        let inq = chipinfo_core::scsi::inquiry(&mut dev).unwrap();
        let mut probe = smi.shallow_detect(&inq, false).unwrap();
        assert!(smi.deep_detect(&mut dev, &mut probe, false).unwrap());

        let mut report = Report::new();
        smi.process_device(&mut dev, &mut probe, &mut report).unwrap();
        assert_eq!(
            report.lines(),
            vec![
                "Controller: SMI SM3257EN",
                "Firmware  : ISP 180514-AA-",
                "Flash ID  : 2C 88 01 A7 A9 00 00 00 (Intel/Micron)",
            ]
        );
    }
}
