//! Phison controller decoder

use chipinfo_core::controller::{controller_name, has_tag, ControllerDriver, DriverParam};
use chipinfo_core::error::{Error, Result};
use chipinfo_core::flash::pick_slot;
use chipinfo_core::report::{FormatKind, Report, Value};
use chipinfo_core::scsi::{request, ScsiTransport, SECTOR_SIZE};

use crate::protocol::{self, InfoPage, INFO_LEN, MAX_TAG_LEN};

/// Vendor name
pub const VENDOR: &str = "Phison";

const PARAMS: &[DriverParam] = &[DriverParam {
    key: "tag",
    description: "Info page sub-tag written into the CDB (up to 10 characters)",
}];

/// Phison decoder
#[derive(Debug, Clone, Default)]
pub struct Phison {
    tag: String,
}

/// State gathered about one Phison device
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhisonProbe {
    /// Decoded info page
    pub info: Option<InfoPage>,
}

impl Phison {
    /// Decoder requesting the default info page
    pub fn new() -> Self {
        Self::default()
    }

    /// Decoder requesting the info page with the given sub-tag
    pub fn with_tag(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }
}

impl ControllerDriver for Phison {
    type Probe = PhisonProbe;

    fn name(&self) -> &'static str {
        "Phison"
    }

    fn description(&self) -> &'static str {
        "Phison PS2xxx USB flash controllers"
    }

    fn parameters(&self) -> &'static [DriverParam] {
        PARAMS
    }

    fn set_parameter(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "tag" if value.len() <= MAX_TAG_LEN && value.is_ascii() => {
                self.tag = value.to_string();
                Ok(())
            }
            "tag" => Err(Error::InvalidParameter {
                key: key.to_string(),
                value: value.to_string(),
            }),
            _ => Err(Error::UnknownParameter {
                controller: self.name(),
                key: key.to_string(),
            }),
        }
    }

    fn shallow_detect(&self, inquiry: &[u8], force: bool) -> Option<PhisonProbe> {
        if has_tag(inquiry, 0x24, b"PMAP") {
            return Some(PhisonProbe::default());
        }
        log::debug!("phison: no PMAP tag found in inquiry data");
        force.then(PhisonProbe::default)
    }

    fn deep_detect(
        &self,
        dev: &mut dyn ScsiTransport,
        probe: &mut PhisonProbe,
        _force: bool,
    ) -> Result<bool> {
        let data = request(dev, &protocol::info_cdb(&self.tag), INFO_LEN)?;
        let info = InfoPage::parse(&data)?;
        if !info.marked {
            log::warn!("phison: strange info page mark");
        }
        log::debug!("phison: chip 0x{:02X}, model {}", info.chip, info.model);
        probe.info = Some(info);
        Ok(true)
    }

    fn process_device(
        &self,
        dev: &mut dyn ScsiTransport,
        probe: &mut PhisonProbe,
        report: &mut Report,
    ) -> Result<()> {
        let Some(info) = &probe.info else {
            report.add("Controller", controller_name(VENDOR, "Unknown"));
            return Ok(());
        };

        report.add("Controller", controller_name(VENDOR, &info.model));
        report.add("Firmware", format!("{} {}", info.version, info.date));
        report.add("Product", info.product.clone());
        report.add("USB", info.usb.clone());

        match request(dev, &protocol::flash_id_cdb(), SECTOR_SIZE) {
            Ok(block) => {
                let fid = pick_slot(&block, 0, 8, 16);
                report.add_formatted("Flash ID", fid, FormatKind::FlashId);
            }
            Err(e) => {
                log::debug!("phison: flash ID read failed: {}", e);
                report.add("Flash ID", Value::Unavailable);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chipinfo_dummy::{profiles, DummyDevice};

    #[test]
    fn test_shallow_detect() {
        let phison = Phison::new();
        assert!(phison.shallow_detect(&profiles::phison().inquiry, false).is_some());
        assert!(phison.shallow_detect(&profiles::alcor_inquiry(), false).is_none());
        assert!(phison.shallow_detect(&profiles::alcor_inquiry(), true).is_some());
        assert!(phison.shallow_detect(&[], false).is_none());
    }

    #[test]
    fn test_tag_parameter() {
        let mut phison = Phison::new();
        phison.set_parameter("tag", "INFO").unwrap();
        assert!(phison.set_parameter("tag", "MUCH-TOO-LONG").is_err());
        assert!(phison.set_parameter("extract", "yes").is_err());

        let mut dev = DummyDevice::new(profiles::phison());
        let mut probe = PhisonProbe::default();
        phison.deep_detect(&mut dev, &mut probe, false).unwrap();
        assert_eq!(&dev.commands()[0].as_bytes()[..6], &[0x06, 0x05, b'I', b'N', b'F', b'O']);
    }

    #[test]
    fn test_process_device() {
        let phison = Phison::new();
        let mut dev = DummyDevice::new(profiles::phison());
        let mut probe = PhisonProbe::default();
        assert!(phison.deep_detect(&mut dev, &mut probe, false).unwrap());

        let mut report = Report::new();
        phison.process_device(&mut dev, &mut probe, &mut report).unwrap();

        assert_eq!(
            report.lines(),
            vec![
                "Controller: Phison PS2251 (0x0D)",
                "Firmware  : 1.02.03 19/10/27",
                "Product   : USB DISK 2.0",
                "USB       : 30",
                "Flash ID  : 45 DE 94 93 76 50 00 00 (Sandisk)",
            ]
        );
    }

    #[test]
    fn test_flash_id_unavailable() {
        let config = profiles::phison().with_failure(&[0x06, 0x56]);
        let mut dev = DummyDevice::new(config);
        let phison = Phison::new();
        let mut probe = PhisonProbe::default();
        phison.deep_detect(&mut dev, &mut probe, false).unwrap();

        let mut report = Report::new();
        phison.process_device(&mut dev, &mut probe, &mut report).unwrap();
        assert_eq!(report.get("Flash ID").unwrap().value, Value::Unavailable);
    }
}
