//! Alcor Micro controller decoder

use std::path::Path;

use chipinfo_core::chip::{ChipDatabase, ChipModel};
use chipinfo_core::controller::{controller_name, has_tag, ControllerDriver};
use chipinfo_core::error::Result;
use chipinfo_core::flash::pick_slot;
use chipinfo_core::report::{FormatKind, Report, Value};
use chipinfo_core::scsi::{request, ScsiTransport, SECTOR_SIZE};

use crate::chips::{ALCOR_CHIPS, NAME_PREFIX};
use crate::protocol::{self, Status};

/// Vendor name
pub const VENDOR: &str = "Alcor Micro";

/// Bytes of each flash ID slot reported
const FID_WINDOW: usize = 6;

/// Alcor Micro decoder
///
/// Detects on the `8.0x` revision tag in INQUIRY data, then identifies the
/// chip with the `9A` status command and the chip table.
#[derive(Debug, Clone)]
pub struct Alcor {
    db: ChipDatabase,
}

/// State gathered about one Alcor device
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlcorProbe {
    /// Chip id from the status response
    pub chip: u16,
    /// Chip revision, if the `FA 0E` query answered
    pub rev: Option<u8>,
    /// OTP fingerprint (not queried)
    pub otp: Option<u32>,
    /// Generation of the last matching table row
    pub generation: Option<u8>,
    /// All table rows for `chip`, in table order
    pub matches: Vec<ChipModel>,
    /// Firmware loaded
    pub fw_loaded: bool,
    /// Generation 0 firmware version
    pub fw_version_legacy: u16,
    /// Full firmware version, once read
    pub fw_version: Option<u64>,
    /// Bad block count
    pub bad_blocks: u32,
    /// Reported flash ID window
    pub flash_id: Option<Vec<u8>>,
}

impl AlcorProbe {
    /// Generation 0 parts use the legacy command set
    pub fn is_legacy(&self) -> bool {
        self.generation == Some(0)
    }

    /// Apply a decoded status response
    pub fn apply_status(&mut self, status: &Status, db: &ChipDatabase) {
        self.chip = status.chip;
        self.matches = db.find_by_chip(status.chip).into_iter().cloned().collect();
        self.generation = self.matches.last().map(|c| c.generation);
        self.fw_loaded = status.fw_loaded;
        self.fw_version_legacy = status.fw_version_legacy;
        self.bad_blocks = status.bad_blocks();
    }

    /// Part name(s) followed by the bracketed chip id tag
    ///
    /// The first row accepting the device revision supplies the names. If
    /// none does, the first row's names are marked as a variant.
    pub fn model(&self) -> String {
        let model = match self.matches.iter().find(|c| c.accepts_rev(self.rev)) {
            Some(chip) => chip.joined_names(NAME_PREFIX),
            None => match self.matches.first() {
                Some(chip) => format!("{} variant", chip.joined_names(NAME_PREFIX)),
                None => "Unknown".to_string(),
            },
        };

        let mut tag = format!("{:04X}", self.chip);
        let first_has_rev = self.matches.first().is_some_and(|c| c.rev.is_some());
        if let (true, Some(rev)) = (first_has_rev, self.rev) {
            tag.push_str(&format!("-{:02X}", rev));
        }

        format!("{} [{}]", model, tag)
    }
}

impl Default for Alcor {
    fn default() -> Self {
        Self::new()
    }
}

impl Alcor {
    /// Decoder using the built-in chip table
    pub fn new() -> Self {
        Self::with_database(ChipDatabase::from_signatures(VENDOR, ALCOR_CHIPS))
    }

    /// Decoder using a prepared chip database
    pub fn with_database(db: ChipDatabase) -> Self {
        Self { db }
    }

    /// Append chip definitions from a RON file or directory
    pub fn load_chip_db(&mut self, path: &Path) -> Result<usize> {
        let count = self.db.load_path(path)?;
        log::debug!("alcor: loaded {} chip definitions from {}", count, path.display());
        Ok(count)
    }

    /// The chip database in use
    pub fn chip_database(&self) -> &ChipDatabase {
        &self.db
    }

    fn query_revision(&self, dev: &mut dyn ScsiTransport) -> Option<u8> {
        match request(dev, &protocol::version_cdb(), SECTOR_SIZE) {
            Ok(data) => data.get(protocol::REVISION_OFFSET).copied(),
            Err(e) => {
                log::debug!("alcor: command FA0E failed: {}", e);
                None
            }
        }
    }

    fn firmware_version(&self, dev: &mut dyn ScsiTransport) -> Result<u64> {
        let data = request(dev, &protocol::version_cdb(), SECTOR_SIZE)?;
        let version = protocol::decode_version(&data)?;

        let cdb = protocol::ext_version_cdb()?;
        match request(dev, &cdb, protocol::ext_version_len()) {
            Ok(ext) => Ok(protocol::apply_ext_version(version, &ext)),
            Err(e) => {
                log::debug!("alcor: command FA10 failed (normal for old chips): {}", e);
                Ok(version)
            }
        }
    }

    fn read_flash_ids(&self, dev: &mut dyn ScsiTransport, probe: &AlcorProbe) -> Result<Vec<u8>> {
        if !probe.is_legacy() {
            return request(dev, &protocol::flash_id_cdb(), SECTOR_SIZE);
        }

        // two 16-byte windows per channel
        let mut block = Vec::with_capacity(protocol::LEGACY_CHANNELS.len() * 32);
        for channel in protocol::LEGACY_CHANNELS {
            let data = request(dev, &protocol::nand_id_cdb(channel), SECTOR_SIZE)?;
            block.extend_from_slice(&data[0..16]);
            block.extend_from_slice(&data[0x80..0x90]);
        }
        Ok(block)
    }
}

impl ControllerDriver for Alcor {
    type Probe = AlcorProbe;

    fn name(&self) -> &'static str {
        "Alcor"
    }

    fn description(&self) -> &'static str {
        "Alcor Micro AU69xx/AU938x USB flash controllers"
    }

    fn shallow_detect(&self, inquiry: &[u8], force: bool) -> Option<AlcorProbe> {
        // longer than the standard 36-byte answer
        let tagged = inquiry.len() > 0x24
            && has_tag(inquiry, 0x20, b"8.0")
            && matches!(inquiry.get(0x23), Some(b'0' | b'1' | b'7'));

        if tagged {
            return Some(AlcorProbe::default());
        }
        log::debug!("alcor: no Alcor tag found in inquiry data");
        force.then(AlcorProbe::default)
    }

    fn deep_detect(
        &self,
        dev: &mut dyn ScsiTransport,
        probe: &mut AlcorProbe,
        _force: bool,
    ) -> Result<bool> {
        let data = request(dev, &protocol::status_cdb(), SECTOR_SIZE)?;
        let status = Status::parse(&data)?;
        probe.apply_status(&status, &self.db);

        log::debug!(
            "alcor: chip {:04X}, {} table match(es), generation {:?}, firmware {}",
            probe.chip,
            probe.matches.len(),
            probe.generation,
            if probe.fw_loaded { "loaded" } else { "not loaded" }
        );
        Ok(true)
    }

    fn process_device(
        &self,
        dev: &mut dyn ScsiTransport,
        probe: &mut AlcorProbe,
        report: &mut Report,
    ) -> Result<()> {
        probe.rev = self.query_revision(dev);
        report.add("Controller", controller_name(VENDOR, &probe.model()));

        let firmware = if !probe.fw_loaded {
            "Not loaded".to_string()
        } else if probe.is_legacy() {
            protocol::format_legacy_version(probe.fw_version_legacy)
        } else {
            let version = self.firmware_version(dev)?;
            probe.fw_version = Some(version);
            protocol::format_version(version)
        };
        report.add("Firmware", firmware);
        report.add("Bad blocks", probe.bad_blocks);

        match self.read_flash_ids(dev, probe) {
            Ok(block) => {
                let fid = pick_slot(&block, 0, FID_WINDOW, FID_WINDOW).to_vec();
                probe.flash_id = Some(fid.clone());
                report.add_formatted("Flash ID", fid, FormatKind::FlashId);
            }
            Err(e) => {
                log::debug!("alcor: flash ID read failed: {}", e);
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

    fn probe_for(alcor: &Alcor, chip: u16, rev: Option<u8>) -> AlcorProbe {
        let status = Status {
            chip,
            bad_blocks_raw: 0,
            fw_loaded: true,
            fw_version_legacy: 0,
        };
        let mut probe = AlcorProbe::default();
        probe.apply_status(&status, alcor.chip_database());
        probe.rev = rev;
        probe
    }

    #[test]
    fn test_shallow_detect() {
        let alcor = Alcor::new();
        let mut inq = profiles::alcor_inquiry();
        assert!(alcor.shallow_detect(&inq, false).is_some());

        inq[0x23] = b'1';
        assert!(alcor.shallow_detect(&inq, false).is_some());
        inq[0x23] = b'5';
        assert!(alcor.shallow_detect(&inq, false).is_none());
        assert!(alcor.shallow_detect(&inq, true).is_some());

        // a bare 36-byte answer is not enough
        let inq = profiles::alcor_inquiry();
        assert!(alcor.shallow_detect(&inq[..0x24], false).is_none());
        assert!(alcor.shallow_detect(&inq[..0x25], false).is_some());
    }

    #[test]
    fn test_shallow_detect_is_repeatable() {
        let alcor = Alcor::new();
        let inq = profiles::alcor_inquiry();
        assert_eq!(alcor.shallow_detect(&inq, false), alcor.shallow_detect(&inq, false));
    }

    #[test]
    fn test_bd06_revisions() {
        let alcor = Alcor::new();
        for rev in [0x08, 0x0C] {
            let probe = probe_for(&alcor, 0xBD06, Some(rev));
            assert_eq!(probe.generation, Some(2));
            let chip = probe.matches.iter().find(|c| c.accepts_rev(Some(rev))).unwrap();
            assert_eq!(chip.names, vec!["6983", "6986"]);
            assert_eq!(chip.generation, 2);
            assert_eq!(probe.model(), format!("AU6983 / AU6986 [BD06-{:02X}]", rev));
        }
    }

    #[test]
    fn test_model_variant_and_unknown() {
        let alcor = Alcor::new();

        let probe = probe_for(&alcor, 0xBD06, Some(0x09));
        assert_eq!(probe.model(), "AU6983 / AU6986 variant [BD06-09]");

        let probe = probe_for(&alcor, 0xBD06, None);
        assert_eq!(probe.model(), "AU6983 / AU6986 variant [BD06]");

        let probe = probe_for(&alcor, 0x1234, Some(0x80));
        assert_eq!(probe.generation, None);
        assert_eq!(probe.model(), "Unknown [1234]");
    }

    #[test]
    fn test_model_first_row_wins() {
        let alcor = Alcor::new();
        // listed twice, the older name comes first
        let probe = probe_for(&alcor, 0xAB41, Some(0x11));
        assert_eq!(probe.model(), "AU6980 [AB41]");

        let probe = probe_for(&alcor, 0xEF01, Some(0xCC));
        assert_eq!(probe.model(), "AU6989SNM / AU6998SNM [EF01-CC]");
        assert_eq!(probe.generation, Some(12));
    }

    #[test]
    fn test_unnamed_engineering_sample() {
        let alcor = Alcor::new();
        let probe = probe_for(&alcor, 0xF000, Some(0x00));
        assert_eq!(probe.generation, Some(10));
        assert_eq!(probe.model(), "AU??? [F000-00]");
    }

    #[test]
    fn test_process_modern_device() {
        let alcor = Alcor::new();
        let mut dev = DummyDevice::new(profiles::alcor());
        let inq = chipinfo_core::scsi::inquiry(&mut dev).unwrap();

        let mut probe = alcor.shallow_detect(&inq, false).unwrap();
        assert!(alcor.deep_detect(&mut dev, &mut probe, false).unwrap());

        let mut report = Report::new();
        alcor.process_device(&mut dev, &mut probe, &mut report).unwrap();

        let values: Vec<(String, String)> = report
            .entries()
            .iter()
            .map(|e| (e.field.clone(), e.display_value()))
            .collect();
        assert_eq!(
            values,
            vec![
                ("Controller".into(), "Alcor Micro AU6983 / AU6986 [BD06-08]".into()),
                ("Firmware".into(), "F5123478".into()),
                ("Bad blocks".into(), "12".into()),
                ("Flash ID".into(), "98 D7 84 93 72 57 (Toshiba)".into()),
            ]
        );
        assert_eq!(probe.fw_version, Some(0xF512_3478));
        // FA0E twice: revision, then firmware
        assert_eq!(dev.count(&[0xFA, 0x0E]), 2);
        assert_eq!(dev.count(&[0xFA, 0x10]), 1);
    }

    #[test]
    fn test_process_legacy_device() {
        let alcor = Alcor::new();
        let mut dev = DummyDevice::new(profiles::alcor_legacy());
        let mut probe = AlcorProbe::default();
        assert!(alcor.deep_detect(&mut dev, &mut probe, false).unwrap());
        assert!(probe.is_legacy());

        let mut report = Report::new();
        alcor.process_device(&mut dev, &mut probe, &mut report).unwrap();

        assert_eq!(probe.rev, None);
        assert_eq!(
            report.get("Controller").unwrap().display_value(),
            "Alcor Micro AU9386 [0C0E]"
        );
        assert_eq!(report.get("Firmware").unwrap().display_value(), "0705");
        assert_eq!(report.get("Bad blocks").unwrap().display_value(), "5");
        assert_eq!(
            report.get("Flash ID").unwrap().display_value(),
            "EC D7 94 7A 54 43 (Samsung)"
        );
        assert_eq!(dev.count(&[0xD0]), 4);
        assert_eq!(dev.count(&[0xFA, 0x00]), 0);
    }

    #[test]
    fn test_firmware_not_loaded_and_flash_unavailable() {
        let mut status = vec![0u8; 512];
        status[4..6].copy_from_slice(&[0xCA, 0x03]);
        status[0x25] = 9;
        let config = DummyConfig::new()
            .with_inquiry(profiles::alcor_inquiry())
            .with_response(&[0x9A], status);
        let mut dev = DummyDevice::new(config);

        let alcor = Alcor::new();
        let mut probe = AlcorProbe::default();
        alcor.deep_detect(&mut dev, &mut probe, false).unwrap();
        let mut report = Report::new();
        alcor.process_device(&mut dev, &mut probe, &mut report).unwrap();

        assert_eq!(
            report.get("Controller").unwrap().display_value(),
            "Alcor Micro AU6987 / AU6990 variant [CA03]"
        );
        assert_eq!(report.get("Firmware").unwrap().display_value(), "Not loaded");
        assert_eq!(report.get("Bad blocks").unwrap().display_value(), "0");
        assert_eq!(report.get("Flash ID").unwrap().display_value(), "Unavailable");
    }

    #[test]
    fn test_deep_detect_failure_propagates() {
        let alcor = Alcor::new();
        let mut dev = DummyDevice::new(profiles::broken());
        let mut probe = AlcorProbe::default();
        assert!(alcor.deep_detect(&mut dev, &mut probe, false).is_err());
    }

    #[test]
    fn test_extra_chip_db() {
        let mut db = ChipDatabase::from_signatures(VENDOR, ALCOR_CHIPS);
        db.load_ron(r#"(vendor: "Alcor Micro", chips: [(chip: 0x1234, rev: Some(0x80), generation: 15, names: ["6989SN-GTX"])])"#)
            .unwrap();
        let alcor = Alcor::with_database(db);

        let probe = probe_for(&alcor, 0x1234, Some(0x80));
        assert_eq!(probe.generation, Some(15));
        assert_eq!(probe.model(), "AU6989SN-GTX [1234-80]");
    }
}
