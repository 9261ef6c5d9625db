//! Dummy controller decoder

use chipinfo_core::controller::{controller_name, parse_bool, ControllerDriver, DriverParam};
use chipinfo_core::error::Result;
use chipinfo_core::report::Report;
use chipinfo_core::scsi::ScsiTransport;

const PARAMS: &[DriverParam] = &[DriverParam {
    key: "detect",
    description: "Claim every device (yes/no, default: no)",
}];

/// Decoder that claims nothing unless configured to
#[derive(Debug, Clone, Default)]
pub struct Dummy {
    detect: bool,
}

/// What the Dummy decoder "found"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DummyProbe {
    /// Vendor name
    pub vendor: &'static str,
    /// Model, filled in by deep detection
    pub model: String,
}

impl Default for DummyProbe {
    fn default() -> Self {
        Self {
            vendor: "Acme corp.",
            model: "Unknown".to_string(),
        }
    }
}

impl Dummy {
    /// Create a decoder that never claims a device
    pub fn new() -> Self {
        Self::default()
    }
}

impl ControllerDriver for Dummy {
    type Probe = DummyProbe;

    fn name(&self) -> &'static str {
        "Dummy"
    }

    fn description(&self) -> &'static str {
        "Example decoder, claims devices only with detect=yes"
    }

    fn parameters(&self) -> &'static [DriverParam] {
        PARAMS
    }

    fn set_parameter(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "detect" => {
                self.detect = parse_bool(key, value)?;
                Ok(())
            }
            _ => Err(chipinfo_core::Error::UnknownParameter {
                controller: self.name(),
                key: key.to_string(),
            }),
        }
    }

    fn shallow_detect(&self, _inquiry: &[u8], _force: bool) -> Option<DummyProbe> {
        self.detect.then(DummyProbe::default)
    }

    fn deep_detect(
        &self,
        _dev: &mut dyn ScsiTransport,
        probe: &mut DummyProbe,
        _force: bool,
    ) -> Result<bool> {
        probe.model = "T1000".to_string();
        Ok(true)
    }

    fn process_device(
        &self,
        _dev: &mut dyn ScsiTransport,
        probe: &mut DummyProbe,
        report: &mut Report,
    ) -> Result<()> {
        report.add("Controller", controller_name(probe.vendor, &probe.model));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DummyDevice;

    #[test]
    fn test_never_detects_by_default() {
        let dummy = Dummy::new();
        let inq = crate::profiles::alcor_inquiry();
        assert!(dummy.shallow_detect(&inq, false).is_none());
        assert!(dummy.shallow_detect(&inq, true).is_none());
    }

    #[test]
    fn test_detect_parameter() {
        let mut dummy = Dummy::new();
        dummy.set_parameter("detect", "yes").unwrap();
        assert!(dummy.set_parameter("speed", "1").is_err());

        let mut dev = DummyDevice::new_default();
        let mut probe = dummy.shallow_detect(&[], false).unwrap();
        assert!(dummy.deep_detect(&mut dev, &mut probe, false).unwrap());

        let mut report = Report::new();
        dummy.process_device(&mut dev, &mut probe, &mut report).unwrap();
        assert_eq!(
            report.get("Controller").unwrap().display_value(),
            "Acme corp. T1000"
        );
        assert!(dev.commands().is_empty());
    }
}
