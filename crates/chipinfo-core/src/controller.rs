//! Controller decoder interface
//!
//! Detection runs in two phases. [`ControllerDriver::shallow_detect`] looks
//! only at the INQUIRY bytes already fetched and must not touch the device,
//! so a misdetected device is never sent a foreign vendor command. Only when
//! it returns a probe does the pipeline call
//! [`ControllerDriver::deep_detect`], which issues the vendor's own
//! identification command and fills in the probe. A confirmed probe is then
//! handed to [`ControllerDriver::process_device`] to populate the report.
//!
//! State gathered along the way lives in the driver's `Probe` type and is
//! threaded through those calls explicitly.

use crate::error::{Error, Result};
use crate::report::Report;
use crate::scsi::ScsiTransport;

/// A configuration key accepted by a controller decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverParam {
    /// Key as written on the command line
    pub key: &'static str,
    /// One-line help
    pub description: &'static str,
}

/// A controller family decoder
pub trait ControllerDriver {
    /// Per-device state accumulated between detection and processing
    type Probe;

    /// Unique decoder name
    fn name(&self) -> &'static str;

    /// One-line description for listings
    fn description(&self) -> &'static str;

    /// False to leave the decoder out of detection entirely
    fn enabled(&self) -> bool {
        true
    }

    /// Configuration keys understood by [`ControllerDriver::set_parameter`]
    fn parameters(&self) -> &'static [DriverParam] {
        &[]
    }

    /// Apply one `key=value` configuration pair
    fn set_parameter(&mut self, key: &str, _value: &str) -> Result<()> {
        Err(Error::UnknownParameter {
            controller: self.name(),
            key: key.to_string(),
        })
    }

    /// Match the vendor tag in INQUIRY data
    ///
    /// With `force` set the decoder claims the device even without its tag.
    fn shallow_detect(&self, inquiry: &[u8], force: bool) -> Option<Self::Probe>;

    /// Confirm the controller with a vendor command and fill in `probe`
    ///
    /// `Ok(false)` discards the candidate. Transport errors propagate.
    fn deep_detect(
        &self,
        dev: &mut dyn ScsiTransport,
        probe: &mut Self::Probe,
        force: bool,
    ) -> Result<bool>;

    /// Gather everything else about the device and append it to `report`
    fn process_device(
        &self,
        dev: &mut dyn ScsiTransport,
        probe: &mut Self::Probe,
        report: &mut Report,
    ) -> Result<()>;
}

/// True if `data` holds `tag` at `offset`
pub fn has_tag(data: &[u8], offset: usize, tag: &[u8]) -> bool {
    data.get(offset..offset + tag.len()) == Some(tag)
}

/// `"<vendor> <model>"` as shown on the `Controller` line
pub fn controller_name(vendor: &str, model: &str) -> String {
    format!("{} {}", vendor, model)
}

/// Parse a boolean parameter value
pub fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Error::InvalidParameter {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_tag() {
        let mut inq = [0u8; 0x38];
        inq[0x24..0x28].copy_from_slice(b"PMAP");
        assert!(has_tag(&inq, 0x24, b"PMAP"));
        assert!(!has_tag(&inq, 0x23, b"PMAP"));
        assert!(!has_tag(&inq[..0x26], 0x24, b"PMAP"));
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("detect", "yes").unwrap());
        assert!(!parse_bool("detect", "0").unwrap());
        assert!(matches!(
            parse_bool("detect", "maybe"),
            Err(Error::InvalidParameter { .. })
        ));
    }
}
