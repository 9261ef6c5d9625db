//! Device spec parsing and backend dispatch
//!
//! A device spec is either a bare path (`/dev/sdb`), which goes to the
//! SG_IO backend, or `name` / `name:key1=value1,key2=value2`.

use crate::error::{DetectError, Result};
use chipinfo_core::scsi::ScsiTransport;
use std::collections::HashMap;

/// Parsed device parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceParams {
    /// Backend name as written
    pub name: String,
    /// Key-value parameters
    pub params: HashMap<String, String>,
}

impl DeviceParams {
    /// Parameters as borrowed pairs, the form the backends take
    pub fn options(&self) -> Vec<(&str, &str)> {
        self.params
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }
}

/// Parse a device string into backend name and parameters
///
/// Format: "/dev/sdX", "name" or "name:key1=value1,key2=value2"
///
/// # Example
/// ```
/// use chipinfo_detect::parse_device_params;
///
/// let params = parse_device_params("dummy:profile=alcor").unwrap();
/// assert_eq!(params.name, "dummy");
/// assert_eq!(params.params.get("profile"), Some(&"alcor".to_string()));
/// ```
pub fn parse_device_params(s: &str) -> Result<DeviceParams> {
    if s.starts_with('/') {
        return Ok(DeviceParams {
            name: "sg".to_string(),
            params: HashMap::from([("dev".to_string(), s.to_string())]),
        });
    }

    let (name, opts_str) = s.split_once(':').unwrap_or((s, ""));
    if name.is_empty() {
        return Err(DetectError::InvalidDeviceSpec {
            spec: s.to_string(),
            reason: "missing backend name".to_string(),
        });
    }

    let mut params = HashMap::new();
    if !opts_str.is_empty() {
        for opt in opts_str.split(',') {
            if let Some((key, value)) = opt.split_once('=') {
                params.insert(key.to_string(), value.to_string());
            } else {
                return Err(DetectError::InvalidDeviceSpec {
                    spec: s.to_string(),
                    reason: format!("invalid parameter '{}' (expected key=value)", opt),
                });
            }
        }
    }

    Ok(DeviceParams {
        name: name.to_string(),
        params,
    })
}

/// An opened device together with the name it is reported under
pub struct Device {
    /// Name for the `Device` report line
    pub name: String,
    /// Transport to send commands through
    pub transport: Box<dyn ScsiTransport>,
}

/// Open a device from a spec string
///
/// The transport is released when the returned [`Device`] is dropped.
pub fn open_device(spec: &str) -> Result<Device> {
    let params = parse_device_params(spec)?;

    match params.name.as_str() {
        #[cfg(feature = "linux-sg")]
        "sg" | "linux_sg" | "linux-sg" => open_linux_sg(spec, &params),

        #[cfg(feature = "dummy")]
        "dummy" => open_dummy(spec, &params),

        _ => Err(DetectError::UnknownBackend {
            name: params.name.clone(),
            available: backend_names_short(),
        }),
    }
}

#[cfg(feature = "linux-sg")]
fn open_linux_sg(spec: &str, params: &DeviceParams) -> Result<Device> {
    let name = params
        .params
        .get("dev")
        .cloned()
        .unwrap_or_else(|| spec.to_string());

    log::debug!("Opening {} via SG_IO", name);

    let transport = chipinfo_linux_sg::open_linux_sg(&params.options()).map_err(|e| {
        DetectError::OpenFailed {
            device: name.clone(),
            message: format!(
                "{}\nMake sure the device exists and you have read/write permissions.\n\
                 Vendor commands usually need root.",
                e
            ),
        }
    })?;

    Ok(Device { name, transport })
}

#[cfg(feature = "dummy")]
fn open_dummy(spec: &str, params: &DeviceParams) -> Result<Device> {
    let profile = params
        .params
        .get("profile")
        .map(String::as_str)
        .unwrap_or("blank");

    log::debug!("Opening emulated device (profile {})", profile);

    let transport =
        chipinfo_dummy::open_dummy(&params.options()).map_err(|e| DetectError::OpenFailed {
            device: spec.to_string(),
            message: e.to_string(),
        })?;

    Ok(Device {
        name: format!("dummy ({})", profile),
        transport,
    })
}

/// Information about a device backend
pub struct BackendInfo {
    /// Primary name (used for matching)
    pub name: &'static str,
    /// Alternative names/aliases
    pub aliases: &'static [&'static str],
    /// Short description
    pub description: &'static str,
}

/// Get information about all available backends (enabled at compile time)
#[allow(unused_mut, clippy::vec_init_then_push)]
pub fn available_backends() -> Vec<BackendInfo> {
    let mut backends = Vec::new();

    #[cfg(feature = "linux-sg")]
    backends.push(BackendInfo {
        name: "sg",
        aliases: &["linux_sg", "linux-sg"],
        description: "Linux SCSI generic passthrough (dev=/dev/sdX, or just the path)",
    });

    #[cfg(feature = "dummy")]
    backends.push(BackendInfo {
        name: "dummy",
        aliases: &[],
        description: "Emulated device for testing (profile=<name>,capacity=<bytes>)",
    });

    backends
}

/// Generate a short list of backend names for CLI help
pub fn backend_names_short() -> String {
    let backends = available_backends();
    if backends.is_empty() {
        return "none (recompile with features)".to_string();
    }
    let names: Vec<&str> = backends.iter().map(|b| b.name).collect();
    names.join(", ")
}
