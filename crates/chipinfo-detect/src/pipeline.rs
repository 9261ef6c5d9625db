//! Identification run
//!
//! One run fills one [`Report`]: the device line, its capacity, then one
//! contribution per decoder that confirms the controller. Whatever fails
//! along the way ends the run with a single `Error` entry, and the entries
//! recorded up to that point are kept.

use crate::device::open_device;
use crate::error::{DetectError, Result};
use crate::registry::ControllerRegistry;
use chipinfo_core::report::{FormatKind, Report};
use chipinfo_core::scsi::{inquiry, DumpTransport, InquiryData, ScsiTransport};
use std::path::PathBuf;

/// Options for one identification run
#[derive(Debug, Clone, Default)]
pub struct IdentifyOptions {
    /// Let decoders claim the device without their INQUIRY tag
    pub force: bool,
    /// Save every raw response into this directory
    pub dump_dir: Option<PathBuf>,
}

/// Identify the controller behind `dev`
///
/// Never fails; errors end up as the report's last entry.
pub fn identify(
    dev: &mut dyn ScsiTransport,
    name: &str,
    registry: &ControllerRegistry,
    options: &IdentifyOptions,
) -> Report {
    let mut report = Report::new();
    report.add("Device", name);

    let result = match options.dump_dir {
        Some(ref dir) => {
            log::info!("Dumping responses to {}", dir.display());
            let mut dumper = DumpTransport::new(dev, dir);
            run(&mut dumper, registry, options.force, &mut report)
        }
        None => run(dev, registry, options.force, &mut report),
    };

    if let Err(e) = result {
        log::debug!("Run aborted: {}", e);
        report.add_error(&e);
    }
    report
}

/// Open the device named by `spec` and identify it
///
/// A device that fails to open still yields a report, holding the
/// `Device` line and the open error. Malformed specs and unknown
/// backends are returned as errors.
pub fn identify_spec(
    spec: &str,
    registry: &ControllerRegistry,
    options: &IdentifyOptions,
) -> Result<Report> {
    match open_device(spec) {
        Ok(mut device) => Ok(identify(
            device.transport.as_mut(),
            &device.name,
            registry,
            options,
        )),
        Err(e @ DetectError::OpenFailed { .. }) => {
            log::debug!("Run aborted: {}", e);
            let mut report = Report::new();
            report.add("Device", spec);
            report.add_error(&e);
            Ok(report)
        }
        Err(e) => Err(e),
    }
}

fn run(
    dev: &mut dyn ScsiTransport,
    registry: &ControllerRegistry,
    force: bool,
    report: &mut Report,
) -> Result<()> {
    let capacity = dev.capacity()?;
    report.add_formatted("Capacity", capacity, FormatKind::SizeBytes);

    let inq = inquiry(dev)?;
    match InquiryData::parse(&inq) {
        Some(data) => log::info!(
            "INQUIRY: vendor '{}' product '{}' revision '{}'",
            data.vendor,
            data.product,
            data.revision
        ),
        None => log::warn!("INQUIRY returned only {} bytes", inq.len()),
    }

    detect(dev, &inq, registry, force, report)?;
    Ok(())
}

/// Run shallow and deep detection and let each confirmed decoder report
///
/// Candidates are handled in registry order, each processed as soon as
/// its deep detection succeeds. Adds `Controller: Unknown` when nothing
/// claims the device. Returns the number of contributing decoders.
pub fn detect(
    dev: &mut dyn ScsiTransport,
    inquiry: &[u8],
    registry: &ControllerRegistry,
    force: bool,
    report: &mut Report,
) -> Result<usize> {
    let mut claimed = 0;

    for mut candidate in registry.shallow_detect(inquiry, force) {
        log::debug!("{} matched INQUIRY data", candidate.name());

        if !registry.deep_detect(dev, &mut candidate, force)? {
            log::debug!("{} rejected the device", candidate.name());
            continue;
        }

        log::info!("Detected {} controller", candidate.name());
        registry.process_device(dev, &mut candidate, report)?;
        claimed += 1;
    }

    if claimed == 0 {
        log::info!("No controller decoder claimed the device");
        report.add("Controller", "Unknown");
    }
    Ok(claimed)
}
