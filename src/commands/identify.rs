//! Identify command

use chipinfo_core::report::Report;
use chipinfo_detect::{identify_spec, ControllerRegistry, IdentifyOptions};
use std::fs;
use std::path::{Path, PathBuf};

/// Arguments of the identify command
pub struct IdentifyArgs {
    /// Device spec
    pub device: String,
    /// Optional report file
    pub report: Option<PathBuf>,
    /// Decoder subset, empty for all
    pub plugins: Vec<String>,
    /// `CTRL:key=value` options
    pub options: Vec<String>,
    /// Claim devices without their INQUIRY tag
    pub force: bool,
    /// Raw response dump directory
    pub dump: Option<PathBuf>,
}

/// Run one identification and print the report
///
/// Returns false if the run ended with an `Error` entry.
pub fn run_identify(
    mut registry: ControllerRegistry,
    args: IdentifyArgs,
) -> Result<bool, Box<dyn std::error::Error>> {
    println!("{}", super::banner());
    println!("Supported controllers: {}", registry.names().join(", "));

    if !args.plugins.is_empty() {
        registry.select(args.plugins.as_slice())?;
        println!(
            "Selected controllers: {}",
            registry.selected_names().join(", ")
        );
    }

    for option in &args.options {
        registry.set_parameter(option)?;
    }

    let options = IdentifyOptions {
        force: args.force,
        dump_dir: args.dump,
    };
    // The device is closed again before the report is printed
    let report = identify_spec(&args.device, &registry, &options)?;

    println!();
    print!("{}", report);

    if let Some(path) = &args.report {
        write_report(path, &report)?;
        log::info!("Report written to {}", path.display());
    }

    Ok(report.get("Error").is_none())
}

fn write_report(path: &Path, report: &Report) -> std::io::Result<()> {
    let mut text = super::banner();
    text.push('\n');
    text.push_str(&report.to_string());
    fs::write(path, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_file_starts_with_banner() {
        let path =
            std::env::temp_dir().join(format!("chipinfo-report-{}.txt", std::process::id()));
        let mut report = Report::new();
        report.add("Device", "/dev/sdb");
        report.add("Controller", "Unknown");
        write_report(&path, &report).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], super::super::banner());
        assert_eq!(lines[1], "Device    : /dev/sdb");
        assert_eq!(lines[2], "Controller: Unknown");
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_identify_dummy_profile() {
        let args = IdentifyArgs {
            device: "dummy:profile=smi".to_string(),
            report: None,
            plugins: vec!["smi".to_string()],
            options: Vec::new(),
            force: false,
            dump: None,
        };
        assert!(run_identify(ControllerRegistry::new(), args).unwrap());
    }

    #[cfg(feature = "linux-sg")]
    #[test]
    fn test_identify_missing_device_writes_report() {
        let path =
            std::env::temp_dir().join(format!("chipinfo-missing-{}.txt", std::process::id()));
        let args = IdentifyArgs {
            device: "/dev/chipinfo-missing-node".to_string(),
            report: Some(path.clone()),
            plugins: Vec::new(),
            options: Vec::new(),
            force: false,
            dump: None,
        };
        assert!(!run_identify(ControllerRegistry::new(), args).unwrap());

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "Device: /dev/chipinfo-missing-node");
        assert!(lines[2].starts_with("Error : Failed to open device"));
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_identify_rejects_bad_option() {
        let args = IdentifyArgs {
            device: "dummy".to_string(),
            report: None,
            plugins: Vec::new(),
            options: vec!["phison".to_string()],
            force: false,
            dump: None,
        };
        assert!(run_identify(ControllerRegistry::new(), args).is_err());
    }
}
