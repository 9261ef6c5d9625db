//! chipinfo - USB flash drive controller identification
//!
//! Sends vendor-specific SCSI commands to a USB mass storage device and
//! decodes the answers to name the controller chip, its firmware and the
//! NAND flash attached to it.
//!
//! # Architecture
//!
//! The binary only talks to `chipinfo-detect`, which opens devices and runs
//! the compiled-in controller decoders, and to `chipinfo-core` for the report
//! and flash ID types. Everything device-specific lives in the decoder crates.

mod cli;
mod commands;

use chipinfo_detect::ControllerRegistry;
use clap::Parser;
use cli::{Cli, Commands};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Set log level based on verbosity
    match cli.verbose {
        0 => {} // default (info)
        1 => log::set_max_level(log::LevelFilter::Debug),
        _ => log::set_max_level(log::LevelFilter::Trace),
    }

    let mut registry = ControllerRegistry::new();
    if let Some(path) = cli.chip_db.as_deref() {
        match registry.load_chip_db(path) {
            Ok(count) => log::info!("Loaded {} extra chip definitions", count),
            Err(e) => {
                eprintln!("Failed to load chip database: {}", e);
                std::process::exit(1);
            }
        }
    }

    match cli.command {
        Commands::Identify {
            device,
            report,
            plugin,
            options,
            force,
            dump,
        } => {
            let args = commands::IdentifyArgs {
                device,
                report,
                plugins: plugin,
                options,
                force,
                dump,
            };
            if !commands::run_identify(registry, args)? {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::ListControllers => {
            commands::list_controllers();
            Ok(())
        }
        Commands::ListChips { generation, chip } => {
            commands::list_chips(&registry, generation, chip);
            Ok(())
        }
        Commands::DecodeFid { bytes } => commands::decode_fid(&bytes),
    }
}
