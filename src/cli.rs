//! CLI argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Parse a string as a hex or decimal u16
fn parse_hex_u16(s: &str) -> Result<u16, String> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u16::from_str_radix(hex, 16).map_err(|e| format!("Invalid hex value: {}", e))
    } else {
        u16::from_str_radix(s, 16).map_err(|e| format!("Invalid hex value: {}", e))
    }
}

/// Generate dynamic help text for the device argument
fn device_help() -> String {
    format!(
        "Device to examine, e.g. /dev/sdb or dummy:profile=alcor [backends: {}]",
        chipinfo_detect::backend_names_short()
    )
}

/// Generate dynamic help text for the plugin argument
fn plugin_help() -> String {
    format!(
        "Only run these controller decoders (comma-separated) [available: {}]",
        chipinfo_detect::controller_names_short()
    )
}

#[derive(Parser)]
#[command(name = "chipinfo")]
#[command(author, version, about = "USB flash drive controller identification", long_about = None)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Extra Alcor chip definitions (.ron file or directory of .ron files)
    #[arg(long, global = true)]
    pub chip_db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Identify the controller of a device
    #[command(visible_alias = "id")]
    Identify {
        /// Device to examine
        #[arg(help = device_help())]
        device: String,

        /// Also write the report to this file
        #[arg(short, long)]
        report: Option<PathBuf>,

        #[arg(short, long, value_delimiter = ',', help = plugin_help())]
        plugin: Vec<String>,

        /// Controller option as CTRL:key=value (repeatable)
        #[arg(short = 'o', long = "option")]
        options: Vec<String>,

        /// Let decoders claim the device without their INQUIRY tag
        #[arg(short, long)]
        force: bool,

        /// Save every raw response into this directory
        #[arg(long)]
        dump: Option<PathBuf>,
    },

    /// List supported controller decoders
    #[command(visible_alias = "lc")]
    ListControllers,

    /// List known Alcor chips
    #[command(visible_alias = "lchips")]
    ListChips {
        /// Only chips of this firmware generation
        #[arg(long)]
        generation: Option<u8>,

        /// Only this chip ID (hex, e.g. BD06)
        #[arg(long, value_parser = parse_hex_u16)]
        chip: Option<u16>,
    },

    /// Decode a raw flash ID
    DecodeFid {
        /// ID bytes in hex, e.g. 98 D7 84 93 or 98D78493
        #[arg(required = true)]
        bytes: Vec<String>,
    },
}
