//! CLI command implementations

mod identify;
mod list;

pub use identify::{run_identify, IdentifyArgs};
pub use list::{decode_fid, list_chips, list_controllers};

/// Version banner printed first and written as the report file's first line
pub fn banner() -> String {
    format!("chipinfo {}", env!("CARGO_PKG_VERSION"))
}
