//! Controller detection for chipinfo
//!
//! This crate ties the decoders and device backends together. The CLI
//! should only need this crate and `chipinfo-core`.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       CLI (bin/chipinfo)                     │
//! │  - Parses device specs and controller options                │
//! │  - Renders the report                                        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  chipinfo-detect (this crate)                │
//! │  - open_device: device spec -> ScsiTransport                 │
//! │  - ControllerRegistry: compiled-in decoders, selection       │
//! │  - identify: capacity, INQUIRY, shallow/deep detection       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!              ┌───────────────┴───────────────┐
//!              ▼                               ▼
//! ┌──────────────────────────┐   ┌──────────────────────────┐
//! │    chipinfo-core         │   │  Decoder/backend crates  │
//! │  - Cdb, ScsiTransport    │   │  - alcor, phison, smi    │
//! │  - Report, flash IDs     │   │  - dummy, linux-sg       │
//! │  - ControllerDriver      │   │                          │
//! └──────────────────────────┘   └──────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use chipinfo_detect::{identify, open_device, ControllerRegistry, IdentifyOptions};
//!
//! let mut device = open_device("/dev/sdb")?;
//! let registry = ControllerRegistry::new();
//! let report = identify(
//!     device.transport.as_mut(),
//!     &device.name,
//!     &registry,
//!     &IdentifyOptions::default(),
//! );
//! print!("{}", report);
//! # Ok::<(), chipinfo_detect::DetectError>(())
//! ```
//!
//! # Features
//!
//! Each decoder and backend is behind a feature of the same name, all on
//! by default: `alcor`, `phison`, `smi`, `dummy`, `linux-sg`.

mod device;
mod error;
mod pipeline;
mod registry;

pub use device::{
    available_backends, backend_names_short, open_device, parse_device_params, BackendInfo,
    Device, DeviceParams,
};
pub use error::{DetectError, Result};
pub use pipeline::{detect, identify, identify_spec, IdentifyOptions};
pub use registry::{
    available_controllers, controller_names_short, Candidate, Controller, ControllerInfo,
    ControllerRegistry, Probe,
};
