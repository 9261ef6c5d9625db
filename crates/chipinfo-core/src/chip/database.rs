//! Chip database for runtime loading and lookup
//!
//! This module provides the `ChipDatabase` type, seeded from a built-in
//! signature table and optionally extended with RON files.

use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;

use super::types::{ChipModel, ChipSignature};

/// Error type for chip database operations
#[derive(Debug, Error)]
pub enum ChipDbError {
    /// I/O error reading files
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// RON parsing error
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

// ============================================================================
// RON deserialization types (intermediate format)
// ============================================================================

/// Single chip definition in RON format
#[derive(Debug, Clone, serde::Deserialize)]
struct ChipDef {
    chip: u16,
    #[serde(default)]
    rev: Option<u8>,
    #[serde(default)]
    otp: Option<u32>,
    #[serde(default)]
    generation: u8,
    #[serde(default = "default_names")]
    names: Vec<String>,
}

fn default_names() -> Vec<String> {
    vec!["???".to_string()]
}

/// Vendor definition containing multiple chips
#[derive(Debug, Clone, serde::Deserialize)]
struct VendorDef {
    vendor: String,
    chips: Vec<ChipDef>,
}

// ============================================================================
// Chip database
// ============================================================================

/// Runtime chip database
///
/// Lookups scan entries in insertion order, so built-in rows added first
/// take precedence over rows loaded later.
#[derive(Debug, Clone, Default)]
pub struct ChipDatabase {
    chips: Vec<ChipModel>,
}

impl ChipDatabase {
    /// Create an empty chip database
    pub fn new() -> Self {
        Self { chips: Vec::new() }
    }

    /// Create a database holding a built-in table
    pub fn from_signatures(vendor: &str, table: &[ChipSignature]) -> Self {
        Self {
            chips: table
                .iter()
                .map(|sig| ChipModel::from_signature(vendor, sig))
                .collect(),
        }
    }

    /// Load chip definitions from a single RON file
    pub fn load_file(&mut self, path: &Path) -> Result<usize, ChipDbError> {
        let content = fs::read_to_string(path)?;
        self.load_ron(&content)
    }

    /// Load chip definitions from a RON string
    pub fn load_ron(&mut self, content: &str) -> Result<usize, ChipDbError> {
        let vendor_def: VendorDef = ron::from_str(content)?;
        let count = vendor_def.chips.len();

        let mut loaded = Vec::with_capacity(count);
        for chip_def in vendor_def.chips {
            if chip_def.names.is_empty() || chip_def.names.iter().any(|n| n.trim().is_empty()) {
                return Err(ChipDbError::Validation(format!(
                    "chip 0x{:04X} of {} has an empty name",
                    chip_def.chip, vendor_def.vendor
                )));
            }
            loaded.push(ChipModel {
                vendor: vendor_def.vendor.clone(),
                chip: chip_def.chip,
                rev: chip_def.rev,
                otp: chip_def.otp,
                generation: chip_def.generation,
                names: chip_def.names,
            });
        }
        self.chips.extend(loaded);

        Ok(count)
    }

    /// Load all RON files from a directory
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize, ChipDbError> {
        let mut total = 0;

        let mut paths = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "ron") {
                paths.push(path);
            }
        }
        // directory order is unspecified; keep the scan order stable
        paths.sort();

        for path in paths {
            total += self.load_file(&path)?;
        }

        Ok(total)
    }

    /// Load a file, or every RON file if `path` is a directory
    pub fn load_path(&mut self, path: &Path) -> Result<usize, ChipDbError> {
        if path.is_dir() {
            self.load_dir(path)
        } else {
            self.load_file(path)
        }
    }

    /// Get all chips in the database
    pub fn chips(&self) -> &[ChipModel] {
        &self.chips
    }

    /// Get the number of chips in the database
    pub fn len(&self) -> usize {
        self.chips.len()
    }

    /// Check if the database is empty
    pub fn is_empty(&self) -> bool {
        self.chips.is_empty()
    }

    /// All entries for a chip id, in table order
    pub fn find_by_chip(&self, chip: u16) -> Vec<&ChipModel> {
        self.chips.iter().filter(|c| c.chip == chip).collect()
    }

    /// Find entries by name (case-insensitive partial match)
    pub fn find_by_name(&self, name: &str) -> Vec<&ChipModel> {
        let name_lower = name.to_lowercase();
        self.chips
            .iter()
            .filter(|c| c.names.iter().any(|n| n.to_lowercase().contains(&name_lower)))
            .collect()
    }

    /// Iterate over all chips
    pub fn iter(&self) -> impl Iterator<Item = &ChipModel> {
        self.chips.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &[ChipSignature] = &[
        ChipSignature::new(0xBD06, 2, &["6983", "6986"]).rev(0x08),
        ChipSignature::new(0xBD06, 2, &["6983", "6986"]).rev(0x0C),
        ChipSignature::new(0xAC43, 0, &["9387"]),
    ];

    #[test]
    fn test_from_signatures() {
        let db = ChipDatabase::from_signatures("Alcor Micro", TABLE);
        assert_eq!(db.len(), 3);
        let found = db.find_by_chip(0xBD06);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].rev, Some(0x08));
        assert_eq!(found[1].rev, Some(0x0C));
        assert!(db.find_by_chip(0x1234).is_empty());
    }

    #[test]
    fn test_load_ron() {
        let ron = r#"
        (
            vendor: "Alcor Micro",
            chips: [
                (chip: 0xFB00, rev: Some(0x80), generation: 15, names: ["6989SN-GTG", "6998SN"]),
                (chip: 0xFC00, generation: 16),
            ],
        )
        "#;

        let mut db = ChipDatabase::from_signatures("Alcor Micro", TABLE);
        let count = db.load_ron(ron).unwrap();

        assert_eq!(count, 2);
        assert_eq!(db.len(), 5);

        let chip = db.find_by_chip(0xFB00)[0];
        assert_eq!(chip.vendor, "Alcor Micro");
        assert_eq!(chip.rev, Some(0x80));
        assert_eq!(chip.otp, None);
        assert_eq!(chip.generation, 15);
        assert_eq!(chip.joined_names("AU"), "AU6989SN-GTG / AU6998SN");

        let proto = db.find_by_chip(0xFC00)[0];
        assert_eq!(proto.names, vec!["???"]);
        assert_eq!(proto.rev, None);

        assert_eq!(db.find_by_name("gtg").len(), 1);
    }

    #[test]
    fn test_load_ron_rejects_empty_names() {
        let ron = r#"(vendor: "Alcor Micro", chips: [(chip: 0x1111, names: [])])"#;
        let mut db = ChipDatabase::new();
        assert!(matches!(db.load_ron(ron), Err(ChipDbError::Validation(_))));
        assert!(db.is_empty());
    }

    #[test]
    fn test_load_ron_parse_error() {
        let mut db = ChipDatabase::new();
        assert!(matches!(db.load_ron("(vendor: 1)"), Err(ChipDbError::Parse(_))));
    }
}
