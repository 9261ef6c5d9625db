//! Chip signature types

/// Built-in chip table row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChipSignature {
    /// Chip id reported by the controller
    pub chip: u16,
    /// Revision byte, `None` matches any revision
    pub rev: Option<u8>,
    /// OTP fingerprint, `None` if the row does not depend on it
    pub otp: Option<u32>,
    /// Firmware generation, selects the command variants to use
    pub generation: u8,
    /// Commercial names (without vendor prefix)
    pub names: &'static [&'static str],
}

impl ChipSignature {
    /// Row matching any revision
    pub const fn new(chip: u16, generation: u8, names: &'static [&'static str]) -> Self {
        Self {
            chip,
            rev: None,
            otp: None,
            generation,
            names,
        }
    }

    /// Restrict the row to one revision
    pub const fn rev(self, rev: u8) -> Self {
        Self {
            rev: Some(rev),
            ..self
        }
    }

    /// Attach an OTP fingerprint
    pub const fn otp(self, otp: u32) -> Self {
        Self {
            otp: Some(otp),
            ..self
        }
    }
}

/// Chip database entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChipModel {
    /// Controller vendor
    pub vendor: String,
    /// Chip id reported by the controller
    pub chip: u16,
    /// Revision byte, `None` matches any revision
    pub rev: Option<u8>,
    /// OTP fingerprint
    pub otp: Option<u32>,
    /// Firmware generation
    pub generation: u8,
    /// Commercial names (without vendor prefix)
    pub names: Vec<String>,
}

impl ChipModel {
    /// Owned copy of a built-in row
    pub fn from_signature(vendor: &str, sig: &ChipSignature) -> Self {
        Self {
            vendor: vendor.to_string(),
            chip: sig.chip,
            rev: sig.rev,
            otp: sig.otp,
            generation: sig.generation,
            names: sig.names.iter().map(|n| n.to_string()).collect(),
        }
    }

    /// True if the entry accepts the given device revision
    ///
    /// Entries without a revision accept anything.
    pub fn accepts_rev(&self, rev: Option<u8>) -> bool {
        self.rev.is_none() || self.rev == rev
    }

    /// Names joined with `" / "`, each given `prefix`
    pub fn joined_names(&self, prefix: &str) -> String {
        self.names
            .iter()
            .map(|n| format!("{}{}", prefix, n))
            .collect::<Vec<_>>()
            .join(" / ")
    }
}
