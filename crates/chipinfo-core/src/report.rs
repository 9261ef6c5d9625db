//! Report model
//!
//! A [`Report`] is the ordered list of findings for one device. Decoders
//! append entries; insertion order is display order and field names may
//! repeat (two decoders can each add a `Controller` line, and an `Error`
//! line can follow successful entries).

use core::fmt;

use crate::flash::FlashId;

/// How a raw value should be rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatKind {
    /// Upper-case hexadecimal without prefix
    Hex,
    /// `<n> byte(s)`
    SizeBytes,
    /// Decoded flash ID with manufacturer name
    FlashId,
}

/// Raw value of a report entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Free text
    Text(String),
    /// Unsigned number
    Number(u64),
    /// Raw bytes
    Bytes(Vec<u8>),
    /// The datum could not be obtained
    Unavailable,
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(n.into())
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(b)
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Value::Bytes(b.to_vec())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Unavailable, Into::into)
    }
}

/// One report line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    /// Field name
    pub field: String,
    /// Raw value
    pub value: Value,
    /// Optional rendering hint
    pub format: Option<FormatKind>,
}

impl ReportEntry {
    /// Render the value as display text
    pub fn display_value(&self) -> String {
        match (&self.value, self.format) {
            (Value::Unavailable, _) => "Unavailable".to_string(),
            (Value::Number(n), Some(FormatKind::Hex)) => format!("{:X}", n),
            (Value::Number(n), Some(FormatKind::SizeBytes)) => format!("{} byte(s)", n),
            (Value::Bytes(b), Some(FormatKind::FlashId)) => FlashId::decode(b).to_string(),
            (Value::Text(s), _) => s.clone(),
            (Value::Number(n), _) => n.to_string(),
            (Value::Bytes(b), _) => b
                .iter()
                .map(|x| format!("{:02X}", x))
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

/// Ordered collection of findings for one device
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    entries: Vec<ReportEntry>,
}

impl Report {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry with an optional format hint
    pub fn push(
        &mut self,
        field: impl Into<String>,
        value: impl Into<Value>,
        format: Option<FormatKind>,
    ) {
        self.entries.push(ReportEntry {
            field: field.into(),
            value: value.into(),
            format,
        });
    }

    /// Append a plain entry
    pub fn add(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.push(field, value, None);
    }

    /// Append an entry rendered with `format`
    pub fn add_formatted(
        &mut self,
        field: impl Into<String>,
        value: impl Into<Value>,
        format: FormatKind,
    ) {
        self.push(field, value, Some(format));
    }

    /// Append the terminal `Error` entry
    pub fn add_error(&mut self, error: &dyn fmt::Display) {
        self.add("Error", error.to_string());
    }

    /// All entries in insertion order
    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    /// First entry with the given field name
    pub fn get(&self, field: &str) -> Option<&ReportEntry> {
        self.entries.iter().find(|e| e.field == field)
    }

    /// Field names in order
    pub fn fields(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.field.as_str()).collect()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rendered `key: value` lines with keys padded to a common width
    pub fn lines(&self) -> Vec<String> {
        let width = self.entries.iter().map(|e| e.field.len()).max().unwrap_or(0);
        self.entries
            .iter()
            .map(|e| format!("{:width$}: {}", e.field, e.display_value(), width = width))
            .collect()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
