use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::checksum::ChecksumStatus;

/// Shown in place of a slot name that decodes to nothing.
pub const EMPTY_SLOT_NAME: &str = "Empty Slot";

/// A value read from or written to a slot field. Text fields hold names and
/// stage identifiers; every other field is a single byte.
///
/// Any JSON number deserializes: fractions are truncated, out-of-range
/// values saturate and `NaN` becomes 0, leaving byte clamping to the writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(i64),
    Text(String),
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(FieldValueVisitor)
    }
}

struct FieldValueVisitor;

impl Visitor<'_> for FieldValueVisitor {
    type Value = FieldValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number or a string")
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<FieldValue, E> {
        Ok(FieldValue::Number(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<FieldValue, E> {
        Ok(FieldValue::Number(i64::try_from(value).unwrap_or(i64::MAX)))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<FieldValue, E> {
        // `as` truncates toward zero, saturates at the i64 bounds and maps NaN to 0.
        Ok(FieldValue::Number(value as i64))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<FieldValue, E> {
        Ok(FieldValue::Text(value.to_string()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<FieldValue, E> {
        Ok(FieldValue::Text(value))
    }
}

impl FieldValue {
    pub fn as_number(&self) -> Option<i64> {
        match *self {
            FieldValue::Number(n) => Some(n),
            FieldValue::Text(_) => None,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            FieldValue::Text(text) => text,
            FieldValue::Number(n) => n.to_string(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<u8> for FieldValue {
    fn from(value: u8) -> Self {
        FieldValue::Number(value.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InventoryEntry {
    pub index: usize,
    pub code: u8,
    pub name: String,
    pub known: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemCatalogEntry {
    pub code: u8,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SlotSnapshot {
    pub index: usize,
    pub name: String,
    pub stage: String,
    pub spawn_id: u8,
    pub room_id: u8,
    pub layer_id: u8,
    pub inventory: Vec<InventoryEntry>,
    pub checksum: ChecksumStatus,
}

impl SlotSnapshot {
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }

    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            EMPTY_SLOT_NAME
        } else {
            &self.name
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportOptions {
    /// Recompute all three slot checksums before emitting. When off, the
    /// bytes are emitted exactly as edited and stale checksums stay in place.
    pub fix_checksums: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            fix_checksums: true,
        }
    }
}
