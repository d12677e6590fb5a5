use crate::checksum::{self, ChecksumStatus};
use crate::codec;
use crate::core_api::item_catalog;
use crate::core_api::{CoreError, FieldValue};
use crate::layout::{
    CONTAINER_LEN, FieldEncoding, FieldId, INVENTORY_LEN, SLOT_COUNT, SLOTS_LEN, SlotLayout,
};

/// The whole save file held in memory. Every edit patches `bytes` in place;
/// nothing is ever inserted or removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveContainer {
    bytes: Vec<u8>,
}

impl SaveContainer {
    /// Lengths accepted by [`SaveContainer::load`]: the bare slot records, or
    /// the slot records followed by the name table trailer.
    pub const SUPPORTED_LENGTHS: [usize; 2] = [SLOTS_LEN, CONTAINER_LEN];

    pub fn load(bytes: impl Into<Vec<u8>>) -> Result<Self, CoreError> {
        let bytes = bytes.into();
        if !Self::SUPPORTED_LENGTHS.contains(&bytes.len()) {
            return Err(CoreError::format(format!(
                "unexpected save size {} bytes, expected {SLOTS_LEN} (0x{SLOTS_LEN:X}) or {CONTAINER_LEN} (0x{CONTAINER_LEN:X})",
                bytes.len()
            )));
        }
        Ok(Self { bytes })
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Whether the buffer extends far enough to hold the slot names.
    pub fn has_name_table(&self) -> bool {
        self.bytes.len() >= CONTAINER_LEN
    }

    pub fn get_field(&self, slot: usize, field: FieldId) -> Result<FieldValue, CoreError> {
        let layout = SlotLayout::get(slot)?;
        let range = layout.field_range(field)?;
        match layout.encoding(field) {
            FieldEncoding::Interleaved { max_chars } => Ok(FieldValue::Text(
                codec::read_interleaved_string(&self.bytes, range.start, max_chars),
            )),
            FieldEncoding::FixedString { width } => Ok(FieldValue::Text(
                codec::read_fixed_string(&self.bytes, range.start, width)?,
            )),
            FieldEncoding::Byte => {
                codec::read_u8(&self.bytes, range.start).map(|b| FieldValue::Number(b.into()))
            }
        }
    }

    /// Writes `value` into `field`, truncating text to the field width and
    /// clamping numbers into a byte. Text written to an inventory slot is
    /// looked up in the item catalog first.
    pub fn set_field(
        &mut self,
        slot: usize,
        field: FieldId,
        value: FieldValue,
    ) -> Result<(), CoreError> {
        let layout = SlotLayout::get(slot)?;
        let range = layout.field_range(field)?;
        match layout.encoding(field) {
            FieldEncoding::Interleaved { max_chars } => codec::write_interleaved_string(
                &mut self.bytes,
                range.start,
                max_chars,
                &value.into_text(),
            ),
            FieldEncoding::FixedString { width } => {
                codec::write_fixed_string(&mut self.bytes, range.start, width, &value.into_text())
            }
            FieldEncoding::Byte => {
                let byte = match (&value, field) {
                    (FieldValue::Number(n), _) => codec::clamp_byte(*n),
                    (FieldValue::Text(text), FieldId::Inventory(_)) => {
                        item_catalog::item_code_for_name(text)
                            .unwrap_or_else(|| codec::coerce_byte(text))
                    }
                    (FieldValue::Text(text), _) => codec::coerce_byte(text),
                };
                codec::write_u8(&mut self.bytes, range.start, byte)
            }
        }
    }

    pub fn inventory(&self, slot: usize) -> Result<[u8; INVENTORY_LEN], CoreError> {
        let layout = SlotLayout::get(slot)?;
        let first = layout.field_range(FieldId::Inventory(0))?;
        self.bytes
            .get(first.start..first.start + INVENTORY_LEN)
            .and_then(|bytes| bytes.try_into().ok())
            .ok_or_else(|| {
                CoreError::range(format!(
                    "slot {slot} inventory at 0x{:X} is outside buffer of {} bytes",
                    first.start,
                    self.bytes.len()
                ))
            })
    }

    pub fn checksum_status(&self, slot: usize) -> Result<ChecksumStatus, CoreError> {
        checksum::status(&self.bytes, slot)
    }

    pub fn validate_checksum(&self, slot: usize) -> Result<bool, CoreError> {
        checksum::validate(&self.bytes, slot)
    }

    pub fn patch_checksum(&mut self, slot: usize) -> Result<u64, CoreError> {
        checksum::patch(&mut self.bytes, slot)
    }

    pub fn patch_checksums(&mut self) -> Result<[u64; SLOT_COUNT], CoreError> {
        let mut written = [0u64; SLOT_COUNT];
        for (slot, value) in written.iter_mut().enumerate() {
            *value = self.patch_checksum(slot)?;
        }
        Ok(written)
    }

    /// Rewrites all three slot checksums and returns a copy of the buffer.
    pub fn export(&mut self) -> Result<Vec<u8>, CoreError> {
        self.patch_checksums()?;
        Ok(self.bytes.clone())
    }

    /// A copy of the buffer with checksums left exactly as they are.
    pub fn to_bytes_unpatched(&self) -> Vec<u8> {
        self.bytes.clone()
    }
}
