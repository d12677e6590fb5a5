use crate::checksum::ChecksumStatus;
use crate::layout::{FieldId, INVENTORY_LEN, SLOT_COUNT};
use crate::save::SaveContainer;

use super::error::CoreError;
use super::item_catalog;
use super::types::{ExportOptions, FieldValue, InventoryEntry, SlotSnapshot};

#[derive(Debug, Default, Clone, Copy)]
pub struct Engine;

/// An opened save file. Owns its container exclusively; exporting needs
/// `&mut self`, so no edit can interleave with checksum patching.
#[derive(Debug)]
pub struct Session {
    container: SaveContainer,
}

impl Engine {
    pub fn new() -> Self {
        Self
    }

    pub fn open_bytes<B: AsRef<[u8]>>(&self, bytes: B) -> Result<Session, CoreError> {
        let container = SaveContainer::load(bytes.as_ref()).map_err(|e| {
            CoreError::new(e.code, format!("failed to open save container: {}", e.message))
        })?;
        Ok(Session { container })
    }
}

impl Session {
    pub fn has_name_table(&self) -> bool {
        self.container.has_name_table()
    }

    pub fn slot(&self, slot: usize) -> Result<SlotSnapshot, CoreError> {
        Ok(SlotSnapshot {
            index: slot,
            name: self.text_field(slot, FieldId::Name)?,
            stage: self.text_field(slot, FieldId::Stage)?,
            spawn_id: self.byte_field(slot, FieldId::SpawnId)?,
            room_id: self.byte_field(slot, FieldId::RoomId)?,
            layer_id: self.byte_field(slot, FieldId::LayerId)?,
            inventory: self.inventory(slot)?,
            checksum: self.container.checksum_status(slot)?,
        })
    }

    pub fn slots(&self) -> Result<Vec<SlotSnapshot>, CoreError> {
        (0..SLOT_COUNT).map(|slot| self.slot(slot)).collect()
    }

    pub fn inventory(&self, slot: usize) -> Result<Vec<InventoryEntry>, CoreError> {
        let codes = self.container.inventory(slot)?;
        Ok(codes
            .iter()
            .enumerate()
            .map(|(index, &code)| InventoryEntry {
                index,
                code,
                name: item_catalog::lookup_item_name(code),
                known: item_catalog::lookup(code).is_some(),
            })
            .collect())
    }

    pub fn checksums(&self) -> Result<Vec<ChecksumStatus>, CoreError> {
        (0..SLOT_COUNT)
            .map(|slot| self.container.checksum_status(slot))
            .collect()
    }

    pub fn get_field(&self, slot: usize, field: FieldId) -> Result<FieldValue, CoreError> {
        self.container.get_field(slot, field)
    }

    pub fn set_field(
        &mut self,
        slot: usize,
        field: FieldId,
        value: FieldValue,
    ) -> Result<(), CoreError> {
        self.container
            .set_field(slot, field, value)
            .map_err(|e| CoreError::new(e.code, format!("failed to set {field}: {}", e.message)))
    }

    pub fn set_name(&mut self, slot: usize, name: &str) -> Result<(), CoreError> {
        self.set_field(slot, FieldId::Name, name.into())
    }

    pub fn set_stage(&mut self, slot: usize, stage: &str) -> Result<(), CoreError> {
        self.set_field(slot, FieldId::Stage, stage.into())
    }

    pub fn set_spawn_id(&mut self, slot: usize, value: i64) -> Result<(), CoreError> {
        self.set_field(slot, FieldId::SpawnId, value.into())
    }

    pub fn set_room_id(&mut self, slot: usize, value: i64) -> Result<(), CoreError> {
        self.set_field(slot, FieldId::RoomId, value.into())
    }

    pub fn set_layer_id(&mut self, slot: usize, value: i64) -> Result<(), CoreError> {
        self.set_field(slot, FieldId::LayerId, value.into())
    }

    pub fn set_inventory_item(
        &mut self,
        slot: usize,
        index: usize,
        code: u8,
    ) -> Result<(), CoreError> {
        if index >= INVENTORY_LEN {
            return Err(CoreError::range(format!(
                "invalid inventory index {index}, expected 0..{}",
                INVENTORY_LEN - 1
            )));
        }
        self.set_field(slot, FieldId::Inventory(index), code.into())
    }

    /// Sets an inventory slot by catalog name or byte literal.
    pub fn set_inventory_item_by_name(
        &mut self,
        slot: usize,
        index: usize,
        item: &str,
    ) -> Result<(), CoreError> {
        let code = item_catalog::item_code_for_name(item)
            .ok_or_else(|| CoreError::parse(format!("unknown item '{item}'")))?;
        self.set_inventory_item(slot, index, code)
    }

    pub fn export(&mut self, options: ExportOptions) -> Result<Vec<u8>, CoreError> {
        if options.fix_checksums {
            self.container.export()
        } else {
            Ok(self.container.to_bytes_unpatched())
        }
    }

    fn text_field(&self, slot: usize, field: FieldId) -> Result<String, CoreError> {
        Ok(self.container.get_field(slot, field)?.into_text())
    }

    fn byte_field(&self, slot: usize, field: FieldId) -> Result<u8, CoreError> {
        let value = self.container.get_field(slot, field)?;
        value
            .as_number()
            .and_then(|n| u8::try_from(n).ok())
            .ok_or_else(|| CoreError::range(format!("{field} holds non-byte value {value}")))
    }
}
