mod engine;
mod error;
pub mod item_catalog;
mod types;

pub use crate::checksum::ChecksumStatus;
pub use engine::{Engine, Session};
pub use error::{CoreError, CoreErrorCode};
pub use item_catalog::{all_items, item_code_for_name, lookup_item_name};
pub use types::{
    EMPTY_SLOT_NAME, ExportOptions, FieldValue, InventoryEntry, ItemCatalogEntry, SlotSnapshot,
};
