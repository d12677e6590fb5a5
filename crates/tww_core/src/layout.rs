use std::fmt;
use std::str::FromStr;

use crate::core_api::CoreError;

pub const SLOT_COUNT: usize = 3;
pub const SLOT_SIZE: usize = 0xA94;
pub const CHECKSUM_WIDTH: usize = 8;
pub const CHECKSUM_OFFSET: usize = SLOT_SIZE - CHECKSUM_WIDTH;

/// Bytes covered by the three slot records.
pub const SLOTS_LEN: usize = SLOT_COUNT * SLOT_SIZE;
/// Slot records followed by the trailer holding the name table.
pub const CONTAINER_LEN: usize = 0x2130;

pub const NAME_OFFSETS: [usize; SLOT_COUNT] = [0x2035, 0x2047, 0x2059];
pub const DEFAULT_NAME_CHARS: usize = 9;

pub const STAGE_OFFSET: usize = 0x30;
pub const STAGE_WIDTH: usize = 8;
pub const SPAWN_ID_OFFSET: usize = 0x38;
pub const ROOM_ID_OFFSET: usize = 0x39;
pub const LAYER_ID_OFFSET: usize = 0x3A;
pub const INVENTORY_OFFSET: usize = 0x3C;
pub const INVENTORY_LEN: usize = 21;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: usize,
    pub end: usize,
}

impl ByteRange {
    pub fn overlaps(&self, other: &ByteRange) -> bool {
        self.start < other.end && other.start < self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    Name,
    Stage,
    SpawnId,
    RoomId,
    LayerId,
    Inventory(usize),
}

/// How the bytes of a field are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEncoding {
    Interleaved { max_chars: usize },
    FixedString { width: usize },
    Byte,
}

impl FieldId {
    pub const SCALARS: [FieldId; 5] = [
        FieldId::Name,
        FieldId::Stage,
        FieldId::SpawnId,
        FieldId::RoomId,
        FieldId::LayerId,
    ];
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            FieldId::Name => f.write_str("name"),
            FieldId::Stage => f.write_str("stage"),
            FieldId::SpawnId => f.write_str("spawn_id"),
            FieldId::RoomId => f.write_str("room_id"),
            FieldId::LayerId => f.write_str("layer_id"),
            FieldId::Inventory(index) => write!(f, "inventory[{index}]"),
        }
    }
}

impl FromStr for FieldId {
    type Err = CoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "name" => return Ok(FieldId::Name),
            "stage" => return Ok(FieldId::Stage),
            "spawn" | "spawn_id" => return Ok(FieldId::SpawnId),
            "room" | "room_id" => return Ok(FieldId::RoomId),
            "layer" | "layer_id" => return Ok(FieldId::LayerId),
            _ => {}
        }

        let index = normalized
            .strip_prefix("inventory[")
            .and_then(|rest| rest.strip_suffix(']'))
            .or_else(|| normalized.strip_prefix("inventory."))
            .and_then(|raw| raw.parse::<usize>().ok())
            .ok_or_else(|| {
                CoreError::parse(format!(
                    "unknown field '{value}', expected one of: name, stage, spawn_id, room_id, layer_id, inventory[N]"
                ))
            })?;
        if index >= INVENTORY_LEN {
            return Err(CoreError::range(format!(
                "inventory index {index} out of range, expected 0..{}",
                INVENTORY_LEN - 1
            )));
        }
        Ok(FieldId::Inventory(index))
    }
}

/// Where one slot's data lives in the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotLayout {
    pub index: usize,
    pub slot_start: usize,
    pub name_offset: usize,
}

pub const SLOT_LAYOUTS: [SlotLayout; SLOT_COUNT] = [
    SlotLayout {
        index: 0,
        slot_start: 0,
        name_offset: NAME_OFFSETS[0],
    },
    SlotLayout {
        index: 1,
        slot_start: SLOT_SIZE,
        name_offset: NAME_OFFSETS[1],
    },
    SlotLayout {
        index: 2,
        slot_start: 2 * SLOT_SIZE,
        name_offset: NAME_OFFSETS[2],
    },
];

impl SlotLayout {
    pub fn get(slot: usize) -> Result<&'static SlotLayout, CoreError> {
        SLOT_LAYOUTS.get(slot).ok_or_else(|| {
            CoreError::range(format!(
                "invalid slot index {slot}, expected 0..{}",
                SLOT_COUNT - 1
            ))
        })
    }

    /// Name capacity in characters, measured against the next slot's name.
    pub fn name_capacity(&self) -> usize {
        NAME_OFFSETS
            .get(self.index + 1)
            .map(|next| (next - self.name_offset) / 2)
            .unwrap_or(DEFAULT_NAME_CHARS)
    }

    /// Bytes summed by the checksum: everything in the slot before the checksum.
    pub fn checksummed_range(&self) -> ByteRange {
        ByteRange {
            start: self.slot_start,
            end: self.slot_start + CHECKSUM_OFFSET,
        }
    }

    pub fn checksum_range(&self) -> ByteRange {
        ByteRange {
            start: self.slot_start + CHECKSUM_OFFSET,
            end: self.slot_start + SLOT_SIZE,
        }
    }

    pub fn encoding(&self, field: FieldId) -> FieldEncoding {
        match field {
            FieldId::Name => FieldEncoding::Interleaved {
                max_chars: self.name_capacity(),
            },
            FieldId::Stage => FieldEncoding::FixedString { width: STAGE_WIDTH },
            FieldId::SpawnId | FieldId::RoomId | FieldId::LayerId | FieldId::Inventory(_) => {
                FieldEncoding::Byte
            }
        }
    }

    /// Absolute byte range of `field` within the container.
    pub fn field_range(&self, field: FieldId) -> Result<ByteRange, CoreError> {
        let (start, len) = match field {
            FieldId::Name => (self.name_offset, self.name_capacity() * 2),
            FieldId::Stage => (self.slot_start + STAGE_OFFSET, STAGE_WIDTH),
            FieldId::SpawnId => (self.slot_start + SPAWN_ID_OFFSET, 1),
            FieldId::RoomId => (self.slot_start + ROOM_ID_OFFSET, 1),
            FieldId::LayerId => (self.slot_start + LAYER_ID_OFFSET, 1),
            FieldId::Inventory(index) => {
                if index >= INVENTORY_LEN {
                    return Err(CoreError::range(format!(
                        "inventory index {index} out of range, expected 0..{}",
                        INVENTORY_LEN - 1
                    )));
                }
                (self.slot_start + INVENTORY_OFFSET + index, 1)
            }
        };
        Ok(ByteRange {
            start,
            end: start + len,
        })
    }
}

/// Checks that the static tables describe a consistent container: slot fields
/// stay inside their slot ahead of the checksum, and names neither overlap
/// each other nor any slot record.
pub fn validate_tables() -> Result<(), CoreError> {
    let mut names: Vec<ByteRange> = Vec::with_capacity(SLOT_COUNT);

    for layout in &SLOT_LAYOUTS {
        let body = layout.checksummed_range();
        let mut fields: Vec<FieldId> = FieldId::SCALARS[1..].to_vec();
        fields.extend((0..INVENTORY_LEN).map(FieldId::Inventory));
        for field in fields {
            let range = layout.field_range(field)?;
            if range.start < body.start || range.end > body.end {
                return Err(CoreError::format(format!(
                    "slot {} field {field} 0x{:X}..0x{:X} leaves the slot body",
                    layout.index, range.start, range.end
                )));
            }
        }

        let name = layout.field_range(FieldId::Name)?;
        if name.start < SLOTS_LEN || name.end > CONTAINER_LEN {
            return Err(CoreError::format(format!(
                "slot {} name 0x{:X}..0x{:X} is not inside the trailer",
                layout.index, name.start, name.end
            )));
        }
        if let Some(other) = names.iter().find(|other| other.overlaps(&name)) {
            return Err(CoreError::format(format!(
                "slot {} name overlaps name at 0x{:X}",
                layout.index, other.start
            )));
        }
        names.push(name);
    }

    Ok(())
}
