use std::fmt::Write as _;

use serde_json::{Map as JsonMap, Value as JsonValue};
use tww_core::core_api::item_catalog::EMPTY_ITEM_CODE;
use tww_core::core_api::{ChecksumStatus, InventoryEntry, SlotSnapshot};

const SHEET_WIDTH: usize = 76;
const INVENTORY_COL_WIDTH_A: usize = 25;
const INVENTORY_COL_WIDTH_B: usize = 25;
const INVENTORY_COL_WIDTH_C: usize = 23;
const FILE_SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    #[default]
    CanonicalV1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextRenderOptions {
    /// Also list empty inventory slots and raw item codes.
    pub verbose: bool,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FieldSelection {
    pub name: bool,
    pub stage: bool,
    pub spawn_id: bool,
    pub room_id: bool,
    pub layer_id: bool,
    pub inventory: bool,
    pub checksum: bool,
}

impl FieldSelection {
    pub fn is_any_selected(&self) -> bool {
        self.name
            || self.stage
            || self.spawn_id
            || self.room_id
            || self.layer_id
            || self.inventory
            || self.checksum
    }
}

pub fn render_json_full(slots: &[SlotSnapshot], style: JsonStyle) -> JsonValue {
    match style {
        JsonStyle::CanonicalV1 => {
            let mut out = JsonMap::new();
            out.insert(
                "slots".to_string(),
                JsonValue::Array(slots.iter().map(slot_to_json).collect()),
            );
            JsonValue::Object(out)
        }
    }
}

pub fn render_json_selected(
    slots: &[SlotSnapshot],
    fields: &FieldSelection,
    style: JsonStyle,
) -> JsonValue {
    match style {
        JsonStyle::CanonicalV1 => {
            let mut out = JsonMap::new();
            out.insert(
                "slots".to_string(),
                JsonValue::Array(
                    slots
                        .iter()
                        .map(|slot| JsonValue::Object(selected_json(fields, slot)))
                        .collect(),
                ),
            );
            JsonValue::Object(out)
        }
    }
}

/// `key=value` pairs for the selected fields of one slot, in a fixed order.
pub fn render_selected_pairs(
    slot: &SlotSnapshot,
    fields: &FieldSelection,
) -> Vec<(&'static str, String)> {
    let mut out = Vec::new();

    if fields.name {
        out.push(("name", slot.display_name().to_string()));
    }
    if fields.stage {
        out.push(("stage", slot.stage.clone()));
    }
    if fields.spawn_id {
        out.push(("spawn_id", slot.spawn_id.to_string()));
    }
    if fields.room_id {
        out.push(("room_id", slot.room_id.to_string()));
    }
    if fields.layer_id {
        out.push(("layer_id", slot.layer_id.to_string()));
    }
    if fields.inventory {
        for item in &slot.inventory {
            out.push((
                "inventory",
                format!("{:02} 0x{:02X} {}", item.index, item.code, item.name),
            ));
        }
    }
    if fields.checksum {
        out.push(("checksum", format_checksum_state(&slot.checksum)));
    }

    out
}

pub fn render_slot_sheet(slots: &[SlotSnapshot]) -> String {
    render_slot_sheet_with_options(slots, TextRenderOptions::default())
}

pub fn render_slot_sheet_with_options(
    slots: &[SlotSnapshot],
    options: TextRenderOptions,
) -> String {
    let mut out = String::new();
    writeln!(&mut out).expect("writing to String cannot fail");
    writeln!(&mut out, "{}", centered_no_trailing("THE WIND WAKER HD", SHEET_WIDTH))
        .expect("writing to String cannot fail");
    writeln!(&mut out, "{}", centered_no_trailing("SAVE FILE", SHEET_WIDTH))
        .expect("writing to String cannot fail");

    for slot in slots {
        writeln!(&mut out).expect("writing to String cannot fail");
        write_slot_section(&mut out, slot, options);
    }
    out
}

/// Per-slot stored vs calculated checksums.
pub fn render_checksum_report(statuses: &[ChecksumStatus]) -> String {
    let mut out = String::new();
    for status in statuses {
        writeln!(&mut out, "Save slot {}:", status.slot + 1)
            .expect("writing to String cannot fail");
        writeln!(&mut out, "  Existing checksum: {}", format_checksum(status.stored))
            .expect("writing to String cannot fail");
        writeln!(
            &mut out,
            "  Calculated checksum: {}",
            format_checksum(status.calculated)
        )
        .expect("writing to String cannot fail");
    }
    out
}

pub fn format_checksum(value: u64) -> String {
    format!("0x{value:016x}")
}

/// Human-readable size with two decimals at most, e.g. `8.3 KB`.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0;
    let mut scale = 1u64;
    while unit + 1 < FILE_SIZE_UNITS.len() && bytes >= scale * 1024 {
        scale *= 1024;
        unit += 1;
    }
    let value = (bytes as f64 / scale as f64 * 100.0).round() / 100.0;
    format!("{value} {}", FILE_SIZE_UNITS[unit])
}

fn write_slot_section(out: &mut String, slot: &SlotSnapshot, options: TextRenderOptions) {
    writeln!(
        out,
        " ::: Slot {} :::  {}",
        slot.index + 1,
        slot.display_name()
    )
    .expect("writing to String cannot fail");
    writeln!(
        out,
        "  Stage: {:<10}Spawn: {:<6}Room: {:<6}Layer: {}",
        slot.stage, slot.spawn_id, slot.room_id, slot.layer_id
    )
    .expect("writing to String cannot fail");
    writeln!(out, "  Checksum: {}", format_checksum_state(&slot.checksum))
        .expect("writing to String cannot fail");
    writeln!(out).expect("writing to String cannot fail");
    write_inventory_section(out, &slot.inventory, options);
}

fn write_inventory_section(
    out: &mut String,
    inventory: &[InventoryEntry],
    options: TextRenderOptions,
) {
    writeln!(out, "  ::: Inventory :::").expect("writing to String cannot fail");

    let rows: Vec<String> = inventory
        .iter()
        .filter(|item| options.verbose || item.code != EMPTY_ITEM_CODE)
        .map(|item| {
            if options.verbose {
                format!("{:02} {} [{:02X}]", item.index, item.name, item.code)
            } else {
                format!("{:02} {}", item.index, item.name)
            }
        })
        .collect();
    if rows.is_empty() {
        writeln!(out, "   none").expect("writing to String cannot fail");
        return;
    }

    for chunk in rows.chunks(3) {
        let col1 = chunk.first().map(String::as_str).unwrap_or("");
        let col2 = chunk.get(1).map(String::as_str).unwrap_or("");
        let col3 = chunk.get(2).map(String::as_str).unwrap_or("");
        let line = format!(
            "   {:<a$}{:<b$}{:<c$}",
            fit_column(col1, INVENTORY_COL_WIDTH_A),
            fit_column(col2, INVENTORY_COL_WIDTH_B),
            fit_column(col3, INVENTORY_COL_WIDTH_C),
            a = INVENTORY_COL_WIDTH_A,
            b = INVENTORY_COL_WIDTH_B,
            c = INVENTORY_COL_WIDTH_C
        );
        writeln!(out, "{}", line.trim_end()).expect("writing to String cannot fail");
    }
}

fn selected_json(fields: &FieldSelection, slot: &SlotSnapshot) -> JsonMap<String, JsonValue> {
    let mut out = JsonMap::new();

    out.insert("slot".to_string(), JsonValue::from(slot.index + 1));
    if fields.name {
        out.insert("name".to_string(), JsonValue::String(slot.name.clone()));
    }
    if fields.stage {
        out.insert("stage".to_string(), JsonValue::String(slot.stage.clone()));
    }
    if fields.spawn_id {
        out.insert("spawn_id".to_string(), JsonValue::from(slot.spawn_id));
    }
    if fields.room_id {
        out.insert("room_id".to_string(), JsonValue::from(slot.room_id));
    }
    if fields.layer_id {
        out.insert("layer_id".to_string(), JsonValue::from(slot.layer_id));
    }
    if fields.inventory {
        out.insert("inventory".to_string(), inventory_to_json(&slot.inventory));
    }
    if fields.checksum {
        out.insert("checksum".to_string(), checksum_to_json(&slot.checksum));
    }

    out
}

fn slot_to_json(slot: &SlotSnapshot) -> JsonValue {
    let mut out = JsonMap::new();
    out.insert("slot".to_string(), JsonValue::from(slot.index + 1));
    out.insert("name".to_string(), JsonValue::String(slot.name.clone()));
    out.insert("empty".to_string(), JsonValue::Bool(slot.is_empty()));
    out.insert("stage".to_string(), JsonValue::String(slot.stage.clone()));
    out.insert("spawn_id".to_string(), JsonValue::from(slot.spawn_id));
    out.insert("room_id".to_string(), JsonValue::from(slot.room_id));
    out.insert("layer_id".to_string(), JsonValue::from(slot.layer_id));
    out.insert("inventory".to_string(), inventory_to_json(&slot.inventory));
    out.insert("checksum".to_string(), checksum_to_json(&slot.checksum));
    JsonValue::Object(out)
}

fn inventory_to_json(inventory: &[InventoryEntry]) -> JsonValue {
    JsonValue::Array(
        inventory
            .iter()
            .map(|item| {
                let mut m = JsonMap::new();
                m.insert("index".to_string(), JsonValue::from(item.index));
                m.insert("code".to_string(), JsonValue::from(item.code));
                m.insert("name".to_string(), JsonValue::String(item.name.clone()));
                JsonValue::Object(m)
            })
            .collect(),
    )
}

fn checksum_to_json(status: &ChecksumStatus) -> JsonValue {
    let mut m = JsonMap::new();
    m.insert(
        "stored".to_string(),
        JsonValue::String(format_checksum(status.stored)),
    );
    m.insert(
        "calculated".to_string(),
        JsonValue::String(format_checksum(status.calculated)),
    );
    m.insert("valid".to_string(), JsonValue::Bool(status.valid));
    JsonValue::Object(m)
}

fn format_checksum_state(status: &ChecksumStatus) -> String {
    if status.valid {
        format!("{} (valid)", format_checksum(status.stored))
    } else {
        format!(
            "{} (stale, expected {})",
            format_checksum(status.stored),
            format_checksum(status.calculated)
        )
    }
}

fn fit_column(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    if width <= 3 {
        return value.chars().take(width).collect();
    }

    let mut out = String::with_capacity(width);
    for ch in value.chars().take(width - 3) {
        out.push(ch);
    }
    out.push_str("...");
    out
}

fn centered_no_trailing(value: &str, width: usize) -> String {
    let len = value.chars().count();
    if len >= width {
        return value.to_string();
    }

    let left_padding = (width - len) / 2;
    format!("{}{}", " ".repeat(left_padding), value)
}
