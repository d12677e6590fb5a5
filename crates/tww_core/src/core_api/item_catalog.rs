//! Built-in inventory item table.
//!
//! Codes are the single-byte item ids the game stores in the 21 inventory
//! slots. The table only drives display and name-based editing; bytes with no
//! entry are kept as-is and shown as `Unknown (0xNN)`.

use super::types::ItemCatalogEntry;

pub const EMPTY_ITEM_CODE: u8 = 0xFF;
pub const EMPTY_ITEM_NAME: &str = "Empty";

struct CatalogItem {
    code: u8,
    name: &'static str,
}

#[rustfmt::skip]
const ITEMS: &[CatalogItem] = &[
    // Equipment
    CatalogItem { code: 0x20, name: "Telescope" },
    CatalogItem { code: 0x21, name: "Tingle Bottle" },
    CatalogItem { code: 0x22, name: "Wind Waker" },
    CatalogItem { code: 0x23, name: "Picto Box" },
    CatalogItem { code: 0x24, name: "Spoils Bag" },
    CatalogItem { code: 0x25, name: "Grappling Hook" },
    CatalogItem { code: 0x26, name: "Deluxe Picto Box" },
    CatalogItem { code: 0x27, name: "Hero's Bow" },
    CatalogItem { code: 0x28, name: "Power Bracelets" },
    CatalogItem { code: 0x29, name: "Iron Boots" },
    CatalogItem { code: 0x2A, name: "Magic Armor" },
    CatalogItem { code: 0x2C, name: "Bait Bag" },
    CatalogItem { code: 0x2D, name: "Boomerang" },
    CatalogItem { code: 0x2F, name: "Hookshot" },
    CatalogItem { code: 0x30, name: "Delivery Bag" },
    CatalogItem { code: 0x31, name: "Bombs" },
    CatalogItem { code: 0x32, name: "Hero's Clothes" },
    CatalogItem { code: 0x33, name: "Skull Hammer" },
    CatalogItem { code: 0x34, name: "Deku Leaf" },
    CatalogItem { code: 0x35, name: "Fire and Ice Arrows" },
    CatalogItem { code: 0x36, name: "Light Arrow" },
    CatalogItem { code: 0x37, name: "Hero's New Clothes" },
    CatalogItem { code: 0x38, name: "Hero's Sword" },
    CatalogItem { code: 0x39, name: "Master Sword (Powerless)" },
    CatalogItem { code: 0x3A, name: "Master Sword (Half Power)" },
    CatalogItem { code: 0x3B, name: "Hero's Shield" },
    CatalogItem { code: 0x3C, name: "Mirror Shield" },
    CatalogItem { code: 0x3E, name: "Master Sword (Full Power)" },
    CatalogItem { code: 0x42, name: "Pirate's Charm" },
    CatalogItem { code: 0x43, name: "Hero's Charm" },
    CatalogItem { code: 0x78, name: "Sail" },
    CatalogItem { code: 0x79, name: "Swift Sail" },

    // Spoils
    CatalogItem { code: 0x45, name: "Skull Necklace" },
    CatalogItem { code: 0x46, name: "Boko Baba Seed" },
    CatalogItem { code: 0x47, name: "Golden Feather" },
    CatalogItem { code: 0x48, name: "Knight's Crest" },
    CatalogItem { code: 0x49, name: "Red Chu Jelly" },
    CatalogItem { code: 0x4A, name: "Green Chu Jelly" },
    CatalogItem { code: 0x4B, name: "Blue Chu Jelly" },
    CatalogItem { code: 0x4C, name: "Joy Pendant" },

    // Bottles
    CatalogItem { code: 0x50, name: "Empty Bottle" },
    CatalogItem { code: 0x51, name: "Red Potion" },
    CatalogItem { code: 0x52, name: "Green Potion" },
    CatalogItem { code: 0x53, name: "Blue Potion" },
    CatalogItem { code: 0x54, name: "Elixir Soup (1/2)" },
    CatalogItem { code: 0x55, name: "Elixir Soup" },
    CatalogItem { code: 0x56, name: "Bottled Water" },
    CatalogItem { code: 0x57, name: "Fairy in Bottle" },
    CatalogItem { code: 0x58, name: "Forest Firefly" },
    CatalogItem { code: 0x59, name: "Forest Water" },

    // Pearls
    CatalogItem { code: 0x69, name: "Nayru's Pearl" },
    CatalogItem { code: 0x6A, name: "Din's Pearl" },
    CatalogItem { code: 0x6B, name: "Farore's Pearl" },

    // Bait
    CatalogItem { code: 0x82, name: "All-Purpose Bait" },
    CatalogItem { code: 0x83, name: "Hyoi Pear" },

    // Delivery bag contents
    CatalogItem { code: 0x8C, name: "Town Flower" },
    CatalogItem { code: 0x8D, name: "Sea Flower" },
    CatalogItem { code: 0x8E, name: "Exotic Flower" },
    CatalogItem { code: 0x8F, name: "Hero's Flag" },
    CatalogItem { code: 0x90, name: "Big Catch Flag" },
    CatalogItem { code: 0x91, name: "Big Sale Flag" },
    CatalogItem { code: 0x92, name: "Pinwheel" },
    CatalogItem { code: 0x93, name: "Sickle Moon Flag" },
    CatalogItem { code: 0x94, name: "Skull Tower Idol" },
    CatalogItem { code: 0x95, name: "Fountain Idol" },
    CatalogItem { code: 0x96, name: "Postman Statue" },
    CatalogItem { code: 0x97, name: "Shop Guru Statue" },
    CatalogItem { code: 0x98, name: "Father's Letter" },
    CatalogItem { code: 0x99, name: "Note to Mom" },
    CatalogItem { code: 0x9A, name: "Maggie's Letter" },
    CatalogItem { code: 0x9B, name: "Moblin's Letter" },
    CatalogItem { code: 0x9C, name: "Cabana Deed" },
    CatalogItem { code: 0x9D, name: "Complimentary ID" },
    CatalogItem { code: 0x9E, name: "Fill-Up Coupon" },
];

pub fn lookup(code: u8) -> Option<&'static str> {
    if code == EMPTY_ITEM_CODE {
        return Some(EMPTY_ITEM_NAME);
    }
    ITEMS.iter().find(|item| item.code == code).map(|item| item.name)
}

/// Display name for any byte value. Never fails.
pub fn lookup_item_name(code: u8) -> String {
    match lookup(code) {
        Some(name) => name.to_string(),
        None => format!("Unknown (0x{code:02X})"),
    }
}

/// Reverse lookup for editing. Accepts a catalog name (case-insensitive),
/// `Empty`, or a raw byte literal such as `0x31` or `49`.
pub fn item_code_for_name(name: &str) -> Option<u8> {
    let name = name.trim();
    if name.eq_ignore_ascii_case(EMPTY_ITEM_NAME) {
        return Some(EMPTY_ITEM_CODE);
    }
    if let Some(item) = ITEMS.iter().find(|item| item.name.eq_ignore_ascii_case(name)) {
        return Some(item.code);
    }
    if let Some(hex) = name.strip_prefix("0x").or_else(|| name.strip_prefix("0X")) {
        return u8::from_str_radix(hex, 16).ok();
    }
    name.parse::<u8>().ok()
}

pub fn all_items() -> Vec<ItemCatalogEntry> {
    ITEMS
        .iter()
        .map(|item| ItemCatalogEntry {
            code: item.code,
            name: item.name.to_string(),
        })
        .collect()
}
