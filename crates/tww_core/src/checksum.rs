//! Slot checksum as verified by the game on load.
//!
//! The upper 32 bits are a plain byte sum; the lower 32 bits sum the 8-bit
//! complement of every byte, seeded with 1 rather than 0. Both halves wrap
//! modulo 2^32.

use serde::{Deserialize, Serialize};

use crate::core_api::CoreError;
use crate::layout::{CHECKSUM_WIDTH, SlotLayout};

const LOW_SEED: u32 = 1;

pub fn calculate(data: &[u8]) -> u64 {
    let mut high: u32 = 0;
    let mut low: u32 = LOW_SEED;
    for &byte in data {
        high = high.wrapping_add(u32::from(byte));
        low = low.wrapping_add(u32::from(!byte));
    }
    (u64::from(high) << 32) | u64::from(low)
}

/// Splits a checksum into its (byte-sum, complement-sum) halves.
pub fn halves(checksum: u64) -> (u32, u32) {
    ((checksum >> 32) as u32, checksum as u32)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChecksumStatus {
    pub slot: usize,
    pub stored: u64,
    pub calculated: u64,
    pub valid: bool,
}

pub fn calculate_slot(buf: &[u8], slot: usize) -> Result<u64, CoreError> {
    let range = SlotLayout::get(slot)?.checksummed_range();
    let data = buf.get(range.start..range.end).ok_or_else(|| {
        CoreError::range(format!(
            "slot {slot} body 0x{:X}..0x{:X} is outside buffer of {} bytes",
            range.start,
            range.end,
            buf.len()
        ))
    })?;
    Ok(calculate(data))
}

pub fn read_stored(buf: &[u8], slot: usize) -> Result<u64, CoreError> {
    let range = SlotLayout::get(slot)?.checksum_range();
    let raw: [u8; CHECKSUM_WIDTH] = buf
        .get(range.start..range.end)
        .and_then(|bytes| bytes.try_into().ok())
        .ok_or_else(|| {
            CoreError::range(format!(
                "slot {slot} checksum at 0x{:X} is outside buffer of {} bytes",
                range.start,
                buf.len()
            ))
        })?;
    Ok(u64::from_be_bytes(raw))
}

/// Recomputes the checksum of `slot` and stores it big-endian at the end of
/// the slot. Returns the value written.
pub fn patch(buf: &mut [u8], slot: usize) -> Result<u64, CoreError> {
    let checksum = calculate_slot(buf, slot)?;
    let range = SlotLayout::get(slot)?.checksum_range();
    let len = buf.len();
    let field = buf.get_mut(range.start..range.end).ok_or_else(|| {
        CoreError::range(format!(
            "slot {slot} checksum at 0x{:X} is outside buffer of {len} bytes",
            range.start
        ))
    })?;
    field.copy_from_slice(&checksum.to_be_bytes());
    Ok(checksum)
}

pub fn status(buf: &[u8], slot: usize) -> Result<ChecksumStatus, CoreError> {
    let stored = read_stored(buf, slot)?;
    let calculated = calculate_slot(buf, slot)?;
    Ok(ChecksumStatus {
        slot,
        stored,
        calculated,
        valid: stored == calculated,
    })
}

pub fn validate(buf: &[u8], slot: usize) -> Result<bool, CoreError> {
    status(buf, slot).map(|s| s.valid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::CHECKSUM_OFFSET;

    #[test]
    fn empty_range_is_the_seed() {
        assert_eq!(calculate(&[]), 1);
    }

    #[test]
    fn zero_slot_body_matches_hand_arithmetic() {
        let checksum = calculate(&[0u8; CHECKSUM_OFFSET]);
        let (high, low) = halves(checksum);
        assert_eq!(high, 0);
        assert_eq!(low, 1 + 255 * 2700);
        assert_eq!(low, 688_501);
    }

    #[test]
    fn halves_sum_bytes_and_complements() {
        let checksum = calculate(&[0x01, 0xFE, 0x80]);
        assert_eq!(halves(checksum), (0x17F, 1 + 0xFE + 0x01 + 0x7F));
        assert_eq!(checksum, 0x0000_017F_0000_017F);
    }
}
