//! Byte-level encodings used inside a save slot.
//!
//! Three encodings appear in the container: single-byte integers, fixed-width
//! zero-padded strings (one byte per character), and interleaved strings where
//! every character byte is followed by a zero byte. All helpers operate on a
//! borrowed buffer and never write outside the range they were given.

use std::ops::Range;

use crate::core_api::CoreError;

/// Replacement byte for characters that have no single-byte encoding.
const UNENCODABLE_BYTE: u8 = b'?';

pub fn read_u8(buf: &[u8], offset: usize) -> Result<u8, CoreError> {
    buf.get(offset).copied().ok_or_else(|| {
        CoreError::range(format!(
            "byte offset 0x{offset:X} is outside buffer of {} bytes",
            buf.len()
        ))
    })
}

pub fn write_u8(buf: &mut [u8], offset: usize, value: u8) -> Result<(), CoreError> {
    let len = buf.len();
    let slot = buf.get_mut(offset).ok_or_else(|| {
        CoreError::range(format!(
            "byte offset 0x{offset:X} is outside buffer of {len} bytes"
        ))
    })?;
    *slot = value;
    Ok(())
}

/// Writes `value` after clamping it into `0..=255`.
pub fn write_u8_clamped(buf: &mut [u8], offset: usize, value: i64) -> Result<(), CoreError> {
    write_u8(buf, offset, clamp_byte(value))
}

/// Negative values become 0, values above 255 become 255.
pub fn clamp_byte(value: i64) -> u8 {
    value.clamp(0, u8::MAX as i64) as u8
}

/// Coerces free-form input into a byte value.
///
/// Accepts decimal integers, `0x`-prefixed hex and decimals (truncated).
/// Anything that is not a finite number, including `NaN` and `inf`, becomes 0.
pub fn coerce_byte(text: &str) -> u8 {
    let text = text.trim();
    if let Some(hex) = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
    {
        return i64::from_str_radix(hex, 16).map(clamp_byte).unwrap_or(0);
    }
    if let Ok(value) = text.parse::<i64>() {
        return clamp_byte(value);
    }
    match text.parse::<f64>() {
        Ok(value) if !value.is_finite() => 0,
        Ok(value) if value <= 0.0 => 0,
        Ok(value) if value >= u8::MAX as f64 => u8::MAX,
        Ok(value) => value.trunc() as u8,
        Err(_) => 0,
    }
}

pub fn read_fixed_string(buf: &[u8], offset: usize, width: usize) -> Result<String, CoreError> {
    let range = field_range(buf.len(), offset, width, "fixed string")?;
    let bytes = &buf[range];
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    Ok(decode_single_byte(&bytes[..end]))
}

/// Writes at most `width` bytes of `text` and zero-fills the rest of the field.
pub fn write_fixed_string(
    buf: &mut [u8],
    offset: usize,
    width: usize,
    text: &str,
) -> Result<(), CoreError> {
    let range = field_range(buf.len(), offset, width, "fixed string")?;
    let field = &mut buf[range];
    field.fill(0);
    for (dst, src) in field.iter_mut().zip(encode_single_byte(text)) {
        *dst = src;
    }
    Ok(())
}

/// Reads an interleaved string of at most `max_chars` characters.
///
/// Two consecutive zero bytes, the end of the field or the end of the buffer
/// terminate the string. A lone zero byte is a separator and is skipped.
/// Packed bytes without separators still stop at `max_chars` characters.
pub fn read_interleaved_string(buf: &[u8], offset: usize, max_chars: usize) -> String {
    let end = offset
        .saturating_add(max_chars.saturating_mul(2))
        .min(buf.len());
    let mut out = String::with_capacity(max_chars);
    let mut pos = offset;
    let mut chars = 0;
    while pos < end && chars < max_chars {
        let b = buf[pos];
        if b == 0 {
            if buf.get(pos + 1) == Some(&0) {
                break;
            }
        } else {
            out.push(char::from(b));
            chars += 1;
        }
        pos += 1;
    }
    out
}

/// Writes `text` as `c0, 00, c1, 00, ...` into a field of `max_chars * 2`
/// bytes. Characters past `max_chars` are dropped.
pub fn write_interleaved_string(
    buf: &mut [u8],
    offset: usize,
    max_chars: usize,
    text: &str,
) -> Result<(), CoreError> {
    let width = max_chars.checked_mul(2).ok_or_else(|| {
        CoreError::range(format!("interleaved capacity {max_chars} overflows"))
    })?;
    let range = field_range(buf.len(), offset, width, "interleaved string")?;
    let field = &mut buf[range];

    let mut cursor = 0;
    for (index, byte) in encode_single_byte(text).take(max_chars).enumerate() {
        field[cursor] = byte;
        cursor += 1;
        // The last character of a full field has no separator of its own.
        if index + 1 < max_chars {
            field[cursor] = 0;
            cursor += 1;
        }
    }
    field[cursor..].fill(0);
    Ok(())
}

fn field_range(
    buf_len: usize,
    offset: usize,
    width: usize,
    label: &str,
) -> Result<Range<usize>, CoreError> {
    let end = offset.checked_add(width).ok_or_else(|| {
        CoreError::range(format!("{label} at 0x{offset:X} overflows the address space"))
    })?;
    if end > buf_len {
        return Err(CoreError::range(format!(
            "{label} 0x{offset:X}..0x{end:X} is outside buffer of {buf_len} bytes"
        )));
    }
    Ok(offset..end)
}

fn decode_single_byte(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

fn encode_single_byte(text: &str) -> impl Iterator<Item = u8> + '_ {
    text.chars().filter(|&c| c != '\0').map(|c| {
        u8::try_from(u32::from(c)).unwrap_or(UNENCODABLE_BYTE)
    })
}
