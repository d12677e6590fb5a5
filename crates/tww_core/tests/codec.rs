use tww_core::codec::{
    read_fixed_string, read_interleaved_string, read_u8, write_fixed_string,
    write_interleaved_string, write_u8, write_u8_clamped,
};
use tww_core::core_api::CoreErrorCode;

#[test]
fn fixed_string_stops_at_first_zero() {
    let buf = *b"xxsea\0zzzyy";
    assert_eq!(read_fixed_string(&buf, 2, 8).unwrap(), "sea");
    assert_eq!(read_fixed_string(&buf, 0, 2).unwrap(), "xx");
}

#[test]
fn fixed_string_write_never_leaves_its_field() {
    let mut buf = [0xEEu8; 12];
    write_fixed_string(&mut buf, 2, 8, "Outset Island").unwrap();
    assert_eq!(&buf[..2], &[0xEE, 0xEE]);
    assert_eq!(&buf[2..10], b"Outset I");
    assert_eq!(&buf[10..], &[0xEE, 0xEE]);

    write_fixed_string(&mut buf, 2, 8, "sea").unwrap();
    assert_eq!(&buf[2..10], b"sea\0\0\0\0\0");
}

#[test]
fn fixed_string_out_of_buffer_is_range_error() {
    let mut buf = [0u8; 4];
    let err = write_fixed_string(&mut buf, 2, 8, "sea").expect_err("field does not fit");
    assert_eq!(err.code, CoreErrorCode::Range);
    assert_eq!(buf, [0u8; 4]);
    assert!(read_fixed_string(&buf, 3, 2).is_err());
}

#[test]
fn interleaved_round_trip_reproduces_bytes() {
    for text in ["", "A", "Link", "Medli", "Aryll1234"] {
        let mut original = vec![0u8; 20];
        write_interleaved_string(&mut original, 1, 9, text).unwrap();
        let decoded = read_interleaved_string(&original, 1, 9);
        assert_eq!(decoded, text);

        let mut rewritten = vec![0u8; 20];
        write_interleaved_string(&mut rewritten, 1, 9, &decoded).unwrap();
        assert_eq!(rewritten, original, "text {text:?}");
    }
}

#[test]
fn interleaved_write_drops_extra_characters() {
    let mut buf = vec![0x11u8; 10];
    write_interleaved_string(&mut buf, 0, 4, "Quill!").unwrap();
    assert_eq!(&buf[..8], &[b'Q', 0, b'u', 0, b'i', 0, b'l', 0]);
    assert_eq!(&buf[8..], &[0x11, 0x11]);
    assert_eq!(read_interleaved_string(&buf, 0, 4), "Quil");
}

#[test]
fn interleaved_write_clears_previous_longer_value() {
    let mut buf = vec![0u8; 18];
    write_interleaved_string(&mut buf, 0, 9, "Zunari").unwrap();
    write_interleaved_string(&mut buf, 0, 9, "Oz").unwrap();
    assert_eq!(&buf[..4], &[b'O', 0, b'z', 0]);
    assert!(buf[4..].iter().all(|&b| b == 0));
    assert_eq!(read_interleaved_string(&buf, 0, 9), "Oz");
}

#[test]
fn interleaved_read_stops_at_field_and_buffer_end() {
    let buf = [b'a', 0, b'b', 0, b'c', 0, b'd'];
    assert_eq!(read_interleaved_string(&buf, 0, 2), "ab");
    assert_eq!(read_interleaved_string(&buf, 0, 9), "abcd");
    assert_eq!(read_interleaved_string(&buf, 40, 9), "");
}

#[test]
fn interleaved_all_zero_region_is_empty() {
    let buf = [0u8; 18];
    assert_eq!(read_interleaved_string(&buf, 0, 9), "");
}

#[test]
fn interleaved_write_outside_buffer_is_range_error() {
    let mut buf = [0u8; 10];
    let err = write_interleaved_string(&mut buf, 4, 9, "Link").expect_err("field does not fit");
    assert_eq!(err.code, CoreErrorCode::Range);
    assert_eq!(buf, [0u8; 10]);
}

#[test]
fn u8_access_and_clamping() {
    let mut buf = [0u8; 3];
    write_u8(&mut buf, 1, 0x31).unwrap();
    assert_eq!(read_u8(&buf, 1).unwrap(), 0x31);
    write_u8_clamped(&mut buf, 0, -5).unwrap();
    write_u8_clamped(&mut buf, 2, 300).unwrap();
    assert_eq!(buf, [0, 0x31, 255]);
    assert_eq!(read_u8(&buf, 3).unwrap_err().code, CoreErrorCode::Range);
    assert_eq!(write_u8(&mut buf, 3, 1).unwrap_err().code, CoreErrorCode::Range);
}
