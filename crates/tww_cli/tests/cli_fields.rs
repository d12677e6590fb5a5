use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;
use tww_core::checksum;
use tww_core::layout::{CHECKSUM_OFFSET, CONTAINER_LEN, INVENTORY_OFFSET, NAME_OFFSETS, SLOT_SIZE};

fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_tww-se"))
        .args(args)
        .output()
        .expect("failed to run tww-se CLI")
}

fn temp_path(prefix: &str, extension: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before unix epoch")
        .as_nanos();
    std::env::temp_dir().join(format!(
        "{prefix}_{}_{}.{extension}",
        std::process::id(),
        nanos
    ))
}

fn sample_bytes() -> Vec<u8> {
    let mut bytes = vec![0u8; CONTAINER_LEN];
    for slot in 0..3 {
        let start = slot * SLOT_SIZE;
        bytes[start + 0x30..start + 0x36].copy_from_slice(b"sea_T0");
        bytes[start + 0x38] = slot as u8;
        bytes[start + 0x39] = 11;
        bytes[start + INVENTORY_OFFSET..start + INVENTORY_OFFSET + 21].fill(0xFF);
    }
    bytes[INVENTORY_OFFSET] = 0x20;
    let name = NAME_OFFSETS[0];
    bytes[name..name + 8].copy_from_slice(&[b'L', 0, b'i', 0, b'n', 0, b'k', 0]);
    bytes
}

fn write_sample(prefix: &str) -> PathBuf {
    let path = temp_path(prefix, "sav");
    fs::write(&path, sample_bytes()).expect("failed to write sample save");
    path
}

#[test]
fn cli_prints_selected_fields_per_slot_in_fixed_order() {
    let path = write_sample("tww_fields");
    let path_str = path.to_string_lossy().to_string();
    let output = run_cli(&["--room", "--name", "--slot", "1", &path_str]);
    let _ = fs::remove_file(&path);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["slot=1", "name=Link", "room_id=11"]);
}

#[test]
fn cli_field_mode_covers_every_slot_without_slot_flag() {
    let path = write_sample("tww_all_slots");
    let path_str = path.to_string_lossy().to_string();
    let output = run_cli(&["--name", &path_str]);
    let _ = fs::remove_file(&path);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "slot=1",
            "name=Link",
            "slot=2",
            "name=Empty Slot",
            "slot=3",
            "name=Empty Slot",
        ]
    );
}

#[test]
fn cli_default_output_is_slot_sheet() {
    let path = write_sample("tww_sheet");
    let path_str = path.to_string_lossy().to_string();
    let output = run_cli(&[&path_str]);
    let _ = fs::remove_file(&path);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("THE WIND WAKER HD"));
    assert!(stdout.contains(" ::: Slot 1 :::  Link"));
    assert!(stdout.contains(" ::: Slot 3 :::  Empty Slot"));
    assert!(stdout.contains("00 Telescope"));
    assert!(stdout.contains("(stale, expected 0x"));
}

#[test]
fn cli_json_lists_three_slots() {
    let path = write_sample("tww_json");
    let path_str = path.to_string_lossy().to_string();
    let output = run_cli(&["--json", &path_str]);
    let _ = fs::remove_file(&path);
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    let slots = json["slots"].as_array().expect("slots should be an array");
    assert_eq!(slots.len(), 3);
    assert_eq!(slots[0]["name"], "Link");
    assert_eq!(slots[1]["empty"], true);
    assert_eq!(slots[2]["spawn_id"], 2);
    assert_eq!(slots[0]["inventory"][0]["name"], "Telescope");
}

#[test]
fn cli_json_selected_fields_for_one_slot() {
    let path = write_sample("tww_json_fields");
    let path_str = path.to_string_lossy().to_string();
    let output = run_cli(&["--json", "--stage", "--slot", "2", &path_str]);
    let _ = fs::remove_file(&path);
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(
        json,
        serde_json::json!({ "slots": [{ "slot": 2, "stage": "sea_T0" }] })
    );
}

#[test]
fn cli_rejects_non_sav_input() {
    let path = temp_path("tww_wrong_ext", "bin");
    fs::write(&path, sample_bytes()).expect("failed to write sample");
    let path_str = path.to_string_lossy().to_string();
    let output = run_cli(&[&path_str]);
    let _ = fs::remove_file(&path);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(".sav"));
}

#[test]
fn cli_rejects_wrong_sized_save() {
    let path = temp_path("tww_short", "sav");
    fs::write(&path, vec![0u8; 100]).expect("failed to write sample");
    let path_str = path.to_string_lossy().to_string();
    let output = run_cli(&[&path_str]);
    let _ = fs::remove_file(&path);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unexpected save size"));
}

#[test]
fn cli_edits_require_output_and_slot() {
    let path = write_sample("tww_usage");
    let path_str = path.to_string_lossy().to_string();

    let missing_output = run_cli(&["--slot", "1", "--set-room", "3", &path_str]);
    assert_eq!(missing_output.status.code(), Some(2));

    let out = temp_path("tww_usage_out", "sav");
    let out_str = out.to_string_lossy().to_string();
    let missing_slot = run_cli(&["--set-room", "3", "--output", &out_str, &path_str]);
    assert_eq!(missing_slot.status.code(), Some(2));

    let output_only = run_cli(&["--output", &out_str, &path_str]);
    let _ = fs::remove_file(&path);
    assert_eq!(output_only.status.code(), Some(2));
    assert!(!out.exists());
}

#[test]
fn cli_writes_edits_with_fixed_checksums() {
    let input = write_sample("tww_edit_in");
    let out = temp_path("tww_edit_out", "sav");
    let input_str = input.to_string_lossy().to_string();
    let out_str = out.to_string_lossy().to_string();

    let output = run_cli(&[
        "--slot",
        "2",
        "--set-name",
        "Tetra",
        "--set-stage",
        "M_NewD2",
        "--set-room",
        "300",
        "--set-layer",
        "-4",
        "--set-item",
        "0=Bombs",
        "--set-item",
        "20=0x34",
        "--output",
        &out_str,
        &input_str,
    ]);
    let _ = fs::remove_file(&input);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Wrote edited save to"));

    let written = fs::read(&out).expect("edited save should exist");
    let _ = fs::remove_file(&out);
    assert_eq!(written.len(), CONTAINER_LEN);

    let start = SLOT_SIZE;
    assert_eq!(&written[start + 0x30..start + 0x38], b"M_NewD2\0");
    assert_eq!(written[start + 0x39], 255);
    assert_eq!(written[start + 0x3A], 0);
    assert_eq!(written[start + INVENTORY_OFFSET], 0x31);
    assert_eq!(written[start + INVENTORY_OFFSET + 20], 0x34);
    assert_eq!(&written[NAME_OFFSETS[1]..NAME_OFFSETS[1] + 10], &[
        b'T', 0, b'e', 0, b't', 0, b'r', 0, b'a', 0
    ]);
    for slot in 0..3 {
        assert!(checksum::validate(&written, slot).unwrap(), "slot {slot}");
    }
}

#[test]
fn cli_no_fix_checksum_keeps_stored_values() {
    let input = write_sample("tww_nofix_in");
    let out = temp_path("tww_nofix_out", "sav");
    let input_str = input.to_string_lossy().to_string();
    let out_str = out.to_string_lossy().to_string();

    let output = run_cli(&[
        "--slot",
        "3",
        "--set-spawn",
        "7",
        "--no-fix-checksum",
        "--output",
        &out_str,
        &input_str,
    ]);
    let _ = fs::remove_file(&input);
    assert!(output.status.success());

    let written = fs::read(&out).expect("edited save should exist");
    let _ = fs::remove_file(&out);
    let start = 2 * SLOT_SIZE;
    assert_eq!(written[start + 0x38], 7);
    assert!(
        written[start + CHECKSUM_OFFSET..start + SLOT_SIZE]
            .iter()
            .all(|&b| b == 0)
    );
}

#[test]
fn cli_fix_checksum_alone_rewrites_checksums() {
    let input = write_sample("tww_fix_in");
    let out = temp_path("tww_fix_out", "sav");
    let input_str = input.to_string_lossy().to_string();
    let out_str = out.to_string_lossy().to_string();

    let output = run_cli(&["--fix-checksum", "--verbose", "--output", &out_str, &input_str]);
    let _ = fs::remove_file(&input);
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Save slot 1:"));
    assert!(stderr.contains("  Existing checksum: 0x0000000000000000"));
    assert!(stderr.contains("  Calculated checksum: 0x"));

    let written = fs::read(&out).expect("fixed save should exist");
    let _ = fs::remove_file(&out);
    let original = sample_bytes();
    for slot in 0..3 {
        assert!(checksum::validate(&written, slot).unwrap(), "slot {slot}");
        let start = slot * SLOT_SIZE;
        assert_eq!(
            &written[start..start + CHECKSUM_OFFSET],
            &original[start..start + CHECKSUM_OFFSET]
        );
    }
}

#[test]
fn cli_reports_unknown_item_names() {
    let input = write_sample("tww_bad_item");
    let out = temp_path("tww_bad_item_out", "sav");
    let input_str = input.to_string_lossy().to_string();
    let out_str = out.to_string_lossy().to_string();

    let output = run_cli(&[
        "--slot",
        "1",
        "--set-item",
        "4=Triforce of Power",
        "--output",
        &out_str,
        &input_str,
    ]);
    let _ = fs::remove_file(&input);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown item"));
    assert!(!out.exists());
}
