use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use tww_core::core_api::{Engine, ExportOptions, Session, SlotSnapshot};
use tww_render::{
    FieldSelection, JsonStyle, TextRenderOptions, format_file_size, render_checksum_report,
    render_json_full, render_json_selected, render_selected_pairs, render_slot_sheet_with_options,
};

const SAVE_EXTENSION: &str = "sav";

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    #[arg(value_name = "SAVE.sav")]
    path: PathBuf,
    /// Restrict output and edits to one slot (1-3).
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=3))]
    slot: Option<u8>,
    #[arg(long)]
    name: bool,
    #[arg(long)]
    stage: bool,
    #[arg(long = "spawn")]
    spawn_id: bool,
    #[arg(long = "room")]
    room_id: bool,
    #[arg(long = "layer")]
    layer_id: bool,
    #[arg(long)]
    inventory: bool,
    #[arg(long = "checksums")]
    checksum: bool,
    #[arg(long)]
    json: bool,
    #[arg(long)]
    verbose: bool,
    #[arg(long = "set-name", requires = "slot")]
    set_name: Option<String>,
    #[arg(long = "set-stage", requires = "slot")]
    set_stage: Option<String>,
    #[arg(long = "set-spawn", requires = "slot", allow_hyphen_values = true)]
    set_spawn: Option<i64>,
    #[arg(long = "set-room", requires = "slot", allow_hyphen_values = true)]
    set_room: Option<i64>,
    #[arg(long = "set-layer", requires = "slot", allow_hyphen_values = true)]
    set_layer: Option<i64>,
    /// Replace an inventory entry, e.g. `--set-item 3=Bombs` or `--set-item 3=0x31`.
    #[arg(
        long = "set-item",
        value_name = "INDEX=ITEM",
        requires = "slot",
        value_parser = parse_item_edit
    )]
    set_item: Vec<ItemEdit>,
    /// Rewrite checksums even when no field is edited.
    #[arg(long = "fix-checksum", conflicts_with = "no_fix_checksum")]
    fix_checksum: bool,
    /// Write the edited bytes without recomputing slot checksums.
    #[arg(long = "no-fix-checksum")]
    no_fix_checksum: bool,
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ItemEdit {
    index: usize,
    item: String,
}

impl Cli {
    fn field_selection(&self) -> FieldSelection {
        FieldSelection {
            name: self.name,
            stage: self.stage,
            spawn_id: self.spawn_id,
            room_id: self.room_id,
            layer_id: self.layer_id,
            inventory: self.inventory,
            checksum: self.checksum,
        }
    }

    fn has_edits(&self) -> bool {
        self.set_name.is_some()
            || self.set_stage.is_some()
            || self.set_spawn.is_some()
            || self.set_room.is_some()
            || self.set_layer.is_some()
            || !self.set_item.is_empty()
    }

    /// Zero-based slot index when `--slot` was given.
    fn slot_index(&self) -> Option<usize> {
        self.slot.map(|slot| usize::from(slot) - 1)
    }
}

fn main() {
    let cli = Cli::parse();
    let fields = cli.field_selection();
    let has_edits = cli.has_edits();
    let writes_output = has_edits || cli.fix_checksum;

    if has_edits && cli.output.is_none() {
        eprintln!("--set-* flags require --output <PATH>");
        process::exit(2);
    }
    if cli.fix_checksum && cli.output.is_none() {
        eprintln!("--fix-checksum requires --output <PATH>");
        process::exit(2);
    }
    if !writes_output && cli.output.is_some() {
        eprintln!("--output requires at least one --set-* flag or --fix-checksum");
        process::exit(2);
    }
    if cli.no_fix_checksum && !has_edits {
        eprintln!("--no-fix-checksum requires at least one --set-* flag");
        process::exit(2);
    }
    if !has_save_extension(&cli.path) {
        eprintln!(
            "Error: {} is not a .{SAVE_EXTENSION} file",
            cli.path.display()
        );
        process::exit(2);
    }

    let bytes = fs::read(&cli.path).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {e}", cli.path.display());
        process::exit(1);
    });
    if cli.verbose {
        eprintln!(
            "Loaded {} ({})",
            cli.path.display(),
            format_file_size(bytes.len() as u64)
        );
    }

    let engine = Engine::new();
    let mut session = engine.open_bytes(bytes).unwrap_or_else(|e| {
        eprintln!("Error parsing save file: {}", cli.path.display());
        eprintln!("  {}", e);
        process::exit(1);
    });

    if let Some(slot) = cli.slot_index() {
        apply_edits(&cli, &mut session, slot);
    }

    if writes_output {
        let out_path = cli.output.as_ref().unwrap_or_else(|| process::exit(2));
        let options = ExportOptions {
            fix_checksums: !cli.no_fix_checksum,
        };
        if cli.verbose {
            let statuses = session.checksums().unwrap_or_else(|e| {
                eprintln!("Error reading checksums: {e}");
                process::exit(1);
            });
            eprint!("{}", render_checksum_report(&statuses));
            if !options.fix_checksums {
                eprintln!("Checksums left unchanged");
            }
        }
        let edited_bytes = session.export(options).unwrap_or_else(|e| {
            eprintln!("Error creating modified save bytes: {e}");
            process::exit(1);
        });
        fs::write(out_path, edited_bytes).unwrap_or_else(|e| {
            eprintln!("Error writing {}: {e}", out_path.display());
            process::exit(1);
        });
    }

    let slots = selected_slots(&session, cli.slot_index());

    if cli.json {
        let json = if fields.is_any_selected() {
            render_json_selected(&slots, &fields, JsonStyle::CanonicalV1)
        } else {
            render_json_full(&slots, JsonStyle::CanonicalV1)
        };
        let rendered = serde_json::to_string_pretty(&json).unwrap_or_else(|e| {
            eprintln!("Error rendering JSON output: {e}");
            process::exit(1);
        });
        println!("{rendered}");
        return;
    }

    if fields.is_any_selected() {
        for slot in &slots {
            println!("slot={}", slot.index + 1);
            for (key, value) in render_selected_pairs(slot, &fields) {
                println!("{key}={value}");
            }
        }
        return;
    }

    if let Some(out_path) = cli.output.as_ref() {
        println!("Wrote edited save to {}", out_path.display());
        return;
    }

    print!(
        "{}",
        render_slot_sheet_with_options(
            &slots,
            TextRenderOptions {
                verbose: cli.verbose
            }
        )
    );
}

fn apply_edits(cli: &Cli, session: &mut Session, slot: usize) {
    if let Some(name) = cli.set_name.as_deref() {
        session.set_name(slot, name).unwrap_or_else(|e| {
            eprintln!("Error applying name edit: {e}");
            process::exit(1);
        });
    }
    if let Some(stage) = cli.set_stage.as_deref() {
        session.set_stage(slot, stage).unwrap_or_else(|e| {
            eprintln!("Error applying stage edit: {e}");
            process::exit(1);
        });
    }
    if let Some(spawn_id) = cli.set_spawn {
        session.set_spawn_id(slot, spawn_id).unwrap_or_else(|e| {
            eprintln!("Error applying spawn edit: {e}");
            process::exit(1);
        });
    }
    if let Some(room_id) = cli.set_room {
        session.set_room_id(slot, room_id).unwrap_or_else(|e| {
            eprintln!("Error applying room edit: {e}");
            process::exit(1);
        });
    }
    if let Some(layer_id) = cli.set_layer {
        session.set_layer_id(slot, layer_id).unwrap_or_else(|e| {
            eprintln!("Error applying layer edit: {e}");
            process::exit(1);
        });
    }
    for edit in &cli.set_item {
        session
            .set_inventory_item_by_name(slot, edit.index, &edit.item)
            .unwrap_or_else(|e| {
                eprintln!("Error applying inventory edit {}: {e}", edit.index);
                process::exit(1);
            });
    }
}

fn selected_slots(session: &Session, slot: Option<usize>) -> Vec<SlotSnapshot> {
    let result = match slot {
        Some(slot) => session.slot(slot).map(|snapshot| vec![snapshot]),
        None => session.slots(),
    };
    result.unwrap_or_else(|e| {
        eprintln!("Error reading save slots: {e}");
        process::exit(1);
    })
}

fn has_save_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(SAVE_EXTENSION))
}

fn parse_item_edit(value: &str) -> Result<ItemEdit, String> {
    let (index, item) = value
        .split_once('=')
        .ok_or_else(|| format!("expected INDEX=ITEM, got '{value}'"))?;
    let index = index
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("invalid inventory index '{index}': {e}"))?;
    let item = item.trim();
    if item.is_empty() {
        return Err(format!("missing item after '{index}='"));
    }
    Ok(ItemEdit {
        index,
        item: item.to_string(),
    })
}
