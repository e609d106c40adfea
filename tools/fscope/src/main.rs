//! FileScope command-line dissector.
//!
//! Loads a whole object file, decodes it with `filescope-elf`, and prints
//! the resolved header, per-entry tables, or the byte-range layout map —
//! the same surface the pixel-view renderer consumes.

mod cli;
mod logger;
mod report;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use filescope_elf::ObjectFile;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    logger::init(cli.verbose);

    match cli.command {
        cli::Command::Info(ref args) => cmd_info(&args.file),
        cli::Command::Segments(ref args) => cmd_segments(&args.file),
        cli::Command::Sections(ref args) => cmd_sections(&args.file),
        cli::Command::Symbols(ref args) => cmd_symbols(&args.file),
        cli::Command::Notes(ref args) => cmd_notes(&args.file),
        cli::Command::Layout(ref args) => cmd_layout(&args.file, args.json),
    }
}

/// Reads and decodes the file, mapping decode failures onto the caller
/// contract: "not a recognized/valid object file".
fn load(path: &Path) -> Result<ObjectFile> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    ObjectFile::load(bytes)
        .map_err(|e| anyhow::anyhow!("{} is not a valid object file: {e}", path.display()))
}

fn cmd_info(path: &Path) -> Result<()> {
    let elf = load(path)?;
    let header = elf.header();

    println!("File:        {}", path.display());
    println!("Structure:   ELF {}", header.class.describe());
    println!("Data:        {}", header.data.describe());
    println!("OS/ABI:      {}", header.os_abi.describe());
    println!("Type:        {}", header.file_type.describe());
    println!("Machine:     {}", header.machine.describe());
    println!("Version:     {}", header.version.describe());
    println!("Entry point: {}", elf.entry_point_hex());
    println!("Flags:       {}", header.flags.hex());
    println!(
        "Program headers: {} x {} bytes at {}",
        header.ph_count.value,
        header.ph_entry_size.value,
        header.ph_offset.hex()
    );
    println!(
        "Section headers: {} x {} bytes at {}",
        header.sh_count.value,
        header.sh_entry_size.value,
        header.sh_offset.hex()
    );
    println!("Name table index: {}", header.name_table_index.value);
    Ok(())
}

fn cmd_segments(path: &Path) -> Result<()> {
    let elf = load(path)?;
    if elf.program_headers().is_empty() {
        println!("no program headers");
        return Ok(());
    }

    println!(
        "{:<4} {:<40} {:>12} {:>12} {:>10} {:>10}  {}",
        "Idx", "Type", "Offset", "VirtAddr", "FileSize", "MemSize", "Flags"
    );
    for (i, seg) in elf.program_headers().iter().enumerate() {
        println!(
            "{:<4} {:<40} {:>12} {:>12} {:>10} {:>10}  {}",
            i,
            seg.seg_type.describe(),
            seg.offset.hex(),
            seg.vaddr.hex(),
            seg.file_size.value,
            seg.mem_size.value,
            seg.flags.describe(),
        );
    }
    Ok(())
}

fn cmd_sections(path: &Path) -> Result<()> {
    let elf = load(path)?;
    if elf.sections().is_empty() {
        println!("no sections");
        return Ok(());
    }

    println!(
        "{:<4} {:<20} {:<40} {:>12} {:>10} {:>5}  {}",
        "Idx", "Name", "Type", "Offset", "Size", "Link", "Flags"
    );
    for (i, sec) in elf.sections().iter().enumerate() {
        println!(
            "{:<4} {:<20} {:<40} {:>12} {:>10} {:>5}  {}",
            i,
            elf.section_name(i),
            sec.sec_type.describe(),
            sec.offset.hex(),
            sec.size.value,
            sec.link.value,
            sec.flags.describe(),
        );
    }
    Ok(())
}

fn cmd_symbols(path: &Path) -> Result<()> {
    let elf = load(path)?;
    if elf.symbol_tables().is_empty() {
        println!("no symbol tables");
        return Ok(());
    }

    for table in elf.symbol_tables() {
        println!(
            "symbol table in section {} ({}): {} entries",
            table.section_index,
            elf.section_name(table.section_index),
            table.len(),
        );
        println!(
            "  {:<4} {:>18} {:>8} {:<36} {:<22} {}",
            "Idx", "Value", "Size", "Info", "Visibility", "Name"
        );
        for (i, sym) in table.entries.iter().enumerate() {
            println!(
                "  {:<4} {:>18} {:>8} {:<36} {:<22} {}",
                i,
                sym.value.hex(),
                sym.size.value,
                sym.info.describe(),
                sym.other.describe(),
                elf.symbol_name(table, sym),
            );
        }
    }
    Ok(())
}

fn cmd_notes(path: &Path) -> Result<()> {
    let elf = load(path)?;
    if elf.note_tables().is_empty() {
        println!("no note sections");
        return Ok(());
    }

    for table in elf.note_tables() {
        println!(
            "note section {} ({}): {} records",
            table.section_index,
            elf.section_name(table.section_index),
            table.len(),
        );
        for note in &table.entries {
            let desc: String = note.desc.iter().map(|b| format!("{b:02x}")).collect();
            println!(
                "  name={:<12} type={} desc=[{}]",
                note.name,
                note.note_type.hex(),
                desc,
            );
        }
    }
    Ok(())
}

fn cmd_layout(path: &Path, json: bool) -> Result<()> {
    let elf = load(path)?;
    if json {
        println!("{}", report::layout_json(path, &elf)?);
        return Ok(());
    }

    println!(
        "{:>12} {:>12} {:>10}  {:<9} {}",
        "Start", "End", "Bytes", "Color", "Label"
    );
    for region in elf.layout() {
        println!(
            "{:>#12X} {:>#12X} {:>10}  {:<9} {}",
            region.start,
            region.end,
            region.end.saturating_sub(region.start),
            region.color,
            region.label,
        );
    }
    Ok(())
}
