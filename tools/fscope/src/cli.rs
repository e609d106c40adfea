//! Command-line interface definitions for fscope.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// FileScope object file dissector.
#[derive(Parser)]
#[command(name = "fscope", version, about)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Enable decode diagnostics on stderr.
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Print the resolved file header.
    Info(FileArgs),
    /// List program header (segment) entries.
    Segments(FileArgs),
    /// List section header entries with resolved names.
    Sections(FileArgs),
    /// List symbol table entries with resolved names.
    Symbols(FileArgs),
    /// List note records.
    Notes(FileArgs),
    /// Print the byte-range layout map.
    Layout(LayoutArgs),
}

/// Arguments naming the input file.
#[derive(Parser)]
pub struct FileArgs {
    /// Path to the object file.
    pub file: PathBuf,
}

/// Arguments for the `layout` subcommand.
#[derive(Parser)]
pub struct LayoutArgs {
    /// Path to the object file.
    pub file: PathBuf,

    /// Emit the region list as JSON for an external renderer.
    #[arg(long)]
    pub json: bool,
}
