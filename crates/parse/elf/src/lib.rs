//! Structural ELF dissector for FileScope.
//!
//! Decodes a whole-file byte buffer into typed, offset-addressed records:
//! the file header, program headers, section headers, symbol tables, and
//! note records, with string-table cross-references resolved into labels.
//! Both word widths (32/64-bit) and both byte orders are handled; the
//! layout divergences between the two classes are preserved exactly.
//!
//! This is a best-effort dissector, not a validator: structural violations
//! (truncated buffers, tables that span bytes the file does not have) fail
//! the load, while per-entry anomalies (unknown enum codes, broken
//! string-table references) degrade to `"Unknown"` or empty labels.
//!
//! # Usage
//!
//! ```
//! use filescope_elf::ObjectFile;
//!
//! fn dissect(data: Vec<u8>) {
//!     let elf = ObjectFile::load(data).expect("valid object file");
//!     println!("machine: {}", elf.header().machine.describe());
//!     for region in elf.layout() {
//!         // hand { start, end, label, color } to the renderer
//!         let _ = (region.start, region.end, region.label, region.color);
//!     }
//! }
//! ```

#![cfg_attr(not(test), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod desc;
pub mod field;
pub mod header;
pub mod layout;
pub mod note;
pub mod object;
pub mod program;
pub mod section;
pub mod source;
pub mod symtab;

pub use desc::describe;
pub use field::{Field, FieldKind, FieldWidth};
pub use header::FileHeader;
pub use layout::Region;
pub use note::{NoteEntry, NoteTable};
pub use object::ObjectFile;
pub use program::{ProgramHeader, SegmentFlags};
pub use section::{
    SHT_DYNSYM, SHT_NOTE, SHT_STRTAB, SHT_SYMTAB, SectionFlags, SectionHeader,
};
pub use source::{ByteSource, Endian, LoadError};
pub use symtab::{SymbolEntry, SymbolTable};
