//! Staged decode orchestration and the query surface.
//!
//! [`ObjectFile`] owns the byte source, the header, and every decoded
//! table. Loading runs the stages in a fixed order — file header,
//! program headers, section headers, symbol tables, note tables — and
//! stops at the first structural violation; on failure no object is
//! produced and the caller falls back to treating the input as opaque
//! bytes.

use alloc::string::String;
use alloc::vec::Vec;

use crate::header::FileHeader;
use crate::note::{self, NoteTable};
use crate::program::{self, ProgramHeader};
use crate::section::{self, SectionHeader};
use crate::source::{ByteSource, Endian, LoadError};
use crate::symtab::{self, SymbolEntry, SymbolTable};

/// A fully decoded object file.
#[derive(Debug, Clone)]
pub struct ObjectFile {
    source: ByteSource,
    header: FileHeader,
    program_headers: Vec<ProgramHeader>,
    sections: Vec<SectionHeader>,
    symbol_tables: Vec<SymbolTable>,
    note_tables: Vec<NoteTable>,
}

impl ObjectFile {
    /// Decodes a whole-file byte buffer.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] at the first structural violation: a buffer
    /// too short for the header, a table whose declared bounds exceed the
    /// buffer, or a note record reading past the buffer. Later stages do
    /// not run once one fails.
    pub fn load(bytes: Vec<u8>) -> Result<Self, LoadError> {
        let mut source = ByteSource::new(bytes);
        let header = FileHeader::load(&mut source)?;
        log::debug!(
            "header: class={}, data={}, machine={}",
            header.class.describe(),
            header.data.describe(),
            header.machine.describe(),
        );
        let program_headers = program::load_all(&source, &header)?;
        let sections = section::load_all(&source, &header)?;
        let symbol_tables = symtab::load_all(&source, &header, &sections)?;
        let note_tables = note::load_all(&source, &sections)?;
        log::debug!(
            "decoded {} segments, {} sections, {} symbol tables, {} note tables",
            program_headers.len(),
            sections.len(),
            symbol_tables.len(),
            note_tables.len(),
        );

        Ok(Self {
            source,
            header,
            program_headers,
            sections,
            symbol_tables,
            note_tables,
        })
    }

    /// The resolved file header.
    #[must_use]
    pub fn header(&self) -> &FileHeader {
        &self.header
    }

    /// The underlying byte source.
    #[must_use]
    pub fn source(&self) -> &ByteSource {
        &self.source
    }

    /// `true` when the header declares a 64-bit layout.
    #[must_use]
    pub fn is_64bit(&self) -> bool {
        self.header.is_64bit()
    }

    /// The byte order established by the header.
    #[must_use]
    pub fn endian(&self) -> Endian {
        self.source.endian()
    }

    /// Decoded program header entries, in table order.
    #[must_use]
    pub fn program_headers(&self) -> &[ProgramHeader] {
        &self.program_headers
    }

    /// Decoded section header entries, in table order.
    #[must_use]
    pub fn sections(&self) -> &[SectionHeader] {
        &self.sections
    }

    /// Decoded symbol tables, one per SYMTAB/DYNSYM section.
    #[must_use]
    pub fn symbol_tables(&self) -> &[SymbolTable] {
        &self.symbol_tables
    }

    /// Decoded note tables, one per NOTE section.
    #[must_use]
    pub fn note_tables(&self) -> &[NoteTable] {
        &self.note_tables
    }

    /// Resolved name of the section at `index`, or an empty string when
    /// the index or the name cross-reference is invalid.
    #[must_use]
    pub fn section_name(&self, index: usize) -> String {
        self.sections.get(index).map_or_else(String::new, |sec| {
            sec.resolve_name(
                &self.source,
                &self.sections,
                self.header.name_table_index.value,
            )
        })
    }

    /// Resolved name of a symbol entry belonging to `table`, following
    /// the owning section's string-table link.
    #[must_use]
    pub fn symbol_name(&self, table: &SymbolTable, entry: &SymbolEntry) -> String {
        let Some(owner) = self.sections.get(table.section_index) else {
            return String::new();
        };
        entry.resolve_name(&self.source, &self.sections, owner.link.value)
    }

    /// The entry point rendered as a padded hex string.
    #[must_use]
    pub fn entry_point_hex(&self) -> String {
        self.header.entry.hex()
    }
}
