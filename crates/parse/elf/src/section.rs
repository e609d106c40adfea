//! Section header table decoding and name resolution.
//!
//! Section names are byte offsets into a designated string-table section;
//! resolving one is a second pass through the decoded collection. A zero
//! or out-of-range name-table index yields an empty label, never an
//! error.

use alloc::string::String;
use alloc::vec::Vec;
use bitflags::bitflags;

use crate::field::{Field, FieldKind, FieldWidth};
use crate::header::FileHeader;
use crate::source::{ByteSource, LoadError};

/// Section type: linker symbol table.
pub const SHT_SYMTAB: u64 = 2;

/// Section type: string table.
pub const SHT_STRTAB: u64 = 3;

/// Section type: note information.
pub const SHT_NOTE: u64 = 7;

/// Section type: dynamic loader symbol table.
pub const SHT_DYNSYM: u64 = 11;

bitflags! {
    /// Section flag bitmask.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SectionFlags: u64 {
        /// Contains writable data.
        const WRITE = 0x1;
        /// Occupies memory during execution.
        const ALLOC = 0x2;
        /// Contains executable instructions.
        const EXECINSTR = 0x4;
        /// May be merged to eliminate duplicates.
        const MERGE = 0x10;
        /// Contains NUL-terminated strings.
        const STRINGS = 0x20;
        /// `info` holds a section header table index.
        const INFO_LINK = 0x40;
        /// Special ordering requirements.
        const LINK_ORDER = 0x80;
        /// Requires OS-specific processing.
        const OS_NONCONFORMING = 0x100;
        /// Member of a section group.
        const GROUP = 0x200;
        /// Contains thread-local storage.
        const TLS = 0x400;
        /// Holds more than 2 GB.
        const AMD64_LARGE = 0x1000_0000;
        /// Ordered.
        const ORDERED = 0x4000_0000;
        /// Excluded from linking.
        const EXCLUDE = 0x8000_0000;
    }
}

/// One decoded section header entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionHeader {
    /// Byte offset of the name string inside the name table section.
    pub name: Field,
    /// Section type code.
    pub sec_type: Field,
    /// Flag bitmask.
    pub flags: Field,
    /// Virtual address when loaded.
    pub addr: Field,
    /// File offset of the section bytes.
    pub offset: Field,
    /// Size of the section in the file.
    pub size: Field,
    /// Index of an associated section; meaning depends on the type.
    pub link: Field,
    /// Extra type-specific information.
    pub info: Field,
    /// Required address alignment.
    pub addr_align: Field,
    /// Entry size for sections holding fixed-size records.
    pub entry_size: Field,
}

impl SectionHeader {
    fn load(src: &ByteSource, start: u64, header: &FileHeader) -> Result<Self, LoadError> {
        let word = header.word_width();
        let mut off = start;
        let name = Field::read(src, off, FieldWidth::Word, FieldKind::Plain)?;
        off += 4;
        let sec_type = Field::read(src, off, FieldWidth::Word, FieldKind::SectionType)?;
        off += 4;
        let flags = Field::read(src, off, word, FieldKind::SectionFlags)?;
        off += word.bytes();
        let addr = Field::read(src, off, word, FieldKind::Plain)?;
        off += word.bytes();
        let offset = Field::read(src, off, word, FieldKind::Plain)?;
        off += word.bytes();
        let size = Field::read(src, off, word, FieldKind::Plain)?;
        off += word.bytes();
        let link = Field::read(src, off, FieldWidth::Word, FieldKind::Plain)?;
        off += 4;
        let info = Field::read(src, off, FieldWidth::Word, FieldKind::Plain)?;
        off += 4;
        let addr_align = Field::read(src, off, word, FieldKind::Plain)?;
        off += word.bytes();
        let entry_size = Field::read(src, off, word, FieldKind::Plain)?;

        Ok(Self {
            name,
            sec_type,
            flags,
            addr,
            offset,
            size,
            link,
            info,
            addr_align,
            entry_size,
        })
    }

    /// Typed view of the section flags.
    #[must_use]
    pub fn flag_bits(&self) -> SectionFlags {
        SectionFlags::from_bits_truncate(self.flags.value)
    }

    /// Resolves this section's name through the name table section.
    ///
    /// `name_table_index` is the file header's declared index of the
    /// section holding section names. An index of zero, an out-of-range
    /// index, or a name offset past the table all yield an empty string.
    #[must_use]
    pub fn resolve_name(
        &self,
        src: &ByteSource,
        sections: &[SectionHeader],
        name_table_index: u64,
    ) -> String {
        resolve_in_table(src, sections, name_table_index, self.name.value)
    }
}

/// Reads the NUL-terminated string at `string_offset` inside the string
/// table section at `table_index`, bounded by that section's byte range.
///
/// Shared by section-name and symbol-name resolution; every failure mode
/// degrades to an empty string.
pub(crate) fn resolve_in_table(
    src: &ByteSource,
    sections: &[SectionHeader],
    table_index: u64,
    string_offset: u64,
) -> String {
    if table_index == 0 {
        return String::new();
    }
    let Some(table) = usize::try_from(table_index)
        .ok()
        .and_then(|i| sections.get(i))
    else {
        return String::new();
    };
    let Some(start) = table.offset.value.checked_add(string_offset) else {
        return String::new();
    };
    let table_end = table.offset.value.saturating_add(table.size.value);
    let max_len = table_end.saturating_sub(start);
    src.read_cstring(start, max_len)
}

/// Decodes the whole section header table. Same guard pattern as the
/// program header table.
pub(crate) fn load_all(
    src: &ByteSource,
    header: &FileHeader,
) -> Result<Vec<SectionHeader>, LoadError> {
    let count = header.sh_count.value;
    if count == 0 {
        return Ok(Vec::new());
    }
    let offset = header.sh_offset.value;
    let entry_size = header.sh_entry_size.value;
    let span = count.checked_mul(entry_size).ok_or(LoadError::TableBounds)?;
    let end = offset.checked_add(span).ok_or(LoadError::TableBounds)?;
    if offset == 0 || end > src.len() {
        return Err(LoadError::TableBounds);
    }
    let mut entries = Vec::new();
    for i in 0..count {
        entries.push(SectionHeader::load(src, offset + i * entry_size, header)?);
    }
    Ok(entries)
}
