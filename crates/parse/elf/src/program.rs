//! Program header (segment) table decoding.
//!
//! The 64-bit entry layout places the flags word immediately after the
//! type; the 32-bit layout places it between `memsz` and `align`. That is
//! a genuine divergence of the format, preserved here exactly.

use alloc::vec::Vec;
use bitflags::bitflags;

use crate::field::{Field, FieldKind, FieldWidth};
use crate::header::FileHeader;
use crate::source::{ByteSource, LoadError};

bitflags! {
    /// Segment permission flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SegmentFlags: u32 {
        /// Execute permission.
        const EXEC = 0x1;
        /// Write permission.
        const WRITE = 0x2;
        /// Read permission.
        const READ = 0x4;
    }
}

/// One decoded program header entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramHeader {
    /// Segment type code.
    pub seg_type: Field,
    /// Permission flags.
    pub flags: Field,
    /// File offset of the segment bytes.
    pub offset: Field,
    /// Virtual load address.
    pub vaddr: Field,
    /// Physical address (meaningful on some platforms only).
    pub paddr: Field,
    /// Number of segment bytes present in the file.
    pub file_size: Field,
    /// Size of the segment once loaded.
    pub mem_size: Field,
    /// Required alignment.
    pub align: Field,
}

impl ProgramHeader {
    fn load(src: &ByteSource, start: u64, header: &FileHeader) -> Result<Self, LoadError> {
        let word = header.word_width();
        let mut off = start;
        let seg_type = Field::read(src, off, FieldWidth::Word, FieldKind::SegmentType)?;
        off += 4;

        if header.is_64bit() {
            let flags = Field::read(src, off, FieldWidth::Word, FieldKind::SegmentFlags)?;
            off += 4;
            let offset = Field::read(src, off, word, FieldKind::Plain)?;
            off += word.bytes();
            let vaddr = Field::read(src, off, word, FieldKind::Plain)?;
            off += word.bytes();
            let paddr = Field::read(src, off, word, FieldKind::Plain)?;
            off += word.bytes();
            let file_size = Field::read(src, off, word, FieldKind::Plain)?;
            off += word.bytes();
            let mem_size = Field::read(src, off, word, FieldKind::Plain)?;
            off += word.bytes();
            let align = Field::read(src, off, word, FieldKind::Plain)?;
            Ok(Self {
                seg_type,
                flags,
                offset,
                vaddr,
                paddr,
                file_size,
                mem_size,
                align,
            })
        } else {
            let offset = Field::read(src, off, word, FieldKind::Plain)?;
            off += word.bytes();
            let vaddr = Field::read(src, off, word, FieldKind::Plain)?;
            off += word.bytes();
            let paddr = Field::read(src, off, word, FieldKind::Plain)?;
            off += word.bytes();
            let file_size = Field::read(src, off, word, FieldKind::Plain)?;
            off += word.bytes();
            let mem_size = Field::read(src, off, word, FieldKind::Plain)?;
            off += word.bytes();
            let flags = Field::read(src, off, FieldWidth::Word, FieldKind::SegmentFlags)?;
            off += 4;
            let align = Field::read(src, off, word, FieldKind::Plain)?;
            Ok(Self {
                seg_type,
                flags,
                offset,
                vaddr,
                paddr,
                file_size,
                mem_size,
                align,
            })
        }
    }

    /// Typed view of the permission flags.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "the flags field is encoded as four bytes"
    )]
    pub fn flag_bits(&self) -> SegmentFlags {
        SegmentFlags::from_bits_truncate(self.flags.value as u32)
    }
}

/// Decodes the whole program header table.
///
/// A zero declared count is an absent table and yields no entries. A
/// nonzero count with a zero offset, or declared bounds running past the
/// buffer, is corruption rather than "zero entries".
pub(crate) fn load_all(
    src: &ByteSource,
    header: &FileHeader,
) -> Result<Vec<ProgramHeader>, LoadError> {
    let count = header.ph_count.value;
    if count == 0 {
        return Ok(Vec::new());
    }
    let offset = header.ph_offset.value;
    let entry_size = header.ph_entry_size.value;
    let span = count.checked_mul(entry_size).ok_or(LoadError::TableBounds)?;
    let end = offset.checked_add(span).ok_or(LoadError::TableBounds)?;
    if offset == 0 || end > src.len() {
        return Err(LoadError::TableBounds);
    }
    let mut entries = Vec::new();
    for i in 0..count {
        entries.push(ProgramHeader::load(src, offset + i * entry_size, header)?);
    }
    Ok(entries)
}
