//! File header parsing.
//!
//! The header establishes the two facts every later component depends on:
//! the byte order (from ident byte 5) and the word width (from ident
//! byte 4). The magic signature is read but deliberately not validated —
//! downstream stages simply fail to find meaningful data in a non-ELF
//! buffer, which matches a best-effort dissector rather than a strict
//! validator.

use crate::field::{Field, FieldKind, FieldWidth};
use crate::source::{ByteSource, Endian, LoadError};

/// Minimum buffer length before any header field is read (the size of a
/// 32-bit file header).
pub(crate) const MIN_HEADER_LEN: u64 = 52;

/// Parsed file header.
///
/// Immutable once [`FileHeader::load`] succeeds. Field offsets are
/// format-mandated: ident bytes 0–8, the remaining fields resume at
/// offset 16, with entry/phoff/shoff taking 4 or 8 bytes by class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    /// Magic signature bytes (informational; not validated).
    pub magic: Field,
    /// Word-width class byte.
    pub class: Field,
    /// Data-encoding (endianness) byte.
    pub data: Field,
    /// Ident-block version byte.
    pub ident_version: Field,
    /// OS/ABI identification byte.
    pub os_abi: Field,
    /// OS/ABI version byte.
    pub abi_version: Field,
    /// Object file type.
    pub file_type: Field,
    /// Machine architecture code.
    pub machine: Field,
    /// File format version.
    pub version: Field,
    /// Entry point virtual address.
    pub entry: Field,
    /// File offset of the program header table.
    pub ph_offset: Field,
    /// File offset of the section header table.
    pub sh_offset: Field,
    /// Processor-specific flags.
    pub flags: Field,
    /// Size of this header in bytes.
    pub header_size: Field,
    /// Size of one program header entry.
    pub ph_entry_size: Field,
    /// Number of program header entries.
    pub ph_count: Field,
    /// Size of one section header entry.
    pub sh_entry_size: Field,
    /// Number of section header entries.
    pub sh_count: Field,
    /// Index of the section holding section names.
    pub name_table_index: Field,
}

impl FileHeader {
    /// Parses the file header and fixes the source's byte order.
    ///
    /// The endianness is set from the data byte before any multi-byte
    /// field past the ident block is read; the magic is read under the
    /// default byte order since it precedes the data byte.
    pub(crate) fn load(src: &mut ByteSource) -> Result<Self, LoadError> {
        if src.len() < MIN_HEADER_LEN {
            return Err(LoadError::Truncated);
        }

        let magic = Field::read(src, 0, FieldWidth::Word, FieldKind::Plain)?;
        let class = Field::read(src, 4, FieldWidth::Byte, FieldKind::Class)?;
        let data = Field::read(src, 5, FieldWidth::Byte, FieldKind::DataEncoding)?;
        match data.value {
            1 => src.set_endian(Endian::Little),
            2 => src.set_endian(Endian::Big),
            _ => {}
        }
        let ident_version = Field::read(src, 6, FieldWidth::Byte, FieldKind::Version)?;
        let os_abi = Field::read(src, 7, FieldWidth::Byte, FieldKind::OsAbi)?;
        let abi_version = Field::read(src, 8, FieldWidth::Byte, FieldKind::Plain)?;

        let word = if class.value == 2 {
            FieldWidth::Xword
        } else {
            FieldWidth::Word
        };

        // Fields resume at the fixed offset 16 past the ident block.
        let mut off = 16;
        let file_type = Field::read(src, off, FieldWidth::Half, FieldKind::FileType)?;
        off += 2;
        let machine = Field::read(src, off, FieldWidth::Half, FieldKind::Machine)?;
        off += 2;
        let version = Field::read(src, off, FieldWidth::Word, FieldKind::Version)?;
        off += 4;
        let entry = Field::read(src, off, word, FieldKind::Plain)?;
        off += word.bytes();
        let ph_offset = Field::read(src, off, word, FieldKind::Plain)?;
        off += word.bytes();
        let sh_offset = Field::read(src, off, word, FieldKind::Plain)?;
        off += word.bytes();
        let flags = Field::read(src, off, FieldWidth::Word, FieldKind::Plain)?;
        off += 4;
        let header_size = Field::read(src, off, FieldWidth::Half, FieldKind::Plain)?;
        off += 2;
        let ph_entry_size = Field::read(src, off, FieldWidth::Half, FieldKind::Plain)?;
        off += 2;
        let ph_count = Field::read(src, off, FieldWidth::Half, FieldKind::Plain)?;
        off += 2;
        let sh_entry_size = Field::read(src, off, FieldWidth::Half, FieldKind::Plain)?;
        off += 2;
        let sh_count = Field::read(src, off, FieldWidth::Half, FieldKind::Plain)?;
        off += 2;
        let name_table_index = Field::read(src, off, FieldWidth::Half, FieldKind::Plain)?;

        Ok(Self {
            magic,
            class,
            data,
            ident_version,
            os_abi,
            abi_version,
            file_type,
            machine,
            version,
            entry,
            ph_offset,
            sh_offset,
            flags,
            header_size,
            ph_entry_size,
            ph_count,
            sh_entry_size,
            sh_count,
            name_table_index,
        })
    }

    /// `true` when the class byte declares a 64-bit layout.
    #[must_use]
    pub fn is_64bit(&self) -> bool {
        self.class.value == 2
    }

    /// Width of address-sized fields under this header's class.
    #[must_use]
    pub fn word_width(&self) -> FieldWidth {
        if self.is_64bit() {
            FieldWidth::Xword
        } else {
            FieldWidth::Word
        }
    }
}
