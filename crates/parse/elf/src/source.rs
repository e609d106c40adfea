//! Bounds-checked, endianness-aware access to the raw file bytes.
//!
//! [`ByteSource`] owns the file image. The byte order starts out
//! big-endian and is set exactly once by the file header before any other
//! component reads multi-byte values; everything downstream consults it.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::field::FieldWidth;

/// Byte order used for multi-byte integer reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endian {
    /// Most significant byte first.
    #[default]
    Big,
    /// Least significant byte first.
    Little,
}

/// Errors that can occur while decoding an object file.
///
/// Every variant means the same thing to a caller: the buffer is not a
/// structurally valid object file. Per-entry anomalies never surface here;
/// they degrade to empty or `"Unknown"` labels instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadError {
    /// The buffer is shorter than the minimum file header.
    Truncated,
    /// A fixed-width read would run past the end of the buffer.
    OutOfBounds,
    /// A table's declared offset, count, and entry size span bytes the
    /// file does not have.
    TableBounds,
    /// A note record's declared name or descriptor size runs past the
    /// end of the buffer.
    NoteBounds,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated => write!(f, "buffer too short for a file header"),
            Self::OutOfBounds => write!(f, "read past the end of the buffer"),
            Self::TableBounds => write!(f, "declared table bounds exceed the buffer"),
            Self::NoteBounds => write!(f, "note record runs past the end of the buffer"),
        }
    }
}

/// An immutable file image plus the byte order used to interpret it.
#[derive(Debug, Clone)]
pub struct ByteSource {
    bytes: Vec<u8>,
    endian: Endian,
}

impl ByteSource {
    /// Wraps a whole-file byte buffer. Byte order defaults to big-endian
    /// until the file header establishes the real one.
    #[must_use]
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            endian: Endian::Big,
        }
    }

    /// Total length of the buffer in bytes.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// `true` when the buffer holds no bytes at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The currently configured byte order.
    #[must_use]
    pub fn endian(&self) -> Endian {
        self.endian
    }

    /// Fixes the byte order. Called once by the file header; changing it
    /// after other components have loaded would corrupt their reads.
    pub(crate) fn set_endian(&mut self, endian: Endian) {
        self.endian = endian;
    }

    /// The raw file image.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Reads an unsigned integer of the given width at `offset`, honoring
    /// the configured byte order.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::OutOfBounds`] when `offset + width` exceeds
    /// the buffer length.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "offset < buffer length <= usize::MAX after the bounds check"
    )]
    pub fn read_uint(&self, offset: u64, width: FieldWidth) -> Result<u64, LoadError> {
        let end = offset
            .checked_add(width.bytes())
            .ok_or(LoadError::OutOfBounds)?;
        if end > self.len() {
            return Err(LoadError::OutOfBounds);
        }
        let b = &self.bytes[offset as usize..end as usize];
        let value = match (width, self.endian) {
            (FieldWidth::Byte, _) => u64::from(b[0]),
            (FieldWidth::Half, Endian::Little) => u64::from(u16::from_le_bytes([b[0], b[1]])),
            (FieldWidth::Half, Endian::Big) => u64::from(u16::from_be_bytes([b[0], b[1]])),
            (FieldWidth::Word, Endian::Little) => {
                u64::from(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            }
            (FieldWidth::Word, Endian::Big) => {
                u64::from(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
            }
            (FieldWidth::Xword, Endian::Little) => {
                u64::from_le_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]])
            }
            (FieldWidth::Xword, Endian::Big) => {
                u64::from_be_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]])
            }
        };
        Ok(value)
    }

    /// Reads a NUL-terminated string at `offset`, stopping at the first
    /// zero byte or after `max_len` bytes, whichever comes first.
    ///
    /// Never reads past `offset + max_len`. An out-of-range offset yields
    /// an empty string rather than an error, so corrupt string-table
    /// cross-references degrade to empty labels. Non-UTF-8 bytes are
    /// replaced.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "start < buffer length <= usize::MAX after the range check"
    )]
    pub fn read_cstring(&self, offset: u64, max_len: u64) -> String {
        if offset >= self.len() {
            return String::new();
        }
        let start = offset as usize;
        let end = offset
            .saturating_add(max_len)
            .min(self.len()) as usize;
        let window = &self.bytes[start..end];
        let terminated = window
            .iter()
            .position(|&b| b == 0)
            .map_or(window, |nul| &window[..nul]);
        String::from_utf8_lossy(terminated).into_owned()
    }
}
