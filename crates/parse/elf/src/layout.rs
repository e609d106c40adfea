//! Flat byte-range map of the decoded file.
//!
//! This is the only structure a renderer needs: labeled, color-hinted
//! spans for the header, the two table regions, and every section with
//! actual file bytes. The renderer never inspects raw table entries.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::object::ObjectFile;

/// Color hint for the file header span.
const HEADER_COLOR: &str = "#FFFF00";

/// Color hint for the program header table span.
const PROGRAM_TABLE_COLOR: &str = "#00FFFF";

/// Color hint for the section header table span.
const SECTION_TABLE_COLOR: &str = "#FF00FF";

/// Per-section color hints, cycled by section index.
const SECTION_COLORS: [&str; 15] = [
    "#00FF00", "#00FFFF", "#FF00FF", "#FFFF00", "#FF0000", "#00FF88", "#FF00AA", "#AAFF00",
    "#00AAFF", "#FF88FF", "#88FF00", "#FF0088", "#00FF44", "#FF4400", "#44FF00",
];

/// A labeled, color-hinted byte range of the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    /// First byte of the range.
    pub start: u64,
    /// One past the last byte of the range.
    pub end: u64,
    /// Human-readable label.
    pub label: String,
    /// Renderer color hint (CSS hex).
    pub color: &'static str,
}

impl ObjectFile {
    /// Extracts the byte-range map: the header span, the program and
    /// section header table spans (when present), and one span per
    /// section with nonzero size and offset.
    #[must_use]
    pub fn layout(&self) -> Vec<Region> {
        let header = self.header();
        let mut regions = Vec::new();

        regions.push(Region {
            start: 0,
            end: header.header_size.value,
            label: String::from("ELF Header"),
            color: HEADER_COLOR,
        });

        let ph_count = header.ph_count.value;
        let ph_offset = header.ph_offset.value;
        if ph_count > 0 && ph_offset > 0 {
            regions.push(Region {
                start: ph_offset,
                end: ph_offset.saturating_add(ph_count * header.ph_entry_size.value),
                label: format!("Program Headers ({ph_count})"),
                color: PROGRAM_TABLE_COLOR,
            });
        }

        let sh_count = header.sh_count.value;
        let sh_offset = header.sh_offset.value;
        if sh_count > 0 && sh_offset > 0 {
            regions.push(Region {
                start: sh_offset,
                end: sh_offset.saturating_add(sh_count * header.sh_entry_size.value),
                label: format!("Section Headers ({sh_count})"),
                color: SECTION_TABLE_COLOR,
            });
        }

        for (index, sec) in self.sections().iter().enumerate() {
            if sec.size.value == 0 || sec.offset.value == 0 {
                continue;
            }
            let name = self.section_name(index);
            let label = if name.is_empty() {
                format!("Section {index}")
            } else {
                name
            };
            regions.push(Region {
                start: sec.offset.value,
                end: sec.offset.value.saturating_add(sec.size.value),
                label,
                color: SECTION_COLORS[index % SECTION_COLORS.len()],
            });
        }

        regions
    }
}
