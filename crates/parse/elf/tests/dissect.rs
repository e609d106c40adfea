//! End-to-end decode of a complete synthetic 32-bit object file.
//!
//! The buffer carries every record kind the decoder knows: a program
//! header, a section name table, a symbol table with its linked string
//! table, and a note section.

use filescope_elf::{Endian, FieldKind, LoadError, ObjectFile, SegmentFlags, describe};

use filescope_elf::desc;

const EHDR_SIZE: u32 = 52;
const PHDR_SIZE: u32 = 32;
const SHDR_SIZE: u32 = 40;
const SYM_SIZE: u32 = 16;

/// Appends a 32-bit little-endian section header.
#[expect(clippy::too_many_arguments, reason = "mirrors the on-disk field list")]
fn push_shdr(
    buf: &mut Vec<u8>,
    name: u32,
    sec_type: u32,
    flags: u32,
    offset: u32,
    size: u32,
    link: u32,
    entsize: u32,
) {
    buf.extend_from_slice(&name.to_le_bytes());
    buf.extend_from_slice(&sec_type.to_le_bytes());
    buf.extend_from_slice(&flags.to_le_bytes());
    buf.extend_from_slice(&0u32.to_le_bytes()); // addr
    buf.extend_from_slice(&offset.to_le_bytes());
    buf.extend_from_slice(&size.to_le_bytes());
    buf.extend_from_slice(&link.to_le_bytes());
    buf.extend_from_slice(&0u32.to_le_bytes()); // info
    buf.extend_from_slice(&4u32.to_le_bytes()); // addralign
    buf.extend_from_slice(&entsize.to_le_bytes());
}

/// Builds the complete test file and returns it.
fn build_sample() -> Vec<u8> {
    // Layout, in file order:
    //   0   file header
    //   52  program header table (1 entry)
    //   84  section header table (5 entries)
    //   284 .shstrtab  "\0.shstrtab\0.symtab\0.strtab\0.note\0"
    //   317 .symtab    (2 entries)
    //   349 .strtab    "\0main\0"
    //   355 .note      (one GNU record)
    let shstrtab: &[u8] = b"\0.shstrtab\0.symtab\0.strtab\0.note\0";
    let strtab: &[u8] = b"\0main\0";

    let ph_off = EHDR_SIZE;
    let sh_off = ph_off + PHDR_SIZE;
    let shstrtab_off = sh_off + 5 * SHDR_SIZE;
    let symtab_off = shstrtab_off + u32::try_from(shstrtab.len()).unwrap();
    let strtab_off = symtab_off + 2 * SYM_SIZE;
    let note_off = strtab_off + u32::try_from(strtab.len()).unwrap();

    let mut buf = vec![0u8; 52];
    buf[0..4].copy_from_slice(&[0x7F, b'E', b'L', b'F']);
    buf[4] = 1; // 32-bit
    buf[5] = 1; // little-endian
    buf[6] = 1;
    buf[16..18].copy_from_slice(&2u16.to_le_bytes()); // ET_EXEC
    buf[18..20].copy_from_slice(&62u16.to_le_bytes()); // EM_X86_64
    buf[20..24].copy_from_slice(&1u32.to_le_bytes());
    buf[24..28].copy_from_slice(&0x8048_0000u32.to_le_bytes()); // entry
    buf[28..32].copy_from_slice(&ph_off.to_le_bytes());
    buf[32..36].copy_from_slice(&sh_off.to_le_bytes());
    buf[40..42].copy_from_slice(&u16::try_from(EHDR_SIZE).unwrap().to_le_bytes());
    buf[42..44].copy_from_slice(&u16::try_from(PHDR_SIZE).unwrap().to_le_bytes());
    buf[44..46].copy_from_slice(&1u16.to_le_bytes()); // phnum
    buf[46..48].copy_from_slice(&u16::try_from(SHDR_SIZE).unwrap().to_le_bytes());
    buf[48..50].copy_from_slice(&5u16.to_le_bytes()); // shnum
    buf[50..52].copy_from_slice(&1u16.to_le_bytes()); // shstrndx

    // Program header: PT_LOAD, R+X, covering the whole file.
    buf.extend_from_slice(&1u32.to_le_bytes());
    buf.extend_from_slice(&0u32.to_le_bytes()); // offset
    buf.extend_from_slice(&0x8048_0000u32.to_le_bytes()); // vaddr
    buf.extend_from_slice(&0x8048_0000u32.to_le_bytes()); // paddr
    buf.extend_from_slice(&0x200u32.to_le_bytes()); // filesz
    buf.extend_from_slice(&0x200u32.to_le_bytes()); // memsz
    buf.extend_from_slice(&0x5u32.to_le_bytes()); // flags: R+X
    buf.extend_from_slice(&0x1000u32.to_le_bytes()); // align

    // Sections: NULL, .shstrtab, .symtab, .strtab, .note.
    push_shdr(&mut buf, 0, 0, 0, 0, 0, 0, 0);
    push_shdr(
        &mut buf,
        1,
        3,
        0,
        shstrtab_off,
        u32::try_from(shstrtab.len()).unwrap(),
        0,
        0,
    );
    push_shdr(&mut buf, 11, 2, 0, symtab_off, 2 * SYM_SIZE, 3, SYM_SIZE);
    push_shdr(
        &mut buf,
        19,
        3,
        0,
        strtab_off,
        u32::try_from(strtab.len()).unwrap(),
        0,
        0,
    );
    push_shdr(&mut buf, 27, 7, 0x2, note_off, 20, 0, 0);

    buf.extend_from_slice(shstrtab);

    // Symbols: the null entry, then "main" (GLOBAL FUNC, DEFAULT).
    buf.extend_from_slice(&[0u8; 16]);
    buf.extend_from_slice(&1u32.to_le_bytes()); // name -> "main"
    buf.extend_from_slice(&0x8048_0010u32.to_le_bytes()); // value
    buf.extend_from_slice(&0x24u32.to_le_bytes()); // size
    buf.push(0x12); // info: GLOBAL | FUNC
    buf.push(0x00); // other: DEFAULT
    buf.extend_from_slice(&2u16.to_le_bytes()); // shndx

    buf.extend_from_slice(strtab);

    // Note: namesz=4, descsz=4, type=3, name "GNU\0", desc 0xDEADBEEF.
    buf.extend_from_slice(&4u32.to_le_bytes());
    buf.extend_from_slice(&4u32.to_le_bytes());
    buf.extend_from_slice(&3u32.to_le_bytes());
    buf.extend_from_slice(b"GNU\0");
    buf.extend_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);

    buf
}

#[test]
fn whole_file_decodes_end_to_end() {
    let elf = ObjectFile::load(build_sample()).expect("sample file decodes");

    assert!(!elf.is_64bit());
    assert_eq!(elf.endian(), Endian::Little);
    assert_eq!(elf.header().machine.describe(), "EM_X86_64 (AMD x86-64 architecture)");
    assert_eq!(elf.entry_point_hex(), "0x80480000");

    // Program headers.
    assert_eq!(elf.program_headers().len(), 1);
    let seg = &elf.program_headers()[0];
    assert_eq!(seg.seg_type.describe(), "PT_LOAD (Loadable segment)");
    assert_eq!(seg.flag_bits(), SegmentFlags::READ | SegmentFlags::EXEC);
    assert_eq!(seg.flags.describe(), "Execute|Read");

    // Sections and their names.
    assert_eq!(elf.sections().len(), 5);
    assert_eq!(elf.section_name(1), ".shstrtab");
    assert_eq!(elf.section_name(2), ".symtab");
    assert_eq!(elf.section_name(3), ".strtab");
    assert_eq!(elf.section_name(4), ".note");
    assert_eq!(elf.section_name(0), "");

    // Symbols.
    assert_eq!(elf.symbol_tables().len(), 1);
    let table = &elf.symbol_tables()[0];
    assert_eq!(table.len(), 2);
    let main = &table.entries[1];
    assert_eq!(elf.symbol_name(table, main), "main");
    assert_eq!(main.binding(), 1);
    assert_eq!(main.sym_type(), 2);
    assert_eq!(main.info.describe(), "Binding: GLOBAL | Type: FUNC");

    // Notes.
    assert_eq!(elf.note_tables().len(), 1);
    let note = &elf.note_tables()[0].entries[0];
    assert_eq!(note.name, "GNU");
    assert_eq!(note.note_type.value, 3);
    assert_eq!(note.desc, vec![0xDE, 0xAD, 0xBE, 0xEF]);
}

#[test]
fn layout_covers_every_populated_span() {
    let elf = ObjectFile::load(build_sample()).expect("sample file decodes");
    let regions = elf.layout();

    let labels: Vec<&str> = regions.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(
        labels,
        [
            "ELF Header",
            "Program Headers (1)",
            "Section Headers (5)",
            ".shstrtab",
            ".symtab",
            ".strtab",
            ".note",
        ]
    );
    assert_eq!(regions[0].end, 52);
    assert_eq!(regions[1].start, 52);
    assert_eq!(regions[1].end, 52 + 32);
    assert_eq!(regions[2].start, 84);
    assert_eq!(regions[2].end, 84 + 5 * 40);
}

#[test]
fn truncating_the_note_breaks_only_the_last_stage() {
    // Drop the descriptor's last byte: the note claims four bytes the
    // buffer no longer has, so the whole load reports the note stage.
    let mut buf = build_sample();
    buf.truncate(buf.len() - 1);
    assert_eq!(ObjectFile::load(buf).unwrap_err(), LoadError::NoteBounds);
}

#[test]
fn describe_is_a_pure_function_of_kind_and_value() {
    assert_eq!(
        desc::describe(FieldKind::SectionType, 7),
        "SHT_NOTE (Note information)"
    );
    assert_eq!(describe(FieldKind::Machine, 40), "EM_ARM (Advanced RISC Machines ARM)");
}
