//! In-memory workbook fixtures shared by the integration tests.
//!
//! `.xlsx` fixtures are written with `rust_xlsxwriter`. There is no `.xls` writer in the Rust
//! ecosystem, so `.xls` fixtures are hand-assembled: a minimal BIFF8 record stream (globals with
//! one BOUNDSHEET and an SST, then one worksheet substream) stored as the `Workbook` stream of a
//! compound file.
#![allow(dead_code)]

use std::io::{Cursor, Write};

/// A fixture cell.
#[derive(Debug, Clone, Copy)]
pub enum Cell<'a> {
    S(&'a str),
    N(f64),
    B(bool),
    Empty,
}

pub use Cell::{Empty, B, N, S};

/// Build an `.xlsx` workbook with one sheet named `Sheet1`; `rows[0]` lands on row 1.
pub fn xlsx_bytes(rows: &[Vec<Cell<'_>>]) -> Vec<u8> {
    let mut wb = rust_xlsxwriter::Workbook::new();
    {
        let ws = wb.add_worksheet();
        ws.set_name("Sheet1").unwrap();
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                let (r, c) = (r as u32, c as u16);
                match *cell {
                    S(s) => {
                        ws.write_string(r, c, s).unwrap();
                    }
                    N(n) => {
                        ws.write_number(r, c, n).unwrap();
                    }
                    B(b) => {
                        ws.write_boolean(r, c, b).unwrap();
                    }
                    Empty => {}
                }
            }
        }
    }
    wb.save_to_buffer().unwrap()
}

const RECORD_BOF: u16 = 0x0809;
const RECORD_EOF: u16 = 0x000A;
const RECORD_CODEPAGE: u16 = 0x0042;
const RECORD_WINDOW1: u16 = 0x003D;
const RECORD_FONT: u16 = 0x0031;
const RECORD_XF: u16 = 0x00E0;
const RECORD_BOUNDSHEET: u16 = 0x0085;
const RECORD_SST: u16 = 0x00FC;
const RECORD_DIMENSIONS: u16 = 0x0200;
const RECORD_WINDOW2: u16 = 0x023E;
const RECORD_NUMBER: u16 = 0x0203;
const RECORD_LABELSST: u16 = 0x00FD;

const BOF_VERSION_BIFF8: u16 = 0x0600;
// BIFF8 strings are UTF-16; calamine decodes by this codepage.
const CODEPAGE_UTF16: u16 = 1200;
const BOF_DT_WORKBOOK_GLOBALS: u16 = 0x0005;
const BOF_DT_WORKSHEET: u16 = 0x0010;

const XF_FLAG_LOCKED: u16 = 0x0001;
const XF_FLAG_STYLE: u16 = 0x0004;

/// Build a BIFF8 `.xls` workbook with one sheet named `Sheet1`; `rows[0]` lands on row 0.
///
/// Supports string and number cells only.
pub fn xls_bytes(rows: &[Vec<Cell<'_>>]) -> Vec<u8> {
    let mut strings: Vec<&str> = Vec::new();
    for row in rows {
        for cell in row {
            if let S(s) = *cell {
                if !strings.contains(&s) {
                    strings.push(s);
                }
            }
        }
    }

    let mut globals = Vec::<u8>::new();
    push_record(&mut globals, RECORD_BOF, &bof(BOF_DT_WORKBOOK_GLOBALS));
    push_record(&mut globals, RECORD_CODEPAGE, &CODEPAGE_UTF16.to_le_bytes());
    push_record(&mut globals, RECORD_WINDOW1, &window1());
    push_record(&mut globals, RECORD_FONT, &font("Arial"));

    // 16 style XFs + 1 General cell XF.
    for _ in 0..16 {
        push_record(&mut globals, RECORD_XF, &xf_record(true));
    }
    let xf_general = 16u16;
    push_record(&mut globals, RECORD_XF, &xf_record(false));

    let boundsheet_start = globals.len();
    let mut boundsheet = Vec::<u8>::new();
    boundsheet.extend_from_slice(&0u32.to_le_bytes()); // lbPlyPos, patched below
    boundsheet.extend_from_slice(&0u16.to_le_bytes()); // visible worksheet
    write_short_unicode_string(&mut boundsheet, "Sheet1");
    push_record(&mut globals, RECORD_BOUNDSHEET, &boundsheet);
    let boundsheet_offset_pos = boundsheet_start + 4;

    let mut sst = Vec::<u8>::new();
    sst.extend_from_slice(&(strings.len() as u32).to_le_bytes()); // cstTotal
    sst.extend_from_slice(&(strings.len() as u32).to_le_bytes()); // cstUnique
    for s in &strings {
        write_unicode_string(&mut sst, s);
    }
    push_record(&mut globals, RECORD_SST, &sst);
    push_record(&mut globals, RECORD_EOF, &[]);

    let mut sheet = Vec::<u8>::new();
    push_record(&mut sheet, RECORD_BOF, &bof(BOF_DT_WORKSHEET));
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut dims = Vec::<u8>::new();
    dims.extend_from_slice(&0u32.to_le_bytes()); // first row
    dims.extend_from_slice(&(rows.len() as u32).to_le_bytes()); // last row + 1
    dims.extend_from_slice(&0u16.to_le_bytes()); // first col
    dims.extend_from_slice(&(width as u16).to_le_bytes()); // last col + 1
    dims.extend_from_slice(&0u16.to_le_bytes()); // reserved
    push_record(&mut sheet, RECORD_DIMENSIONS, &dims);
    push_record(&mut sheet, RECORD_WINDOW2, &window2());

    for (r, row) in rows.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            let (r, c) = (r as u16, c as u16);
            match *cell {
                S(s) => {
                    let isst = strings.iter().position(|x| *x == s).unwrap() as u32;
                    push_record(&mut sheet, RECORD_LABELSST, &labelsst_cell(r, c, xf_general, isst));
                }
                N(n) => push_record(&mut sheet, RECORD_NUMBER, &number_cell(r, c, xf_general, n)),
                B(_) => panic!("boolean cells are not supported by the xls fixture builder"),
                Empty => {}
            }
        }
    }
    push_record(&mut sheet, RECORD_EOF, &[]);

    let sheet_offset = globals.len();
    globals[boundsheet_offset_pos..boundsheet_offset_pos + 4]
        .copy_from_slice(&(sheet_offset as u32).to_le_bytes());
    globals.extend_from_slice(&sheet);

    let mut ole = cfb::CompoundFile::create(Cursor::new(Vec::new())).unwrap();
    {
        let mut stream = ole.create_stream("Workbook").unwrap();
        stream.write_all(&globals).unwrap();
    }
    ole.into_inner().into_inner()
}

fn push_record(out: &mut Vec<u8>, id: u16, data: &[u8]) {
    out.extend_from_slice(&id.to_le_bytes());
    out.extend_from_slice(&(data.len() as u16).to_le_bytes());
    out.extend_from_slice(data);
}

fn bof(dt: u16) -> [u8; 16] {
    let mut out = [0u8; 16];
    out[0..2].copy_from_slice(&BOF_VERSION_BIFF8.to_le_bytes());
    out[2..4].copy_from_slice(&dt.to_le_bytes());
    out[4..6].copy_from_slice(&0x0DBBu16.to_le_bytes()); // build
    out[6..8].copy_from_slice(&0x07CCu16.to_le_bytes()); // year
    out
}

fn window1() -> [u8; 18] {
    let mut out = [0u8; 18];
    out[14..16].copy_from_slice(&1u16.to_le_bytes()); // cTabSel
    out[16..18].copy_from_slice(&600u16.to_le_bytes()); // wTabRatio
    out
}

fn window2() -> [u8; 18] {
    let mut out = [0u8; 18];
    out[0..2].copy_from_slice(&0x02B6u16.to_le_bytes());
    out
}

fn font(name: &str) -> Vec<u8> {
    let mut out = Vec::<u8>::new();
    out.extend_from_slice(&200u16.to_le_bytes()); // height (10pt)
    out.extend_from_slice(&0u16.to_le_bytes()); // option flags
    out.extend_from_slice(&0x7FFFu16.to_le_bytes()); // automatic color
    out.extend_from_slice(&400u16.to_le_bytes()); // weight
    out.extend_from_slice(&0u16.to_le_bytes()); // escapement
    out.extend_from_slice(&[0, 0, 0, 0]); // underline, family, charset, reserved
    write_short_unicode_string(&mut out, name);
    out
}

fn xf_record(is_style_xf: bool) -> [u8; 20] {
    let mut out = [0u8; 20];
    // font 0, number format 0 (General)
    let flags: u16 = XF_FLAG_LOCKED | if is_style_xf { XF_FLAG_STYLE } else { 0 };
    out[4..6].copy_from_slice(&flags.to_le_bytes());
    out[6] = 0x20; // General + Bottom
    out[9] = 0x3F; // apply all attributes
    out
}

fn number_cell(row: u16, col: u16, xf: u16, v: f64) -> [u8; 14] {
    let mut out = [0u8; 14];
    out[0..2].copy_from_slice(&row.to_le_bytes());
    out[2..4].copy_from_slice(&col.to_le_bytes());
    out[4..6].copy_from_slice(&xf.to_le_bytes());
    out[6..14].copy_from_slice(&v.to_le_bytes());
    out
}

fn labelsst_cell(row: u16, col: u16, xf: u16, sst_index: u32) -> [u8; 10] {
    let mut out = [0u8; 10];
    out[0..2].copy_from_slice(&row.to_le_bytes());
    out[2..4].copy_from_slice(&col.to_le_bytes());
    out[4..6].copy_from_slice(&xf.to_le_bytes());
    out[6..10].copy_from_slice(&sst_index.to_le_bytes());
    out
}

fn write_short_unicode_string(out: &mut Vec<u8>, s: &str) {
    // ShortXLUnicodeString: [cch: u8][flags: u8][chars]
    let utf16: Vec<u16> = s.encode_utf16().collect();
    out.push(utf16.len() as u8);
    write_utf16_chars(out, &utf16);
}

fn write_unicode_string(out: &mut Vec<u8>, s: &str) {
    // XLUnicodeString: [cch: u16][flags: u8][chars]
    let utf16: Vec<u16> = s.encode_utf16().collect();
    out.extend_from_slice(&(utf16.len() as u16).to_le_bytes());
    write_utf16_chars(out, &utf16);
}

fn write_utf16_chars(out: &mut Vec<u8>, utf16: &[u16]) {
    if utf16.iter().all(|&ch| ch <= 0x00FF) {
        out.push(0); // compressed (8-bit)
        out.extend(utf16.iter().map(|&ch| ch as u8));
    } else {
        out.push(1); // uncompressed (16-bit)
        for &ch in utf16 {
            out.extend_from_slice(&ch.to_le_bytes());
        }
    }
}
