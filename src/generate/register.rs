use std::cmp;
use std::io::{self, Write};

use crate::svd::Register;
use crate::util;

use super::field;

/// Renders the packed layout type for a register, then the binding of the
/// register name to the runtime helper at `base_address + address_offset`.
///
/// Fields are stably sorted by bit offset first. The walk keeps a cursor of
/// the next uncovered bit and synthesizes `_unused*` fillers for every gap,
/// so the emitted members cover bits 0..31 exactly once and concatenate to
/// the register's reset value.
pub fn render<W: Write>(r: &mut Register, out: &mut W) -> io::Result<()> {
    let address_offset = match r.address_offset {
        Some(offset) if !r.name.is_empty() => offset,
        _ => {
            writeln!(out, "// Not enough info to print register value")?;
            return Ok(());
        }
    };

    // Absent offsets sort to the front and trip the incomplete-field escape
    // on the first iteration.
    r.fields.sort_by_key(|f| f.bit_offset);

    writeln!(out, "/// {}", r.name)?;
    writeln!(out, "pub const {}_val = packed struct {{", r.name)?;
    let mut cursor = 0u32;
    for f in &r.fields {
        let (bit_offset, bit_width) = match (f.bit_offset, f.bit_width) {
            (Some(offset), Some(width)) => (offset, width),
            _ => {
                writeln!(out, "// Not enough info to print register")?;
                return Ok(());
            }
        };
        if bit_offset > cursor {
            unused(cursor, bit_offset, r.reset_value, out)?;
        }
        field::render(f, out)?;
        cursor = bit_offset + bit_width;
    }
    if cursor < 32 {
        unused(cursor, 32, r.reset_value, out)?;
    }
    writeln!(out, "}};")?;
    writeln!(out, "/// {}", util::describe(&r.description))?;
    writeln!(
        out,
        "pub const {} = Register({}_val).init(base_address + 0x{:x});",
        r.name, r.name, address_offset
    )?;
    Ok(())
}

/// Covers the gap `[first, last)` with filler members. Each chunk ends at
/// the next 8-bit boundary or at the end of the gap, whichever comes first;
/// the target's packed layouts cannot host a filler that crosses a byte
/// boundary.
fn unused<W: Write>(first: u32, last: u32, reset: u32, out: &mut W) -> io::Result<()> {
    writeln!(out, "/// unused [{}:{}]", first, last - 1)?;
    let mut start = first;
    while start < last {
        let end = cmp::min(last, (start / 8 + 1) * 8);
        let width = end - start;
        writeln!(
            out,
            "_unused{}: u{} = {},",
            start,
            width,
            util::reset_slice(start, width, reset)
        )?;
        start = end;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::svd::Field;

    use super::*;

    fn render_to_string(r: &mut Register) -> String {
        let mut out = Vec::new();
        render(r, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn field(name: &str, description: &str, bit_offset: u32, bit_width: u32, reset: u32) -> Field {
        Field {
            name: name.to_string(),
            description: description.to_string(),
            bit_offset: Some(bit_offset),
            bit_width: Some(bit_width),
            register_reset_value: reset,
            ..Field::default()
        }
    }

    #[test]
    fn register_with_gaps() {
        let mut r = Register {
            name: "RND".to_string(),
            description: "RND comment".to_string(),
            address_offset: Some(0x100),
            reset_value: 0b101,
            // Deliberately out of order; rendering sorts by bit offset.
            fields: vec![
                field("SEED", "SEED comment", 10, 3, 0b101),
                field("RNGEN", "RNGEN comment", 2, 1, 0b101),
            ],
            ..Register::default()
        };
        assert_eq!(
            render_to_string(&mut r),
            "\
/// RND
pub const RND_val = packed struct {
/// unused [0:1]
_unused0: u2 = 1,
/// RNGEN [2:2]
/// RNGEN comment
RNGEN: u1 = 1,
/// unused [3:9]
_unused3: u5 = 0,
_unused8: u2 = 0,
/// SEED [10:12]
/// SEED comment
SEED: u3 = 0,
/// unused [13:31]
_unused13: u3 = 0,
_unused16: u8 = 0,
_unused24: u8 = 0,
};
/// RND comment
pub const RND = Register(RND_val).init(base_address + 0x100);
"
        );
    }

    #[test]
    fn register_without_fields_chunks_per_byte() {
        let mut r = Register {
            name: "EMPTY".to_string(),
            address_offset: Some(0),
            ..Register::default()
        };
        assert_eq!(
            render_to_string(&mut r),
            "\
/// EMPTY
pub const EMPTY_val = packed struct {
/// unused [0:31]
_unused0: u8 = 0,
_unused8: u8 = 0,
_unused16: u8 = 0,
_unused24: u8 = 0,
};
/// No description
pub const EMPTY = Register(EMPTY_val).init(base_address + 0x0);
"
        );
    }

    #[test]
    fn full_width_field_needs_no_fillers() {
        let mut r = Register {
            name: "DATA".to_string(),
            description: "Data register".to_string(),
            address_offset: Some(0x4),
            reset_value: 0xdead_beef,
            fields: vec![field("DATA", "", 0, 32, 0xdead_beef)],
            ..Register::default()
        };
        assert_eq!(
            render_to_string(&mut r),
            "\
/// DATA
pub const DATA_val = packed struct {
/// DATA [0:31]
/// No description
DATA: u32 = 3735928559,
};
/// Data register
pub const DATA = Register(DATA_val).init(base_address + 0x4);
"
        );
    }

    #[test]
    fn trailing_single_bit_field_needs_no_trailing_filler() {
        let mut r = Register {
            name: "LOCK".to_string(),
            address_offset: Some(0x10),
            reset_value: 0x8000_0000,
            fields: vec![field("LOCKED", "Lock status", 31, 1, 0x8000_0000)],
            ..Register::default()
        };
        assert_eq!(
            render_to_string(&mut r),
            "\
/// LOCK
pub const LOCK_val = packed struct {
/// unused [0:30]
_unused0: u8 = 0,
_unused8: u8 = 0,
_unused16: u8 = 0,
_unused24: u7 = 0,
/// LOCKED [31:31]
/// Lock status
LOCKED: u1 = 1,
};
/// No description
pub const LOCK = Register(LOCK_val).init(base_address + 0x10);
"
        );
    }

    #[test]
    fn gap_crossing_byte_boundaries_splits_at_each() {
        let mut r = Register {
            name: "CFG".to_string(),
            address_offset: Some(0x8),
            fields: vec![field("LOW", "", 0, 3, 0), field("HIGH", "", 25, 7, 0)],
            ..Register::default()
        };
        assert_eq!(
            render_to_string(&mut r),
            "\
/// CFG
pub const CFG_val = packed struct {
/// LOW [0:2]
/// No description
LOW: u3 = 0,
/// unused [3:24]
_unused3: u5 = 0,
_unused8: u8 = 0,
_unused16: u8 = 0,
_unused24: u1 = 0,
/// HIGH [25:31]
/// No description
HIGH: u7 = 0,
};
/// No description
pub const CFG = Register(CFG_val).init(base_address + 0x8);
"
        );
    }

    #[test]
    fn register_without_offset_degrades_to_comment() {
        let mut r = Register {
            name: "X".to_string(),
            ..Register::default()
        };
        assert_eq!(render_to_string(&mut r), "// Not enough info to print register value\n");
    }

    #[test]
    fn unplaced_field_aborts_the_body() {
        let mut r = Register {
            name: "X".to_string(),
            address_offset: Some(0),
            fields: vec![
                field("A", "", 0, 1, 0),
                Field {
                    name: "B".to_string(),
                    bit_offset: Some(5),
                    ..Field::default()
                },
            ],
            ..Register::default()
        };
        assert_eq!(
            render_to_string(&mut r),
            "\
/// X
pub const X_val = packed struct {
/// A [0:0]
/// No description
A: u1 = 0,
// Not enough info to print register
"
        );
    }

    #[test]
    fn field_without_offset_sorts_first_and_aborts() {
        let mut r = Register {
            name: "X".to_string(),
            address_offset: Some(0),
            fields: vec![
                field("A", "", 8, 1, 0),
                Field {
                    name: "B".to_string(),
                    bit_width: Some(2),
                    ..Field::default()
                },
            ],
            ..Register::default()
        };
        assert_eq!(
            render_to_string(&mut r),
            "\
/// X
pub const X_val = packed struct {
// Not enough info to print register
"
        );
    }
}
