use std::io::{self, Write};

use crate::svd::Field;
use crate::util;

/// Renders one packed-struct member: a doc header with the bit range, the
/// description, and the member itself defaulted to its reset slice.
pub fn render<W: Write>(f: &Field, out: &mut W) -> io::Result<()> {
    let (bit_offset, bit_width) = match (f.bit_offset, f.bit_width) {
        (Some(offset), Some(width)) if !f.name.is_empty() => (offset, width),
        _ => {
            writeln!(out, "// Not enough info to print field value")?;
            return Ok(());
        }
    };

    writeln!(out, "/// {} [{}:{}]", f.name, bit_offset, bit_offset + bit_width - 1)?;
    writeln!(out, "/// {}", util::describe(&f.description))?;
    writeln!(
        out,
        "{}: u{} = {},",
        f.name,
        bit_width,
        util::reset_slice(bit_offset, bit_width, f.register_reset_value)
    )?;
    Ok(())
}
