use std::io::{self, Write};

use crate::svd::Interrupt;

/// Renders one interrupt-table entry. Entries that never received a number
/// are skipped silently.
pub fn render<W: Write>(i: &Interrupt, out: &mut W) -> io::Result<()> {
    if let Some(value) = i.value {
        writeln!(out, "pub const {} = {};", i.name, value)?;
    }
    Ok(())
}
