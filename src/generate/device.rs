use std::io::{self, Write};

use crate::svd::Device;
use crate::util;

use super::{cpu, interrupt, peripheral};

/// Whole device generation: header constants, the cpu block when present,
/// every peripheral in model order, then the interrupt table in ascending
/// numeric order.
pub fn render<W: Write>(d: &mut Device, out: &mut W) -> io::Result<()> {
    writeln!(out, "pub const device_name = \"{}\";", util::unknown_if_empty(&d.name))?;
    writeln!(out, "pub const device_revision = \"{}\";", util::unknown_if_empty(&d.version))?;
    writeln!(
        out,
        "pub const device_description = \"{}\";",
        util::unknown_if_empty(&d.description)
    )?;
    if let Some(c) = &d.cpu {
        cpu::render(c, out)?;
    }
    for p in &mut d.peripherals {
        peripheral::render(p, out)?;
    }
    writeln!(out, "pub const interrupts = struct {{")?;
    for i in d.interrupts.values() {
        interrupt::render(i, out)?;
    }
    writeln!(out, "}};")?;
    Ok(())
}
