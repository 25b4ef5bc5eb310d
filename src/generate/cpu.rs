use std::io::{self, Write};

use crate::svd::Cpu;
use crate::util;

/// Renders the `cpu` namespace. Absent booleans render as `false`;
/// `nvic_prio_bits` is only rendered when the SVD provides it.
pub fn render<W: Write>(cpu: &Cpu, out: &mut W) -> io::Result<()> {
    writeln!(out, "pub const cpu = struct {{")?;
    writeln!(out, "pub const name = \"{}\";", util::unknown_if_empty(&cpu.name))?;
    writeln!(out, "pub const revision = \"{}\";", util::unknown_if_empty(&cpu.revision))?;
    writeln!(out, "pub const endian = \"{}\";", util::unknown_if_empty(&cpu.endian))?;
    writeln!(out, "pub const mpu_present = {};", cpu.mpu_present.unwrap_or(false))?;
    writeln!(out, "pub const fpu_present = {};", cpu.fpu_present.unwrap_or(false))?;
    writeln!(
        out,
        "pub const vendor_systick_config = {};",
        cpu.vendor_systick_config.unwrap_or(false)
    )?;
    if let Some(bits) = cpu.nvic_prio_bits {
        writeln!(out, "pub const nvic_prio_bits = {};", bits)?;
    }
    writeln!(out, "}};")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn render_to_string(cpu: &Cpu) -> String {
        let mut out = Vec::new();
        render(cpu, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn full_cpu_block() {
        let cpu = Cpu {
            name: "CM4".to_string(),
            revision: "r0p1".to_string(),
            endian: "little".to_string(),
            mpu_present: Some(true),
            fpu_present: Some(true),
            nvic_prio_bits: Some(4),
            vendor_systick_config: Some(false),
        };
        assert_eq!(
            render_to_string(&cpu),
            "\
pub const cpu = struct {
pub const name = \"CM4\";
pub const revision = \"r0p1\";
pub const endian = \"little\";
pub const mpu_present = true;
pub const fpu_present = true;
pub const vendor_systick_config = false;
pub const nvic_prio_bits = 4;
};
"
        );
    }

    #[test]
    fn absent_attributes_fall_back() {
        let cpu = Cpu::default();
        assert_eq!(
            render_to_string(&cpu),
            "\
pub const cpu = struct {
pub const name = \"unknown\";
pub const revision = \"unknown\";
pub const endian = \"unknown\";
pub const mpu_present = false;
pub const fpu_present = false;
pub const vendor_systick_config = false;
};
"
        );
    }

    #[test]
    fn fpu_presence_is_independent_of_the_mpu() {
        let cpu = Cpu {
            mpu_present: Some(true),
            fpu_present: Some(false),
            ..Cpu::default()
        };
        let rendered = render_to_string(&cpu);
        assert!(rendered.contains("pub const mpu_present = true;\n"));
        assert!(rendered.contains("pub const fpu_present = false;\n"));
    }
}
