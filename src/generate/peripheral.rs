use std::io::{self, Write};

use crate::svd::Peripheral;
use crate::util;

use super::register;

/// Renders a peripheral namespace: the `base_address` constant followed by
/// every register in model order. Registers resolve their absolute address
/// against the enclosing constant.
pub fn render<W: Write>(p: &mut Peripheral, out: &mut W) -> io::Result<()> {
    let base_address = match p.base_address {
        Some(base) if !p.name.is_empty() => base,
        _ => {
            writeln!(out, "// Not enough info to print peripheral value")?;
            return Ok(());
        }
    };

    writeln!(out, "/// {}", util::describe(&p.description))?;
    writeln!(out, "pub const {} = struct {{", p.name)?;
    writeln!(out, "const base_address = 0x{:x};", base_address)?;
    for r in &mut p.registers {
        register::render(r, out)?;
    }
    writeln!(out, "}};")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::svd::{Field, Register};

    use super::*;

    fn render_to_string(p: &mut Peripheral) -> String {
        let mut out = Vec::new();
        render(p, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn rng_peripheral() -> Peripheral {
        Peripheral {
            name: "PERIPH".to_string(),
            base_address: Some(0x24000),
            registers: vec![Register {
                name: "RND".to_string(),
                description: "RND comment".to_string(),
                address_offset: Some(0x100),
                reset_value: 0b101,
                fields: vec![
                    Field {
                        name: "RNGEN".to_string(),
                        description: "RNGEN comment".to_string(),
                        bit_offset: Some(2),
                        bit_width: Some(1),
                        register_reset_value: 0b101,
                        ..Field::default()
                    },
                    Field {
                        name: "SEED".to_string(),
                        description: "SEED comment".to_string(),
                        bit_offset: Some(10),
                        bit_width: Some(3),
                        register_reset_value: 0b101,
                        ..Field::default()
                    },
                ],
                ..Register::default()
            }],
            ..Peripheral::default()
        }
    }

    const PERIPH_OUTPUT: &str = "\
/// No description
pub const PERIPH = struct {
const base_address = 0x24000;
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
};
";

    #[test]
    fn wraps_registers_in_a_namespace() {
        assert_eq!(render_to_string(&mut rng_peripheral()), PERIPH_OUTPUT);
    }

    #[test]
    fn deep_copy_renders_identically() {
        let mut original = rng_peripheral();
        let mut copy = original.clone();
        assert_eq!(render_to_string(&mut original), render_to_string(&mut copy));
    }

    #[test]
    fn peripheral_without_base_degrades_to_comment() {
        let mut p = Peripheral {
            name: "PERIPH".to_string(),
            ..Peripheral::default()
        };
        assert_eq!(render_to_string(&mut p), "// Not enough info to print peripheral value\n");
    }
}
