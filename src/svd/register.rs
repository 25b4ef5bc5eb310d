use super::{Access, Field};

/// A 32-bit memory-mapped word composed of contiguous named bitfields.
#[derive(Clone, Debug)]
pub struct Register {
    /// Name of the peripheral containing the register (a copy, not a link).
    pub periph_containing: String,
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub address_offset: Option<u32>,
    /// Bit width of the whole register. Only 32-bit layouts are renderable;
    /// the loader rejects anything else.
    pub size: u32,
    pub reset_value: u32,
    pub fields: Vec<Field>,
    pub access: Access,
}

impl Default for Register {
    fn default() -> Self {
        Register {
            periph_containing: String::new(),
            name: String::new(),
            display_name: String::new(),
            description: String::new(),
            address_offset: None,
            size: 32,
            reset_value: 0,
            fields: Vec::new(),
            access: Access::default(),
        }
    }
}