use super::Access;

/// A named sub-range of bits within a register.
#[derive(Clone, Debug, Default)]
pub struct Field {
    /// Names of the owning peripheral and register (copies, not links).
    pub periph: String,
    pub register: String,
    /// Reset value of the containing register, duplicated for locality.
    pub register_reset_value: u32,
    pub name: String,
    pub description: String,
    pub bit_offset: Option<u32>,
    pub bit_width: Option<u32>,
    pub access: Access,
}