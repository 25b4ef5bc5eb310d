use super::Register;

/// A named block of MMIO registers at a base address.
///
/// `derivedFrom` peripherals are resolved by the loader before they reach
/// the model, so there are no derivation links here.
#[derive(Clone, Debug, Default)]
pub struct Peripheral {
    pub name: String,
    pub group_name: String,
    pub description: String,
    pub base_address: Option<u32>,
    pub address_block: Option<AddressBlock>,
    pub registers: Vec<Register>,
}

/// Informational address range attached to a peripheral. Parsed but not
/// part of the output dialect.
#[derive(Clone, Debug, Default)]
pub struct AddressBlock {
    pub offset: Option<u32>,
    pub size: Option<u32>,
    pub usage: String,
}
