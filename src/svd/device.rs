use std::collections::BTreeMap;

use super::{Cpu, Interrupt, Peripheral};

/// Top of the model. Owns every peripheral and the device-wide interrupt
/// table.
///
/// The interrupt table is keyed by interrupt number, which keeps the
/// numbers unique and makes the emitted table come out in ascending order.
/// The `reg_default_*` attributes are the device-level register property
/// defaults that registers inherit when they do not specify their own.
#[derive(Clone, Debug, Default)]
pub struct Device {
    pub name: String,
    pub version: String,
    pub description: String,
    pub cpu: Option<Cpu>,
    pub address_unit_bits: Option<u32>,
    pub max_bit_width: Option<u32>,
    pub reg_default_size: Option<u32>,
    pub reg_default_reset_value: Option<u32>,
    pub reg_default_reset_mask: Option<u32>,
    pub peripherals: Vec<Peripheral>,
    pub interrupts: BTreeMap<u32, Interrupt>,
}
