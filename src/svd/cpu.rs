/// CPU metadata from the SVD `<cpu>` section. At most one per device.
#[derive(Clone, Debug, Default)]
pub struct Cpu {
    pub name: String,
    pub revision: String,
    pub endian: String,
    pub mpu_present: Option<bool>,
    pub fpu_present: Option<bool>,
    pub nvic_prio_bits: Option<u32>,
    pub vendor_systick_config: Option<bool>,
}
