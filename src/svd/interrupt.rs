/// An entry in the device interrupt table.
#[derive(Clone, Debug, Default)]
pub struct Interrupt {
    pub name: String,
    pub description: String,
    pub value: Option<u32>,
}
