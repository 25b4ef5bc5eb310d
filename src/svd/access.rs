/// Hardware access permission of a register or field.
///
/// Carried as metadata; emission is not gated on it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Access {
    ReadOnly,
    WriteOnly,
    #[default]
    ReadWrite,
}

impl Access {
    /// Maps the SVD `access` element values onto the enumeration.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "read-only" => Some(Access::ReadOnly),
            "write-only" => Some(Access::WriteOnly),
            "read-write" => Some(Access::ReadWrite),
            _ => None,
        }
    }
}
