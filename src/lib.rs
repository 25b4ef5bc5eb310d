//! Generate Zig register definitions (`packed struct`s) from SVD files
//!
//! # Usage
//!
//! ```text
//! $ svd2zig STM32F30x.svd -o registers.zig
//! ```
//!
//! Every 32-bit register in the SVD description becomes a packed layout type
//! whose members mirror the hardware bitfields, followed by a binding of the
//! register name to the runtime `Register` helper at the register's absolute
//! address:
//!
//! ```text
//! /// RND
//! pub const RND_val = packed struct {
//! /// unused [0:1]
//! _unused0: u2 = 1,
//! /// RNGEN [2:2]
//! /// RNGEN comment
//! RNGEN: u1 = 1,
//! /// unused [3:9]
//! _unused3: u5 = 0,
//! _unused8: u2 = 0,
//! /// SEED [10:12]
//! /// SEED comment
//! SEED: u3 = 0,
//! /// unused [13:31]
//! _unused13: u3 = 0,
//! _unused16: u8 = 0,
//! _unused24: u8 = 0,
//! };
//! /// RND comment
//! pub const RND = Register(RND_val).init(base_address + 0x100);
//! ```
//!
//! Bits not claimed by any SVD field are covered by `_unused*` fillers so
//! the layout always spans bits 0..31 exactly once, and every member's
//! default value is its slice of the register's reset value. The generated
//! file expects the embedded support library to provide the
//! `Register(T).init(address)` constructor; nothing else is assumed of the
//! runtime.
//!
//! Output is deterministic: the same SVD document always renders to the
//! same bytes.

pub mod generate;
pub mod parse;
pub mod svd;
pub mod util;

pub use crate::parse::{parse_svd, ParseError};

use std::io::{Read, Write};

use anyhow::Result;

/// Parses an SVD document from `src` and renders the Zig register
/// definitions to `out`.
pub fn generate<R: Read, W: Write>(src: R, out: &mut W) -> Result<()> {
    let mut device = parse::parse_svd(src)?;
    generate::device::render(&mut device, out)?;
    Ok(())
}
