//! In-memory representation of an SVD device.
//!
//! The loader in [`crate::parse`] populates this tree; the emitters in
//! [`crate::generate`] walk it top-down. The model is a strict tree: parents
//! own children, and the "back-pointer" attributes (`Field::periph`,
//! `Field::register`, `Register::periph_containing`) are plain string
//! copies, so `Clone` is the deep copy used to resolve `derivedFrom`
//! peripherals and nothing ever walks upward.
//!
//! Sparse SVD attributes stay sparse here: an absent value is `None`, never
//! a sentinel, and the emitters gate on explicit presence.

pub mod access;
pub mod cpu;
pub mod device;
pub mod field;
pub mod interrupt;
pub mod peripheral;
pub mod register;

pub use self::access::Access;
pub use self::cpu::Cpu;
pub use self::device::Device;
pub use self::field::Field;
pub use self::interrupt::Interrupt;
pub use self::peripheral::{AddressBlock, Peripheral};
pub use self::register::Register;
