//! Textual emitters, one module per model entity.
//!
//! Each module exposes a `render` function writing raw `\n`-separated lines
//! to a caller-supplied sink; downstream formatters are expected to tidy the
//! result. Emission is strictly top-down (device, cpu, peripherals,
//! registers, fields, interrupt table) and mutates nothing in the model
//! except each register's field sort immediately before rendering.
//!
//! Incomplete entities never abort a run: they degrade to a diagnostic
//! comment in the output, and only sink I/O errors propagate to the caller.

pub mod cpu;
pub mod device;
pub mod field;
pub mod interrupt;
pub mod peripheral;
pub mod register;
