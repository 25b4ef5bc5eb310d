//! Streaming SVD loader.
//!
//! Populates the [`crate::svd`] model from an SVD XML document, one element
//! handler per entity kind. Unknown elements are skipped whole, so vendor
//! extensions and the SVD attributes outside the supported subset do not
//! disturb the handlers around them.
//!
//! The loader is also where the model invariants the emitters rely on are
//! enforced: registers must be 32 bits wide, and field bit ranges must be
//! pairwise disjoint inside `[0, 32)`.

use std::io::{BufRead, BufReader, Read};

use log::warn;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

use crate::svd::{Access, AddressBlock, Cpu, Device, Field, Interrupt, Peripheral, Register};

/// Errors raised while loading an SVD document.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("document ended inside `<{0}>`")]
    UnexpectedEof(&'static str),
    #[error("unexpected XML tag encountered")]
    UnexpectedTag,
    #[error("text is not valid UTF-8")]
    NonUtf8,
    #[error("unable to parse `{0}` as a number")]
    Number(String),
    #[error("unable to parse `{0}` as a boolean")]
    Bool(String),
    #[error("no `<device>` element in document")]
    NoDevice,
    #[error("peripheral `{child}` is derived from undeclared peripheral `{base}`")]
    MissingBasePeripheral { child: String, base: String },
    #[error("register `{register}` has size {size}; only 32-bit registers are supported")]
    UnsupportedRegisterSize { register: String, size: u32 },
    #[error("field `{field}` of register `{register}` does not fit in bits [0, 32)")]
    FieldOutOfRange { register: String, field: String },
    #[error("field `{field}` of register `{register}` overlaps another field")]
    OverlappingField { register: String, field: String },
}

/// Register property defaults inherited from the device level.
#[derive(Clone, Copy)]
struct RegisterDefaults {
    size: Option<u32>,
    reset_value: Option<u32>,
}

/// Parses a complete SVD document into a [`Device`].
pub fn parse_svd<R: Read>(src: R) -> Result<Device, ParseError> {
    let mut reader = Reader::from_reader(BufReader::new(src));
    reader.trim_text(true);
    let mut buf = Vec::new();
    loop {
        match reader.read_event(&mut buf)? {
            Event::Start(ref e) if e.name() == b"device" => {
                return parse_device(&mut reader);
            }
            Event::Eof => return Err(ParseError::NoDevice),
            _ => (),
        }
        buf.clear();
    }
}

fn parse_device<T: BufRead>(reader: &mut Reader<T>) -> Result<Device, ParseError> {
    let mut device = Device::default();
    let mut buf = Vec::new();
    loop {
        match reader.read_event(&mut buf)? {
            Event::Start(ref e) => match e.name() {
                b"name" => device.name = text_content(reader)?,
                b"version" => device.version = text_content(reader)?,
                b"description" => device.description = text_content(reader)?,
                b"addressUnitBits" => device.address_unit_bits = Some(number(reader)?),
                b"width" => device.max_bit_width = Some(number(reader)?),
                b"size" => device.reg_default_size = Some(number(reader)?),
                b"resetValue" => device.reg_default_reset_value = Some(number(reader)?),
                b"resetMask" => device.reg_default_reset_mask = Some(number(reader)?),
                b"cpu" => device.cpu = Some(parse_cpu(reader)?),
                b"peripherals" => parse_peripherals(reader, &mut device)?,
                _ => skip_element(reader)?,
            },
            Event::End(ref e) if e.name() == b"device" => break,
            Event::Eof => return Err(ParseError::UnexpectedEof("device")),
            _ => (),
        }
        buf.clear();
    }
    Ok(device)
}

fn parse_cpu<T: BufRead>(reader: &mut Reader<T>) -> Result<Cpu, ParseError> {
    let mut cpu = Cpu::default();
    let mut buf = Vec::new();
    loop {
        match reader.read_event(&mut buf)? {
            Event::Start(ref e) => match e.name() {
                b"name" => cpu.name = text_content(reader)?,
                b"revision" => cpu.revision = text_content(reader)?,
                b"endian" => cpu.endian = text_content(reader)?,
                b"mpuPresent" => cpu.mpu_present = Some(boolean(reader)?),
                b"fpuPresent" => cpu.fpu_present = Some(boolean(reader)?),
                b"nvicPrioBits" => cpu.nvic_prio_bits = Some(number(reader)?),
                b"vendorSystickConfig" => cpu.vendor_systick_config = Some(boolean(reader)?),
                _ => skip_element(reader)?,
            },
            Event::End(ref e) if e.name() == b"cpu" => break,
            Event::Eof => return Err(ParseError::UnexpectedEof("cpu")),
            _ => (),
        }
        buf.clear();
    }
    Ok(cpu)
}

fn parse_peripherals<T: BufRead>(
    reader: &mut Reader<T>,
    device: &mut Device,
) -> Result<(), ParseError> {
    // The register property defaults precede <peripherals> in the schema.
    let defaults = RegisterDefaults {
        size: device.reg_default_size,
        reset_value: device.reg_default_reset_value,
    };
    let mut buf = Vec::new();
    loop {
        match reader.read_event(&mut buf)? {
            Event::Start(ref e) => match e.name() {
                b"peripheral" => {
                    let derived_from = derived_from_attribute(e)?;
                    let (parsed, interrupts) = parse_peripheral(reader, defaults)?;
                    let peripheral = match derived_from {
                        Some(base_name) => {
                            let base = device
                                .peripherals
                                .iter()
                                .find(|p| p.name == base_name)
                                .ok_or_else(|| ParseError::MissingBasePeripheral {
                                    child: parsed.name.clone(),
                                    base: base_name.clone(),
                                })?;
                            derive_peripheral(base, parsed)
                        }
                        None => parsed,
                    };
                    device.peripherals.push(peripheral);
                    record_interrupts(device, interrupts);
                }
                _ => skip_element(reader)?,
            },
            Event::End(ref e) if e.name() == b"peripherals" => break,
            Event::Eof => return Err(ParseError::UnexpectedEof("peripherals")),
            _ => (),
        }
        buf.clear();
    }
    Ok(())
}

fn parse_peripheral<T: BufRead>(
    reader: &mut Reader<T>,
    defaults: RegisterDefaults,
) -> Result<(Peripheral, Vec<Interrupt>), ParseError> {
    let mut peripheral = Peripheral::default();
    let mut interrupts = Vec::new();
    let mut buf = Vec::new();
    loop {
        match reader.read_event(&mut buf)? {
            Event::Start(ref e) => match e.name() {
                b"name" => peripheral.name = text_content(reader)?,
                b"groupName" => peripheral.group_name = text_content(reader)?,
                b"description" => peripheral.description = text_content(reader)?,
                b"baseAddress" => peripheral.base_address = Some(number(reader)?),
                b"addressBlock" => peripheral.address_block = Some(parse_address_block(reader)?),
                b"registers" => parse_registers(reader, &mut peripheral.registers, defaults)?,
                b"interrupt" => interrupts.push(parse_interrupt(reader)?),
                _ => skip_element(reader)?,
            },
            Event::End(ref e) if e.name() == b"peripheral" => break,
            Event::Eof => return Err(ParseError::UnexpectedEof("peripheral")),
            _ => (),
        }
        buf.clear();
    }
    stamp_ownership(&mut peripheral);
    Ok((peripheral, interrupts))
}

fn parse_address_block<T: BufRead>(reader: &mut Reader<T>) -> Result<AddressBlock, ParseError> {
    let mut block = AddressBlock::default();
    let mut buf = Vec::new();
    loop {
        match reader.read_event(&mut buf)? {
            Event::Start(ref e) => match e.name() {
                b"offset" => block.offset = Some(number(reader)?),
                b"size" => block.size = Some(number(reader)?),
                b"usage" => block.usage = text_content(reader)?,
                _ => skip_element(reader)?,
            },
            Event::End(ref e) if e.name() == b"addressBlock" => break,
            Event::Eof => return Err(ParseError::UnexpectedEof("addressBlock")),
            _ => (),
        }
        buf.clear();
    }
    Ok(block)
}

fn parse_registers<T: BufRead>(
    reader: &mut Reader<T>,
    registers: &mut Vec<Register>,
    defaults: RegisterDefaults,
) -> Result<(), ParseError> {
    let mut buf = Vec::new();
    loop {
        match reader.read_event(&mut buf)? {
            Event::Start(ref e) => match e.name() {
                b"register" => registers.push(parse_register(reader, defaults)?),
                name => {
                    warn!(
                        "skipping unsupported element `{}` in <registers>",
                        String::from_utf8_lossy(name)
                    );
                    skip_element(reader)?;
                }
            },
            Event::End(ref e) if e.name() == b"registers" => break,
            Event::Eof => return Err(ParseError::UnexpectedEof("registers")),
            _ => (),
        }
        buf.clear();
    }
    Ok(())
}

fn parse_register<T: BufRead>(
    reader: &mut Reader<T>,
    defaults: RegisterDefaults,
) -> Result<Register, ParseError> {
    let mut register = Register::default();
    let mut size = None;
    let mut reset_value = None;
    let mut buf = Vec::new();
    loop {
        match reader.read_event(&mut buf)? {
            Event::Start(ref e) => match e.name() {
                b"name" => register.name = text_content(reader)?,
                b"displayName" => register.display_name = text_content(reader)?,
                b"description" => register.description = text_content(reader)?,
                b"addressOffset" => register.address_offset = Some(number(reader)?),
                b"size" => size = Some(number(reader)?),
                b"resetValue" => reset_value = Some(number(reader)?),
                b"access" => register.access = access(reader)?,
                b"fields" => parse_fields(reader, &mut register.fields)?,
                _ => skip_element(reader)?,
            },
            Event::End(ref e) if e.name() == b"register" => break,
            Event::Eof => return Err(ParseError::UnexpectedEof("register")),
            _ => (),
        }
        buf.clear();
    }
    register.size = size.or(defaults.size).unwrap_or(32);
    register.reset_value = reset_value.or(defaults.reset_value).unwrap_or(0);
    validate_register(&register)?;
    Ok(register)
}

fn parse_fields<T: BufRead>(
    reader: &mut Reader<T>,
    fields: &mut Vec<Field>,
) -> Result<(), ParseError> {
    let mut buf = Vec::new();
    loop {
        match reader.read_event(&mut buf)? {
            Event::Start(ref e) => match e.name() {
                b"field" => fields.push(parse_field(reader)?),
                _ => skip_element(reader)?,
            },
            Event::End(ref e) if e.name() == b"fields" => break,
            Event::Eof => return Err(ParseError::UnexpectedEof("fields")),
            _ => (),
        }
        buf.clear();
    }
    Ok(())
}

fn parse_field<T: BufRead>(reader: &mut Reader<T>) -> Result<Field, ParseError> {
    let mut field = Field::default();
    let mut lsb = None;
    let mut msb = None;
    let mut buf = Vec::new();
    loop {
        match reader.read_event(&mut buf)? {
            Event::Start(ref e) => match e.name() {
                b"name" => field.name = text_content(reader)?,
                b"description" => field.description = text_content(reader)?,
                b"bitOffset" => field.bit_offset = Some(number(reader)?),
                b"bitWidth" => field.bit_width = Some(number(reader)?),
                b"lsb" => lsb = Some(number(reader)?),
                b"msb" => msb = Some(number(reader)?),
                b"bitRange" => {
                    let (range_msb, range_lsb) = parse_bit_range(&text_content(reader)?)?;
                    msb = Some(range_msb);
                    lsb = Some(range_lsb);
                }
                b"access" => field.access = access(reader)?,
                _ => skip_element(reader)?,
            },
            Event::End(ref e) if e.name() == b"field" => break,
            Event::Eof => return Err(ParseError::UnexpectedEof("field")),
            _ => (),
        }
        buf.clear();
    }

    // The lsb/msb and bitRange spellings fold into bitOffset + bitWidth.
    if field.bit_offset.is_none() && field.bit_width.is_none() {
        if let (Some(lsb), Some(msb)) = (lsb, msb) {
            if msb >= lsb {
                field.bit_offset = Some(lsb);
                field.bit_width = Some(msb - lsb + 1);
            } else {
                warn!("field `{}` has an inverted bit range; leaving it unplaced", field.name);
            }
        }
    }
    Ok(field)
}

fn parse_interrupt<T: BufRead>(reader: &mut Reader<T>) -> Result<Interrupt, ParseError> {
    let mut interrupt = Interrupt::default();
    let mut buf = Vec::new();
    loop {
        match reader.read_event(&mut buf)? {
            Event::Start(ref e) => match e.name() {
                b"name" => interrupt.name = text_content(reader)?,
                b"description" => interrupt.description = text_content(reader)?,
                b"value" => interrupt.value = Some(number(reader)?),
                _ => skip_element(reader)?,
            },
            Event::End(ref e) if e.name() == b"interrupt" => break,
            Event::Eof => return Err(ParseError::UnexpectedEof("interrupt")),
            _ => (),
        }
        buf.clear();
    }
    Ok(interrupt)
}

/// Inserts a peripheral's interrupts into the device table, keyed by
/// number. An interrupt without a number cannot be keyed (and would never
/// be emitted), so it is dropped here with a warning.
fn record_interrupts(device: &mut Device, interrupts: Vec<Interrupt>) {
    for interrupt in interrupts {
        match interrupt.value {
            Some(value) => {
                if let Some(previous) = device.interrupts.insert(value, interrupt) {
                    warn!("interrupt number {} redefined; dropping `{}`", value, previous.name);
                }
            }
            None => warn!("interrupt `{}` has no value; skipping", interrupt.name),
        }
    }
}

/// Resolves `derivedFrom` by deep-copying the prototype and applying the
/// derived element's own overrides. The prototype's interrupts are device
/// global and are not copied.
fn derive_peripheral(base: &Peripheral, child: Peripheral) -> Peripheral {
    let mut peripheral = base.clone();
    peripheral.name = child.name;
    if child.base_address.is_some() {
        peripheral.base_address = child.base_address;
    }
    if !child.description.is_empty() {
        peripheral.description = child.description;
    }
    if !child.group_name.is_empty() {
        peripheral.group_name = child.group_name;
    }
    if child.address_block.is_some() {
        peripheral.address_block = child.address_block;
    }
    if !child.registers.is_empty() {
        peripheral.registers = child.registers;
    }
    stamp_ownership(&mut peripheral);
    peripheral
}

/// Rewrites the back-pointer copies once a peripheral's contents settle,
/// both after a first parse and after `derivedFrom` cloning.
fn stamp_ownership(peripheral: &mut Peripheral) {
    for register in &mut peripheral.registers {
        register.periph_containing = peripheral.name.clone();
        for field in &mut register.fields {
            field.periph = peripheral.name.clone();
            field.register = register.name.clone();
            field.register_reset_value = register.reset_value;
        }
    }
}

/// The emitters assume 32-bit registers whose fields are pairwise disjoint
/// inside `[0, 32)`; anything else is rejected before it reaches them.
fn validate_register(register: &Register) -> Result<(), ParseError> {
    if register.size != 32 {
        return Err(ParseError::UnsupportedRegisterSize {
            register: register.name.clone(),
            size: register.size,
        });
    }
    let mut occupied = 0u32;
    for field in &register.fields {
        let (bit_offset, bit_width) = match (field.bit_offset, field.bit_width) {
            (Some(offset), Some(width)) => (offset, width),
            _ => continue,
        };
        if bit_width == 0 || u64::from(bit_offset) + u64::from(bit_width) > 32 {
            return Err(ParseError::FieldOutOfRange {
                register: register.name.clone(),
                field: field.name.clone(),
            });
        }
        let mask = (((1u64 << bit_width) - 1) << bit_offset) as u32;
        if occupied & mask != 0 {
            return Err(ParseError::OverlappingField {
                register: register.name.clone(),
                field: field.name.clone(),
            });
        }
        occupied |= mask;
    }
    Ok(())
}

fn derived_from_attribute(e: &BytesStart) -> Result<Option<String>, ParseError> {
    for attribute in e.attributes() {
        let attribute = attribute?;
        if attribute.key == b"derivedFrom" {
            let value =
                String::from_utf8(attribute.value.to_vec()).map_err(|_| ParseError::NonUtf8)?;
            return Ok(Some(value));
        }
    }
    Ok(None)
}

/// Reads the text content of the leaf element the reader is currently
/// inside of. An immediately closed element yields the empty string.
fn text_content<T: BufRead>(reader: &mut Reader<T>) -> Result<String, ParseError> {
    let mut buf = Vec::new();
    match reader.read_event(&mut buf)? {
        Event::Text(ref t) => Ok(t.unescape_and_decode(reader)?),
        Event::CData(ref t) => String::from_utf8(t.to_vec()).map_err(|_| ParseError::NonUtf8),
        Event::End(_) => Ok(String::new()),
        Event::Eof => Err(ParseError::UnexpectedEof("document")),
        _ => Err(ParseError::UnexpectedTag),
    }
}

fn number<T: BufRead>(reader: &mut Reader<T>) -> Result<u32, ParseError> {
    parse_u32(&text_content(reader)?)
}

fn boolean<T: BufRead>(reader: &mut Reader<T>) -> Result<bool, ParseError> {
    parse_bool(&text_content(reader)?)
}

fn access<T: BufRead>(reader: &mut Reader<T>) -> Result<Access, ParseError> {
    let text = text_content(reader)?;
    Ok(Access::parse(&text).unwrap_or_else(|| {
        warn!("unknown access mode `{}`; assuming read-write", text);
        Access::default()
    }))
}

/// Consumes events until the element whose `Start` was just read is closed.
fn skip_element<T: BufRead>(reader: &mut Reader<T>) -> Result<(), ParseError> {
    let mut depth = 1u32;
    let mut buf = Vec::new();
    loop {
        match reader.read_event(&mut buf)? {
            Event::Start(_) => depth += 1,
            Event::End(_) => {
                depth -= 1;
                if depth == 0 {
                    return Ok(());
                }
            }
            Event::Eof => return Err(ParseError::UnexpectedEof("document")),
            _ => (),
        }
        buf.clear();
    }
}

/// SVD numeric literals: `0x`/`0X` hex, `0b`/`0B` binary, a leading zero
/// for octal, decimal otherwise.
fn split_radix(value: &str) -> (&str, u32) {
    if let Some(hex) = value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        (hex, 16)
    } else if let Some(bin) = value.strip_prefix("0b").or_else(|| value.strip_prefix("0B")) {
        (bin, 2)
    } else if value.starts_with('0') && value != "0" {
        (value.trim_start_matches('0'), 8)
    } else {
        (value, 10)
    }
}

fn parse_u32(text: &str) -> Result<u32, ParseError> {
    let (digits, radix) = split_radix(text);
    u32::from_str_radix(digits, radix).map_err(|_| ParseError::Number(text.to_string()))
}

fn parse_bool(text: &str) -> Result<bool, ParseError> {
    match text {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(ParseError::Bool(text.to_string())),
    }
}

/// `[msb:lsb]`, both bounds inclusive.
fn parse_bit_range(text: &str) -> Result<(u32, u32), ParseError> {
    let inner = text
        .strip_prefix('[')
        .and_then(|t| t.strip_suffix(']'))
        .ok_or_else(|| ParseError::Number(text.to_string()))?;
    let (msb, lsb) = inner
        .split_once(':')
        .ok_or_else(|| ParseError::Number(text.to_string()))?;
    Ok((parse_u32(msb)?, parse_u32(lsb)?))
}
