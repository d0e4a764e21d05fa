//! Register transactions
//!
//! Every register is one byte. Field writes are read-modify-write: read the
//! register, replace the field's bits, write the byte back. Sibling fields
//! keep whatever the device reported.
//!
//! The read and the write are separate bus transfers. Callers that share a
//! device between contexts must hold a lock across the whole sequence (see
//! [`SharedBq25895`](super::SharedBq25895)).

use trickle_core::codec::{self, FieldValue};
use trickle_core::{strobe_mask, Field};
use trickle_hal::I2cBus;

use super::Error;

/// Read one register
pub fn read_register<B: I2cBus>(bus: &mut B, address: u8, register: u8) -> Result<u8, Error<B::Error>> {
    bus.read_register(address, register).map_err(|e| {
        warn!("read of register {:#x} failed", register);
        Error::Bus(e)
    })
}

/// Read consecutive registers starting at `register`
pub fn read_registers<B: I2cBus>(
    bus: &mut B,
    address: u8,
    register: u8,
    buf: &mut [u8],
) -> Result<(), Error<B::Error>> {
    bus.write_read(address, &[register], buf).map_err(|e| {
        warn!("burst read from register {:#x} failed", register);
        Error::Bus(e)
    })
}

/// Write one register
pub fn write_register<B: I2cBus>(
    bus: &mut B,
    address: u8,
    register: u8,
    value: u8,
) -> Result<(), Error<B::Error>> {
    trace!("write register {:#x} = {:#x}", register, value);
    bus.write_register(address, register, value).map_err(|e| {
        warn!("write of register {:#x} failed", register);
        Error::Bus(e)
    })
}

/// Replace the bits under `mask` with `bits`, leaving the rest untouched
///
/// Returns the byte written. If the read fails nothing is written.
pub fn update_bits<B: I2cBus>(
    bus: &mut B,
    address: u8,
    register: u8,
    mask: u8,
    bits: u8,
) -> Result<u8, Error<B::Error>> {
    let current = read_register(bus, address, register)?;
    let value = (current & !mask) | (bits & mask);
    write_register(bus, address, register, value)?;
    Ok(value)
}

/// Read and decode one field
pub fn read_field<B: I2cBus>(bus: &mut B, address: u8, field: Field) -> Result<FieldValue, Error<B::Error>> {
    let value = read_register(bus, address, field.register())?;
    Ok(codec::decode(field, value)?)
}

/// Encode and write one field
///
/// Read-only fields and invalid values are rejected before the bus is
/// touched. Other strobe bits of the register are written as zero so an
/// action still running is not started again.
pub fn write_field<B: I2cBus>(
    bus: &mut B,
    address: u8,
    field: Field,
    value: FieldValue,
) -> Result<(), Error<B::Error>> {
    let desc = field.descriptor();
    if !desc.is_writable() {
        return Err(Error::InvalidValue(field));
    }

    let fragment = codec::encode(field, value)?;
    let mask = desc.mask | strobe_mask(desc.register);
    update_bits(bus, address, desc.register, mask, fragment)?;
    Ok(())
}
