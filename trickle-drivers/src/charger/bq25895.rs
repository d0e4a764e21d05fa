//! BQ25895 device session
//!
//! A session owns the bus handle and the device's 7-bit address. All access
//! is synchronous and takes `&mut self`, so two field writes on one session
//! can never interleave.
//!
//! # Example
//!
//! ```ignore
//! let mut charger = Bq25895::new(HalBus::new(i2c));
//! charger.probe()?;
//! charger.set_watchdog_timer(WatchdogTimer::Disabled)?;
//! charger.set_charge_voltage_mv(4208)?;
//! charger.set_charge_current_ma(2048)?;
//! ```

use trickle_core::codec::FieldValue;
use trickle_core::config::ChargerConfig;
use trickle_core::status::{AdcReadings, ChargerStatus, DeviceInfo, DpmStatus, FaultStatus};
use trickle_core::types::{FieldEnum, PartNumber};
use trickle_core::{reg, Access, Field};
use trickle_hal::I2cBus;

use super::{transaction, Error};

/// Default 7-bit I2C address
pub const DEFAULT_ADDRESS: u8 = 0x6A;

/// BQ25895 charger session
pub struct Bq25895<B> {
    bus: B,
    address: u8,
}

impl<B> Bq25895<B> {
    /// Create a session at the default address
    pub fn new(bus: B) -> Self {
        Self::with_address(bus, DEFAULT_ADDRESS)
    }

    /// Create a session at an explicit address
    pub fn with_address(bus: B, address: u8) -> Self {
        Self { bus, address }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Consume the session and return the bus
    pub fn release(self) -> B {
        self.bus
    }
}

impl<B: I2cBus> Bq25895<B> {
    // ------------------ Raw access ------------------

    pub fn read_register(&mut self, register: u8) -> Result<u8, Error<B::Error>> {
        transaction::read_register(&mut self.bus, self.address, register)
    }

    pub fn write_register(&mut self, register: u8, value: u8) -> Result<(), Error<B::Error>> {
        transaction::write_register(&mut self.bus, self.address, register, value)
    }

    /// Read-modify-write of the bits under `mask`; returns the byte written
    pub fn update_bits(&mut self, register: u8, mask: u8, bits: u8) -> Result<u8, Error<B::Error>> {
        transaction::update_bits(&mut self.bus, self.address, register, mask, bits)
    }

    // ------------------ Fields ------------------

    pub fn read_field(&mut self, field: Field) -> Result<FieldValue, Error<B::Error>> {
        transaction::read_field(&mut self.bus, self.address, field)
    }

    pub fn write_field(&mut self, field: Field, value: FieldValue) -> Result<(), Error<B::Error>> {
        transaction::write_field(&mut self.bus, self.address, field, value)
    }

    pub fn read_flag(&mut self, field: Field) -> Result<bool, Error<B::Error>> {
        self.read_field(field)?
            .as_flag()
            .ok_or(Error::InvalidValue(field))
    }

    pub fn read_scaled(&mut self, field: Field) -> Result<u16, Error<B::Error>> {
        self.read_field(field)?
            .as_scaled()
            .ok_or(Error::InvalidValue(field))
    }

    /// Read an enumerated field as its symbolic type
    pub fn read_enum<T: FieldEnum>(&mut self, field: Field) -> Result<T, Error<B::Error>> {
        let raw = self
            .read_field(field)?
            .as_code()
            .ok_or(Error::InvalidValue(field))?;
        T::from_code(raw).ok_or(Error::UnknownEncoding { field, raw })
    }

    pub fn write_flag(&mut self, field: Field, on: bool) -> Result<(), Error<B::Error>> {
        self.write_field(field, FieldValue::Flag(on))
    }

    /// Write a scaled field; the value is clamped and rounded to a step
    pub fn write_scaled(&mut self, field: Field, value: u16) -> Result<(), Error<B::Error>> {
        self.write_field(field, FieldValue::Scaled(value))
    }

    pub fn write_enum<T: FieldEnum>(&mut self, field: Field, value: T) -> Result<(), Error<B::Error>> {
        self.write_field(field, FieldValue::from_enum(value))
    }

    /// Start the action behind a strobe field
    ///
    /// The device clears the bit when the action completes; completion is
    /// not waited for.
    pub fn trigger(&mut self, field: Field) -> Result<(), Error<B::Error>> {
        if field.access() != Access::Strobe {
            return Err(Error::InvalidValue(field));
        }
        debug!("trigger {}", field.name());
        self.write_flag(field, true)
    }

    // ------------------ Identity ------------------

    /// Read the part number, failing on codes no BQ2589x uses
    pub fn probe(&mut self) -> Result<PartNumber, Error<B::Error>> {
        self.read_enum(Field::Pn)
    }

    pub fn device_info(&mut self) -> Result<DeviceInfo, Error<B::Error>> {
        let value = self.read_register(reg::DEVICE_INFO)?;
        Ok(DeviceInfo::from_register(value)?)
    }

    // ------------------ Strobes ------------------

    /// Reset all registers to their defaults
    pub fn reset(&mut self) -> Result<(), Error<B::Error>> {
        self.trigger(Field::RegRst)
    }

    /// Kick the I2C watchdog
    pub fn reset_watchdog(&mut self) -> Result<(), Error<B::Error>> {
        self.trigger(Field::WdRst)
    }

    /// Restart the input current optimizer
    pub fn force_ico(&mut self) -> Result<(), Error<B::Error>> {
        self.trigger(Field::ForceIco)
    }

    /// Re-run input source type detection
    pub fn force_dpdm(&mut self) -> Result<(), Error<B::Error>> {
        self.trigger(Field::ForceDpdm)
    }

    /// Start a one-shot ADC conversion
    pub fn start_adc_conversion(&mut self) -> Result<(), Error<B::Error>> {
        self.trigger(Field::ConvStart)
    }

    /// Request a higher adapter voltage (PUMPX must be enabled)
    pub fn pulse_up(&mut self) -> Result<(), Error<B::Error>> {
        self.trigger(Field::PumpxUp)
    }

    /// Request a lower adapter voltage (PUMPX must be enabled)
    pub fn pulse_down(&mut self) -> Result<(), Error<B::Error>> {
        self.trigger(Field::PumpxDn)
    }

    // ------------------ Snapshots ------------------

    pub fn status(&mut self) -> Result<ChargerStatus, Error<B::Error>> {
        let value = self.read_register(reg::STATUS)?;
        Ok(ChargerStatus::from_register(value)?)
    }

    /// Current fault state
    ///
    /// REG0C latches faults until read. The first read returns what happened
    /// since the last read, the second what is active now.
    pub fn faults(&mut self) -> Result<FaultStatus, Error<B::Error>> {
        self.read_register(reg::FAULT)?;
        let value = self.read_register(reg::FAULT)?;
        Ok(FaultStatus::from_register(value)?)
    }

    /// Faults latched since the previous fault read
    pub fn latched_faults(&mut self) -> Result<FaultStatus, Error<B::Error>> {
        let value = self.read_register(reg::FAULT)?;
        Ok(FaultStatus::from_register(value)?)
    }

    /// ADC results from one burst read of REG0E..=REG12
    pub fn adc_readings(&mut self) -> Result<AdcReadings, Error<B::Error>> {
        let mut regs = [0u8; AdcReadings::REGISTER_COUNT];
        transaction::read_registers(&mut self.bus, self.address, reg::BATTERY_VOLTAGE, &mut regs)?;
        Ok(AdcReadings::from_registers(&regs)?)
    }

    pub fn dpm_status(&mut self) -> Result<DpmStatus, Error<B::Error>> {
        let value = self.read_register(reg::DPM_STATUS)?;
        Ok(DpmStatus::from_register(value)?)
    }

    // ------------------ Configuration ------------------

    /// Write every set option, in register order
    ///
    /// Stops at the first failure; earlier writes stay applied.
    pub fn apply_config(&mut self, config: &ChargerConfig) -> Result<(), Error<B::Error>> {
        for (field, value) in config.writes() {
            self.write_field(field, value)?;
        }
        Ok(())
    }
}
