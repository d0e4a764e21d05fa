//! Status snapshots
//!
//! Decoded views of the read-only registers. Each snapshot is built from the
//! raw bytes of one bus read so that all of its fields describe the same
//! instant.

use crate::codec::{decode_enum, decode_flag, decode_scaled, CodecError};
use crate::registers::Field;
use crate::types::{ChargeFault, ChargeStatus, NtcFault, PartNumber, VbusStatus};

/// System status (REG0B)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChargerStatus {
    /// Detected input source
    pub vbus: VbusStatus,
    /// Charge phase
    pub charge: ChargeStatus,
    /// Input is a good power source
    pub power_good: bool,
    /// USB input detected as 500 mA capable (SDP_STAT), 100 mA otherwise
    pub usb_500ma: bool,
    /// BAT < VSYSMIN, system in regulation
    pub vsys_regulation: bool,
}

impl ChargerStatus {
    /// Parse from raw REG0B value
    pub fn from_register(value: u8) -> Result<Self, CodecError> {
        Ok(Self {
            vbus: decode_enum(Field::VbusStat, value)?,
            charge: decode_enum(Field::ChrgStat, value)?,
            power_good: decode_flag(Field::PgStat, value)?,
            usb_500ma: decode_flag(Field::SdpStat, value)?,
            vsys_regulation: decode_flag(Field::VsysStat, value)?,
        })
    }
}

/// One active fault condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Fault {
    /// I2C watchdog timer expired
    Watchdog,
    /// VBUS overloaded in OTG, VBUS OVP or battery too low in boost mode
    Boost,
    /// Input, thermal or safety timer fault
    Charge(ChargeFault),
    /// Battery overvoltage
    BatteryOvervoltage,
    /// Thermistor out of range
    Ntc(NtcFault),
}

/// Fault status (REG0C)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FaultStatus {
    pub watchdog: bool,
    pub boost: bool,
    pub charge: ChargeFault,
    pub battery_ovp: bool,
    pub ntc: NtcFault,
}

impl FaultStatus {
    /// Parse from raw REG0C value
    pub fn from_register(value: u8) -> Result<Self, CodecError> {
        Ok(Self {
            watchdog: decode_flag(Field::WatchdogFault, value)?,
            boost: decode_flag(Field::BoostFault, value)?,
            charge: decode_enum(Field::ChrgFault, value)?,
            battery_ovp: decode_flag(Field::BatFault, value)?,
            ntc: decode_enum(Field::NtcFault, value)?,
        })
    }

    /// No fault is reported
    pub fn is_clear(&self) -> bool {
        self.active().is_empty()
    }

    /// Active faults, most severe first
    pub fn active(&self) -> heapless::Vec<Fault, 5> {
        let mut faults = heapless::Vec::new();
        // Capacity equals the number of fault sources
        if self.battery_ovp {
            let _ = faults.push(Fault::BatteryOvervoltage);
        }
        if self.charge != ChargeFault::Normal {
            let _ = faults.push(Fault::Charge(self.charge));
        }
        if self.ntc != NtcFault::Normal {
            let _ = faults.push(Fault::Ntc(self.ntc));
        }
        if self.boost {
            let _ = faults.push(Fault::Boost);
        }
        if self.watchdog {
            let _ = faults.push(Fault::Watchdog);
        }
        faults
    }
}

/// ADC results (REG0E to REG12)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AdcReadings {
    /// Battery voltage in mV
    pub battery_mv: u16,
    /// System voltage in mV
    pub system_mv: u16,
    /// TS voltage in 0.01 % of REGN
    pub ts_percent: u16,
    /// VBUS voltage in mV
    pub vbus_mv: u16,
    /// Charge current in mA
    pub charge_ma: u16,
    /// VBUS attached and above the good threshold
    pub vbus_good: bool,
    /// Device in thermal regulation
    pub thermal_regulation: bool,
}

impl AdcReadings {
    /// Number of consecutive registers the readings span
    pub const REGISTER_COUNT: usize = 5;

    /// Parse from raw REG0E..=REG12 values
    pub fn from_registers(regs: &[u8; Self::REGISTER_COUNT]) -> Result<Self, CodecError> {
        let [bat, sys, ts, vbus, ichg] = *regs;
        Ok(Self {
            battery_mv: decode_scaled(Field::Batv, bat)?,
            system_mv: decode_scaled(Field::Sysv, sys)?,
            ts_percent: decode_scaled(Field::Tspct, ts)?,
            vbus_mv: decode_scaled(Field::Vbusv, vbus)?,
            charge_ma: decode_scaled(Field::Ichgr, ichg)?,
            vbus_good: decode_flag(Field::VbusGd, vbus)?,
            thermal_regulation: decode_flag(Field::ThermStat, bat)?,
        })
    }
}

/// Dynamic power management status (REG13)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DpmStatus {
    /// Input voltage regulation active
    pub vindpm_active: bool,
    /// Input current regulation active
    pub iindpm_active: bool,
    /// Input current limit in effect (ICO result), mA
    pub input_limit_ma: u16,
}

impl DpmStatus {
    /// Parse from raw REG13 value
    pub fn from_register(value: u8) -> Result<Self, CodecError> {
        Ok(Self {
            vindpm_active: decode_flag(Field::VdpmStat, value)?,
            iindpm_active: decode_flag(Field::IdpmStat, value)?,
            input_limit_ma: decode_scaled(Field::IdpmLim, value)?,
        })
    }
}

/// Device identification (REG14)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceInfo {
    pub part: PartNumber,
    pub revision: u8,
    /// Temperature profile (JEITA when set)
    pub ts_profile: bool,
    /// ICO has converged
    pub ico_optimized: bool,
}

impl DeviceInfo {
    /// Parse from raw REG14 value
    pub fn from_register(value: u8) -> Result<Self, CodecError> {
        Ok(Self {
            part: decode_enum(Field::Pn, value)?,
            revision: decode_scaled(Field::DevRev, value)? as u8,
            ts_profile: decode_flag(Field::TsProfile, value)?,
            ico_optimized: decode_flag(Field::IcoOptimized, value)?,
        })
    }
}
