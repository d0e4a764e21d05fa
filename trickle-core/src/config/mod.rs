//! Charger configuration
//!
//! A [`ChargerConfig`] lists the host-writable settings an application wants
//! applied at start-up. Every option is independent; `None` leaves the
//! device's power-on value in place. With the `serde` feature the type can
//! be loaded from TOML or stored as postcard binary data (see [`storage`]).

#[cfg(feature = "serde")]
pub mod storage;

#[cfg(feature = "serde")]
pub use storage::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::codec::FieldValue;
use crate::registers::Field;
use crate::types::*;

/// Number of host-writable, non-strobe fields
pub const MAX_WRITES: usize = 38;

/// Optional settings for every writable field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ChargerConfig {
    // REG00
    /// High impedance mode (input disconnected)
    pub hiz: Option<bool>,
    /// ILIM pin current limit enable
    pub ilim_pin: Option<bool>,
    /// Input current limit, mA (100-3250)
    pub input_current_limit_ma: Option<u16>,

    // REG01
    pub boost_hot: Option<BoostHotThreshold>,
    pub boost_cold: Option<BoostColdThreshold>,
    /// Relative VINDPM offset, mV (0-3100)
    pub vindpm_offset_mv: Option<u16>,

    // REG02
    pub adc_rate: Option<AdcConversionRate>,
    pub boost_frequency: Option<BoostFrequency>,
    /// Input current optimizer
    pub ico: Option<bool>,
    /// High voltage DCP handshake
    pub hvdcp: Option<bool>,
    /// MaxCharge adapter handshake
    pub maxcharge: Option<bool>,
    /// D+/D- detection on VBUS plug-in
    pub auto_dpdm: Option<bool>,

    // REG03
    /// Battery load (IBATLOAD)
    pub battery_load: Option<bool>,
    /// Boost (OTG) mode
    pub otg: Option<bool>,
    /// Charging enabled
    pub charge_enable: Option<bool>,
    /// Minimum system voltage, mV (3000-3700)
    pub min_system_mv: Option<u16>,

    // REG04
    /// Current pulse control
    pub pumpx: Option<bool>,
    /// Fast charge current, mA (0-5056)
    pub charge_current_ma: Option<u16>,

    // REG05
    /// Precharge current, mA (64-1024)
    pub precharge_current_ma: Option<u16>,
    /// Termination current, mA (64-1024)
    pub termination_current_ma: Option<u16>,

    // REG06
    /// Charge voltage limit, mV (3840-4608)
    pub charge_voltage_mv: Option<u16>,
    pub precharge_threshold: Option<PrechargeThreshold>,
    pub recharge_offset: Option<RechargeOffset>,

    // REG07
    /// Charge termination
    pub termination: Option<bool>,
    /// STAT pin disabled
    pub stat_pin_disable: Option<bool>,
    pub watchdog: Option<WatchdogTimer>,
    /// Charge safety timer
    pub safety_timer: Option<bool>,
    pub charge_timer: Option<ChargeTimer>,

    // REG08
    /// IR compensation resistance, mΩ (0-140)
    pub ir_comp_mohm: Option<u16>,
    /// IR compensation voltage clamp, mV (0-224)
    pub ir_clamp_mv: Option<u16>,
    pub thermal_regulation: Option<ThermalRegulation>,

    // REG09
    /// Safety timer slowed 2x during DPM or thermal regulation
    pub timer_slowdown: Option<bool>,
    /// Force BATFET off
    pub batfet_disable: Option<bool>,
    /// Delay BATFET off by tSM_DLY
    pub batfet_delay: Option<bool>,
    /// BATFET full system reset
    pub batfet_reset: Option<bool>,

    // REG0A
    /// Boost mode voltage, mV (4550-5510)
    pub boost_voltage_mv: Option<u16>,

    // REG0D
    pub vindpm_mode: Option<VindpmMode>,
    /// Absolute VINDPM threshold, mV (3900-15300)
    pub vindpm_mv: Option<u16>,
}

fn push(
    writes: &mut heapless::Vec<(Field, FieldValue), MAX_WRITES>,
    field: Field,
    value: Option<FieldValue>,
) {
    if let Some(value) = value {
        // One slot per writable field
        let _ = writes.push((field, value));
    }
}

impl ChargerConfig {
    /// Field writes for every set option, in register order
    pub fn writes(&self) -> heapless::Vec<(Field, FieldValue), MAX_WRITES> {
        let flag = |v: Option<bool>| v.map(FieldValue::Flag);
        let scaled = |v: Option<u16>| v.map(FieldValue::Scaled);
        fn code<T: FieldEnum>(v: Option<T>) -> Option<FieldValue> {
            v.map(FieldValue::from_enum)
        }

        let mut w = heapless::Vec::new();

        push(&mut w, Field::EnHiz, flag(self.hiz));
        push(&mut w, Field::EnIlim, flag(self.ilim_pin));
        push(&mut w, Field::Iinlim, scaled(self.input_current_limit_ma));

        push(&mut w, Field::Bhot, code(self.boost_hot));
        push(&mut w, Field::Bcold, code(self.boost_cold));
        push(&mut w, Field::VindpmOs, scaled(self.vindpm_offset_mv));

        push(&mut w, Field::ConvRate, code(self.adc_rate));
        push(&mut w, Field::BoostFreq, code(self.boost_frequency));
        push(&mut w, Field::IcoEn, flag(self.ico));
        push(&mut w, Field::HvdcpEn, flag(self.hvdcp));
        push(&mut w, Field::MaxcEn, flag(self.maxcharge));
        push(&mut w, Field::AutoDpdmEn, flag(self.auto_dpdm));

        push(&mut w, Field::BatLoaden, flag(self.battery_load));
        push(&mut w, Field::OtgConfig, flag(self.otg));
        push(&mut w, Field::ChgConfig, flag(self.charge_enable));
        push(&mut w, Field::SysMin, scaled(self.min_system_mv));

        push(&mut w, Field::EnPumpx, flag(self.pumpx));
        push(&mut w, Field::Ichg, scaled(self.charge_current_ma));

        push(&mut w, Field::Iprechg, scaled(self.precharge_current_ma));
        push(&mut w, Field::Iterm, scaled(self.termination_current_ma));

        push(&mut w, Field::Vreg, scaled(self.charge_voltage_mv));
        push(&mut w, Field::Batlowv, code(self.precharge_threshold));
        push(&mut w, Field::Vrechg, code(self.recharge_offset));

        push(&mut w, Field::EnTerm, flag(self.termination));
        push(&mut w, Field::StatDis, flag(self.stat_pin_disable));
        push(&mut w, Field::Watchdog, code(self.watchdog));
        push(&mut w, Field::EnTimer, flag(self.safety_timer));
        push(&mut w, Field::ChgTimer, code(self.charge_timer));

        push(&mut w, Field::BatComp, scaled(self.ir_comp_mohm));
        push(&mut w, Field::Vclamp, scaled(self.ir_clamp_mv));
        push(&mut w, Field::Treg, code(self.thermal_regulation));

        push(&mut w, Field::Tmr2xEn, flag(self.timer_slowdown));
        push(&mut w, Field::BatfetDis, flag(self.batfet_disable));
        push(&mut w, Field::BatfetDly, flag(self.batfet_delay));
        push(&mut w, Field::BatfetRstEn, flag(self.batfet_reset));

        push(&mut w, Field::Boostv, scaled(self.boost_voltage_mv));

        push(&mut w, Field::ForceVindpm, code(self.vindpm_mode));
        push(&mut w, Field::Vindpm, scaled(self.vindpm_mv));

        w
    }

    /// No option is set
    pub fn is_empty(&self) -> bool {
        self.writes().is_empty()
    }
}
