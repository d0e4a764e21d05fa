//! BQ25895 register map
//!
//! Every logical setting of the charger has a [`Field`] identity and one
//! entry in [`FIELDS`]. The table is checked at compile time: masks are
//! contiguous, fields of one register never overlap, enum codes fit their
//! bits and scaled ranges are reachable.
//!
//! Units: mV, mA, mΩ. TS is in 0.01 % of REGN.

use crate::field::{Access, FieldDescriptor, FieldKind};
use crate::types::*;

/// BQ25895 register addresses
pub mod reg {
    /// Input current limit, HIZ, ILIM pin enable
    pub const INPUT_CONTROL: u8 = 0x00;
    /// Boost temperature thresholds, VINDPM offset
    pub const BOOST_TEMP_VINDPM_OS: u8 = 0x01;
    /// ADC control, input detection
    pub const ADC_CONTROL: u8 = 0x02;
    /// Charge/OTG enable, watchdog reset, minimum system voltage
    pub const SYSTEM_CONTROL: u8 = 0x03;
    /// Fast charge current limit, PUMPX enable
    pub const CHARGE_CURRENT: u8 = 0x04;
    /// Precharge and termination current
    pub const PRECHARGE_TERMINATION: u8 = 0x05;
    /// Charge voltage limit
    pub const CHARGE_VOLTAGE: u8 = 0x06;
    /// Termination, watchdog and safety timers
    pub const TIMER_CONTROL: u8 = 0x07;
    /// IR compensation, thermal regulation
    pub const IR_COMP_THERMAL: u8 = 0x08;
    /// ICO, BATFET and PUMPX control
    pub const OPERATION_CONTROL: u8 = 0x09;
    /// Boost mode voltage
    pub const BOOST_VOLTAGE: u8 = 0x0A;
    /// System status
    pub const STATUS: u8 = 0x0B;
    /// Fault status, latched
    pub const FAULT: u8 = 0x0C;
    /// Absolute VINDPM threshold
    pub const VINDPM: u8 = 0x0D;
    /// ADC: battery voltage, thermal regulation status
    pub const BATTERY_VOLTAGE: u8 = 0x0E;
    /// ADC: system voltage
    pub const SYSTEM_VOLTAGE: u8 = 0x0F;
    /// ADC: TS voltage as % of REGN
    pub const TS_PERCENT: u8 = 0x10;
    /// ADC: VBUS voltage, VBUS good
    pub const VBUS_VOLTAGE: u8 = 0x11;
    /// ADC: charge current
    pub const CHARGE_CURRENT_ADC: u8 = 0x12;
    /// VINDPM/IINDPM status, ICO current limit
    pub const DPM_STATUS: u8 = 0x13;
    /// Register reset, part number, revision
    pub const DEVICE_INFO: u8 = 0x14;

    /// Number of registers in the map
    pub const COUNT: usize = 0x15;
}

/// Number of fields in the register map
pub const FIELD_COUNT: usize = 69;

/// Identity of one logical field
///
/// Variants are in register order; the discriminant is the index into
/// [`FIELDS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Field {
    // REG00
    EnHiz,
    EnIlim,
    Iinlim,
    // REG01
    Bhot,
    Bcold,
    VindpmOs,
    // REG02
    ConvStart,
    ConvRate,
    BoostFreq,
    IcoEn,
    HvdcpEn,
    MaxcEn,
    ForceDpdm,
    AutoDpdmEn,
    // REG03
    BatLoaden,
    WdRst,
    OtgConfig,
    ChgConfig,
    SysMin,
    // REG04
    EnPumpx,
    Ichg,
    // REG05
    Iprechg,
    Iterm,
    // REG06
    Vreg,
    Batlowv,
    Vrechg,
    // REG07
    EnTerm,
    StatDis,
    Watchdog,
    EnTimer,
    ChgTimer,
    // REG08
    BatComp,
    Vclamp,
    Treg,
    // REG09
    ForceIco,
    Tmr2xEn,
    BatfetDis,
    BatfetDly,
    BatfetRstEn,
    PumpxUp,
    PumpxDn,
    // REG0A
    Boostv,
    // REG0B
    VbusStat,
    ChrgStat,
    PgStat,
    SdpStat,
    VsysStat,
    // REG0C
    WatchdogFault,
    BoostFault,
    ChrgFault,
    BatFault,
    NtcFault,
    // REG0D
    ForceVindpm,
    Vindpm,
    // REG0E
    ThermStat,
    Batv,
    // REG0F
    Sysv,
    // REG10
    Tspct,
    // REG11
    VbusGd,
    Vbusv,
    // REG12
    Ichgr,
    // REG13
    VdpmStat,
    IdpmStat,
    IdpmLim,
    // REG14
    RegRst,
    IcoOptimized,
    Pn,
    TsProfile,
    DevRev,
}

use Access::{ReadOnly as RO, ReadWrite as RW, Strobe};
use Field as F;
use FieldDescriptor as D;

const TABLE: [FieldDescriptor; FIELD_COUNT] = [
    // REG00
    D::flag(F::EnHiz, "EN_HIZ", reg::INPUT_CONTROL, 0x80, RW),
    D::flag(F::EnIlim, "EN_ILIM", reg::INPUT_CONTROL, 0x40, RW),
    D::scaled(F::Iinlim, "IINLIM", reg::INPUT_CONTROL, 0x3F, 100, 50, 100, 3250),
    // REG01
    D::enumerated(F::Bhot, "BHOT", reg::BOOST_TEMP_VINDPM_OS, 0xC0, RW, BoostHotThreshold::CODES),
    D::enumerated(F::Bcold, "BCOLD", reg::BOOST_TEMP_VINDPM_OS, 0x20, RW, BoostColdThreshold::CODES),
    D::scaled(F::VindpmOs, "VINDPM_OS", reg::BOOST_TEMP_VINDPM_OS, 0x1F, 0, 100, 0, 3100),
    // REG02
    D::flag(F::ConvStart, "CONV_START", reg::ADC_CONTROL, 0x80, Strobe),
    D::enumerated(F::ConvRate, "CONV_RATE", reg::ADC_CONTROL, 0x40, RW, AdcConversionRate::CODES),
    D::enumerated(F::BoostFreq, "BOOST_FREQ", reg::ADC_CONTROL, 0x20, RW, BoostFrequency::CODES),
    D::flag(F::IcoEn, "ICO_EN", reg::ADC_CONTROL, 0x10, RW),
    D::flag(F::HvdcpEn, "HVDCP_EN", reg::ADC_CONTROL, 0x08, RW),
    D::flag(F::MaxcEn, "MAXC_EN", reg::ADC_CONTROL, 0x04, RW),
    D::flag(F::ForceDpdm, "FORCE_DPDM", reg::ADC_CONTROL, 0x02, Strobe),
    D::flag(F::AutoDpdmEn, "AUTO_DPDM_EN", reg::ADC_CONTROL, 0x01, RW),
    // REG03
    D::flag(F::BatLoaden, "BAT_LOADEN", reg::SYSTEM_CONTROL, 0x80, RW),
    D::flag(F::WdRst, "WD_RST", reg::SYSTEM_CONTROL, 0x40, Strobe),
    D::flag(F::OtgConfig, "OTG_CONFIG", reg::SYSTEM_CONTROL, 0x20, RW),
    D::flag(F::ChgConfig, "CHG_CONFIG", reg::SYSTEM_CONTROL, 0x10, RW),
    D::scaled(F::SysMin, "SYS_MIN", reg::SYSTEM_CONTROL, 0x0E, 3000, 100, 3000, 3700),
    // REG04
    D::flag(F::EnPumpx, "EN_PUMPX", reg::CHARGE_CURRENT, 0x80, RW),
    D::scaled(F::Ichg, "ICHG", reg::CHARGE_CURRENT, 0x7F, 0, 64, 0, 5056),
    // REG05
    D::scaled(F::Iprechg, "IPRECHG", reg::PRECHARGE_TERMINATION, 0xF0, 64, 64, 64, 1024),
    D::scaled(F::Iterm, "ITERM", reg::PRECHARGE_TERMINATION, 0x0F, 64, 64, 64, 1024),
    // REG06
    D::scaled(F::Vreg, "VREG", reg::CHARGE_VOLTAGE, 0xFC, 3840, 16, 3840, 4608),
    D::enumerated(F::Batlowv, "BATLOWV", reg::CHARGE_VOLTAGE, 0x02, RW, PrechargeThreshold::CODES),
    D::enumerated(F::Vrechg, "VRECHG", reg::CHARGE_VOLTAGE, 0x01, RW, RechargeOffset::CODES),
    // REG07
    D::flag(F::EnTerm, "EN_TERM", reg::TIMER_CONTROL, 0x80, RW),
    D::flag(F::StatDis, "STAT_DIS", reg::TIMER_CONTROL, 0x40, RW),
    D::enumerated(F::Watchdog, "WATCHDOG", reg::TIMER_CONTROL, 0x30, RW, WatchdogTimer::CODES),
    D::flag(F::EnTimer, "EN_TIMER", reg::TIMER_CONTROL, 0x08, RW),
    D::enumerated(F::ChgTimer, "CHG_TIMER", reg::TIMER_CONTROL, 0x06, RW, ChargeTimer::CODES),
    // REG08
    D::scaled(F::BatComp, "BAT_COMP", reg::IR_COMP_THERMAL, 0xE0, 0, 20, 0, 140),
    D::scaled(F::Vclamp, "VCLAMP", reg::IR_COMP_THERMAL, 0x1C, 0, 32, 0, 224),
    D::enumerated(F::Treg, "TREG", reg::IR_COMP_THERMAL, 0x03, RW, ThermalRegulation::CODES),
    // REG09
    D::flag(F::ForceIco, "FORCE_ICO", reg::OPERATION_CONTROL, 0x80, Strobe),
    D::flag(F::Tmr2xEn, "TMR2X_EN", reg::OPERATION_CONTROL, 0x40, RW),
    D::flag(F::BatfetDis, "BATFET_DIS", reg::OPERATION_CONTROL, 0x20, RW),
    D::flag(F::BatfetDly, "BATFET_DLY", reg::OPERATION_CONTROL, 0x08, RW),
    D::flag(F::BatfetRstEn, "BATFET_RST_EN", reg::OPERATION_CONTROL, 0x04, RW),
    D::flag(F::PumpxUp, "PUMPX_UP", reg::OPERATION_CONTROL, 0x02, Strobe),
    D::flag(F::PumpxDn, "PUMPX_DN", reg::OPERATION_CONTROL, 0x01, Strobe),
    // REG0A
    D::scaled(F::Boostv, "BOOSTV", reg::BOOST_VOLTAGE, 0xF0, 4550, 64, 4550, 5510),
    // REG0B
    D::enumerated(F::VbusStat, "VBUS_STAT", reg::STATUS, 0xE0, RO, VbusStatus::CODES),
    D::enumerated(F::ChrgStat, "CHRG_STAT", reg::STATUS, 0x18, RO, ChargeStatus::CODES),
    D::flag(F::PgStat, "PG_STAT", reg::STATUS, 0x04, RO),
    D::flag(F::SdpStat, "SDP_STAT", reg::STATUS, 0x02, RO),
    D::flag(F::VsysStat, "VSYS_STAT", reg::STATUS, 0x01, RO),
    // REG0C
    D::flag(F::WatchdogFault, "WATCHDOG_FAULT", reg::FAULT, 0x80, RO),
    D::flag(F::BoostFault, "BOOST_FAULT", reg::FAULT, 0x40, RO),
    D::enumerated(F::ChrgFault, "CHRG_FAULT", reg::FAULT, 0x30, RO, ChargeFault::CODES),
    D::flag(F::BatFault, "BAT_FAULT", reg::FAULT, 0x08, RO),
    D::enumerated(F::NtcFault, "NTC_FAULT", reg::FAULT, 0x07, RO, NtcFault::CODES),
    // REG0D
    D::enumerated(F::ForceVindpm, "FORCE_VINDPM", reg::VINDPM, 0x80, RW, VindpmMode::CODES),
    D::scaled(F::Vindpm, "VINDPM", reg::VINDPM, 0x7F, 2600, 100, 3900, 15300),
    // REG0E
    D::flag(F::ThermStat, "THERM_STAT", reg::BATTERY_VOLTAGE, 0x80, RO),
    D::measurement(F::Batv, "BATV", reg::BATTERY_VOLTAGE, 0x7F, 2304, 20),
    // REG0F
    D::measurement(F::Sysv, "SYSV", reg::SYSTEM_VOLTAGE, 0x7F, 2304, 20),
    // REG10
    D::measurement(F::Tspct, "TSPCT", reg::TS_PERCENT, 0x7F, 2100, 46),
    // REG11
    D::flag(F::VbusGd, "VBUS_GD", reg::VBUS_VOLTAGE, 0x80, RO),
    D::measurement(F::Vbusv, "VBUSV", reg::VBUS_VOLTAGE, 0x7F, 2600, 100),
    // REG12
    D::measurement(F::Ichgr, "ICHGR", reg::CHARGE_CURRENT_ADC, 0x7F, 0, 50),
    // REG13
    D::flag(F::VdpmStat, "VDPM_STAT", reg::DPM_STATUS, 0x80, RO),
    D::flag(F::IdpmStat, "IDPM_STAT", reg::DPM_STATUS, 0x40, RO),
    D::measurement(F::IdpmLim, "IDPM_LIM", reg::DPM_STATUS, 0x3F, 100, 50),
    // REG14
    D::flag(F::RegRst, "REG_RST", reg::DEVICE_INFO, 0x80, Strobe),
    D::flag(F::IcoOptimized, "ICO_OPTIMIZED", reg::DEVICE_INFO, 0x40, RO),
    D::enumerated(F::Pn, "PN", reg::DEVICE_INFO, 0x38, RO, PartNumber::CODES),
    D::flag(F::TsProfile, "TS_PROFILE", reg::DEVICE_INFO, 0x04, RO),
    D::measurement(F::DevRev, "DEV_REV", reg::DEVICE_INFO, 0x03, 0, 1),
];

/// Descriptor table, indexed by `Field as usize`
pub static FIELDS: [FieldDescriptor; FIELD_COUNT] = TABLE;

const fn check_table(table: &[FieldDescriptor; FIELD_COUNT]) -> bool {
    let mut i = 0;
    while i < FIELD_COUNT {
        let d = &table[i];
        assert!(d.field as usize == i, "table index must equal field identity");
        assert!((d.register as usize) < reg::COUNT, "register out of range");
        assert!(d.mask != 0, "empty mask");
        assert!(d.shift as u32 == d.mask.trailing_zeros(), "shift must be lowest mask bit");

        let raw_max = d.mask >> d.shift;
        assert!((raw_max as u16 + 1).is_power_of_two(), "mask must be contiguous");

        match d.kind {
            FieldKind::Flag => assert!(raw_max == 1, "flag must be one bit"),
            FieldKind::Enumerated { codes } => {
                assert!(!codes.is_empty(), "enum without codes");
                let mut c = 0;
                while c < codes.len() {
                    assert!(codes[c] <= raw_max, "enum code wider than field");
                    if c > 0 {
                        assert!(codes[c - 1] < codes[c], "enum codes must ascend");
                    }
                    c += 1;
                }
            }
            FieldKind::Scaled {
                base,
                step,
                min,
                max,
            } => {
                assert!(step > 0, "zero step");
                assert!(base <= min && min <= max, "bad scaled range");
                let top = base as u32 + step as u32 * raw_max as u32;
                assert!(max as u32 <= top, "scaled max beyond raw range");
                assert!(top <= u16::MAX as u32, "scaled range overflows u16");
            }
        }

        // Fields sharing a register are ordered and disjoint
        if i > 0 {
            let prev = &table[i - 1];
            assert!(prev.register <= d.register, "table must be in register order");
        }
        let mut j = 0;
        while j < i {
            let other = &table[j];
            if other.register == d.register {
                assert!(other.mask & d.mask == 0, "overlapping fields");
            }
            j += 1;
        }
        i += 1;
    }
    true
}

const _: () = assert!(check_table(&TABLE));

/// Strobe bits of `register`
///
/// Strobes read back as running until the device completes the action.
/// Writing such a bit back as read would start the action again.
pub const fn strobe_mask(register: u8) -> u8 {
    let mut mask = 0;
    let mut i = 0;
    while i < FIELD_COUNT {
        let d = &TABLE[i];
        if d.register == register && matches!(d.access, Access::Strobe) {
            mask |= d.mask;
        }
        i += 1;
    }
    mask
}

impl Field {
    /// Every field, in register order
    pub const ALL: [Field; FIELD_COUNT] = {
        let mut all = [Field::EnHiz; FIELD_COUNT];
        let mut i = 0;
        while i < FIELD_COUNT {
            all[i] = TABLE[i].field;
            i += 1;
        }
        all
    };

    /// Static descriptor for this field
    pub fn descriptor(self) -> &'static FieldDescriptor {
        &FIELDS[self as usize]
    }

    /// Datasheet name
    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    /// Register holding this field
    pub fn register(self) -> u8 {
        self.descriptor().register
    }

    pub fn access(self) -> Access {
        self.descriptor().access
    }

    /// Fields stored in one register
    pub fn in_register(register: u8) -> impl Iterator<Item = Field> {
        FIELDS
            .iter()
            .filter(move |d| d.register == register)
            .map(|d| d.field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_identity() {
        for (i, field) in Field::ALL.iter().enumerate() {
            assert_eq!(*field as usize, i);
            assert_eq!(field.descriptor().field, *field);
        }
    }

    #[test]
    fn test_masks_cover_registers() {
        // Only reserved bits are left undescribed
        for register in 0..reg::COUNT as u8 {
            let used = Field::in_register(register).fold(0u8, |acc, f| acc | f.descriptor().mask);
            match register {
                reg::SYSTEM_CONTROL | reg::TIMER_CONTROL => assert_eq!(used, 0xFE),
                reg::OPERATION_CONTROL => assert_eq!(used, 0xEF),
                reg::BOOST_VOLTAGE => assert_eq!(used, 0xF0),
                reg::SYSTEM_VOLTAGE | reg::TS_PERCENT | reg::CHARGE_CURRENT_ADC => {
                    assert_eq!(used, 0x7F)
                }
                _ => assert_eq!(used, 0xFF, "register {:#04x}", register),
            }
        }
    }

    #[test]
    fn test_known_fields() {
        let d = Field::StatDis.descriptor();
        assert_eq!((d.register, d.mask, d.shift), (0x07, 0x40, 6));

        let d = Field::Vindpm.descriptor();
        assert_eq!(
            d.kind,
            FieldKind::Scaled {
                base: 2600,
                step: 100,
                min: 3900,
                max: 15300,
            }
        );

        assert_eq!(Field::Pn.name(), "PN");
        assert_eq!(Field::Pn.register(), reg::DEVICE_INFO);
        assert_eq!(Field::NtcFault.access(), Access::ReadOnly);
        assert_eq!(Field::WdRst.access(), Access::Strobe);
    }

    #[test]
    fn test_strobes() {
        let strobes: heapless::Vec<Field, 8> = Field::ALL
            .iter()
            .copied()
            .filter(|f| f.access() == Access::Strobe)
            .collect();
        assert_eq!(
            strobes.as_slice(),
            &[
                Field::ConvStart,
                Field::ForceDpdm,
                Field::WdRst,
                Field::ForceIco,
                Field::PumpxUp,
                Field::PumpxDn,
                Field::RegRst,
            ]
        );
    }

    #[test]
    fn test_strobe_mask() {
        assert_eq!(strobe_mask(reg::ADC_CONTROL), 0x82);
        assert_eq!(strobe_mask(reg::SYSTEM_CONTROL), 0x40);
        assert_eq!(strobe_mask(reg::OPERATION_CONTROL), 0x83);
        assert_eq!(strobe_mask(reg::DEVICE_INFO), 0x80);
        assert_eq!(strobe_mask(reg::TIMER_CONTROL), 0);
        assert_eq!(strobe_mask(reg::COUNT as u8), 0);
    }

    #[test]
    fn test_in_register() {
        let fields: heapless::Vec<Field, 8> = Field::in_register(reg::CHARGE_VOLTAGE).collect();
        assert_eq!(fields.as_slice(), &[Field::Vreg, Field::Batlowv, Field::Vrechg]);
        assert_eq!(Field::in_register(0x15).count(), 0);
    }
}
