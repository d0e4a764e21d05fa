//! Named field accessors
//!
//! One getter per field and one setter per host-writable field, so
//! application code reads like the datasheet. Strobes are started through
//! the dedicated trigger methods on [`Bq25895`].

use trickle_core::types::*;
use trickle_core::Field;
use trickle_hal::I2cBus;

use super::{Bq25895, Error};

macro_rules! rw_flag {
    ($field:ident, $get:ident, $set:ident, $doc:literal) => {
        #[doc = concat!("Read ", $doc)]
        pub fn $get(&mut self) -> Result<bool, Error<B::Error>> {
            self.read_flag(Field::$field)
        }

        #[doc = concat!("Write ", $doc)]
        pub fn $set(&mut self, on: bool) -> Result<(), Error<B::Error>> {
            self.write_flag(Field::$field, on)
        }
    };
}

macro_rules! rw_enum {
    ($field:ident: $ty:ty, $get:ident, $set:ident, $doc:literal) => {
        #[doc = concat!("Read ", $doc)]
        pub fn $get(&mut self) -> Result<$ty, Error<B::Error>> {
            self.read_enum(Field::$field)
        }

        #[doc = concat!("Write ", $doc)]
        pub fn $set(&mut self, value: $ty) -> Result<(), Error<B::Error>> {
            self.write_enum(Field::$field, value)
        }
    };
}

macro_rules! rw_scaled {
    ($field:ident, $get:ident, $set:ident, $doc:literal) => {
        #[doc = concat!("Read ", $doc)]
        pub fn $get(&mut self) -> Result<u16, Error<B::Error>> {
            self.read_scaled(Field::$field)
        }

        #[doc = concat!("Write ", $doc, ", clamped to range and rounded to a step")]
        pub fn $set(&mut self, value: u16) -> Result<(), Error<B::Error>> {
            self.write_scaled(Field::$field, value)
        }
    };
}

macro_rules! ro_flag {
    ($field:ident, $get:ident, $doc:literal) => {
        #[doc = $doc]
        pub fn $get(&mut self) -> Result<bool, Error<B::Error>> {
            self.read_flag(Field::$field)
        }
    };
}

macro_rules! ro_enum {
    ($field:ident: $ty:ty, $get:ident, $doc:literal) => {
        #[doc = $doc]
        pub fn $get(&mut self) -> Result<$ty, Error<B::Error>> {
            self.read_enum(Field::$field)
        }
    };
}

macro_rules! ro_scaled {
    ($field:ident, $get:ident, $doc:literal) => {
        #[doc = $doc]
        pub fn $get(&mut self) -> Result<u16, Error<B::Error>> {
            self.read_scaled(Field::$field)
        }
    };
}

impl<B: I2cBus> Bq25895<B> {
    // REG00
    rw_flag!(EnHiz, hiz_enabled, set_hiz, "high impedance mode (EN_HIZ)");
    rw_flag!(EnIlim, ilim_pin_enabled, set_ilim_pin, "ILIM pin current limit enable (EN_ILIM)");
    rw_scaled!(Iinlim, input_current_limit_ma, set_input_current_limit_ma, "input current limit in mA (IINLIM)");

    // REG01
    rw_enum!(Bhot: BoostHotThreshold, boost_hot_threshold, set_boost_hot_threshold, "boost mode hot threshold (BHOT)");
    rw_enum!(Bcold: BoostColdThreshold, boost_cold_threshold, set_boost_cold_threshold, "boost mode cold threshold (BCOLD)");
    rw_scaled!(VindpmOs, vindpm_offset_mv, set_vindpm_offset_mv, "relative VINDPM offset in mV (VINDPM_OS)");

    // REG02
    ro_flag!(ConvStart, adc_conversion_active, "ADC conversion in progress (CONV_START)");
    rw_enum!(ConvRate: AdcConversionRate, adc_conversion_rate, set_adc_conversion_rate, "ADC conversion rate (CONV_RATE)");
    rw_enum!(BoostFreq: BoostFrequency, boost_frequency, set_boost_frequency, "boost switching frequency (BOOST_FREQ)");
    rw_flag!(IcoEn, ico_enabled, set_ico, "input current optimizer enable (ICO_EN)");
    rw_flag!(HvdcpEn, hvdcp_enabled, set_hvdcp, "high voltage DCP enable (HVDCP_EN)");
    rw_flag!(MaxcEn, maxcharge_enabled, set_maxcharge, "MaxCharge adapter enable (MAXC_EN)");
    rw_flag!(AutoDpdmEn, auto_dpdm_enabled, set_auto_dpdm, "automatic input detection (AUTO_DPDM_EN)");

    // REG03
    rw_flag!(BatLoaden, battery_load_enabled, set_battery_load, "battery load enable (BAT_LOADEN)");
    rw_flag!(OtgConfig, otg_enabled, set_otg, "boost (OTG) mode (OTG_CONFIG)");
    rw_flag!(ChgConfig, charge_enabled, set_charge_enable, "charge enable (CHG_CONFIG)");
    rw_scaled!(SysMin, min_system_voltage_mv, set_min_system_voltage_mv, "minimum system voltage in mV (SYS_MIN)");

    // REG04
    rw_flag!(EnPumpx, pumpx_enabled, set_pumpx, "current pulse control enable (EN_PUMPX)");
    rw_scaled!(Ichg, charge_current_ma, set_charge_current_ma, "fast charge current limit in mA (ICHG)");

    // REG05
    rw_scaled!(Iprechg, precharge_current_ma, set_precharge_current_ma, "precharge current in mA (IPRECHG)");
    rw_scaled!(Iterm, termination_current_ma, set_termination_current_ma, "termination current in mA (ITERM)");

    // REG06
    rw_scaled!(Vreg, charge_voltage_mv, set_charge_voltage_mv, "charge voltage limit in mV (VREG)");
    rw_enum!(Batlowv: PrechargeThreshold, precharge_threshold, set_precharge_threshold, "precharge to fast charge threshold (BATLOWV)");
    rw_enum!(Vrechg: RechargeOffset, recharge_offset, set_recharge_offset, "recharge threshold offset (VRECHG)");

    // REG07
    rw_flag!(EnTerm, termination_enabled, set_termination, "charge termination enable (EN_TERM)");
    rw_flag!(StatDis, stat_pin_disabled, set_stat_pin_disable, "STAT pin disable (STAT_DIS)");
    rw_enum!(Watchdog: WatchdogTimer, watchdog_timer, set_watchdog_timer, "I2C watchdog timer (WATCHDOG)");
    rw_flag!(EnTimer, safety_timer_enabled, set_safety_timer, "charge safety timer enable (EN_TIMER)");
    rw_enum!(ChgTimer: ChargeTimer, charge_timer, set_charge_timer, "fast charge timer (CHG_TIMER)");

    // REG08
    rw_scaled!(BatComp, ir_comp_resistance_mohm, set_ir_comp_resistance_mohm, "IR compensation resistance in mΩ (BAT_COMP)");
    rw_scaled!(Vclamp, ir_comp_clamp_mv, set_ir_comp_clamp_mv, "IR compensation voltage clamp in mV (VCLAMP)");
    rw_enum!(Treg: ThermalRegulation, thermal_regulation, set_thermal_regulation, "thermal regulation threshold (TREG)");

    // REG09
    rw_flag!(Tmr2xEn, timer_slowdown_enabled, set_timer_slowdown, "safety timer slowdown during DPM (TMR2X_EN)");
    rw_flag!(BatfetDis, batfet_disabled, set_batfet_disable, "BATFET off (BATFET_DIS)");
    rw_flag!(BatfetDly, batfet_delay_enabled, set_batfet_delay, "delayed BATFET off (BATFET_DLY)");
    rw_flag!(BatfetRstEn, batfet_reset_enabled, set_batfet_reset, "BATFET full system reset enable (BATFET_RST_EN)");

    // REG0A
    rw_scaled!(Boostv, boost_voltage_mv, set_boost_voltage_mv, "boost mode voltage in mV (BOOSTV)");

    // REG0B
    ro_enum!(VbusStat: VbusStatus, vbus_status, "Input source type (VBUS_STAT)");
    ro_enum!(ChrgStat: ChargeStatus, charge_status, "Charging status (CHRG_STAT)");
    ro_flag!(PgStat, power_good, "Input power good (PG_STAT)");
    ro_flag!(SdpStat, usb_500ma, "USB input is 500 mA capable (SDP_STAT)");
    ro_flag!(VsysStat, vsys_regulation, "System voltage in VSYSMIN regulation (VSYS_STAT)");

    // REG0C, single reads return the latched state
    ro_flag!(WatchdogFault, watchdog_fault, "Watchdog expired (WATCHDOG_FAULT)");
    ro_flag!(BoostFault, boost_fault, "Boost mode fault (BOOST_FAULT)");
    ro_enum!(ChrgFault: ChargeFault, charge_fault, "Charge fault (CHRG_FAULT)");
    ro_flag!(BatFault, battery_overvoltage, "Battery overvoltage (BAT_FAULT)");
    ro_enum!(NtcFault: NtcFault, ntc_fault, "Thermistor fault (NTC_FAULT)");

    // REG0D
    rw_enum!(ForceVindpm: VindpmMode, vindpm_mode, set_vindpm_mode, "VINDPM setting method (FORCE_VINDPM)");
    rw_scaled!(Vindpm, vindpm_mv, set_vindpm_mv, "absolute VINDPM threshold in mV (VINDPM)");

    // REG0E..REG12
    ro_flag!(ThermStat, thermal_regulation_active, "Thermal regulation active (THERM_STAT)");
    ro_scaled!(Batv, battery_voltage_mv, "Battery voltage in mV (BATV)");
    ro_scaled!(Sysv, system_voltage_mv, "System voltage in mV (SYSV)");
    ro_scaled!(Tspct, ts_percent, "TS voltage in 0.01 % of REGN (TSPCT)");
    ro_flag!(VbusGd, vbus_good, "VBUS attached (VBUS_GD)");
    ro_scaled!(Vbusv, vbus_voltage_mv, "VBUS voltage in mV (VBUSV)");
    ro_scaled!(Ichgr, charge_current_adc_ma, "Measured charge current in mA (ICHGR)");

    // REG13
    ro_flag!(VdpmStat, vindpm_active, "Input voltage regulation active (VDPM_STAT)");
    ro_flag!(IdpmStat, iindpm_active, "Input current regulation active (IDPM_STAT)");
    ro_scaled!(IdpmLim, input_limit_in_effect_ma, "Input current limit in effect in mA (IDPM_LIM)");

    // REG14
    ro_flag!(IcoOptimized, ico_optimized, "ICO has converged (ICO_OPTIMIZED)");
    ro_enum!(Pn: PartNumber, part_number, "Part number (PN)");
    ro_flag!(TsProfile, ts_profile_jeita, "JEITA temperature profile (TS_PROFILE)");

    /// Device revision (DEV_REV)
    pub fn device_revision(&mut self) -> Result<u8, Error<B::Error>> {
        Ok(self.read_scaled(Field::DevRev)? as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charger::mock::MockBus;
    use trickle_core::reg;

    #[test]
    fn test_scaled_setters_clamp() {
        let mut charger = Bq25895::new(MockBus::new());

        charger.set_charge_current_ma(9000).unwrap();
        assert_eq!(charger.charge_current_ma(), Ok(5056));

        charger.set_vindpm_mv(1000).unwrap();
        assert_eq!(charger.vindpm_mv(), Ok(3900));

        charger.set_input_current_limit_ma(3250).unwrap();
        assert_eq!(charger.input_current_limit_ma(), Ok(3250));

        charger.set_boost_voltage_mv(5126).unwrap();
        assert_eq!(charger.boost_voltage_mv(), Ok(5126));
    }

    #[test]
    fn test_shared_register_setters() {
        let mut charger = Bq25895::new(MockBus::new());

        charger.set_hiz(true).unwrap();
        charger.set_ilim_pin(true).unwrap();
        charger.set_input_current_limit_ma(500).unwrap();
        charger.set_hiz(false).unwrap();

        assert_eq!(charger.hiz_enabled(), Ok(false));
        assert_eq!(charger.ilim_pin_enabled(), Ok(true));
        assert_eq!(charger.input_current_limit_ma(), Ok(500));
        assert_eq!(charger.release().regs[reg::INPUT_CONTROL as usize], 0x48);
    }

    #[test]
    fn test_enum_accessors() {
        let mut charger = Bq25895::new(MockBus::new());

        charger.set_charge_timer(ChargeTimer::Hours20).unwrap();
        charger.set_watchdog_timer(WatchdogTimer::Seconds80).unwrap();
        charger.set_thermal_regulation(ThermalRegulation::Celsius100).unwrap();
        charger.set_vindpm_mode(VindpmMode::Absolute).unwrap();

        assert_eq!(charger.charge_timer(), Ok(ChargeTimer::Hours20));
        assert_eq!(charger.watchdog_timer(), Ok(WatchdogTimer::Seconds80));
        assert_eq!(charger.thermal_regulation(), Ok(ThermalRegulation::Celsius100));
        assert_eq!(charger.vindpm_mode(), Ok(VindpmMode::Absolute));
    }

    #[test]
    fn test_read_only_getters() {
        let mut regs = [0u8; reg::COUNT];
        regs[reg::STATUS as usize] = 0b1000_0111;
        regs[reg::FAULT as usize] = 0b0000_0010;
        regs[reg::DEVICE_INFO as usize] = 0b0111_1110;
        let mut charger = Bq25895::new(MockBus::with_registers(regs));

        assert_eq!(charger.vbus_status(), Ok(VbusStatus::MaxChargeDcp));
        assert_eq!(charger.charge_status(), Ok(ChargeStatus::NotCharging));
        assert_eq!(charger.power_good(), Ok(true));
        assert_eq!(charger.usb_500ma(), Ok(true));
        assert_eq!(charger.vsys_regulation(), Ok(true));
        assert_eq!(charger.ntc_fault(), Ok(NtcFault::BuckHot));
        assert_eq!(charger.part_number(), Ok(PartNumber::Bq25895));
        assert_eq!(charger.ico_optimized(), Ok(true));
        assert_eq!(charger.ts_profile_jeita(), Ok(true));
        assert_eq!(charger.device_revision(), Ok(2));
    }

    #[test]
    fn test_adc_getters() {
        let mut regs = [0u8; reg::COUNT];
        regs[reg::BATTERY_VOLTAGE as usize] = 0;
        regs[reg::TS_PERCENT as usize] = 0x7F;
        regs[reg::CHARGE_CURRENT_ADC as usize] = 0x7F;
        let mut charger = Bq25895::new(MockBus::with_registers(regs));

        assert_eq!(charger.battery_voltage_mv(), Ok(2304));
        assert_eq!(charger.ts_percent(), Ok(2100 + 127 * 46));
        assert_eq!(charger.charge_current_adc_ma(), Ok(6350));
    }
}
