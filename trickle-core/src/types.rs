//! Symbolic values for enumerated register fields
//!
//! Each enum is keyed by the raw codes the device defines for its field.
//! Codes the device does not define have no variant; decoding one is an
//! error rather than a silent fallback.

/// A register field whose raw bits select one of a finite set of states
pub trait FieldEnum: Copy + Sized {
    /// Raw codes defined by the device, ascending
    const CODES: &'static [u8];

    /// Raw code for this state
    fn code(self) -> u8;

    /// State for a raw code, or `None` if the device does not define it
    fn from_code(code: u8) -> Option<Self>;
}

macro_rules! field_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $code:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
        #[repr(u8)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $code, )+
        }

        impl FieldEnum for $name {
            const CODES: &'static [u8] = &[$($code),+];

            fn code(self) -> u8 {
                self as u8
            }

            fn from_code(code: u8) -> Option<Self> {
                match code {
                    $( $code => Some(Self::$variant), )+
                    _ => None,
                }
            }
        }
    };
}

field_enum! {
    /// Boost mode hot temperature threshold (BHOT), as % of REGN
    pub enum BoostHotThreshold {
        /// VBHOT1, 34.75 %
        Percent34_75 = 0,
        /// VBHOT0, 37.75 %
        Percent37_75 = 1,
        /// VBHOT2, 31.25 %
        Percent31_25 = 2,
        /// Boost mode thermal protection disabled
        Disabled = 3,
    }
}

field_enum! {
    /// Boost mode cold temperature threshold (BCOLD), as % of REGN
    pub enum BoostColdThreshold {
        /// VBCOLD0, 77 %
        Percent77 = 0,
        /// VBCOLD1, 80 %
        Percent80 = 1,
    }
}

field_enum! {
    /// ADC conversion rate (CONV_RATE)
    pub enum AdcConversionRate {
        /// Convert once per CONV_START
        OneShot = 0,
        /// Convert every second
        Continuous = 1,
    }
}

field_enum! {
    /// Boost mode switching frequency (BOOST_FREQ)
    pub enum BoostFrequency {
        /// 1.5 MHz
        Khz1500 = 0,
        /// 500 kHz
        Khz500 = 1,
    }
}

field_enum! {
    /// Battery precharge to fast-charge threshold (BATLOWV)
    pub enum PrechargeThreshold {
        /// 2.8 V
        Mv2800 = 0,
        /// 3.0 V
        Mv3000 = 1,
    }
}

field_enum! {
    /// Battery recharge threshold offset below VREG (VRECHG)
    pub enum RechargeOffset {
        /// 100 mV below VREG
        Mv100 = 0,
        /// 200 mV below VREG
        Mv200 = 1,
    }
}

field_enum! {
    /// I2C watchdog timer setting (WATCHDOG)
    pub enum WatchdogTimer {
        /// Watchdog disabled
        Disabled = 0,
        /// 40 s
        Seconds40 = 1,
        /// 80 s
        Seconds80 = 2,
        /// 160 s
        Seconds160 = 3,
    }
}

field_enum! {
    /// Fast charge safety timer (CHG_TIMER)
    pub enum ChargeTimer {
        /// 5 hours
        Hours5 = 0,
        /// 8 hours
        Hours8 = 1,
        /// 12 hours
        Hours12 = 2,
        /// 20 hours
        Hours20 = 3,
    }
}

field_enum! {
    /// Thermal regulation threshold (TREG)
    pub enum ThermalRegulation {
        /// 60 °C
        Celsius60 = 0,
        /// 80 °C
        Celsius80 = 1,
        /// 100 °C
        Celsius100 = 2,
        /// 120 °C
        Celsius120 = 3,
    }
}

field_enum! {
    /// Input source type (VBUS_STAT)
    pub enum VbusStatus {
        /// No input
        NoInput = 0,
        /// USB host, standard downstream port
        UsbSdp = 1,
        /// USB charging downstream port (1.5 A)
        UsbCdp = 2,
        /// USB dedicated charging port (3.25 A)
        UsbDcp = 3,
        /// Adjustable high voltage DCP (MaxCharge)
        MaxChargeDcp = 4,
        /// Unknown adapter (500 mA)
        UnknownAdapter = 5,
        /// Non-standard adapter (1 A / 2 A / 2.1 A / 2.4 A)
        NonStandardAdapter = 6,
        /// OTG
        Otg = 7,
    }
}

field_enum! {
    /// Charging status (CHRG_STAT)
    pub enum ChargeStatus {
        /// Not charging
        NotCharging = 0,
        /// Pre-charge (below BATLOWV)
        PreCharge = 1,
        /// Fast charging
        FastCharging = 2,
        /// Charge termination done
        ChargeDone = 3,
    }
}

field_enum! {
    /// Charge fault status (CHRG_FAULT)
    pub enum ChargeFault {
        /// Normal
        Normal = 0,
        /// Input fault (VBUS > VACOV or VBAT < VBUS < VVBUSMIN)
        InputFault = 1,
        /// Thermal shutdown
        ThermalShutdown = 2,
        /// Charge safety timer expired
        SafetyTimerExpired = 3,
    }
}

field_enum! {
    /// Thermistor fault status (NTC_FAULT)
    pub enum NtcFault {
        /// Normal
        Normal = 0,
        /// Buck mode, TS cold
        BuckCold = 1,
        /// Buck mode, TS hot
        BuckHot = 2,
        /// Boost mode, TS cold
        BoostCold = 5,
        /// Boost mode, TS hot
        BoostHot = 6,
    }
}

field_enum! {
    /// VINDPM threshold setting method (FORCE_VINDPM)
    pub enum VindpmMode {
        /// Threshold follows VBUS plus the VINDPM_OS offset
        Relative = 0,
        /// Threshold is the absolute VINDPM register value
        Absolute = 1,
    }
}

field_enum! {
    /// Device part number (PN)
    ///
    /// Codes as reported by the silicon. BQ25890 is 3, BQ25895 is 7.
    pub enum PartNumber {
        /// BQ25892 or BQ25896
        Bq25892 = 0,
        /// BQ25890
        Bq25890 = 3,
        /// BQ25895
        Bq25895 = 7,
    }
}

impl WatchdogTimer {
    /// Timeout in seconds, `None` when disabled
    pub fn seconds(self) -> Option<u16> {
        match self {
            WatchdogTimer::Disabled => None,
            WatchdogTimer::Seconds40 => Some(40),
            WatchdogTimer::Seconds80 => Some(80),
            WatchdogTimer::Seconds160 => Some(160),
        }
    }
}

impl ChargeTimer {
    /// Safety timer length in hours
    pub fn hours(self) -> u8 {
        match self {
            ChargeTimer::Hours5 => 5,
            ChargeTimer::Hours8 => 8,
            ChargeTimer::Hours12 => 12,
            ChargeTimer::Hours20 => 20,
        }
    }
}

impl ThermalRegulation {
    /// Junction temperature threshold in °C
    pub fn celsius(self) -> u8 {
        match self {
            ThermalRegulation::Celsius60 => 60,
            ThermalRegulation::Celsius80 => 80,
            ThermalRegulation::Celsius100 => 100,
            ThermalRegulation::Celsius120 => 120,
        }
    }
}

impl VbusStatus {
    /// An input source (not OTG) is attached
    pub fn has_input(self) -> bool {
        !matches!(self, VbusStatus::NoInput | VbusStatus::Otg)
    }
}

impl ChargeStatus {
    /// Current is flowing into the battery
    pub fn is_charging(self) -> bool {
        matches!(self, ChargeStatus::PreCharge | ChargeStatus::FastCharging)
    }
}

impl NtcFault {
    /// Fault raised while the converter runs in boost (OTG) mode
    pub fn is_boost_mode(self) -> bool {
        matches!(self, NtcFault::BoostCold | NtcFault::BoostHot)
    }
}
