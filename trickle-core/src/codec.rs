//! Field codec
//!
//! Pure conversion between logical field values and register bits. Nothing
//! here touches the bus: [`encode`] yields the fragment to merge into a
//! register byte, [`decode`] pulls a value out of one.
//!
//! Scaled fields clamp to their physical window before quantizing and round
//! to the nearest step. Enumerated fields only accept and produce the codes
//! the device defines.

use crate::field::{FieldDescriptor, FieldKind};
use crate::registers::Field;
use crate::types::FieldEnum;

/// Logical value of one field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FieldValue {
    /// Boolean flag
    Flag(bool),
    /// Raw code of an enumerated field
    Code(u8),
    /// Physical quantity of a scaled field (mV, mA, mΩ, 0.01 %)
    Scaled(u16),
}

impl FieldValue {
    /// Value carrying a symbolic enum's code
    pub fn from_enum<T: FieldEnum>(value: T) -> Self {
        FieldValue::Code(value.code())
    }

    pub fn as_flag(self) -> Option<bool> {
        match self {
            FieldValue::Flag(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_code(self) -> Option<u8> {
        match self {
            FieldValue::Code(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_scaled(self) -> Option<u16> {
        match self {
            FieldValue::Scaled(v) => Some(v),
            _ => None,
        }
    }
}

/// Codec failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CodecError {
    /// Value of the wrong kind, or an enum code the field does not define
    InvalidValue(Field),
    /// Register holds a code the field does not define
    UnknownEncoding { field: Field, raw: u8 },
}

/// Raw value for a physical quantity on a scaled field
///
/// Clamps into `[min, max]`, then rounds `(value - base) / step` to the
/// nearest integer. Returns `None` for non-scaled fields.
pub fn quantize(desc: &FieldDescriptor, value: u16) -> Option<u8> {
    let FieldKind::Scaled {
        base,
        step,
        min,
        max,
    } = desc.kind
    else {
        return None;
    };

    let clamped = value.clamp(min, max) as u32;
    let offset = clamped - base as u32;
    let step = step as u32;
    let raw = (offset + step / 2) / step;

    Some(raw.min(desc.raw_max() as u32) as u8)
}

/// Encode a value into its register fragment
///
/// The fragment has the field's bits set and every other bit clear. Access
/// class is not checked here.
pub fn encode(field: Field, value: FieldValue) -> Result<u8, CodecError> {
    let desc = field.descriptor();

    let raw = match (desc.kind, value) {
        (FieldKind::Flag, FieldValue::Flag(on)) => on as u8,
        (FieldKind::Enumerated { codes }, FieldValue::Code(code)) => {
            if !codes.contains(&code) {
                return Err(CodecError::InvalidValue(field));
            }
            code
        }
        (FieldKind::Scaled { .. }, FieldValue::Scaled(v)) => {
            quantize(desc, v).ok_or(CodecError::InvalidValue(field))?
        }
        _ => return Err(CodecError::InvalidValue(field)),
    };

    Ok(desc.place(raw))
}

/// Decode a field out of a full register byte
///
/// Scaled values are reported as `raw * step + base` with no clamping, so a
/// register set outside the writable window reads back as it is.
pub fn decode(field: Field, register_value: u8) -> Result<FieldValue, CodecError> {
    let desc = field.descriptor();
    let raw = desc.extract(register_value);

    match desc.kind {
        FieldKind::Flag => Ok(FieldValue::Flag(raw != 0)),
        FieldKind::Enumerated { codes } => {
            if codes.contains(&raw) {
                Ok(FieldValue::Code(raw))
            } else {
                Err(CodecError::UnknownEncoding { field, raw })
            }
        }
        FieldKind::Scaled { base, step, .. } => Ok(FieldValue::Scaled(raw as u16 * step + base)),
    }
}

/// Decode an enumerated field straight into its symbolic type
pub fn decode_enum<T: FieldEnum>(field: Field, register_value: u8) -> Result<T, CodecError> {
    let raw = decode(field, register_value)?
        .as_code()
        .ok_or(CodecError::InvalidValue(field))?;
    T::from_code(raw).ok_or(CodecError::UnknownEncoding { field, raw })
}

/// Decode a flag field
pub fn decode_flag(field: Field, register_value: u8) -> Result<bool, CodecError> {
    decode(field, register_value)?
        .as_flag()
        .ok_or(CodecError::InvalidValue(field))
}

/// Decode a scaled field
pub fn decode_scaled(field: Field, register_value: u8) -> Result<u16, CodecError> {
    decode(field, register_value)?
        .as_scaled()
        .ok_or(CodecError::InvalidValue(field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{NtcFault, WatchdogTimer};
    use proptest::prelude::*;

    const WRITABLE_SCALED: [Field; 11] = [
        Field::Iinlim,
        Field::VindpmOs,
        Field::SysMin,
        Field::Ichg,
        Field::Iprechg,
        Field::Iterm,
        Field::Vreg,
        Field::BatComp,
        Field::Vclamp,
        Field::Boostv,
        Field::Vindpm,
    ];

    fn roundtrip(field: Field, value: u16) -> u16 {
        let fragment = encode(field, FieldValue::Scaled(value)).unwrap();
        decode_scaled(field, fragment).unwrap()
    }

    #[test]
    fn test_vreg_clamp_and_exact() {
        assert_eq!(roundtrip(Field::Vreg, 3000), 3840);
        assert_eq!(roundtrip(Field::Vreg, 5000), 4608);
        assert_eq!(roundtrip(Field::Vreg, 4096), 4096);
        // 4096 = 3840 + 16 * 16
        assert_eq!(encode(Field::Vreg, FieldValue::Scaled(4096)), Ok(16 << 2));
    }

    #[test]
    fn test_round_to_nearest() {
        // 4100 is 4 mV above a step, 4108 is 12 mV above
        assert_eq!(roundtrip(Field::Vreg, 4100), 4096);
        assert_eq!(roundtrip(Field::Vreg, 4108), 4112);
        assert_eq!(roundtrip(Field::Ichg, 2000), 1984);
        assert_eq!(roundtrip(Field::Ichg, 2020), 2048);
    }

    #[test]
    fn test_range_edges() {
        assert_eq!(roundtrip(Field::Ichg, 9000), 5056);
        assert_eq!(roundtrip(Field::Vindpm, 0), 3900);
        assert_eq!(roundtrip(Field::Vindpm, u16::MAX), 15300);
        assert_eq!(roundtrip(Field::Iinlim, 0), 100);
    }

    #[test]
    fn test_iinlim_raw_bounds() {
        assert_eq!(decode(Field::Iinlim, 0x00), Ok(FieldValue::Scaled(100)));
        assert_eq!(decode(Field::Iinlim, 0x3F), Ok(FieldValue::Scaled(3250)));
        // EN_HIZ and EN_ILIM bits are ignored
        assert_eq!(decode(Field::Iinlim, 0xC0), Ok(FieldValue::Scaled(100)));
    }

    #[test]
    fn test_decode_unclamped() {
        // ICHG register can hold codes above the writable maximum
        assert_eq!(decode(Field::Ichg, 0x7F), Ok(FieldValue::Scaled(127 * 64)));
        // VINDPM below the absolute floor
        assert_eq!(decode(Field::Vindpm, 0x00), Ok(FieldValue::Scaled(2600)));
    }

    #[test]
    fn test_ntc_fault_codes() {
        assert_eq!(decode(Field::NtcFault, 0x05), Ok(FieldValue::Code(5)));
        assert_eq!(decode_enum(Field::NtcFault, 0x05), Ok(NtcFault::BoostCold));
        assert_eq!(
            decode(Field::NtcFault, 0x03),
            Err(CodecError::UnknownEncoding {
                field: Field::NtcFault,
                raw: 3,
            })
        );
        assert_eq!(
            decode_enum::<NtcFault>(Field::NtcFault, 0xF4),
            Err(CodecError::UnknownEncoding {
                field: Field::NtcFault,
                raw: 4,
            })
        );
    }

    #[test]
    fn test_invalid_values() {
        // Undefined code
        assert_eq!(
            encode(Field::NtcFault, FieldValue::Code(3)),
            Err(CodecError::InvalidValue(Field::NtcFault))
        );
        // Code wider than the field
        assert_eq!(
            encode(Field::Watchdog, FieldValue::Code(4)),
            Err(CodecError::InvalidValue(Field::Watchdog))
        );
        // Wrong kinds
        assert_eq!(
            encode(Field::Vreg, FieldValue::Flag(true)),
            Err(CodecError::InvalidValue(Field::Vreg))
        );
        assert_eq!(
            encode(Field::EnHiz, FieldValue::Scaled(1)),
            Err(CodecError::InvalidValue(Field::EnHiz))
        );
        assert_eq!(
            decode_flag(Field::Vreg, 0),
            Err(CodecError::InvalidValue(Field::Vreg))
        );
    }

    #[test]
    fn test_flags_and_enums() {
        assert_eq!(encode(Field::EnHiz, FieldValue::Flag(true)), Ok(0x80));
        assert_eq!(encode(Field::EnHiz, FieldValue::Flag(false)), Ok(0x00));
        assert_eq!(
            encode(Field::Watchdog, FieldValue::from_enum(WatchdogTimer::Seconds80)),
            Ok(0x20)
        );
        assert_eq!(decode_enum(Field::Watchdog, 0x9D), Ok(WatchdogTimer::Seconds40));
        assert_eq!(decode_flag(Field::PgStat, 0x04), Ok(true));
    }

    #[test]
    fn test_quantize_non_scaled() {
        assert_eq!(quantize(Field::EnHiz.descriptor(), 1), None);
        assert_eq!(quantize(Field::Boostv.descriptor(), 5000), Some(7));
    }

    proptest! {
        #[test]
        fn prop_scaled_clamp_roundtrip(idx in 0usize..WRITABLE_SCALED.len(), value: u16) {
            let field = WRITABLE_SCALED[idx];
            let FieldKind::Scaled { step, min, max, .. } = field.descriptor().kind else {
                unreachable!()
            };

            let decoded = roundtrip(field, value);
            let clamped = value.clamp(min, max);

            prop_assert!(decoded >= min && decoded <= max);
            prop_assert!(decoded.abs_diff(clamped) <= step / 2);
        }

        #[test]
        fn prop_fragment_within_mask(idx in 0usize..WRITABLE_SCALED.len(), value: u16) {
            let field = WRITABLE_SCALED[idx];
            let fragment = encode(field, FieldValue::Scaled(value)).unwrap();
            prop_assert_eq!(fragment & !field.descriptor().mask, 0);
        }

        #[test]
        fn prop_decode_total_for_non_enums(byte: u8) {
            for field in Field::ALL {
                let result = decode(field, byte);
                match field.descriptor().kind {
                    FieldKind::Enumerated { .. } => {}
                    _ => prop_assert!(result.is_ok()),
                }
            }
        }
    }
}
