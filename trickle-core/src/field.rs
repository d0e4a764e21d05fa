//! Field descriptors
//!
//! A descriptor places one logical setting inside the register map: which
//! register holds it, which contiguous bits it owns, whether the host may
//! write it, and how the raw bits translate to a value.

use crate::registers::Field;

/// Who may change a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Access {
    /// Host reads and writes the value
    ReadWrite,
    /// Device-owned status, writes are rejected
    ReadOnly,
    /// Self-clearing trigger; writing 1 starts an action and the device
    /// returns the bit to 0 when done
    Strobe,
}

impl Access {
    /// Whether a host write is allowed
    pub const fn is_writable(self) -> bool {
        !matches!(self, Access::ReadOnly)
    }
}

/// How the raw bits of a field are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FieldKind {
    /// Single bit boolean
    Flag,
    /// Raw code selecting one of a set of states
    ///
    /// `codes` lists the codes the device defines, ascending. It may have
    /// gaps.
    Enumerated { codes: &'static [u8] },
    /// Linear quantity: `physical = raw * step + base`
    ///
    /// `min` and `max` bound the physical value accepted on write.
    Scaled {
        base: u16,
        step: u16,
        min: u16,
        max: u16,
    },
}

/// Location and interpretation of one register field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FieldDescriptor {
    /// Field identity, equal to this descriptor's index in the table
    pub field: Field,
    /// Datasheet name
    pub name: &'static str,
    /// Register address
    pub register: u8,
    /// Contiguous bit mask within the register
    pub mask: u8,
    /// Position of the lowest mask bit
    pub shift: u8,
    pub kind: FieldKind,
    pub access: Access,
}

impl FieldDescriptor {
    /// Boolean field
    pub const fn flag(field: Field, name: &'static str, register: u8, mask: u8, access: Access) -> Self {
        Self {
            field,
            name,
            register,
            mask,
            shift: mask.trailing_zeros() as u8,
            kind: FieldKind::Flag,
            access,
        }
    }

    /// Enumerated field with the given defined codes
    pub const fn enumerated(
        field: Field,
        name: &'static str,
        register: u8,
        mask: u8,
        access: Access,
        codes: &'static [u8],
    ) -> Self {
        Self {
            field,
            name,
            register,
            mask,
            shift: mask.trailing_zeros() as u8,
            kind: FieldKind::Enumerated { codes },
            access,
        }
    }

    /// Writable scaled field clamped to `[min, max]`
    #[allow(clippy::too_many_arguments)]
    pub const fn scaled(
        field: Field,
        name: &'static str,
        register: u8,
        mask: u8,
        base: u16,
        step: u16,
        min: u16,
        max: u16,
    ) -> Self {
        Self {
            field,
            name,
            register,
            mask,
            shift: mask.trailing_zeros() as u8,
            kind: FieldKind::Scaled {
                base,
                step,
                min,
                max,
            },
            access: Access::ReadWrite,
        }
    }

    /// Read-only measurement spanning the whole raw range
    pub const fn measurement(
        field: Field,
        name: &'static str,
        register: u8,
        mask: u8,
        base: u16,
        step: u16,
    ) -> Self {
        let raw_max = (mask >> mask.trailing_zeros()) as u16;
        Self {
            field,
            name,
            register,
            mask,
            shift: mask.trailing_zeros() as u8,
            kind: FieldKind::Scaled {
                base,
                step,
                min: base,
                max: base + step * raw_max,
            },
            access: Access::ReadOnly,
        }
    }

    /// Largest raw value the field's bits can hold
    pub const fn raw_max(&self) -> u8 {
        self.mask >> self.shift
    }

    /// Raw value of this field within a register byte
    pub const fn extract(&self, register_value: u8) -> u8 {
        (register_value & self.mask) >> self.shift
    }

    /// Register fragment carrying `raw` in this field's bits, zero elsewhere
    pub const fn place(&self, raw: u8) -> u8 {
        (raw << self.shift) & self.mask
    }

    /// Merge a fragment into a register byte, leaving other bits untouched
    pub const fn merge(&self, current: u8, fragment: u8) -> u8 {
        (current & !self.mask) | (fragment & self.mask)
    }

    pub const fn is_writable(&self) -> bool {
        self.access.is_writable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_from_mask() {
        let d = FieldDescriptor::flag(Field::EnHiz, "EN_HIZ", 0x00, 0x80, Access::ReadWrite);
        assert_eq!(d.shift, 7);
        assert_eq!(d.raw_max(), 1);

        let d = FieldDescriptor::scaled(Field::Vreg, "VREG", 0x06, 0xFC, 3840, 16, 3840, 4608);
        assert_eq!(d.shift, 2);
        assert_eq!(d.raw_max(), 63);
    }

    #[test]
    fn test_extract_place_merge() {
        let d = FieldDescriptor::scaled(Field::Iterm, "ITERM", 0x05, 0x0F, 64, 64, 64, 1024);

        assert_eq!(d.extract(0b1011_0110), 0b0110);
        assert_eq!(d.place(0b1111), 0x0F);
        // Bits beyond the field width are dropped
        assert_eq!(d.place(0x1F), 0x0F);

        // Sibling bits survive
        assert_eq!(d.merge(0b1011_0000, 0b0000_0101), 0b1011_0101);
        assert_eq!(d.merge(0b1011_1111, 0), 0b1011_0000);
    }

    #[test]
    fn test_measurement_span() {
        let d = FieldDescriptor::measurement(Field::Batv, "BATV", 0x0E, 0x7F, 2304, 20);
        assert_eq!(d.access, Access::ReadOnly);
        assert_eq!(
            d.kind,
            FieldKind::Scaled {
                base: 2304,
                step: 20,
                min: 2304,
                max: 2304 + 20 * 127,
            }
        );
    }

    #[test]
    fn test_access() {
        assert!(Access::ReadWrite.is_writable());
        assert!(Access::Strobe.is_writable());
        assert!(!Access::ReadOnly.is_writable());
    }
}
