//! BQ25895 charger
//!
//! - [`transaction`] - register read/write and read-modify-write primitives
//! - [`Bq25895`] - exclusively owned device session with typed accessors
//! - [`SharedBq25895`] - session behind a blocking mutex for use from
//!   several contexts

mod accessors;
mod bq25895;
#[cfg(test)]
pub(crate) mod mock;
mod shared;
pub mod transaction;

pub use bq25895::{Bq25895, DEFAULT_ADDRESS};
pub use shared::SharedBq25895;

use trickle_core::{CodecError, Field};

/// Charger access errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Bus transfer failed
    Bus(E),
    /// Value of the wrong kind, undefined enum code, or write to a
    /// read-only field
    InvalidValue(Field),
    /// Device reported a code the field does not define
    UnknownEncoding { field: Field, raw: u8 },
}

impl<E> Error<E> {
    /// Field the error relates to, if any
    pub fn field(&self) -> Option<Field> {
        match self {
            Error::Bus(_) => None,
            Error::InvalidValue(field) => Some(*field),
            Error::UnknownEncoding { field, .. } => Some(*field),
        }
    }

    pub fn is_bus(&self) -> bool {
        matches!(self, Error::Bus(_))
    }
}

impl<E> From<CodecError> for Error<E> {
    fn from(e: CodecError) -> Self {
        match e {
            CodecError::InvalidValue(field) => Error::InvalidValue(field),
            CodecError::UnknownEncoding { field, raw } => Error::UnknownEncoding { field, raw },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codec_error_conversion() {
        let e: Error<()> = CodecError::InvalidValue(Field::Vreg).into();
        assert_eq!(e, Error::InvalidValue(Field::Vreg));
        assert_eq!(e.field(), Some(Field::Vreg));

        let e: Error<()> = CodecError::UnknownEncoding {
            field: Field::Pn,
            raw: 2,
        }
        .into();
        assert_eq!(
            e,
            Error::UnknownEncoding {
                field: Field::Pn,
                raw: 2,
            }
        );
        assert!(!e.is_bus());
    }

    #[test]
    fn test_bus_error() {
        let e: Error<u8> = Error::Bus(7);
        assert!(e.is_bus());
        assert_eq!(e.field(), None);
    }
}
