//! Register map and field codec for the BQ25895 charger
//!
//! This crate holds everything about the charger that does not need a bus:
//!
//! - Field identities and the static descriptor table
//! - Pure encode/decode between values and register bits
//! - Symbolic types for enumerated fields
//! - Status, fault and ADC snapshot decoding
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod codec;
pub mod config;
pub mod field;
pub mod registers;
pub mod status;
pub mod types;

pub use codec::{decode, encode, CodecError, FieldValue};
pub use field::{Access, FieldDescriptor, FieldKind};
pub use registers::{reg, strobe_mask, Field, FIELDS, FIELD_COUNT};
