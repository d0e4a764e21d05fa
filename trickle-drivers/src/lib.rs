//! BQ25895 charger driver
//!
//! Builds on the register map in `trickle-core` and the bus trait in
//! `trickle-hal`:
//!
//! - Register read/write and read-modify-write transactions
//! - Device session with per-field accessors, strobes and snapshots
//! - Mutex-guarded session for sharing between contexts
//! - Adapter from `embedded-hal` I2C masters

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod bus;
pub mod charger;

pub use bus::HalBus;
pub use charger::{Bq25895, Error, SharedBq25895, DEFAULT_ADDRESS};
