//! Charger session shared between contexts
//!
//! Read-modify-write is two bus transfers. Two unsynchronised writers of
//! different fields in one register can each read the old byte and the
//! second write then drops the first update. [`SharedBq25895`] holds a
//! blocking mutex for the whole read-modify-write so that cannot happen.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use trickle_core::codec::FieldValue;
use trickle_core::Field;
use trickle_hal::I2cBus;

use super::{Bq25895, Error};

/// [`Bq25895`] behind a blocking mutex
///
/// `M` picks the locking strategy, e.g. `CriticalSectionRawMutex` for
/// sharing with interrupts or `NoopRawMutex` within one executor.
pub struct SharedBq25895<M: RawMutex, B> {
    inner: Mutex<M, RefCell<Bq25895<B>>>,
}

impl<M: RawMutex, B> SharedBq25895<M, B> {
    pub fn new(charger: Bq25895<B>) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(charger)),
        }
    }

    /// Run a sequence of operations under one lock
    ///
    /// # Panics
    ///
    /// Panics if called again from inside `f`, since the session is
    /// already borrowed.
    pub fn lock<R>(&self, f: impl FnOnce(&mut Bq25895<B>) -> R) -> R {
        self.inner.lock(|cell| f(&mut cell.borrow_mut()))
    }

    /// Consume the wrapper and return the session
    pub fn into_inner(self) -> Bq25895<B> {
        self.inner.into_inner().into_inner()
    }
}

impl<M: RawMutex, B: I2cBus> SharedBq25895<M, B> {
    pub fn read_field(&self, field: Field) -> Result<FieldValue, Error<B::Error>> {
        self.lock(|charger| charger.read_field(field))
    }

    /// Read-modify-write of one field, atomic with respect to other users of
    /// this wrapper
    pub fn write_field(&self, field: Field, value: FieldValue) -> Result<(), Error<B::Error>> {
        self.lock(|charger| charger.write_field(field, value))
    }

    pub fn update_bits(&self, register: u8, mask: u8, bits: u8) -> Result<u8, Error<B::Error>> {
        self.lock(|charger| charger.update_bits(register, mask, bits))
    }

    pub fn trigger(&self, field: Field) -> Result<(), Error<B::Error>> {
        self.lock(|charger| charger.trigger(field))
    }
}
