//! `embedded-hal` bus adapter
//!
//! Wraps any `embedded_hal::i2c::I2c` master so a charger session can be
//! built straight from a platform HAL's I2C peripheral.

use embedded_hal::i2c::I2c;
use trickle_hal::I2cBus;

/// [`I2cBus`] over an `embedded-hal` 1.0 I2C master
pub struct HalBus<I2C> {
    i2c: I2C,
}

impl<I2C> HalBus<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Borrow the wrapped peripheral
    pub fn inner_mut(&mut self) -> &mut I2C {
        &mut self.i2c
    }

    /// Consume the adapter and return the wrapped peripheral
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> I2cBus for HalBus<I2C> {
    type Error = I2C::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        I2c::write(&mut self.i2c, address, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        I2c::read(&mut self.i2c, address, buf)
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        I2c::write_read(&mut self.i2c, address, write_data, read_buf)
    }
}
