//! Simulated BQ25895 on a recording bus

use trickle_core::{reg, strobe_mask};
use trickle_hal::I2cBus;

use super::DEFAULT_ADDRESS;

/// Bus operation seen by the simulated device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    /// Read starting at a register
    Read(u8),
    /// Single register write
    Write(u8, u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockError {
    Nack,
}

/// Register file with strobe auto-clear, a latched fault register and
/// failure injection
pub struct MockBus {
    pub address: u8,
    pub regs: [u8; reg::COUNT],
    /// Fault byte returned by the next REG0C read, before the live value
    pub latched_fault: Option<u8>,
    pub fail_reads: bool,
    pub fail_writes: bool,
    pub log: heapless::Vec<Op, 128>,
    /// Strobe bits set by the host, cleared after the next read
    running: [u8; reg::COUNT],
}

impl MockBus {
    pub fn new() -> Self {
        Self::with_registers([0; reg::COUNT])
    }

    pub fn with_registers(regs: [u8; reg::COUNT]) -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            regs,
            latched_fault: None,
            fail_reads: false,
            fail_writes: false,
            log: heapless::Vec::new(),
            running: [0; reg::COUNT],
        }
    }

    pub fn writes(&self) -> usize {
        self.log
            .iter()
            .filter(|op| matches!(op, Op::Write(..)))
            .count()
    }

    fn record(&mut self, op: Op) {
        let _ = self.log.push(op);
    }

    fn read_one(&mut self, register: usize) -> Result<u8, MockError> {
        if register == reg::FAULT as usize {
            if let Some(latched) = self.latched_fault.take() {
                return Ok(latched);
            }
        }

        let value = *self.regs.get(register).ok_or(MockError::Nack)?;
        // The action completes once the host has seen it running
        self.regs[register] &= !self.running[register];
        self.running[register] = 0;
        Ok(value)
    }
}

impl I2cBus for MockBus {
    type Error = MockError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), MockError> {
        if address != self.address || self.fail_writes {
            return Err(MockError::Nack);
        }
        let (&register, values) = data.split_first().ok_or(MockError::Nack)?;
        for (i, &value) in values.iter().enumerate() {
            let r = register as usize + i;
            *self.regs.get_mut(r).ok_or(MockError::Nack)? = value;
            self.running[r] = value & strobe_mask(r as u8);
            self.record(Op::Write(r as u8, value));
        }
        Ok(())
    }

    fn read(&mut self, _address: u8, _buf: &mut [u8]) -> Result<(), MockError> {
        // Register reads always go through write_read
        Err(MockError::Nack)
    }

    fn write_read(&mut self, address: u8, write: &[u8], read: &mut [u8]) -> Result<(), MockError> {
        if address != self.address || self.fail_reads {
            return Err(MockError::Nack);
        }
        let register = *write.first().ok_or(MockError::Nack)?;
        self.record(Op::Read(register));
        for (i, byte) in read.iter_mut().enumerate() {
            *byte = self.read_one(register as usize + i)?;
        }
        Ok(())
    }
}
