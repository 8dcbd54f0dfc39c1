//! Simulated register blocks for host tests
//!
//! `RamRegs` is plain backing memory with a write log. `SimI2cRegs` layers
//! the hardware behavior the I2C busy-poll loops depend on: start/stop
//! requests complete immediately, transmit-ready flags always read as set,
//! and interrupt-clear writes take effect at once. This keeps the drivers'
//! unbounded polls honest without hanging the test runner.

use core::cell::{Cell, RefCell};

use heapless::Vec;
use lychnos_hal::RegisterFile;

use crate::i2c::bits;
use crate::i2c::reg;

const BLOCK_WORDS: usize = 16;

/// Plain RAM-backed register block with a write log.
pub(crate) struct RamRegs {
    regs: [Cell<u32>; BLOCK_WORDS],
    log: RefCell<Vec<(usize, u32), 64>>,
}

impl RamRegs {
    pub fn new() -> Self {
        Self {
            regs: core::array::from_fn(|_| Cell::new(0)),
            log: RefCell::new(Vec::new()),
        }
    }

    /// Every `(offset, value)` write in order.
    pub fn log(&self) -> Vec<(usize, u32), 64> {
        self.log.borrow().clone()
    }
}

impl RegisterFile for RamRegs {
    fn read(&self, offset: usize) -> u32 {
        self.regs[offset].get()
    }

    fn write(&self, offset: usize, value: u32) {
        let _ = self.log.borrow_mut().push((offset, value));
        self.regs[offset].set(value);
    }
}

/// Register block simulating an always-ready I2C peripheral.
pub(crate) struct SimI2cRegs {
    regs: [Cell<u32>; BLOCK_WORDS],
    log: RefCell<Vec<(usize, u32), 2048>>,
}

impl SimI2cRegs {
    pub fn new() -> Self {
        Self {
            regs: core::array::from_fn(|_| Cell::new(0)),
            log: RefCell::new(Vec::new()),
        }
    }

    /// Every `(offset, value)` write in order.
    pub fn log(&self) -> Vec<(usize, u32), 2048> {
        self.log.borrow().clone()
    }

    pub fn clear_log(&self) {
        self.log.borrow_mut().clear();
    }

    /// Bytes written to TXDR, in order.
    pub fn tx_bytes(&self) -> Vec<u8, 2048> {
        self.log
            .borrow()
            .iter()
            .filter(|(offset, _)| *offset == reg::TXDR)
            .map(|(_, value)| (*value & 0xFF) as u8)
            .collect()
    }

    /// NBYTES field of every CR2 write, in order.
    pub fn cr2_nbytes(&self) -> Vec<u8, 64> {
        self.log
            .borrow()
            .iter()
            .filter(|(offset, _)| *offset == reg::CR2)
            .map(|(_, value)| ((*value >> 16) & 0xFF) as u8)
            .collect()
    }
}

impl RegisterFile for SimI2cRegs {
    fn read(&self, offset: usize) -> u32 {
        match offset {
            // Transmit path always ready, one byte always waiting.
            reg::ISR => self.regs[offset].get() | bits::ISR_TXIS | bits::ISR_TC | bits::ISR_RXNE,
            _ => self.regs[offset].get(),
        }
    }

    fn write(&self, offset: usize, value: u32) {
        let _ = self.log.borrow_mut().push((offset, value));
        let stored = match offset {
            // Hardware completes start/stop requests immediately.
            reg::CR2 => value & !(bits::CR2_START | bits::CR2_STOP),
            // Write-1-to-clear flag register; flags clear at once.
            reg::ICR => 0,
            _ => value,
        };
        self.regs[offset].set(stored);
    }
}
