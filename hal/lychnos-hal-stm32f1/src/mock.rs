//! Simulated register blocks for host tests
//!
//! `RamRegs` is plain backing memory with a write log. `SimI2cRegs`
//! layers the hardware behavior the I2C busy-poll loops depend on: the
//! start-bit, address-matched, and transmit-empty flags always read as
//! set, and the host-role flag in SR2 tracks start/stop requests. This
//! keeps the drivers' unbounded polls honest without hanging the test
//! runner.

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
    host: Cell<bool>,
    log: RefCell<Vec<(usize, u32), 2048>>,
}

impl SimI2cRegs {
    pub fn new() -> Self {
        Self {
            regs: core::array::from_fn(|_| Cell::new(0)),
            host: Cell::new(false),
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

    /// Whether the peripheral currently holds the bus as host.
    pub fn in_host_role(&self) -> bool {
        self.host.get()
    }

    /// Bytes written to the data register, in order.
    pub fn tx_bytes(&self) -> Vec<u8, 2048> {
        self.log
            .borrow()
            .iter()
            .filter(|(offset, _)| *offset == reg::DR)
            .map(|(_, value)| (*value & 0xFF) as u8)
            .collect()
    }
}

impl RegisterFile for SimI2cRegs {
    fn read(&self, offset: usize) -> u32 {
        match offset {
            // Event flags the driver polls for are always ready.
            reg::SR1 => {
                self.regs[offset].get() | bits::SR1_SB | bits::SR1_ADDR | bits::SR1_TXE
            }
            // Host role tracks start/stop requests.
            reg::SR2 => {
                if self.host.get() {
                    bits::SR2_MSL
                } else {
                    0
                }
            }
            _ => self.regs[offset].get(),
        }
    }

    fn write(&self, offset: usize, value: u32) {
        let _ = self.log.borrow_mut().push((offset, value));
        let stored = match offset {
            // Hardware completes start/stop requests immediately.
            reg::CR1 => {
                if value & bits::CR1_START != 0 {
                    self.host.set(true);
                }
                if value & bits::CR1_STOP != 0 {
                    self.host.set(false);
                }
                value & !(bits::CR1_START | bits::CR1_STOP)
            }
            _ => value,
        };
        self.regs[offset].set(stored);
    }
}
