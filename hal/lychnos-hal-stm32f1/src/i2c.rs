//! I2C bus driver (SR1/SR2 register layout)
//!
//! Host-only, 7-bit addressing, write-dominant. This peripheral
//! generation has no hardware byte counter: a frame is opened with a
//! start condition and bytes are clocked out one at a time until the stop
//! condition, so streaming is a plain loop. Receiving is not implemented
//! on this generation.
//!
//! Every wait here is a busy-poll with no timeout. A stalled or
//! disconnected bus hangs the calling task; recovery is an external
//! watchdog's job.

use lychnos_hal::{BusId, ClockGate, ConfigError, I2cBus, IoPort, Peripheral, RegisterFile, Status};

use crate::rcc;

/// Register word offsets.
pub(crate) mod reg {
    pub const CR1: usize = 0;
    pub const CR2: usize = 1;
    pub const DR: usize = 4;
    pub const SR1: usize = 5;
    pub const SR2: usize = 6;
    pub const CCR: usize = 7;
}

/// Register bit masks.
pub(crate) mod bits {
    pub const CR1_PE: u32 = 1 << 0;
    pub const CR1_START: u32 = 1 << 8;
    pub const CR1_STOP: u32 = 1 << 9;
    pub const CR1_SWRST: u32 = 1 << 15;

    pub const CR2_FREQ: u32 = 0x3F;

    pub const CCR_CCR: u32 = 0xFFF;
    pub const CCR_FS: u32 = 1 << 15;

    pub const SR1_SB: u32 = 1 << 0;
    pub const SR1_ADDR: u32 = 1 << 1;
    pub const SR1_TXE: u32 = 1 << 7;

    pub const SR2_MSL: u32 = 1 << 0;
}

/// Peripheral kernel clock in MHz, programmed into the FREQ field.
const FREQ_MHZ: u32 = 36;
/// Fast-mode clock-control value for roughly 400kHz at 36MHz.
const CCR_VALUE: u32 = 0x24;

/// One I2C peripheral in host mode.
pub struct I2c<R: RegisterFile> {
    regs: R,
    rcc: R,
    gate: ClockGate,
    status: Status,
}

impl<R: RegisterFile> I2c<R> {
    /// Resolve `bus` through the fixed lookup table and take ownership of
    /// its register block. Only I2C1 is wired on supported boards.
    pub fn configure(regs: R, rcc: R, bus: BusId) -> Result<Self, ConfigError> {
        let gate = match bus {
            BusId::I2c1 => ClockGate::new(rcc::APB1ENR, 1 << 21, rcc::APB1RSTR, 1 << 21),
            BusId::I2c2 => return Err(ConfigError::UnknownBus),
        };
        Ok(Self {
            regs,
            rcc,
            gate,
            status: Status::Configured,
        })
    }

    /// Transmit one byte and wait for the data register to empty.
    fn write_byte(&self, byte: u8) {
        self.regs
            .modify(reg::DR, |v| (v & 0xFF00) | byte as u32);
        while self.regs.read(reg::SR1) & bits::SR1_TXE == 0 {}
    }
}

impl<R: RegisterFile> Peripheral for I2c<R> {
    fn status(&self) -> Status {
        self.status
    }

    fn enable_clock(&mut self) {
        if self.status.is_error() {
            return;
        }
        self.gate.enable(&self.rcc);
        if self.status == Status::Configured {
            self.status = Status::Enabled;
        }
    }

    fn reset(&mut self) {
        if self.status.is_error() {
            return;
        }
        self.gate.reset_pulse(&self.rcc);
    }

    fn disable(&mut self) {
        if self.status.is_error() {
            return;
        }
        self.gate.disable(&self.rcc);
    }
}

impl<R: RegisterFile> IoPort for I2c<R> {
    type Word = u8;

    /// Receive path is not implemented on this generation.
    fn read(&mut self) -> u8 {
        0
    }

    fn write(&mut self, word: u8) {
        if !self.status.is_running() {
            return;
        }
        self.write_byte(word);
    }

    /// Stream bytes as one unbroken sequence; no chunking on this
    /// generation.
    fn stream(&mut self, words: &[u8]) {
        if !self.status.is_running() {
            return;
        }
        for &byte in words {
            self.write_byte(byte);
        }
    }
}

impl<R: RegisterFile> I2cBus for I2c<R> {
    fn initialize(&mut self) {
        if self.status.is_error() {
            return;
        }
        // Software-reset pulse clears any stuck bus state.
        self.regs.modify(reg::CR1, |v| v | bits::CR1_SWRST);
        self.regs.modify(reg::CR1, |v| v & !bits::CR1_SWRST);
        // Disable the peripheral while reconfiguring.
        self.regs.modify(reg::CR1, |v| v & !bits::CR1_PE);
        // Kernel clock frequency, then fast-mode timing.
        self.regs
            .modify(reg::CR2, |v| (v & !bits::CR2_FREQ) | FREQ_MHZ);
        self.regs
            .modify(reg::CCR, |v| (v & !bits::CCR_CCR) | bits::CCR_FS | CCR_VALUE);
        self.regs.modify(reg::CR1, |v| v | bits::CR1_PE);
        self.status = Status::Running;
    }

    /// Claim the bus as host and address a device for writing.
    ///
    /// `address` is the 7-bit device address already shifted into bits
    /// 7:1; the R/W bit stays 0 because this driver only writes.
    fn start(&mut self, address: u8) {
        if !self.status.is_running() {
            return;
        }
        self.regs.modify(reg::CR1, |v| v | bits::CR1_START);
        while self.regs.read(reg::SR1) & bits::SR1_SB == 0 {}
        // Wait for the peripheral to take the host role.
        while self.regs.read(reg::SR2) & bits::SR2_MSL == 0 {}
        self.regs.write(reg::DR, address as u32);
        while self.regs.read(reg::SR1) & bits::SR1_ADDR == 0 {}
        // Reading SR2 clears the address-matched flag.
        let _ = self.regs.read(reg::SR2);
    }

    fn stop(&mut self) {
        if !self.status.is_running() {
            return;
        }
        self.regs.modify(reg::CR1, |v| v | bits::CR1_STOP);
        // The stop condition completes when the host role is released.
        while self.regs.read(reg::SR2) & bits::SR2_MSL != 0 {}
    }
}
