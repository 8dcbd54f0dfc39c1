//! I2C bus driver (NBYTES/RELOAD register layout)
//!
//! Host-only, 7-bit addressing, write-dominant. This peripheral generation
//! counts bytes in hardware: NBYTES caps one framing unit at 255 bytes, so
//! longer transfers assert RELOAD and feed the counter chunk by chunk.
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
    pub const TIMINGR: usize = 4;
    pub const ISR: usize = 6;
    pub const ICR: usize = 7;
    pub const RXDR: usize = 9;
    pub const TXDR: usize = 10;
}

/// Register bit masks.
pub(crate) mod bits {
    pub const CR1_PE: u32 = 1 << 0;
    pub const CR1_DNF: u32 = 0xF << 8;
    pub const CR1_ANFOFF: u32 = 1 << 12;
    pub const CR1_SMBHEN: u32 = 1 << 20;
    pub const CR1_SMBDEN: u32 = 1 << 21;

    pub const CR2_SADD: u32 = 0x3FF;
    pub const CR2_RD_WRN: u32 = 1 << 10;
    pub const CR2_START: u32 = 1 << 13;
    pub const CR2_STOP: u32 = 1 << 14;
    pub const CR2_NACK: u32 = 1 << 15;
    pub const CR2_NBYTES_POS: u32 = 16;
    pub const CR2_NBYTES: u32 = 0xFF << CR2_NBYTES_POS;
    pub const CR2_RELOAD: u32 = 1 << 24;
    pub const CR2_AUTOEND: u32 = 1 << 25;

    pub const ISR_TXIS: u32 = 1 << 1;
    pub const ISR_RXNE: u32 = 1 << 2;
    pub const ISR_TC: u32 = 1 << 6;
    pub const ISR_TCR: u32 = 1 << 7;

    pub const ICR_ADDRCF: u32 = 1 << 3;
    pub const ICR_NACKCF: u32 = 1 << 4;
    pub const ICR_STOPCF: u32 = 1 << 5;
    pub const ICR_BERRCF: u32 = 1 << 8;
    pub const ICR_ARLOCF: u32 = 1 << 9;
    pub const ICR_OVRCF: u32 = 1 << 10;
    pub const ICR_PECCF: u32 = 1 << 11;
    pub const ICR_TIMOUTCF: u32 = 1 << 12;
    pub const ICR_ALERTCF: u32 = 1 << 13;

    pub const ICR_ALL: u32 = ICR_ADDRCF
        | ICR_NACKCF
        | ICR_STOPCF
        | ICR_BERRCF
        | ICR_ARLOCF
        | ICR_OVRCF
        | ICR_PECCF
        | ICR_TIMOUTCF
        | ICR_ALERTCF;
}

/// Fixed timing value: roughly 1MHz from a 48MHz kernel clock.
const TIMING: u32 = 0x5010_0103;
/// Reserved TIMINGR bits that must be preserved.
const TIMING_RESERVED: u32 = 0x0F00_0000;

/// Hardware byte-counter limit per framing unit.
const MAX_CHUNK: usize = 255;

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

    /// Program the byte count of the next framing unit.
    fn write_transfer_len(&self, len: u8) {
        self.regs.modify(reg::CR2, |v| {
            (v & !bits::CR2_NBYTES) | ((len as u32) << bits::CR2_NBYTES_POS)
        });
    }

    /// Assert or clear the RELOAD flag.
    fn write_reload(&self, reload: bool) {
        self.regs.modify(reg::CR2, |v| {
            if reload {
                v | bits::CR2_RELOAD
            } else {
                v & !bits::CR2_RELOAD
            }
        });
    }

    /// Transmit one byte and wait for the hardware to take it.
    fn write_byte(&self, byte: u8) {
        self.regs
            .modify(reg::TXDR, |v| (v & 0xFFFF_FF00) | byte as u32);
        while self.regs.read(reg::ISR) & (bits::ISR_TXIS | bits::ISR_TC | bits::ISR_TCR) == 0 {}
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

    /// Wait for a received byte and read it.
    fn read(&mut self) -> u8 {
        if !self.status.is_running() {
            return 0;
        }
        while self.regs.read(reg::ISR) & bits::ISR_RXNE == 0 {}
        (self.regs.read(reg::RXDR) & 0xFF) as u8
    }

    fn write(&mut self, word: u8) {
        if !self.status.is_running() {
            return;
        }
        self.write_byte(word);
    }

    /// Stream bytes in NBYTES-sized chunks.
    ///
    /// The caller owns the framing: RELOAD must already be asserted when
    /// the transfer spans more than one chunk, and `stop()` releases it.
    fn stream(&mut self, words: &[u8]) {
        if !self.status.is_running() {
            return;
        }
        let mut rest = words;
        while rest.len() > MAX_CHUNK {
            self.write_transfer_len(MAX_CHUNK as u8);
            for &byte in &rest[..MAX_CHUNK] {
                self.write_byte(byte);
            }
            rest = &rest[MAX_CHUNK..];
        }
        if !rest.is_empty() {
            self.write_transfer_len(rest.len() as u8);
            for &byte in rest {
                self.write_byte(byte);
            }
        }
    }
}

impl<R: RegisterFile> I2cBus for I2c<R> {
    fn initialize(&mut self) {
        if self.status.is_error() {
            return;
        }
        // Disable the peripheral while reconfiguring.
        self.regs.modify(reg::CR1, |v| v & !bits::CR1_PE);
        // Analog filter on, no digital filter, no SMBus.
        self.regs.modify(reg::CR1, |v| {
            v & !(bits::CR1_DNF | bits::CR1_ANFOFF | bits::CR1_SMBHEN | bits::CR1_SMBDEN)
        });
        // Host write mode, no leftover transfer state.
        self.regs.modify(reg::CR2, |v| {
            v & !(bits::CR2_RD_WRN | bits::CR2_NACK | bits::CR2_RELOAD | bits::CR2_AUTOEND)
        });
        // Clear every stale event flag.
        self.regs.modify(reg::ICR, |v| v | bits::ICR_ALL);
        // Program the fixed timing value, preserving reserved bits.
        self.regs
            .modify(reg::TIMINGR, |v| (v & TIMING_RESERVED) | TIMING);
        self.regs.modify(reg::CR1, |v| v | bits::CR1_PE);
        self.status = Status::Running;
    }

    fn start(&mut self, address: u8) {
        if !self.status.is_running() {
            return;
        }
        self.regs
            .modify(reg::CR2, |v| (v & !bits::CR2_SADD) | address as u32);
        self.regs.modify(reg::CR2, |v| v | bits::CR2_START);
        while self.regs.read(reg::CR2) & bits::CR2_START != 0 {}
    }

    fn stop(&mut self) {
        if !self.status.is_running() {
            return;
        }
        self.regs.modify(reg::CR2, |v| v | bits::CR2_STOP);
        while self.regs.read(reg::CR2) & bits::CR2_STOP != 0 {}
        // Acknowledge the stop event and make sure RELOAD is released.
        self.regs.modify(reg::ICR, |v| v | bits::ICR_STOPCF);
        while self.regs.read(reg::ICR) & bits::ICR_STOPCF != 0 {}
        self.write_reload(false);
    }

    fn set_transfer_len(&mut self, len: u8) {
        if !self.status.is_running() {
            return;
        }
        self.write_transfer_len(len);
    }

    fn set_reload(&mut self, reload: bool) {
        if !self.status.is_running() {
            return;
        }
        self.write_reload(reload);
    }
}
