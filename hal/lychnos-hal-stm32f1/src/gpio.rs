//! GPIO bank and pin drivers (CRL/CRH register layout)
//!
//! This generation packs each pin's whole configuration into one 4-bit
//! field, split across two registers at eight pins apiece. Pull direction
//! is not part of the field; a biased input is the shared "input with
//! pull" configuration plus the pull direction written to ODR.

use lychnos_hal::{
    BankId, ClockGate, ConfigError, InputPin, IoPort, OutputPin, Peripheral, PinPreset,
    RegisterFile, Status,
};

use crate::rcc;

/// Bank register word offsets.
mod reg {
    pub const CRL: usize = 0;
    pub const CRH: usize = 1;
    pub const IDR: usize = 2;
    pub const ODR: usize = 3;
}

/// Packed 4-bit pin configuration values (CNF and MODE bits together).
/// Outputs use the 2MHz mode setting.
pub const CFG_IN_ANALOG: u32 = 0x0;
pub const CFG_IN_FLOATING: u32 = 0x4;
pub const CFG_IN_PULL: u32 = 0x8;
pub const CFG_OUT_PUSH_PULL: u32 = 0x2;
pub const CFG_OUT_OPEN_DRAIN: u32 = 0x6;
pub const CFG_ALT_PUSH_PULL: u32 = 0xA;
pub const CFG_ALT_OPEN_DRAIN: u32 = 0xE;

/// Resolve a bank identifier to its APB2 enable/reset bits. Bank F only
/// exists on larger parts than the supported ones.
fn bank_gate(bank: BankId) -> Option<ClockGate> {
    let bit = match bank {
        BankId::A => 2,
        BankId::B => 3,
        BankId::C => 4,
        BankId::D => 5,
        BankId::E => 6,
        BankId::F => return None,
    };
    Some(ClockGate::new(
        rcc::APB2ENR,
        1 << bit,
        rcc::APB2RSTR,
        1 << bit,
    ))
}

/// One GPIO bank of up to 16 pins.
pub struct Gpio<R: RegisterFile> {
    regs: R,
    rcc: R,
    gate: ClockGate,
    status: Status,
}

impl<R: RegisterFile> Gpio<R> {
    /// Resolve `bank` through the fixed lookup table and take ownership of
    /// its register block.
    pub fn configure(regs: R, rcc: R, bank: BankId) -> Result<Self, ConfigError> {
        let gate = bank_gate(bank).ok_or(ConfigError::UnknownBank)?;
        Ok(Self {
            regs,
            rcc,
            gate,
            status: Status::Configured,
        })
    }

    /// Read all 16 pins at once.
    pub fn read_all(&self) -> u16 {
        if self.status.is_error() {
            return 0;
        }
        (self.regs.read(reg::IDR) & 0xFFFF) as u16
    }

    /// Write all 16 pins at once, zeros included.
    pub fn write_all(&self, value: u16) {
        if self.status.is_error() {
            return;
        }
        self.regs.write(reg::ODR, value as u32);
    }

    /// Read a single pin's input state.
    pub fn read(&self, pin: u8) -> bool {
        if self.status.is_error() {
            return false;
        }
        self.regs.read(reg::IDR) & (1 << pin) != 0
    }

    /// Drive a single pin high.
    pub fn set(&self, pin: u8) {
        self.set_mask(1 << pin);
    }

    /// Drive a single pin low.
    pub fn clear(&self, pin: u8) {
        self.clear_mask(1 << pin);
    }

    /// Toggle a single pin.
    pub fn toggle(&self, pin: u8) {
        self.toggle_mask(1 << pin);
    }

    /// Drive every pin in `mask` high, leaving the rest alone.
    pub fn set_mask(&self, mask: u16) {
        if self.status.is_error() {
            return;
        }
        self.regs.modify(reg::ODR, |v| v | mask as u32);
    }

    /// Drive every pin in `mask` low, leaving the rest alone.
    pub fn clear_mask(&self, mask: u16) {
        if self.status.is_error() {
            return;
        }
        self.regs.modify(reg::ODR, |v| v & !(mask as u32));
    }

    /// Toggle every pin in `mask`, leaving the rest alone.
    pub fn toggle_mask(&self, mask: u16) {
        if self.status.is_error() {
            return;
        }
        self.regs.modify(reg::ODR, |v| v ^ mask as u32);
    }

    /// Set a pin's packed 4-bit configuration field (CRL/CRH split at
    /// pin 8).
    pub fn set_pin_cfg(&self, pin: u8, cfg: u32) {
        if self.status.is_error() {
            return;
        }
        let (reg, shift) = if pin < 8 {
            (reg::CRL, pin as u32 * 4)
        } else {
            (reg::CRH, (pin as u32 - 8) * 4)
        };
        self.regs
            .modify(reg, |v| (v & !(0xF << shift)) | (cfg << shift));
    }
}

impl<R: RegisterFile> Peripheral for Gpio<R> {
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

impl<R: RegisterFile> IoPort for Gpio<R> {
    type Word = u16;

    fn read(&mut self) -> u16 {
        self.read_all()
    }

    fn write(&mut self, word: u16) {
        self.write_all(word);
    }

    fn stream(&mut self, words: &[u16]) {
        for &word in words {
            self.write_all(word);
        }
    }
}

/// A single pin on a [`Gpio`] bank.
///
/// Holds a non-owning bank reference; all operations are delegations
/// parameterized by the pin index.
pub struct Pin<'a, R: RegisterFile> {
    bank: &'a Gpio<R>,
    index: u8,
    status: Status,
}

impl<'a, R: RegisterFile> Pin<'a, R> {
    /// Configure a pin from a preset.
    ///
    /// The preset is validated in full before any register is written; a
    /// bad index or a preset this layout cannot express yields a pin with
    /// `Error` status and untouched hardware. Biased output and alternate
    /// presets have no CRL/CRH encoding here, so only the eight plain
    /// presets are supported.
    pub fn new(bank: &'a Gpio<R>, index: u8, preset: PinPreset) -> Self {
        if index > 15 {
            return Self {
                bank,
                index,
                status: Status::Error,
            };
        }
        use PinPreset::*;
        // (cfg, pull level written to ODR for biased inputs)
        let (cfg, bias) = match preset {
            InFloating => (CFG_IN_FLOATING, None),
            InPullUp => (CFG_IN_PULL, Some(true)),
            InPullDown => (CFG_IN_PULL, Some(false)),
            InAnalog => (CFG_IN_ANALOG, None),
            OutPushPull => (CFG_OUT_PUSH_PULL, None),
            OutOpenDrain => (CFG_OUT_OPEN_DRAIN, None),
            AltPushPull => (CFG_ALT_PUSH_PULL, None),
            AltOpenDrain => (CFG_ALT_OPEN_DRAIN, None),
            OutPushPullPullUp | OutPushPullPullDown | OutOpenDrainPullUp
            | OutOpenDrainPullDown | AltPushPullPullUp | AltPushPullPullDown
            | AltOpenDrainPullUp | AltOpenDrainPullDown => {
                return Self {
                    bank,
                    index,
                    status: Status::Error,
                };
            }
        };
        bank.set_pin_cfg(index, cfg);
        match bias {
            Some(true) => bank.set(index),
            Some(false) => bank.clear(index),
            None => {}
        }
        Self {
            bank,
            index,
            status: Status::Configured,
        }
    }

    /// Configuration status of this pin handle (not its input level).
    pub fn status(&self) -> Status {
        self.status
    }

    /// Drive the pin high.
    pub fn set(&mut self) {
        if self.status.is_error() {
            return;
        }
        self.bank.set(self.index);
    }

    /// Drive the pin low.
    pub fn clear(&mut self) {
        if self.status.is_error() {
            return;
        }
        self.bank.clear(self.index);
    }

    /// Toggle the pin.
    pub fn toggle(&mut self) {
        if self.status.is_error() {
            return;
        }
        self.bank.toggle(self.index);
    }

    /// Read the pin's input state.
    pub fn read(&self) -> bool {
        if self.status.is_error() {
            return false;
        }
        self.bank.read(self.index)
    }

    /// Set this pin's packed configuration field.
    pub fn set_cfg(&mut self, cfg: u32) {
        if self.status.is_error() {
            return;
        }
        self.bank.set_pin_cfg(self.index, cfg);
    }
}

impl<R: RegisterFile> OutputPin for Pin<'_, R> {
    fn set_high(&mut self) {
        self.set();
    }

    fn set_low(&mut self) {
        self.clear();
    }

    fn toggle(&mut self) {
        Pin::toggle(self);
    }
}

impl<R: RegisterFile> InputPin for Pin<'_, R> {
    fn is_high(&self) -> bool {
        self.read()
    }
}

impl<R: RegisterFile> embedded_hal::digital::ErrorType for Pin<'_, R> {
    type Error = core::convert::Infallible;
}

impl<R: RegisterFile> embedded_hal::digital::OutputPin for Pin<'_, R> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.clear();
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.set();
        Ok(())
    }
}
