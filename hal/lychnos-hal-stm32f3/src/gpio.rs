//! GPIO bank and pin drivers (MODER-style register layout)
//!
//! A [`Gpio`] owns one bank's register block; any number of [`Pin`] handles
//! borrow it and delegate their bit operations to it.

use lychnos_hal::{
    BankId, ClockGate, ConfigError, InputPin, IoPort, OutputPin, Peripheral, PinPreset,
    RegisterFile, Status,
};

use crate::rcc;

/// Bank register word offsets.
mod reg {
    pub const MODER: usize = 0;
    pub const OTYPER: usize = 1;
    pub const OSPEEDR: usize = 2;
    pub const PUPDR: usize = 3;
    pub const IDR: usize = 4;
    pub const ODR: usize = 5;
    pub const AFRL: usize = 8;
    pub const AFRH: usize = 9;
}

/// MODER field values.
pub const MODE_INPUT: u32 = 0b00;
pub const MODE_OUTPUT: u32 = 0b01;
pub const MODE_ALTERNATE: u32 = 0b10;
pub const MODE_ANALOG: u32 = 0b11;

/// OTYPER field values.
pub const OTYPE_PUSH_PULL: u32 = 0;
pub const OTYPE_OPEN_DRAIN: u32 = 1;

/// OSPEEDR field values. Low speed (<= 2MHz) suits most pins.
pub const SPEED_LOW: u32 = 0b00;
pub const SPEED_MEDIUM: u32 = 0b01;
pub const SPEED_HIGH: u32 = 0b11;

/// PUPDR field values.
pub const PUPD_NONE: u32 = 0b00;
pub const PUPD_UP: u32 = 0b01;
pub const PUPD_DOWN: u32 = 0b10;

/// Resolve a bank identifier to its AHB enable/reset bits.
fn bank_gate(bank: BankId) -> Option<ClockGate> {
    let bit = match bank {
        BankId::A => 17,
        BankId::B => 18,
        BankId::C => 19,
        BankId::D => 20,
        BankId::E => 21,
        BankId::F => 22,
    };
    Some(ClockGate::new(
        rcc::AHBENR,
        1 << bit,
        rcc::AHBRSTR,
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

    /// Set a pin's MODER field (input/output/alternate/analog).
    pub fn set_pin_mode(&self, pin: u8, mode: u32) {
        if self.status.is_error() {
            return;
        }
        let shift = pin as u32 * 2;
        self.regs
            .modify(reg::MODER, |v| (v & !(0b11 << shift)) | (mode << shift));
    }

    /// Set a pin's OTYPER bit (push-pull/open-drain).
    pub fn set_pin_type(&self, pin: u8, otype: u32) {
        if self.status.is_error() {
            return;
        }
        self.regs
            .modify(reg::OTYPER, |v| (v & !(1 << pin)) | (otype << pin));
    }

    /// Set a pin's OSPEEDR field.
    pub fn set_pin_speed(&self, pin: u8, speed: u32) {
        if self.status.is_error() {
            return;
        }
        let shift = pin as u32 * 2;
        self.regs
            .modify(reg::OSPEEDR, |v| (v & !(0b11 << shift)) | (speed << shift));
    }

    /// Set a pin's PUPDR field (pull bias).
    pub fn set_pin_pupd(&self, pin: u8, pupd: u32) {
        if self.status.is_error() {
            return;
        }
        let shift = pin as u32 * 2;
        self.regs
            .modify(reg::PUPDR, |v| (v & !(0b11 << shift)) | (pupd << shift));
    }

    /// Set a pin's alternate-function number (AFRL/AFRH 4-bit field).
    pub fn set_pin_af(&self, pin: u8, af: u32) {
        if self.status.is_error() {
            return;
        }
        let (reg, shift) = if pin < 8 {
            (reg::AFRL, pin as u32 * 4)
        } else {
            (reg::AFRH, (pin as u32 - 8) * 4)
        };
        self.regs
            .modify(reg, |v| (v & !(0xF << shift)) | (af << shift));
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
    /// bad index yields a pin with `Error` status and untouched hardware.
    /// This layout expresses every preset, so configuration succeeds for
    /// any index in range.
    pub fn new(bank: &'a Gpio<R>, index: u8, preset: PinPreset) -> Self {
        if index > 15 {
            return Self {
                bank,
                index,
                status: Status::Error,
            };
        }
        use PinPreset::*;
        let (mode, otype, pupd) = match preset {
            InFloating => (MODE_INPUT, None, Some(PUPD_NONE)),
            InPullUp => (MODE_INPUT, None, Some(PUPD_UP)),
            InPullDown => (MODE_INPUT, None, Some(PUPD_DOWN)),
            InAnalog => (MODE_ANALOG, None, None),
            OutPushPull => (MODE_OUTPUT, Some(OTYPE_PUSH_PULL), Some(PUPD_NONE)),
            OutOpenDrain => (MODE_OUTPUT, Some(OTYPE_OPEN_DRAIN), Some(PUPD_NONE)),
            AltPushPull => (MODE_ALTERNATE, Some(OTYPE_PUSH_PULL), Some(PUPD_NONE)),
            AltOpenDrain => (MODE_ALTERNATE, Some(OTYPE_OPEN_DRAIN), Some(PUPD_NONE)),
            OutPushPullPullUp => (MODE_OUTPUT, Some(OTYPE_PUSH_PULL), Some(PUPD_UP)),
            OutPushPullPullDown => (MODE_OUTPUT, Some(OTYPE_PUSH_PULL), Some(PUPD_DOWN)),
            OutOpenDrainPullUp => (MODE_OUTPUT, Some(OTYPE_OPEN_DRAIN), Some(PUPD_UP)),
            OutOpenDrainPullDown => (MODE_OUTPUT, Some(OTYPE_OPEN_DRAIN), Some(PUPD_DOWN)),
            AltPushPullPullUp => (MODE_ALTERNATE, Some(OTYPE_PUSH_PULL), Some(PUPD_UP)),
            AltPushPullPullDown => (MODE_ALTERNATE, Some(OTYPE_PUSH_PULL), Some(PUPD_DOWN)),
            AltOpenDrainPullUp => (MODE_ALTERNATE, Some(OTYPE_OPEN_DRAIN), Some(PUPD_UP)),
            AltOpenDrainPullDown => (MODE_ALTERNATE, Some(OTYPE_OPEN_DRAIN), Some(PUPD_DOWN)),
        };
        bank.set_pin_mode(index, mode);
        if let Some(otype) = otype {
            bank.set_pin_type(index, otype);
            bank.set_pin_speed(index, SPEED_LOW);
        }
        if let Some(pupd) = pupd {
            bank.set_pin_pupd(index, pupd);
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

    /// Set this pin's MODER field.
    pub fn set_mode(&mut self, mode: u32) {
        if self.status.is_error() {
            return;
        }
        self.bank.set_pin_mode(self.index, mode);
    }

    /// Set this pin's OTYPER bit.
    pub fn set_type(&mut self, otype: u32) {
        if self.status.is_error() {
            return;
        }
        self.bank.set_pin_type(self.index, otype);
    }

    /// Set this pin's OSPEEDR field.
    pub fn set_speed(&mut self, speed: u32) {
        if self.status.is_error() {
            return;
        }
        self.bank.set_pin_speed(self.index, speed);
    }

    /// Set this pin's PUPDR field.
    pub fn set_pupd(&mut self, pupd: u32) {
        if self.status.is_error() {
            return;
        }
        self.bank.set_pin_pupd(self.index, pupd);
    }

    /// Route this pin to alternate function `af`.
    pub fn set_alt_func(&mut self, af: u32) {
        if self.status.is_error() {
            return;
        }
        self.bank.set_pin_af(self.index, af);
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
