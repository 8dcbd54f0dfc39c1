//! Common peripheral I/O capability traits
//!
//! Peripherals that move data (GPIO banks, I2C buses) implement the same
//! operation set over their own word width. The implementing set is fixed
//! per chip, so these are plain generic bounds, never trait objects.

use crate::status::Status;

/// I2C peripheral identifier.
///
/// Resolved to clock/reset masks by the chip HAL's lookup table, same as
/// [`crate::gpio::BankId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusId {
    I2c1,
    I2c2,
}

/// Control operations common to every peripheral driver.
pub trait Peripheral {
    /// Current lifecycle status, as far as the driver knows.
    fn status(&self) -> Status;

    /// Enable the peripheral clock in the RCC.
    fn enable_clock(&mut self);

    /// Pulse the peripheral's reset line in the RCC.
    fn reset(&mut self);

    /// Gate the peripheral clock off.
    fn disable(&mut self);
}

/// Data-plane operations over the peripheral's natural word width.
///
/// A GPIO bank reads and writes its full 16-pin port register
/// (`Word = u16`); an I2C bus moves single bytes (`Word = u8`).
pub trait IoPort: Peripheral {
    /// Natural transfer unit of the peripheral.
    type Word: Copy;

    /// Read one word. Returns the zero value under `Error` status.
    fn read(&mut self) -> Self::Word;

    /// Write one word. Dropped under `Error` status.
    fn write(&mut self, word: Self::Word);

    /// Write a series of words back-to-back.
    fn stream(&mut self, words: &[Self::Word]);
}

/// Host-mode I2C bus transactions.
///
/// A transaction is bracketed by [`start`](I2cBus::start) and
/// [`stop`](I2cBus::stop); the bytes in between go through
/// [`IoPort::write`] or [`IoPort::stream`]. All of these busy-poll the
/// hardware with no timeout: a stalled bus hangs the calling task until an
/// external watchdog steps in. Operations require `Running` status and
/// silently do nothing otherwise.
pub trait I2cBus: IoPort<Word = u8> {
    /// Program timing/filters and enable the peripheral; moves the driver
    /// to `Running`.
    fn initialize(&mut self);

    /// Issue a start condition addressed to `address` (7-bit address
    /// pre-shifted left, R/W bit 0) and block until the hardware accepts it.
    fn start(&mut self, address: u8);

    /// Issue a stop condition, block until acknowledged, and release the
    /// bus (including any outstanding reload state).
    fn stop(&mut self);

    /// Program the byte count of the next framing unit.
    ///
    /// Only meaningful on layouts with a hardware transfer counter; the
    /// default is a no-op.
    fn set_transfer_len(&mut self, len: u8) {
        let _ = len;
    }

    /// Assert or clear the multi-chunk reload flag.
    ///
    /// Callers streaming more than one framing unit assert this before the
    /// first chunk; [`stop`](I2cBus::stop) de-asserts it. Default no-op.
    fn set_reload(&mut self, reload: bool) {
        let _ = reload;
    }
}
