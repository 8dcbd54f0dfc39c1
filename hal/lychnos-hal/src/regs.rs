//! Register block access
//!
//! Drivers in the chip HALs never hold raw addresses directly; they go
//! through [`RegisterFile`], a word-indexed view of one peripheral's
//! register block. On hardware that view is [`Mmio`]; in tests it is a
//! RAM-backed mock that simulates the flag behavior the busy-poll loops
//! wait on.

/// Word-indexed access to a peripheral register block.
///
/// Offsets count 32-bit words from the block base. Methods take `&self`:
/// MMIO writes do not need exclusive access, and this lets many pin
/// handles share one bank.
pub trait RegisterFile {
    /// Read the register at `offset` words from the base.
    fn read(&self, offset: usize) -> u32;

    /// Write the register at `offset` words from the base.
    fn write(&self, offset: usize, value: u32);

    /// Read-modify-write the register at `offset`.
    fn modify(&self, offset: usize, f: impl FnOnce(u32) -> u32) {
        let value = self.read(offset);
        self.write(offset, f(value));
    }
}

/// Memory-mapped register block.
///
/// A thin handle over a peripheral base address. The composition root
/// builds these once at startup and hands them to the drivers.
pub struct Mmio {
    base: *mut u32,
    words: usize,
}

impl Mmio {
    /// Create a register file over `words` registers starting at `base`.
    ///
    /// # Safety
    ///
    /// `base` must be the base address of a live peripheral register block
    /// spanning at least `words` 32-bit registers. Handles that alias one
    /// block (several drivers share the RCC) must not interleave their
    /// read-modify-write sequences; single-executor composition satisfies
    /// this.
    #[allow(unsafe_code)]
    pub const unsafe fn new(base: *mut u32, words: usize) -> Self {
        Self { base, words }
    }
}

// One handle per register block; the pointer never escapes.
#[allow(unsafe_code)]
unsafe impl Send for Mmio {}

#[allow(unsafe_code)]
impl RegisterFile for Mmio {
    fn read(&self, offset: usize) -> u32 {
        debug_assert!(offset < self.words);
        unsafe { self.base.add(offset).read_volatile() }
    }

    fn write(&self, offset: usize, value: u32) {
        debug_assert!(offset < self.words);
        unsafe { self.base.add(offset).write_volatile(value) }
    }
}

/// Resolved clock-enable and reset registers for one peripheral.
///
/// The chip HAL's lookup table maps a bank/bus identifier to the RCC
/// register offsets and bit masks gathered here; the control operations
/// are plain read-modify-write sequences against the RCC register file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockGate {
    /// Word offset of the enable register within the RCC block.
    pub enable_offset: usize,
    /// Bit mask of the enable bit.
    pub enable_mask: u32,
    /// Word offset of the reset register within the RCC block.
    pub reset_offset: usize,
    /// Bit mask of the reset bit.
    pub reset_mask: u32,
}

impl ClockGate {
    pub const fn new(
        enable_offset: usize,
        enable_mask: u32,
        reset_offset: usize,
        reset_mask: u32,
    ) -> Self {
        Self {
            enable_offset,
            enable_mask,
            reset_offset,
            reset_mask,
        }
    }

    /// Gate the peripheral clock on.
    pub fn enable<R: RegisterFile>(&self, rcc: &R) {
        rcc.modify(self.enable_offset, |v| v | self.enable_mask);
    }

    /// Gate the peripheral clock off.
    pub fn disable<R: RegisterFile>(&self, rcc: &R) {
        rcc.modify(self.enable_offset, |v| v & !self.enable_mask);
    }

    /// Pulse the peripheral's reset line.
    pub fn reset_pulse<R: RegisterFile>(&self, rcc: &R) {
        rcc.modify(self.reset_offset, |v| v | self.reset_mask);
        rcc.modify(self.reset_offset, |v| v & !self.reset_mask);
    }
}
