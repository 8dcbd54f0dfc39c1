//! STM32F3 register-layout HAL
//!
//! Register-level GPIO and I2C drivers for the newer STM32 peripheral
//! generation: per-field GPIO configuration registers (MODER, OTYPER,
//! OSPEEDR, PUPDR, AFR) and the I2C peripheral with a hardware byte
//! counter (NBYTES) capped at 255 bytes per framing unit plus a RELOAD
//! flag for longer transfers.
//!
//! Everything goes through [`lychnos_hal::RegisterFile`], so the drivers
//! build and test on the host against simulated register blocks.

#![no_std]

pub mod gpio;
pub mod i2c;

#[cfg(test)]
pub(crate) mod mock;

pub use gpio::{Gpio, Pin};
pub use i2c::I2c;

/// Peripheral base addresses (AHB2/APB1 domains).
pub mod base {
    pub const GPIOA: usize = 0x4800_0000;
    pub const GPIOB: usize = 0x4800_0400;
    pub const GPIOC: usize = 0x4800_0800;
    pub const GPIOD: usize = 0x4800_0C00;
    pub const GPIOE: usize = 0x4800_1000;
    pub const GPIOF: usize = 0x4800_1400;
    pub const RCC: usize = 0x4002_1000;
    pub const I2C1: usize = 0x4000_5400;

    /// Register block sizes in 32-bit words, for [`lychnos_hal::Mmio`].
    pub const GPIO_WORDS: usize = 10;
    pub const RCC_WORDS: usize = 16;
    pub const I2C_WORDS: usize = 11;
}

/// RCC register word offsets used by the lookup tables.
pub(crate) mod rcc {
    pub const APB1RSTR: usize = 0x10 / 4;
    pub const AHBENR: usize = 0x14 / 4;
    pub const APB1ENR: usize = 0x1C / 4;
    pub const AHBRSTR: usize = 0x28 / 4;
}
