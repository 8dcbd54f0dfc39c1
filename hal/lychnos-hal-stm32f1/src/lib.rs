//! STM32F1 register-layout HAL
//!
//! Register-level GPIO and I2C drivers for the older STM32 peripheral
//! generation: packed 4-bit pin configuration fields (CRL/CRH) instead of
//! per-field registers, and the event-flag I2C peripheral (SR1/SR2) that
//! streams arbitrary-length frames without a hardware byte counter.
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

/// Peripheral base addresses (APB2/APB1 domains).
pub mod base {
    pub const GPIOA: usize = 0x4001_0800;
    pub const GPIOB: usize = 0x4001_0C00;
    pub const GPIOC: usize = 0x4001_1000;
    pub const GPIOD: usize = 0x4001_1400;
    pub const GPIOE: usize = 0x4001_1800;
    pub const GPIOF: usize = 0x4001_1C00;
    pub const RCC: usize = 0x4002_1000;
    pub const I2C1: usize = 0x4000_5400;

    /// Register block sizes in 32-bit words, for [`lychnos_hal::Mmio`].
    pub const GPIO_WORDS: usize = 7;
    pub const RCC_WORDS: usize = 16;
    pub const I2C_WORDS: usize = 9;
}

/// RCC register word offsets used by the lookup tables.
pub(crate) mod rcc {
    pub const APB2RSTR: usize = 0x0C / 4;
    pub const APB1RSTR: usize = 0x10 / 4;
    pub const APB2ENR: usize = 0x18 / 4;
    pub const APB1ENR: usize = 0x1C / 4;
}
