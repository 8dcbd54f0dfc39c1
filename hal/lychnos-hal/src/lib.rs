//! Lychnos Hardware Abstraction Layer
//!
//! This crate defines the peripheral abstraction shared by the chip-specific
//! HALs (STM32F1, STM32F3). The peripheral set is fixed per target, so the
//! application picks one chip crate at composition time; there is no runtime
//! dispatch between register layouts.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (lychnos-firmware)         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  lychnos-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ lychnos-hal-  │       │ lychnos-hal-  │
//! │   stm32f1     │       │   stm32f3     │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`io::Peripheral`], [`io::IoPort`] - common control and data operations
//! - [`io::I2cBus`] - I2C bus transactions (start/write/stream/stop)
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - digital I/O
//! - [`regs::RegisterFile`] - word-indexed register block access

#![no_std]
#![deny(unsafe_code)]

pub mod error;
pub mod gpio;
pub mod io;
pub mod regs;
pub mod status;

// Re-export key types at crate root for convenience
pub use error::ConfigError;
pub use gpio::{BankId, InputPin, OutputPin, PinPreset};
pub use io::{BusId, I2cBus, IoPort, Peripheral};
pub use regs::{ClockGate, Mmio, RegisterFile};
pub use status::Status;
