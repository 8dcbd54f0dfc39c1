//! GPIO pin abstractions
//!
//! Pin traits plus the chip-independent identifiers used by the bank/pin
//! lookup tables in the chip HALs.

/// Digital output pin
pub trait OutputPin {
    /// Drive the pin high (logic 1)
    fn set_high(&mut self);

    /// Drive the pin low (logic 0)
    fn set_low(&mut self);

    /// Toggle the pin state
    fn toggle(&mut self);

    /// Drive the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }
}

/// Digital input pin
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// GPIO bank identifier.
///
/// Each chip HAL resolves this to enable/reset register offsets and bit
/// masks through its own fixed table; an identifier missing from the table
/// is a `ConfigError::UnknownBank`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BankId {
    A,
    B,
    C,
    D,
    E,
    F,
}

/// Quick-init pin presets.
///
/// Each preset maps to a fixed sequence of register-field writes in the
/// chip HAL. The old register layout (F1) cannot express the biased
/// output/alternate variants; a pin constructed with one of those there
/// comes back with `Error` status and untouched registers.
///
/// Output speed is not part of the preset; the low-speed default is fine
/// for most purposes and can be raised afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinPreset {
    InFloating,
    InPullUp,
    InPullDown,
    InAnalog,
    OutPushPull,
    OutOpenDrain,
    AltPushPull,
    AltOpenDrain,
    OutPushPullPullUp,
    OutPushPullPullDown,
    OutOpenDrainPullUp,
    OutOpenDrainPullDown,
    AltPushPullPullUp,
    AltPushPullPullDown,
    AltOpenDrainPullUp,
    AltOpenDrainPullDown,
}
