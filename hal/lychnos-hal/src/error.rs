//! Configuration errors
//!
//! Only construction can fail with a reportable error; after that, failure
//! is encoded in [`crate::Status`] and operations degrade to no-ops.

/// Error resolving a hardware identifier at construction time.
///
/// Bad pin indices and presets a layout cannot express are not here: pin
/// construction always yields a handle, carrying `Error` status when the
/// input was invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// GPIO bank identifier has no entry in this chip's lookup table.
    UnknownBank,
    /// I2C bus identifier has no entry in this chip's lookup table.
    UnknownBus,
}
