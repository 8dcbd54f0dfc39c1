//! Peripheral lifecycle status
//!
//! Every peripheral carries one of these values and gates its operations on
//! it. The guard is blanket, not per-operation: a call made against an
//! `Error` peripheral returns a neutral default (0 / false / no side effect)
//! rather than reporting anything. Callers that need to know why use
//! `status()` directly.

/// Lifecycle state shared by all peripheral drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Status {
    /// Unconfigured or failed configuration; every operation is a no-op.
    /// The only way out is re-construction.
    Error,
    /// Constructor succeeded, registers resolved.
    Configured,
    /// Peripheral clock enabled.
    Enabled,
    /// Protocol-level init done; bus transactions allowed.
    Running,
}

impl Status {
    /// Check if the peripheral is in the terminal error state.
    pub fn is_error(&self) -> bool {
        matches!(self, Status::Error)
    }

    /// Check if bus transactions are allowed.
    pub fn is_running(&self) -> bool {
        matches!(self, Status::Running)
    }
}
