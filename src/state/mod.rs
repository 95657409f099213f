//! Application state modules
//!
//! Grouped state owned by `RouletteApp`. The spin and generation states own
//! their background tasks and report back through [`StateEvent`]s instead of
//! touching the app directly.

mod generation;
mod spin;
mod ui;

pub use generation::GenerationState;
pub use spin::SpinState;
pub use ui::{Tab, UiState};

/// Events that state poll methods can return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateEvent {
    /// Update the status message
    StatusMessage(String),

    /// Log an error message
    LogError(String),

    /// Log an info message
    LogInfo(String),
}
