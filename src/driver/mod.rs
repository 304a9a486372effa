//! Interactive console planner
//!
//! Collects the inputs for one calculation at a time, evaluates it and prints
//! the result. Failures are reported and the menu comes back.

mod menu;
mod prompt;
mod session;

pub use menu::{MenuChoice, EXIT_CODE};
pub use prompt::Prompter;
pub use session::Session;

use thiserror::Error;

use crate::error::TvmError;

/// Anything that can interrupt one round of the interactive session
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input ended")]
    EndOfInput,

    #[error("No value given for \"{prompt}\" and no default available")]
    MissingValue { prompt: String },

    #[error("Not a number: \"{input}\"")]
    InvalidNumber { input: String },

    #[error(transparent)]
    Calculation(#[from] TvmError),
}

impl DriverError {
    /// Errors after which the session cannot continue
    pub fn is_fatal(&self) -> bool {
        matches!(self, DriverError::Io(_) | DriverError::EndOfInput)
    }
}
