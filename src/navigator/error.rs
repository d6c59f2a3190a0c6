//! Navigator errors.

use thiserror::Error;

/// Errors raised when the navigator is used inconsistently with the
/// caller's expectations. These are programmer errors: fatal, never shown
/// to the user, never retried.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("Fatal state error: expected scene {expected} but current scene is {found} (revision {revision})")]
    UnexpectedScene {
        expected: String,
        found: String,
        revision: u64,
    },
}
