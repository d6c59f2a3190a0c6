//! Build errors for navigator construction.

use thiserror::Error;

/// Errors that can occur when building a navigator.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Root node not specified. Call .root(node) before .build()")]
    MissingRoot,

    #[error("Root node must be a sequence node without history")]
    InvalidRoot,

    #[error("Navigator label must not be empty")]
    EmptyLabel,
}
