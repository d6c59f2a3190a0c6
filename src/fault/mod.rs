//! Fault taxonomy and classifier.
//!
//! Raw failures from external collaborators (network, disk, parsing) are
//! mapped into a closed set of fault kinds usable for rendering and retry
//! decisions. Classification is pure and total.

mod classify;
mod kind;

pub use classify::{classify, Classifier, FailureOrigin, HttpFailure, RawFailure};
pub use kind::{Cause, Fault, FaultKind};
