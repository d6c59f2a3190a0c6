//! Navigation controller and its supporting pieces.
//!
//! The navigator owns the current history node, resolves the base node for
//! every publish, and exposes the current node through an observable
//! [`Stage`].

mod controller;
mod error;
mod resolution;
mod settle;
mod stage;

pub use controller::Navigator;
pub use error::NavigationError;
pub use resolution::{Placement, Resolution};
pub use settle::Settled;
pub use stage::{Stage, StageReceiver};
