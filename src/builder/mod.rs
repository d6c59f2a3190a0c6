//! Builder API for ergonomic navigator construction.
//!
//! This module provides a fluent builder for navigators and the
//! `scene_enum!` macro for defining scene payloads with minimal boilerplate.

pub mod error;
pub mod macros;
pub mod navigator;

pub use error::BuildError;
pub use navigator::{NavigatorBuilder, DEFAULT_LABEL};
