//! Core history types.
//!
//! This module contains the pure part of the navigator:
//! - Scene payloads via the `Scene` trait
//! - Target sets for type-directed search
//! - Immutable history nodes and their debug trail
//!
//! Nothing here publishes or performs side effects. Deriving a node only
//! builds a new value; the navigator decides when it becomes current.

mod node;
mod scene;
mod target;
mod trail;

pub use node::{Action, HistoryNode, NodeBuilder, Status};
pub use scene::Scene;
pub use target::TargetSet;
pub use trail::{Trail, TrailSegment};
