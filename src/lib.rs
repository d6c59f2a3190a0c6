//! Waymark: immutable navigation history with type-directed back navigation
//!
//! Waymark keeps the navigation state of an application as a persistent chain
//! of immutable history nodes. A single navigator owns the current node,
//! derives new nodes from a resolved base, and broadcasts every change to
//! observers.
//!
//! # Core Concepts
//!
//! - **Scene**: Closed set of payload variants, identified by a cheap key
//! - **History nodes**: Sequence nodes form the back stack; overlay nodes
//!   layer transient loading or error states on top of them
//! - **Navigator**: Publish, pop-to-target and replace operations
//! - **Faults**: Closed failure taxonomy plus a classifier for raw errors
//!
//! # Example
//!
//! ```rust
//! use waymark::core::HistoryNode;
//! use waymark::fault::{FailureOrigin, HttpFailure};
//! use waymark::navigator::Placement;
//! use waymark::{scene_enum, NavigatorBuilder};
//!
//! scene_enum! {
//!     enum Screen {
//!         Home,
//!         Search { query: String },
//!     }
//!     key: ScreenKey
//! }
//!
//! let navigator = NavigatorBuilder::new()
//!     .root(HistoryNode::root(Screen::Home, ()))
//!     .label("Main")
//!     .build()
//!     .unwrap();
//!
//! navigator.navigate(Screen::Search { query: "rust".into() });
//! navigator.publish_working(Placement::Overlay);
//! navigator.publish_failure(HttpFailure::new(503, "down"), FailureOrigin::RemoteCall, Placement::Overlay);
//!
//! assert_eq!(
//!     navigator.current().debug_trail(),
//!     "[*] --> [Home@Idle] --> [Search@Idle -> Search@Server]"
//! );
//!
//! let home = navigator.back();
//! assert!(!home.has_previous());
//! ```

pub mod builder;
pub mod core;
pub mod fault;
pub mod navigator;
pub mod render;

// Re-export commonly used types
pub use builder::{BuildError, NavigatorBuilder};
pub use core::{HistoryNode, Scene, Status, TargetSet};
pub use fault::{classify, Fault, FaultKind};
pub use navigator::{Navigator, Placement, Resolution};
