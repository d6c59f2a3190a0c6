//! Debug trail of a history chain.
//!
//! A trail is the chain reachable from a node through `previous`, oldest
//! first. Because overlays are flattened, a trail shows at most the latest
//! overlay, sitting on top of its owning sequence node.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// One node in a trail.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrailSegment {
    /// Scene variant name
    pub scene: String,
    /// Fault kind if the node carries one, otherwise its status
    pub marker: String,
    pub overlay: bool,
    pub revision: u64,
    pub at: DateTime<Utc>,
}

/// Ordered trail of history nodes, oldest first.
///
/// Displays as a single line:
/// `[*] --> [Home@Idle] --> [Search@Idle -> Search@Network]`, where `-->`
/// opens a sequence node and `->` attaches an overlay to it.
///
/// # Example
///
/// ```rust
/// use waymark::core::{HistoryNode, Status};
/// use waymark::scene_enum;
///
/// scene_enum! {
///     enum Screen {
///         Home,
///         Search,
///     }
///     key: ScreenKey
/// }
///
/// let node = HistoryNode::root(Screen::Home, ())
///     .next()
///     .payload(Screen::Search)
///     .build()
///     .next_child()
///     .status(Status::Working)
///     .build();
///
/// let trail = node.trail();
/// assert_eq!(trail.len(), 3);
/// assert_eq!(trail.to_string(), "[*] --> [Home@Idle] --> [Search@Idle -> Search@Working]");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trail {
    segments: Vec<TrailSegment>,
}

impl Trail {
    pub(crate) fn new(segments: Vec<TrailSegment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[TrailSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Scene names in order, oldest first.
    pub fn scenes(&self) -> Vec<&str> {
        self.segments.iter().map(|s| s.scene.as_str()).collect()
    }

    /// Time between the oldest and the newest node in the trail.
    ///
    /// Returns `None` for an empty trail or when clocks went backwards.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.segments.first()?, self.segments.last()?);
        last.at.signed_duration_since(first.at).to_std().ok()
    }
}

impl fmt::Display for Trail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[*")?;
        for segment in &self.segments {
            if segment.overlay {
                f.write_str(" -> ")?;
            } else {
                f.write_str("] --> [")?;
            }
            write!(f, "{}@{}", segment.scene, segment.marker)?;
        }
        f.write_str("]")
    }
}
