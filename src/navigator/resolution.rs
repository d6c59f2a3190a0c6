//! Base-node resolution for publish operations.
//!
//! Resolution is pure: given the current node and the root, it selects the
//! node a transform is applied to. When the selection runs out of history
//! the result is the terminal sentinel derived from the root.

use crate::core::{HistoryNode, NodeBuilder, Scene, TargetSet};
use std::hash::Hash;

/// How a publish operation picks its base node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution<K: Eq + Hash> {
    /// Use the current node unchanged.
    Direct,

    /// Drop the owning sequence node if it matches a target, exposing what
    /// was beneath it. No match leaves the current node as base.
    ReplaceParent(TargetSet<K>),

    /// Walk back until a node matches a target. `inclusive` also drops the
    /// match itself. No match leaves the current node as base.
    PopToTarget { targets: TargetSet<K>, inclusive: bool },
}

impl<K: Copy + Eq + Hash> Resolution<K> {
    pub fn replace(targets: impl Into<TargetSet<K>>) -> Self {
        Self::ReplaceParent(targets.into())
    }

    pub fn pop_to(targets: impl Into<TargetSet<K>>, inclusive: bool) -> Self {
        Self::PopToTarget {
            targets: targets.into(),
            inclusive,
        }
    }

    /// Single-level pop.
    pub fn pop() -> Self {
        Self::pop_to(TargetSet::empty(), false)
    }

    /// Resolve the base node (pure).
    pub fn resolve<P, C>(&self, current: &HistoryNode<P, C>, root: &HistoryNode<P, C>) -> HistoryNode<P, C>
    where
        P: Scene<Key = K>,
        C: Clone,
    {
        let base = match self {
            Self::Direct => Some(current.clone()),
            Self::ReplaceParent(targets) => replace_parent(current, targets),
            Self::PopToTarget { targets, inclusive } => pop_to_target(current, targets, *inclusive),
        };

        base.unwrap_or_else(|| root.finalized())
    }
}

fn replace_parent<P, C>(current: &HistoryNode<P, C>, targets: &TargetSet<P::Key>) -> Option<HistoryNode<P, C>>
where
    P: Scene,
    C: Clone,
{
    if targets.is_empty() {
        return Some(current.clone());
    }

    match current.owning_sequence() {
        Some(parent) if targets.matches(parent.payload()) => parent.pop().cloned(),
        _ => Some(current.clone()),
    }
}

fn pop_to_target<P, C>(
    current: &HistoryNode<P, C>,
    targets: &TargetSet<P::Key>,
    inclusive: bool,
) -> Option<HistoryNode<P, C>>
where
    P: Scene,
    C: Clone,
{
    if targets.is_empty() {
        return current.pop().cloned();
    }

    let mut cursor = current.pop();
    while let Some(node) = cursor {
        if targets.matches(node.payload()) {
            return if inclusive {
                node.pop().cloned()
            } else {
                Some(node.clone())
            };
        }
        cursor = node.pop();
    }

    // Target not found: degrade to a no-op.
    Some(current.clone())
}

/// Whether a derived node becomes a back-stack entry or an overlay.
///
/// The default is `Overlay`, the usual choice for status updates within a
/// screen. Whole-screen transitions use `Sequence`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Placement {
    Sequence,
    #[default]
    Overlay,
}

impl Placement {
    /// Start deriving a node from `base` with this placement.
    pub fn derive<P: Scene, C: Clone>(self, base: &HistoryNode<P, C>) -> NodeBuilder<P, C> {
        match self {
            Self::Sequence => base.next(),
            Self::Overlay => base.next_child(),
        }
    }
}
