//! Immutable, structurally shared history nodes.
//!
//! A node is one point in the navigation history. Nodes form a persistent
//! singly linked chain through `previous`; deriving a new node never touches
//! the old one, so observers holding an older node keep a valid snapshot.
//!
//! Two categories exist:
//!
//! - **Sequence nodes** are real back-stack entries.
//! - **Overlay nodes** (children) are transient states layered on a sequence
//!   node, such as a loading indicator or an inline error.
//!
//! An overlay's `previous` is flattened to the sequence node that owns it,
//! never another overlay. A run of overlay updates therefore collapses to a
//! single hop, and only the latest overlay stays reachable.

use super::scene::Scene;
use super::trail::{Trail, TrailSegment};
use crate::fault::Fault;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Mutex};

/// Whether background work is in flight for a node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[default]
    Idle,
    Working,
}

impl Status {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Working => "Working",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Deferred side effect attached to a node.
///
/// Runs at most once, no matter how often the node is published again.
pub struct Action {
    work: Mutex<Option<Box<dyn FnOnce() + Send>>>,
}

impl Action {
    pub fn new<F>(work: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            work: Mutex::new(Some(Box::new(work))),
        }
    }

    /// Run the action if it has not run yet. Returns whether it ran.
    pub fn fire(&self) -> bool {
        let work = match self.work.lock() {
            Ok(mut slot) => slot.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        match work {
            Some(work) => {
                work();
                true
            }
            None => false,
        }
    }

    pub fn is_spent(&self) -> bool {
        match self.work.lock() {
            Ok(slot) => slot.is_none(),
            Err(poisoned) => poisoned.into_inner().is_none(),
        }
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("spent", &self.is_spent())
            .finish()
    }
}

struct NodeInner<P, C> {
    revision: u64,
    payload: P,
    status: Status,
    context: C,
    fault: Option<Fault>,
    is_child: bool,
    is_final: bool,
    created_at: DateTime<Utc>,
    action: Option<Action>,
    previous: Option<HistoryNode<P, C>>,
}

// Unlink the chain iteratively; the default drop recurses once per node.
impl<P, C> Drop for NodeInner<P, C> {
    fn drop(&mut self) {
        let mut next = self.previous.take();
        while let Some(node) = next {
            match Arc::into_inner(node.inner) {
                Some(mut inner) => next = inner.previous.take(),
                None => break,
            }
        }
    }
}

/// One point in the navigation history.
///
/// `HistoryNode` is a cheap, cloneable handle; clones share the same
/// immutable node. `P` is the scene payload, `C` is auxiliary context that is
/// carried forward unchanged unless overwritten.
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
/// let home = HistoryNode::root(Screen::Home, ());
/// let search = home.next().payload(Screen::Search).build();
/// let loading = search.next_child().status(Status::Working).build();
///
/// assert_eq!(loading.revision(), 2);
/// assert!(loading.owning_sequence().unwrap().ptr_eq(&search));
/// assert!(loading.pop().unwrap().ptr_eq(&home));
/// ```
pub struct HistoryNode<P, C = ()> {
    inner: Arc<NodeInner<P, C>>,
}

impl<P, C> Clone for HistoryNode<P, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P: Scene, C: Clone> HistoryNode<P, C> {
    /// Create a root sequence node with revision 0 and `Idle` status.
    pub fn root(payload: P, context: C) -> Self {
        Self::root_with_status(payload, Status::Idle, context)
    }

    pub fn root_with_status(payload: P, status: Status, context: C) -> Self {
        Self {
            inner: Arc::new(NodeInner {
                revision: 0,
                payload,
                status,
                context,
                fault: None,
                is_child: false,
                is_final: false,
                created_at: Utc::now(),
                action: None,
                previous: None,
            }),
        }
    }

    /// Start building a new sequence node on top of this one.
    ///
    /// Unset fields default to this node's payload, status and context. The
    /// fault and action are never inherited.
    pub fn next(&self) -> NodeBuilder<P, C> {
        NodeBuilder::new(self.clone(), false)
    }

    /// Start building a new overlay node on top of this one.
    pub fn next_child(&self) -> NodeBuilder<P, C> {
        NodeBuilder::new(self.clone(), true)
    }

    /// Terminal sentinel derived from this node: same payload, status and
    /// context, no history, flagged final.
    pub(crate) fn finalized(&self) -> Self {
        Self {
            inner: Arc::new(NodeInner {
                revision: self.inner.revision,
                payload: self.inner.payload.clone(),
                status: self.inner.status,
                context: self.inner.context.clone(),
                fault: None,
                is_child: false,
                is_final: true,
                created_at: Utc::now(),
                action: None,
                previous: None,
            }),
        }
    }
}

impl<P: Scene, C> HistoryNode<P, C> {
    pub fn revision(&self) -> u64 {
        self.inner.revision
    }

    pub fn payload(&self) -> &P {
        &self.inner.payload
    }

    pub fn status(&self) -> Status {
        self.inner.status
    }

    pub fn context(&self) -> &C {
        &self.inner.context
    }

    pub fn fault(&self) -> Option<&Fault> {
        self.inner.fault.as_ref()
    }

    /// True for overlay nodes, false for sequence nodes.
    pub fn is_child(&self) -> bool {
        self.inner.is_child
    }

    /// True only for the terminal sentinel produced when history runs out.
    pub fn is_final(&self) -> bool {
        self.inner.is_final
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.inner.created_at
    }

    pub fn previous(&self) -> Option<&HistoryNode<P, C>> {
        self.inner.previous.as_ref()
    }

    /// Whether both handles point at the same node.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Whether a state exists below the logical top.
    ///
    /// An overlay's `previous` is only its owning sequence node, so overlays
    /// look two hops back.
    pub fn has_previous(&self) -> bool {
        match self.owning_sequence() {
            Some(sequence) => sequence.previous().is_some(),
            None => false,
        }
    }

    /// The sequence node this node belongs to: itself for a sequence node,
    /// `previous` for an overlay.
    pub fn owning_sequence(&self) -> Option<&HistoryNode<P, C>> {
        if self.inner.is_child {
            self.previous()
        } else {
            Some(self)
        }
    }

    /// The state one level below the logical top, ignoring any overlays.
    pub fn pop(&self) -> Option<&HistoryNode<P, C>> {
        self.owning_sequence()?.previous()
    }

    /// Run the attached action unless it already ran.
    pub(crate) fn fire_action(&self) -> bool {
        self.inner.action.as_ref().is_some_and(Action::fire)
    }

    /// The chain reachable through `previous`, oldest first.
    pub fn trail(&self) -> Trail {
        let mut segments = Vec::new();
        let mut cursor = Some(self);
        while let Some(node) = cursor {
            segments.push(TrailSegment {
                scene: node.inner.payload.name().to_string(),
                marker: node.marker(),
                overlay: node.inner.is_child,
                revision: node.inner.revision,
                at: node.inner.created_at,
            });
            cursor = node.previous();
        }
        segments.reverse();
        Trail::new(segments)
    }

    /// Single-line rendering of [`trail`](Self::trail), e.g.
    /// `[*] --> [Home@Idle] --> [Search@Idle -> Search@Network]`.
    pub fn debug_trail(&self) -> String {
        self.trail().to_string()
    }

    fn marker(&self) -> String {
        match &self.inner.fault {
            Some(fault) => fault.kind().name().to_string(),
            None => self.inner.status.name().to_string(),
        }
    }
}

impl<P: Scene, C: fmt::Debug> fmt::Debug for HistoryNode<P, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryNode")
            .field("revision", &self.inner.revision)
            .field("payload", &self.inner.payload)
            .field("status", &self.inner.status)
            .field("context", &self.inner.context)
            .field("fault", &self.inner.fault)
            .field("is_child", &self.inner.is_child)
            .field("is_final", &self.inner.is_final)
            .field("previous", &self.previous().map(HistoryNode::revision))
            .finish()
    }
}

// Structural equality; the chain below is compared by identity and the
// creation timestamp is ignored.
impl<P: Scene + PartialEq, C: PartialEq> PartialEq for HistoryNode<P, C> {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        let (a, b) = (&self.inner, &other.inner);
        let same_previous = match (&a.previous, &b.previous) {
            (Some(x), Some(y)) => x.ptr_eq(y),
            (None, None) => true,
            _ => false,
        };
        a.revision == b.revision
            && a.payload == b.payload
            && a.status == b.status
            && a.context == b.context
            && a.fault == b.fault
            && a.is_child == b.is_child
            && a.is_final == b.is_final
            && same_previous
    }
}

/// Builder for a node derived from an existing one.
///
/// Obtained from [`HistoryNode::next`] or [`HistoryNode::next_child`].
#[must_use]
pub struct NodeBuilder<P, C> {
    parent: HistoryNode<P, C>,
    is_child: bool,
    payload: Option<P>,
    status: Option<Status>,
    context: Option<C>,
    fault: Option<Fault>,
    action: Option<Action>,
}

impl<P: Scene, C: Clone> NodeBuilder<P, C> {
    fn new(parent: HistoryNode<P, C>, is_child: bool) -> Self {
        Self {
            parent,
            is_child,
            payload: None,
            status: None,
            context: None,
            fault: None,
            action: None,
        }
    }

    pub fn payload(mut self, payload: P) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn context(mut self, context: C) -> Self {
        self.context = Some(context);
        self
    }

    pub fn fault(mut self, fault: Fault) -> Self {
        self.fault = Some(fault);
        self
    }

    /// Attach a side effect run once, right after the node is published.
    pub fn action<F>(mut self, work: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        self.action = Some(Action::new(work));
        self
    }

    pub fn build(self) -> HistoryNode<P, C> {
        let previous = self.parent.owning_sequence().cloned();
        let parent = &self.parent.inner;

        HistoryNode {
            inner: Arc::new(NodeInner {
                revision: parent.revision + 1,
                payload: self.payload.unwrap_or_else(|| parent.payload.clone()),
                status: self.status.unwrap_or(parent.status),
                context: self.context.unwrap_or_else(|| parent.context.clone()),
                fault: self.fault,
                is_child: self.is_child,
                is_final: false,
                created_at: Utc::now(),
                action: self.action,
                previous,
            }),
        }
    }
}

impl<P: Scene, C: Clone> From<NodeBuilder<P, C>> for HistoryNode<P, C> {
    fn from(builder: NodeBuilder<P, C>) -> Self {
        builder.build()
    }
}
