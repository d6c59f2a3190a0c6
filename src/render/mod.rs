//! Rendering boundary.
//!
//! The navigator never renders anything itself. A caller-owned
//! [`RendererRegistry`] maps scene keys to renderer factories, and
//! [`dispatch`] turns the current node into a frame of the caller's choosing.

mod registry;

pub use registry::{dispatch, RendererFactory, RendererRegistry};

use crate::core::{HistoryNode, Scene};

/// Produces a frame for a history node.
///
/// Implemented for any `Fn(&HistoryNode<P, C>) -> Frame` closure.
pub trait Renderer<P: Scene, C>: Send + Sync {
    type Frame;

    fn render(&self, node: &HistoryNode<P, C>) -> Self::Frame;
}

impl<P, C, F, Out> Renderer<P, C> for F
where
    P: Scene,
    F: Fn(&HistoryNode<P, C>) -> Out + Send + Sync,
{
    type Frame = Out;

    fn render(&self, node: &HistoryNode<P, C>) -> Out {
        self(node)
    }
}
