//! Scene key to renderer lookup.

use super::Renderer;
use crate::core::{HistoryNode, Scene};
use std::collections::HashMap;

/// Boxed factory creating a renderer on demand.
pub type RendererFactory<P, C, F> =
    Box<dyn Fn() -> Box<dyn Renderer<P, C, Frame = F>> + Send + Sync>;

/// Explicit, caller-constructed mapping from scene keys to renderers.
pub struct RendererRegistry<P: Scene, C, F> {
    factories: HashMap<P::Key, RendererFactory<P, C, F>>,
}

impl<P: Scene, C: 'static, F: 'static> RendererRegistry<P, C, F> {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a factory for `key`, replacing any earlier registration.
    pub fn register<M, R>(&mut self, key: P::Key, factory: M) -> &mut Self
    where
        M: Fn() -> R + Send + Sync + 'static,
        R: Renderer<P, C, Frame = F> + 'static,
    {
        self.factories.insert(
            key,
            Box::new(move || Box::new(factory()) as Box<dyn Renderer<P, C, Frame = F>>),
        );
        self
    }

    /// Chaining variant of [`register`](Self::register).
    pub fn with<M, R>(mut self, key: P::Key, factory: M) -> Self
    where
        M: Fn() -> R + Send + Sync + 'static,
        R: Renderer<P, C, Frame = F> + 'static,
    {
        self.register(key, factory);
        self
    }

    /// Renderer for the variant of `node`'s payload, if one is registered.
    pub fn resolve(&self, node: &HistoryNode<P, C>) -> Option<Box<dyn Renderer<P, C, Frame = F>>> {
        self.factories
            .get(&node.payload().key())
            .map(|factory| factory())
    }

    pub fn contains(&self, key: P::Key) -> bool {
        self.factories.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl<P: Scene, C: 'static, F: 'static> Default for RendererRegistry<P, C, F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Render `node` with its registered renderer.
///
/// A missing registration is recoverable: it is logged and `None` is
/// returned so the caller can draw a fallback.
pub fn dispatch<P, C, F>(registry: &RendererRegistry<P, C, F>, node: &HistoryNode<P, C>) -> Option<F>
where
    P: Scene,
    C: 'static,
    F: 'static,
{
    match registry.resolve(node) {
        Some(renderer) => Some(renderer.render(node)),
        None => {
            tracing::warn!(
                target: "waymark::render",
                scene = node.payload().name(),
                revision = node.revision(),
                "no renderer registered for {}",
                node.payload().name()
            );
            None
        }
    }
}
