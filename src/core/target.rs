//! Target sets for type-directed pop and replace.
//!
//! A target set names scene variants by key. The navigator walks history
//! until it finds a node whose payload matches any key in the set.

use super::scene::Scene;
use std::collections::HashSet;
use std::hash::Hash;

/// Set of scene variant keys used to select a history node.
///
/// An empty set is meaningful: it tells the navigator to fall back to its
/// single-level behaviour instead of searching.
///
/// # Example
///
/// ```rust
/// use waymark::core::TargetSet;
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// enum Key { Home, Search, Detail }
///
/// let targets: TargetSet<Key> = [Key::Home, Key::Search].into_iter().collect();
/// assert!(targets.contains(Key::Home));
/// assert!(!targets.contains(Key::Detail));
/// assert!(TargetSet::<Key>::empty().is_empty());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetSet<K: Eq + Hash> {
    keys: HashSet<K>,
}

impl<K: Copy + Eq + Hash> TargetSet<K> {
    /// Create an empty target set.
    pub fn empty() -> Self {
        Self {
            keys: HashSet::new(),
        }
    }

    /// Create a target set holding a single key.
    pub fn of(key: K) -> Self {
        Self::empty().with(key)
    }

    /// Add a key, returning the extended set.
    pub fn with(mut self, key: K) -> Self {
        self.keys.insert(key);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn contains(&self, key: K) -> bool {
        self.keys.contains(&key)
    }

    /// Check whether a scene's variant is one of the targets.
    ///
    /// Pure tag comparison; variant data is never inspected.
    pub fn matches<S>(&self, scene: &S) -> bool
    where
        S: Scene<Key = K>,
    {
        self.keys.contains(&scene.key())
    }
}

impl<K: Copy + Eq + Hash> Default for TargetSet<K> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<K: Copy + Eq + Hash> FromIterator<K> for TargetSet<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}

impl<K: Copy + Eq + Hash> Extend<K> for TargetSet<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        self.keys.extend(iter);
    }
}

impl<K: Copy + Eq + Hash, const N: usize> From<[K; N]> for TargetSet<K> {
    fn from(keys: [K; N]) -> Self {
        keys.into_iter().collect()
    }
}
