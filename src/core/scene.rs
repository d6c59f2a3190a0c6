//! Core Scene trait for navigation payloads.
//!
//! A scene describes "where the user is": which screen or step, plus any
//! step-local data. Scenes form a closed set per application, so each one
//! exposes a cheap tag (`Key`) identifying its variant.

use std::fmt::Debug;
use std::hash::Hash;

/// Trait for navigation payloads.
///
/// All methods are pure. Scenes are immutable values stored inside history
/// nodes; the navigator only ever compares their keys.
///
/// # Required Traits
///
/// - `Clone`: Scenes are carried forward when a node is derived without a new payload
/// - `Debug`: Scenes must be debuggable for diagnostics
/// - `Send` + `Sync`: Nodes are shared with observers on other threads
///
/// # Example
///
/// ```rust
/// use waymark::core::Scene;
///
/// #[derive(Clone, PartialEq, Debug)]
/// enum Screen {
///     Home,
///     Search { query: String },
/// }
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// enum ScreenKey {
///     Home,
///     Search,
/// }
///
/// impl Scene for Screen {
///     type Key = ScreenKey;
///
///     fn key(&self) -> ScreenKey {
///         match self {
///             Self::Home => ScreenKey::Home,
///             Self::Search { .. } => ScreenKey::Search,
///         }
///     }
///
///     fn name(&self) -> &str {
///         match self {
///             Self::Home => "Home",
///             Self::Search { .. } => "Search",
///         }
///     }
/// }
///
/// let screen = Screen::Search { query: "rust".into() };
/// assert_eq!(screen.key(), ScreenKey::Search);
/// ```
pub trait Scene: Clone + Debug + Send + Sync + 'static {
    /// Variant tag. One value per variant, independent of variant data.
    type Key: Copy + Eq + Hash + Debug + Send + Sync + 'static;

    /// Get the variant tag of this scene.
    fn key(&self) -> Self::Key;

    /// Get the variant name for display/logging.
    fn name(&self) -> &str;

    /// Check if this scene is of the given variant.
    fn is(&self, key: Self::Key) -> bool {
        self.key() == key
    }
}
