//! Builder for constructing navigators.

use crate::builder::error::BuildError;
use crate::core::{HistoryNode, Scene};
use crate::fault::Classifier;
use crate::navigator::Navigator;

/// Label used when none is configured.
pub const DEFAULT_LABEL: &str = "Navigator";

/// Builder for constructing navigators with a fluent API.
///
/// # Example
///
/// ```
/// use waymark::builder::NavigatorBuilder;
/// use waymark::core::HistoryNode;
/// use waymark::scene_enum;
///
/// scene_enum! {
///     enum Screen {
///         Home,
///     }
///     key: ScreenKey
/// }
///
/// let navigator = NavigatorBuilder::new()
///     .root(HistoryNode::root(Screen::Home, ()))
///     .label("Checkout")
///     .trace(false)
///     .build()
///     .unwrap();
///
/// assert_eq!(navigator.label(), "Checkout");
/// ```
pub struct NavigatorBuilder<P: Scene, C> {
    root: Option<HistoryNode<P, C>>,
    label: String,
    trace: bool,
    classifier: Option<Classifier>,
}

impl<P: Scene, C: Clone> NavigatorBuilder<P, C> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            root: None,
            label: DEFAULT_LABEL.to_string(),
            trace: true,
            classifier: None,
        }
    }

    /// Set the root node (required).
    pub fn root(mut self, root: HistoryNode<P, C>) -> Self {
        self.root = Some(root);
        self
    }

    /// Set the label attached to trace events.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Enable or disable the per-publish debug trace.
    pub fn trace(mut self, enabled: bool) -> Self {
        self.trace = enabled;
        self
    }

    /// Use a custom classifier for failures entering through the navigator.
    pub fn classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = Some(classifier);
        self
    }

    /// Build the navigator.
    /// Returns an error if the root is missing or already has history.
    pub fn build(self) -> Result<Navigator<P, C>, BuildError> {
        let root = self.root.ok_or(BuildError::MissingRoot)?;

        if root.is_child() || root.previous().is_some() {
            return Err(BuildError::InvalidRoot);
        }
        if self.label.trim().is_empty() {
            return Err(BuildError::EmptyLabel);
        }

        Ok(Navigator::from_parts(
            root,
            self.label,
            self.trace,
            self.classifier.unwrap_or_default(),
        ))
    }
}

impl<P: Scene, C: Clone> Default for NavigatorBuilder<P, C> {
    fn default() -> Self {
        Self::new()
    }
}
