//! Navigator that owns the current history node.

use crate::builder::DEFAULT_LABEL;
use crate::core::{HistoryNode, Scene, Status, TargetSet};
use crate::fault::{Classifier, FailureOrigin, Fault, RawFailure};
use crate::navigator::error::NavigationError;
use crate::navigator::resolution::{Placement, Resolution};
use crate::navigator::stage::{Stage, StageReceiver};
use uuid::Uuid;

/// Navigation controller.
///
/// Owns a single current node, published through a [`Stage`]. Every
/// operation resolves a base node, derives the new node from it, publishes
/// it, runs its action once and emits a debug trace.
///
/// One logical writer is expected. Publishing never blocks; concurrent
/// writers race with last-write-wins semantics.
///
/// # Example
///
/// ```
/// use waymark::core::HistoryNode;
/// use waymark::fault::Fault;
/// use waymark::navigator::{Navigator, Placement};
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
/// let navigator = Navigator::new(HistoryNode::root(Screen::Home, ()));
///
/// navigator.navigate(Screen::Search);
/// navigator.publish_working(Placement::Overlay);
/// navigator.publish_fault(Fault::network(), Placement::Overlay);
///
/// let home = navigator.pop([ScreenKey::Home], false);
/// assert_eq!(home.payload(), &Screen::Home);
/// assert!(!navigator.has_previous());
/// ```
pub struct Navigator<P: Scene, C = ()> {
    root: HistoryNode<P, C>,
    stage: Stage<P, C>,
    label: String,
    trace: bool,
    session: Uuid,
    classifier: Classifier,
}

impl<P: Scene, C: Clone> Navigator<P, C> {
    /// Create a navigator with default configuration.
    pub fn new(root: HistoryNode<P, C>) -> Self {
        Self::from_parts(root, DEFAULT_LABEL.to_string(), true, Classifier::new())
    }

    pub(crate) fn from_parts(
        root: HistoryNode<P, C>,
        label: String,
        trace: bool,
        classifier: Classifier,
    ) -> Self {
        let navigator = Self {
            stage: Stage::new(root.clone()),
            root,
            label,
            trace,
            session: Uuid::new_v4(),
            classifier,
        };
        navigator.log_trail(&navigator.root);
        navigator
    }

    /// Current node (pure snapshot).
    pub fn current(&self) -> HistoryNode<P, C> {
        self.stage.current()
    }

    pub fn root(&self) -> &HistoryNode<P, C> {
        &self.root
    }

    pub fn subscribe(&self) -> StageReceiver<P, C> {
        self.stage.subscribe()
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn session(&self) -> Uuid {
        self.session
    }

    pub fn has_previous(&self) -> bool {
        self.current().has_previous()
    }

    /// Whether `node` is still the published current node.
    ///
    /// External work started from a node should check this before acting on
    /// its result.
    pub fn is_current(&self, node: &HistoryNode<P, C>) -> bool {
        self.current().ptr_eq(node)
    }

    /// Resolve a base node, transform it and publish the result.
    ///
    /// The transform receives the resolved base and returns the new current
    /// node, usually by deriving from the base with `next` or `next_child`.
    pub fn publish<F, N>(&self, resolution: Resolution<P::Key>, transform: F) -> HistoryNode<P, C>
    where
        F: FnOnce(&HistoryNode<P, C>) -> N,
        N: Into<HistoryNode<P, C>>,
    {
        let base = resolution.resolve(&self.current(), &self.root);
        let node = transform(&base).into();
        self.commit(node)
    }

    /// Pop back to the nearest node matching `targets`.
    ///
    /// Empty targets pop a single level. `inclusive` also drops the match.
    /// An absent target leaves the current node in place; popping past the
    /// root yields the terminal sentinel.
    pub fn pop(&self, targets: impl Into<TargetSet<P::Key>>, inclusive: bool) -> HistoryNode<P, C> {
        self.publish(Resolution::pop_to(targets, inclusive), HistoryNode::clone)
    }

    /// Pop a single level.
    pub fn back(&self) -> HistoryNode<P, C> {
        self.pop(TargetSet::empty(), false)
    }

    /// Whole-screen transition: push `payload` as a new sequence node.
    pub fn navigate(&self, payload: P) -> HistoryNode<P, C> {
        self.navigate_with(payload, Placement::Sequence)
    }

    /// Move to `payload` with an explicit placement. New screens start idle.
    pub fn navigate_with(&self, payload: P, placement: Placement) -> HistoryNode<P, C> {
        self.publish(Resolution::Direct, |base| {
            placement.derive(base).payload(payload).status(Status::Idle)
        })
    }

    /// Publish an idle node carrying `fault`.
    pub fn publish_fault(&self, fault: Fault, placement: Placement) -> HistoryNode<P, C> {
        self.publish(Resolution::Direct, |base| {
            placement.derive(base).status(Status::Idle).fault(fault)
        })
    }

    /// Classify a raw failure and publish it as a fault.
    pub fn publish_failure(
        &self,
        raw: impl Into<RawFailure>,
        origin: impl Into<Option<FailureOrigin>>,
        placement: Placement,
    ) -> HistoryNode<P, C> {
        let fault = self.classify(raw, origin);
        self.publish_fault(fault, placement)
    }

    pub fn publish_working(&self, placement: Placement) -> HistoryNode<P, C> {
        self.publish(Resolution::Direct, |base| {
            placement.derive(base).status(Status::Working)
        })
    }

    pub fn publish_idle(&self, placement: Placement) -> HistoryNode<P, C> {
        self.publish(Resolution::Direct, |base| {
            placement.derive(base).status(Status::Idle)
        })
    }

    pub fn classify(
        &self,
        raw: impl Into<RawFailure>,
        origin: impl Into<Option<FailureOrigin>>,
    ) -> Fault {
        self.classifier.classify(raw, origin)
    }

    /// Current payload, provided it is of the `expected` variant.
    pub fn require_payload(&self, expected: P::Key) -> Result<P, NavigationError> {
        let current = self.current();
        if current.payload().is(expected) {
            return Ok(current.payload().clone());
        }
        Err(self.unexpected_scene(format!("{expected:?}"), &current))
    }

    /// Narrow the current payload with `narrow`.
    ///
    /// Fails when `narrow` returns `None`, i.e. the caller's assumption about
    /// where navigation currently is turned out to be stale.
    pub fn require_variant<T, F>(&self, narrow: F) -> Result<T, NavigationError>
    where
        F: FnOnce(&P) -> Option<T>,
    {
        let current = self.current();
        match narrow(current.payload()) {
            Some(value) => Ok(value),
            None => Err(self.unexpected_scene(std::any::type_name::<T>().to_string(), &current)),
        }
    }

    fn unexpected_scene(&self, expected: String, current: &HistoryNode<P, C>) -> NavigationError {
        let error = NavigationError::UnexpectedScene {
            expected,
            found: current.payload().name().to_string(),
            revision: current.revision(),
        };
        tracing::error!(
            target: "waymark::navigator",
            navigator = %self.label,
            session = %self.session,
            "{error}"
        );
        error
    }

    fn commit(&self, node: HistoryNode<P, C>) -> HistoryNode<P, C> {
        self.stage.publish(node.clone());
        node.fire_action();
        self.log_trail(&node);
        node
    }

    fn log_trail(&self, node: &HistoryNode<P, C>) {
        if !self.trace {
            return;
        }
        tracing::info!(
            target: "waymark::navigator",
            navigator = %self.label,
            session = %self.session,
            revision = node.revision(),
            "{}: {}",
            self.label,
            node.debug_trail()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fault::{FaultKind, HttpFailure};
    use std::io;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    crate::scene_enum! {
        enum TestScene {
            Home,
            Search { query: String },
            Results(u32),
            Detail,
        }
        key: TestKey
    }

    fn navigator() -> Navigator<TestScene, u32> {
        Navigator::new(HistoryNode::root(TestScene::Home, 0))
    }

    fn search(query: &str) -> TestScene {
        TestScene::Search {
            query: query.to_string(),
        }
    }

    #[test]
    fn starts_at_root() {
        let nav = navigator();

        assert!(nav.current().ptr_eq(nav.root()));
        assert!(!nav.has_previous());
        assert_eq!(nav.label(), DEFAULT_LABEL);
    }

    #[test]
    fn navigate_pushes_sequence_nodes() {
        let nav = navigator();
        nav.navigate(search("a"));
        let results = nav.navigate(TestScene::Results(3));

        assert!(!results.is_child());
        assert_eq!(results.revision(), 2);
        assert!(nav.is_current(&results));
        assert_eq!(nav.current().trail().scenes(), vec!["Home", "Search", "Results"]);
    }

    #[test]
    fn publish_direct_applies_transform_to_current() {
        let nav = navigator();
        let node = nav.publish(Resolution::Direct, |base| base.next().context(42));

        assert_eq!(node.context(), &42);
        assert!(node.previous().unwrap().ptr_eq(nav.root()));
    }

    #[test]
    fn status_helpers_default_to_overlay_placement() {
        let nav = navigator();
        let screen = nav.navigate(search("q"));

        let working = nav.publish_working(Placement::default());
        assert!(working.is_child());
        assert_eq!(working.status(), Status::Working);

        let idle = nav.publish_idle(Placement::default());
        assert!(idle.is_child());
        assert!(idle.previous().unwrap().ptr_eq(&screen));
    }

    #[test]
    fn publish_fault_as_sequence_creates_back_stack_entry() {
        let nav = navigator();
        nav.navigate(search("q"));
        let failed = nav.publish_fault(Fault::server(500), Placement::Sequence);

        assert!(!failed.is_child());
        assert_eq!(failed.status(), Status::Idle);
        assert_eq!(failed.fault(), Some(&Fault::server(500)));
        assert_eq!(failed.payload(), &search("q"));
    }

    #[test]
    fn publish_failure_classifies_before_attaching() {
        let nav = navigator();
        let io = io::Error::new(io::ErrorKind::NotFound, "prefs");

        let node = nav.publish_failure(io, FailureOrigin::LocalStorage, Placement::Overlay);
        assert_eq!(node.fault().map(Fault::kind), Some(FaultKind::DiskReadWrite));

        let node = nav.publish_failure(HttpFailure::new(401, ""), None, Placement::Overlay);
        assert_eq!(node.fault(), Some(&Fault::authentication()));
    }

    #[test]
    fn pop_returns_below_overlays() {
        let nav = navigator();
        nav.navigate(search("q"));
        nav.publish_working(Placement::Overlay);
        nav.publish_fault(Fault::network(), Placement::Overlay);

        let popped = nav.back();
        assert!(popped.ptr_eq(nav.root()));
        assert!(nav.current().ptr_eq(nav.root()));
        assert!(!nav.has_previous());
    }

    #[test]
    fn pop_to_target_exclusive_and_inclusive() {
        let nav = navigator();
        let search_node = nav.navigate(search("q"));
        nav.navigate(TestScene::Results(1));
        nav.navigate(TestScene::Detail);

        let popped = nav.pop([TestKey::Search], false);
        assert!(popped.ptr_eq(&search_node));

        nav.navigate(TestScene::Results(2));
        let popped = nav.pop([TestKey::Search], true);
        assert!(popped.ptr_eq(nav.root()));
    }

    #[test]
    fn pop_to_missing_target_keeps_current() {
        let nav = navigator();
        let results = nav.navigate(TestScene::Results(1));

        let popped = nav.pop([TestKey::Detail], false);
        assert!(popped.ptr_eq(&results));
        assert!(nav.is_current(&results));
    }

    #[test]
    fn pop_past_root_yields_terminal_sentinel() {
        let nav = navigator();
        nav.navigate(search("q"));

        let sentinel = nav.pop([TestKey::Home], true);
        assert!(sentinel.is_final());
        assert_eq!(sentinel.payload(), &TestScene::Home);
        assert_eq!(sentinel.context(), &0);

        let again = nav.back();
        assert!(again.is_final());
    }

    #[test]
    fn replace_parent_swaps_matching_screen() {
        let nav = navigator();
        nav.navigate(search("q"));
        nav.publish_working(Placement::Overlay);

        let results = nav.publish(Resolution::replace(TargetSet::of(TestKey::Search)), |base| {
            base.next().payload(TestScene::Results(9)).status(Status::Idle)
        });

        assert!(results.previous().unwrap().ptr_eq(nav.root()));
        assert_eq!(nav.current().trail().scenes(), vec!["Home", "Results"]);
    }

    #[test]
    fn replace_parent_without_match_derives_from_current() {
        let nav = navigator();
        let first = nav.navigate(search("q"));

        let next = nav.publish(Resolution::replace(TargetSet::of(TestKey::Detail)), |base| {
            base.next().payload(TestScene::Results(1))
        });
        assert!(next.previous().unwrap().ptr_eq(&first));
    }

    #[test]
    fn action_runs_once_after_publish() {
        let nav = navigator();
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);

        let search_node = nav.publish(Resolution::Direct, |base| {
            base.next().payload(search("q")).action(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            })
        });
        assert_eq!(count.load(Ordering::SeqCst), 1);

        nav.navigate(TestScene::Detail);
        let revisited = nav.back();
        assert!(revisited.ptr_eq(&search_node));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn require_payload_matches_current_variant() {
        let nav = navigator();
        nav.navigate(search("rust"));

        assert_eq!(nav.require_payload(TestKey::Search), Ok(search("rust")));

        let error = nav.require_payload(TestKey::Detail).unwrap_err();
        assert_eq!(
            error,
            NavigationError::UnexpectedScene {
                expected: "Detail".to_string(),
                found: "Search".to_string(),
                revision: 1,
            }
        );
    }

    #[test]
    fn require_variant_narrows_payload() {
        let nav = navigator();
        nav.navigate(search("rust"));

        let query = nav.require_variant(|scene| match scene {
            TestScene::Search { query } => Some(query.clone()),
            _ => None,
        });
        assert_eq!(query, Ok("rust".to_string()));

        let count = nav.require_variant(|scene| match scene {
            TestScene::Results(count) => Some(*count),
            _ => None,
        });
        assert!(matches!(count, Err(NavigationError::UnexpectedScene { .. })));
    }

    #[test]
    fn published_nodes_are_stable_snapshots() {
        let nav = navigator();
        let observed = nav.navigate(search("q"));
        let first_read = nav.current();

        nav.publish_working(Placement::Overlay);
        nav.navigate(TestScene::Detail);

        assert_eq!(first_read, observed);
        assert_eq!(observed.payload(), &search("q"));
        assert_eq!(observed.status(), Status::Idle);
    }

    #[test]
    fn dropping_navigator_with_long_history() {
        let nav: Navigator<TestScene, u32> = Navigator::from_parts(
            HistoryNode::root(TestScene::Home, 0),
            DEFAULT_LABEL.to_string(),
            false,
            Classifier::new(),
        );
        for count in 0..150_000 {
            nav.navigate(TestScene::Results(count));
        }
        assert_eq!(nav.current().revision(), 150_000);

        drop(nav);
    }

    #[tokio::test]
    async fn subscribers_observe_publishes() {
        let nav = navigator();
        let mut receiver = nav.subscribe();
        assert!(receiver.next().await.unwrap().ptr_eq(nav.root()));

        let screen = nav.navigate(search("q"));
        assert!(receiver.next().await.unwrap().ptr_eq(&screen));
    }
}
