//! Settling external work against the navigator.
//!
//! Work is started from some node and described as a stillwater effect. Once
//! the effect completes, its outcome is only published if that node is
//! still current. Otherwise the result is stale and dropped.

use crate::core::{HistoryNode, Scene};
use crate::fault::{FailureOrigin, RawFailure};
use crate::navigator::controller::Navigator;
use crate::navigator::resolution::{Placement, Resolution};
use stillwater::effect::Effect;

/// Outcome of [`Navigator::settle`].
#[derive(Clone, Debug)]
pub enum Settled<P: Scene, C> {
    /// The effect succeeded and its node was published.
    Published(HistoryNode<P, C>),

    /// The effect failed; the classified fault was published as an overlay.
    Faulted(HistoryNode<P, C>),

    /// Navigation moved on while the effect ran. Nothing was published.
    Stale,
}

impl<P: Scene, C> Settled<P, C> {
    pub fn node(&self) -> Option<&HistoryNode<P, C>> {
        match self {
            Self::Published(node) | Self::Faulted(node) => Some(node),
            Self::Stale => None,
        }
    }

    pub fn is_stale(&self) -> bool {
        matches!(self, Self::Stale)
    }
}

impl<P: Scene, C: Clone> Navigator<P, C> {
    /// Run `effect` and publish its outcome on top of `origin`.
    ///
    /// On success `on_success` derives the next node from the current node
    /// and the effect's output. On failure the error is classified with
    /// `failure_origin` and attached as a fault overlay. Either way nothing
    /// is published when `origin` stopped being current in the meantime.
    pub async fn settle<Eff, F, N>(
        &self,
        origin: &HistoryNode<P, C>,
        effect: Eff,
        env: &Eff::Env,
        failure_origin: impl Into<Option<FailureOrigin>>,
        on_success: F,
    ) -> Settled<P, C>
    where
        Eff: Effect,
        Eff::Error: Into<RawFailure>,
        F: FnOnce(&HistoryNode<P, C>, Eff::Output) -> N,
        N: Into<HistoryNode<P, C>>,
    {
        let outcome = effect.run(env).await;

        if !self.is_current(origin) {
            tracing::debug!(
                target: "waymark::navigator",
                navigator = %self.label(),
                session = %self.session(),
                revision = origin.revision(),
                "dropping stale result for {}",
                origin.payload().name()
            );
            return Settled::Stale;
        }

        match outcome {
            Ok(value) => {
                Settled::Published(self.publish(Resolution::Direct, |base| on_success(base, value)))
            }
            Err(error) => {
                Settled::Faulted(self.publish_failure(error, failure_origin, Placement::Overlay))
            }
        }
    }
}
