//! Property-based tests for history nodes, the navigator and the classifier.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated inputs.

use proptest::prelude::*;
use std::io;
use waymark::core::{HistoryNode, Scene, Status};
use waymark::fault::{classify, FailureOrigin, Fault, FaultKind, HttpFailure, RawFailure};
use waymark::navigator::Placement;
use waymark::{scene_enum, NavigatorBuilder};

scene_enum! {
    enum TestScene {
        A,
        B,
        C,
        D,
    }
    key: TestKey
}

type Node = HistoryNode<TestScene, ()>;

fn scene_for(variant: u8) -> TestScene {
    match variant % 4 {
        0 => TestScene::A,
        1 => TestScene::B,
        2 => TestScene::C,
        _ => TestScene::D,
    }
}

fn key_for(variant: u8) -> TestKey {
    match variant % 4 {
        0 => TestKey::A,
        1 => TestKey::B,
        2 => TestKey::C,
        _ => TestKey::D,
    }
}

prop_compose! {
    fn arbitrary_step()(variant in 0..4u8, overlay in any::<bool>(), working in any::<bool>()) -> (TestScene, bool, Status) {
        let status = if working { Status::Working } else { Status::Idle };
        (scene_for(variant), overlay, status)
    }
}

fn derive(base: &Node, (scene, overlay, status): &(TestScene, bool, Status)) -> Node {
    let builder = if *overlay { base.next_child() } else { base.next() };
    builder.payload(scene.clone()).status(*status).build()
}

proptest! {
    #[test]
    fn revision_increments_along_derivations(steps in prop::collection::vec(arbitrary_step(), 1..40)) {
        let mut node = HistoryNode::root(TestScene::A, ());
        prop_assert_eq!(node.revision(), 0);

        for step in &steps {
            let next = derive(&node, step);
            prop_assert_eq!(next.revision(), node.revision() + 1);
            node = next;
        }
    }

    #[test]
    fn revisions_strictly_decrease_towards_root(steps in prop::collection::vec(arbitrary_step(), 1..40)) {
        let mut node = HistoryNode::root(TestScene::A, ());
        for step in &steps {
            node = derive(&node, step);
        }

        let mut cursor = node;
        while let Some(previous) = cursor.previous().cloned() {
            prop_assert!(previous.revision() < cursor.revision());
            prop_assert!(!previous.is_child());
            cursor = previous;
        }
        prop_assert_eq!(cursor.revision(), 0);
    }

    #[test]
    fn overlays_flatten_to_owning_sequence(
        depth in 0..6usize,
        overlays in prop::collection::vec(0..4u8, 1..20),
    ) {
        let mut sequence = HistoryNode::root(TestScene::A, ());
        for variant in 0..depth {
            sequence = sequence.next().payload(scene_for(variant as u8)).build();
        }

        let mut overlay = sequence.clone();
        for variant in overlays {
            overlay = overlay.next_child().payload(scene_for(variant)).build();

            prop_assert!(overlay.owning_sequence().unwrap().ptr_eq(&sequence));
            prop_assert_eq!(overlay.has_previous(), sequence.has_previous());
            match (overlay.pop(), sequence.pop()) {
                (Some(left), Some(right)) => prop_assert!(left.ptr_eq(right)),
                (None, None) => {}
                _ => prop_assert!(false, "overlay and sequence pop disagree"),
            }
        }
    }

    #[test]
    fn trail_has_one_segment_per_sequence_plus_latest_overlay(
        steps in prop::collection::vec(arbitrary_step(), 0..30),
    ) {
        let mut node = HistoryNode::root(TestScene::A, ());
        let mut sequences = 1;
        for step in &steps {
            node = derive(&node, step);
            if !step.1 {
                sequences += 1;
            }
        }

        let expected = sequences + usize::from(node.is_child());
        prop_assert_eq!(node.trail().len(), expected);
        prop_assert!(node.debug_trail().starts_with("[*] --> [A@"));
    }

    #[test]
    fn pop_to_target_matches_model(
        path in prop::collection::vec(0..4u8, 1..12),
        target in 0..4u8,
        inclusive in any::<bool>(),
        overlay_on_top in any::<bool>(),
    ) {
        let navigator = NavigatorBuilder::new()
            .root(HistoryNode::root(TestScene::A, ()))
            .trace(false)
            .build()
            .unwrap();

        let mut stack = vec![navigator.current()];
        for variant in &path {
            stack.push(navigator.navigate(scene_for(*variant)));
        }
        if overlay_on_top {
            navigator.publish_working(Placement::Overlay);
        }
        let before = navigator.current();

        let wanted = key_for(target);
        let found = stack[..stack.len() - 1]
            .iter()
            .rposition(|node| node.payload().is(wanted));

        let result = navigator.pop([wanted], inclusive);
        match found {
            None => prop_assert!(result.ptr_eq(&before)),
            Some(0) if inclusive => {
                prop_assert!(result.is_final());
                prop_assert_eq!(result.payload(), &TestScene::A);
            }
            Some(index) if inclusive => prop_assert!(result.ptr_eq(&stack[index - 1])),
            Some(index) => prop_assert!(result.ptr_eq(&stack[index])),
        }
        prop_assert!(navigator.is_current(&result));
    }

    #[test]
    fn popping_past_root_always_yields_sentinel(depth in 0..8usize, extra in 1..4usize) {
        let navigator = NavigatorBuilder::new()
            .root(HistoryNode::root(TestScene::B, ()))
            .trace(false)
            .build()
            .unwrap();
        for variant in 0..depth {
            navigator.navigate(scene_for(variant as u8));
        }

        let mut last = navigator.current();
        for _ in 0..depth + extra {
            last = navigator.back();
        }

        prop_assert!(last.is_final());
        prop_assert_eq!(last.payload(), &TestScene::B);
        prop_assert!(!last.has_previous());
    }

    #[test]
    fn http_status_classification_is_total(status in 0..1000u16) {
        let fault = classify(HttpFailure::new(status, "failure"), None);
        let expected = match status {
            401 => FaultKind::Authentication,
            403 => FaultKind::Authorization,
            400..=499 => FaultKind::Client,
            500..=599 => FaultKind::Server,
            _ => FaultKind::General,
        };

        prop_assert_eq!(fault.kind(), expected);
        if matches!(expected, FaultKind::Client | FaultKind::Server) {
            prop_assert_eq!(fault.code(), Some(status));
        }
    }

    #[test]
    fn classification_is_idempotent(status in 400..600u16, remote in any::<bool>()) {
        let origin = if remote { FailureOrigin::RemoteCall } else { FailureOrigin::LocalStorage };
        let first = classify(HttpFailure::new(status, "failure"), origin);
        let second = classify(first.clone(), origin);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn io_failures_follow_origin(remote in any::<bool>(), message in "[a-z]{0,12}") {
        let error = io::Error::new(io::ErrorKind::Other, message);
        let origin = if remote { FailureOrigin::RemoteCall } else { FailureOrigin::LocalStorage };
        let expected = if remote { FaultKind::Network } else { FaultKind::DiskReadWrite };

        prop_assert_eq!(classify(RawFailure::from(error), origin).kind(), expected);
    }
}

#[test]
fn io_failure_without_origin_is_fatal() {
    let error = io::Error::new(io::ErrorKind::TimedOut, "socket");
    assert_eq!(classify(error, None).kind(), FaultKind::Fatal);
}

#[test]
fn classified_fault_passes_through() {
    let fault = Fault::client(418);
    assert_eq!(classify(fault.clone(), FailureOrigin::RemoteCall), fault);
}
