//! Search Flow
//!
//! This example walks through a search screen that fails and is abandoned.
//!
//! Key concepts:
//! - Sequence nodes for whole screens, overlay nodes for loading and errors
//! - Raw failures classified into faults before they reach a node
//! - Popping below any number of overlays in one step
//! - Observing the current node through a subscriber
//!
//! Run with: cargo run --example search_flow

use std::io;
use waymark::core::HistoryNode;
use waymark::fault::FailureOrigin;
use waymark::navigator::Placement;
use waymark::{scene_enum, NavigatorBuilder};

scene_enum! {
    enum Screen {
        Home,
        Search { query: String },
    }
    key: ScreenKey
}

#[tokio::main]
async fn main() {
    println!("=== Search Flow Example ===\n");

    let navigator = NavigatorBuilder::new()
        .root(HistoryNode::root(Screen::Home, ()))
        .label("Search")
        .trace(false)
        .build()
        .unwrap();
    let mut observer = navigator.subscribe();

    navigator.navigate(Screen::Search {
        query: "waymark".to_string(),
    });
    println!("Opened search:  {}", navigator.current().debug_trail());

    navigator.publish_working(Placement::Overlay);
    println!("Loading:        {}", navigator.current().debug_trail());

    let reset = io::Error::new(io::ErrorKind::ConnectionReset, "connection reset");
    let failed = navigator.publish_failure(reset, FailureOrigin::RemoteCall, Placement::Overlay);
    println!("Request failed: {}", failed.debug_trail());
    if let Some(fault) = failed.fault() {
        println!("  fault: {} (retryable: {})", fault, fault.is_retryable());
    }

    let home = navigator.back();
    println!("Back:           {}", home.debug_trail());
    println!("Has previous:   {}", navigator.has_previous());

    let latest = observer.next().await.unwrap();
    println!("Observer sees:  {:?} @ revision {}", latest.payload(), latest.revision());

    let exhausted = navigator.back();
    println!("Past the root:  final = {}", exhausted.is_final());

    println!("\n=== Example Complete ===");
}
