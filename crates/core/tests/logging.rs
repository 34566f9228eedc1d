//! Runs in its own test binary so no other test has installed a subscriber.

use sndout_core::init_tracing;

#[test]
fn test_init_tracing_installs_once() {
    assert!(init_tracing());
    assert!(!init_tracing());
    tracing::info!("still logging after a rejected init");
}
