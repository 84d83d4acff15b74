//! Tests for the readiness gate lifecycle

use super::*;
use crate::clock::{ManualClock, SystemClock};
use chrono::Utc;

fn manual_clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(Utc::now()))
}

#[test]
fn test_gate_starts_closed() {
    let gate = ReadinessGate::new();
    assert!(!gate.is_ready());
    assert!(gate.ready_since().is_none());
}

/// Reads before the delay elapses are all false, reads after are all true
#[tokio::test]
async fn test_gate_opens_after_delay() {
    // ARRANGE
    let clock = manual_clock();
    let gate = ReadinessGate::new();
    let init = gate
        .start_initialization(Duration::from_secs(15), clock.clone())
        .unwrap();

    // ACT: just short of the delay
    clock.advance(Duration::from_secs(14));
    tokio::task::yield_now().await;

    // ASSERT
    assert!(!gate.is_ready(), "Gate must stay closed before the delay");
    assert!(!init.is_finished());

    // ACT: past the delay
    clock.advance(Duration::from_secs(2));
    init.wait().await.unwrap();

    // ASSERT
    assert!(gate.is_ready());
    for _ in 0..100 {
        assert!(gate.is_ready(), "Gate must never close again");
    }
}

#[tokio::test]
async fn test_ready_since_uses_clock_time() {
    let start = Utc::now();
    let clock = Arc::new(ManualClock::new(start));
    let gate = ReadinessGate::new();
    let init = gate
        .start_initialization(Duration::from_secs(15), clock.clone())
        .unwrap();

    clock.advance(Duration::from_secs(20));
    init.wait().await.unwrap();

    assert_eq!(
        gate.ready_since(),
        Some(start + chrono::Duration::seconds(20))
    );
}

#[tokio::test]
async fn test_zero_delay_opens_immediately() {
    let gate = ReadinessGate::new();
    let init = gate
        .start_initialization(Duration::ZERO, manual_clock())
        .unwrap();

    init.wait().await.unwrap();
    assert!(gate.is_ready());
}

#[tokio::test]
async fn test_second_start_is_rejected() {
    let clock = manual_clock();
    let gate = ReadinessGate::new();
    let _init = gate
        .start_initialization(Duration::from_secs(15), clock.clone())
        .unwrap();

    // A clone shares the same lifecycle
    let cloned = gate.clone();
    let second = cloned.start_initialization(Duration::ZERO, clock.clone());

    assert!(matches!(second, Err(ReadinessError::AlreadyStarted)));
    assert!(!gate.is_ready(), "Rejected start must not open the gate");
}

#[tokio::test]
async fn test_clones_observe_transition() {
    let gate = ReadinessGate::new();
    let reader = gate.clone();

    gate.start_initialization(Duration::ZERO, manual_clock())
        .unwrap()
        .wait()
        .await
        .unwrap();

    assert!(reader.is_ready());
}

#[tokio::test]
async fn test_abort_keeps_gate_closed() {
    let gate = ReadinessGate::new();
    let init = gate
        .start_initialization(Duration::from_secs(15), manual_clock())
        .unwrap();

    init.abort();
    let result = init.wait().await;

    assert!(matches!(result, Err(ReadinessError::TaskFailed(_))));
    assert!(!gate.is_ready());
}

/// Concurrent readers never see the gate flip back
#[tokio::test]
async fn test_concurrent_readers_are_monotonic() {
    let clock = manual_clock();
    let gate = ReadinessGate::new();
    let init = gate
        .start_initialization(Duration::from_secs(1), clock.clone())
        .unwrap();

    let readers: Vec<_> = (0..8)
        .map(|_| {
            let gate = gate.clone();
            tokio::spawn(async move {
                let mut seen_ready = false;
                for _ in 0..1_000 {
                    let ready = gate.is_ready();
                    assert!(!(seen_ready && !ready), "Gate reverted to not ready");
                    seen_ready |= ready;
                    tokio::task::yield_now().await;
                }
            })
        })
        .collect();

    clock.advance(Duration::from_secs(1));
    init.wait().await.unwrap();

    for result in futures::future::join_all(readers).await {
        result.unwrap();
    }
    assert!(gate.is_ready());
}

/// Real timer with a short delay
#[tokio::test]
async fn test_system_clock_initialization() {
    let gate = ReadinessGate::new();
    let init = gate
        .start_initialization(Duration::from_millis(50), Arc::new(SystemClock))
        .unwrap();

    assert!(!gate.is_ready());
    tokio::time::timeout(Duration::from_secs(5), init.wait())
        .await
        .expect("initialization should finish")
        .unwrap();
    assert!(gate.is_ready());
}

#[test]
fn test_readiness_mode_delay() {
    assert_eq!(ReadinessMode::default().delay(), DEFAULT_READINESS_DELAY);
    assert_eq!(ReadinessMode::AlwaysReady.delay(), Duration::ZERO);
    assert_eq!(
        ReadinessMode::Gated {
            delay: Duration::from_secs(3)
        }
        .delay(),
        Duration::from_secs(3)
    );
}
