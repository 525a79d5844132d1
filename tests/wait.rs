use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use deferred_reporter::{wait_for, WaitError};

#[tokio::test]
async fn resolves_immediately_when_already_true() {
    // an interval this long would stall the test if the first check slept
    let result = wait_for(|| true, 1, Duration::from_secs(3600)).await;

    assert_eq!(result, Ok(()));
}

#[tokio::test]
async fn resolves_on_first_true_observation() {
    let checks = AtomicUsize::new(0);

    let result = wait_for(
        || checks.fetch_add(1, Ordering::SeqCst) + 1 >= 3,
        10,
        Duration::from_millis(1),
    )
    .await;

    assert_eq!(result, Ok(()));
    assert_eq!(checks.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn fails_after_exactly_the_attempt_budget() {
    let checks = AtomicUsize::new(0);

    let result = wait_for(
        || {
            checks.fetch_add(1, Ordering::SeqCst);
            false
        },
        4,
        Duration::from_millis(1),
    )
    .await;

    assert_eq!(result, Err(WaitError { attempts: 4 }));
    // polling stopped at settlement
    assert_eq!(checks.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn zero_attempts_fail_without_checking() {
    let result = wait_for(
        || panic!("predicate must not run"),
        0,
        Duration::from_millis(1),
    )
    .await;

    assert_eq!(result, Err(WaitError { attempts: 0 }));
}
