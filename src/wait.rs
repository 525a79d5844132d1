use std::time::Duration;

use thiserror::Error;
use tokio::time::sleep;

/// How often and how long the loader polls for agent readiness.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaitPolicy {
    /// Total predicate checks before the wait fails.
    pub max_attempts: u32,
    /// Delay between checks.
    pub interval: Duration,
}

impl Default for WaitPolicy {
    fn default() -> Self {
        WaitPolicy {
            max_attempts: 100,
            interval: Duration::from_millis(100),
        }
    }
}

/// The condition never became true within the attempt budget.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("condition not met after {attempts} checks")]
pub struct WaitError {
    /// Number of checks performed.
    pub attempts: u32,
}

/// Poll `predicate` until it returns true.
///
/// The predicate is checked immediately and then once per `interval`, up to
/// `max_attempts` checks in total. Resolves on the first true observation;
/// fails once the budget is exhausted. Polling stops as soon as the wait
/// settles, in either direction. `max_attempts == 0` fails without ever
/// calling the predicate.
pub async fn wait_for<F>(
    mut predicate: F,
    max_attempts: u32,
    interval: Duration,
) -> Result<(), WaitError>
where
    F: FnMut() -> bool,
{
    for attempt in 1..=max_attempts {
        if predicate() {
            return Ok(());
        }

        if attempt < max_attempts {
            sleep(interval).await;
        }
    }

    Err(WaitError {
        attempts: max_attempts,
    })
}
