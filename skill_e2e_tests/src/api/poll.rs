// api/poll.rs - Waiting for eventually consistent writes
//
// The API answers a write with "... already in progress" and applies it
// later. A test that wants to see the effect polls a read until the probe
// reports success or the timeout passes.

use std::future::Future;

use tokio::time::{sleep, Instant};
use tracing::debug;

use crate::config::PollSettings;
use crate::error::{E2eError, Result};

/// Call `probe` until it yields `Some`.
///
/// `Ok(None)` means "not yet" and is retried after `settings.interval`.
/// An `Err` from the probe ends polling immediately. The probe always runs
/// at least once, even with a zero timeout.
pub async fn poll_until<F, Fut, T>(settings: PollSettings, mut probe: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>>>,
{
    let started = Instant::now();
    let mut attempts: u32 = 0;

    loop {
        attempts += 1;
        if let Some(value) = probe().await? {
            debug!(attempts, elapsed = ?started.elapsed(), "Poll condition met");
            return Ok(value);
        }

        if started.elapsed() >= settings.timeout {
            return Err(E2eError::PollTimeout(settings.timeout));
        }
        sleep(settings.interval).await;
    }
}
