//! Cooperative cancellation shared by request and stream loops.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::error::ChatApiError;

/// Shared cancellation flag for one in-flight request.
pub type CancelSignal = Arc<AtomicBool>;

/// How often a pending await re-checks its cancellation flag.
pub const CANCEL_POLL_INTERVAL: Duration = Duration::from_millis(25);

pub fn new_cancel_signal() -> CancelSignal {
    Arc::new(AtomicBool::new(false))
}

pub fn cancel(signal: &CancelSignal) {
    signal.store(true, Ordering::Release);
}

pub fn is_cancelled(signal: Option<&CancelSignal>) -> bool {
    signal.is_some_and(|token| token.load(Ordering::Acquire))
}

/// Drives `future` to completion unless `cancellation` is raised first.
///
/// The flag is checked before the first poll, after every poll interval and
/// once more after the future resolves, so a cancellation that races with
/// completion still wins.
pub async fn await_or_cancel<F>(
    future: F,
    cancellation: Option<&CancelSignal>,
) -> Result<F::Output, ChatApiError>
where
    F: Future,
{
    if cancellation.is_none() {
        return Ok(future.await);
    }

    let mut future = Box::pin(future);

    loop {
        if is_cancelled(cancellation) {
            return Err(ChatApiError::Cancelled);
        }

        if let Ok(output) = tokio::time::timeout(CANCEL_POLL_INTERVAL, &mut future).await {
            if is_cancelled(cancellation) {
                return Err(ChatApiError::Cancelled);
            }
            return Ok(output);
        }
    }
}
