use crate::{Result, ScrapeError};
use std::time::Duration;
use tokio::sync::watch;

/// Cooperative cancellation for a harvesting run.
///
/// - `cancel()` flips the flag and wakes any pending pause.
/// - The harvester checks the flag between shows and stops requesting new ids.
/// - Records gathered so far are still written by the caller.
#[derive(Clone, Debug)]
pub struct CancellationState {
    tx: watch::Sender<bool>,
}

impl Default for CancellationState {
    fn default() -> Self {
        Self::new()
    }
}

impl CancellationState {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    pub fn cancel(&self) {
        // send() drops the value when nobody is subscribed yet.
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }

    /// Cancel on the first Ctrl-C.
    pub fn cancel_on_ctrl_c(&self) {
        let state = self.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                log::warn!("Interrupt received, stopping after the current show");
                state.cancel();
            }
        });
    }
}

/// Sleep for `duration` unless cancelled first.
pub async fn sleep_with_cancel(
    mut cancel_rx: watch::Receiver<bool>,
    duration: Duration,
) -> Result<()> {
    if *cancel_rx.borrow() {
        return Err(ScrapeError::Cancelled);
    }
    if duration.is_zero() {
        return Ok(());
    }

    let sleeper = tokio::time::sleep(duration);
    tokio::pin!(sleeper);
    tokio::select! {
        _ = &mut sleeper => Ok(()),
        _ = async {
            loop {
                if cancel_rx.changed().await.is_err() {
                    // Sender dropped; the pause can no longer be interrupted.
                    std::future::pending::<()>().await;
                }
                if *cancel_rx.borrow() {
                    break;
                }
            }
        } => Err(ScrapeError::Cancelled),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sleep_completes_without_cancel() {
        let state = CancellationState::new();
        let result = sleep_with_cancel(state.subscribe(), Duration::from_millis(5)).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_already_cancelled() {
        let state = CancellationState::new();
        state.cancel();
        assert!(state.is_cancelled());
        let result = sleep_with_cancel(state.subscribe(), Duration::ZERO).await;
        assert!(matches!(result, Err(ScrapeError::Cancelled)));
    }

    #[tokio::test]
    async fn test_cancel_interrupts_long_sleep() {
        let state = CancellationState::new();
        let rx = state.subscribe();
        let canceller = state.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            canceller.cancel();
        });

        let started = std::time::Instant::now();
        let result = sleep_with_cancel(rx, Duration::from_secs(30)).await;
        assert!(matches!(result, Err(ScrapeError::Cancelled)));
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
