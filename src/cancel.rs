//! Request-scoped cancellation.
//!
//! The caller keeps a [`CancelHandle`] and passes the paired [`CancelSignal`]
//! into the planner. Every upstream await is raced against the signal.

use std::future::Future;

use tokio::sync::watch;

use crate::error::PlanError;

/// Caller side: fires the cancellation.
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

/// Pipeline side: observed while waiting on upstream calls.
#[derive(Debug, Clone)]
pub struct CancelSignal {
    rx: watch::Receiver<bool>,
}

impl CancelSignal {
    pub fn new() -> (CancelHandle, CancelSignal) {
        let (tx, rx) = watch::channel(false);
        (CancelHandle { tx }, CancelSignal { rx })
    }

    /// A signal that never fires.
    pub fn never() -> CancelSignal {
        let (_handle, signal) = Self::new();
        signal
    }

    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once the handle has fired. Pends forever if the handle is
    /// dropped without firing.
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        let closed = rx.wait_for(|cancelled| *cancelled).await.is_err();
        if closed {
            std::future::pending::<()>().await;
        }
    }

    /// Run `future` unless the signal fires first.
    pub async fn guard<F: Future>(&self, future: F) -> Result<F::Output, PlanError> {
        if self.is_cancelled() {
            return Err(PlanError::Cancelled);
        }
        tokio::select! {
            _ = self.cancelled() => Err(PlanError::Cancelled),
            output = future => Ok(output),
        }
    }
}

impl Default for CancelSignal {
    fn default() -> Self {
        Self::never()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_guard_passes_output_through() {
        let signal = CancelSignal::never();
        let value = signal.guard(async { 7 }).await;
        assert_eq!(value, Ok(7));
    }

    #[tokio::test]
    async fn test_guard_refuses_after_cancel() {
        let (handle, signal) = CancelSignal::new();
        handle.cancel();
        assert!(signal.is_cancelled());
        let value = signal.guard(async { 7 }).await;
        assert_eq!(value, Err(PlanError::Cancelled));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_interrupts_in_flight_future() {
        let (handle, signal) = CancelSignal::new();
        let task = tokio::spawn(async move {
            signal
                .guard(tokio::time::sleep(Duration::from_secs(3600)))
                .await
        });
        tokio::time::sleep(Duration::from_millis(10)).await;
        handle.cancel();
        assert_eq!(task.await.unwrap(), Err(PlanError::Cancelled));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_handle_does_not_cancel() {
        let (handle, signal) = CancelSignal::new();
        drop(handle);
        let value = signal
            .guard(async {
                tokio::time::sleep(Duration::from_millis(5)).await;
                "done"
            })
            .await;
        assert_eq!(value, Ok("done"));
    }
}
