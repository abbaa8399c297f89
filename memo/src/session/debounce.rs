use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;

/// Single-slot cancelable delayed delivery.
///
/// Arming schedules `message` to be sent after `delay`; arming again or
/// calling [`Debouncer::cancel`] drops whatever was scheduled before. At most
/// one timer is live at any time.
#[derive(Debug, Default)]
pub struct Debouncer {
    slot: Option<CancellationToken>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm<T: Send + 'static>(&mut self, delay: Duration, tx: UnboundedSender<T>, message: T) {
        self.cancel();

        let token = CancellationToken::new();
        let cancelled = token.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = cancelled.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    let _ = tx.send(message);
                }
            }
        });

        self.slot = Some(token);
    }

    pub fn cancel(&mut self) {
        if let Some(token) = self.slot.take() {
            token.cancel();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn test_rearm_keeps_only_last_message() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new();

        for text in ["a", "ab", "abc"] {
            debouncer.arm(Duration::from_millis(300), tx.clone(), text);
            tokio::time::sleep(Duration::from_millis(100)).await;
        }

        assert_eq!(rx.recv().await, Some("abc"));

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_delay_not_before() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new();

        debouncer.arm(Duration::from_millis(300), tx, 1u8);

        tokio::time::sleep(Duration::from_millis(299)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(rx.try_recv().ok(), Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_disarms() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new();

        debouncer.arm(Duration::from_millis(300), tx, ());
        debouncer.cancel();

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(rx.try_recv().is_err());
    }
}
