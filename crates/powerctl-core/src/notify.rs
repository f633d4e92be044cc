//! Pre-reboot observer notification

use tokio::sync::mpsc;
use tracing::debug;

/// No-payload notice published synchronously before teardown begins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RebootNotice;

/// Publish/subscribe fan-out for the reboot-imminent notification.
///
/// Subscribers register once and receive every subsequent publication.
/// Publication is synchronous and fire-and-forget; receivers that have
/// been dropped are skipped.
#[derive(Default)]
pub struct RebootNotifier {
    subscribers: Vec<mpsc::UnboundedSender<RebootNotice>>,
}

impl RebootNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer for the pre-reboot notification
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<RebootNotice> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Publish to all observers
    pub fn publish(&self) {
        debug!(
            subscribers = self.subscribers.len(),
            "Publishing reboot notice"
        );

        for tx in &self.subscribers {
            let _ = tx.send(RebootNotice);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_subscribers_receive() {
        let mut notifier = RebootNotifier::new();
        let mut rx1 = notifier.subscribe();
        let mut rx2 = notifier.subscribe();
        assert_eq!(notifier.subscriber_count(), 2);

        notifier.publish();

        assert_eq!(rx1.try_recv(), Ok(RebootNotice));
        assert_eq!(rx2.try_recv(), Ok(RebootNotice));
        assert!(rx1.try_recv().is_err());
    }

    #[test]
    fn dropped_subscriber_is_ignored() {
        let mut notifier = RebootNotifier::new();
        let rx1 = notifier.subscribe();
        let mut rx2 = notifier.subscribe();

        drop(rx1);
        notifier.publish();

        assert_eq!(rx2.try_recv(), Ok(RebootNotice));
    }

    #[test]
    fn publish_with_no_subscribers_is_a_noop() {
        let notifier = RebootNotifier::new();
        notifier.publish();
    }
}
