use ackboard_types::{PROGRESS_TOPIC, ProgressUpdated};
use std::sync::Mutex;
use tokio::sync::broadcast;
use tracing::trace;

/// Publish side of the in-process notification channel.
///
/// Delivery reaches only subscribers alive in this execution context at
/// publish time; there is no replay for late subscribers. A subscriber that
/// joins after a publish must reconcile via its own store read instead.
pub trait ProgressBus: Send + Sync {
    fn publish(&self, event: ProgressUpdated);
}

/// Default channel capacity; lagging subscribers drop the oldest events,
/// which is acceptable because the store remains the source of truth.
const DEFAULT_CAPACITY: usize = 16;

/// [`ProgressBus`] over a `tokio::sync::broadcast` channel.
#[derive(Clone, Debug)]
pub struct BroadcastBus {
    tx: broadcast::Sender<ProgressUpdated>,
}

impl BroadcastBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(DEFAULT_CAPACITY);
        Self { tx }
    }

    /// Subscribe from this point forward; nothing published earlier is seen.
    pub fn subscribe(&self) -> broadcast::Receiver<ProgressUpdated> {
        self.tx.subscribe()
    }
}

impl Default for BroadcastBus {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressBus for BroadcastBus {
    fn publish(&self, event: ProgressUpdated) {
        trace!(topic = PROGRESS_TOPIC, course_id = %event.course_id, "publishing progress event");
        // A send with zero subscribers is fine: the event is a fast-path
        // notification, not state.
        let _ = self.tx.send(event);
    }
}

/// Test double that records every published event in order.
#[derive(Debug, Default)]
pub struct RecordingBus {
    events: Mutex<Vec<ProgressUpdated>>,
}

impl RecordingBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ProgressUpdated> {
        self.events.lock().expect("bus mutex poisoned").clone()
    }
}

impl ProgressBus for RecordingBus {
    fn publish(&self, event: ProgressUpdated) {
        self.events.lock().expect("bus mutex poisoned").push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ackboard_types::CourseId;

    fn event(completed: u32) -> ProgressUpdated {
        ProgressUpdated {
            course_id: CourseId::new("3"),
            completed_count: completed,
            total_count: 2,
        }
    }

    #[tokio::test]
    async fn live_subscriber_receives_published_event() {
        let bus = BroadcastBus::new();
        let mut rx = bus.subscribe();

        bus.publish(event(1));

        assert_eq!(rx.recv().await.unwrap(), event(1));
    }

    #[tokio::test]
    async fn late_subscriber_sees_nothing_prior() {
        let bus = BroadcastBus::new();
        let mut early = bus.subscribe();
        bus.publish(event(1));

        let mut late = bus.subscribe();
        bus.publish(event(2));

        assert_eq!(early.recv().await.unwrap(), event(1));
        assert_eq!(early.recv().await.unwrap(), event(2));
        // The late subscriber's first delivery is the post-subscribe event.
        assert_eq!(late.recv().await.unwrap(), event(2));
    }

    #[test]
    fn publish_without_subscribers_is_a_no_op() {
        let bus = BroadcastBus::new();
        bus.publish(event(1));
    }
}
