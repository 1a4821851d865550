//! NotificationCenter - transient messages with automatic expiry
//!
//! # Lifecycle
//!
//! ```text
//! post()
//!     ├─ 1. Append to queue (post order = display order)
//!     ├─ 2. Broadcast Posted
//!     └─ 3. Spawn expiry task: select { ttl elapsed, token cancelled }
//!
//! dismiss(id)                       expiry task fires
//!     ├─ cancel token                   └─ remove if still queued
//!     ├─ remove from queue                  └─ Broadcast Expired
//!     └─ Broadcast Dismissed
//! ```
//!
//! Each notification has its own timer; timers never reset or extend one
//! another. A dismissed notification's timer is cancelled before it fires.
//!
//! Every entry also carries its deadline. Reads prune entries past their
//! deadline, so notifications posted outside a runtime still expire.

use chrono::Utc;
use parking_lot::Mutex;
use shared::notification::{Notification, NotificationEvent, NotificationId, Severity};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Default display duration
pub const DEFAULT_TTL: Duration = Duration::from_millis(3000);

/// Event broadcast channel capacity
const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// Queued notification with its expiry token
struct Entry {
    notification: Notification,
    deadline: Instant,
    expiry: CancellationToken,
}

struct Inner {
    queue: Mutex<Vec<Entry>>,
    event_tx: broadcast::Sender<NotificationEvent>,
    sequence: AtomicU64,
    ttl: Duration,
}

impl Inner {
    /// Remove `id` from the queue
    fn take(&self, id: &NotificationId) -> Option<Entry> {
        let mut queue = self.queue.lock();
        let pos = queue.iter().position(|entry| &entry.notification.id == id)?;
        Some(queue.remove(pos))
    }

    fn expire(&self, id: &NotificationId) {
        if self.take(id).is_some() {
            self.announce_expired(id);
        }
    }

    /// Remove every entry whose deadline has passed
    fn prune_expired(&self) {
        let now = Instant::now();
        let expired: Vec<Entry> = {
            let mut queue = self.queue.lock();
            if !queue.iter().any(|entry| entry.deadline <= now) {
                return;
            }
            let (expired, live): (Vec<Entry>, Vec<Entry>) = std::mem::take(&mut *queue)
                .into_iter()
                .partition(|entry| entry.deadline <= now);
            *queue = live;
            expired
        };
        for entry in expired {
            entry.expiry.cancel();
            self.announce_expired(&entry.notification.id);
        }
    }

    fn announce_expired(&self, id: &NotificationId) {
        tracing::trace!(notification_id = %id, "Notification expired");
        let _ = self.event_tx.send(NotificationEvent::Expired { id: id.clone() });
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        for entry in self.queue.get_mut().iter() {
            entry.expiry.cancel();
        }
    }
}

/// Notification queue shared by the desk and UI subscribers
#[derive(Clone)]
pub struct NotificationCenter {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for NotificationCenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationCenter")
            .field("active", &self.inner.queue.lock().len())
            .field("ttl", &self.inner.ttl)
            .finish()
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl NotificationCenter {
    pub fn new(ttl: Duration) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                queue: Mutex::new(Vec::new()),
                event_tx,
                sequence: AtomicU64::new(0),
                ttl,
            }),
        }
    }

    /// Post a notification and schedule its removal after the TTL
    ///
    /// Outside a tokio runtime no timer is spawned; the entry is pruned by
    /// the first read after its deadline.
    pub fn post(&self, message: impl Into<String>, severity: Severity) -> NotificationId {
        let seq = self.inner.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let id = NotificationId::new(format!("toast-{}", seq));
        let notification = Notification {
            id: id.clone(),
            message: message.into(),
            severity,
            created_at: Utc::now().timestamp_millis(),
        };
        let expiry = CancellationToken::new();
        let deadline = Instant::now() + self.inner.ttl;

        self.inner.prune_expired();
        self.inner.queue.lock().push(Entry {
            notification: notification.clone(),
            deadline,
            expiry: expiry.clone(),
        });
        tracing::debug!(
            notification_id = %id,
            severity = %severity,
            message = %notification.message,
            "Notification posted"
        );
        let _ = self
            .inner
            .event_tx
            .send(NotificationEvent::Posted { notification });

        self.schedule_expiry(id.clone(), deadline, expiry);
        id
    }

    /// Remove a notification now; a no-op for unknown or already-removed IDs
    pub fn dismiss(&self, id: &NotificationId) -> bool {
        let Some(entry) = self.inner.take(id) else {
            return false;
        };
        entry.expiry.cancel();
        tracing::trace!(notification_id = %id, "Notification dismissed");
        let _ = self
            .inner
            .event_tx
            .send(NotificationEvent::Dismissed { id: id.clone() });
        true
    }

    /// Drop every active notification, broadcasting `Dismissed` for each
    pub fn clear(&self) {
        let drained: Vec<Entry> = self.inner.queue.lock().drain(..).collect();
        for entry in drained {
            entry.expiry.cancel();
            let _ = self.inner.event_tx.send(NotificationEvent::Dismissed {
                id: entry.notification.id,
            });
        }
    }

    /// Active notifications in post order
    pub fn active(&self) -> Vec<Notification> {
        self.inner.prune_expired();
        self.inner
            .queue
            .lock()
            .iter()
            .map(|entry| entry.notification.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner.prune_expired();
        self.inner.queue.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn ttl(&self) -> Duration {
        self.inner.ttl
    }

    /// Subscribe to lifecycle events
    pub fn subscribe(&self) -> broadcast::Receiver<NotificationEvent> {
        self.inner.event_tx.subscribe()
    }

    fn schedule_expiry(&self, id: NotificationId, deadline: Instant, expiry: CancellationToken) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            tracing::debug!(notification_id = %id, "No runtime, expiry left to reads");
            return;
        };
        let inner: Weak<Inner> = Arc::downgrade(&self.inner);

        handle.spawn(async move {
            tokio::select! {
                _ = expiry.cancelled() => {}
                _ = tokio::time::sleep_until(deadline) => {
                    if let Some(inner) = inner.upgrade() {
                        inner.expire(&id);
                    }
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tokio::time::sleep;

    #[tokio::test(start_paused = true)]
    async fn test_post_and_expire() {
        let center = NotificationCenter::default();
        let id = center.post("Added Panadol to cart", Severity::Success);

        let active = center.active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, id);
        assert_eq!(active[0].severity, Severity::Success);

        sleep(Duration::from_millis(2999)).await;
        assert_eq!(center.len(), 1);

        sleep(Duration::from_millis(2)).await;
        assert!(center.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_display_order_and_independent_timers() {
        let center = NotificationCenter::default();
        let first = center.post("first", Severity::Info);
        sleep(Duration::from_millis(1000)).await;
        let second = center.post("second", Severity::Error);

        let ids: Vec<NotificationId> = center.active().into_iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![first.clone(), second.clone()]);

        // first expires at 3000, second at 4000
        sleep(Duration::from_millis(2001)).await;
        let ids: Vec<NotificationId> = center.active().into_iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![second]);

        sleep(Duration::from_millis(1000)).await;
        assert!(center.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismiss_is_idempotent() {
        let center = NotificationCenter::default();
        let id = center.post("Cart cleared", Severity::Info);

        assert!(center.dismiss(&id));
        assert!(center.is_empty());
        assert!(!center.dismiss(&id));
        assert!(!center.dismiss(&NotificationId::from("toast-999")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismiss_cancels_expiry() {
        let center = NotificationCenter::default();
        let mut events = center.subscribe();
        let id = center.post("Removed Brufen from cart", Severity::Info);
        center.dismiss(&id);

        sleep(Duration::from_millis(5000)).await;

        assert!(matches!(events.try_recv(), Ok(NotificationEvent::Posted { .. })));
        assert_eq!(
            events.try_recv().unwrap(),
            NotificationEvent::Dismissed { id: id.clone() }
        );
        // No Expired event for a dismissed notification
        assert!(events.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_event() {
        let center = NotificationCenter::new(Duration::from_millis(500));
        let mut events = center.subscribe();
        let id = center.post("hello", Severity::Success);

        sleep(Duration::from_millis(501)).await;

        assert!(matches!(events.try_recv(), Ok(NotificationEvent::Posted { .. })));
        assert_eq!(events.try_recv().unwrap(), NotificationEvent::Expired { id });
    }

    #[tokio::test(start_paused = true)]
    async fn test_unique_ids_under_burst() {
        let center = NotificationCenter::default();
        let ids: Vec<NotificationId> = (0..50)
            .map(|n| center.post(format!("burst {}", n), Severity::Info))
            .collect();

        let unique: HashSet<&NotificationId> = ids.iter().collect();
        assert_eq!(unique.len(), 50);
        assert_eq!(center.len(), 50);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_broadcasts_dismissed() {
        let center = NotificationCenter::default();
        let a = center.post("a", Severity::Info);
        let b = center.post("b", Severity::Info);
        let mut events = center.subscribe();

        center.clear();
        assert!(center.is_empty());
        assert_eq!(events.try_recv().unwrap(), NotificationEvent::Dismissed { id: a });
        assert_eq!(events.try_recv().unwrap(), NotificationEvent::Dismissed { id: b });

        // Cancelled timers stay silent
        sleep(Duration::from_millis(5000)).await;
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn test_post_without_runtime() {
        let center = NotificationCenter::default();
        let id = center.post("no runtime", Severity::Info);
        assert_eq!(center.len(), 1);
        assert!(center.dismiss(&id));
    }

    #[test]
    fn test_expiry_without_runtime() {
        let center = NotificationCenter::new(Duration::from_millis(50));
        let mut events = center.subscribe();
        let ids: Vec<NotificationId> = (0..3)
            .map(|n| center.post(format!("sync {}", n), Severity::Info))
            .collect();
        assert_eq!(center.len(), 3);

        std::thread::sleep(Duration::from_millis(300));

        assert_eq!(center.len(), 0);
        assert!(center.active().is_empty());

        let seen: Vec<NotificationEvent> = std::iter::from_fn(|| events.try_recv().ok()).collect();
        assert_eq!(seen.len(), 6);
        assert!(seen[..3].iter().all(|e| matches!(e, NotificationEvent::Posted { .. })));
        assert!(seen[3..].iter().all(|e| matches!(e, NotificationEvent::Expired { .. })));
        let expired: Vec<&NotificationId> = seen[3..].iter().map(|e| e.id()).collect();
        assert_eq!(expired, ids.iter().collect::<Vec<_>>());
    }
}
