//! Shared types for the order desk
//!
//! Plain data types used across crates: catalog items, cart line items,
//! immutable order records and user-facing notifications.

pub mod notification;
pub mod order;

// Re-exports
pub use notification::{Notification, NotificationEvent, NotificationId, Severity};
pub use order::{Item, LineItem, OrderRecord};
pub use serde::{Deserialize, Serialize};
