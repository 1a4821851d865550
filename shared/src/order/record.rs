//! Order record - immutable snapshot of a submitted order

use super::types::LineItem;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Submitted order
///
/// Fields are private: a record is created once by the recorder and never
/// changes afterwards. `items` is an owned copy of the cart lines at
/// submission time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderRecord {
    order_id: String,
    /// Submission time (Unix millis)
    created_at: i64,
    items: Vec<LineItem>,
}

impl OrderRecord {
    pub fn new(order_id: impl Into<String>, created_at: i64, items: Vec<LineItem>) -> Self {
        Self {
            order_id: order_id.into(),
            created_at,
            items,
        }
    }

    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    /// Submission time in Unix millis
    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.created_at)
    }

    /// Line items in cart insertion order
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Sum of all line quantities
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }
}
