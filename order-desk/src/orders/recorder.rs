//! OrderRecorder - materializes a cart into an immutable order record

use super::history::OrderHistory;
use crate::cart::Cart;
use chrono::{DateTime, Utc};
use shared::order::OrderRecord;
use thiserror::Error;

/// Submission attempted with no line items
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("Cart is empty")]
pub struct EmptyCartError;

/// Order recorder
///
/// Order IDs combine the submission second with a per-session sequence
/// (`ORD-20260115093012-0007`), so two submissions in the same millisecond
/// still get distinct IDs. The sequence survives [`OrderRecorder::reset`].
#[derive(Debug, Default)]
pub struct OrderRecorder {
    history: OrderHistory,
    sequence: u64,
}

impl OrderRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current cart contents
    ///
    /// Fails without touching history when the cart is empty. The cart
    /// itself is left as is.
    pub fn submit(&mut self, cart: &Cart) -> Result<OrderRecord, EmptyCartError> {
        self.submit_at(cart, Utc::now())
    }

    /// Same as [`submit`](Self::submit) with an explicit submission time
    pub fn submit_at(
        &mut self,
        cart: &Cart,
        now: DateTime<Utc>,
    ) -> Result<OrderRecord, EmptyCartError> {
        if cart.is_empty() {
            tracing::warn!("Submit rejected: cart is empty");
            return Err(EmptyCartError);
        }

        let order_id = self.next_order_id(now);
        let record = OrderRecord::new(order_id, now.timestamp_millis(), cart.snapshot());
        tracing::info!(
            order_id = %record.order_id(),
            lines = record.items().len(),
            total_quantity = record.total_quantity(),
            "Order recorded"
        );
        self.history.append(record.clone());
        Ok(record)
    }

    pub fn history(&self) -> &OrderHistory {
        &self.history
    }

    /// Drop all recorded orders (full-session reset)
    pub fn reset(&mut self) {
        tracing::info!(orders = self.history.len(), "Order history reset");
        self.history.reset();
    }

    fn next_order_id(&mut self, now: DateTime<Utc>) -> String {
        self.sequence += 1;
        format!("ORD-{}-{:04}", now.format("%Y%m%d%H%M%S"), self.sequence)
    }
}
