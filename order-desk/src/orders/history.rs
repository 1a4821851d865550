//! Order history - append-only for the session lifetime

use shared::order::OrderRecord;

/// Recorded orders in submission order
#[derive(Debug, Clone, Default)]
pub struct OrderHistory {
    records: Vec<OrderRecord>,
}

impl OrderHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn append(&mut self, record: OrderRecord) {
        self.records.push(record);
    }

    /// Explicit full-session reset
    pub(crate) fn reset(&mut self) {
        self.records.clear();
    }

    pub fn records(&self) -> &[OrderRecord] {
        &self.records
    }

    pub fn get(&self, order_id: &str) -> Option<&OrderRecord> {
        self.records.iter().find(|record| record.order_id() == order_id)
    }

    pub fn latest(&self) -> Option<&OrderRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &OrderRecord> {
        self.records.iter()
    }
}
