//! Cart Ledger - line items of the order in progress
//!
//! Operations return their user feedback as a [`Notice`] instead of posting
//! it, so the ledger stays synchronous and free of UI concerns. The desk
//! decides where notices go.
//!
//! # Invariants
//!
//! - at most one line per item ID
//! - every line has `quantity >= 1`; a line that would reach 0 is removed
//! - lines keep insertion order

use shared::notification::Severity;
use shared::order::{Item, LineItem};

/// User feedback produced by a cart operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub severity: Severity,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Success,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Info,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
        }
    }
}

/// Result of [`Cart::add`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddOutcome {
    pub notice: Notice,
    /// Quantity of the line after the add
    pub quantity: u32,
    /// The caller should clear its search input
    pub clear_search: bool,
}

/// Cart for the order in progress
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<LineItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `item`, merging with an existing line
    ///
    /// Quantities are capped at `u32::MAX`; adding to a capped line leaves
    /// it unchanged and reports the cap instead.
    pub fn add(&mut self, item: &Item) -> AddOutcome {
        let (notice, quantity) = match self.position(&item.id) {
            Some(pos) => {
                let line = &mut self.lines[pos];
                match line.quantity.checked_add(1) {
                    Some(quantity) => {
                        line.quantity = quantity;
                        (
                            Notice::success(format!("Increased quantity of {}", item.name)),
                            quantity,
                        )
                    }
                    None => (
                        Notice::info(format!("Maximum quantity of {} reached", item.name)),
                        line.quantity,
                    ),
                }
            }
            None => {
                self.lines.push(LineItem::from_item(item));
                (Notice::success(format!("Added {} to cart", item.name)), 1)
            }
        };
        tracing::debug!(item_id = %item.id, quantity, "Item added to cart");
        AddOutcome {
            notice,
            quantity,
            clear_search: true,
        }
    }

    /// Change a line's quantity by `delta`, clamping at zero
    ///
    /// Returns `None` when nothing changed (unknown ID, zero delta, or an
    /// increase on a line already at `u32::MAX`).
    pub fn update_quantity(&mut self, id: &str, delta: i64) -> Option<Notice> {
        let pos = self.position(id)?;
        if delta == 0 {
            return None;
        }

        let old_quantity = i64::from(self.lines[pos].quantity);
        let new_quantity = old_quantity
            .saturating_add(delta)
            .clamp(0, i64::from(u32::MAX));
        if new_quantity == old_quantity {
            return None;
        }

        if new_quantity == 0 {
            let line = self.lines.remove(pos);
            tracing::debug!(item_id = %id, "Item removed from cart");
            return Some(Notice::info(format!("Removed {} from cart", line.name)));
        }

        let line = &mut self.lines[pos];
        line.quantity = u32::try_from(new_quantity).unwrap_or(u32::MAX);
        tracing::debug!(item_id = %id, quantity = line.quantity, "Item quantity updated");
        let message = if delta > 0 {
            format!("Increased quantity of {}", line.name)
        } else {
            format!("Decreased quantity of {}", line.name)
        };
        Some(Notice::info(message))
    }

    /// Remove a line regardless of its quantity
    pub fn remove(&mut self, id: &str) -> Option<Notice> {
        let pos = self.position(id)?;
        let line = self.lines.remove(pos);
        tracing::debug!(item_id = %id, "Item removed from cart");
        Some(Notice::info(format!("Removed {} from cart", line.name)))
    }

    /// Empty the cart; no notice when it is already empty
    pub fn clear(&mut self) -> Option<Notice> {
        if self.lines.is_empty() {
            return None;
        }
        self.lines.clear();
        tracing::debug!("Cart cleared");
        Some(Notice::info("Cart cleared"))
    }

    /// Empty the cart without feedback (after a successful submission)
    pub(crate) fn reset(&mut self) {
        self.lines.clear();
    }

    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Lines in insertion order
    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    /// Owned copy of the current lines
    pub fn snapshot(&self) -> Vec<LineItem> {
        self.lines.clone()
    }

    pub fn get(&self, id: &str) -> Option<&LineItem> {
        self.lines.iter().find(|line| line.id == id)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.lines.iter().position(|line| line.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panadol() -> Item {
        Item::new("1", "Panadol", 0.0)
    }

    fn brufen() -> Item {
        Item::new("2", "Brufen", 0.2)
    }

    #[test]
    fn test_add_new_and_existing() {
        let mut cart = Cart::new();

        let outcome = cart.add(&panadol());
        assert_eq!(outcome.notice, Notice::success("Added Panadol to cart"));
        assert_eq!(outcome.quantity, 1);
        assert!(outcome.clear_search);

        let outcome = cart.add(&panadol());
        assert_eq!(outcome.notice, Notice::success("Increased quantity of Panadol"));
        assert_eq!(outcome.quantity, 2);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_repeated_adds_merge_into_one_line() {
        let mut cart = Cart::new();
        for _ in 0..7 {
            cart.add(&brufen());
        }
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get("2").unwrap().quantity, 7);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut cart = Cart::new();
        cart.add(&brufen());
        cart.add(&panadol());
        cart.add(&brufen());

        let ids: Vec<&str> = cart.lines().iter().map(|line| line.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);
    }

    #[test]
    fn test_update_quantity_zero_delta_is_noop() {
        let mut cart = Cart::new();
        cart.add(&panadol());
        let before = cart.snapshot();

        assert_eq!(cart.update_quantity("1", 0), None);
        assert_eq!(cart.snapshot(), before);
    }

    #[test]
    fn test_update_quantity_unknown_id_is_noop() {
        let mut cart = Cart::new();
        cart.add(&panadol());
        assert_eq!(cart.update_quantity("missing", 3), None);
        assert_eq!(cart.total_quantity(), 1);
    }

    #[test]
    fn test_update_quantity_increase_and_decrease() {
        let mut cart = Cart::new();
        cart.add(&panadol());

        let notice = cart.update_quantity("1", 2).unwrap();
        assert_eq!(notice, Notice::info("Increased quantity of Panadol"));
        assert_eq!(cart.get("1").unwrap().quantity, 3);

        let notice = cart.update_quantity("1", -1).unwrap();
        assert_eq!(notice, Notice::info("Decreased quantity of Panadol"));
        assert_eq!(cart.get("1").unwrap().quantity, 2);
    }

    #[test]
    fn test_update_quantity_to_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add(&panadol());
        cart.add(&panadol());
        cart.add(&brufen());

        let notice = cart.update_quantity("1", -2).unwrap();
        assert_eq!(notice, Notice::info("Removed Panadol from cart"));
        assert!(cart.get("1").is_none());
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_update_quantity_clamps_underflow() {
        let mut cart = Cart::new();
        cart.add(&panadol());

        let notice = cart.update_quantity("1", -10).unwrap();
        assert_eq!(notice.message, "Removed Panadol from cart");
        assert!(cart.is_empty());
        assert!(cart.lines().iter().all(|line| line.quantity >= 1));
    }

    #[test]
    fn test_quantity_cap() {
        let mut cart = Cart::new();
        let item = Item::new("1", "Panadol", 0.0);
        cart.add(&item);
        cart.lines[0].quantity = u32::MAX;

        let outcome = cart.add(&item);
        assert_eq!(outcome.quantity, u32::MAX);
        assert_eq!(outcome.notice, Notice::info("Maximum quantity of Panadol reached"));

        assert_eq!(cart.update_quantity("1", 5), None);
        assert_eq!(cart.lines()[0].quantity, u32::MAX);

        assert_eq!(
            cart.update_quantity("1", -1),
            Some(Notice::info("Decreased quantity of Panadol"))
        );
        assert_eq!(cart.lines()[0].quantity, u32::MAX - 1);
    }

    #[test]
    fn test_remove() {
        let mut cart = Cart::new();
        cart.add(&panadol());
        cart.add(&panadol());

        assert_eq!(cart.remove("1"), Some(Notice::info("Removed Panadol from cart")));
        assert!(cart.is_empty());
        assert_eq!(cart.remove("1"), None);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        assert_eq!(cart.clear(), None);

        cart.add(&panadol());
        cart.add(&brufen());
        assert_eq!(cart.clear(), Some(Notice::info("Cart cleared")));
        assert!(cart.is_empty());
        assert_eq!(cart.clear(), None);
    }

    #[test]
    fn test_total_quantity() {
        let mut cart = Cart::new();
        assert_eq!(cart.total_quantity(), 0);
        cart.add(&panadol());
        cart.add(&panadol());
        cart.add(&brufen());
        assert_eq!(cart.total_quantity(), 3);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut cart = Cart::new();
        cart.add(&panadol());
        let snapshot = cart.snapshot();

        cart.add(&panadol());
        assert_eq!(snapshot[0].quantity, 1);
        assert_eq!(cart.get("1").unwrap().quantity, 2);
    }
}
