//! Catalog item and cart line item types

use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Catalog Item
// ============================================================================

/// Catalog item - immutable, read-only for the process lifetime
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    /// Item ID (numeric IDs in catalog data are normalized to strings)
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Display name
    pub name: String,
    /// Discount fraction in [0, 1]
    #[serde(alias = "disc", default)]
    pub discount: f64,
}

impl Item {
    pub fn new(id: impl Into<String>, name: impl Into<String>, discount: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            discount,
        }
    }

    /// Discount as a whole percentage (0.15 -> 15)
    pub fn discount_percent(&self) -> i64 {
        fraction_to_percent(self.discount)
    }
}

// ============================================================================
// Line Item
// ============================================================================

/// Cart line item - an item plus the requested quantity
///
/// `quantity` is always >= 1 while the line is in a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Item ID
    pub id: String,
    /// Item name snapshot
    pub name: String,
    /// Discount fraction snapshot
    pub discount: f64,
    /// Quantity
    pub quantity: u32,
}

impl LineItem {
    /// New line for `item` with quantity 1
    pub fn from_item(item: &Item) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            discount: item.discount,
            quantity: 1,
        }
    }

    /// Discount as a whole percentage (0.15 -> 15)
    pub fn discount_percent(&self) -> i64 {
        fraction_to_percent(self.discount)
    }

    /// Discount label used in exports, e.g. "15%"
    pub fn discount_label(&self) -> String {
        format!("{}%", self.discount_percent())
    }
}

/// Rounds half away from zero, so 0.125 becomes 13.
fn fraction_to_percent(fraction: f64) -> i64 {
    (fraction * 100.0).round() as i64
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Integer(i64),
        Unsigned(u64),
        Float(f64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Integer(n) => n.to_string(),
        RawId::Unsigned(n) => n.to_string(),
        RawId::Float(f) => f.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_accepts_id_above_i64_max() {
        let item: Item =
            serde_json::from_str(r#"{"id": 18446744073709551615, "name": "Panadol"}"#).unwrap();
        assert_eq!(item.id, "18446744073709551615");
        assert_eq!(item.discount, 0.0);
    }

    #[test]
    fn test_item_accepts_numeric_id_and_disc_alias() {
        let item: Item = serde_json::from_str(r#"{"id": 42, "name": "Panadol", "disc": 0.15}"#)
            .unwrap();
        assert_eq!(item.id, "42");
        assert_eq!(item.name, "Panadol");
        assert_eq!(item.discount, 0.15);
    }

    #[test]
    fn test_item_accepts_string_id_and_missing_discount() {
        let item: Item = serde_json::from_str(r#"{"id": "A-1", "name": "Brufen"}"#).unwrap();
        assert_eq!(item.id, "A-1");
        assert_eq!(item.discount, 0.0);
    }

    #[test]
    fn test_discount_label_rounds_to_whole_percent() {
        let mut line = LineItem::from_item(&Item::new("1", "Aspirin", 0.1));
        assert_eq!(line.discount_label(), "10%");

        line.discount = 0.125;
        assert_eq!(line.discount_label(), "13%");

        line.discount = 0.0;
        assert_eq!(line.discount_label(), "0%");
    }

    #[test]
    fn test_line_item_starts_at_quantity_one() {
        let line = LineItem::from_item(&Item::new("7", "Calpol", 0.2));
        assert_eq!(line.quantity, 1);
        assert_eq!(line.id, "7");
        assert_eq!(line.discount_percent(), 20);
    }
}
