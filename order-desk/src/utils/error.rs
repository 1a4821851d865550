//! 统一错误处理
//!
//! [`DeskError`] is the error type at the desk boundary. Every variant maps
//! to exactly one user-facing message; the desk posts that message as an
//! error notification before handing the error back to the caller.
//!
//! | Variant | Source | Notification |
//! |---------|--------|--------------|
//! | `EmptyCart` | submit with no lines | "Your cart is empty" |
//! | `NoHistory` | history download with no orders | "No order history available" |
//! | `OrderNotFound` | re-export of an unknown order | "Order ... not found" |
//! | `ItemNotFound` | add by unknown catalog ID | "Item ... not found" |
//! | `Export` | export gateway failure | "Error exporting order. Please try again." |
//! | `Relay` | relay link failure | "Error sending order. Please try again." |

use crate::export::ExportError;
use crate::orders::EmptyCartError;
use crate::relay::RelayError;
use thiserror::Error;

/// Desk errors
#[derive(Debug, Error)]
pub enum DeskError {
    #[error("Cart is empty")]
    EmptyCart,

    #[error("No order history available")]
    NoHistory,

    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("Relay failed: {0}")]
    Relay(#[from] RelayError),
}

impl DeskError {
    /// Message shown to the user as an error notification
    pub fn user_message(&self) -> String {
        match self {
            DeskError::EmptyCart => "Your cart is empty".to_string(),
            DeskError::NoHistory => "No order history available".to_string(),
            DeskError::OrderNotFound(id) => format!("Order {} not found", id),
            DeskError::ItemNotFound(id) => format!("Item {} not found", id),
            DeskError::Export(_) => "Error exporting order. Please try again.".to_string(),
            DeskError::Relay(_) => "Error sending order. Please try again.".to_string(),
        }
    }
}

impl From<EmptyCartError> for DeskError {
    fn from(_: EmptyCartError) -> Self {
        DeskError::EmptyCart
    }
}

pub type DeskResult<T> = Result<T, DeskError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        assert_eq!(DeskError::EmptyCart.user_message(), "Your cart is empty");
        assert_eq!(DeskError::from(EmptyCartError).user_message(), "Your cart is empty");
        assert_eq!(
            DeskError::OrderNotFound("ORD-1".into()).user_message(),
            "Order ORD-1 not found"
        );
        assert_eq!(
            DeskError::Relay(RelayError::MissingContact).user_message(),
            "Error sending order. Please try again."
        );
    }
}
