//! Order types
//!
//! - Items: read-only catalog entries
//! - Line items: an item plus the quantity requested in the cart
//! - Records: immutable snapshots of submitted orders

pub mod record;
pub mod types;

// Re-exports
pub use record::OrderRecord;
pub use types::*;
