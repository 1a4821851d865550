//! Order recording
//!
//! - **recorder**: turns a finalized cart into an immutable [`OrderRecord`]
//! - **history**: append-only list of recorded orders for the session
//!
//! # Data Flow
//!
//! ```text
//! Cart ──submit──▶ OrderRecorder ──append──▶ OrderHistory
//!                       │
//!                       └──▶ OrderRecord (returned to caller for export/relay)
//! ```
//!
//! The recorder never clears the cart. Export can be retried from history
//! without submitting again.

pub mod history;
pub mod recorder;

// Re-exports
pub use history::OrderHistory;
pub use recorder::{EmptyCartError, OrderRecorder};

// Re-export shared types for convenience
pub use shared::order::OrderRecord;
