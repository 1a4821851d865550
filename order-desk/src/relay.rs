//! Relay Link Builder - pre-filled messaging link for a recorded order

use crate::core::Config;
use shared::order::OrderRecord;
use std::fmt::Write as _;
use thiserror::Error;

/// Relay errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RelayError {
    #[error("Relay contact is not configured")]
    MissingContact,

    #[error("Invalid relay base URL: {0}")]
    InvalidBaseUrl(String),
}

/// Builds `{base}/{contact}?text={summary}` links
#[derive(Debug, Clone)]
pub struct RelayLinkBuilder {
    base_url: String,
    contact: String,
}

impl RelayLinkBuilder {
    pub fn new(base_url: impl Into<String>, contact: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            contact: contact.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.relay_base_url, &config.relay_contact)
    }

    /// Human-readable order summary
    ///
    /// ```text
    /// 📋 *ORDER DETAILS #ORD-...*
    ///
    /// *Items:*
    /// - Aspirin x2 (10% disc)
    ///
    /// *Total Items: 2*
    /// ```
    pub fn summary(record: &OrderRecord) -> String {
        let mut message = format!("📋 *ORDER DETAILS #{}*\n\n", record.order_id());
        message.push_str("*Items:*\n");
        for line in record.items() {
            let _ = write!(message, "- {} x{}", line.name, line.quantity);
            if line.discount > 0.0 {
                let _ = write!(message, " ({}% disc)", line.discount_percent());
            }
            message.push('\n');
        }
        let _ = write!(message, "\n*Total Items: {}*\n", record.total_quantity());
        message.push_str("\n Your order has been placed. ");
        message
    }

    /// Link carrying `summary` as percent-encoded text
    pub fn build(&self, summary: &str) -> Result<String, RelayError> {
        let contact: String = self.contact.chars().filter(|c| !c.is_whitespace()).collect();
        if contact.is_empty() {
            return Err(RelayError::MissingContact);
        }

        let base = self.base_url.trim().trim_end_matches('/');
        if !(base.starts_with("https://") || base.starts_with("http://")) {
            return Err(RelayError::InvalidBaseUrl(self.base_url.clone()));
        }

        Ok(format!(
            "{}/{}?text={}",
            base,
            contact,
            urlencoding::encode(summary)
        ))
    }

    /// Summary + link for a recorded order
    pub fn link_for(&self, record: &OrderRecord) -> Result<String, RelayError> {
        self.build(&Self::summary(record))
    }
}
