//! Order sheet - row model shared by every export format
//!
//! One row per line item, in the line-item order of the source order.

use crate::orders::OrderHistory;
use chrono::DateTime;
use chrono_tz::Tz;
use serde::Serialize;
use shared::order::OrderRecord;

/// Column headers in output order
pub const SHEET_HEADERS: [&str; 6] = [
    "Order ID",
    "Date",
    "Time",
    "Medicine Name",
    "Quantity",
    "Discount",
];

/// Sheet name for a single order
pub const ORDER_SHEET_NAME: &str = "Order Details";
/// Sheet name for the full history
pub const HISTORY_SHEET_NAME: &str = "All Orders";

/// One spreadsheet row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetRow {
    #[serde(rename = "Order ID")]
    pub order_id: String,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Time")]
    pub time: String,
    #[serde(rename = "Medicine Name")]
    pub name: String,
    #[serde(rename = "Quantity")]
    pub quantity: u32,
    /// Whole percentage, e.g. "15%"
    #[serde(rename = "Discount")]
    pub discount: String,
}

impl SheetRow {
    /// Cells in [`SHEET_HEADERS`] order
    pub fn cells(&self) -> [String; 6] {
        [
            self.order_id.clone(),
            self.date.clone(),
            self.time.clone(),
            self.name.clone(),
            self.quantity.to_string(),
            self.discount.clone(),
        ]
    }
}

/// Sheet ready for an export gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSheet {
    pub sheet_name: String,
    /// File name without extension
    pub file_stem: String,
    pub rows: Vec<SheetRow>,
}

impl OrderSheet {
    /// Sheet for a single order (`MediOrder_{orderId}`)
    pub fn for_order(record: &OrderRecord, tz: Tz) -> Self {
        Self {
            sheet_name: ORDER_SHEET_NAME.to_string(),
            file_stem: format!("MediOrder_{}", record.order_id()),
            rows: rows_for(record, tz).collect(),
        }
    }

    /// Sheet for every recorded order (`MediOrder_History_{millis}`)
    pub fn for_history(history: &OrderHistory, tz: Tz, generated_at: i64) -> Self {
        Self {
            sheet_name: HISTORY_SHEET_NAME.to_string(),
            file_stem: format!("MediOrder_History_{}", generated_at),
            rows: history.iter().flat_map(|record| rows_for(record, tz)).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn rows_for(record: &OrderRecord, tz: Tz) -> impl Iterator<Item = SheetRow> + '_ {
    let (date, time) = format_date_time(record.created_at(), tz);
    record.items().iter().map(move |line| SheetRow {
        order_id: record.order_id().to_string(),
        date: date.clone(),
        time: time.clone(),
        name: line.name.clone(),
        quantity: line.quantity,
        discount: line.discount_label(),
    })
}

/// `M/D/YYYY` and `h:mm:ss AM` in the given zone
fn format_date_time(millis: i64, tz: Tz) -> (String, String) {
    match DateTime::from_timestamp_millis(millis) {
        Some(utc) => {
            let local = utc.with_timezone(&tz);
            (
                local.format("%-m/%-d/%Y").to_string(),
                local.format("%-I:%M:%S %p").to_string(),
            )
        }
        None => {
            tracing::warn!(millis, "Order timestamp out of range");
            (String::new(), String::new())
        }
    }
}
