//! Workbook encoding
//!
//! Header names come from the serde renames on [`SheetRow`], so the xlsx
//! and CSV columns stay identical.
//!
//! [`SheetRow`]: super::SheetRow

use super::sheet::OrderSheet;
use super::{ExportArtifact, ExportError, ExportGateway, ExportResult, SheetEncoder};
use async_trait::async_trait;
use rust_xlsxwriter::Workbook;

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Encodes sheets as a single-worksheet workbook named after the sheet
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxExporter;

impl XlsxExporter {
    pub fn new() -> Self {
        Self
    }

    /// Workbook bytes with a header row plus one row per line item
    pub fn render(&self, sheet: &OrderSheet) -> ExportResult<Vec<u8>> {
        let Some(first) = sheet.rows.first() else {
            return Err(ExportError::EmptySheet(sheet.file_stem.clone()));
        };

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&sheet.sheet_name)?;
        worksheet.serialize_headers(0, 0, first)?;
        for row in &sheet.rows {
            worksheet.serialize(row)?;
        }
        worksheet.autofit();

        Ok(workbook.save_to_buffer()?)
    }
}

impl SheetEncoder for XlsxExporter {
    /// Artifact named `{file_stem}.xlsx`
    fn encode(&self, sheet: &OrderSheet) -> ExportResult<ExportArtifact> {
        Ok(ExportArtifact {
            file_name: format!("{}.xlsx", sheet.file_stem),
            content_type: XLSX_CONTENT_TYPE.to_string(),
            bytes: self.render(sheet)?,
            location: None,
        })
    }
}

#[async_trait]
impl ExportGateway for XlsxExporter {
    async fn export(&self, sheet: &OrderSheet) -> ExportResult<ExportArtifact> {
        self.encode(sheet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::SheetRow;
    use crate::export::sheet::{HISTORY_SHEET_NAME, ORDER_SHEET_NAME};

    fn sheet(sheet_name: &str, rows: usize) -> OrderSheet {
        OrderSheet {
            sheet_name: sheet_name.to_string(),
            file_stem: "MediOrder_ORD-3".to_string(),
            rows: (0..rows)
                .map(|n| SheetRow {
                    order_id: "ORD-3".to_string(),
                    date: "3/7/2026".to_string(),
                    time: "2:05:09 PM".to_string(),
                    name: format!("Item {}", n),
                    quantity: 2,
                    discount: "10%".to_string(),
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_export_workbook() {
        let artifact = XlsxExporter::new()
            .export(&sheet(ORDER_SHEET_NAME, 2))
            .await
            .unwrap();
        assert_eq!(artifact.file_name, "MediOrder_ORD-3.xlsx");
        assert_eq!(artifact.content_type, XLSX_CONTENT_TYPE);
        assert!(artifact.location.is_none());
        // Zip container
        assert!(artifact.bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_history_sheet_name_accepted() {
        assert!(XlsxExporter::new().render(&sheet(HISTORY_SHEET_NAME, 1)).is_ok());
    }

    #[test]
    fn test_sheet_name_reaches_worksheet() {
        // Worksheet names may not contain brackets
        let result = XlsxExporter::new().render(&sheet("Orders [draft]", 1));
        assert!(matches!(result, Err(ExportError::Xlsx(_))));
    }

    #[test]
    fn test_empty_sheet_rejected() {
        let result = XlsxExporter::new().encode(&sheet(ORDER_SHEET_NAME, 0));
        assert!(matches!(result, Err(ExportError::EmptySheet(_))));
    }
}
