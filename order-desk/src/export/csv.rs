//! CSV encoding (RFC 4180)

use super::sheet::{OrderSheet, SHEET_HEADERS};
use super::{ExportArtifact, ExportError, ExportGateway, ExportResult, SheetEncoder};
use async_trait::async_trait;

pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

/// Encodes sheets as CSV in memory
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvExporter;

impl CsvExporter {
    pub fn new() -> Self {
        Self
    }

    /// Header line plus one line per row, CRLF-terminated
    pub fn render(&self, sheet: &OrderSheet) -> String {
        let mut out = String::new();
        push_record(&mut out, SHEET_HEADERS.iter().copied());
        for row in &sheet.rows {
            let cells = row.cells();
            push_record(&mut out, cells.iter().map(String::as_str));
        }
        out
    }

    /// Encode `sheet` into an artifact named `{file_stem}.csv`
    pub fn encode(&self, sheet: &OrderSheet) -> ExportResult<ExportArtifact> {
        if sheet.is_empty() {
            return Err(ExportError::EmptySheet(sheet.file_stem.clone()));
        }
        Ok(ExportArtifact {
            file_name: format!("{}.csv", sheet.file_stem),
            content_type: CSV_CONTENT_TYPE.to_string(),
            bytes: self.render(sheet).into_bytes(),
            location: None,
        })
    }
}

impl SheetEncoder for CsvExporter {
    fn encode(&self, sheet: &OrderSheet) -> ExportResult<ExportArtifact> {
        CsvExporter::encode(self, sheet)
    }
}

#[async_trait]
impl ExportGateway for CsvExporter {
    async fn export(&self, sheet: &OrderSheet) -> ExportResult<ExportArtifact> {
        CsvExporter::encode(self, sheet)
    }
}

fn push_record<'a>(out: &mut String, fields: impl Iterator<Item = &'a str>) {
    for (i, field) in fields.enumerate() {
        if i > 0 {
            out.push(',');
        }
        push_field(out, field);
    }
    out.push_str("\r\n");
}

fn push_field(out: &mut String, field: &str) {
    if field.contains([',', '"', '\r', '\n']) {
        out.push('"');
        out.push_str(&field.replace('"', "\"\""));
        out.push('"');
    } else {
        out.push_str(field);
    }
}
