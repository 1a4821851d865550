//! Export Gateway
//!
//! Turns an order (or the whole history) into a downloadable sheet.
//!
//! - **sheet**: row model, headers and date/discount formatting
//! - **xlsx**: workbook encoding, one named worksheet per sheet
//! - **csv**: in-memory CSV encoding
//! - **file**: encoded sheets written into the export directory
//!
//! The desk only depends on the [`ExportGateway`] trait; front ends can
//! plug in their own spreadsheet writer.

pub mod csv;
pub mod file;
pub mod sheet;
pub mod xlsx;

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

// Re-exports
pub use csv::CsvExporter;
pub use file::FileExporter;
pub use sheet::{OrderSheet, SHEET_HEADERS, SheetRow};
pub use xlsx::XlsxExporter;

/// Export errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Nothing to export: {0}")]
    EmptySheet(String),

    #[error("Workbook error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("Export rejected: {0}")]
    Rejected(String),
}

pub type ExportResult<T> = Result<T, ExportError>;

/// Serialized export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    /// Where the artifact was saved, if it was saved
    pub location: Option<PathBuf>,
}

/// Sheet serializer / saver
#[async_trait]
pub trait ExportGateway: Send + Sync {
    async fn export(&self, sheet: &OrderSheet) -> ExportResult<ExportArtifact>;
}

/// In-memory encoding of a sheet into one file format
pub trait SheetEncoder: Send + Sync + std::fmt::Debug {
    fn encode(&self, sheet: &OrderSheet) -> ExportResult<ExportArtifact>;
}

/// File format used by [`FileExporter`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Xlsx,
    Csv,
}

impl ExportFormat {
    /// Case-insensitive `xlsx` / `csv`
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "xlsx" => Some(Self::Xlsx),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }

    pub fn encoder(self) -> Arc<dyn SheetEncoder> {
        match self {
            Self::Xlsx => Arc::new(XlsxExporter::new()),
            Self::Csv => Arc::new(CsvExporter::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_format_parse() {
        assert_eq!(ExportFormat::parse("xlsx"), Some(ExportFormat::Xlsx));
        assert_eq!(ExportFormat::parse(" CSV "), Some(ExportFormat::Csv));
        assert_eq!(ExportFormat::parse("pdf"), None);
        assert_eq!(ExportFormat::default(), ExportFormat::Xlsx);
    }
}
