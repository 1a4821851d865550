//! File exporter - saves encoded sheets into a directory

use super::sheet::OrderSheet;
use super::{ExportArtifact, ExportFormat, ExportGateway, ExportResult, SheetEncoder};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Writes each exported sheet to `{dir}/{file_stem}.{ext}`
#[derive(Debug, Clone)]
pub struct FileExporter {
    dir: PathBuf,
    encoder: Arc<dyn SheetEncoder>,
}

impl FileExporter {
    /// Workbook (xlsx) exporter
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::for_format(dir, ExportFormat::Xlsx)
    }

    pub fn for_format(dir: impl Into<PathBuf>, format: ExportFormat) -> Self {
        Self {
            dir: dir.into(),
            encoder: format.encoder(),
        }
    }

    pub fn with_encoder(dir: impl Into<PathBuf>, encoder: impl SheetEncoder + 'static) -> Self {
        Self {
            dir: dir.into(),
            encoder: Arc::new(encoder),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl ExportGateway for FileExporter {
    async fn export(&self, sheet: &OrderSheet) -> ExportResult<ExportArtifact> {
        let mut artifact = self.encoder.encode(sheet)?;
        tokio::fs::create_dir_all(&self.dir).await?;

        let path = self.dir.join(&artifact.file_name);
        tokio::fs::write(&path, &artifact.bytes).await?;
        tracing::info!(path = %path.display(), rows = sheet.rows.len(), "Sheet exported");

        artifact.location = Some(path);
        Ok(artifact)
    }
}
