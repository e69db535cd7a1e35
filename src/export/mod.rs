pub mod report;
pub mod tsv;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{Error, Result};
use crate::models::Table;
use crate::naming::ExportNaming;

pub use report::ReportExporter;
pub use tsv::TsvExporter;

pub trait Exporter {
    fn render(&self, table: &Table) -> Result<Vec<u8>>;
    fn mime(&self) -> &'static str;
    fn extension(&self) -> &'static str;
}

/// One exported file: name, content type and payload.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl Artifact {
    pub fn build(exporter: &dyn Exporter, table: &Table, naming: &ExportNaming) -> Result<Self> {
        Ok(Self {
            file_name: naming.file_name(exporter.extension()),
            mime: exporter.mime(),
            bytes: exporter.render(table)?,
        })
    }

    pub fn save_into(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir).map_err(|source| Error::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let path = dir.join(&self.file_name);
        fs::write(&path, &self.bytes).map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;

        info!("Exported {} ({}, {} bytes)", path.display(), self.mime, self.bytes.len());
        Ok(path)
    }
}

pub fn export_to_clipboard(table: &Table, include_header: bool) -> Result<String> {
    crate::tsv::serialize(table, include_header)
}
