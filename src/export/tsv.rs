use crate::error::Result;
use crate::models::Table;
use crate::tsv;
use super::Exporter;

pub const TSV_MIME: &str = "text/tab-separated-values";

pub struct TsvExporter {
    include_header: bool,
}

impl Default for TsvExporter {
    fn default() -> Self {
        Self {
            include_header: true,
        }
    }
}

impl TsvExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header(mut self, include_header: bool) -> Self {
        self.include_header = include_header;
        self
    }
}

impl Exporter for TsvExporter {
    fn render(&self, table: &Table) -> Result<Vec<u8>> {
        Ok(tsv::serialize(table, self.include_header)?.into_bytes())
    }

    fn mime(&self) -> &'static str {
        TSV_MIME
    }

    fn extension(&self) -> &'static str {
        "tsv"
    }
}
