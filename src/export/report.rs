use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::models::Table;
use crate::report::{render_document, ReportFormat, ReportLayout};
use super::Exporter;

pub struct ReportExporter {
    format: ReportFormat,
    title: String,
    layout: ReportLayout,
    generated_on: NaiveDate,
}

impl ReportExporter {
    pub fn new(format: ReportFormat, title: impl Into<String>, generated_on: NaiveDate) -> Self {
        Self {
            format,
            title: title.into(),
            layout: ReportLayout::default(),
            generated_on,
        }
    }

    pub fn with_layout(mut self, layout: ReportLayout) -> Self {
        self.layout = layout;
        self
    }
}

impl Exporter for ReportExporter {
    fn render(&self, table: &Table) -> Result<Vec<u8>> {
        let problems = self.layout.validate();
        if !problems.is_empty() {
            return Err(Error::Config(problems.join("; ")));
        }

        let document = render_document(
            table,
            &self.title,
            self.generated_on,
            &self.layout,
            self.format,
        );
        Ok(document.bytes)
    }

    fn mime(&self) -> &'static str {
        self.format.mime()
    }

    fn extension(&self) -> &'static str {
        self.format.extension()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Row;

    #[test]
    fn test_invalid_layout_is_rejected() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        let layout = ReportLayout {
            id_column_mm: 400.0,
            ..Default::default()
        };
        let exporter = ReportExporter::new(ReportFormat::Pdf, "Panel", date).with_layout(layout);
        let table = Table::new(vec![Row::new("1", "Hall", "")]);

        assert!(matches!(exporter.render(&table), Err(Error::Config(_))));
    }
}
