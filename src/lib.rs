//! Panel schedule editing core: tab-separated import/export, download file
//! naming and the paginated printable report.

pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod naming;
pub mod report;
pub mod tsv;

pub use error::{Error, Result};
pub use models::{Row, Table};
pub use naming::{slug, ExportNaming};
pub use report::{render, render_document, RenderedDocument, ReportFormat, ReportLayout, Surface};
pub use tsv::{normalize, serialize};
