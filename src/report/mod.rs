//! Printable two-column report (group number and scope) of a panel table.
//!
//! [`render`] owns pagination and coordinates and talks to a [`Surface`];
//! each output format only has to implement the four drawing primitives.

pub mod html;
pub mod layout;
pub mod paginate;
pub mod pdf;
pub mod stream;

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::Table;

pub use html::HtmlSurface;
pub use layout::{ReportLabels, ReportLayout};
pub use paginate::{render, truncate_label, RenderSummary, ELLIPSIS};
pub use pdf::PdfSurface;
pub use stream::{DrawOp, Page, PageStream};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub size_pt: f32,
    pub bold: bool,
    pub align: Align,
}

impl TextStyle {
    pub fn regular(size_pt: f32, align: Align) -> Self {
        Self {
            size_pt,
            bold: false,
            align,
        }
    }

    pub fn bold(size_pt: f32, align: Align) -> Self {
        Self {
            size_pt,
            bold: true,
            align,
        }
    }
}

/// Drawing target for the paginator.
///
/// Coordinates are millimetres from the bottom-left corner of the page with
/// y growing upwards. `x` of a text call is its anchor: the left edge, the
/// centre or the right edge depending on [`Align`]; `y` is the baseline.
pub trait Surface {
    fn new_page(&mut self);
    fn text(&mut self, x: f32, y: f32, text: &str, style: TextStyle);
    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, width_pt: f32);
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, gray: f32);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    Pdf,
    Html,
}

impl ReportFormat {
    pub fn mime(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Html => "text/html",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Html => "html",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pdf => write!(f, "PDF"),
            Self::Html => write!(f, "HTML"),
        }
    }
}

/// A finished report, ready to be handed to whoever delivers it.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub format: ReportFormat,
    pub bytes: Vec<u8>,
    pub pages: usize,
}

pub fn render_document(
    table: &Table,
    title: &str,
    generated_on: NaiveDate,
    layout: &ReportLayout,
    format: ReportFormat,
) -> RenderedDocument {
    let (bytes, summary) = match format {
        ReportFormat::Pdf => {
            let mut surface = PdfSurface::new(layout.page_width_mm, layout.page_height_mm);
            let summary = render(table, title, generated_on, layout, &mut surface);
            (surface.finish(title), summary)
        }
        ReportFormat::Html => {
            let mut surface = HtmlSurface::new(layout.page_width_mm, layout.page_height_mm);
            let summary = render(table, title, generated_on, layout, &mut surface);
            (surface.finish(title).into_bytes(), summary)
        }
    };

    info!(
        "Rendered {} report: {} rows on {} pages ({} bytes)",
        format,
        summary.rows,
        summary.pages,
        bytes.len()
    );

    RenderedDocument {
        format,
        bytes,
        pages: summary.pages,
    }
}
