use std::borrow::Cow;

use chrono::NaiveDate;
use tracing::debug;

use super::layout::MM_PER_PT;
use super::pdf::{char_width_pt, text_width_pt};
use super::{Align, ReportLayout, Surface, TextStyle};
use crate::models::{Row, Table};

pub const ELLIPSIS: char = '…';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSummary {
    pub pages: usize,
    pub rows: usize,
}

/// Cuts `label` to at most `max_chars` characters, the last being an ellipsis.
pub fn truncate_label(label: &str, max_chars: usize) -> Cow<'_, str> {
    if label.chars().count() <= max_chars {
        return Cow::Borrowed(label);
    }

    let mut cut: String = label.chars().take(max_chars.saturating_sub(1)).collect();
    cut.push(ELLIPSIS);
    Cow::Owned(cut)
}

/// Applies the character budget, then shortens the label further until it
/// measures no wider than `max_width_mm` in regular Helvetica at `size_pt`.
pub fn fit_label(label: &str, max_chars: usize, max_width_mm: f32, size_pt: f32) -> Cow<'_, str> {
    let cut = truncate_label(label, max_chars);
    if text_width_pt(&cut, false, size_pt) * MM_PER_PT <= max_width_mm {
        return cut;
    }

    let budget_pt = max_width_mm / MM_PER_PT - char_width_pt(ELLIPSIS, false, size_pt);
    let mut used = 0.0;
    let mut fitted = String::new();
    for c in label.chars().take(max_chars.saturating_sub(1)) {
        used += char_width_pt(c, false, size_pt);
        if used > budget_pt {
            break;
        }
        fitted.push(c);
    }
    fitted.truncate(fitted.trim_end().len());
    fitted.push(ELLIPSIS);
    Cow::Owned(fitted)
}

/// Lays out the ID and Label columns of `table` onto `surface`, breaking
/// pages whenever the next row would run into the footer band.
pub fn render<S: Surface>(
    table: &Table,
    title: &str,
    generated_on: NaiveDate,
    layout: &ReportLayout,
    surface: &mut S,
) -> RenderSummary {
    let mut writer = PageWriter {
        layout,
        surface,
        title,
        date: generated_on.format("%Y-%m-%d").to_string(),
        total_rows: table.len(),
        cursor: 0.0,
        rows_on_page: 0,
        pages: 0,
    };

    writer.start_page();
    for row in &table.rows {
        let bottom = writer.cursor - layout.row_height_mm;
        // A row that does not fit even on a fresh page is drawn anyway.
        if bottom < layout.min_row_bottom() - 1e-3 && writer.rows_on_page > 0 {
            writer.close_page();
            writer.start_page();
        }
        writer.draw_row(row);
    }
    writer.close_page();

    RenderSummary {
        pages: writer.pages,
        rows: table.len(),
    }
}

struct PageWriter<'a, S> {
    layout: &'a ReportLayout,
    surface: &'a mut S,
    title: &'a str,
    date: String,
    total_rows: usize,
    cursor: f32,
    rows_on_page: usize,
    pages: usize,
}

impl<S: Surface> PageWriter<'_, S> {
    fn start_page(&mut self) {
        self.surface.new_page();
        self.pages += 1;
        self.draw_page_header();
        self.draw_table_header();
        self.cursor = self.layout.first_row_top();
        self.rows_on_page = 0;
    }

    fn draw_page_header(&mut self) {
        let l = self.layout;
        let top = l.top();
        let body = l.body_font_pt;

        self.surface.text(
            l.left(),
            top - 6.0,
            self.title,
            TextStyle::bold(l.title_font_pt, Align::Left),
        );
        self.surface.text(
            l.left(),
            top - 11.5,
            &l.labels.caption,
            TextStyle::regular(l.caption_font_pt, Align::Left),
        );

        let date_line = format!("{} {}", l.labels.date_prefix, self.date);
        let rows_line = format!("{} {}", l.labels.rows_prefix, self.total_rows);
        self.surface
            .text(l.right(), top - 5.0, &date_line, TextStyle::regular(body, Align::Right));
        self.surface
            .text(l.right(), top - 10.0, &rows_line, TextStyle::regular(body, Align::Right));
    }

    fn draw_table_header(&mut self) {
        let l = self.layout;
        let top = l.table_top();
        let height = l.table_header_mm;
        let bottom = top - height;
        let divider = l.left() + l.id_column_mm;
        let baseline = l.baseline_in(top, height, l.body_font_pt);

        self.surface
            .fill_rect(l.left(), bottom, l.content_width(), height, l.header_shade);
        self.surface.text(
            l.left() + l.id_column_mm / 2.0,
            baseline,
            &l.labels.id_heading,
            TextStyle::bold(l.body_font_pt, Align::Center),
        );
        self.surface.text(
            divider + l.label_padding_mm,
            baseline,
            &l.labels.label_heading,
            TextStyle::bold(l.body_font_pt, Align::Left),
        );
        self.surface
            .line(l.left(), bottom, l.right(), bottom, l.thick_rule_pt);
        self.surface.line(divider, top, divider, bottom, l.thin_rule_pt);
    }

    fn draw_row(&mut self, row: &Row) {
        let l = self.layout;
        let top = self.cursor;
        let bottom = top - l.row_height_mm;
        let divider = l.left() + l.id_column_mm;
        let baseline = l.baseline_in(top, l.row_height_mm, l.body_font_pt);
        let label = fit_label(
            &row.label,
            l.max_label_chars,
            l.label_text_width_mm(),
            l.body_font_pt,
        );

        self.surface.text(
            l.left() + l.id_column_mm / 2.0,
            baseline,
            &row.id,
            TextStyle::regular(l.body_font_pt, Align::Center),
        );
        self.surface.text(
            divider + l.label_padding_mm,
            baseline,
            &label,
            TextStyle::regular(l.body_font_pt, Align::Left),
        );
        self.surface.line(divider, top, divider, bottom, l.thin_rule_pt);
        self.surface.line(l.left(), bottom, l.right(), bottom, l.thin_rule_pt);

        self.cursor = bottom;
        self.rows_on_page += 1;
    }

    /// Frames the table region drawn on the current page.
    fn close_page(&mut self) {
        let l = self.layout;
        let (top, bottom) = (l.table_top(), self.cursor);
        let (left, right) = (l.left(), l.right());
        let width = l.frame_rule_pt;

        self.surface.line(left, top, right, top, width);
        self.surface.line(right, top, right, bottom, width);
        self.surface.line(right, bottom, left, bottom, width);
        self.surface.line(left, bottom, left, top, width);

        debug!(page = self.pages, rows = self.rows_on_page, "Closed report page");
    }
}
