use serde::{Deserialize, Serialize};

/// Millimetres per PostScript point.
pub const MM_PER_PT: f32 = 25.4 / 72.0;

/// Page geometry and typography of the printed report.
///
/// Lengths are millimetres, font sizes and rule widths are points. The
/// defaults reproduce the A4 layout the report has always used.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReportLayout {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub margin_mm: f32,
    pub header_block_mm: f32,
    pub footer_band_mm: f32,
    pub table_header_mm: f32,
    pub id_column_mm: f32,
    pub row_height_mm: f32,
    pub label_padding_mm: f32,
    /// Labels longer than this many characters are cut and end in an ellipsis.
    pub max_label_chars: usize,
    pub title_font_pt: f32,
    pub caption_font_pt: f32,
    pub body_font_pt: f32,
    pub thin_rule_pt: f32,
    pub thick_rule_pt: f32,
    pub frame_rule_pt: f32,
    /// Gray level of the table header band, 0 black to 1 white.
    pub header_shade: f32,
    pub labels: ReportLabels,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReportLabels {
    pub caption: String,
    pub id_heading: String,
    pub label_heading: String,
    pub date_prefix: String,
    pub rows_prefix: String,
}

impl Default for ReportLayout {
    fn default() -> Self {
        Self {
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            margin_mm: 12.0,
            header_block_mm: 16.0,
            footer_band_mm: 12.0,
            table_header_mm: 8.0,
            id_column_mm: 18.0,
            row_height_mm: 7.0,
            label_padding_mm: 3.0,
            max_label_chars: 110,
            title_font_pt: 14.0,
            caption_font_pt: 8.0,
            body_font_pt: 9.0,
            thin_rule_pt: 0.4,
            thick_rule_pt: 1.2,
            frame_rule_pt: 0.8,
            header_shade: 0.88,
            labels: ReportLabels::default(),
        }
    }
}

impl Default for ReportLabels {
    fn default() -> Self {
        Self {
            caption: "auto-generated from source data".to_string(),
            id_heading: "Group no.".to_string(),
            label_heading: "Group scope".to_string(),
            date_prefix: "Date:".to_string(),
            rows_prefix: "Rows:".to_string(),
        }
    }
}

impl ReportLayout {
    pub fn left(&self) -> f32 {
        self.margin_mm
    }

    pub fn right(&self) -> f32 {
        self.page_width_mm - self.margin_mm
    }

    pub fn content_width(&self) -> f32 {
        self.right() - self.left()
    }

    pub fn label_column_mm(&self) -> f32 {
        self.content_width() - self.id_column_mm
    }

    /// Room for label text, with padding kept on both sides of the column.
    pub fn label_text_width_mm(&self) -> f32 {
        (self.label_column_mm() - 2.0 * self.label_padding_mm).max(0.0)
    }

    /// Top edge of the printable area.
    pub fn top(&self) -> f32 {
        self.page_height_mm - self.margin_mm
    }

    /// Top edge of the table, just below the page header block.
    pub fn table_top(&self) -> f32 {
        self.top() - self.header_block_mm
    }

    /// Where the first row of a page starts.
    pub fn first_row_top(&self) -> f32 {
        self.table_top() - self.table_header_mm
    }

    /// No row may extend below this line.
    pub fn min_row_bottom(&self) -> f32 {
        self.margin_mm + self.footer_band_mm
    }

    /// How many rows fit on one page; always at least one.
    pub fn rows_per_page(&self) -> usize {
        if self.row_height_mm <= 0.0 {
            return 1;
        }
        let available = self.first_row_top() - self.min_row_bottom();
        let rows = ((available + 1e-3) / self.row_height_mm).floor();
        if rows < 1.0 {
            1
        } else {
            rows as usize
        }
    }

    /// Baseline that vertically centres text of `size_pt` in a band.
    pub fn baseline_in(&self, band_top: f32, band_height: f32, size_pt: f32) -> f32 {
        // Helvetica cap height is 0.718 em.
        band_top - band_height / 2.0 - size_pt * MM_PER_PT * 0.718 / 2.0
    }

    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.page_width_mm <= 0.0 || self.page_height_mm <= 0.0 {
            errors.push("Page size must be positive".to_string());
        }

        if self.margin_mm < 0.0 || self.footer_band_mm < 0.0 || self.header_block_mm < 0.0 {
            errors.push("Margins and bands cannot be negative".to_string());
        }

        if self.row_height_mm <= 0.0 || self.table_header_mm <= 0.0 {
            errors.push("Row heights must be positive".to_string());
        }

        if self.id_column_mm <= 0.0 || self.label_column_mm() <= self.label_padding_mm {
            errors.push("Columns do not fit the page width".to_string());
        }

        if self.first_row_top() - self.row_height_mm < self.min_row_bottom() {
            errors.push("Not a single row fits on a page".to_string());
        }

        if self.max_label_chars == 0 {
            errors.push("Label character budget must be at least 1".to_string());
        }

        if !(0.0..=1.0).contains(&self.header_shade) {
            errors.push("Header shade must be between 0 and 1".to_string());
        }

        errors
    }
}
