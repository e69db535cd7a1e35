//! PDF backend built on `pdf-writer`, using the standard Helvetica faces so
//! no font has to be embedded.

use std::collections::BTreeSet;

use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, Str, TextStr};
use tracing::warn;
use unicode_normalization::UnicodeNormalization;

use super::layout::MM_PER_PT;
use super::{Align, Surface, TextStyle};

const REGULAR: Name<'static> = Name(b"F1");
const BOLD: Name<'static> = Name(b"F2");

pub struct PdfSurface {
    width_mm: f32,
    height_mm: f32,
    pages: Vec<Content>,
    // Characters printed as `?` because WinAnsi has no code for them
    substituted: BTreeSet<char>,
}

impl PdfSurface {
    pub fn new(width_mm: f32, height_mm: f32) -> Self {
        Self {
            width_mm,
            height_mm,
            pages: Vec::new(),
            substituted: BTreeSet::new(),
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn current(&mut self) -> &mut Content {
        if self.pages.is_empty() {
            self.pages.push(Content::new());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// Assembles the document; an empty surface still yields one blank page.
    pub fn finish(mut self, title: &str) -> Vec<u8> {
        if self.pages.is_empty() {
            self.pages.push(Content::new());
        }

        if !self.substituted.is_empty() {
            let missing: String = self.substituted.iter().collect();
            warn!(
                count = self.substituted.len(),
                "PDF fonts cannot show {:?}; printed as '?'",
                missing
            );
        }

        let mut pdf = Pdf::new();
        let mut next_id = 1i32;
        let mut alloc = || {
            let r = Ref::new(next_id);
            next_id += 1;
            r
        };

        let catalog_id = alloc();
        let pages_id = alloc();
        let info_id = alloc();
        let regular_id = alloc();
        let bold_id = alloc();

        let n = self.pages.len();
        let page_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();
        let content_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();

        pdf.catalog(catalog_id).pages(pages_id);
        pdf.pages(pages_id)
            .kids(page_ids.iter().copied())
            .count(n as i32);

        pdf.document_info(info_id)
            .title(TextStr(title))
            .producer(TextStr(concat!("panel_sheet ", env!("CARGO_PKG_VERSION"))));

        pdf.type1_font(regular_id)
            .base_font(Name(b"Helvetica"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
        pdf.type1_font(bold_id)
            .base_font(Name(b"Helvetica-Bold"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));

        let media_box = Rect::new(0.0, 0.0, to_pt(self.width_mm), to_pt(self.height_mm));

        for (i, content) in self.pages.into_iter().enumerate() {
            let raw = content.finish();
            let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
            pdf.stream(content_ids[i], &compressed)
                .filter(Filter::FlateDecode);

            let mut page = pdf.page(page_ids[i]);
            page.media_box(media_box)
                .parent(pages_id)
                .contents(content_ids[i]);
            page.resources()
                .fonts()
                .pair(REGULAR, regular_id)
                .pair(BOLD, bold_id);
        }

        pdf.finish()
    }
}

impl Surface for PdfSurface {
    fn new_page(&mut self) {
        self.pages.push(Content::new());
    }

    fn text(&mut self, x: f32, y: f32, text: &str, style: TextStyle) {
        let width = text_width_pt(text, style.bold, style.size_pt);
        let x = match style.align {
            Align::Left => to_pt(x),
            Align::Center => to_pt(x) - width / 2.0,
            Align::Right => to_pt(x) - width,
        };
        let font = if style.bold { BOLD } else { REGULAR };
        let bytes = to_winansi(text);
        self.substituted.extend(
            text.chars()
                .zip(&bytes)
                .filter(|&(c, &b)| b == b'?' && c != '?')
                .map(|(c, _)| c),
        );

        self.current()
            .begin_text()
            .set_font(font, style.size_pt)
            .next_line(x, to_pt(y))
            .show(Str(&bytes))
            .end_text();
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, width_pt: f32) {
        self.current()
            .set_line_width(width_pt)
            .move_to(to_pt(x1), to_pt(y1))
            .line_to(to_pt(x2), to_pt(y2))
            .stroke();
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, gray: f32) {
        self.current()
            .set_fill_gray(gray)
            .rect(to_pt(x), to_pt(y), to_pt(width), to_pt(height))
            .fill_nonzero()
            .set_fill_gray(0.0);
    }
}

fn to_pt(mm: f32) -> f32 {
    mm / MM_PER_PT
}

/// Encodes text for the WinAnsi-encoded base fonts; unmapped characters
/// become `?`.
pub fn to_winansi(text: &str) -> Vec<u8> {
    text.chars().map(winansi_byte).collect()
}

fn winansi_byte(c: char) -> u8 {
    match c {
        ' '..='~' => c as u8,
        '\u{A0}'..='\u{FF}' => c as u32 as u8,
        '\t' => b' ',
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        _ => b'?',
    }
}

/// Advance width of `text` in points.
pub fn text_width_pt(text: &str, bold: bool, size_pt: f32) -> f32 {
    let units: u32 = text.chars().map(|c| glyph_width(c, bold)).sum();
    units as f32 * size_pt / 1000.0
}

pub fn char_width_pt(c: char, bold: bool, size_pt: f32) -> f32 {
    glyph_width(c, bold) as f32 * size_pt / 1000.0
}

// Helvetica / Helvetica-Bold advance widths for ' '..='~', from the AFM files.
#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

fn glyph_width(c: char, bold: bool) -> u32 {
    let table = if bold { &HELVETICA_BOLD } else { &HELVETICA };

    if let ' '..='~' = c {
        return table[c as usize - 0x20] as u32;
    }

    match c {
        '…' | '—' | '‰' | '™' => 1000,
        '–' | '€' => 556,
        '•' => 350,
        '‘' | '’' | '‚' => if bold { 278 } else { 222 },
        '“' | '”' | '„' => if bold { 500 } else { 333 },
        '\t' => table[0] as u32,
        _ => {
            // Accented letters take the width of their base letter.
            match std::iter::once(c).nfd().next() {
                Some(base @ ' '..='~') => table[base as usize - 0x20] as u32,
                _ => 556,
            }
        }
    }
}
