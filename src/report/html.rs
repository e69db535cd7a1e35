//! Print-ready HTML backend: one fixed-size SVG sheet per page, so the
//! browser's "print to PDF" reproduces the paginated layout exactly.

use std::fmt::Write as _;

use super::layout::MM_PER_PT;
use super::{Align, Surface, TextStyle};

pub struct HtmlSurface {
    width_mm: f32,
    height_mm: f32,
    pages: Vec<String>,
}

impl HtmlSurface {
    pub fn new(width_mm: f32, height_mm: f32) -> Self {
        Self {
            width_mm,
            height_mm,
            pages: Vec::new(),
        }
    }

    fn current(&mut self) -> &mut String {
        if self.pages.is_empty() {
            self.pages.push(String::new());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// SVG works top-down.
    fn flip(&self, y: f32) -> f32 {
        self.height_mm - y
    }

    pub fn finish(mut self, title: &str) -> String {
        if self.pages.is_empty() {
            self.pages.push(String::new());
        }

        let (w, h) = (self.width_mm, self.height_mm);
        let mut out = String::new();

        let _ = write!(
            out,
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
             <title>{}</title>\n<style>\n\
             @page {{ size: {w}mm {h}mm; margin: 0; }}\n\
             html, body {{ margin: 0; padding: 0; background: #777; }}\n\
             .page {{ width: {w}mm; height: {h}mm; margin: 8mm auto; background: #fff; \
             page-break-after: always; break-after: page; overflow: hidden; }}\n\
             .page:last-child {{ page-break-after: auto; break-after: auto; }}\n\
             .page svg {{ display: block; width: {w}mm; height: {h}mm; }}\n\
             .page text {{ font-family: Helvetica, Arial, sans-serif; fill: #000; white-space: pre; }}\n\
             @media print {{ html, body {{ background: none; }} .page {{ margin: 0; }} }}\n\
             </style>\n</head>\n<body>\n",
            escape(title),
        );

        for body in &self.pages {
            let _ = write!(
                out,
                "<section class=\"page\">\n<svg xmlns=\"http://www.w3.org/2000/svg\" \
                 viewBox=\"0 0 {w} {h}\">\n{body}</svg>\n</section>\n"
            );
        }

        out.push_str("</body>\n</html>\n");
        out
    }
}

impl Surface for HtmlSurface {
    fn new_page(&mut self) {
        self.pages.push(String::new());
    }

    fn text(&mut self, x: f32, y: f32, text: &str, style: TextStyle) {
        let y = self.flip(y);
        let anchor = match style.align {
            Align::Left => "start",
            Align::Center => "middle",
            Align::Right => "end",
        };
        let weight = if style.bold { " font-weight=\"bold\"" } else { "" };
        let size = style.size_pt * MM_PER_PT;

        let _ = writeln!(
            self.current(),
            "<text x=\"{:.2}\" y=\"{:.2}\" font-size=\"{:.3}\" text-anchor=\"{}\"{}>{}</text>",
            x,
            y,
            size,
            anchor,
            weight,
            escape(text)
        );
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, width_pt: f32) {
        let (y1, y2) = (self.flip(y1), self.flip(y2));
        let _ = writeln!(
            self.current(),
            "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"#000\" stroke-width=\"{:.3}\"/>",
            x1,
            y1,
            x2,
            y2,
            width_pt * MM_PER_PT
        );
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, gray: f32) {
        let top = self.flip(y + height);
        let level = (gray.clamp(0.0, 1.0) * 255.0).round() as u8;
        let _ = writeln!(
            self.current(),
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"rgb({},{},{})\"/>",
            x,
            top,
            width,
            height,
            level,
            level,
            level
        );
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
