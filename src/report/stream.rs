use serde::{Deserialize, Serialize};

use super::{Surface, TextStyle};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawOp {
    Text {
        x: f32,
        y: f32,
        text: String,
        style: TextStyle,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        width_pt: f32,
    },
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        gray: f32,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

/// Records drawing calls page by page instead of producing a file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageStream {
    pub pages: Vec<Page>,
}

impl PageStream {
    fn push(&mut self, op: DrawOp) {
        if self.pages.is_empty() {
            self.pages.push(Page::default());
        }
        if let Some(page) = self.pages.last_mut() {
            page.ops.push(op);
        }
    }
}

impl Surface for PageStream {
    fn new_page(&mut self) {
        self.pages.push(Page::default());
    }

    fn text(&mut self, x: f32, y: f32, text: &str, style: TextStyle) {
        self.push(DrawOp::Text {
            x,
            y,
            text: text.to_string(),
            style,
        });
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, width_pt: f32) {
        self.push(DrawOp::Line {
            x1,
            y1,
            x2,
            y2,
            width_pt,
        });
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, gray: f32) {
        self.push(DrawOp::FillRect {
            x,
            y,
            width,
            height,
            gray,
        });
    }
}
