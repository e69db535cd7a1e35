use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Used when a name slugs down to nothing.
pub const FALLBACK_SLUG: &str = "central";

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static UNSAFE_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9._-]").unwrap());
static HYPHEN_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"-{2,}").unwrap());

/// Lowercase ASCII rendering of `text` that is safe in file names and URLs.
pub fn slug(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped: String = lowered.nfd().filter(|c| !is_combining_mark(*c)).collect();

    let hyphenated = WHITESPACE.replace_all(&stripped, "-");
    let safe = UNSAFE_CHARS.replace_all(&hyphenated, "-");
    let collapsed = HYPHEN_RUNS.replace_all(&safe, "-");
    let trimmed = collapsed.trim_matches('-');

    if trimmed.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Parts of a download file name: `<project>[__<panel>]__<date>__<time>.<ext>`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportNaming {
    pub project: String,
    pub panel: String,
    pub timestamp: NaiveDateTime,
}

impl ExportNaming {
    pub fn new(project: impl Into<String>, panel: impl Into<String>, timestamp: NaiveDateTime) -> Self {
        Self {
            project: project.into(),
            panel: panel.into(),
            timestamp,
        }
    }

    pub fn file_name(&self, extension: &str) -> String {
        let mut name = slug(&self.project);

        if !self.panel.trim().is_empty() {
            name.push_str("__");
            name.push_str(&slug(&self.panel));
        }

        format!(
            "{}__{}__{}.{}",
            name,
            self.timestamp.format("%Y-%m-%d"),
            self.timestamp.format("%H%M"),
            extension
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_slug_strips_diacritics() {
        assert_eq!(slug("Källarvåning östra"), "kallarvaning-ostra");
    }

    #[test]
    fn test_slug_is_ascii_lowercase() {
        let s = slug("Ångström  Ü-Bahn / Süd");
        assert!(s.is_ascii());
        assert_eq!(s, s.to_lowercase());
        assert_eq!(s, "angstrom-u-bahn-sud");
    }

    #[test]
    fn test_slug_fallback() {
        assert_eq!(slug(""), FALLBACK_SLUG);
        assert_eq!(slug("  --  "), FALLBACK_SLUG);
        assert_eq!(slug("★☆"), FALLBACK_SLUG);
    }

    #[test]
    fn test_slug_keeps_dots_and_underscores() {
        assert_eq!(slug("  Panel_A.1  "), "panel_a.1");
        assert_eq!(slug("a -- b"), "a-b");
    }

    #[test]
    fn test_file_name_with_panel() {
        let naming = ExportNaming::new("Villa Ek", "Central 2", at(9, 5));
        assert_eq!(naming.file_name("tsv"), "villa-ek__central-2__2024-03-07__0905.tsv");
    }

    #[test]
    fn test_file_name_without_panel() {
        let naming = ExportNaming::new("", "   ", at(23, 59));
        assert_eq!(naming.file_name("pdf"), "central__2024-03-07__2359.pdf");
    }
}
