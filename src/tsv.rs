//! Tab-separated import and export of panel schedules.
//!
//! Pasted text is sniffed by column count: when the first line has exactly
//! three fields it is taken as a header and replaced by the canonical one,
//! otherwise every line is data. A header-less three-column paste therefore
//! loses its first line; that ambiguity is intentional and left in place.
//!
//! Quoted fields (as written by [`serialize`]) are honoured only when every
//! quote in the text is balanced; otherwise quotes are read as plain text so
//! a stray `"` cannot merge lines.

use csv::{QuoteStyle, ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use tracing::{debug, warn};

use crate::error::Result;
use crate::models::{Row, Table};

const COLUMNS: usize = Table::HEADERS.len();

/// Built-in example content for a fresh session.
pub const SAMPLE_TSV: &str = "ID\tLabel\tMeta\n\
1\tLighting hall\t\n\
2\tLiving room sockets\t\n\
6-9\tStove\t3-phase\n\
JFB\tGroups 1–17\tRCD\n";

/// What the editor is reset to by "Clear".
pub const BLANK_TSV: &str = "ID\tLabel\tMeta\n";

pub const CONTRACT: &str =
    "Contract: ID, Label, Meta • empty fields OK • no validation • order matters";

/// Parses pasted tab-separated text into a canonical three-column table.
///
/// Never fails: short lines are padded with empty fields, long lines are cut
/// after the third field and every field is trimmed.
pub fn normalize(text: &str) -> Table {
    let trimmed = text.trim_matches(|c| matches!(c, '\n' | '\r' | ' '));
    if trimmed.is_empty() {
        return Table::default();
    }

    let records = read_records(trimmed);
    let has_header = looks_like_header(&records);
    let data = if has_header { &records[1..] } else { &records[..] };

    debug!(
        records = records.len(),
        has_header,
        "Normalized pasted TSV"
    );

    Table::new(data.iter().map(|record| Row::from_fields(record.iter())).collect())
}

/// Writes a table back to tab-separated text, always in ID, Label, Meta order.
pub fn serialize(table: &Table, include_header: bool) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .delimiter(b'\t')
        .terminator(Terminator::Any(b'\n'))
        .quote_style(QuoteStyle::Necessary)
        .from_writer(Vec::new());

    if include_header {
        writer.write_record(Table::HEADERS)?;
    }

    for row in &table.rows {
        writer.write_record(row.fields())?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;

    Ok(String::from_utf8(bytes)?)
}

fn read_records(text: &str) -> Vec<StringRecord> {
    let quoting = quotes_are_balanced(text);
    if !quoting {
        debug!("Unbalanced quotes in pasted TSV, reading quotes literally");
    }

    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(quoting)
        .from_reader(text.as_bytes());

    reader
        .records()
        .filter_map(|record| match record {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Skipping unreadable TSV line: {}", e);
                None
            }
        })
        .collect()
}

/// True when every field that opens with `"` is closed right before a tab,
/// a line end or the end of the text. Anything else would let one stray quote
/// swallow the following lines into a single field.
fn quotes_are_balanced(text: &str) -> bool {
    let mut chars = text.chars().peekable();
    let mut at_field_start = true;

    while let Some(c) = chars.next() {
        if at_field_start && c == '"' {
            loop {
                match chars.next() {
                    None => return false,
                    Some('"') if chars.peek() == Some(&'"') => {
                        chars.next();
                    }
                    Some('"') => break,
                    Some(_) => {}
                }
            }
            if !matches!(chars.peek(), None | Some('\t' | '\n' | '\r')) {
                return false;
            }
            at_field_start = false;
            continue;
        }
        at_field_start = matches!(c, '\t' | '\n' | '\r');
    }

    true
}

/// A header read is only accepted when it yields exactly three columns for
/// the whole table.
fn looks_like_header(records: &[StringRecord]) -> bool {
    match records.split_first() {
        Some((first, rest)) => {
            first.len() == COLUMNS && rest.iter().all(|record| record.len() <= COLUMNS)
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(table: &Table) -> Vec<[&str; 3]> {
        table.rows.iter().map(|r| r.fields()).collect()
    }

    #[test]
    fn test_end_to_end_example() {
        let table = normalize("ID\tLabel\tMeta\n1\tLighting hall\t\n6-9\tStove\t3-phase\n");
        assert_eq!(
            rows(&table),
            vec![["1", "Lighting hall", ""], ["6-9", "Stove", "3-phase"]]
        );

        let text = serialize(&table, false).unwrap();
        assert_eq!(text, "1\tLighting hall\t\n6-9\tStove\t3-phase\n");
    }

    #[test]
    fn test_empty_input_gives_empty_table() {
        for input in ["", "   ", "\n\r\n  \n"] {
            let table = normalize(input);
            assert!(table.is_empty());
            assert_eq!(table.headers(), ["ID", "Label", "Meta"]);
        }
    }

    #[test]
    fn test_header_text_is_replaced() {
        let table = normalize("Nr\tBenämning\tInfo\n1\tHall\tx\n");
        assert_eq!(table.headers(), ["ID", "Label", "Meta"]);
        assert_eq!(rows(&table), vec![["1", "Hall", "x"]]);
    }

    #[test]
    fn test_two_columns_are_padded() {
        let table = normalize("a\tb");
        assert_eq!(rows(&table), vec![["a", "b", ""]]);
    }

    #[test]
    fn test_four_columns_are_truncated() {
        let table = normalize("a\tb\tc\td");
        assert_eq!(rows(&table), vec![["a", "b", "c"]]);
    }

    #[test]
    fn test_ragged_lines_without_header() {
        let table = normalize("1\n2\tSockets\n3\tStove\t3-phase\textra\n");
        assert_eq!(
            rows(&table),
            vec![
                ["1", "", ""],
                ["2", "Sockets", ""],
                ["3", "Stove", "3-phase"],
            ]
        );
    }

    #[test]
    fn test_wider_body_disables_header() {
        let table = normalize("ID\tLabel\tMeta\n1\tHall\t\tspare\n");
        assert_eq!(
            rows(&table),
            vec![["ID", "Label", "Meta"], ["1", "Hall", ""]]
        );
    }

    #[test]
    fn test_short_body_keeps_header() {
        let table = normalize("ID\tLabel\tMeta\n1\tHall\n");
        assert_eq!(rows(&table), vec![["1", "Hall", ""]]);
    }

    #[test]
    fn test_fields_are_trimmed_but_inner_space_kept() {
        let table = normalize("ID\tLabel\tMeta\n 1 \t  Living   room \t 16 A \n");
        assert_eq!(rows(&table), vec![["1", "Living   room", "16 A"]]);
    }

    #[test]
    fn test_crlf_and_blank_lines() {
        let table = normalize("\r\nID\tLabel\tMeta\r\n1\tHall\t\r\n\r\n2\tKitchen\t\r\n");
        assert_eq!(rows(&table), vec![["1", "Hall", ""], ["2", "Kitchen", ""]]);
    }

    #[test]
    fn test_header_only() {
        let table = normalize(BLANK_TSV);
        assert!(table.is_empty());
    }

    #[test]
    fn test_sample_parses_to_four_rows() {
        let table = normalize(SAMPLE_TSV);
        assert_eq!(table.len(), 4);
        assert_eq!(table.rows[3].fields(), ["JFB", "Groups 1–17", "RCD"]);
    }

    #[test]
    fn test_serialize_with_header() {
        let table = Table::new(vec![Row::new("1", "Hall", "")]);
        assert_eq!(
            serialize(&table, true).unwrap(),
            "ID\tLabel\tMeta\n1\tHall\t\n"
        );
    }

    #[test]
    fn test_serialize_empty_table() {
        let table = Table::default();
        assert_eq!(serialize(&table, true).unwrap(), "ID\tLabel\tMeta\n");
        assert_eq!(serialize(&table, false).unwrap(), "");
    }

    #[test]
    fn test_serialize_reprojected_columns() {
        let table = Table::from_columns(&["Label", "ID"], vec![vec!["Stove", "6-9"]]);
        assert_eq!(serialize(&table, false).unwrap(), "6-9\tStove\t\n");
    }

    #[test]
    fn test_round_trip_preserves_rows() {
        let table = Table::new(vec![
            Row::new("", "", ""),
            Row::new("6-9", "Stove", "3-phase"),
            Row::new("JFB", "Groups 1–17", ""),
            Row::new("7", "Tab\tinside", "say \"hi\""),
        ]);
        let text = serialize(&table, true).unwrap();
        assert_eq!(normalize(&text), table);
    }

    #[test]
    fn test_stray_quote_does_not_swallow_lines() {
        let table = normalize("ID\tLabel\tMeta\n1\t\"Hall\t\n2\tStove\t\n");
        assert_eq!(rows(&table), vec![["1", "\"Hall", ""], ["2", "Stove", ""]]);

        let table = normalize("ID\tLabel\tMeta\n1\t\"Hall\t\n2\t\"Stove\" 16 A\t\n3\tSpare\n");
        assert_eq!(
            rows(&table),
            vec![
                ["1", "\"Hall", ""],
                ["2", "\"Stove\" 16 A", ""],
                ["3", "Spare", ""],
            ]
        );
    }

    #[test]
    fn test_quotes_inside_fields_are_literal() {
        let table = normalize("ID\tLabel\tMeta\n1\tSpot 2\" rail\t\n2\tStove\t\n");
        assert_eq!(rows(&table), vec![["1", "Spot 2\" rail", ""], ["2", "Stove", ""]]);
    }

    #[test]
    fn test_quote_balance_check() {
        assert!(quotes_are_balanced("a\t\"b\tc\"\n\"x\"\"y\""));
        assert!(quotes_are_balanced("\"multi\nline\"\tz\n"));
        assert!(quotes_are_balanced("mid\"quote\t"));
        assert!(!quotes_are_balanced("1\t\"Hall\t\n2\tStove"));
        assert!(!quotes_are_balanced("\"Hall\"x\t"));
    }

    #[test]
    fn test_headerless_export_loses_first_row_on_reimport() {
        let table = Table::new(vec![Row::new("ID", "Benämning", "Meta")]);

        let without_header = serialize(&table, false).unwrap();
        assert!(normalize(&without_header).is_empty());

        let with_header = serialize(&table, true).unwrap();
        assert_eq!(normalize(&with_header), table);
    }
}
