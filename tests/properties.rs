//! Behavioural checks of the public API: import, export, naming and report
//! pagination working together.

use chrono::NaiveDate;
use panel_sheet::export::{Artifact, Exporter, ReportExporter, TsvExporter};
use panel_sheet::report::{render, DrawOp, PageStream, ReportFormat, ReportLayout};
use panel_sheet::{normalize, serialize, slug, ExportNaming, Row, Table};

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()
}

fn schedule(n: usize) -> Table {
    Table::new(
        (1..=n)
            .map(|i| Row::new(i.to_string(), format!("Group {}", i), if i % 2 == 0 { "16 A" } else { "" }))
            .collect(),
    )
}

#[test]
fn always_three_canonical_columns() {
    let inputs = [
        "",
        "a",
        "a\tb",
        "a\tb\tc",
        "a\tb\tc\td\te",
        "x\ny\tz\n1\t2\t3\t4",
        "ID\tLabel\tMeta\n1\t\t\n",
    ];

    for input in inputs {
        let table = normalize(input);
        assert_eq!(table.headers(), ["ID", "Label", "Meta"], "input {:?}", input);
        for row in &table.rows {
            assert_eq!(row.fields().len(), 3);
        }
    }
}

#[test]
fn round_trip_with_header_is_exact() {
    let mut table = schedule(12);
    table.push(Row::new("", "", ""));
    table.push(Row::new("JFB", "Groups 1–17", "RCD 30 mA"));

    let text = serialize(&table, true).unwrap();
    assert_eq!(normalize(&text), table);
}

#[test]
fn headerless_three_column_text_loses_first_line() {
    let table = normalize("1\tLighting hall\t\n2\tSockets\t\n");
    assert_eq!(table.rows, vec![Row::new("2", "Sockets", "")]);
}

#[test]
fn padding_and_truncation() {
    assert_eq!(normalize("a\tb").rows, vec![Row::new("a", "b", "")]);
    assert_eq!(normalize("a\tb\tc\td").rows, vec![Row::new("a", "b", "c")]);
}

#[test]
fn end_to_end_example() {
    let table = normalize("ID\tLabel\tMeta\n1\tLighting hall\t\n6-9\tStove\t3-phase\n");
    assert_eq!(
        table.rows,
        vec![
            Row::new("1", "Lighting hall", ""),
            Row::new("6-9", "Stove", "3-phase"),
        ]
    );
    assert_eq!(
        serialize(&table, false).unwrap(),
        "1\tLighting hall\t\n6-9\tStove\t3-phase\n"
    );
}

#[test]
fn slug_examples() {
    let s = slug("Källarvåning östra");
    assert_eq!(s, "kallarvaning-ostra");
    assert!(s.is_ascii());
    assert_eq!(slug(""), "central");
}

#[test]
fn report_pages_match_capacity() {
    let layout = ReportLayout::default();
    let k = layout.rows_per_page();

    for n in [0, 1, k, k + 1, 3 * k] {
        let mut stream = PageStream::default();
        let summary = render(&schedule(n), "Villa Ek", date(), &layout, &mut stream);
        let expected = if n == 0 { 1 } else { n.div_ceil(k) };
        assert_eq!(summary.pages, expected, "n = {}", n);

        let drawn_rows: usize = stream
            .pages
            .iter()
            .map(|page| {
                page.ops
                    .iter()
                    .filter(|op| matches!(op, DrawOp::Text { text, .. } if text.starts_with("Group ") && text != "Group no." && text != "Group scope"))
                    .count()
            })
            .sum();
        assert_eq!(drawn_rows, n);
    }
}

#[test]
fn report_truncates_but_tsv_does_not() {
    let long = "Lighting and sockets ".repeat(10);
    let table = Table::new(vec![Row::new("1", long.trim(), "")]);

    let mut stream = PageStream::default();
    render(&table, "Villa Ek", date(), &ReportLayout::default(), &mut stream);
    let drawn = stream.pages[0]
        .ops
        .iter()
        .find_map(|op| match op {
            DrawOp::Text { text, .. } if text.starts_with("Lighting and") => Some(text.clone()),
            _ => None,
        })
        .unwrap();
    assert!(drawn.ends_with('…'));
    assert_eq!(drawn.chars().count(), 110);

    let tsv = TsvExporter::new().with_header(false).render(&table).unwrap();
    assert_eq!(String::from_utf8(tsv).unwrap(), format!("1\t{}\t\n", long.trim()));
}

#[test]
fn rendering_is_deterministic() {
    let table = schedule(50);
    let exporter = ReportExporter::new(ReportFormat::Pdf, "Villa Ek", date());
    assert_eq!(exporter.render(&table).unwrap(), exporter.render(&table).unwrap());

    let exporter = ReportExporter::new(ReportFormat::Html, "Villa Ek", date());
    assert_eq!(exporter.render(&table).unwrap(), exporter.render(&table).unwrap());
}

#[test]
fn export_files_land_in_directory() {
    let dir = tempfile::tempdir().unwrap();
    let ts = date().and_hms_opt(8, 15, 0).unwrap();
    let naming = ExportNaming::new("Villa Ek", "", ts);
    let table = schedule(3);

    let exporters: Vec<Box<dyn Exporter>> = vec![
        Box::new(TsvExporter::new()),
        Box::new(ReportExporter::new(ReportFormat::Pdf, "Villa Ek", date())),
        Box::new(ReportExporter::new(ReportFormat::Html, "Villa Ek", date())),
    ];

    let mut names: Vec<String> = exporters
        .iter()
        .map(|exporter| {
            let artifact = Artifact::build(exporter.as_ref(), &table, &naming).unwrap();
            let path = artifact.save_into(dir.path()).unwrap();
            assert!(std::fs::metadata(&path).unwrap().len() > 0);
            artifact.file_name
        })
        .collect();
    names.sort();

    assert_eq!(
        names,
        vec![
            "villa-ek__2024-03-07__0815.html",
            "villa-ek__2024-03-07__0815.pdf",
            "villa-ek__2024-03-07__0815.tsv",
        ]
    );
}
