use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::Event;
use sheetkit_io_xlsx::{
    EnumCellKind, SheetError, SpecMergedRegion, SpecStyle, XlsxReader, XlsxWriter,
};

/// Column widths declared by the `<col>` entries of one worksheet part,
/// keyed by 1-based column number.
fn read_column_widths(path: &Path, part: &str) -> BTreeMap<u32, f64> {
    let mut archive = zip::ZipArchive::new(File::open(path).expect("open xlsx")).expect("zip");
    let mut xml = String::new();
    archive
        .by_name(part)
        .expect("worksheet part")
        .read_to_string(&mut xml)
        .expect("read part");

    let mut map_widths = BTreeMap::new();
    let mut reader = Reader::from_str(&xml);
    loop {
        match reader.read_event().expect("xml event") {
            Event::Eof => break,
            Event::Empty(tag) | Event::Start(tag) if tag.name().as_ref() == b"col" => {
                let mut map_attrs = BTreeMap::new();
                for attr in tag.attributes() {
                    let attr = attr.expect("attribute");
                    map_attrs.insert(
                        String::from_utf8_lossy(attr.key.as_ref()).to_string(),
                        String::from_utf8_lossy(&attr.value).to_string(),
                    );
                }
                let n_min: u32 = map_attrs["min"].parse().expect("min");
                let n_max: u32 = map_attrs["max"].parse().expect("max");
                let n_width: f64 = map_attrs["width"].parse().expect("width");
                for n_col in n_min..=n_max {
                    map_widths.insert(n_col, n_width);
                }
            }
            _ => {}
        }
    }
    map_widths
}

fn header_style() -> SpecStyle {
    SpecStyle::from_json_str(
        r#"{"font": {"bold": true, "size": 12, "underline_style": "double"},
            "border": {"where": "all", "line_style": "medium", "color": "red"},
            "wrap": true, "alignment": "right", "color": "yellow"}"#,
    )
    .expect("header style")
}

#[test]
fn styled_and_plain_cells_roundtrip() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path = tmp.path().join("report.xlsx");

    let report = XlsxWriter::create(&path, |book| {
        let fmt_header = book.resolve(&header_style());
        assert!(fmt_header.diagnostics.is_empty());

        let mut sheet = book.sheet("Sales", 0)?;
        sheet.label(0, 0, "City\nName", Some(&fmt_header))?;
        sheet.label(0, 1, "Total amount", Some(&fmt_header))?;
        sheet.label(1, 0, "NY", None)?;
        sheet.write(EnumCellKind::Number, 1, 1, 123, None)?;
        Ok(book.report())
    })
    .expect("create workbook");
    assert_eq!(report.sheets, vec!["Sales"]);
    assert!(report.warnings.is_empty());

    let rows = XlsxReader::open(&path, |book| {
        assert_eq!(book.all_sheets(), vec!["Sales"]);
        let sheet = book.sheet("Sales")?;
        assert!(sheet.merged_regions().is_empty());
        Ok(sheet.rows())
    })
    .expect("open workbook");

    assert_eq!(
        rows,
        vec![
            vec!["City\nName".to_string(), "Total amount".to_string()],
            vec!["NY".to_string(), "123".to_string()],
        ]
    );
}

#[test]
fn merged_region_contributes_one_value() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path = tmp.path().join("merged.xlsx");

    XlsxWriter::create(&path, |book| {
        let mut sheet = book.sheet("Grid", 0)?;
        let region = SpecMergedRegion {
            top: 0,
            left: 0,
            bottom: 1,
            right: 0,
        };
        sheet.merge(region, "Region", None)?;
        sheet.label(0, 1, "a", None)?;
        sheet.label(1, 1, "b", None)?;
        Ok(())
    })
    .expect("create workbook");

    XlsxReader::open(&path, |book| {
        let sheet = book.sheet("Grid")?;
        assert_eq!(sheet.merged_regions().len(), 1);
        assert!(sheet.merged_regions().contains_non_anchor(1, 0));
        assert_eq!(sheet.row_count(), 2);

        let rows = sheet.rows();
        assert_eq!(
            rows,
            vec![
                vec!["Region".to_string(), "a".to_string()],
                vec!["b".to_string()],
            ]
        );
        let n_region_values = rows
            .iter()
            .flatten()
            .filter(|c_text| c_text.as_str() == "Region")
            .count();
        assert_eq!(n_region_values, 1);
        Ok(())
    })
    .expect("open workbook");
}

#[test]
fn failed_body_does_not_write_file() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path = tmp.path().join("aborted.xlsx");

    let result: Result<(), SheetError> = XlsxWriter::create(&path, |book| {
        let mut sheet = book.sheet("Data", 0)?;
        sheet.label(0, 0, "ok", None)?;
        sheet.write(EnumCellKind::Number, 1, 0, "not a number", None)?;
        Ok(())
    });

    assert!(matches!(result, Err(SheetError::CellValueMismatch { .. })));
    assert!(!path.exists());
}

#[test]
fn sheets_keep_requested_positions() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path = tmp.path().join("positions.xlsx");

    XlsxWriter::create(&path, |book| {
        book.sheet("second", 0)?.label(0, 0, "2", None)?;
        book.sheet("first", 0)?.label(0, 0, "1", None)?;
        book.sheet("second", 0)?.label(1, 0, "2b", None)?;
        Ok(())
    })
    .expect("create workbook");

    XlsxReader::open(&path, |book| {
        assert_eq!(book.all_sheets(), vec!["first", "second"]);
        let l_sheets = book.sheets()?;
        assert_eq!(l_sheets[1].rows(), vec![vec!["2".to_string()], vec!["2b".to_string()]]);
        Ok(())
    })
    .expect("open workbook");
}

#[test]
fn unknown_sheet_and_missing_file_are_errors() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path = tmp.path().join("one.xlsx");

    XlsxWriter::create(&path, |book| {
        book.sheet("only", 0)?.label(0, 0, "x", None)?;
        Ok(())
    })
    .expect("create workbook");

    let result = XlsxReader::open(&path, |book| book.sheet("other").map(|_| ()));
    assert!(matches!(result, Err(SheetError::SheetNotFound(_))));

    let result = XlsxReader::open(tmp.path().join("absent.xlsx"), |_| Ok(()));
    assert!(matches!(result, Err(SheetError::XlsxRead(_))));
}

#[test]
fn rows_end_at_their_last_used_cell() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path = tmp.path().join("ragged.xlsx");

    XlsxWriter::create(&path, |book| {
        let mut sheet = book.sheet("Ragged", 0)?;
        for (n_col, c_text) in ["a", "b", "c"].into_iter().enumerate() {
            sheet.label(0, n_col, c_text, None)?;
        }
        sheet.label(1, 0, "x", None)?;
        sheet.label(3, 0, "y", None)?;
        Ok(())
    })
    .expect("create workbook");

    let rows = XlsxReader::open(&path, |book| {
        assert_eq!(book.file_in(), path.to_string_lossy());
        let sheet = book.sheet("Ragged")?;
        assert_eq!(sheet.row_len(2), 0);
        Ok(sheet.rows())
    })
    .expect("open workbook");

    let empty: Vec<String> = Vec::new();
    assert_eq!(
        rows,
        vec![
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
            vec!["x".to_string()],
            empty,
            vec!["y".to_string()],
        ]
    );
}

#[test]
fn written_columns_get_default_width() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path = tmp.path().join("widths.xlsx");

    XlsxWriter::create(&path, |book| {
        let mut sheet = book.sheet("Widths", 0)?;
        sheet.label(0, 0, "label", None)?;
        sheet.number(0, 2, 4.5, None)?;
        let region = SpecMergedRegion {
            top: 0,
            left: 4,
            bottom: 0,
            right: 5,
        };
        sheet.merge(region, "merged", None)?;
        Ok(())
    })
    .expect("create workbook");

    let map_widths = read_column_widths(&path, "xl/worksheets/sheet1.xml");
    assert_eq!(map_widths.keys().copied().collect::<Vec<_>>(), vec![1, 3, 5]);
    for n_width in map_widths.values() {
        // The engine stores character width plus cell padding.
        assert!((30.0..31.0).contains(n_width), "width {n_width}");
    }
}

#[test]
fn case_variant_sheet_name_reuses_sheet() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path = tmp.path().join("case.xlsx");

    XlsxWriter::create(&path, |book| {
        book.sheet("Data", 0)?.label(0, 0, "first", None)?;
        book.sheet("data", 0)?.label(1, 0, "second", None)?;
        Ok(())
    })
    .expect("create workbook");

    XlsxReader::open(&path, |book| {
        assert_eq!(book.all_sheets(), vec!["Data"]);
        let rows = book.sheet("Data")?.rows();
        assert_eq!(rows, vec![vec!["first".to_string()], vec!["second".to_string()]]);
        Ok(())
    })
    .expect("open workbook");
}
