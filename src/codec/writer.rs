// src/codec/writer.rs

use crate::errors::AppResult;
use crate::models::cell::{CellValue, Record, collect_headers};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use unicode_width::UnicodeWidthStr;

/// Encode records as a single-sheet XLSX workbook.
///
/// Header names are the union of record keys in first-seen order. Missing
/// keys and empty text are left blank, so they decode as omitted keys.
/// Non-finite numbers are written as text (`NaN`, `inf`) because the
/// container has no representation for them.
pub fn encode(records: &[Record], sheet_label: &str) -> AppResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_label)?;

    let headers = collect_headers(records);

    // ---------------------------
    // Header
    // ---------------------------
    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in headers.iter().enumerate() {
        worksheet.write_with_format(0, col as u16, header.as_str(), &header_format)?;
    }

    worksheet.set_freeze_panes(1, 0).ok();

    let mut col_widths: Vec<usize> = headers
        .iter()
        .map(|h| UnicodeWidthStr::width(h.as_str()))
        .collect();

    // ---------------------------
    // Rows
    // ---------------------------
    let band1 = Color::RGB(0xEAF3FB);
    let band2 = Color::RGB(0xFFFFFF);

    for (row_index, record) in records.iter().enumerate() {
        let row = (row_index + 1) as u32;
        let band = if row_index % 2 == 0 { band1 } else { band2 };

        for (col, header) in headers.iter().enumerate() {
            let Some(value) = record.get(header) else {
                continue;
            };

            write_cell(worksheet, row, col as u16, value, band)?;

            let shown = value.to_string();
            col_widths[col] = col_widths[col].max(UnicodeWidthStr::width(shown.as_str()));
        }
    }

    for (c, w) in col_widths.iter().enumerate() {
        worksheet.set_column_width(c as u16, *w as f64 + 2.0)?;
    }

    Ok(workbook.save_to_buffer()?)
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &CellValue,
    band: Color,
) -> AppResult<()> {
    let fmt = Format::new()
        .set_background_color(band)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    match value {
        CellValue::Empty => {}
        CellValue::Text(s) if s.is_empty() => {}
        CellValue::Text(s) => {
            worksheet.write_string_with_format(row, col, s, &fmt)?;
        }
        CellValue::Bool(b) => {
            worksheet.write_boolean_with_format(row, col, *b, &fmt)?;
        }
        CellValue::Number(n) if n.is_finite() => {
            let fmt = fmt.set_align(FormatAlign::Right);
            worksheet.write_number_with_format(row, col, *n, &fmt)?;
        }
        CellValue::Number(n) => {
            let fmt = fmt.set_align(FormatAlign::Right);
            worksheet.write_string_with_format(row, col, n.to_string(), &fmt)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode;

    fn trips() -> Vec<Record> {
        vec![
            Record::new()
                .with("date", "2023-03-15")
                .with("distance_start", 100.0)
                .with("distance_stop", 150.0)
                .with("distance_diff", 50.0)
                .with("business", true),
            Record::new()
                .with("date", "2023-03-16")
                .with("distance_start", 150.0)
                .with("distance_stop", 212.5)
                .with("distance_diff", 62.5)
                .with("business", false),
        ]
    }

    #[test]
    fn encoded_workbook_decodes_to_the_same_records() {
        let records = trips();
        let bytes = encode(&records, "Sheet1").unwrap();
        assert_eq!(decode(&bytes).unwrap(), records);
    }

    #[test]
    fn missing_keys_stay_missing() {
        let records = vec![
            Record::new().with("a", 1.0).with("b", "x"),
            Record::new().with("a", 2.0),
        ];
        let bytes = encode(&records, "Log").unwrap();
        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded[1].get("b"), None);
        assert_eq!(decoded[1].get("a"), Some(&CellValue::Number(2.0)));
    }

    #[test]
    fn empty_text_is_written_blank_and_read_back_omitted() {
        let records = vec![
            Record::new().with("a", 1.0).with("b", ""),
            Record::new().with("a", 2.0).with("b", "x"),
        ];
        let bytes = encode(&records, "Sheet1").unwrap();
        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded[0], Record::new().with("a", 1.0));
        assert_eq!(decoded[1], records[1]);
    }

    #[test]
    fn nan_survives_as_text() {
        let records = vec![Record::new().with("distance_diff", f64::NAN)];
        let bytes = encode(&records, "Sheet1").unwrap();
        let decoded = decode(&bytes).unwrap();
        let value = decoded[0].get("distance_diff").unwrap();
        assert_eq!(value, &CellValue::Text("NaN".into()));
        assert!(value.as_number().is_nan());
    }

    #[test]
    fn invalid_sheet_label_is_an_error() {
        assert!(encode(&trips(), "bad/name").is_err());
    }
}
