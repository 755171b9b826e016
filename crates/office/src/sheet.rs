//! Spreadsheet package (XLSX) text extraction.
//!
//! Renders each sheet, in its declared order, as a header line followed by
//! the sheet's rows in CSV form:
//!
//! ```text
//! --- Sheet: Q1 ---
//! region,amount
//! north,100
//!
//! --- Sheet: Q2 ---
//! ...
//! ```

use calamine::{open_workbook_from_rs, Reader, Xlsx};
use omnitext_core::{Error, Result};
use std::io::Cursor;

/// Extract text from an XLSX payload, one CSV block per sheet.
pub fn extract_sheets(bytes: &[u8]) -> Result<String> {
    let cursor = Cursor::new(bytes);
    let mut workbook: Xlsx<_> = open_workbook_from_rs(cursor)
        .map_err(|e| Error::LocalDecode(format!("failed to open XLSX package: {}", e)))?;

    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    let mut output = String::new();

    for name in &sheet_names {
        let range = workbook
            .worksheet_range(name)
            .map_err(|e| Error::LocalDecode(format!("failed to read sheet '{}': {}", name, e)))?;

        let rows: Vec<Vec<String>> = range
            .rows()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect();

        output.push_str(&render_sheet(name, &rows));
    }

    Ok(output)
}

/// Render one sheet as a header line plus CSV rows plus a blank separator.
pub fn render_sheet(name: &str, rows: &[Vec<String>]) -> String {
    let mut out = format!("--- Sheet: {} ---\n", name);
    for row in rows {
        let line: Vec<String> = row.iter().map(|cell| csv_field(cell)).collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }
    out.push('\n');
    out
}

/// Quote a CSV field when it contains a delimiter, quote, or newline.
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::FileOptions;

    const MAIN_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
    const REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
    const PKG_REL_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

    /// Assemble a minimal but complete XLSX package from (name, sheet XML)
    /// pairs, in workbook order.
    fn build_xlsx(sheets: &[(&str, &str)]) -> Vec<u8> {
        let mut content_types = String::from(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
             <Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">\
             <Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>\
             <Default Extension=\"xml\" ContentType=\"application/xml\"/>\
             <Override PartName=\"/xl/workbook.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml\"/>",
        );
        let mut workbook_sheets = String::new();
        let mut workbook_rels = String::new();
        for (index, (name, _)) in sheets.iter().enumerate() {
            let id = index + 1;
            content_types.push_str(&format!(
                "<Override PartName=\"/xl/worksheets/sheet{}.xml\" \
                 ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml\"/>",
                id
            ));
            workbook_sheets.push_str(&format!(
                "<sheet name=\"{}\" sheetId=\"{}\" r:id=\"rId{}\"/>",
                name, id, id
            ));
            workbook_rels.push_str(&format!(
                "<Relationship Id=\"rId{}\" Type=\"{}/worksheet\" Target=\"worksheets/sheet{}.xml\"/>",
                id, REL_NS, id
            ));
        }
        content_types.push_str("</Types>");

        let root_rels = format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
             <Relationships xmlns=\"{}\">\
             <Relationship Id=\"rId1\" Type=\"{}/officeDocument\" Target=\"xl/workbook.xml\"/>\
             </Relationships>",
            PKG_REL_NS, REL_NS
        );
        let workbook = format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
             <workbook xmlns=\"{}\" xmlns:r=\"{}\"><sheets>{}</sheets></workbook>",
            MAIN_NS, REL_NS, workbook_sheets
        );
        let workbook_rels = format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
             <Relationships xmlns=\"{}\">{}</Relationships>",
            PKG_REL_NS, workbook_rels
        );

        let mut buffer = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buffer);
            let mut add = |path: &str, content: &str| {
                writer.start_file(path, FileOptions::default()).unwrap();
                writer.write_all(content.as_bytes()).unwrap();
            };
            add("[Content_Types].xml", &content_types);
            add("_rels/.rels", &root_rels);
            add("xl/workbook.xml", &workbook);
            add("xl/_rels/workbook.xml.rels", &workbook_rels);
            for (index, (_, sheet_xml)) in sheets.iter().enumerate() {
                add(&format!("xl/worksheets/sheet{}.xml", index + 1), sheet_xml);
            }
            writer.finish().unwrap();
        }
        buffer.into_inner()
    }

    fn worksheet_xml(rows: &[&[&str]]) -> String {
        let mut body = String::new();
        for (row_index, row) in rows.iter().enumerate() {
            body.push_str(&format!("<row r=\"{}\">", row_index + 1));
            for (col_index, cell) in row.iter().enumerate() {
                let column = (b'A' + col_index as u8) as char;
                body.push_str(&format!(
                    "<c r=\"{}{}\" t=\"inlineStr\"><is><t>{}</t></is></c>",
                    column,
                    row_index + 1,
                    cell
                ));
            }
            body.push_str("</row>");
        }
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
             <worksheet xmlns=\"{}\"><sheetData>{}</sheetData></worksheet>",
            MAIN_NS, body
        )
    }

    #[test]
    fn test_extract_sheets_workbook_order_and_csv() {
        let bytes = build_xlsx(&[
            ("Q1", &worksheet_xml(&[&["region", "amount"], &["north", "100"]])),
            ("Q2", &worksheet_xml(&[&["south", "250"]])),
        ]);

        let output = extract_sheets(&bytes).unwrap();

        let q1 = output.find("--- Sheet: Q1 ---").unwrap();
        let q2 = output.find("--- Sheet: Q2 ---").unwrap();
        assert!(q1 < q2);
        assert!(output[q1..q2].contains("region,amount"));
        assert!(output[q1..q2].contains("north,100"));
        assert!(output[q2..].contains("south,250"));
    }

    #[test]
    fn test_render_sheet_header_and_rows() {
        let rows = vec![
            vec!["region".to_string(), "amount".to_string()],
            vec!["north".to_string(), "100".to_string()],
        ];
        let out = render_sheet("Q1", &rows);
        assert_eq!(out, "--- Sheet: Q1 ---\nregion,amount\nnorth,100\n\n");
    }

    #[test]
    fn test_sheet_order_preserved() {
        let q1 = render_sheet("Q1", &[vec!["a".to_string()]]);
        let q2 = render_sheet("Q2", &[vec!["b".to_string()]]);
        let combined = format!("{}{}", q1, q2);

        let q1_pos = combined.find("--- Sheet: Q1 ---").unwrap();
        let q2_pos = combined.find("--- Sheet: Q2 ---").unwrap();
        assert!(q1_pos < q2_pos);
        assert!(combined[q1_pos..q2_pos].contains("a"));
        assert!(combined[q2_pos..].contains("b"));
    }

    #[test]
    fn test_empty_sheet_renders_header_only() {
        let out = render_sheet("Blank", &[]);
        assert_eq!(out, "--- Sheet: Blank ---\n\n");
    }

    #[test]
    fn test_csv_field_quoting() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_field("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn test_not_a_workbook_fails() {
        let result = extract_sheets(b"not an xlsx");
        assert!(matches!(
            result,
            Err(Error::LocalDecode(ref msg)) if msg.contains("failed to open XLSX package")
        ));
    }
}
