use crate::model::{table::EdgeTable, BikegraphCliError};
use itertools::Itertools;
use std::io::Write;

/// prints the full column list of the edge table, then the first `rows` rows
/// restricted to `columns`. the column list is written before the selection,
/// so it is still printed when a requested column was never computed.
pub fn write_report<W: Write, S: AsRef<str>>(
    edges: &EdgeTable,
    columns: &[S],
    rows: usize,
    out: &mut W,
) -> Result<(), BikegraphCliError> {
    writeln!(out, "columns: [{}]", edges.columns().iter().join(", "))?;
    let selected = edges.select(columns)?.head(rows);
    write!(out, "{selected}")?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::write_report;
    use crate::model::{
        table::{CellValue, Table, TableError},
        BikegraphCliError,
    };

    fn edges() -> Table {
        let mut t = Table::new(
            ["u", "v", "key"].map(String::from).to_vec(),
            ["osmid", "highway", "length"].map(String::from).to_vec(),
        );
        for i in 0..40 {
            t.push_row(
                vec![CellValue::Int(i), CellValue::Int(i + 1), CellValue::Int(0)],
                vec![
                    CellValue::Int(1000 + i),
                    CellValue::Text(String::from("cycleway")),
                    CellValue::Float(10.0),
                ],
            );
        }
        t
    }

    #[test]
    fn prints_columns_then_head() {
        let mut out: Vec<u8> = vec![];
        write_report(&edges(), &["highway", "length"], 25, &mut out)
            .unwrap_or_else(|e| panic!("{e}"));
        let text = String::from_utf8(out).unwrap_or_else(|e| panic!("{e}"));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "columns: [osmid, highway, length]");
        // column list, header, 25 rows
        assert_eq!(lines.len(), 27);
        assert!(!lines[1].contains("osmid"));
    }

    #[test]
    fn missing_column_fails_after_printing_columns() {
        let mut out: Vec<u8> = vec![];
        let result = write_report(&edges(), &["highway", "grade"], 25, &mut out);
        match result {
            Err(BikegraphCliError::TableError {
                source: TableError::MissingColumns(missing),
            }) => assert_eq!(missing, vec![String::from("grade")]),
            other => panic!("expected missing columns, found {other:?}"),
        }
        let text = String::from_utf8(out).unwrap_or_else(|e| panic!("{e}"));
        assert!(text.starts_with("columns: ["));
    }
}
