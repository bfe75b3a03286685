use super::{CellValue, TableError};
use itertools::Itertools;
use std::{fmt::Display, io::Write, path::Path};

/// cells wider than this are cut short when printed
const MAX_CELL_WIDTH: usize = 50;

/// an in-memory table of typed cells with a (possibly multi-column) row index.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    index_columns: Vec<String>,
    columns: Vec<String>,
    index: Vec<Vec<CellValue>>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new(index_columns: Vec<String>, columns: Vec<String>) -> Table {
        Table {
            index_columns,
            columns,
            index: vec![],
            rows: vec![],
        }
    }

    /// appends a row. index and row values are expected in column order.
    pub fn push_row(&mut self, index: Vec<CellValue>, row: Vec<CellValue>) {
        debug_assert_eq!(index.len(), self.index_columns.len());
        debug_assert_eq!(row.len(), self.columns.len());
        self.index.push(index);
        self.rows.push(row);
    }

    pub fn index_columns(&self) -> &[String] {
        &self.index_columns
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, i: usize) -> Option<(&[CellValue], &[CellValue])> {
        match (self.index.get(i), self.rows.get(i)) {
            (Some(idx), Some(row)) => Some((idx, row)),
            _ => None,
        }
    }

    /// all values of a column, None if the column is absent
    pub fn column(&self, name: &str) -> Option<Vec<&CellValue>> {
        let col = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(|row| &row[col]).collect_vec())
    }

    /// a table with only the requested columns, in the requested order.
    /// fails with every requested column that does not exist.
    pub fn select<S: AsRef<str>>(&self, columns: &[S]) -> Result<Table, TableError> {
        let missing = columns
            .iter()
            .map(|c| c.as_ref())
            .filter(|c| !self.columns.iter().any(|col| col == c))
            .map(String::from)
            .collect_vec();
        if !missing.is_empty() {
            return Err(TableError::MissingColumns(missing));
        }
        let positions = columns
            .iter()
            .filter_map(|c| self.columns.iter().position(|col| col == c.as_ref()))
            .collect_vec();
        let rows = self
            .rows
            .iter()
            .map(|row| positions.iter().map(|p| row[*p].clone()).collect_vec())
            .collect_vec();
        Ok(Table {
            index_columns: self.index_columns.clone(),
            columns: columns.iter().map(|c| String::from(c.as_ref())).collect_vec(),
            index: self.index.clone(),
            rows,
        })
    }

    /// the first n rows
    pub fn head(&self, n: usize) -> Table {
        Table {
            index_columns: self.index_columns.clone(),
            columns: self.columns.clone(),
            index: self.index.iter().take(n).cloned().collect_vec(),
            rows: self.rows.iter().take(n).cloned().collect_vec(),
        }
    }

    /// writes the table with its index as leading CSV columns.
    pub fn write_csv_to<W: Write>(&self, writer: W) -> Result<(), TableError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(self.index_columns.iter().chain(self.columns.iter()))?;
        for (idx, row) in self.index.iter().zip(self.rows.iter()) {
            let record = idx.iter().chain(row.iter()).map(CellValue::to_csv_field);
            csv_writer.write_record(record)?;
        }
        csv_writer.flush().map_err(csv::Error::from)?;
        Ok(())
    }

    pub fn write_csv(&self, path: &Path) -> Result<(), TableError> {
        let file = std::fs::File::create(path).map_err(csv::Error::from)?;
        self.write_csv_to(file)?;
        log::info!("wrote {} rows to {}", self.len(), path.display());
        Ok(())
    }
}

fn clip(s: String) -> String {
    if s.chars().count() > MAX_CELL_WIDTH {
        let clipped: String = s.chars().take(MAX_CELL_WIDTH - 3).collect();
        format!("{clipped}...")
    } else {
        s
    }
}

/// renders right-aligned columns, the index columns first.
impl Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let header = self
            .index_columns
            .iter()
            .chain(self.columns.iter())
            .cloned()
            .map(clip)
            .collect_vec();
        let body = self
            .index
            .iter()
            .zip(self.rows.iter())
            .map(|(idx, row)| {
                idx.iter()
                    .chain(row.iter())
                    .map(|c| clip(c.to_string()))
                    .collect_vec()
            })
            .collect_vec();
        let widths = (0..header.len())
            .map(|i| {
                body.iter()
                    .map(|r| r[i].chars().count())
                    .chain(std::iter::once(header[i].chars().count()))
                    .max()
                    .unwrap_or_default()
            })
            .collect_vec();
        for line in std::iter::once(&header).chain(body.iter()) {
            let text = line
                .iter()
                .zip(widths.iter())
                .map(|(cell, w)| format!("{cell:>w$}"))
                .join("  ");
            writeln!(f, "{}", text.trim_end())?;
        }
        Ok(())
    }
}
