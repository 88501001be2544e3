//! Decoding of uploaded bytes into an in-memory table.
//!
//! The decoder is picked from the file name alone: `.csv` goes through the
//! `csv` reader, `.xls`/`.xlsx` through `calamine` (first sheet only). The
//! first row is always the header.

use super::error::{IngestError, IngestResult};
use calamine::{open_workbook_from_rs, Data, Reader, Xls, Xlsx};
use chrono::{NaiveDateTime, NaiveTime};
use csv::ReaderBuilder;
use log::debug;
use std::fmt;
use std::io::Cursor;
use std::path::Path;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

static EMPTY_CELL: Cell = Cell::Empty;

/// A single raw value as the decoder produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
}

impl Cell {
    fn from_text(value: &str) -> Self {
        if value.trim().is_empty() {
            Cell::Empty
        } else {
            Cell::Text(value.to_string())
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(s) => f.write_str(s),
            Cell::Int(i) => write!(f, "{i}"),
            Cell::Float(v) => write!(f, "{v}"),
            Cell::Bool(b) => write!(f, "{b}"),
            Cell::DateTime(dt) if dt.time() == NaiveTime::MIN => {
                write!(f, "{}", dt.format("%Y-%m-%d"))
            }
            Cell::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

impl From<&Data> for Cell {
    fn from(value: &Data) -> Self {
        match value {
            Data::Empty => Cell::Empty,
            Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::from_text(s),
            Data::Int(i) => Cell::Int(*i),
            Data::Float(v) => Cell::Float(*v),
            Data::Bool(b) => Cell::Bool(*b),
            Data::DateTime(dt) => match dt.as_datetime() {
                Some(parsed) => Cell::DateTime(parsed),
                None => Cell::Float(dt.as_f64()),
            },
            Data::Error(e) => Cell::Text(e.to_string()),
        }
    }
}

/// Rows of cells under an ordered list of column names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Builds a table, padding short rows with `Cell::Empty` and dropping rows
    /// that hold no value at all.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .filter(|row| row.iter().any(|cell| !cell.is_empty()))
            .map(|mut row| {
                if row.len() < width {
                    row.resize(width, Cell::Empty);
                }
                row
            })
            .collect();
        Self { columns, rows }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// The cell at `row`, `column`; anything outside the table reads as empty.
    pub fn value(&self, row: usize, column: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .unwrap_or(&EMPTY_CELL)
    }

    /// Renders a row as `Column=value` pairs for error messages.
    pub fn describe_row(&self, row: &[Cell]) -> String {
        self.columns
            .iter()
            .zip(row)
            .map(|(column, cell)| format!("{column}={cell}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Decodes an uploaded file into a [`Table`], choosing the decoder from the
/// file name suffix.
pub fn read_file(filename: &str, bytes: &[u8]) -> IngestResult<Table> {
    let table = if filename.ends_with(".csv") {
        read_csv(bytes)?
    } else if filename.ends_with(".xlsx") {
        read_workbook::<Xlsx<Cursor<Vec<u8>>>>(bytes)?
    } else if filename.ends_with(".xls") {
        read_workbook::<Xls<Cursor<Vec<u8>>>>(bytes)?
    } else {
        return Err(IngestError::UnsupportedFormat {
            extension: Path::new(filename)
                .extension()
                .map(|ext| ext.to_string_lossy().into_owned()),
        });
    };
    debug!(
        "Decoded '{}': columns={:?}, rows={}",
        filename,
        table.columns,
        table.rows.len()
    );
    Ok(table)
}

fn read_csv(bytes: &[u8]) -> IngestResult<Table> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(bytes);

    let columns = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(Cell::from_text).collect());
    }
    Ok(Table::new(columns, rows))
}

fn read_workbook<R>(bytes: &[u8]) -> IngestResult<Table>
where
    R: Reader<Cursor<Vec<u8>>>,
    calamine::Error: From<R::Error>,
{
    let mut workbook: R =
        open_workbook_from_rs(Cursor::new(bytes.to_vec())).map_err(calamine::Error::from)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(IngestError::EmptyWorkbook)?
        .map_err(calamine::Error::from)?;

    let mut sheet_rows = range.rows();
    let columns = match sheet_rows.next() {
        Some(header) => header
            .iter()
            .map(|cell| Cell::from(cell).to_string().trim().to_string())
            .collect(),
        None => return Ok(Table::default()),
    };
    let rows = sheet_rows
        .map(|row| row.iter().map(Cell::from).collect())
        .collect();
    Ok(Table::new(columns, rows))
}
