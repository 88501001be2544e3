//! Conversion of validated table rows into typed records.

use super::dates::{parse_date_cell, DateOrder};
use super::error::{FieldError, IngestError, IngestResult};
use super::table::{Cell, Table};
use common::model::uploaded_data::NewUploadedData;

/// Column positions resolved once per table.
struct ColumnMap {
    advertiser: usize,
    brand: usize,
    start: usize,
    end: usize,
    format: usize,
    platform: usize,
    impr: usize,
}

impl ColumnMap {
    fn resolve(table: &Table) -> IngestResult<Self> {
        let index = |name: &str| {
            table.column_index(name).ok_or_else(|| IngestError::SchemaMismatch {
                missing: vec![name.to_string()],
                unexpected: Vec::new(),
            })
        };
        Ok(Self {
            advertiser: index("Advertiser")?,
            brand: index("Brand")?,
            start: index("Start")?,
            end: index("End")?,
            format: index("Format")?,
            platform: index("Platform")?,
            impr: index("Impr")?,
        })
    }
}

/// Maps every row of `table` to a [`NewUploadedData`], in row order.
///
/// Either all rows map or none do: the first bad row aborts the whole table
/// with an error carrying its 0-based index and raw content.
pub fn map_rows(table: &Table) -> IngestResult<Vec<NewUploadedData>> {
    let columns = ColumnMap::resolve(table)?;
    table
        .rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            map_row(table, &columns, index).map_err(|source| IngestError::RowParse {
                index,
                row: table.describe_row(row),
                source,
            })
        })
        .collect()
}

fn map_row(
    table: &Table,
    columns: &ColumnMap,
    row: usize,
) -> Result<NewUploadedData, FieldError> {
    let cell = |column: usize| table.value(row, column);
    Ok(NewUploadedData {
        advertiser: cell(columns.advertiser).to_string(),
        brand: cell(columns.brand).to_string(),
        start: parse_date_cell(cell(columns.start), "Start", DateOrder::DayFirst)?,
        end: parse_date_cell(cell(columns.end), "End", DateOrder::DayFirst)?,
        format: cell(columns.format).to_string(),
        platform: cell(columns.platform).to_string(),
        impr: parse_number(cell(columns.impr), "Impr")?,
    })
}

/// Coerces a cell to `f64`. Text is trimmed before parsing; NaN and the
/// infinities are rejected since they cannot be stored or summed.
pub fn parse_number(cell: &Cell, column: &str) -> Result<f64, FieldError> {
    let invalid = || FieldError::InvalidNumber {
        column: column.to_string(),
        value: cell.to_string(),
    };
    match cell {
        Cell::Empty => Err(FieldError::EmptyValue {
            column: column.to_string(),
        }),
        Cell::Int(i) => Ok(*i as f64),
        Cell::Float(v) if v.is_finite() => Ok(*v),
        Cell::Text(raw) => match raw.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(invalid()),
        },
        Cell::Float(_) => Err(invalid()),
        Cell::Bool(_) | Cell::DateTime(_) => Err(invalid()),
    }
}
