use super::dates::{parse_date_cell, DateOrder};
use super::error::{IngestError, IngestResult};
use super::rows::parse_number;
use super::table::Table;
use chrono::Datelike;
use common::model::impressions::YearlyImpressions;
use std::collections::BTreeMap;

/// Sums `Impr` per calendar year of `Start`, ascending by year.
///
/// Only the `Start` and `Impr` columns are read. Dates here are read
/// month-first, so any value the row mapper accepted yields the same year.
pub fn sum_impressions_by_year(table: &Table) -> IngestResult<Vec<YearlyImpressions>> {
    let column = |name: &str| {
        table.column_index(name).ok_or_else(|| IngestError::SchemaMismatch {
            missing: vec![name.to_string()],
            unexpected: Vec::new(),
        })
    };
    let start = column("Start")?;
    let impr = column("Impr")?;

    let mut totals: BTreeMap<i32, f64> = BTreeMap::new();
    for (index, row) in table.rows.iter().enumerate() {
        let parsed = parse_date_cell(table.value(index, start), "Start", DateOrder::MonthFirst)
            .and_then(|date| {
                let value = parse_number(table.value(index, impr), "Impr")?;
                Ok((date.year(), value))
            });
        let (year, value) = parsed.map_err(|source| IngestError::RowParse {
            index,
            row: table.describe_row(row),
            source,
        })?;
        *totals.entry(year).or_default() += value;
    }

    Ok(totals
        .into_iter()
        .map(|(year, impr)| YearlyImpressions { year, impr })
        .collect())
}
