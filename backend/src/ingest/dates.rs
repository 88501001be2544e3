//! Lenient date parsing for upload cells.
//!
//! A column may mix ISO dates with day-first (or month-first) dates. Strings
//! whose first group has four digits are read year-first; everything else is
//! read in the requested [`DateOrder`]. A bare integer such as `2022` is never
//! accepted as a date.

use super::error::FieldError;
use super::table::Cell;
use chrono::{Datelike, NaiveDate, NaiveTime};

/// How to read a date whose year comes last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOrder {
    /// `01-02-2024` is 1 February 2024.
    DayFirst,
    /// `01-02-2024` is 2 January 2024, falling back to day-first when that
    /// reading is impossible.
    MonthFirst,
}

const YEAR_FIRST: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"];

const DAY_FIRST: &[&str] = &[
    "%d-%m-%Y", "%d/%m/%Y", "%d.%m.%Y", "%d-%m-%y", "%d/%m/%y", "%d.%m.%y",
];

const MONTH_FIRST: &[&str] = &[
    "%m-%d-%Y", "%m/%d/%Y", "%m.%d.%Y", "%m-%d-%y", "%m/%d/%y", "%m.%d.%y",
];

const TIME_SUFFIXES: &[&str] = &["%H:%M:%S%.f", "%H:%M:%S", "%H:%M"];

/// Parses a date cell for `column`.
///
/// Spreadsheet date cells are taken as-is; text cells go through
/// [`parse_date_str`]; numeric cells are rejected as bare numbers.
pub fn parse_date_cell(
    cell: &Cell,
    column: &str,
    order: DateOrder,
) -> Result<NaiveDate, FieldError> {
    match cell {
        Cell::Empty => Err(FieldError::EmptyValue {
            column: column.to_string(),
        }),
        Cell::DateTime(dt) => Ok(dt.date()),
        Cell::Text(raw) => parse_date_str(raw, column, order),
        Cell::Int(_) => Err(bare_integer(column, cell)),
        Cell::Float(v) if v.fract() == 0.0 => Err(bare_integer(column, cell)),
        Cell::Float(_) | Cell::Bool(_) => Err(FieldError::InvalidDate {
            column: column.to_string(),
            value: cell.to_string(),
        }),
    }
}

/// Parses a textual date, tolerating a trailing time of day.
pub fn parse_date_str(raw: &str, column: &str, order: DateOrder) -> Result<NaiveDate, FieldError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(FieldError::EmptyValue {
            column: column.to_string(),
        });
    }
    if value.parse::<i64>().is_ok() {
        return Err(FieldError::BareInteger {
            column: column.to_string(),
            value: value.to_string(),
        });
    }

    let date_part = split_time(value).ok_or_else(|| FieldError::InvalidDate {
        column: column.to_string(),
        value: value.to_string(),
    })?;

    let groups: &[&[&str]] = match (leading_digits(date_part) == 4, order) {
        (true, _) => &[YEAR_FIRST],
        (false, DateOrder::DayFirst) => &[DAY_FIRST],
        (false, DateOrder::MonthFirst) => &[MONTH_FIRST, DAY_FIRST],
    };

    // chrono's %Y happily reads "24" as year 24, so short years are weeded out
    // here and left to the %y formats.
    groups
        .iter()
        .flat_map(|formats| formats.iter())
        .filter_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
        .find(|date| date.year() >= 1000)
        .ok_or_else(|| FieldError::InvalidDate {
            column: column.to_string(),
            value: value.to_string(),
        })
}

/// Returns the date portion of `value`, or `None` when a time suffix is
/// present but malformed.
fn split_time(value: &str) -> Option<&str> {
    match value.split_once(['T', ' ']) {
        None => Some(value),
        Some((date, time)) => {
            let time = time.trim();
            TIME_SUFFIXES
                .iter()
                .any(|fmt| NaiveTime::parse_from_str(time, fmt).is_ok())
                .then_some(date)
        }
    }
}

fn leading_digits(value: &str) -> usize {
    value.chars().take_while(char::is_ascii_digit).count()
}

fn bare_integer(column: &str, cell: &Cell) -> FieldError {
    FieldError::BareInteger {
        column: column.to_string(),
        value: cell.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn day_first(raw: &str) -> Result<NaiveDate, FieldError> {
        parse_date_str(raw, "Start", DateOrder::DayFirst)
    }

    #[test]
    fn day_comes_before_month() {
        assert_eq!(day_first("01-02-2024").unwrap(), date(2024, 2, 1));
        assert_eq!(day_first("31/12/2023").unwrap(), date(2023, 12, 31));
        assert_eq!(day_first("05.06.2024").unwrap(), date(2024, 6, 5));
    }

    #[test]
    fn iso_dates_stay_year_month_day() {
        assert_eq!(day_first("2024-01-31").unwrap(), date(2024, 1, 31));
        assert_eq!(day_first("2024-01-02").unwrap(), date(2024, 1, 2));
        assert_eq!(day_first("2024/03/04").unwrap(), date(2024, 3, 4));
    }

    #[test]
    fn mixed_formats_in_one_column() {
        let parsed: Vec<NaiveDate> = ["2024-01-31", "01-02-2024", " 15/03/2024 "]
            .iter()
            .map(|raw| day_first(raw).unwrap())
            .collect();
        assert_eq!(parsed, vec![date(2024, 1, 31), date(2024, 2, 1), date(2024, 3, 15)]);
    }

    #[test]
    fn two_digit_years_expand() {
        assert_eq!(day_first("01-02-24").unwrap(), date(2024, 2, 1));
        assert_eq!(day_first("01/02/99").unwrap(), date(1999, 2, 1));
    }

    #[test]
    fn time_of_day_is_dropped() {
        assert_eq!(day_first("2024-01-31 00:00:00").unwrap(), date(2024, 1, 31));
        assert_eq!(day_first("2024-01-31T13:45").unwrap(), date(2024, 1, 31));
        assert!(matches!(
            day_first("2024-01-31 noon"),
            Err(FieldError::InvalidDate { .. })
        ));
    }

    #[test]
    fn bare_integer_is_rejected_distinctly() {
        assert_eq!(
            day_first("2022"),
            Err(FieldError::BareInteger {
                column: "Start".to_string(),
                value: "2022".to_string(),
            })
        );
    }

    #[test]
    fn garbage_and_impossible_dates_are_invalid() {
        for raw in ["not a date", "32-01-2024", "2024-13-01", "31-02-2024"] {
            assert!(
                matches!(day_first(raw), Err(FieldError::InvalidDate { .. })),
                "{raw}"
            );
        }
    }

    #[test]
    fn blank_text_is_empty_value() {
        assert!(matches!(day_first("   "), Err(FieldError::EmptyValue { .. })));
    }

    #[test]
    fn month_first_reads_us_dates_and_falls_back() {
        let month_first = |raw| parse_date_str(raw, "Start", DateOrder::MonthFirst).unwrap();
        assert_eq!(month_first("01-02-2024"), date(2024, 1, 2));
        assert_eq!(month_first("31-01-2024"), date(2024, 1, 31));
        assert_eq!(month_first("2025-03-01"), date(2025, 3, 1));
    }

    #[test]
    fn typed_cells() {
        let dt = date(2024, 5, 6).and_hms_opt(0, 0, 0).unwrap();
        assert_eq!(
            parse_date_cell(&Cell::DateTime(dt), "End", DateOrder::DayFirst).unwrap(),
            date(2024, 5, 6)
        );
        assert!(matches!(
            parse_date_cell(&Cell::Int(2022), "End", DateOrder::DayFirst),
            Err(FieldError::BareInteger { .. })
        ));
        assert!(matches!(
            parse_date_cell(&Cell::Float(2022.0), "End", DateOrder::DayFirst),
            Err(FieldError::BareInteger { .. })
        ));
        assert!(matches!(
            parse_date_cell(&Cell::Float(45000.5), "End", DateOrder::DayFirst),
            Err(FieldError::InvalidDate { .. })
        ));
        assert!(matches!(
            parse_date_cell(&Cell::Empty, "End", DateOrder::DayFirst),
            Err(FieldError::EmptyValue { .. })
        ));
    }
}
