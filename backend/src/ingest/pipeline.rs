use super::aggregate::sum_impressions_by_year;
use super::error::IngestResult;
use super::rows::map_rows;
use super::schema::validate_columns;
use super::table::read_file;
use crate::db::uploaded_data::create_uploaded_data;
use crate::db::uploaded_file::create_uploaded_file;
use crate::db::Database;
use common::model::impressions::YearlyImpressions;
use common::model::uploaded_file::UploadedFile;
use log::{debug, info};

/// What an accepted upload left behind.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestOutcome {
    pub uploaded_file: UploadedFile,
    pub rows_inserted: usize,
    pub totals: Vec<YearlyImpressions>,
}

/// Runs one upload through every stage: decode, column check, row mapping,
/// storage and the per-year aggregate.
///
/// Rows are fully mapped before anything is written, so a bad row leaves the
/// database untouched. The connection is opened here and closed on return.
pub fn ingest_upload(db: &Database, filename: &str, bytes: &[u8]) -> IngestResult<IngestOutcome> {
    let table = read_file(filename, bytes)?;
    validate_columns(&table.columns)?;
    let records = map_rows(&table)?;
    debug!("Mapped {} rows from '{}'", records.len(), filename);

    let mut conn = db.connect()?;
    let uploaded_file = create_uploaded_file(&conn, filename)?;
    let rows_inserted = create_uploaded_data(&mut conn, uploaded_file.id, &records)?;
    info!(
        "Stored upload '{}' as file {} with {} rows",
        uploaded_file.name, uploaded_file.id, rows_inserted
    );

    let totals = sum_impressions_by_year(&table)?;
    Ok(IngestOutcome {
        uploaded_file,
        rows_inserted,
        totals,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::{count_uploaded_data, count_uploaded_files, temp_database};
    use crate::db::uploaded_data::find_uploaded_data;
    use crate::ingest::error::IngestError;

    const HEADER: &str = "Advertiser,Brand,Start,End,Format,Platform,Impr";

    #[test]
    fn accepted_upload_is_stored_and_aggregated() {
        let (_dir, db) = temp_database();
        let csv = format!(
            "{HEADER}\nA,B,2024-01-01,2024-01-31,Video,YouTube,100\nA,B,01-02-2024,2024-02-28,Video,YouTube,200\nC,D,2025-03-01,2025-03-31,Display,Web,150\n"
        );

        let outcome = ingest_upload(&db, "campaigns.csv", csv.as_bytes()).unwrap();

        assert_eq!(outcome.uploaded_file.name, "campaigns.csv");
        assert_eq!(outcome.rows_inserted, 3);
        assert_eq!(
            outcome.totals,
            vec![
                YearlyImpressions { year: 2024, impr: 300.0 },
                YearlyImpressions { year: 2025, impr: 150.0 },
            ]
        );
        let stored = find_uploaded_data(&db.connect().unwrap(), outcome.uploaded_file.id).unwrap();
        assert_eq!(stored.len(), 3);
        assert_eq!(stored[1].start.to_string(), "2024-02-01");
    }

    #[test]
    fn rejected_rows_leave_no_trace() {
        let (_dir, db) = temp_database();
        let csv = format!(
            "{HEADER}\nA,B,2024-01-01,2024-01-31,Video,YouTube,100\nTestBrand,TestProduct,2022,2023,Video,YouTube,1000\n"
        );

        let err = ingest_upload(&db, "bad.csv", csv.as_bytes()).unwrap_err();

        assert!(matches!(err, IngestError::RowParse { index: 1, .. }), "{err:?}");
        let conn = db.connect().unwrap();
        assert_eq!(count_uploaded_files(&conn).unwrap(), 0);
        assert_eq!(count_uploaded_data(&conn).unwrap(), 0);
    }

    #[test]
    fn non_finite_impressions_are_rejected_before_storage() {
        let (_dir, db) = temp_database();
        for value in ["NaN", "inf"] {
            let csv = format!("{HEADER}\nA,B,2024-01-01,2024-01-31,Video,YouTube,{value}\n");

            let err = ingest_upload(&db, "non_finite.csv", csv.as_bytes()).unwrap_err();

            assert!(matches!(err, IngestError::RowParse { index: 0, .. }), "{value}: {err:?}");
        }
        let conn = db.connect().unwrap();
        assert_eq!(count_uploaded_files(&conn).unwrap(), 0);
        assert_eq!(count_uploaded_data(&conn).unwrap(), 0);
    }

    #[test]
    fn schema_is_checked_before_rows() {
        let (_dir, db) = temp_database();
        let csv = "Advertiser,Brand,Start,End,Format,Platform\nA,B,nonsense,2023,Video,YouTube\n";

        let err = ingest_upload(&db, "short.csv", csv.as_bytes()).unwrap_err();

        assert!(matches!(err, IngestError::SchemaMismatch { .. }), "{err:?}");
        assert_eq!(count_uploaded_files(&db.connect().unwrap()).unwrap(), 0);
    }
}
