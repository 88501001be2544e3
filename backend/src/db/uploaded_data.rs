use common::model::uploaded_data::{NewUploadedData, UploadedData};
use rusqlite::{params, Connection};

/// Inserts every record as a child of `uploaded_file_id` and commits once.
///
/// If any insert fails the transaction is dropped uncommitted and none of the
/// records are stored.
pub fn create_uploaded_data(
    conn: &mut Connection,
    uploaded_file_id: i64,
    rows: &[NewUploadedData],
) -> rusqlite::Result<usize> {
    let tx = conn.transaction()?;
    {
        let mut stmt = tx.prepare(
            r#"INSERT INTO uploadeddata
                   (uploaded_file_id, advertiser, brand, "start", "end", format, platform, impr)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"#,
        )?;
        for row in rows {
            stmt.execute(params![
                uploaded_file_id,
                row.advertiser,
                row.brand,
                row.start,
                row.end,
                row.format,
                row.platform,
                row.impr,
            ])?;
        }
    }
    tx.commit()?;
    Ok(rows.len())
}

/// All rows belonging to one uploaded file, in insertion order.
pub fn find_uploaded_data(
    conn: &Connection,
    uploaded_file_id: i64,
) -> rusqlite::Result<Vec<UploadedData>> {
    let mut stmt = conn.prepare(
        r#"SELECT id, uploaded_file_id, advertiser, brand, "start", "end", format, platform, impr
           FROM uploadeddata
           WHERE uploaded_file_id = ?1
           ORDER BY id"#,
    )?;
    let rows = stmt.query_map(params![uploaded_file_id], |row| {
        Ok(UploadedData {
            id: row.get(0)?,
            uploaded_file_id: row.get(1)?,
            advertiser: row.get(2)?,
            brand: row.get(3)?,
            start: row.get(4)?,
            end: row.get(5)?,
            format: row.get(6)?,
            platform: row.get(7)?,
            impr: row.get(8)?,
        })
    })?;
    rows.collect()
}
