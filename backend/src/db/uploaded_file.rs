use common::model::uploaded_file::UploadedFile;
use rusqlite::{params, Connection, OptionalExtension};

/// Inserts the parent record of an upload and returns it with its assigned id.
///
/// Runs outside any explicit transaction, so the record is committed as soon
/// as this returns.
pub fn create_uploaded_file(conn: &Connection, name: &str) -> rusqlite::Result<UploadedFile> {
    conn.execute("INSERT INTO uploadedfile (name) VALUES (?1)", params![name])?;
    Ok(UploadedFile {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
    })
}

pub fn find_uploaded_file(conn: &Connection, id: i64) -> rusqlite::Result<Option<UploadedFile>> {
    conn.query_row(
        "SELECT id, name FROM uploadedfile WHERE id = ?1",
        params![id],
        |row| {
            Ok(UploadedFile {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        },
    )
    .optional()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::{count_uploaded_files, temp_database};

    #[test]
    fn create_assigns_id_and_keeps_name() {
        let (_dir, db) = temp_database();
        let conn = db.connect().unwrap();

        let first = create_uploaded_file(&conn, "test_file").unwrap();
        let second = create_uploaded_file(&conn, "other.csv").unwrap();

        assert_eq!(first.name, "test_file");
        assert_ne!(first.id, second.id);
        assert_eq!(count_uploaded_files(&conn).unwrap(), 2);
    }

    #[test]
    fn created_file_is_visible_to_other_connections() {
        let (_dir, db) = temp_database();
        let created = create_uploaded_file(&db.connect().unwrap(), "report.xlsx").unwrap();

        let found = find_uploaded_file(&db.connect().unwrap(), created.id).unwrap();
        assert_eq!(found, Some(created));
    }

    #[test]
    fn find_unknown_id_returns_none() {
        let (_dir, db) = temp_database();
        let conn = db.connect().unwrap();
        assert_eq!(find_uploaded_file(&conn, 42).unwrap(), None);
    }
}
