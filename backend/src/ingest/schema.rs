use super::error::{IngestError, IngestResult};
use std::collections::HashSet;

/// The exact column set an upload must carry.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "Advertiser",
    "Brand",
    "Start",
    "End",
    "Format",
    "Platform",
    "Impr",
];

/// Checks that `columns` holds every required column and nothing else.
///
/// Extra and duplicated columns are rejected just like missing ones.
pub fn validate_columns(columns: &[String]) -> IngestResult<()> {
    let required: HashSet<&str> = REQUIRED_COLUMNS.into_iter().collect();
    let present: HashSet<&str> = columns.iter().map(String::as_str).collect();

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|c| !present.contains(*c))
        .map(|c| c.to_string())
        .collect();

    let mut seen = HashSet::new();
    let unexpected: Vec<String> = columns
        .iter()
        .filter(|c| !required.contains(c.as_str()) || !seen.insert(c.as_str()))
        .cloned()
        .collect();

    if missing.is_empty() && unexpected.is_empty() {
        Ok(())
    } else {
        Err(IngestError::SchemaMismatch {
            missing,
            unexpected,
        })
    }
}
