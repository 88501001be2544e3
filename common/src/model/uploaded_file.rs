use serde::{Deserialize, Serialize};

/// One ingested spreadsheet or CSV submission.
///
/// Rows of business data reference it through `UploadedData::uploaded_file_id`;
/// the link is only ever followed by query, never held as an object graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub id: i64,
    /// The original filename as sent in the multipart `file` part.
    pub name: String,
}
