use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A validated business row that has not been persisted yet.
///
/// Produced by the row mapper for every line of an upload before anything is
/// written, then handed to storage as one batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUploadedData {
    pub advertiser: String,
    pub brand: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub format: String,
    pub platform: String,
    pub impr: f64,
}

/// A persisted business row belonging to one `UploadedFile`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedData {
    pub id: i64,
    pub uploaded_file_id: i64,
    pub advertiser: String,
    pub brand: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub format: String,
    pub platform: String,
    pub impr: f64,
}

impl UploadedData {
    /// Drops the identity columns, leaving the business fields as they were
    /// submitted.
    pub fn into_new(self) -> NewUploadedData {
        NewUploadedData {
            advertiser: self.advertiser,
            brand: self.brand,
            start: self.start,
            end: self.end,
            format: self.format,
            platform: self.platform,
            impr: self.impr,
        }
    }
}
