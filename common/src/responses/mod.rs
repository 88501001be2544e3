use crate::model::impressions::YearlyImpressions;
use serde::{Deserialize, Serialize};

/// Body of a successful `POST /upload`: the per-year impression totals of the
/// accepted file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: Vec<YearlyImpressions>,
}

/// Body of a rejected `POST /upload`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}
