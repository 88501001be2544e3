use serde::{Deserialize, Serialize};

/// Total impressions for one calendar year of campaign start dates.
///
/// Serialized as `{"Year": 2024, "Impr": 300.0}` to keep the column names
/// used in the uploaded files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyImpressions {
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Impr")]
    pub impr: f64,
}
