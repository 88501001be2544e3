use thiserror::Error;

/// Everything that can stop an upload from being ingested.
///
/// The HTTP layer does not distinguish between variants; each one is reported
/// to the client through its `Display` text.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Unsupported file format: {}", describe_extension(.extension))]
    UnsupportedFormat { extension: Option<String> },

    #[error("Invalid CSV content: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid workbook content: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("Workbook contains no sheets")]
    EmptyWorkbook,

    #[error(
        "Missing required_columns. required_columns=[{}] (missing: [{}], unexpected: [{}])",
        super::schema::REQUIRED_COLUMNS.join(", "),
        .missing.join(", "),
        .unexpected.join(", ")
    )]
    SchemaMismatch {
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    #[error("Invalid data at row {index} ({row}): {source}")]
    RowParse {
        index: usize,
        row: String,
        #[source]
        source: FieldError,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("{0}")]
    Upload(String),

    #[error("Upload worker failed: {0}")]
    Worker(String),
}

/// Why a single cell could not be turned into a typed value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("column '{column}' is empty")]
    EmptyValue { column: String },

    #[error("column '{column}' holds the bare number '{value}', expected a full date")]
    BareInteger { column: String, value: String },

    #[error("column '{column}' value '{value}' is not a recognised date")]
    InvalidDate { column: String, value: String },

    #[error("column '{column}' value '{value}' is not a number")]
    InvalidNumber { column: String, value: String },
}

fn describe_extension(extension: &Option<String>) -> String {
    match extension {
        Some(ext) => format!("'.{ext}' (expected .csv, .xls or .xlsx)"),
        None => "file name has no extension (expected .csv, .xls or .xlsx)".to_string(),
    }
}

pub type IngestResult<T> = Result<T, IngestError>;
