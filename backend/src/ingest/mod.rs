//! The upload ingestion pipeline.
//!
//! Stages run strictly in order and the first failure stops the upload:
//!
//! 1. `table`: decode the bytes as CSV or a workbook, picked by file name.
//! 2. `schema`: the header must be exactly the required column set.
//! 3. `rows`: map every row to a typed record (day-first dates, numeric `Impr`).
//! 4. storage: one `uploadedfile` row, then all `uploadeddata` rows in one
//!    transaction (see `crate::db`).
//! 5. `aggregate`: per-year impression totals returned to the client.
//!
//! Stages 1 to 3 and 5 are pure; `pipeline::ingest_upload` wires them to the
//! database.

pub mod aggregate;
pub mod dates;
pub mod error;
pub mod pipeline;
pub mod rows;
pub mod schema;
pub mod table;
