//! The upload endpoint.
//!
//! - `POST /upload`: multipart/form-data with a `file` part holding a `.csv`,
//!   `.xls` or `.xlsx` file. The file is decoded, checked against the required
//!   columns, mapped row by row, stored and summarised. Success returns
//!   `200 OK` with `{"message": [{"Year": .., "Impr": ..}, ..]}`; any failure
//!   returns `400 Bad Request` with `{"detail": "Error processing file: .."}`.

use actix_web::web::{post, scope};
use actix_web::Scope;

mod upload;

const API_PATH: &str = "/upload";

/// Configures and returns the Actix scope for the upload route.
pub fn configure_routes() -> Scope {
    scope(API_PATH).route("", post().to(upload::process))
}
