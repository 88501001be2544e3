//! Impression upload service.
//!
//! Accepts CSV and Excel uploads on `POST /upload`, stores their rows in
//! SQLite and answers with impression totals per start year.

pub mod config;
pub mod db;
pub mod ingest;
pub mod services;
