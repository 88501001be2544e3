use crate::db::Database;
use crate::ingest::error::{IngestError, IngestResult};
use crate::ingest::pipeline::{ingest_upload, IngestOutcome};
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Responder};
use common::responses::{ErrorResponse, UploadResponse};
use futures_util::StreamExt;
use log::{info, warn};

const FILE_FIELD: &str = "file";

/// HTTP handler wrapper that converts the pipeline result to an `HttpResponse`.
///
/// - On success: `200 OK` with the per-year impression totals.
/// - On failure: `400 Bad Request` with the error message, whatever stage
///   produced it.
pub async fn process(db: web::Data<Database>, payload: Multipart) -> impl Responder {
    match upload_file(db.into_inner(), payload).await {
        Ok(outcome) => HttpResponse::Ok().json(UploadResponse {
            message: outcome.totals,
        }),
        Err(e) => {
            warn!("Rejected upload: {}", e);
            HttpResponse::BadRequest().json(ErrorResponse {
                detail: format!("Error processing file: {}", e),
            })
        }
    }
}

/// Reads the `file` part and runs it through the ingestion pipeline on the
/// blocking thread pool.
async fn upload_file(
    db: std::sync::Arc<Database>,
    payload: Multipart,
) -> IngestResult<IngestOutcome> {
    let (filename, bytes) = read_file_part(payload).await?;
    info!("Received upload '{}' ({} bytes)", filename, bytes.len());

    tokio::task::spawn_blocking(move || ingest_upload(&db, &filename, &bytes))
        .await
        .map_err(|e| IngestError::Worker(e.to_string()))?
}

/// Collects the first `file` part of the form into memory, skipping any other
/// parts.
async fn read_file_part(mut payload: Multipart) -> IngestResult<(String, Vec<u8>)> {
    let upload_error = |e: actix_multipart::MultipartError| IngestError::Upload(e.to_string());

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(upload_error)?;
        let disposition = field.content_disposition();
        let name = disposition.and_then(|cd| cd.get_name().map(|n| n.to_string()));
        let filename = disposition
            .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
            .unwrap_or_default();

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            bytes.extend_from_slice(&chunk.map_err(upload_error)?);
        }

        if name.as_deref() == Some(FILE_FIELD) {
            return Ok((filename, bytes));
        }
    }
    Err(IngestError::Upload("Missing file".to_string()))
}
