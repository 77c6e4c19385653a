//! Single-file multipart uploads.

use axum::extract::Multipart;
use bytes::Bytes;
use fsm_errors::{Problem, catalog, current_trace_id};

/// One uploaded file.
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// Read the `file` field of a multipart body, or the first field that
/// carries a filename.
///
/// # Errors
/// 400 if the body is malformed or holds no file.
pub async fn read_upload(mut multipart: Multipart, instance: &str) -> Result<Upload, Problem> {
    let bad_request =
        |detail: String| catalog::BAD_REQUEST.with_context(detail, instance, current_trace_id());

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request(format!("Malformed upload: {e}")))?
    {
        let is_file = field.name() == Some("file") || field.file_name().is_some();
        if !is_file {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_owned();
        let content_type = field.content_type().map(str::to_owned);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| bad_request(format!("Malformed upload: {e}")))?;
        tracing::debug!(%filename, size = bytes.len(), "upload received");
        return Ok(Upload {
            filename,
            content_type,
            bytes,
        });
    }
    Err(bad_request("No file uploaded".to_owned()))
}
