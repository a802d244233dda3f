//! Uploaded image routes
//!
//! Serves files stored by [`ImageStore`](crate::services::ImageStore).
//! Product records reference them by bare filename.

use axum::{
    Router,
    body::Bytes,
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::get,
};
use http::{StatusCode, header};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// Serve uploaded file handler
async fn serve_uploaded_file(
    State(state): State<ServerState>,
    Path(filename): Path<String>,
) -> AppResult<Response> {
    let Some(content) = state.images.read(&filename).await? else {
        tracing::debug!(filename = %filename, "Upload not found");
        return Err(AppError::not_found("File not found"));
    };

    let content_type = mime_guess::from_path(&filename)
        .first_or_octet_stream()
        .to_string();
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, content_type)],
        Bytes::from(content),
    )
        .into_response())
}

/// Build upload router
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/uploads/{filename}", get(serve_uploaded_file))
}
