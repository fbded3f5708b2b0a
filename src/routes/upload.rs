use axum::{
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{field, info, info_span, warn, Instrument, Span};
use uuid::Uuid;

use crate::agents::MindMapAgent;
use crate::documents::{DocumentKind, DocumentProcessor};
use crate::models::{AppState, MindMap, MindMapResponse, UploadedDocument};
use crate::types::{AppError, AppResult};

pub fn router(state: AppState) -> Router {
    let body_limit = state.config.server.max_upload_bytes;

    Router::new()
        .route("/api/upload", post(upload_file))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

/// POST /api/upload - multipart upload of a PDF, DOCX or TXT file
async fn upload_file(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<MindMapResponse>> {
    let span = info_span!("upload", request_id = %Uuid::new_v4(), filename = field::Empty);

    let result = handle_upload(&state, multipart).instrument(span.clone()).await;

    if let Err(e) = &result {
        if !e.status_code().is_server_error() {
            span.in_scope(|| warn!(error = %e, "Upload rejected"));
        }
    }

    result.map(|mind_map| Json(MindMapResponse { mind_map }))
}

async fn handle_upload(
    state: &AppState,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<MindMap> {
    let multipart = multipart
        .map_err(|e| AppError::InvalidRequest(format!("Expected a multipart form: {}", e)))?;
    let document = read_upload(multipart).await?;
    Span::current().record("filename", document.filename.as_str());
    generate_from_document(state, document).await
}

/// Take the first multipart field that carries a file name.
async fn read_upload(mut multipart: Multipart) -> AppResult<UploadedDocument> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let filename = match field.file_name() {
            Some(name) => name.to_string(),
            None => continue,
        };
        if filename.is_empty() {
            return Err(AppError::MissingFile);
        }

        let content_type = field.content_type().map(str::to_string);
        let content = field.bytes().await.map_err(multipart_error)?;

        let document = UploadedDocument::new(filename, content_type.as_deref(), content);
        info!(
            filename = %document.filename,
            content_type = %document.content_type,
            bytes = document.size(),
            "Read uploaded file"
        );
        return Ok(document);
    }

    Err(AppError::MissingFile)
}

fn multipart_error(e: axum::extract::multipart::MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::InvalidRequest(format!("Failed to read upload: {}", e.body_text()))
    }
}

async fn generate_from_document(
    state: &AppState,
    document: UploadedDocument,
) -> AppResult<MindMap> {
    let kind = DocumentProcessor::detect_kind(&document.filename)?;

    let content = document.content;
    let text = tokio::task::spawn_blocking(move || DocumentProcessor::extract_as(kind, &content))
        .await
        .map_err(|e| extraction_join_error(kind, e))??;

    let mind_map = MindMapAgent::generate(&text, state.llm.as_ref(), &state.config.llm).await?;
    info!("Mind map generation completed successfully");
    Ok(mind_map)
}

/// A parser that panics on a malformed file is an extraction failure, not a
/// server fault.
fn extraction_join_error(kind: DocumentKind, e: tokio::task::JoinError) -> AppError {
    if !e.is_panic() {
        return AppError::Internal(format!("Text extraction task failed: {}", e));
    }

    let payload = e.into_panic();
    let message = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "parser panicked".to_string());
    AppError::Extraction(format!(
        "Error processing {}: {}",
        kind.to_string().to_uppercase(),
        message
    ))
}
