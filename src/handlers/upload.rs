use axum::{
    extract::{Multipart, Path, State},
    http::header::{CACHE_CONTROL, CONTENT_TYPE},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::{
    rejections::{AppError, ResultExt},
    utils, AppState,
};

const UPLOADS_CACHE_CONTROL: &str = "max-age=3600, must-revalidate";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/upload", post(upload_file))
        .route("/uploads/{*path}", get(serve_upload))
}

/// Stored file names keep the original name behind a timestamp prefix, with
/// anything path-like replaced.
fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::warn!("failed to read multipart field: {e}");
        AppError::Input("failed to read multipart field")
    })? {
        if field.name() != Some("file") {
            continue;
        }

        let original_name = field.file_name().unwrap_or("arquivo").to_string();
        let data = field
            .bytes()
            .await
            .reject_input("failed to read file data")?;

        let file_name = format!(
            "{}-{}",
            utils::timestamp_id(),
            sanitize_file_name(&original_name)
        );
        tokio::fs::create_dir_all(&state.uploads_dir)
            .await
            .reject("could not prepare uploads directory")?;
        tokio::fs::write(state.uploads_dir.join(&file_name), &data)
            .await
            .reject("could not store upload")?;

        tracing::info!("stored upload {file_name} ({} bytes)", data.len());

        let url = format!("{}/uploads/{file_name}", state.base_url);
        return Ok(Json(json!({ "url": url })));
    }

    Err(AppError::Input("missing file field"))
}

async fn serve_upload(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    // The wildcard passes through whatever the client sent, including
    // absolute paths, which would make `join` discard the uploads directory.
    // Only plain name components below it are ever served.
    let relative = std::path::Path::new(&path);
    let escapes = relative
        .components()
        .any(|component| !matches!(component, std::path::Component::Normal(_)));
    if escapes {
        return Err(AppError::NotFound("arquivo não encontrado"));
    }

    let full = state.uploads_dir.join(relative);
    let contents = tokio::fs::read(&full)
        .await
        .map_err(|_| AppError::NotFound("arquivo não encontrado"))?;

    let content_type = match full.extension() {
        Some(ext) if ext == "pdf" => "application/pdf",
        Some(ext) if ext == "png" => "image/png",
        Some(ext) if ext == "jpg" || ext == "jpeg" => "image/jpeg",
        Some(ext) if ext == "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    };

    Ok((
        [
            (CONTENT_TYPE, content_type),
            (CACHE_CONTROL, UPLOADS_CACHE_CONTROL),
        ],
        contents,
    ))
}
