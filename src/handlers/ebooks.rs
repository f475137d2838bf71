use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

use crate::{
    names,
    rejections::{AppError, ResultExt},
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/ebooks", get(list_ebooks).post(create_ebook))
        .route("/api/ebooks/{id}", get(get_ebook))
        .route("/api/ebooks/{id}/related", get(related_ebooks))
        .route("/api/ebooks/category/{categoria}", get(ebooks_by_category))
}

fn ebook_id(ebook: &Value) -> Option<&str> {
    ebook.get("id").and_then(Value::as_str)
}

fn ebook_categoria(ebook: &Value) -> Option<&str> {
    ebook.get("categoria").and_then(Value::as_str)
}

async fn list_ebooks(State(state): State<AppState>) -> Json<Value> {
    let ebooks = state.store.ebooks().await;
    Json(json!({ "success": true, "data": ebooks }))
}

async fn get_ebook(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let ebook = state
        .store
        .ebooks()
        .await
        .into_iter()
        .find(|e| ebook_id(e) == Some(id.as_str()))
        .ok_or(AppError::NotFound("ebook não encontrado"))?;

    Ok(Json(json!({ "success": true, "data": ebook })))
}

/// Ebooks sharing the category of the given one, excluding itself.
async fn related_ebooks(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let ebooks = state.store.ebooks().await;

    let current = ebooks
        .iter()
        .find(|e| ebook_id(e) == Some(id.as_str()))
        .ok_or(AppError::NotFound("ebook não encontrado"))?;
    let categoria = ebook_categoria(current).map(str::to_lowercase);

    let related: Vec<&Value> = ebooks
        .iter()
        .filter(|e| ebook_id(e) != Some(id.as_str()))
        .filter(|e| match (&categoria, ebook_categoria(e)) {
            (Some(wanted), Some(c)) => c.to_lowercase() == *wanted,
            _ => false,
        })
        .take(names::MAX_RELATED_EBOOKS)
        .collect();

    Ok(Json(json!({ "success": true, "data": related })))
}

async fn ebooks_by_category(
    State(state): State<AppState>,
    Path(categoria): Path<String>,
) -> Json<Value> {
    let categoria = categoria.to_lowercase();
    let ebooks: Vec<Value> = state
        .store
        .ebooks()
        .await
        .into_iter()
        .filter(|e| ebook_categoria(e).is_some_and(|c| c.to_lowercase() == categoria))
        .collect();

    Json(json!({ "success": true, "data": ebooks }))
}

async fn create_ebook(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, AppError> {
    if !body.is_object() {
        return Err(AppError::Input("ebook must be a JSON object"));
    }

    let ebook = state
        .store
        .append_ebook(body)
        .await
        .reject("could not save ebook")?;

    Ok(Json(json!({ "success": true, "ebook": ebook })))
}
