use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/banners", get(list_banners))
}

async fn list_banners(State(state): State<AppState>) -> Json<Value> {
    let banners = state.store.banners().await;
    Json(json!({ "success": true, "data": banners }))
}
