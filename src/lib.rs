pub mod handlers;
pub mod models;
pub mod names;
pub mod rejections;
pub mod selection;
pub mod store;
pub mod utils;

use std::path::PathBuf;

use axum::{routing::get, Router};

#[derive(Clone)]
pub struct AppState {
    pub store: store::Store,
    pub uploads_dir: PathBuf,
    pub base_url: String,
    /// Whether question responses carry `respostaCorreta`. Older clients read
    /// the answer straight off the question; newer ones go through the
    /// verification endpoint, so deployments choose.
    pub include_answers: bool,
    pub max_limit: usize,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(online))
        .merge(handlers::quiz::routes())
        .merge(handlers::ebooks::routes())
        .merge(handlers::banners::routes())
        .merge(handlers::upload::routes())
        .with_state(state)
}

async fn online() -> &'static str {
    "API MozEstuda está online!"
}
