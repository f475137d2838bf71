use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    models::Question,
    names,
    rejections::{AppError, ResultExt},
    selection, store, AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/quiz/perguntas",
            get(list_questions).post(create_question),
        )
        .route("/api/quiz/verificar-resposta", post(verify_answer))
        .route("/api/quiz/materias", get(list_subjects))
        .route("/api/quiz/niveis", get(list_levels))
        .route("/api/quiz/estatisticas", get(statistics))
}

#[derive(Deserialize)]
struct PerguntasQuery {
    materia: Option<String>,
    nivel: Option<String>,
    limit: Option<usize>,
}

#[derive(Deserialize)]
struct NivelQuery {
    nivel: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VerifyBody {
    pergunta_id: String,
    resposta: String,
    #[serde(default)]
    materia: Option<String>,
    #[serde(default)]
    nivel: Option<String>,
}

/// Clients send empty query values for filters they leave blank.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

async fn list_questions(
    State(state): State<AppState>,
    Query(query): Query<PerguntasQuery>,
) -> Result<Json<Value>, AppError> {
    let materia = non_empty(query.materia.as_deref());
    let nivel = non_empty(query.nivel.as_deref());

    if let Some(nivel) = nivel {
        if names::canonical_level(nivel).is_none() {
            return Err(AppError::NotFound("nível desconhecido"));
        }
    }
    if let Some(materia) = materia {
        if !state.store.subject_known(materia, nivel).await {
            return Err(AppError::NotFound("matéria desconhecida"));
        }
    }

    let questions = state.store.questions(materia, nivel).await;

    let mut rng = StdRng::from_entropy();
    let mut selected = selection::pick(questions, query.limit, state.max_limit, &mut rng);
    if !state.include_answers {
        selection::redact_answers(&mut selected);
    }

    Ok(Json(json!({
        "success": true,
        "total": selected.len(),
        "data": selected,
    })))
}

async fn create_question(
    State(state): State<AppState>,
    Json(question): Json<Question>,
) -> Result<Json<Value>, AppError> {
    store::validate_question(&question).reject_input("invalid question payload")?;

    let created = state
        .store
        .append_question(question)
        .await
        .reject("could not save question")?;

    Ok(Json(json!({ "success": true, "data": created })))
}

async fn verify_answer(
    State(state): State<AppState>,
    Json(body): Json<VerifyBody>,
) -> Result<Json<Value>, AppError> {
    let resposta = body.resposta.trim().to_uppercase();
    if resposta.is_empty() {
        return Err(AppError::Input("resposta is required"));
    }

    let question = state
        .store
        .find_question(
            &body.pergunta_id,
            non_empty(body.materia.as_deref()),
            non_empty(body.nivel.as_deref()),
        )
        .await
        .ok_or(AppError::NotFound("pergunta não encontrada"))?;

    let esta_correta = question.resposta_correta.to_uppercase() == resposta;

    Ok(Json(json!({
        "success": true,
        "data": {
            "estaCorreta": esta_correta,
            "respostaCorreta": question.resposta_correta,
            "explicacao": question.explicacao,
        },
    })))
}

async fn list_subjects(
    State(state): State<AppState>,
    Query(query): Query<NivelQuery>,
) -> Json<Value> {
    let subjects = state.store.subjects(non_empty(query.nivel.as_deref())).await;
    Json(json!({ "success": true, "data": subjects }))
}

async fn list_levels() -> Json<Value> {
    Json(json!({ "success": true, "data": names::LEVELS }))
}

async fn statistics(
    State(state): State<AppState>,
    Query(query): Query<NivelQuery>,
) -> Json<Value> {
    let counts = state
        .store
        .subject_counts(non_empty(query.nivel.as_deref()))
        .await;
    let total: usize = counts.values().sum();

    Json(json!({
        "success": true,
        "data": { "porMateria": counts, "total": total },
    }))
}
