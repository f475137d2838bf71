#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use mozestuda_api::models::{Question, QuestionDocument};
use mozestuda_api::{names, store::Store, AppState};

pub fn unique_dir(prefix: &str) -> PathBuf {
    use std::sync::atomic::{AtomicU32, Ordering};
    static COUNTER: AtomicU32 = AtomicU32::new(0);
    let id = COUNTER.fetch_add(1, Ordering::SeqCst);
    let dir = std::env::temp_dir().join(format!("{prefix}_{}_{id}", std::process::id()));
    // Clean up leftovers from previous runs
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).expect("failed to create test directory");
    dir
}

pub async fn create_test_store() -> (Store, PathBuf) {
    let dir = unique_dir("mozestuda_test");
    let store = Store::new(dir.clone())
        .await
        .expect("failed to create test store");
    (store, dir)
}

pub fn test_state(store: Store) -> AppState {
    AppState {
        store,
        uploads_dir: unique_dir("mozestuda_uploads"),
        base_url: "http://localhost:3000".to_owned(),
        include_answers: true,
        max_limit: names::MAX_LIMIT,
    }
}

pub fn sample_question(id: &str, materia: &str, nivel: Option<&str>) -> Question {
    let opcoes = BTreeMap::from([
        ("A".to_owned(), "2".to_owned()),
        ("B".to_owned(), "3".to_owned()),
        ("C".to_owned(), "4".to_owned()),
        ("D".to_owned(), "5".to_owned()),
    ]);
    Question {
        id: id.to_owned(),
        pergunta: format!("Pergunta {id}"),
        opcoes,
        resposta_correta: "A".to_owned(),
        materia: materia.to_owned(),
        nivel: nivel.map(str::to_owned),
        explicacao: Some("1 + 1 = 2".to_owned()),
    }
}

pub fn write_questions(path: &Path, questions: Vec<Question>) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("failed to create document directory");
    }
    let doc = QuestionDocument {
        perguntas: questions,
    };
    std::fs::write(path, serde_json::to_vec_pretty(&doc).expect("serialize document"))
        .expect("failed to write document");
}
