use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use color_eyre::{eyre::eyre, Result};

use crate::models::{Question, QuestionDocument};
use crate::{names, selection, utils};

use super::{QuestionSource, Store};

impl Store {
    /// Load the question collection for a (materia, nivel) query, following
    /// the layout resolution order and filtering in memory where the resolved
    /// layout requires it. Returns an empty collection for unknown subjects;
    /// use [`Store::subject_known`] to tell the two apart.
    pub async fn questions(&self, materia: Option<&str>, nivel: Option<&str>) -> Vec<Question> {
        let Some(materia) = materia else {
            let combined: QuestionDocument =
                self.read_json_or_default(&self.path(names::QUIZ_FILE)).await;
            return match nivel {
                Some(nivel) => selection::filter_by_nivel(combined.perguntas, nivel),
                None => combined.perguntas,
            };
        };

        let source = self.resolve_source(materia, nivel).await;
        let doc: QuestionDocument = self.read_json_or_default(source.path()).await;
        let mut questions = doc.perguntas;

        if source.needs_filtering() {
            questions = selection::filter_by_materia(questions, materia);
        }

        // A per-subject file is not split by level, so the level filter still
        // applies; the nested layout already encodes the level in its path.
        if let Some(nivel) = nivel {
            if !matches!(source, QuestionSource::PerLevelPerSubjectFile(_)) {
                questions = selection::filter_by_nivel(questions, nivel);
            }
        }

        questions
    }

    /// Whether a subject resolves to any layout at all within the requested
    /// level scope. A subject with a dedicated (possibly empty) file is
    /// known; a subject that appears in no file and carries no matching
    /// records in the combined document is not.
    pub async fn subject_known(&self, materia: &str, nivel: Option<&str>) -> bool {
        let source = self.resolve_source(materia, nivel).await;
        if !matches!(source, QuestionSource::SingleFile(_)) {
            return true;
        }

        // resolve_source only probes the level tree when a nivel narrows it;
        // without one, a subject living only under quiz/<nivel>/ still counts.
        if nivel.is_none() {
            let lowered = materia.to_lowercase();
            if !(lowered.contains(['/', '\\']) || lowered.contains("..")) {
                let quiz_dir = self.path(names::QUIZ_DIR);
                for level in names::LEVELS {
                    let nested = quiz_dir.join(level).join(format!("{lowered}.json"));
                    if super::source::file_exists(&nested).await {
                        return true;
                    }
                }
            }
        }

        let combined: QuestionDocument = self.read_json_or_default(source.path()).await;
        let materia = materia.to_lowercase();
        combined.perguntas.iter().any(|q| {
            if q.materia.to_lowercase() != materia {
                return false;
            }
            match nivel {
                Some(nivel) => {
                    let wanted = names::normalized_level(nivel);
                    q.nivel
                        .as_deref()
                        .is_some_and(|n| names::normalized_level(n) == wanted)
                }
                None => true,
            }
        })
    }

    /// Known subjects across every layout, lower-cased and sorted. With a
    /// level given, only the matching level directory and combined records
    /// tagged with that level are considered.
    pub async fn subjects(&self, nivel: Option<&str>) -> Vec<String> {
        let quiz_dir = self.path(names::QUIZ_DIR);
        let mut subjects: BTreeSet<String> = BTreeSet::new();

        match nivel {
            Some(nivel) => {
                if let Some(level) = names::canonical_level(nivel) {
                    subjects.extend(json_stems(&quiz_dir.join(level)).await);
                }
            }
            None => {
                subjects.extend(json_stems(&quiz_dir).await);
                for level in names::LEVELS {
                    subjects.extend(json_stems(&quiz_dir.join(level)).await);
                }
            }
        }

        let combined: QuestionDocument =
            self.read_json_or_default(&self.path(names::QUIZ_FILE)).await;
        for question in &combined.perguntas {
            if let Some(nivel) = nivel {
                let wanted = names::normalized_level(nivel);
                let matches = question
                    .nivel
                    .as_deref()
                    .is_some_and(|n| names::normalized_level(n) == wanted);
                if !matches {
                    continue;
                }
            }
            subjects.insert(question.materia.to_lowercase());
        }

        subjects.into_iter().collect()
    }

    /// Question counts per subject, for the statistics endpoint. Re-reads per
    /// subject; the data set is small and nothing is cached by design.
    pub async fn subject_counts(&self, nivel: Option<&str>) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for materia in self.subjects(nivel).await {
            let count = self.questions(Some(&materia), nivel).await.len();
            counts.insert(materia, count);
        }
        counts
    }

    /// Locate a question by id. With a subject hint the lookup stays within
    /// the resolved scope; without one it walks every layout.
    pub async fn find_question(
        &self,
        id: &str,
        materia: Option<&str>,
        nivel: Option<&str>,
    ) -> Option<Question> {
        if materia.is_some() {
            return self
                .questions(materia, nivel)
                .await
                .into_iter()
                .find(|q| q.id == id);
        }

        let combined: QuestionDocument =
            self.read_json_or_default(&self.path(names::QUIZ_FILE)).await;
        if let Some(question) = combined.perguntas.into_iter().find(|q| q.id == id) {
            return Some(question);
        }

        // A nivel hint on its own narrows which level directory is walked;
        // it only affects document resolution, never record filtering.
        let quiz_dir = self.path(names::QUIZ_DIR);
        let mut files = json_files(&quiz_dir).await;
        match nivel.and_then(names::canonical_level) {
            Some(level) => files.extend(json_files(&quiz_dir.join(level)).await),
            None => {
                for level in names::LEVELS {
                    files.extend(json_files(&quiz_dir.join(level)).await);
                }
            }
        }

        for path in files {
            let doc: QuestionDocument = self.read_json_or_default(&path).await;
            if let Some(question) = doc.perguntas.into_iter().find(|q| q.id == id) {
                return Some(question);
            }
        }

        None
    }

    /// Validate, assign an id when absent, and append to the resolved
    /// document, creating directories as needed. Whole-document rewrite;
    /// questions are never updated in place or deleted.
    pub async fn append_question(&self, mut question: Question) -> Result<Question> {
        validate_question(&question)?;

        if question.id.is_empty() {
            question.id = utils::timestamp_id();
        }

        let source = self
            .resolve_source(&question.materia, question.nivel.as_deref())
            .await;
        let path = source.path().to_path_buf();

        let mut doc: QuestionDocument = self.read_json_or_default(&path).await;
        doc.perguntas.push(question.clone());
        self.write_json(&path, &doc).await?;

        tracing::info!("appended question {} to {}", question.id, path.display());
        Ok(question)
    }
}

pub fn validate_question(question: &Question) -> Result<()> {
    if question.pergunta.trim().is_empty() {
        return Err(eyre!("pergunta is required"));
    }
    if question.materia.trim().is_empty() {
        return Err(eyre!("materia is required"));
    }
    for label in names::OPTION_LABELS {
        if !question.opcoes.contains_key(label) {
            return Err(eyre!("missing option {label}"));
        }
    }
    if !question.opcoes.contains_key(question.resposta_correta.as_str()) {
        return Err(eyre!("respostaCorreta must be one of the options"));
    }
    if let Some(nivel) = question.nivel.as_deref() {
        if names::canonical_level(nivel).is_none() {
            return Err(eyre!("unknown nivel '{nivel}'"));
        }
    }
    Ok(())
}

async fn json_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(_) => return files,
    };

    while let Ok(Some(entry)) = entries.next_entry().await {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }

    files
}

async fn json_stems(dir: &Path) -> Vec<String> {
    json_files(dir)
        .await
        .iter()
        .filter_map(|path| path.file_stem().and_then(|stem| stem.to_str()))
        .map(str::to_lowercase)
        .collect()
}
