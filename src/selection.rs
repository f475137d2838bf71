use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::Question;
use crate::names;

/// Exact match on the subject tag, case-insensitive.
pub fn filter_by_materia(questions: Vec<Question>, materia: &str) -> Vec<Question> {
    let wanted = materia.to_lowercase();
    questions
        .into_iter()
        .filter(|q| q.materia.to_lowercase() == wanted)
        .collect()
}

/// Exact match on the level tag after synonym normalization. Records without
/// a level tag are excluded while the filter is active.
pub fn filter_by_nivel(questions: Vec<Question>, nivel: &str) -> Vec<Question> {
    let wanted = names::normalized_level(nivel);
    questions
        .into_iter()
        .filter(|q| {
            q.nivel
                .as_deref()
                .is_some_and(|n| names::normalized_level(n) == wanted)
        })
        .collect()
}

/// Shuffle the matching records and cut them down to the response size:
/// `min(requested, available)`, default 10, clamped to `max_limit`.
///
/// The caller provides the RNG so tests can seed it; production seeds from
/// entropy, so the order is intentionally not reproducible between calls.
pub fn pick(
    mut questions: Vec<Question>,
    limit: Option<usize>,
    max_limit: usize,
    rng: &mut impl Rng,
) -> Vec<Question> {
    questions.shuffle(rng);
    let limit = limit.unwrap_or(names::DEFAULT_LIMIT).min(max_limit);
    questions.truncate(limit);
    questions
}

/// Strips the stored answers so clients have to go through the verification
/// endpoint. Cleared answers are omitted from the serialized question.
pub fn redact_answers(questions: &mut [Question]) {
    for question in questions {
        question.resposta_correta.clear();
    }
}
