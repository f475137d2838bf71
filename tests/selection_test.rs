mod common;

use std::collections::HashSet;

use common::sample_question;
use mozestuda_api::models::Question;
use mozestuda_api::selection;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn numbered_questions(n: usize) -> Vec<Question> {
    (0..n)
        .map(|i| sample_question(&format!("q{i}"), "matematica", None))
        .collect()
}

fn ids(questions: &[Question]) -> HashSet<String> {
    questions.iter().map(|q| q.id.clone()).collect()
}

#[test]
fn materia_filter_is_case_insensitive() {
    let questions = vec![
        sample_question("q1", "Matematica", None),
        sample_question("q2", "matematica", None),
        sample_question("q3", "historia", None),
    ];

    let filtered = selection::filter_by_materia(questions, "MATEMATICA");
    assert_eq!(ids(&filtered), HashSet::from(["q1".into(), "q2".into()]));
}

#[test]
fn nivel_filter_normalizes_synonyms() {
    let questions = vec![
        sample_question("q1", "historia", Some("medio")),
        sample_question("q2", "historia", Some("Secundario")),
        sample_question("q3", "historia", Some("superior")),
        sample_question("q4", "historia", None),
    ];

    let filtered = selection::filter_by_nivel(questions, "secundario");
    assert_eq!(ids(&filtered), HashSet::from(["q1".into(), "q2".into()]));
}

#[test]
fn records_without_level_tag_are_excluded_by_the_filter() {
    let questions = vec![sample_question("q1", "historia", None)];
    assert!(selection::filter_by_nivel(questions, "primario").is_empty());
}

#[test]
fn pick_returns_a_permutation_when_nothing_is_cut() {
    let questions = numbered_questions(8);
    let expected = ids(&questions);

    let mut rng = StdRng::seed_from_u64(7);
    let picked = selection::pick(questions, Some(20), 20, &mut rng);

    assert_eq!(picked.len(), 8);
    assert_eq!(ids(&picked), expected);
}

#[test]
fn pick_truncates_to_the_requested_limit() {
    // Three stored questions, limit two: exactly two distinct ones come back
    let questions = numbered_questions(3);
    let available = ids(&questions);

    let mut rng = StdRng::seed_from_u64(42);
    let picked = selection::pick(questions, Some(2), 20, &mut rng);

    assert_eq!(picked.len(), 2);
    let picked_ids = ids(&picked);
    assert_eq!(picked_ids.len(), 2);
    assert!(picked_ids.is_subset(&available));
}

#[test]
fn pick_defaults_to_ten_questions() {
    let questions = numbered_questions(15);
    let mut rng = StdRng::seed_from_u64(1);
    let picked = selection::pick(questions, None, 20, &mut rng);
    assert_eq!(picked.len(), 10);
}

#[test]
fn pick_clamps_to_the_configured_maximum() {
    let questions = numbered_questions(50);
    let mut rng = StdRng::seed_from_u64(1);
    let picked = selection::pick(questions, Some(40), 20, &mut rng);
    assert_eq!(picked.len(), 20);
}

#[test]
fn redacted_answers_are_omitted_from_the_serialized_question() {
    let mut questions = vec![sample_question("q1", "matematica", None)];
    selection::redact_answers(&mut questions);

    let value = serde_json::to_value(&questions[0]).expect("serialize question");
    assert!(value.get("respostaCorreta").is_none());
    assert!(value.get("opcoes").is_some());
}
