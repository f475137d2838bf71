pub const DEFAULT_LIMIT: usize = 10;
pub const MAX_LIMIT: usize = 20;
pub const MAX_RELATED_EBOOKS: usize = 5;

pub const OPTION_LABELS: [&str; 4] = ["A", "B", "C", "D"];

pub const LEVELS: [&str; 3] = ["primario", "secundario", "superior"];

pub const QUIZ_FILE: &str = "quiz.json";
pub const QUIZ_DIR: &str = "quiz";
pub const EBOOKS_FILE: &str = "ebooks.json";
pub const BANNERS_FILE: &str = "banners.json";

/// Lower-case a level tag and fold legacy spellings into the canonical name.
/// "medio" survives in older question files and clients.
pub fn normalized_level(nivel: &str) -> String {
    let nivel = nivel.to_lowercase();
    match nivel.as_str() {
        "medio" | "médio" => "secundario".to_owned(),
        _ => nivel,
    }
}

/// Canonical level name, or `None` when the tag is not a recognized level.
pub fn canonical_level(nivel: &str) -> Option<&'static str> {
    let normalized = normalized_level(nivel);
    LEVELS.iter().copied().find(|level| *level == normalized)
}
