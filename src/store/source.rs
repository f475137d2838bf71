use std::path::{Path, PathBuf};

use crate::names;

use super::Store;

/// On-disk layout a (materia, nivel) query resolved to. Deployments have
/// shipped with all three layouts over time, so lookup tries them in order:
/// per-subject file, then the per-level directory tree, then the combined
/// document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuestionSource {
    /// `data/quiz/<materia>.json`
    PerSubjectFile(PathBuf),
    /// `data/quiz/<nivel>/<materia>.json`
    PerLevelPerSubjectFile(PathBuf),
    /// `data/quiz.json`
    SingleFile(PathBuf),
}

impl QuestionSource {
    pub fn path(&self) -> &Path {
        match self {
            Self::PerSubjectFile(path)
            | Self::PerLevelPerSubjectFile(path)
            | Self::SingleFile(path) => path,
        }
    }

    /// The combined document holds every subject, so its records still need
    /// in-memory filtering after loading.
    pub fn needs_filtering(&self) -> bool {
        matches!(self, Self::SingleFile(_))
    }
}

impl Store {
    pub async fn resolve_source(&self, materia: &str, nivel: Option<&str>) -> QuestionSource {
        let materia = materia.to_lowercase();
        let quiz_dir = self.path(names::QUIZ_DIR);

        // Subject names become file names; anything path-like can only match
        // the combined document.
        if materia.contains(['/', '\\']) || materia.contains("..") {
            return QuestionSource::SingleFile(self.path(names::QUIZ_FILE));
        }

        let per_subject = quiz_dir.join(format!("{materia}.json"));
        if file_exists(&per_subject).await {
            return QuestionSource::PerSubjectFile(per_subject);
        }

        if let Some(level) = nivel.and_then(names::canonical_level) {
            let nested = quiz_dir.join(level).join(format!("{materia}.json"));
            if file_exists(&nested).await {
                return QuestionSource::PerLevelPerSubjectFile(nested);
            }
        }

        QuestionSource::SingleFile(self.path(names::QUIZ_FILE))
    }
}

pub(super) async fn file_exists(path: &Path) -> bool {
    tokio::fs::try_exists(path).await.unwrap_or(false)
}
