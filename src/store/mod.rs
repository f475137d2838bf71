// Storage layer - flat JSON documents under the data directory

use std::path::{Path, PathBuf};
use std::sync::Arc;

use color_eyre::Result;
use serde::{de::DeserializeOwned, Serialize};

mod content;
mod questions;
mod source;

pub use questions::validate_question;
pub use source::QuestionSource;

/// Handle on the data directory. The filesystem is the sole source of truth;
/// every request re-reads from disk.
#[derive(Clone)]
pub struct Store {
    root: Arc<PathBuf>,
}

impl Store {
    pub async fn new(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let root = data_dir.into();
        tokio::fs::create_dir_all(&root).await?;

        tracing::info!("data directory ready at {}", root.display());

        Ok(Self {
            root: Arc::new(root),
        })
    }

    pub(crate) fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Missing or malformed documents read as the default value. The data set
    /// is hand-edited often enough that a bad file must not take the API down.
    pub(crate) async fn read_json_or_default<T: DeserializeOwned + Default>(
        &self,
        path: &Path,
    ) -> T {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return T::default(),
            Err(e) => {
                tracing::warn!("could not read {}: {e}", path.display());
                return T::default();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("malformed JSON in {}: {e}", path.display());
                T::default()
            }
        }
    }

    /// Full-document rewrite. Concurrent writers to the same document race
    /// and the last one wins; accepted for this low-traffic service.
    pub(crate) async fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let bytes = serde_json::to_vec_pretty(value)?;
        tokio::fs::write(path, bytes).await?;

        Ok(())
    }
}
