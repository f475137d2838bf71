use color_eyre::{eyre::eyre, Result};
use serde_json::Value;

use crate::{names, utils};

use super::Store;

// Ebooks and banners are opaque passthrough records; the store only assigns
// ids on append and never interprets the rest.
impl Store {
    pub async fn ebooks(&self) -> Vec<Value> {
        self.read_json_or_default(&self.path(names::EBOOKS_FILE)).await
    }

    pub async fn banners(&self) -> Vec<Value> {
        self.read_json_or_default(&self.path(names::BANNERS_FILE)).await
    }

    pub async fn append_ebook(&self, mut ebook: Value) -> Result<Value> {
        let record = ebook
            .as_object_mut()
            .ok_or_else(|| eyre!("ebook must be a JSON object"))?;
        record.insert("id".to_owned(), Value::String(utils::timestamp_id()));

        let path = self.path(names::EBOOKS_FILE);
        let mut ebooks: Vec<Value> = self.read_json_or_default(&path).await;
        ebooks.push(ebook.clone());
        self.write_json(&path, &ebooks).await?;

        tracing::info!("appended ebook to {}", path.display());
        Ok(ebook)
    }
}
