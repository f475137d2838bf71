use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Assigned by the store on append; empty in creation payloads.
    #[serde(default)]
    pub id: String,
    pub pergunta: String,
    /// Choice label (A-D) to choice text.
    pub opcoes: BTreeMap<String, String>,
    /// Always present on disk; cleared by redaction before serving, in which
    /// case it is omitted from the serialized question.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub resposta_correta: String,
    pub materia: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nivel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explicacao: Option<String>,
}

/// One on-disk question collection: `{ "perguntas": [...] }`.
#[derive(Default, Serialize, Deserialize)]
pub struct QuestionDocument {
    #[serde(default)]
    pub perguntas: Vec<Question>,
}
