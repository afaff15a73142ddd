use serde::{Deserialize, Serialize};

const DOCUMENTS: &str = include_str!("../data/matter_documents.json");
const QUESTIONS: &str = include_str!("../data/sample_questions.json");

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSection {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MatterDocument {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub doc_type: String,
    pub date_uploaded: String,
    pub sections: Vec<DocumentSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SampleQuestion {
    pub question: String,
    /// Titles of the documents a good answer should cite.
    pub expected_documents: Vec<String>,
}

/// The documents of one matter plus suggested questions.
#[derive(Debug, Clone, Default)]
pub struct MatterLibrary {
    documents: Vec<MatterDocument>,
    questions: Vec<SampleQuestion>,
}

impl MatterLibrary {
    /// The bundled sample transaction.
    pub fn builtin() -> serde_json::Result<Self> {
        Ok(Self { documents: serde_json::from_str(DOCUMENTS)?, questions: serde_json::from_str(QUESTIONS)? })
    }

    pub fn new(documents: Vec<MatterDocument>, questions: Vec<SampleQuestion>) -> Self {
        Self { documents, questions }
    }

    pub fn documents(&self) -> &[MatterDocument] {
        &self.documents
    }

    pub fn sample_questions(&self) -> &[SampleQuestion] {
        &self.questions
    }

    pub fn document(&self, id: &str) -> Option<&MatterDocument> {
        self.documents.iter().find(|d| d.id == id)
    }
}
