use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::TOPIC_CONTENT_PREVIEW_CHARS;
use crate::models::Document;

/// The kind of knowledge-graph record a document or result refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Entity,
    Relation,
    Topic,
}

impl RecordKind {
    /// All kinds, in the order they are searched.
    pub const ALL: [RecordKind; 3] = [RecordKind::Entity, RecordKind::Relation, RecordKind::Topic];

    /// Stable name used in cache keys and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Entity => "entity",
            RecordKind::Relation => "relation",
            RecordKind::Topic => "topic",
        }
    }
}

/// A knowledge-graph record as the repository collaborator hands it to the
/// engine: identifying info, pre-assembled searchable text, and the
/// timestamps the date filters evaluate against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphRecord {
    pub id: String,
    pub kind: RecordKind,
    pub searchable_text: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl GraphRecord {
    /// Assemble an entity record. Name, aliases, and flattened metadata all
    /// contribute to the searchable text.
    pub fn entity(
        id: impl Into<String>,
        name: &str,
        aliases: &[String],
        metadata: Option<&serde_json::Value>,
    ) -> Self {
        let mut parts: Vec<&str> = Vec::new();
        if !name.is_empty() {
            parts.push(name);
        }
        for alias in aliases {
            parts.push(alias);
        }
        let metadata_text = metadata.map(flatten_json).unwrap_or_default();
        if !metadata_text.is_empty() {
            parts.push(&metadata_text);
        }
        Self {
            id: id.into(),
            kind: RecordKind::Entity,
            searchable_text: parts.join(" ").trim().to_string(),
            created_at: None,
            updated_at: None,
        }
    }

    /// Assemble a relation record from its type label and description.
    pub fn relation(id: impl Into<String>, relation_type: &str, description: &str) -> Self {
        let mut parts: Vec<&str> = Vec::new();
        if !relation_type.is_empty() {
            parts.push(relation_type);
        }
        if !description.is_empty() {
            parts.push(description);
        }
        Self {
            id: id.into(),
            kind: RecordKind::Relation,
            searchable_text: parts.join(" ").trim().to_string(),
            created_at: None,
            updated_at: None,
        }
    }

    /// Assemble a topic record. The title is repeated three times and each
    /// keyword twice so they dominate term frequency; long content is cut to
    /// a preview.
    pub fn topic(
        id: impl Into<String>,
        title: &str,
        description: &str,
        content: &str,
        keywords: &[String],
        tags: &[String],
    ) -> Self {
        let mut parts: Vec<String> = Vec::new();
        if !title.is_empty() {
            for _ in 0..3 {
                parts.push(title.to_string());
            }
        }
        if !description.is_empty() {
            parts.push(description.to_string());
        }
        if !content.is_empty() {
            parts.push(content.chars().take(TOPIC_CONTENT_PREVIEW_CHARS).collect());
        }
        for keyword in keywords {
            parts.push(keyword.clone());
            parts.push(keyword.clone());
        }
        for tag in tags {
            parts.push(tag.clone());
        }
        Self {
            id: id.into(),
            kind: RecordKind::Topic,
            searchable_text: parts.join(" ").trim().to_string(),
            created_at: None,
            updated_at: None,
        }
    }

    /// Attach creation/update timestamps for date filtering.
    pub fn with_timestamps(
        mut self,
        created_at: Option<DateTime<Utc>>,
        updated_at: Option<DateTime<Utc>>,
    ) -> Self {
        self.created_at = created_at;
        self.updated_at = updated_at;
        self
    }

    /// View of this record as an indexable document.
    pub fn to_document(&self) -> Document {
        Document::new(self.id.clone(), self.searchable_text.clone())
    }
}

/// Flatten a JSON value into space-separated scalar text for indexing.
fn flatten_json(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(items) => items
            .iter()
            .map(flatten_json)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" "),
        serde_json::Value::Object(map) => map
            .values()
            .map(flatten_json)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" "),
        serde_json::Value::Null => String::new(),
    }
}
