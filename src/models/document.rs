use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Filename used when a save request does not name the document.
pub const DEFAULT_BOL_FILENAME: &str = "Bill_of_Lading.html";

/// A generated Bill of Lading as persisted by the store. Never modified after
/// creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredDocument {
    pub filename: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl StoredDocument {
    pub fn new(filename: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

/// Listing entry for a stored document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DocumentSummary {
    pub name: String,
    pub created: DateTime<Utc>,
    /// Content length in bytes
    pub size: usize,
}

impl From<&StoredDocument> for DocumentSummary {
    fn from(document: &StoredDocument) -> Self {
        Self {
            name: document.filename.clone(),
            created: document.created_at,
            size: document.content.len(),
        }
    }
}
