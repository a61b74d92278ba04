use crate::errors::ServiceError;
use crate::models::{DocumentSummary, StoredDocument, DEFAULT_BOL_FILENAME};
use crate::store::CatalogStore;
use std::sync::Arc;
use tracing::{info, instrument};

pub const FILE_NOT_FOUND: &str = "File not found";

/// Persistence of rendered Bill of Lading documents.
#[derive(Clone)]
pub struct DocumentService {
    store: Arc<dyn CatalogStore>,
    history_limit: usize,
}

impl DocumentService {
    pub fn new(store: Arc<dyn CatalogStore>, history_limit: usize) -> Self {
        Self {
            store,
            history_limit,
        }
    }

    /// Saves `content` under `filename`, falling back to the default name.
    /// Returns the name used.
    #[instrument(skip(self, content), fields(size = content.len()))]
    pub async fn save(
        &self,
        content: String,
        filename: Option<String>,
    ) -> Result<String, ServiceError> {
        let filename = filename
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_BOL_FILENAME.to_string());

        if filename.contains(['/', '\\']) {
            return Err(ServiceError::ValidationError(format!(
                "Invalid filename: {filename}"
            )));
        }

        self.store
            .save_document(StoredDocument::new(filename.clone(), content))
            .await?;
        info!(%filename, "Bill of Lading saved");
        Ok(filename)
    }

    pub async fn list(&self) -> Result<Vec<DocumentSummary>, ServiceError> {
        self.store.list_documents(self.history_limit).await
    }

    #[instrument(skip(self))]
    pub async fn find(&self, filename: &str) -> Result<StoredDocument, ServiceError> {
        self.store
            .find_document(filename)
            .await?
            .ok_or_else(|| ServiceError::NotFound(FILE_NOT_FOUND.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;
    use assert_matches::assert_matches;

    fn service() -> DocumentService {
        DocumentService::new(Arc::new(InMemoryStore::new(20)), 20)
    }

    #[tokio::test]
    async fn blank_filename_uses_default() {
        let service = service();
        let name = service
            .save("<html></html>".to_string(), Some("  ".to_string()))
            .await
            .unwrap();
        assert_eq!(name, DEFAULT_BOL_FILENAME);
        assert_eq!(service.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn path_like_filenames_are_rejected() {
        let err = service()
            .save("x".to_string(), Some("../etc/passwd".to_string()))
            .await
            .unwrap_err();
        assert_matches!(err, ServiceError::ValidationError(_));
    }

    #[tokio::test]
    async fn missing_document_is_not_found() {
        let err = service().find("nope.html").await.unwrap_err();
        assert_matches!(err, ServiceError::NotFound(msg) if msg == FILE_NOT_FOUND);
    }
}
