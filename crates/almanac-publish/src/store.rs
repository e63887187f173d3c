use async_trait::async_trait;
use serde::Deserialize;

use crate::error::Result;

/// A file entry in the remote folder.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteFile {
    pub id: String,
    pub name: String,
}

/// Folder-oriented remote storage.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Entries in `folder_id` whose name contains `name_contains`.
    async fn list(&self, folder_id: &str, name_contains: &str) -> Result<Vec<RemoteFile>>;

    async fn delete(&self, file_id: &str) -> Result<()>;

    /// Create a new entry in `folder_id` and return it.
    async fn upload(
        &self,
        folder_id: &str,
        name: &str,
        content: Vec<u8>,
        mime_type: &str,
    ) -> Result<RemoteFile>;
}
