use log::info;
use std::path::Path;

use crate::auth::ServiceAccountKey;
use crate::drive::DriveClient;
use crate::error::{PublishError, Result};
use crate::store::{RemoteFile, RemoteStore};

pub const JSON_MIME_TYPE: &str = "application/json";

/// Remote folder plus the name marker identifying files this tool owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishTarget {
    pub folder_id: String,
    pub name_marker: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReport {
    pub deleted: Vec<RemoteFile>,
    pub uploaded: RemoteFile,
}

/// Delete every entry of the target folder matching the marker, then upload
/// `local_path` under its file name.
///
/// Not atomic: deletes run one by one in listed order, and the first failure
/// aborts the step with earlier deletes already applied and nothing uploaded.
pub async fn replace_and_upload<S>(
    store: &S,
    target: &PublishTarget,
    local_path: &Path,
) -> Result<PublishReport>
where
    S: RemoteStore + ?Sized,
{
    let name = local_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| PublishError::Io {
            path: local_path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name"),
        })?;
    let content = tokio::fs::read(local_path)
        .await
        .map_err(|source| PublishError::Io {
            path: local_path.to_path_buf(),
            source,
        })?;

    let existing = store.list(&target.folder_id, &target.name_marker).await?;
    info!(
        "Found {} existing file(s) matching '{}'",
        existing.len(),
        target.name_marker
    );

    let mut deleted = Vec::with_capacity(existing.len());
    for file in existing {
        store.delete(&file.id).await?;
        info!("Deleted {} ({})", file.name, file.id);
        deleted.push(file);
    }

    let uploaded = store
        .upload(&target.folder_id, &name, content, JSON_MIME_TYPE)
        .await?;
    info!("Uploaded {} ({})", uploaded.name, uploaded.id);

    Ok(PublishReport { deleted, uploaded })
}

/// Authenticate with the credential blob and replace-then-upload on Google Drive.
pub async fn publish_to_drive(
    credentials_json: &str,
    target: &PublishTarget,
    local_path: &Path,
) -> Result<PublishReport> {
    let key = ServiceAccountKey::from_json(credentials_json)?;
    info!("Authenticating as {}", key.client_email);
    let client = DriveClient::connect(key).await?;
    replace_and_upload(&client, target, local_path).await
}
