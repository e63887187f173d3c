use almanac_publish::{
    replace_and_upload, PublishError, PublishTarget, RemoteFile, RemoteStore, Result,
};
use async_trait::async_trait;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    List(String, String),
    Delete(String),
    Upload(String, String, usize),
}

#[derive(Default)]
struct MemoryStore {
    files: Mutex<Vec<(String, RemoteFile)>>,
    calls: Mutex<Vec<Call>>,
    fail_delete: Option<String>,
}

impl MemoryStore {
    fn with_files(files: &[(&str, &str, &str)]) -> Self {
        let files = files
            .iter()
            .map(|(folder, id, name)| {
                (
                    folder.to_string(),
                    RemoteFile {
                        id: id.to_string(),
                        name: name.to_string(),
                    },
                )
            })
            .collect();
        Self {
            files: Mutex::new(files),
            ..Default::default()
        }
    }

    fn names(&self) -> Vec<String> {
        self.files
            .lock()
            .unwrap()
            .iter()
            .map(|(_, f)| f.name.clone())
            .collect()
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteStore for MemoryStore {
    async fn list(&self, folder_id: &str, name_contains: &str) -> Result<Vec<RemoteFile>> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::List(folder_id.to_string(), name_contains.to_string()));
        Ok(self
            .files
            .lock()
            .unwrap()
            .iter()
            .filter(|(folder, f)| folder == folder_id && f.name.contains(name_contains))
            .map(|(_, f)| f.clone())
            .collect())
    }

    async fn delete(&self, file_id: &str) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Delete(file_id.to_string()));
        if self.fail_delete.as_deref() == Some(file_id) {
            return Err(PublishError::Api {
                status: 403,
                message: "insufficient permissions".to_string(),
            });
        }
        self.files.lock().unwrap().retain(|(_, f)| f.id != file_id);
        Ok(())
    }

    async fn upload(
        &self,
        folder_id: &str,
        name: &str,
        content: Vec<u8>,
        _mime_type: &str,
    ) -> Result<RemoteFile> {
        self.calls.lock().unwrap().push(Call::Upload(
            folder_id.to_string(),
            name.to_string(),
            content.len(),
        ));
        let file = RemoteFile {
            id: format!("new-{name}"),
            name: name.to_string(),
        };
        self.files
            .lock()
            .unwrap()
            .push((folder_id.to_string(), file.clone()));
        Ok(file)
    }
}

fn target() -> PublishTarget {
    PublishTarget {
        folder_id: "folder-1".to_string(),
        name_marker: "transit_".to_string(),
    }
}

fn local_file(dir: &tempfile::TempDir, name: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, "[]").unwrap();
    path
}

#[tokio::test]
async fn test_replaces_matching_files_only() {
    let store = MemoryStore::with_files(&[
        ("folder-1", "a", "transit_20240101.json"),
        ("folder-1", "b", "notes.txt"),
        ("folder-1", "c", "transit_20240108.json"),
        ("folder-2", "d", "transit_20240101.json"),
    ]);
    let dir = tempfile::tempdir().unwrap();
    let path = local_file(&dir, "transit_20240115.json");

    let report = replace_and_upload(&store, &target(), &path).await.unwrap();

    let deleted: Vec<_> = report.deleted.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(deleted, vec!["a", "c"]);
    assert_eq!(report.uploaded.name, "transit_20240115.json");
    assert_eq!(
        store.names(),
        vec!["notes.txt", "transit_20240101.json", "transit_20240115.json"]
    );
    assert_eq!(
        store.calls(),
        vec![
            Call::List("folder-1".to_string(), "transit_".to_string()),
            Call::Delete("a".to_string()),
            Call::Delete("c".to_string()),
            Call::Upload("folder-1".to_string(), "transit_20240115.json".to_string(), 2),
        ]
    );
}

#[tokio::test]
async fn test_empty_folder_just_uploads() {
    let store = MemoryStore::default();
    let dir = tempfile::tempdir().unwrap();
    let path = local_file(&dir, "transit_20240115.json");

    let report = replace_and_upload(&store, &target(), &path).await.unwrap();

    assert!(report.deleted.is_empty());
    assert_eq!(store.calls().len(), 2);
}

#[tokio::test]
async fn test_delete_failure_aborts_before_upload() {
    let mut store = MemoryStore::with_files(&[
        ("folder-1", "a", "transit_1.json"),
        ("folder-1", "b", "transit_2.json"),
        ("folder-1", "c", "transit_3.json"),
    ]);
    store.fail_delete = Some("b".to_string());
    let dir = tempfile::tempdir().unwrap();
    let path = local_file(&dir, "transit_4.json");

    let err = replace_and_upload(&store, &target(), &path).await.unwrap_err();

    assert!(matches!(err, PublishError::Api { status: 403, .. }));
    // the first delete stays applied, nothing is uploaded
    assert_eq!(store.names(), vec!["transit_2.json", "transit_3.json"]);
    assert!(!store
        .calls()
        .iter()
        .any(|c| matches!(c, Call::Upload(..))));
    // the local file is untouched
    assert!(path.exists());
}

#[tokio::test]
async fn test_missing_local_file_makes_no_remote_calls() {
    let store = MemoryStore::default();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("transit_missing.json");

    let err = replace_and_upload(&store, &target(), &path).await.unwrap_err();

    assert!(matches!(err, PublishError::Io { .. }));
    assert!(store.calls().is_empty());
}
