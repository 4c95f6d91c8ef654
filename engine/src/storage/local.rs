//! Local JSON-file store backends
//!
//! The on-device backend: one pretty-printed JSON file per draft key and
//! per user document under a configured directory. Directories are created
//! on first write, so a fresh install needs no setup step.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;
use tracing::warn;

use super::{DraftStore, UserDocument, UserDocumentPatch, UserDocumentStore};

/// Draft store writing `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct LocalDraftStore {
    dir: PathBuf,
}

impl LocalDraftStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl DraftStore for LocalDraftStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        read_optional(&self.path_for(key)).await
    }

    async fn put(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("creating draft dir {}", self.dir.display()))?;
        let path = self.path_for(key);
        fs::write(&path, value)
            .await
            .with_context(|| format!("writing draft {}", path.display()))?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("removing draft {}", path.display())),
        }
    }
}

/// Document store writing `<dir>/users/<user_id>.json`
#[derive(Debug, Clone)]
pub struct LocalDocumentStore {
    dir: PathBuf,
}

impl LocalDocumentStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into().join("users"),
        }
    }

    fn path_for(&self, user_id: &str) -> PathBuf {
        self.dir.join(format!("{user_id}.json"))
    }
}

#[async_trait]
impl UserDocumentStore for LocalDocumentStore {
    async fn load(&self, user_id: &str) -> Result<Option<UserDocument>> {
        let path = self.path_for(user_id);
        let Some(raw) = read_optional(&path).await? else {
            return Ok(None);
        };
        let doc = serde_json::from_str(&raw)
            .with_context(|| format!("parsing user document {}", path.display()))?;
        Ok(Some(doc))
    }

    async fn merge(&self, user_id: &str, patch: UserDocumentPatch) -> Result<()> {
        let path = self.path_for(user_id);

        // A corrupt base file is replaced rather than wedging every future
        // merge; the same start-fresh policy the read side applies.
        let mut doc = match read_optional(&path).await? {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(user_id, error = %e, "corrupt user document, starting fresh");
                UserDocument::default()
            }),
            None => UserDocument::default(),
        };
        doc.apply(patch);

        fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("creating user dir {}", self.dir.display()))?;
        let raw = serde_json::to_string_pretty(&doc)?;
        fs::write(&path, raw)
            .await
            .with_context(|| format!("writing user document {}", path.display()))?;
        Ok(())
    }
}

async fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path).await {
        Ok(raw) => Ok(Some(raw)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nutritrack_shared::Profile;

    #[test]
    fn test_draft_file_roundtrip() {
        tokio_test::block_on(async {
            let tmp = tempfile::tempdir().unwrap();
            let store = LocalDraftStore::new(tmp.path());

            assert_eq!(store.get("draft").await.unwrap(), None);

            store.put("draft", r#"{"cursor": 3}"#).await.unwrap();
            assert_eq!(
                store.get("draft").await.unwrap().as_deref(),
                Some(r#"{"cursor": 3}"#)
            );
            assert!(tmp.path().join("draft.json").exists());

            store.remove("draft").await.unwrap();
            assert_eq!(store.get("draft").await.unwrap(), None);
            store.remove("draft").await.unwrap();
        });
    }

    #[test]
    fn test_document_merge_persists_across_instances() {
        tokio_test::block_on(async {
            let tmp = tempfile::tempdir().unwrap();

            let store = LocalDocumentStore::new(tmp.path());
            store
                .merge(
                    "u1",
                    UserDocumentPatch {
                        profile: Some(Profile {
                            first_name: Some("Ada".to_string()),
                            ..Profile::default()
                        }),
                        ..UserDocumentPatch::default()
                    },
                )
                .await
                .unwrap();

            // A new instance over the same directory sees the document
            let reopened = LocalDocumentStore::new(tmp.path());
            let doc = reopened.load("u1").await.unwrap().unwrap();
            assert_eq!(doc.profile.first_name.as_deref(), Some("Ada"));
        });
    }

    #[test]
    fn test_corrupt_document_is_replaced_on_merge() {
        tokio_test::block_on(async {
            let tmp = tempfile::tempdir().unwrap();
            let store = LocalDocumentStore::new(tmp.path());

            let users = tmp.path().join("users");
            fs::create_dir_all(&users).await.unwrap();
            fs::write(users.join("u1.json"), "{broken").await.unwrap();

            store
                .merge("u1", UserDocumentPatch::default())
                .await
                .unwrap();
            let doc = store.load("u1").await.unwrap().unwrap();
            assert_eq!(doc, UserDocument::default());
        });
    }

    #[test]
    fn test_load_surfaces_corrupt_file_as_error() {
        tokio_test::block_on(async {
            let tmp = tempfile::tempdir().unwrap();
            let store = LocalDocumentStore::new(tmp.path());

            let users = tmp.path().join("users");
            fs::create_dir_all(&users).await.unwrap();
            fs::write(users.join("u1.json"), "{broken").await.unwrap();

            assert!(store.load("u1").await.is_err());
        });
    }
}
