//! In-memory store backends
//!
//! Used by tests and by hosts that run without a device store (web
//! previews, demos). State lives for the process lifetime only.

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{DraftStore, UserDocument, UserDocumentPatch, UserDocumentStore};

/// In-memory key-value draft store
#[derive(Debug, Default)]
pub struct MemoryDraftStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DraftStore for MemoryDraftStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

/// In-memory per-user document store
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    documents: RwLock<HashMap<String, UserDocument>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot a document without going through the trait, for assertions
    pub async fn snapshot(&self, user_id: &str) -> Option<UserDocument> {
        self.documents.read().await.get(user_id).cloned()
    }
}

#[async_trait]
impl UserDocumentStore for MemoryDocumentStore {
    async fn load(&self, user_id: &str) -> Result<Option<UserDocument>> {
        Ok(self.documents.read().await.get(user_id).cloned())
    }

    async fn merge(&self, user_id: &str, patch: UserDocumentPatch) -> Result<()> {
        let mut documents = self.documents.write().await;
        documents
            .entry(user_id.to_string())
            .or_default()
            .apply(patch);
        Ok(())
    }
}
