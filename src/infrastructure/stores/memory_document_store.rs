//! In-process document store
//!
//! Holds collections in memory, preserving insertion order. Besides serving
//! as an embedded backend, it records call counts and can inject failures
//! so tests can assert how the accessor talks to the store.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::document::{Document, DocumentStore, Fields};
use crate::domain::errors::StoreError;

/// Number of calls made to each store operation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub get_all: usize,
    pub get: usize,
    pub set: usize,
    pub update: usize,
    pub add: usize,
    pub delete: usize,
}

impl CallCounts {
    pub fn total(&self) -> usize {
        self.get_all + self.get + self.set + self.update + self.add + self.delete
    }
}

#[derive(Debug, Clone)]
enum Failure {
    /// Consumed by the next call
    Once(StoreError),
    /// Returned by every call until cleared
    Always(StoreError),
}

/// In-memory implementation of `DocumentStore`
///
/// # Example
/// ```
/// use team_registry::domain::document::DocumentStore;
/// use team_registry::domain::errors::StoreError;
/// use team_registry::infrastructure::stores::MemoryDocumentStore;
///
/// #[tokio::main]
/// async fn main() {
///     let store = MemoryDocumentStore::new();
///     store.fail_next(StoreError::Unavailable("offline".into())).await;
///
///     assert!(store.get_all("futboll").await.is_err());
///     assert!(store.get_all("futboll").await.is_ok());
/// }
/// ```
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: Mutex<HashMap<String, Vec<Document>>>,
    failure: Mutex<Option<Failure>>,
    call_counts: Mutex<CallCounts>,
    latency: Option<Duration>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a document into a collection
    pub fn with_document(mut self, collection: &str, doc: Document) -> Self {
        self.collections
            .get_mut()
            .entry(collection.to_string())
            .or_default()
            .push(doc);
        self
    }

    /// Delays every call by `latency` before it touches the data
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Makes the next call fail with `err`
    pub async fn fail_next(&self, err: StoreError) {
        *self.failure.lock().await = Some(Failure::Once(err));
    }

    /// Makes every call fail with `err` until `clear_failure` is called
    pub async fn fail_always(&self, err: StoreError) {
        *self.failure.lock().await = Some(Failure::Always(err));
    }

    pub async fn clear_failure(&self) {
        *self.failure.lock().await = None;
    }

    pub async fn call_counts(&self) -> CallCounts {
        *self.call_counts.lock().await
    }

    /// Number of documents currently stored in a collection
    pub async fn len(&self, collection: &str) -> usize {
        self.collections
            .lock()
            .await
            .get(collection)
            .map_or(0, Vec::len)
    }

    pub async fn is_empty(&self, collection: &str) -> bool {
        self.len(collection).await == 0
    }

    /// Records the call, waits out any configured latency and reports an
    /// injected failure if one is pending
    async fn enter(&self, count: impl FnOnce(&mut CallCounts)) -> Result<(), StoreError> {
        count(&mut *self.call_counts.lock().await);

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let mut failure = self.failure.lock().await;
        match failure.take() {
            None => Ok(()),
            Some(Failure::Once(err)) => Err(err),
            Some(Failure::Always(err)) => {
                *failure = Some(Failure::Always(err.clone()));
                Err(err)
            }
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get_all(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        self.enter(|c| c.get_all += 1).await?;

        let collections = self.collections.lock().await;
        Ok(collections.get(collection).cloned().unwrap_or_default())
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        self.enter(|c| c.get += 1).await?;

        let collections = self.collections.lock().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id))
            .cloned())
    }

    async fn set(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        self.enter(|c| c.set += 1).await?;

        let mut collections = self.collections.lock().await;
        let docs = collections.entry(collection.to_string()).or_default();
        match docs.iter_mut().find(|d| d.id == id) {
            Some(existing) => existing.fields = fields,
            None => docs.push(Document::new(id, fields)),
        }
        Ok(())
    }

    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        self.enter(|c| c.update += 1).await?;

        let mut collections = self.collections.lock().await;
        let existing = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| d.id == id))
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;

        existing.fields.extend(fields);
        Ok(())
    }

    async fn add(&self, collection: &str, fields: Fields) -> Result<String, StoreError> {
        self.enter(|c| c.add += 1).await?;

        let id = Uuid::new_v4().simple().to_string();
        let mut collections = self.collections.lock().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(Document::new(id.clone(), fields));
        Ok(id)
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        self.enter(|c| c.delete += 1).await?;

        let mut collections = self.collections.lock().await;
        if let Some(docs) = collections.get_mut(collection) {
            docs.retain(|d| d.id != id);
        }
        Ok(())
    }
}
