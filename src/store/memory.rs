use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::errors::AppError;
use crate::store::DocumentStore;

/// In-process document store over a shared map.
///
/// Used by the test suite and for running the API without a Redis instance.
/// Only the trailing-star glob produced by `KeyContext::collection_pattern`
/// is supported.
#[derive(Clone, Default)]
pub struct MemoryStore {
    docs: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        self.docs.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of stored documents across all collections.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl DocumentStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.lock().get(key).cloned())
    }

    async fn put(&self, key: &str, body: String) -> Result<(), AppError> {
        self.lock().insert(key.to_string(), body);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<bool, AppError> {
        Ok(self.lock().remove(key).is_some())
    }

    async fn list(&self, pattern: &str) -> Result<Vec<String>, AppError> {
        let docs = self.lock();
        let bodies = match pattern.strip_suffix('*') {
            Some(prefix) => docs
                .iter()
                .filter(|(key, _)| key.starts_with(prefix))
                .map(|(_, body)| body.clone())
                .collect(),
            None => docs.get(pattern).cloned().into_iter().collect(),
        };
        Ok(bodies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_get_remove_roundtrip() {
        let store = MemoryStore::new();
        store.put("t:users:a", String::from("{}")).await.unwrap();
        assert_eq!(store.get("t:users:a").await.unwrap().as_deref(), Some("{}"));
        assert!(store.remove("t:users:a").await.unwrap());
        assert!(!store.remove("t:users:a").await.unwrap());
        assert!(store.get("t:users:a").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_matches_collection_prefix_only() {
        let store = MemoryStore::new();
        store.put("t:users:a", String::from("1")).await.unwrap();
        store.put("t:users:b", String::from("2")).await.unwrap();
        store.put("t:thoughts:c", String::from("3")).await.unwrap();

        let users = store.list("t:users:*").await.unwrap();
        assert_eq!(users.len(), 2);
        assert!(!users.contains(&String::from("3")));
    }
}
