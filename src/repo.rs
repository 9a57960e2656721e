//! Typed collection access over a [`DocumentStore`].
//!
//! Every mutation is a whole-document write; reference-list edits happen on
//! the loaded entity before a single `save`.

use std::marker::PhantomData;

use serde::{Serialize, de::DeserializeOwned};

use crate::errors::AppError;
use crate::keys::KeyContext;
use crate::store::DocumentStore;

/// Implemented by the stored entity types.
pub trait Entity: Serialize + DeserializeOwned + Send + Sync {
    const COLLECTION: &'static str;

    fn id(&self) -> &str;
}

pub struct Collection<S, T> {
    store: S,
    keys: KeyContext,
    _marker: PhantomData<fn() -> T>,
}

impl<S: Clone, T> Clone for Collection<S, T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            keys: self.keys.clone(),
            _marker: PhantomData,
        }
    }
}

impl<S, T> Collection<S, T>
where
    S: DocumentStore,
    T: Entity,
{
    pub fn new(store: S, prefix: impl Into<String>) -> Self {
        Self {
            store,
            keys: KeyContext::new(prefix),
            _marker: PhantomData,
        }
    }

    fn key(&self, entity_id: &str) -> String {
        self.keys.entity(T::COLLECTION, entity_id)
    }

    pub async fn get(&self, entity_id: &str) -> Result<Option<T>, AppError> {
        match self.store.get(&self.key(entity_id)).await? {
            Some(body) => Ok(Some(decode(&body)?)),
            None => Ok(None),
        }
    }

    /// Whole-document write; creates or replaces.
    pub async fn save(&self, entity: &T) -> Result<(), AppError> {
        self.store.put(&self.key(entity.id()), encode(entity)?).await
    }

    /// Delete and return the previous document, if any.
    pub async fn remove(&self, entity_id: &str) -> Result<Option<T>, AppError> {
        let existing = self.get(entity_id).await?;
        if existing.is_some() {
            self.store.remove(&self.key(entity_id)).await?;
        }
        Ok(existing)
    }

    pub async fn delete(&self, entity_id: &str) -> Result<bool, AppError> {
        self.store.remove(&self.key(entity_id)).await
    }

    pub async fn list(&self) -> Result<Vec<T>, AppError> {
        let bodies = self.store.list(&self.keys.collection_pattern(T::COLLECTION)).await?;
        bodies.iter().map(|body| decode(body)).collect()
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, AppError> {
    serde_json::from_str(body).map_err(|err| AppError::Store {
        message: format!("failed to deserialize document: {err}"),
    })
}

fn encode<T: Serialize>(entity: &T) -> Result<String, AppError> {
    serde_json::to_string(entity).map_err(|err| AppError::Store {
        message: format!("failed to serialize document: {err}"),
    })
}
