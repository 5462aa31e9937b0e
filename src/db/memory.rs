// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process document store for local development and tests.
//!
//! Documents are kept as JSON values, one ordered map per collection, so
//! listing returns documents in id order like a Firestore query does.

use crate::error::AppError;
use dashmap::DashMap;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

type Collection = BTreeMap<String, Value>;

/// In-memory database; clones share the same data.
#[derive(Clone, Default)]
pub struct MemoryDb {
    collections: Arc<DashMap<String, Collection>>,
}

fn to_document<T: Serialize>(doc: &T) -> Result<Value, AppError> {
    serde_json::to_value(doc).map_err(|e| AppError::Database(e.to_string()))
}

fn from_document<T: DeserializeOwned>(value: Value) -> Result<T, AppError> {
    serde_json::from_value(value).map_err(|e| AppError::Database(e.to_string()))
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a document, replacing any existing document with the same id.
    pub fn insert<T: Serialize>(&self, collection: &str, id: &str, doc: &T) -> Result<(), AppError> {
        let value = to_document(doc)?;
        self.collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), value);
        Ok(())
    }

    /// Store a document unless another one already has the same string in `field`.
    ///
    /// The check and the write happen under the collection's shard lock.
    pub fn insert_unique<T: Serialize>(
        &self,
        collection: &str,
        id: &str,
        doc: &T,
        field: &str,
        value: &str,
    ) -> Result<bool, AppError> {
        let document = to_document(doc)?;
        let mut docs = self.collections.entry(collection.to_string()).or_default();

        let taken = docs
            .values()
            .any(|existing| existing.get(field).and_then(Value::as_str) == Some(value));
        if taken {
            return Ok(false);
        }

        docs.insert(id.to_string(), document);
        Ok(true)
    }

    pub fn get<T: DeserializeOwned>(&self, collection: &str, id: &str) -> Result<Option<T>, AppError> {
        let value = self
            .collections
            .get(collection)
            .and_then(|docs| docs.get(id).cloned());
        value.map(from_document).transpose()
    }

    pub fn list<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>, AppError> {
        let values: Vec<Value> = self
            .collections
            .get(collection)
            .map(|docs| docs.values().cloned().collect())
            .unwrap_or_default();
        values.into_iter().map(from_document).collect()
    }

    pub fn exists(&self, collection: &str, id: &str) -> bool {
        self.collections
            .get(collection)
            .is_some_and(|docs| docs.contains_key(id))
    }
}
