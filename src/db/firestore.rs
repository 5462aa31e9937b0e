// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with generic document operations.
//!
//! Each resource lives in its own collection with the record id as
//! document ID. Typed per-resource operations are in [`crate::db::Database`].

use crate::error::AppError;
use serde::{de::DeserializeOwned, Serialize};

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: firestore::FirestoreDb,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self { client })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self { client })
    }

    /// Write a document, replacing any existing document with the same id.
    pub async fn insert<T>(&self, collection: &str, id: &str, doc: &T) -> Result<(), AppError>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
    {
        let _: () = self
            .client
            .fluent()
            .update()
            .in_col(collection)
            .document_id(id)
            .object(doc)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Write a document unless another one already has `value` in `field`.
    ///
    /// This is a lookup followed by a write, not a transaction: two concurrent
    /// requests for the same value can both succeed.
    pub async fn insert_unique<T>(
        &self,
        collection: &str,
        id: &str,
        doc: &T,
        field: &'static str,
        value: &str,
    ) -> Result<bool, AppError>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
    {
        let value = value.to_string();
        let existing: Vec<T> = self
            .client
            .fluent()
            .select()
            .from(collection)
            .filter(move |q| q.for_all([q.field(field).eq(value.clone())]))
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if !existing.is_empty() {
            return Ok(false);
        }

        self.insert(collection, id, doc).await?;
        Ok(true)
    }

    /// Get a document by id.
    pub async fn get<T>(&self, collection: &str, id: &str) -> Result<Option<T>, AppError>
    where
        T: DeserializeOwned + Send,
    {
        self.client
            .fluent()
            .select()
            .by_id_in(collection)
            .obj()
            .one(id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List every document in a collection, in document id order.
    pub async fn list<T>(&self, collection: &str) -> Result<Vec<T>, AppError>
    where
        T: DeserializeOwned + Send,
    {
        self.client
            .fluent()
            .select()
            .from(collection)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Check whether a document exists without decoding it.
    pub async fn exists(&self, collection: &str, id: &str) -> Result<bool, AppError> {
        let doc = self
            .client
            .fluent()
            .select()
            .by_id_in(collection)
            .one(id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(doc.is_some())
    }
}
