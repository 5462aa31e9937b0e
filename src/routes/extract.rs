// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Request body extraction for create routes.
//!
//! JSON, urlencoded and multipart bodies all become the same field map, so
//! model validation sees one shape regardless of how the client posted.

use crate::error::AppError;
use axum::{
    extract::{FromRequest, Multipart, Request},
    http::header,
    Form, Json,
};
use serde_json::{Map, Value};

/// Form fields that repeat once per value instead of carrying one value.
const LIST_FIELDS: &[&str] = &["members"];

/// Field map decoded from a create request body.
#[derive(Debug)]
pub struct FieldBody(pub Map<String, Value>);

impl<S> FromRequest<S> for FieldBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mime = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(|v| v.trim().to_ascii_lowercase())
            .unwrap_or_default();

        match mime.as_str() {
            "application/json" => {
                let Json(value) = Json::<Value>::from_request(req, state)
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;
                match value {
                    Value::Object(map) => Ok(FieldBody(map)),
                    _ => Err(AppError::BadRequest(
                        "Request body must be a JSON object".to_string(),
                    )),
                }
            }
            "application/x-www-form-urlencoded" => {
                let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;
                Ok(FieldBody(fields_from_pairs(pairs)))
            }
            "multipart/form-data" => {
                let mut multipart = Multipart::from_request(req, state)
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;
                let mut pairs = Vec::new();
                while let Some(field) = multipart
                    .next_field()
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?
                {
                    let Some(name) = field.name().map(str::to_string) else {
                        continue;
                    };
                    let value = field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(e.body_text()))?;
                    pairs.push((name, value));
                }
                Ok(FieldBody(fields_from_pairs(pairs)))
            }
            "" => Err(AppError::UnsupportedMediaType(
                "Request is missing a Content-Type header".to_string(),
            )),
            other => Err(AppError::UnsupportedMediaType(format!(
                "Unsupported media type \"{}\" in request",
                other
            ))),
        }
    }
}

/// Fold form pairs into a field map. List fields collect every value in
/// order; any other repeated key keeps its last value.
fn fields_from_pairs(pairs: Vec<(String, String)>) -> Map<String, Value> {
    let mut map = Map::new();
    for (name, value) in pairs {
        if LIST_FIELDS.contains(&name.as_str()) {
            if let Value::Array(items) = map
                .entry(name)
                .or_insert_with(|| Value::Array(Vec::new()))
            {
                items.push(Value::String(value));
            }
        } else {
            map.insert(name, Value::String(value));
        }
    }
    map
}
