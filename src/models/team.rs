// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Team model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

use crate::models::record_id::new_record_id;
use crate::validation::{FieldErrors, Fields};

/// A team and the ids of its member users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Team {
    pub id: String,
    pub name: String,
    /// User ids, without duplicates
    #[serde(default)]
    pub members: Vec<String>,
}

/// Validated body of `POST /api/teams/`.
///
/// Member ids are checked for existence by the handler, which needs the database.
#[derive(Debug, Clone, Validate)]
pub struct NewTeam {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Ensure this field has between 1 and 100 characters."
    ))]
    pub name: String,
    pub members: Vec<String>,
}

impl NewTeam {
    pub fn from_fields(body: &Map<String, Value>) -> Result<Self, FieldErrors> {
        let mut fields = Fields::new(body);
        let name = fields.string("name");
        let members = fields.id_list("members");

        let Some(name) = name else {
            return Err(fields.into_errors());
        };
        fields.finish()?;

        let new_team = Self {
            name: name.trim().to_string(),
            members,
        };
        new_team.validate()?;
        Ok(new_team)
    }

    pub fn into_record(self) -> anyhow::Result<Team> {
        Ok(Team {
            id: new_record_id()?,
            name: self.name,
            members: self.members,
        })
    }
}
