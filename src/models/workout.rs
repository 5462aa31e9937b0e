//! Workout model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

use crate::models::record_id::new_record_id;
use crate::validation::{FieldErrors, Fields};

/// A suggested workout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Workout {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// Validated body of `POST /api/workouts/`.
#[derive(Debug, Clone, Validate)]
pub struct NewWorkout {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Ensure this field has between 1 and 100 characters."
    ))]
    pub name: String,
    #[validate(length(
        min = 1,
        max = 2000,
        message = "Ensure this field has between 1 and 2000 characters."
    ))]
    pub description: String,
}

impl NewWorkout {
    pub fn from_fields(body: &Map<String, Value>) -> Result<Self, FieldErrors> {
        let mut fields = Fields::new(body);
        let name = fields.string("name");
        let description = fields.string("description");

        let (Some(name), Some(description)) = (name, description) else {
            return Err(fields.into_errors());
        };
        fields.finish()?;

        let new_workout = Self {
            name: name.trim().to_string(),
            description: description.trim().to_string(),
        };
        new_workout.validate()?;
        Ok(new_workout)
    }

    pub fn into_record(self) -> anyhow::Result<Workout> {
        Ok(Workout {
            id: new_record_id()?,
            name: self.name,
            description: self.description,
        })
    }
}
