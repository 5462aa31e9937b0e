//! Leaderboard entry model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

use crate::models::record_id::new_record_id;
use crate::validation::{FieldErrors, Fields};

/// A user's score on the leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LeaderboardEntry {
    pub id: String,
    /// Id of the scoring user
    pub user: String,
    pub score: u32,
}

/// Validated body of `POST /api/leaderboard/`.
#[derive(Debug, Clone, Validate)]
pub struct NewLeaderboardEntry {
    pub user: String,
    #[validate(range(
        min = 0,
        max = 2147483647,
        message = "Ensure this value is between 0 and 2147483647."
    ))]
    pub score: i64,
}

impl NewLeaderboardEntry {
    pub fn from_fields(body: &Map<String, Value>) -> Result<Self, FieldErrors> {
        let mut fields = Fields::new(body);
        let user = fields.string("user");
        let score = fields.integer("score");

        let (Some(user), Some(score)) = (user, score) else {
            return Err(fields.into_errors());
        };
        fields.finish()?;

        let entry = Self { user, score };
        entry.validate()?;
        Ok(entry)
    }

    pub fn into_record(self) -> anyhow::Result<LeaderboardEntry> {
        Ok(LeaderboardEntry {
            id: new_record_id()?,
            user: self.user,
            score: u32::try_from(self.score)?,
        })
    }
}
