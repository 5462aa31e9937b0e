// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Activity model and the duration type it carries.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

use crate::models::record_id::new_record_id;
use crate::validation::{FieldErrors, Fields};

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: u64 = 24 * SECONDS_PER_HOUR;

/// Stored activity record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Activity {
    pub id: String,
    /// Id of the owning user
    pub user: String,
    /// Free-form type (Running, Cycling, ...)
    pub activity_type: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub duration: ActivityDuration,
}

/// Validated body of `POST /api/activities/`.
#[derive(Debug, Clone, Validate)]
pub struct NewActivity {
    pub user: String,
    #[validate(length(
        min = 1,
        max = 100,
        message = "Ensure this field has between 1 and 100 characters."
    ))]
    pub activity_type: String,
    pub duration: ActivityDuration,
}

impl NewActivity {
    pub fn from_fields(body: &Map<String, Value>) -> Result<Self, FieldErrors> {
        let mut fields = Fields::new(body);
        let user = fields.string("user");
        let activity_type = fields.string("activity_type");
        let duration = fields.parse("duration", ActivityDuration::from_json);

        let (Some(user), Some(activity_type), Some(duration)) = (user, activity_type, duration)
        else {
            return Err(fields.into_errors());
        };
        fields.finish()?;

        let new_activity = Self {
            user,
            activity_type: activity_type.trim().to_string(),
            duration,
        };
        new_activity.validate()?;
        Ok(new_activity)
    }

    pub fn into_record(self) -> anyhow::Result<Activity> {
        Ok(Activity {
            id: new_record_id()?,
            user: self.user,
            activity_type: self.activity_type,
            duration: self.duration,
        })
    }
}

// ─── Duration ────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DurationError {
    #[error("Duration has wrong format. Use one of these formats instead: [D ]HH:MM:SS.")]
    Format,

    #[error("Minutes and seconds must be between 0 and 59.")]
    OutOfRange,

    #[error("Hours must be between 0 and 23 when days are given.")]
    HoursWithDays,

    #[error("The number of days must be between 0 and 999999999.")]
    Overflow,
}

/// A non-negative time interval with whole-second precision.
///
/// Written as `HH:MM:SS` with total hours (`"25:00:00"` is one day and one hour).
/// Parsing also accepts a `D HH:MM:SS` day prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ActivityDuration {
    seconds: u64,
}

impl ActivityDuration {
    pub const fn from_secs(seconds: u64) -> Self {
        Self { seconds }
    }

    pub const fn as_secs(&self) -> u64 {
        self.seconds
    }

    /// Parse a duration from a JSON value: a string, or an integer number of seconds.
    pub fn from_json(value: &Value) -> Result<Self, String> {
        match value {
            Value::String(s) => s.parse::<Self>().map_err(|e| e.to_string()),
            Value::Number(n) => n
                .as_u64()
                .map(Self::from_secs)
                .ok_or_else(|| DurationError::Format.to_string()),
            _ => Err(DurationError::Format.to_string()),
        }
    }
}

fn digits(part: &str) -> Result<u64, DurationError> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DurationError::Format);
    }
    part.parse().map_err(|_| DurationError::Overflow)
}

impl FromStr for ActivityDuration {
    type Err = DurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (days, clock) = match s.split_once(' ') {
            Some((days, clock)) => (Some(digits(days)?), clock.trim_start()),
            None => (None, s),
        };

        let mut parts = clock.split(':');
        let (Some(hours), Some(minutes), Some(seconds), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(DurationError::Format);
        };
        let (hours, minutes, seconds) = (digits(hours)?, digits(minutes)?, digits(seconds)?);

        if minutes >= 60 || seconds >= 60 {
            return Err(DurationError::OutOfRange);
        }
        if days.is_some() && hours >= 24 {
            return Err(DurationError::HoursWithDays);
        }

        days.unwrap_or(0)
            .checked_mul(SECONDS_PER_DAY)
            .and_then(|total| total.checked_add(hours.checked_mul(SECONDS_PER_HOUR)?))
            .and_then(|total| total.checked_add(minutes * SECONDS_PER_MINUTE + seconds))
            .map(Self::from_secs)
            .ok_or(DurationError::Overflow)
    }
}

impl fmt::Display for ActivityDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.seconds / SECONDS_PER_HOUR,
            (self.seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE,
            self.seconds % SECONDS_PER_MINUTE
        )
    }
}

impl Serialize for ActivityDuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ActivityDuration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
