// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod leaderboard;
pub mod record_id;
pub mod team;
pub mod user;
pub mod workout;

pub use activity::{Activity, ActivityDuration, NewActivity};
pub use leaderboard::{LeaderboardEntry, NewLeaderboardEntry};
pub use record_id::{is_valid_record_id, new_record_id};
pub use team::{NewTeam, Team};
pub use user::{NewUser, User, UserResponse};
pub use workout::{NewWorkout, Workout};
