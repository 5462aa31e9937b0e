// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! OctoFit Tracker: fitness tracking API
//!
//! This crate provides the backend REST API for users, teams, activities,
//! leaderboard entries and workouts.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod password;
pub mod routes;
pub mod validation;

use config::Config;
use db::Database;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Database,
}
