// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Resource routes: create, list and retrieve for each resource.

use crate::db::Database;
use crate::error::{AppError, Result};
use crate::models::{
    is_valid_record_id, Activity, LeaderboardEntry, NewActivity, NewLeaderboardEntry, NewTeam,
    NewUser, NewWorkout, Team, UserResponse, Workout,
};
use crate::routes::extract::FieldBody;
use crate::validation::{invalid_reference, FieldErrors};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use futures_util::{stream, StreamExt};
use serde_json::{json, Value};
use std::sync::Arc;

const MAX_CONCURRENT_LOOKUPS: usize = 16;

type Created<T> = (StatusCode, Json<T>);

/// Resource routes, all under `/api/`.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/", get(api_root))
        .route("/api/users/", get(list_users).post(create_user))
        .route("/api/users/{id}/", get(get_user))
        .route("/api/teams/", get(list_teams).post(create_team))
        .route("/api/teams/{id}/", get(get_team))
        .route("/api/activities/", get(list_activities).post(create_activity))
        .route("/api/activities/{id}/", get(get_activity))
        .route("/api/leaderboard/", get(list_leaderboard).post(create_leaderboard_entry))
        .route("/api/leaderboard/{id}/", get(get_leaderboard_entry))
        .route("/api/workouts/", get(list_workouts).post(create_workout))
        .route("/api/workouts/{id}/", get(get_workout))
}

/// Index of the resource collections.
async fn api_root() -> Json<Value> {
    Json(json!({
        "users": "/api/users/",
        "teams": "/api/teams/",
        "activities": "/api/activities/",
        "leaderboard": "/api/leaderboard/",
        "workouts": "/api/workouts/",
    }))
}

// ─── Helpers ─────────────────────────────────────────────────

/// Reject ids that cannot name a record before touching the database.
fn check_record_id(kind: &str, id: &str) -> Result<()> {
    if is_valid_record_id(id) {
        Ok(())
    } else {
        Err(AppError::NotFound(format!("{} {} not found", kind, id)))
    }
}

/// Fail with a field error unless `id` names an existing user.
async fn require_user(db: &Database, field: &str, id: &str) -> Result<()> {
    if is_valid_record_id(id) && db.user_exists(id).await? {
        Ok(())
    } else {
        Err(FieldErrors::single(field, invalid_reference(id)).into())
    }
}

/// Run CPU-heavy record construction (password hashing) off the async workers.
async fn build_record<T, F>(build: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> anyhow::Result<T> + Send + 'static,
{
    let record = tokio::task::spawn_blocking(build)
        .await
        .map_err(|e| AppError::Internal(e.into()))??;
    Ok(record)
}

// ─── Users ───────────────────────────────────────────────────

async fn create_user(
    State(state): State<Arc<AppState>>,
    FieldBody(body): FieldBody,
) -> Result<Created<UserResponse>> {
    let new_user = NewUser::from_fields(&body)?;
    let user = build_record(move || new_user.into_record()).await?;

    state.db.create_user(&user).await?;
    tracing::info!(user_id = %user.id, username = %user.username, "User created");

    Ok((StatusCode::CREATED, Json(user.into())))
}

async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<UserResponse>>> {
    let users = state.db.list_users().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>> {
    check_record_id("User", &id)?;
    let user = state
        .db
        .get_user(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))?;
    Ok(Json(user.into()))
}

// ─── Teams ───────────────────────────────────────────────────

async fn create_team(
    State(state): State<Arc<AppState>>,
    FieldBody(body): FieldBody,
) -> Result<Created<Team>> {
    let new_team = NewTeam::from_fields(&body)?;

    // Check members concurrently, keeping request order for error messages.
    let db = &state.db;
    let lookups: Vec<(String, bool)> = stream::iter(new_team.members.iter().cloned())
        .map(|id| async move {
            let exists = is_valid_record_id(&id) && db.user_exists(&id).await?;
            Ok::<_, AppError>((id, exists))
        })
        .buffered(MAX_CONCURRENT_LOOKUPS)
        .collect::<Vec<Result<(String, bool)>>>()
        .await
        .into_iter()
        .collect::<Result<Vec<_>>>()?;

    let mut errors = FieldErrors::new();
    for (id, _) in lookups.iter().filter(|(_, exists)| !exists) {
        errors.add("members", invalid_reference(id));
    }
    if !errors.is_empty() {
        return Err(errors.into());
    }

    let team = new_team.into_record()?;
    state.db.create_team(&team).await?;
    tracing::info!(
        team_id = %team.id,
        members = team.members.len(),
        "Team created"
    );

    Ok((StatusCode::CREATED, Json(team)))
}

async fn list_teams(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Team>>> {
    Ok(Json(state.db.list_teams().await?))
}

async fn get_team(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Team>> {
    check_record_id("Team", &id)?;
    let team = state
        .db
        .get_team(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Team {} not found", id)))?;
    Ok(Json(team))
}

// ─── Activities ──────────────────────────────────────────────

async fn create_activity(
    State(state): State<Arc<AppState>>,
    FieldBody(body): FieldBody,
) -> Result<Created<Activity>> {
    let new_activity = NewActivity::from_fields(&body)?;
    require_user(&state.db, "user", &new_activity.user).await?;

    let activity = new_activity.into_record()?;
    state.db.create_activity(&activity).await?;
    tracing::info!(
        activity_id = %activity.id,
        user_id = %activity.user,
        activity_type = %activity.activity_type,
        duration = %activity.duration,
        "Activity created"
    );

    Ok((StatusCode::CREATED, Json(activity)))
}

async fn list_activities(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Activity>>> {
    Ok(Json(state.db.list_activities().await?))
}

async fn get_activity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Activity>> {
    check_record_id("Activity", &id)?;
    let activity = state
        .db
        .get_activity(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Activity {} not found", id)))?;
    Ok(Json(activity))
}

// ─── Leaderboard ─────────────────────────────────────────────

async fn create_leaderboard_entry(
    State(state): State<Arc<AppState>>,
    FieldBody(body): FieldBody,
) -> Result<Created<LeaderboardEntry>> {
    let new_entry = NewLeaderboardEntry::from_fields(&body)?;
    require_user(&state.db, "user", &new_entry.user).await?;

    let entry = new_entry.into_record()?;
    state.db.create_leaderboard_entry(&entry).await?;
    tracing::info!(
        entry_id = %entry.id,
        user_id = %entry.user,
        score = entry.score,
        "Leaderboard entry created"
    );

    Ok((StatusCode::CREATED, Json(entry)))
}

async fn list_leaderboard(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<LeaderboardEntry>>> {
    Ok(Json(state.db.list_leaderboard().await?))
}

async fn get_leaderboard_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<LeaderboardEntry>> {
    check_record_id("Leaderboard entry", &id)?;
    let entry = state
        .db
        .get_leaderboard_entry(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Leaderboard entry {} not found", id)))?;
    Ok(Json(entry))
}

// ─── Workouts ────────────────────────────────────────────────

async fn create_workout(
    State(state): State<Arc<AppState>>,
    FieldBody(body): FieldBody,
) -> Result<Created<Workout>> {
    let new_workout = NewWorkout::from_fields(&body)?;

    let workout = new_workout.into_record()?;
    state.db.create_workout(&workout).await?;
    tracing::info!(workout_id = %workout.id, name = %workout.name, "Workout created");

    Ok((StatusCode::CREATED, Json(workout)))
}

async fn list_workouts(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Workout>>> {
    Ok(Json(state.db.list_workouts().await?))
}

async fn get_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Workout>> {
    check_record_id("Workout", &id)?;
    let workout = state
        .db
        .get_workout(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Workout {} not found", id)))?;
    Ok(Json(workout))
}
