// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use octofit_tracker::config::Config;
use octofit_tracker::db::{Database, FirestoreDb};
use octofit_tracker::models::{
    new_record_id, Activity, ActivityDuration, LeaderboardEntry, NewUser, Team, User, Workout,
};
use octofit_tracker::routes::create_router;
use octofit_tracker::AppState;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a test app backed by an empty in-memory database.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState {
        config: Config::test_default(),
        db: Database::in_memory(),
    });

    (create_router(state.clone()), state)
}

/// Records created before each test, one of every kind.
#[allow(dead_code)]
pub struct Fixtures {
    pub user: User,
    pub team: Team,
    pub activity: Activity,
    pub leaderboard: LeaderboardEntry,
    pub workout: Workout,
}

/// Populate the database directly, bypassing the HTTP layer.
#[allow(dead_code)]
pub async fn seed(state: &AppState) -> Fixtures {
    let user = NewUser {
        username: "testuser".to_string(),
        email: "testuser@example.com".to_string(),
        password: "password123".to_string(),
    }
    .into_record()
    .unwrap();
    state.db.create_user(&user).await.unwrap();

    let team = Team {
        id: new_record_id().unwrap(),
        name: "Test Team".to_string(),
        members: vec![],
    };
    state.db.create_team(&team).await.unwrap();

    let activity = Activity {
        id: new_record_id().unwrap(),
        user: user.id.clone(),
        activity_type: "Running".to_string(),
        duration: "00:30:00".parse::<ActivityDuration>().unwrap(),
    };
    state.db.create_activity(&activity).await.unwrap();

    let leaderboard = LeaderboardEntry {
        id: new_record_id().unwrap(),
        user: user.id.clone(),
        score: 100,
    };
    state.db.create_leaderboard_entry(&leaderboard).await.unwrap();

    let workout = Workout {
        id: new_record_id().unwrap(),
        name: "Morning Run".to_string(),
        description: "A quick morning run.".to_string(),
    };
    state.db.create_workout(&workout).await.unwrap();

    Fixtures {
        user,
        team,
        activity,
        leaderboard,
        workout,
    }
}

/// Send a request and decode the JSON response body.
#[allow(dead_code)]
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

#[allow(dead_code)]
pub async fn post_json(app: &Router, uri: &str, payload: Value) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap(),
    )
    .await
}

#[allow(dead_code)]
pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

#[allow(dead_code)]
pub async fn post_form(app: &Router, uri: &str, body: &str) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

/// POST `fields` as a multipart/form-data body, one part per pair.
#[allow(dead_code)]
pub async fn post_multipart(
    app: &Router,
    uri: &str,
    fields: &[(&str, &str)],
) -> (StatusCode, Value) {
    const BOUNDARY: &str = "octofit-test-boundary";
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));

    send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap(),
    )
    .await
}
