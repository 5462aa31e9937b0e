// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Resource creation through the HTTP API.

use axum::http::StatusCode;
use octofit_tracker::password::verify_password;
use serde_json::json;

mod common;
use common::{create_test_app, get_json, post_form, post_json, post_multipart, seed};

#[tokio::test]
async fn test_user_creation() {
    let (app, state) = create_test_app();
    seed(&state).await;

    let (status, body) = post_json(
        &app,
        "/api/users/",
        json!({
            "username": "newuser",
            "email": "newuser@example.com",
            "password": "newpassword123"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["username"], "newuser");
    assert_eq!(body["email"], "newuser@example.com");
    assert!(body.get("password").is_none(), "password must not be echoed");

    let id = body["id"].as_str().unwrap();
    let stored = state.db.get_user(id).await.unwrap().unwrap();
    assert_ne!(stored.password, "newpassword123");
    assert!(verify_password("newpassword123", &stored.password));
}

#[tokio::test]
async fn test_team_creation() {
    let (app, state) = create_test_app();
    let fixtures = seed(&state).await;

    let (status, body) = post_json(
        &app,
        "/api/teams/",
        json!({
            "name": "New Team",
            "members": [fixtures.user.id]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "New Team");
    assert_eq!(body["members"], json!([fixtures.user.id]));
}

#[tokio::test]
async fn test_activity_creation() {
    let (app, state) = create_test_app();
    let fixtures = seed(&state).await;

    let (status, body) = post_json(
        &app,
        "/api/activities/",
        json!({
            "user": fixtures.user.id,
            "activity_type": "Cycling",
            "duration": "01:00:00"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"], fixtures.user.id.as_str());
    assert_eq!(body["activity_type"], "Cycling");
    assert_eq!(body["duration"], "01:00:00");
}

#[tokio::test]
async fn test_leaderboard_creation() {
    let (app, state) = create_test_app();
    let fixtures = seed(&state).await;

    let (status, body) = post_json(
        &app,
        "/api/leaderboard/",
        json!({
            "user": fixtures.user.id,
            "score": 200
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"], fixtures.user.id.as_str());
    assert_eq!(body["score"], 200);
}

#[tokio::test]
async fn test_workout_creation() {
    let (app, state) = create_test_app();
    seed(&state).await;

    let (status, body) = post_json(
        &app,
        "/api/workouts/",
        json!({
            "name": "Evening Yoga",
            "description": "A relaxing yoga session."
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Evening Yoga");
    assert_eq!(body["description"], "A relaxing yoga session.");
}

#[tokio::test]
async fn test_workout_round_trip() {
    let (app, state) = create_test_app();
    seed(&state).await;

    let (status, created) = post_json(
        &app,
        "/api/workouts/",
        json!({
            "name": "Evening Yoga",
            "description": "A relaxing yoga session."
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, list) = get_json(&app, "/api/workouts/").await;
    assert_eq!(status, StatusCode::OK);
    let found = list
        .as_array()
        .unwrap()
        .iter()
        .find(|w| w["id"] == created["id"])
        .expect("created workout should be listed");
    assert_eq!(found["name"], "Evening Yoga");
    assert_eq!(found["description"], "A relaxing yoga session.");

    let uri = format!("/api/workouts/{}/", created["id"].as_str().unwrap());
    let (status, fetched) = get_json(&app, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_duration_given_in_seconds() {
    let (app, state) = create_test_app();
    let fixtures = seed(&state).await;

    let (status, body) = post_json(
        &app,
        "/api/activities/",
        json!({
            "user": fixtures.user.id,
            "activity_type": "Swimming",
            "duration": 5400
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["duration"], "01:30:00");
}

#[tokio::test]
async fn test_team_duplicate_members_collapse() {
    let (app, state) = create_test_app();
    let fixtures = seed(&state).await;

    let (status, body) = post_json(
        &app,
        "/api/teams/",
        json!({
            "name": "Doubled Team",
            "members": [fixtures.user.id, fixtures.user.id]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["members"], json!([fixtures.user.id]));
}

#[tokio::test]
async fn test_workout_creation_form_encoded() {
    let (app, state) = create_test_app();
    seed(&state).await;

    let (status, body) = post_form(
        &app,
        "/api/workouts/",
        "name=Evening+Yoga&description=A+relaxing+yoga+session.",
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Evening Yoga");
    assert_eq!(body["description"], "A relaxing yoga session.");
}

#[tokio::test]
async fn test_team_creation_form_encoded_members() {
    let (app, state) = create_test_app();
    let fixtures = seed(&state).await;

    let (status, other) = post_json(
        &app,
        "/api/users/",
        json!({
            "username": "seconduser",
            "email": "second@example.com",
            "password": "password123"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let other_id = other["id"].as_str().unwrap();

    let form = format!(
        "name=Form+Team&members={}&members={}",
        fixtures.user.id, other_id
    );
    let (status, body) = post_form(&app, "/api/teams/", &form).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Form Team");
    assert_eq!(body["members"], json!([fixtures.user.id, other_id]));
}

#[tokio::test]
async fn test_creation_multipart() {
    let (app, state) = create_test_app();
    let fixtures = seed(&state).await;

    let (status, body) = post_multipart(
        &app,
        "/api/users/",
        &[
            ("username", "newuser"),
            ("email", "newuser@example.com"),
            ("password", "newpassword123"),
        ],
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["username"], "newuser");
    assert!(body.get("password").is_none());

    let (status, body) = post_multipart(
        &app,
        "/api/activities/",
        &[
            ("user", fixtures.user.id.as_str()),
            ("activity_type", "Cycling"),
            ("duration", "01:00:00"),
        ],
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["duration"], "01:00:00");

    let (status, body) = post_multipart(
        &app,
        "/api/leaderboard/",
        &[("user", fixtures.user.id.as_str()), ("score", "200")],
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["score"], 200);
}

#[tokio::test]
async fn test_password_keeps_surrounding_whitespace() {
    let (app, state) = create_test_app();

    let (status, body) = post_json(
        &app,
        "/api/users/",
        json!({
            "username": "  spaced  ",
            "email": " spaced@example.com ",
            "password": "  padded pass  "
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["username"], "spaced");
    assert_eq!(body["email"], "spaced@example.com");

    let stored = state
        .db
        .get_user(body["id"].as_str().unwrap())
        .await
        .unwrap()
        .unwrap();
    assert!(verify_password("  padded pass  ", &stored.password));
    assert!(!verify_password("padded pass", &stored.password));
}
