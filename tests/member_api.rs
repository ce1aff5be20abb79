//! Member-scoped API integration tests
//!
//! Auth key enforcement plus profile, metrics, workout and gym membership
//! endpoints.

#![cfg(feature = "ssr")]

mod common;

use axum::http::StatusCode;
use common::*;
use pretty_assertions::assert_eq;
use repbook::backend::store::MemberStore;
use serde_json::{json, Value};

#[tokio::test]
async fn test_user_data_and_metrics() {
    let app = spawn_app();
    let member = signup_member(&app.server, "annlee").await;
    let (name, value) = auth_key(&member.auth_key);

    let response = app
        .server
        .get(&format!("/userDataAndMetrics/{}", member.member_id))
        .add_header(name, value)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["member_id"], member.member_id);
    assert_eq!(body["username"], "annlee");
    assert_eq!(body["date_of_birth"], "1990-01-01");
    assert_eq!(body["latest_metrics"]["weight_kg"], 65.0);
    assert!(body.get("password_hash").is_none());
    assert!(body.get("auth_key").is_none());
}

#[tokio::test]
async fn test_bearer_header_is_accepted() {
    let app = spawn_app();
    let member = signup_member(&app.server, "annlee").await;
    let (name, value) = bearer(&member.auth_key);

    let response = app
        .server
        .get(&format!("/workouts/{}", member.member_id))
        .add_header(name, value)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_missing_auth_key() {
    let app = spawn_app();
    let member = signup_member(&app.server, "annlee").await;

    let response = app
        .server
        .get(&format!("/userDataAndMetrics/{}", member.member_id))
        .await;

    assert_error(&response, StatusCode::UNAUTHORIZED, "unauthorized");
}

#[tokio::test]
async fn test_other_members_key_is_rejected() {
    let app = spawn_app();
    let ann = signup_member(&app.server, "annlee").await;
    let bob = signup_member(&app.server, "bobby").await;
    let (name, value) = auth_key(&bob.auth_key);

    let response = app
        .server
        .get(&format!("/workouts/{}", ann.member_id))
        .add_header(name, value)
        .await;

    assert_error(&response, StatusCode::UNAUTHORIZED, "unauthorized");
}

#[tokio::test]
async fn test_unknown_member_looks_like_wrong_key() {
    let app = spawn_app();
    let member = signup_member(&app.server, "annlee").await;

    let (name, value) = auth_key("garbage");
    let wrong_key = app
        .server
        .get(&format!("/workouts/{}", member.member_id))
        .add_header(name, value)
        .await;

    let (name, value) = auth_key(&member.auth_key);
    let unknown_member = app
        .server
        .get("/workouts/999999")
        .add_header(name, value)
        .await;

    let (name, value) = auth_key(&member.auth_key);
    let malformed_id = app
        .server
        .get("/workouts/not-a-number")
        .add_header(name, value)
        .await;

    assert_error(&wrong_key, StatusCode::UNAUTHORIZED, "unauthorized");
    assert_error(&unknown_member, StatusCode::UNAUTHORIZED, "unauthorized");
    assert_error(&malformed_id, StatusCode::UNAUTHORIZED, "unauthorized");
    assert_eq!(wrong_key.text(), unknown_member.text());
    assert_eq!(wrong_key.text(), malformed_id.text());
}

#[tokio::test]
async fn test_create_workout() {
    let app = spawn_app();
    let member = signup_member(&app.server, "annlee").await;
    let path = format!("/createWorkout/{}", member.member_id);
    let body = json!({ "workoutName": "Leg Day", "exerciseIds": [1, 2, 3] });

    let (name, value) = auth_key(&member.auth_key);
    let created = app.server.post(&path).add_header(name, value).json(&body).await;

    assert_eq!(created.status_code(), StatusCode::CREATED);
    let workout: Value = created.json();
    assert_eq!(workout["workout_name"], "Leg Day");
    assert_eq!(workout["exercise_ids"], json!([1, 2, 3]));
    assert_eq!(workout["member_id"], member.member_id);

    let (name, value) = auth_key("garbage");
    let rejected = app.server.post(&path).add_header(name, value).json(&body).await;

    assert_error(&rejected, StatusCode::UNAUTHORIZED, "unauthorized");
    assert_eq!(app.store.workouts(member.member_id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_workout_validation() {
    let app = spawn_app();
    let member = signup_member(&app.server, "annlee").await;
    let path = format!("/createWorkout/{}", member.member_id);

    for body in [
        json!({ "workoutName": "Leg Day", "exerciseIds": [] }),
        json!({ "workoutName": "  ", "exerciseIds": [1] }),
        json!({ "exerciseIds": [1] }),
    ] {
        let (name, value) = auth_key(&member.auth_key);
        let response = app.server.post(&path).add_header(name, value).json(&body).await;
        assert_error(&response, StatusCode::BAD_REQUEST, "validation_error");
    }

    assert!(app.store.workouts(member.member_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_workouts_keep_order_and_scope() {
    let app = spawn_app();
    let ann = signup_member(&app.server, "annlee").await;
    let bob = signup_member(&app.server, "bobby").await;

    for workout_name in ["Push", "Pull", "Legs"] {
        let (name, value) = auth_key(&ann.auth_key);
        app.server
            .post(&format!("/createWorkout/{}", ann.member_id))
            .add_header(name, value)
            .json(&json!({ "workoutName": workout_name, "exerciseIds": [4, 5] }))
            .await;
    }

    let (name, value) = auth_key(&ann.auth_key);
    let anns: Vec<Value> = app
        .server
        .get(&format!("/workouts/{}", ann.member_id))
        .add_header(name, value)
        .await
        .json();
    let names: Vec<&str> = anns
        .iter()
        .map(|w| w["workout_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Push", "Pull", "Legs"]);

    let (name, value) = auth_key(&bob.auth_key);
    let bobs = app
        .server
        .get(&format!("/workouts/{}", bob.member_id))
        .add_header(name, value)
        .await;
    assert_eq!(bobs.status_code(), StatusCode::OK);
    assert_eq!(bobs.json::<Vec<Value>>(), Vec::<Value>::new());
}

#[tokio::test]
async fn test_members_metrics_history() {
    let app = spawn_app();
    let member = signup_member(&app.server, "annlee").await;
    let path = format!("/membersMetrics/{}", member.member_id);

    let (name, value) = auth_key(&member.auth_key);
    let recorded = app
        .server
        .post(&path)
        .add_header(name, value)
        .json(&json!({
            "heightCm": 170,
            "weightKg": 63.5,
            "gender": "F",
            "workoutFrequency": "Weekly"
        }))
        .await;
    assert_eq!(recorded.status_code(), StatusCode::CREATED);

    let (name, value) = auth_key(&member.auth_key);
    let history: Vec<Value> = app.server.get(&path).add_header(name, value).await.json();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["weight_kg"], 65.0);
    assert_eq!(history[1]["weight_kg"], 63.5);

    let (name, value) = auth_key(&member.auth_key);
    let latest: Value = app
        .server
        .get(&format!("/userDataAndMetrics/{}", member.member_id))
        .add_header(name, value)
        .await
        .json();
    assert_eq!(latest["latest_metrics"]["workout_frequency"], "Weekly");
}

#[tokio::test]
async fn test_record_metrics_validation() {
    let app = spawn_app();
    let member = signup_member(&app.server, "annlee").await;
    let (name, value) = auth_key(&member.auth_key);

    let response = app
        .server
        .post(&format!("/membersMetrics/{}", member.member_id))
        .add_header(name, value)
        .json(&json!({ "heightCm": -1, "weightKg": 60, "gender": "F", "workoutFrequency": "Daily" }))
        .await;

    assert_error(&response, StatusCode::BAD_REQUEST, "validation_error");
}

#[tokio::test]
async fn test_update_user_info() {
    let app = spawn_app();
    let ann = signup_member(&app.server, "annlee").await;
    let bob = signup_member(&app.server, "bobby").await;
    let path = format!("/updateUserInfo/{}", ann.member_id);

    let mut update = json!({
        "firstName": "Annie",
        "lastName": "Lee",
        "dateOfBirth": "1991-02-03",
        "email": ann.email,
        "username": bob.username
    });

    let (name, value) = auth_key(&ann.auth_key);
    let conflict = app.server.post(&path).add_header(name, value).json(&update).await;
    assert_error(&conflict, StatusCode::CONFLICT, "conflict");

    update["username"] = json!("annie_lee");
    let (name, value) = auth_key(&ann.auth_key);
    let updated = app.server.post(&path).add_header(name, value).json(&update).await;

    assert_eq!(updated.status_code(), StatusCode::OK);
    let body: Value = updated.json();
    assert_eq!(body["first_name"], "Annie");
    assert_eq!(body["username"], "annie_lee");
    assert_eq!(body["date_of_birth"], "1991-02-03");

    // The old username is free again
    let check: Value = app.server.get("/checkUsername/annlee").await.json();
    assert_eq!(check["available"], true);
}

#[tokio::test]
async fn test_set_gym_membership_upserts() {
    let app = spawn_app();
    let member = signup_member(&app.server, "annlee").await;

    for (gym, membership_type) in [("Iron Temple", "Monthly"), ("Steel Works", "Annual")] {
        let (name, value) = auth_key(&member.auth_key);
        let (id_name, id_value) = member_id_header(member.member_id);
        let response = app
            .server
            .post("/setGymMembership")
            .add_header(name, value)
            .add_header(id_name, id_value)
            .json(&json!({ "gym": gym, "membershipType": membership_type }))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK, "{}", response.text());
    }

    assert_eq!(app.store.gym_membership_rows(member.member_id).await, 1);

    let (name, value) = auth_key(&member.auth_key);
    let current: Value = app
        .server
        .get(&format!("/gymMembership/{}", member.member_id))
        .add_header(name, value)
        .await
        .json();
    assert_eq!(current["gym"], "Steel Works");
    assert_eq!(current["membership_type"], "Annual");
    assert_eq!(current["address"], Value::Null);
}

#[tokio::test]
async fn test_concurrent_gym_membership_writes() {
    let app = spawn_app();
    let member = signup_member(&app.server, "annlee").await;
    let path = format!("/setGymMembership/{}", member.member_id);

    let (name_a, value_a) = auth_key(&member.auth_key);
    let (name_b, value_b) = auth_key(&member.auth_key);
    let (first, second) = tokio::join!(
        app.server
            .post(&path)
            .add_header(name_a, value_a)
            .json(&json!({ "gym": "Gym A" })),
        app.server
            .post(&path)
            .add_header(name_b, value_b)
            .json(&json!({ "gym": "Gym B" })),
    );

    assert_eq!(first.status_code(), StatusCode::OK);
    assert_eq!(second.status_code(), StatusCode::OK);
    assert_eq!(app.store.gym_membership_rows(member.member_id).await, 1);
}

#[tokio::test]
async fn test_gym_membership_absent() {
    let app = spawn_app();
    let member = signup_member(&app.server, "annlee").await;
    let (name, value) = auth_key(&member.auth_key);

    let response = app
        .server
        .get(&format!("/gymMembership/{}", member.member_id))
        .add_header(name, value)
        .await;

    assert_error(&response, StatusCode::NOT_FOUND, "not_found");
}

#[tokio::test]
async fn test_gym_membership_body_member_mismatch() {
    let app = spawn_app();
    let ann = signup_member(&app.server, "annlee").await;
    let bob = signup_member(&app.server, "bobby").await;
    let (name, value) = auth_key(&ann.auth_key);
    let (id_name, id_value) = member_id_header(ann.member_id);

    let response = app
        .server
        .post("/setGymMembership")
        .add_header(name, value)
        .add_header(id_name, id_value)
        .json(&json!({ "memberId": bob.member_id, "gym": "Iron Temple" }))
        .await;

    assert_error(&response, StatusCode::UNAUTHORIZED, "unauthorized");
    assert!(app.store.gym_membership(bob.member_id).await.unwrap().is_none());
    assert!(app.store.gym_membership(ann.member_id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_set_gym_membership_without_member_id() {
    let app = spawn_app();
    let member = signup_member(&app.server, "annlee").await;
    let (name, value) = auth_key(&member.auth_key);

    let response = app
        .server
        .post("/setGymMembership")
        .add_header(name, value)
        .json(&json!({ "gym": "Iron Temple" }))
        .await;

    assert_error(&response, StatusCode::UNAUTHORIZED, "unauthorized");
}
