//! End-to-end API integration tests
//!
//! These tests verify the complete HTTP flows of the scoreboard backend:
//! team creation, score awards, status reads, step validation and the
//! spectator ranking. They need a running PostgreSQL reachable through
//! `DATABASE_URL`, so they are `#[ignore]`d by default; run them with
//! `cargo test -- --ignored`.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use escape_scoreboard_api::api::handlers::teams;
use escape_scoreboard_api::infrastructure::repositories::PostgresTeamRepository;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::util::ServiceExt; // for oneshot

/// Setup test application with routes
fn setup_app(pool: PgPool) -> Router {
    use axum::routing::{get, post};

    Router::new()
        .route("/health", get(teams::health_check))
        .route("/create_team", post(teams::create_team))
        .route("/update_score", post(teams::update_score))
        .route("/get_team_status", get(teams::get_team_status))
        .route("/validate_step", post(teams::validate_step))
        .route("/get_spectator_data", get(teams::get_spectator_data))
        .with_state(pool)
}

/// Setup test database connection
async fn setup_test_db() -> PgPool {
    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests");

    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to test database");

    PostgresTeamRepository::ensure_schema(&pool)
        .await
        .expect("Failed to initialize schema");

    pool
}

/// Clean up a team created during a test
async fn cleanup_team(pool: &PgPool, team_id: i32) {
    sqlx::query("DELETE FROM teams WHERE id = $1")
        .bind(team_id)
        .execute(pool)
        .await
        .expect("Failed to cleanup test team");
}

async fn json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn post_json(uri: &str, payload: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(payload).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// Create a team over the API and return its id
async fn create_team(app: &Router, name: &str) -> i32 {
    let response = app
        .clone()
        .oneshot(post_json("/create_team", &json!({ "name": name })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    body["team_id"].as_i64().expect("team_id in response") as i32
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance via DATABASE_URL"]
async fn test_health_check() {
    let pool = setup_test_db().await;
    let app = setup_app(pool);

    let response = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"OK");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance via DATABASE_URL"]
async fn test_create_team_starts_at_step_one() {
    let pool = setup_test_db().await;
    let app = setup_app(pool.clone());

    let team_id = create_team(&app, "Fresh Start").await;

    let response = app
        .oneshot(get(&format!("/get_team_status?team_id={}", team_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["team_id"], team_id);
    assert_eq!(body["current_step"], 1);
    assert_eq!(body["completed"], false);
    assert_eq!(body["score"], 0);
    // Just created, so at most a couple of seconds have passed.
    assert!(body["elapsed_time"].as_f64().unwrap() < 5.0);

    cleanup_team(&pool, team_id).await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance via DATABASE_URL"]
async fn test_create_team_rejects_missing_and_blank_names() {
    let pool = setup_test_db().await;
    let app = setup_app(pool);

    for payload in [json!({}), json!({ "name": "" }), json!({ "name": "   " })] {
        let response = app
            .clone()
            .oneshot(post_json("/create_team", &payload))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance via DATABASE_URL"]
async fn test_update_score_requires_both_fields() {
    let pool = setup_test_db().await;
    let app = setup_app(pool);

    for payload in [json!({}), json!({ "team_id": 1 }), json!({ "score": 10 })] {
        let response = app
            .clone()
            .oneshot(post_json("/update_score", &payload))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance via DATABASE_URL"]
async fn test_update_score_on_unknown_team_is_a_noop() {
    let pool = setup_test_db().await;
    let app = setup_app(pool);

    // No row matches, so zero rows are updated, yet the call succeeds.
    let response = app
        .oneshot(post_json(
            "/update_score",
            &json!({ "team_id": -1, "score": 25 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert!(body["message"].is_string());
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance via DATABASE_URL"]
async fn test_get_team_status_error_paths() {
    let pool = setup_test_db().await;
    let app = setup_app(pool);

    let response = app
        .clone()
        .oneshot(get("/get_team_status"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(get("/get_team_status?team_id=-1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance via DATABASE_URL"]
async fn test_validate_step_error_paths() {
    let pool = setup_test_db().await;
    let app = setup_app(pool);

    let response = app
        .clone()
        .oneshot(post_json("/validate_step", &json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(post_json("/validate_step", &json!({ "team_id": -1 })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance via DATABASE_URL"]
async fn test_full_event_scenario() {
    let pool = setup_test_db().await;
    let app = setup_app(pool.clone());

    // Create team "Alpha" and award 50 points.
    let team_id = create_team(&app, "Alpha").await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/update_score",
            &json!({ "team_id": team_id, "score": 50 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get(&format!("/get_team_status?team_id={}", team_id)))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["score"], 50);

    // Six validations walk the team from step 1 to step 7.
    for expected_next in 2..=7 {
        let response = app
            .clone()
            .oneshot(post_json("/validate_step", &json!({ "team_id": team_id })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["next_step"], expected_next);
    }

    let response = app
        .clone()
        .oneshot(get(&format!("/get_team_status?team_id={}", team_id)))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["current_step"], 7);
    assert_eq!(body["completed"], false);

    // The seventh validation completes the run and still reports step 8.
    let response = app
        .clone()
        .oneshot(post_json("/validate_step", &json!({ "team_id": team_id })))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["next_step"], 8);

    let response = app
        .clone()
        .oneshot(get(&format!("/get_team_status?team_id={}", team_id)))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["current_step"], 7);
    assert_eq!(body["completed"], true);

    cleanup_team(&pool, team_id).await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance via DATABASE_URL"]
async fn test_spectator_data_is_ranked() {
    let pool = setup_test_db().await;
    let app = setup_app(pool.clone());

    let first = create_team(&app, "First").await;
    let second = create_team(&app, "Second").await;
    let third = create_team(&app, "Third").await;

    // First: score 10, incomplete. Second: score 10, created later, so it
    // loses the tie-break. Third: score 5 but completed.
    for (team_id, score) in [(first, 10), (second, 10), (third, 5)] {
        let response = app
            .clone()
            .oneshot(post_json(
                "/update_score",
                &json!({ "team_id": team_id, "score": score }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
    sqlx::query("UPDATE teams SET current_step = 7, completed = TRUE WHERE id = $1")
        .bind(third)
        .execute(&pool)
        .await
        .unwrap();

    let response = app.oneshot(get("/get_spectator_data")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;

    // Other rows may exist in a shared database, so compare the relative
    // order of the three teams created here.
    let positions: Vec<i64> = body["teams"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["id"].as_i64().unwrap())
        .filter(|id| [first, second, third].contains(&(*id as i32)))
        .collect();

    assert_eq!(positions, vec![first as i64, second as i64, third as i64]);

    for team_id in [first, second, third] {
        cleanup_team(&pool, team_id).await;
    }
}
