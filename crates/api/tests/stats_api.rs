//! Integration tests for `/api/v1/stats` and `/api/v1/leaderboard`.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json_as, ADMIN_ID};
use serde_json::json;
use sqlx::PgPool;

async fn add(pool: &PgPool, user_id: &str, activity: &str, amount: i64) {
    let app = common::build_test_app(pool.clone());
    let response = post_json_as(
        app,
        "/api/v1/admin/stats",
        json!({ "user_id": user_id, "activity": activity, "action": "add", "amount": amount }),
        ADMIN_ID,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn stats_report_counts_and_ratio(pool: PgPool) {
    add(&pool, "42", "host", 3).await;
    add(&pool, "42", "leech", 1).await;

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/v1/stats/42").await).await;
    let data = &json["data"];
    assert_eq!(data["stats"]["hosts"], 3);
    assert_eq!(data["stats"]["leeches"], 1);
    assert_eq!(data["total"], 4);
    assert_eq!(data["host_ratio"], 75);
    assert_eq!(data["leech_ratio"], 25);
    assert!(data["text"].as_str().unwrap().contains("**Hosted:** `3`"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn stats_for_unknown_user_are_zero(pool: PgPool) {
    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/v1/stats/nobody?period=monthly").await).await;
    assert_eq!(json["data"]["total"], 0);
    assert_eq!(json["data"]["host_ratio"], 0);
    assert_eq!(json["data"]["period"], "monthly");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_period_is_bad_request(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/stats/42?period=forever").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn leaderboard_ranks_hosts(pool: PgPool) {
    add(&pool, "1", "host", 2).await;
    add(&pool, "2", "host", 5).await;
    add(&pool, "3", "leech", 9).await;

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/v1/leaderboard").await).await;
    let data = &json["data"];
    assert_eq!(data["total_hosted"], 7);
    assert_eq!(data["entries"].as_array().unwrap().len(), 2);
    assert_eq!(data["entries"][0]["user_id"], "2");
    let description = data["description"].as_str().unwrap();
    assert!(description.starts_with("A total of **7** missions have been hosted!"));
    assert!(description.contains("**1.** <@2> — `5` hosts"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn empty_leaderboard_says_no_data(pool: PgPool) {
    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/v1/leaderboard?period=monthly").await).await;
    assert!(json["data"]["description"]
        .as_str()
        .unwrap()
        .ends_with("No data yet."));
}
