//! Integration tests for `/api/v1/tracking`.

mod common;

use axum::http::StatusCode;
use common::{body_json, chat_message, delete, post_json, post_json_as, ADMIN_ID, HOST_1K_ROLE, HOST_ROLE};
use serde_json::json;
use sqlx::PgPool;
use stormscout_events::bus::event_types;

#[sqlx::test(migrations = "../../db/migrations")]
async fn host_mention_records_a_host(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/tracking/messages",
        chat_message("m1", "42", "<@&900> 140 ssd", &[HOST_ROLE]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["activity"]["kind"], "host");
    assert_eq!(data["count"], 1);
    assert_eq!(data["reply"], "-# You have now hosted **1** missions.");
    assert_eq!(data["century"], false);
    assert!(data["role_grant"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn omw_x2_records_two_leeches(pool: PgPool) {
    let app = common::build_test_app(pool);
    let json = body_json(
        post_json(
            app,
            "/api/v1/tracking/messages",
            chat_message("m2", "42", "OMW x2", &[]),
        )
        .await,
    )
    .await;
    assert_eq!(json["data"]["activity"]["kind"], "leech");
    assert_eq!(json["data"]["activity"]["iterations"], 2);
    assert_eq!(json["data"]["count"], 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn chatter_is_ignored(pool: PgPool) {
    let app = common::build_test_app(pool);
    let json = body_json(
        post_json(
            app,
            "/api/v1/tracking/messages",
            chat_message("m3", "42", "anyone up for a run?", &[]),
        )
        .await,
    )
    .await;
    assert!(json["data"]["activity"].is_null());
    assert!(json["data"]["reply"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn redelivered_message_is_not_counted_twice(pool: PgPool) {
    let body = chat_message("m4", "42", "omw", &[]);

    let app = common::build_test_app(pool.clone());
    post_json(app, "/api/v1/tracking/messages", body.clone()).await;

    let app = common::build_test_app(pool);
    let json = body_json(post_json(app, "/api/v1/tracking/messages", body).await).await;
    assert_eq!(json["data"]["duplicate"], true);
    assert_eq!(json["data"]["count"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_message_id_is_bad_request(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/tracking/messages",
        chat_message("", "42", "omw", &[]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_a_message_removes_its_records(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    post_json(
        app,
        "/api/v1/tracking/messages",
        chat_message("m5", "42", "omw 2x", &[]),
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/tracking/messages/m5/reply",
        json!({ "bot_reply_id": "r5" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let json = body_json(delete(app, "/api/v1/tracking/messages/m5").await).await;
    let data = &json["data"];
    assert_eq!(data["removed"], 2);
    assert_eq!(data["user_id"], "42");
    assert_eq!(data["activity"], "leech");
    assert_eq!(data["bot_reply_id"], "r5");
    assert_eq!(data["count"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_an_untracked_message_is_a_noop(pool: PgPool) {
    let app = common::build_test_app(pool);
    let json = body_json(delete(app, "/api/v1/tracking/messages/unknown").await).await;
    assert_eq!(json["data"]["removed"], 0);
    assert!(json["data"]["user_id"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reply_for_unknown_message_is_not_found(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/tracking/messages/nope/reply",
        json!({ "bot_reply_id": "r" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn hundredth_host_is_a_century(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    post_json_as(
        app,
        "/api/v1/admin/stats",
        json!({ "user_id": "42", "activity": "host", "action": "add", "amount": 99 }),
        ADMIN_ID,
    )
    .await;

    let test_app = common::build_test_harness(pool);
    let mut events = test_app.event_bus.subscribe();
    let json = body_json(
        post_json(
            test_app.router,
            "/api/v1/tracking/messages",
            chat_message("m6", "42", "<@&900>", &[HOST_ROLE]),
        )
        .await,
    )
    .await;
    assert_eq!(json["data"]["count"], 100);
    assert_eq!(json["data"]["century"], true);

    let recorded = events.recv().await.unwrap();
    assert_eq!(recorded.event_type, event_types::MISSION_RECORDED);
    let century = events.recv().await.unwrap();
    assert_eq!(century.event_type, event_types::CENTURY_REACHED);
    assert_eq!(century.payload["count"], 100);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn thousandth_host_grants_milestone_role(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    post_json_as(
        app,
        "/api/v1/admin/stats",
        json!({ "user_id": "42", "activity": "host", "action": "add", "amount": 999 }),
        ADMIN_ID,
    )
    .await;

    let app = common::build_test_app(pool);
    let json = body_json(
        post_json(
            app,
            "/api/v1/tracking/messages",
            chat_message("m7", "42", "<@&900>", &[HOST_ROLE]),
        )
        .await,
    )
    .await;
    let data = &json["data"];
    assert_eq!(data["count"], 1000);
    assert_eq!(data["role_grant"]["role_id"], HOST_1K_ROLE);
    assert_eq!(data["century"], false);
}
