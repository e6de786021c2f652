#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::{DateTime, Utc};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

use stormscout_api::config::BotConfig;
use stormscout_api::engine::announce::{resolve_categories, AlertAnnouncer};
use stormscout_api::middleware::admin::ACTOR_HEADER;
use stormscout_api::router::build_app_router;
use stormscout_api::state::AppState;
use stormscout_core::milestones::MilestoneRoles;
use stormscout_core::rotation::{FingerprintStrategy, MemoryFingerprintStore, RotationDetector};
use stormscout_core::snapshot::RawSnapshot;
use stormscout_core::zones::CANNY_VALLEY;
use stormscout_events::{EventBus, RecordingSink};
use stormscout_worldinfo::{CachedSnapshotProvider, SnapshotCache};

pub const ADMIN_ID: &str = "100";
pub const HOST_ROLE: &str = "900";
pub const HOST_1K_ROLE: &str = "901";

/// Build a test `BotConfig` with one admin, one tracked role and milestone
/// roles configured.
pub fn test_config() -> BotConfig {
    BotConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        admin_ids: vec![ADMIN_ID.to_string()],
        tracked_role_ids: vec![HOST_ROLE.to_string()],
        milestone_roles: MilestoneRoles {
            host_1k: Some(HOST_1K_ROLE.to_string()),
            host_3k: Some("902".to_string()),
            leech_3k: Some("903".to_string()),
        },
        ..BotConfig::default()
    }
}

/// Handles a test needs besides the router.
pub struct TestApp {
    pub router: Router,
    pub sink: Arc<RecordingSink>,
    pub event_bus: Arc<EventBus>,
}

/// Build the full application router with the snapshot cache at
/// `cache_path` and an announcer posting into a [`RecordingSink`].
pub fn build_test_app_with_cache(pool: PgPool, cache_path: &Path) -> TestApp {
    let config = test_config();
    let cache = Arc::new(SnapshotCache::new(cache_path));
    let snapshots = Arc::new(CachedSnapshotProvider::new(cache));
    let event_bus = Arc::new(EventBus::default());
    let sink = Arc::new(RecordingSink::default());

    let announcer = AlertAnnouncer::new(
        snapshots.clone(),
        RotationDetector::new(
            Arc::new(MemoryFingerprintStore::default()),
            FingerprintStrategy::NextRefresh,
        ),
        sink.clone(),
        resolve_categories(&config.auto_alert_categories),
    )
    .with_event_bus(event_bus.clone());

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        event_bus: event_bus.clone(),
        snapshots,
        live_sync: None,
        announcer: Some(Arc::new(announcer)),
    };

    TestApp {
        router: build_app_router(state, &config),
        sink,
        event_bus,
    }
}

const MISSING_CACHE: &str = "/nonexistent/stormscout/daily_missions.json";

/// Full test harness without a cached snapshot.
pub fn build_test_harness(pool: PgPool) -> TestApp {
    build_test_app_with_cache(pool, Path::new(MISSING_CACHE))
}

/// Build the application router without a cached snapshot.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_harness(pool).router
}

/// Write a snapshot body and its fetch time where the cache expects it.
pub async fn write_snapshot(path: &Path, body: &str, fetched_at: DateTime<Utc>) {
    SnapshotCache::new(path)
        .write(&RawSnapshot::new(body, fetched_at))
        .await
        .unwrap();
}

/// One Canny Valley mission alert paying `vbucks` V-Bucks.
pub fn vbucks_snapshot(vbucks: u64) -> String {
    json!({
        "theaters": [],
        "missions": [{
            "theaterId": CANNY_VALLEY,
            "availableMissions": [{
                "tileIndex": 3,
                "missionGenerator": "/Game/World/MissionGens/MissionGen_1Gate.MissionGen_1Gate_C",
                "missionDifficultyInfo": { "rowName": "Theater_Hard_Group_Zone3" },
                "missionRewards": { "items": [] }
            }]
        }],
        "missionAlerts": [{
            "theaterId": CANNY_VALLEY,
            "nextRefresh": "2026-10-18T00:00:00Z",
            "availableMissionAlerts": [{
                "name": "MissionAlert_Regular",
                "tileIndex": 3,
                "missionAlertRewards": { "items": [
                    { "itemType": "AccountResource:currency_mtxswap", "quantity": vbucks }
                ] }
            }]
        }]
    })
    .to_string()
}

/// Chat message JSON as the dispatcher sends it.
pub fn chat_message(id: &str, author_id: &str, content: &str, mentioned_role_ids: &[&str]) -> Value {
    json!({
        "message": {
            "id": id,
            "author_id": author_id,
            "content": content,
            "mentioned_role_ids": mentioned_role_ids,
        },
        "member_role_ids": [],
        "username": format!("user{author_id}"),
    })
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST as the given chat user (`x-actor-id`).
pub async fn post_json_as(app: Router, uri: &str, body: Value, actor_id: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .header(ACTOR_HEADER, actor_id)
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
