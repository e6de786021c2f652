use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use stormscout_core::rotation::{FileFingerprintStore, RotationDetector};
use stormscout_events::{AnnouncementSink, EventBus, WebhookSink};
use stormscout_worldinfo::{
    CachedSnapshotProvider, EpicApi, LiveSnapshotProvider, SnapshotCache, SnapshotProvider,
};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stormscout_api::background::auto_alerts;
use stormscout_api::config::BotConfig;
use stormscout_api::engine::announce::{resolve_categories, AlertAnnouncer};
use stormscout_api::notifications::NotificationRouter;
use stormscout_api::router::build_app_router;
use stormscout_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stormscout_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = BotConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded bot configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = stormscout_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    stormscout_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    stormscout_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Snapshot providers ---
    let cache = Arc::new(SnapshotCache::new(&config.snapshot_cache_path));
    let snapshots: Arc<dyn SnapshotProvider> = Arc::new(CachedSnapshotProvider::new(cache.clone()));
    let live_sync: Option<Arc<dyn SnapshotProvider>> =
        config.epic_client_basic.as_ref().map(|basic| {
            Arc::new(LiveSnapshotProvider::new(
                EpicApi::new(basic.clone()),
                &config.credentials_path,
                cache.clone(),
                Duration::from_secs(config.fetch_timeout_secs),
            )) as Arc<dyn SnapshotProvider>
        });
    if live_sync.is_none() {
        tracing::warn!("EPIC_CLIENT_BASIC not set, serving cached snapshots only");
    }

    // --- Event bus ---
    let event_bus = Arc::new(EventBus::default());

    // --- Announcements ---
    let alert_sink: Option<Arc<dyn AnnouncementSink>> = config
        .alert_webhook_url
        .as_deref()
        .map(|url| Arc::new(WebhookSink::new(url).expect("Invalid ALERT_WEBHOOK_URL")) as _);
    let milestone_sink: Option<Arc<dyn AnnouncementSink>> = config
        .milestone_webhook()
        .map(|url| Arc::new(WebhookSink::new(url).expect("Invalid MILESTONE_WEBHOOK_URL")) as _);

    let announcer = alert_sink.map(|sink| {
        let detector = RotationDetector::new(
            Arc::new(FileFingerprintStore::new(&config.fingerprint_path)),
            config.fingerprint_strategy,
        );
        Arc::new(
            AlertAnnouncer::new(
                snapshots.clone(),
                detector,
                sink,
                resolve_categories(&config.auto_alert_categories),
            )
            .with_render_options(config.render_options())
            .with_stale_after(config.stale_after())
            .with_event_bus(event_bus.clone()),
        )
    });

    let router_handle = milestone_sink.map(|sink| {
        tokio::spawn(NotificationRouter::new(sink).run(event_bus.subscribe()))
    });

    let alerts_cancel = CancellationToken::new();
    let alerts_handle = match &announcer {
        Some(announcer) => Some(tokio::spawn(auto_alerts::run(
            live_sync.clone(),
            announcer.clone(),
            config.alert_schedule,
            alerts_cancel.clone(),
        ))),
        None => {
            tracing::warn!("ALERT_WEBHOOK_URL not set, auto-alerts disabled");
            None
        }
    };

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        event_bus: event_bus.clone(),
        snapshots,
        live_sync,
        announcer,
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    alerts_cancel.cancel();
    if let Some(handle) = alerts_handle {
        let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
    }
    tracing::info!("Auto-alert job stopped");

    // Dropping the last sender closes the channel and ends the router loop.
    drop(event_bus);
    if let Some(handle) = router_handle {
        let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
    }

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
