use std::path::PathBuf;

use chrono::NaiveTime;
use stormscout_core::milestones::MilestoneRoles;
use stormscout_core::render::{RenderOptions, MIN_PAGE_CHARS};
use stormscout_core::rotation::FingerprintStrategy;

/// Categories announced each rotation when `AUTO_ALERT_CATEGORIES` is unset.
pub const DEFAULT_AUTO_ALERT_CATEGORIES: &[&str] = &["currency_mtxswap", "voucher_cardpack_bronze"];

/// Bot configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development except the
/// database URL, which `main` reads separately.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Upper bound on one live world-info sync (default: `30`).
    pub fetch_timeout_secs: u64,
    pub snapshot_cache_path: PathBuf,
    pub fingerprint_path: PathBuf,
    pub credentials_path: PathBuf,
    /// Epic basic client token. Live sync is disabled when unset.
    pub epic_client_basic: Option<String>,
    /// Auto-alerts are disabled when unset.
    pub alert_webhook_url: Option<String>,
    pub milestone_webhook_url: Option<String>,
    /// Daily auto-alert time, UTC.
    pub alert_schedule: NaiveTime,
    pub auto_alert_categories: Vec<String>,
    pub fingerprint_strategy: FingerprintStrategy,
    pub stale_after_hours: i64,
    /// Roles whose mention marks a host post.
    pub tracked_role_ids: Vec<String>,
    pub admin_ids: Vec<String>,
    pub milestone_roles: MilestoneRoles,
    pub max_lines_per_zone: usize,
    pub max_page_chars: usize,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 3000,
            cors_origins: vec!["http://localhost:3000".into()],
            request_timeout_secs: 30,
            fetch_timeout_secs: 30,
            snapshot_cache_path: PathBuf::from("data/daily_missions.json"),
            fingerprint_path: PathBuf::from("data/last_reset.json"),
            credentials_path: PathBuf::from("data/credentials.json"),
            epic_client_basic: None,
            alert_webhook_url: None,
            milestone_webhook_url: None,
            alert_schedule: NaiveTime::from_hms_opt(0, 5, 0).unwrap_or_default(),
            auto_alert_categories: DEFAULT_AUTO_ALERT_CATEGORIES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            fingerprint_strategy: FingerprintStrategy::NextRefresh,
            stale_after_hours: 24,
            tracked_role_ids: Vec::new(),
            admin_ids: Vec::new(),
            milestone_roles: MilestoneRoles::default(),
            max_lines_per_zone: 20,
            max_page_chars: 3800,
        }
    }
}

impl BotConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                      | Default                                       |
    /// |------------------------------|-----------------------------------------------|
    /// | `HOST`                       | `0.0.0.0`                                     |
    /// | `PORT`                       | `3000`                                        |
    /// | `CORS_ORIGINS`               | `http://localhost:3000`                       |
    /// | `REQUEST_TIMEOUT_SECS`       | `30`                                          |
    /// | `SNAPSHOT_FETCH_TIMEOUT_SECS`| `30`                                          |
    /// | `SNAPSHOT_CACHE_PATH`        | `data/daily_missions.json`                    |
    /// | `FINGERPRINT_PATH`           | `data/last_reset.json`                        |
    /// | `CREDENTIALS_PATH`           | `data/credentials.json`                       |
    /// | `EPIC_CLIENT_BASIC`          | unset                                         |
    /// | `ALERT_WEBHOOK_URL`          | unset                                         |
    /// | `MILESTONE_WEBHOOK_URL`      | unset                                         |
    /// | `ALERT_SCHEDULE_UTC`         | `00:05`                                       |
    /// | `AUTO_ALERT_CATEGORIES`      | `currency_mtxswap,voucher_cardpack_bronze`    |
    /// | `FINGERPRINT_STRATEGY`       | `next_refresh`                                |
    /// | `STALE_AFTER_HOURS`          | `24`                                          |
    /// | `TRACKED_ROLE_IDS`           | empty                                         |
    /// | `ADMIN_IDS`                  | empty                                         |
    /// | `ROLE_HOST_1K`               | unset                                         |
    /// | `ROLE_HOST_3K`               | unset                                         |
    /// | `ROLE_LEECH_3K`              | unset                                         |
    /// | `MAX_LINES_PER_ZONE`         | `20`                                          |
    /// | `MAX_PAGE_CHARS`             | `3800`                                        |
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let host = std::env::var("HOST").unwrap_or(defaults.host);

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = std::env::var("CORS_ORIGINS")
            .map(|v| split_list(&v))
            .unwrap_or(defaults.cors_origins);

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let fetch_timeout_secs: u64 = std::env::var("SNAPSHOT_FETCH_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SNAPSHOT_FETCH_TIMEOUT_SECS must be a valid u64");

        let alert_schedule = std::env::var("ALERT_SCHEDULE_UTC")
            .map(|v| {
                NaiveTime::parse_from_str(v.trim(), "%H:%M")
                    .expect("ALERT_SCHEDULE_UTC must be HH:MM")
            })
            .unwrap_or(defaults.alert_schedule);

        let fingerprint_strategy = std::env::var("FINGERPRINT_STRATEGY")
            .map(|v| {
                v.parse::<FingerprintStrategy>()
                    .expect("FINGERPRINT_STRATEGY must be content_hash or next_refresh")
            })
            .unwrap_or(defaults.fingerprint_strategy);

        let stale_after_hours: i64 = std::env::var("STALE_AFTER_HOURS")
            .unwrap_or_else(|_| "24".into())
            .parse()
            .expect("STALE_AFTER_HOURS must be a valid i64");

        let max_lines_per_zone: usize = std::env::var("MAX_LINES_PER_ZONE")
            .unwrap_or_else(|_| "20".into())
            .parse()
            .expect("MAX_LINES_PER_ZONE must be a valid usize");

        let max_page_chars: usize = std::env::var("MAX_PAGE_CHARS")
            .unwrap_or_else(|_| "3800".into())
            .parse()
            .expect("MAX_PAGE_CHARS must be a valid usize");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            fetch_timeout_secs,
            snapshot_cache_path: env_path("SNAPSHOT_CACHE_PATH", defaults.snapshot_cache_path),
            fingerprint_path: env_path("FINGERPRINT_PATH", defaults.fingerprint_path),
            credentials_path: env_path("CREDENTIALS_PATH", defaults.credentials_path),
            epic_client_basic: env_opt("EPIC_CLIENT_BASIC"),
            alert_webhook_url: env_opt("ALERT_WEBHOOK_URL"),
            milestone_webhook_url: env_opt("MILESTONE_WEBHOOK_URL"),
            alert_schedule,
            auto_alert_categories: std::env::var("AUTO_ALERT_CATEGORIES")
                .map(|v| split_list(&v))
                .unwrap_or(defaults.auto_alert_categories),
            fingerprint_strategy,
            stale_after_hours,
            tracked_role_ids: env_list("TRACKED_ROLE_IDS"),
            admin_ids: env_list("ADMIN_IDS"),
            milestone_roles: MilestoneRoles {
                host_1k: env_opt("ROLE_HOST_1K"),
                host_3k: env_opt("ROLE_HOST_3K"),
                leech_3k: env_opt("ROLE_LEECH_3K"),
            },
            max_lines_per_zone,
            max_page_chars,
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            max_lines_per_zone: self.max_lines_per_zone,
            max_page_chars: self.max_page_chars.max(MIN_PAGE_CHARS),
            ..RenderOptions::default()
        }
    }

    pub fn stale_after(&self) -> chrono::Duration {
        chrono::Duration::hours(self.stale_after_hours)
    }

    pub fn is_admin(&self, user_id: &str) -> bool {
        self.admin_ids.iter().any(|id| id == user_id)
    }

    /// Milestone announcements go to their own webhook, else the alert one.
    pub fn milestone_webhook(&self) -> Option<&str> {
        self.milestone_webhook_url
            .as_deref()
            .or(self.alert_webhook_url.as_deref())
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn env_list(key: &str) -> Vec<String> {
    std::env::var(key).map(|v| split_list(&v)).unwrap_or_default()
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_path(key: &str, default: PathBuf) -> PathBuf {
    env_opt(key).map(PathBuf::from).unwrap_or(default)
}
