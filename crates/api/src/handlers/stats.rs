//! Handlers for personal stats and the leaderboard.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use stormscout_core::leaderboard::{leaderboard_lines, start_of_month, LeaderboardEntry, UserStats};
use stormscout_core::milestones::MILESTONE_COLOR;
use stormscout_core::types::Timestamp;
use stormscout_db::repositories::MissionHistoryRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

pub const LEADERBOARD_SIZE: i64 = 10;
pub const LEADERBOARD_TITLE: &str = "🏆 Global Mission Leaderboard";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    All,
    Monthly,
}

impl Period {
    fn since(self) -> Option<Timestamp> {
        match self {
            Self::All => None,
            Self::Monthly => Some(start_of_month(Utc::now())),
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::All => "All Time",
            Self::Monthly => "This Month",
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PeriodParams {
    pub period: Option<String>,
}

fn parse_period(params: &PeriodParams) -> AppResult<Period> {
    match params.period.as_deref().map(str::trim) {
        None | Some("") | Some("all") => Ok(Period::All),
        Some("monthly") | Some("month") => Ok(Period::Monthly),
        Some(other) => Err(AppError::BadRequest(format!("Unknown period: {other}"))),
    }
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub user_id: String,
    pub period: Period,
    pub stats: UserStats,
    pub total: i64,
    pub host_ratio: i64,
    pub leech_ratio: i64,
    /// Ready-to-post embed body.
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    pub period: Period,
    pub title: String,
    pub description: String,
    pub color: u32,
    pub total_hosted: i64,
    pub entries: Vec<LeaderboardEntry>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/stats/{user_id}?period=all|monthly
pub async fn get_stats(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(params): Query<PeriodParams>,
) -> AppResult<impl IntoResponse> {
    let period = parse_period(&params)?;
    let stats = MissionHistoryRepo::user_stats(&state.pool, &user_id, period.since()).await?;

    let text = format!(
        "**Hosted:** `{}`\n**Leeched:** `{}`\n**Ratio (Host — Leech):** {}",
        stats.hosts,
        stats.leeches,
        stats.ratio_text()
    );

    Ok(Json(DataResponse {
        data: StatsResponse {
            user_id,
            period,
            total: stats.total(),
            host_ratio: stats.host_ratio(),
            leech_ratio: stats.leech_ratio(),
            stats,
            text,
        },
    }))
}

/// GET /api/v1/leaderboard?period=all|monthly
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Query(params): Query<PeriodParams>,
) -> AppResult<impl IntoResponse> {
    let period = parse_period(&params)?;
    let since = period.since();

    let total_hosted = MissionHistoryRepo::global_host_total(&state.pool, since).await?;
    let entries = MissionHistoryRepo::leaderboard(&state.pool, since, LEADERBOARD_SIZE).await?;

    let description = format!(
        "A total of **{total_hosted}** missions have been hosted!\n\n{}",
        leaderboard_lines(&entries)
    );

    Ok(Json(DataResponse {
        data: LeaderboardResponse {
            period,
            title: format!("{LEADERBOARD_TITLE} ({})", period.label()),
            description,
            color: MILESTONE_COLOR,
            total_hosted,
            entries,
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn params(period: Option<&str>) -> PeriodParams {
        PeriodParams {
            period: period.map(str::to_string),
        }
    }

    #[test]
    fn period_defaults_to_all_time() {
        assert_eq!(parse_period(&params(None)).unwrap(), Period::All);
        assert_eq!(parse_period(&params(Some(""))).unwrap(), Period::All);
        assert_eq!(parse_period(&params(Some("monthly"))).unwrap(), Period::Monthly);
    }

    #[test]
    fn unknown_period_is_rejected() {
        assert_matches!(parse_period(&params(Some("weekly"))), Err(AppError::BadRequest(_)));
    }

    #[test]
    fn monthly_period_starts_on_the_first() {
        let since = Period::Monthly.since().unwrap();
        assert_eq!(since.format("%d %H:%M").to_string(), "01 00:00");
        assert!(Period::All.since().is_none());
    }
}
