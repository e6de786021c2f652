//! Stats and leaderboard text.

use chrono::{DateTime, Datelike, TimeZone, Utc};
use serde::Serialize;

/// Host/leech counts for one user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UserStats {
    pub hosts: i64,
    pub leeches: i64,
}

impl UserStats {
    pub fn total(&self) -> i64 {
        self.hosts + self.leeches
    }

    fn percent(&self, part: i64) -> i64 {
        match self.total() {
            0 => 0,
            total => ((part as f64 / total as f64) * 100.0).round() as i64,
        }
    }

    pub fn host_ratio(&self) -> i64 {
        self.percent(self.hosts)
    }

    pub fn leech_ratio(&self) -> i64 {
        self.percent(self.leeches)
    }

    /// `` `75%` — `25%` ``
    pub fn ratio_text(&self) -> String {
        format!("`{}%` — `{}%`", self.host_ratio(), self.leech_ratio())
    }
}

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    pub user_id: String,
    pub count: i64,
}

pub const EMPTY_LEADERBOARD: &str = "No data yet.";

pub fn leaderboard_lines(entries: &[LeaderboardEntry]) -> String {
    if entries.is_empty() {
        return EMPTY_LEADERBOARD.to_string();
    }
    entries
        .iter()
        .enumerate()
        .map(|(i, e)| format!("**{}.** <@{}> — `{}` hosts", i + 1, e.user_id, e.count))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Midnight UTC on the first day of `now`'s month.
pub fn start_of_month(now: DateTime<Utc>) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
        .single()
        .unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratios_round_and_handle_zero() {
        let s = UserStats { hosts: 2, leeches: 1 };
        assert_eq!(s.total(), 3);
        assert_eq!(s.host_ratio(), 67);
        assert_eq!(s.leech_ratio(), 33);
        assert_eq!(UserStats::default().host_ratio(), 0);
        assert_eq!(s.ratio_text(), "`67%` — `33%`");
    }

    #[test]
    fn leaderboard_text() {
        assert_eq!(leaderboard_lines(&[]), EMPTY_LEADERBOARD);
        let rows = vec![
            LeaderboardEntry { user_id: "1".into(), count: 40 },
            LeaderboardEntry { user_id: "2".into(), count: 7 },
        ];
        assert_eq!(
            leaderboard_lines(&rows),
            "**1.** <@1> — `40` hosts\n**2.** <@2> — `7` hosts"
        );
    }

    #[test]
    fn month_start() {
        let now = Utc.with_ymd_and_hms(2026, 10, 17, 15, 30, 0).unwrap();
        assert_eq!(
            start_of_month(now),
            Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap()
        );
    }
}
