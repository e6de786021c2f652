//! Repository for the `mission_history` table.

use sqlx::PgPool;
use stormscout_core::leaderboard::{LeaderboardEntry, UserStats};
use stormscout_core::milestones::ActivityKind;
use stormscout_core::types::Timestamp;

use crate::models::mission::{MissionRecord, UserCount};

/// Column list for `mission_history` queries.
const COLUMNS: &str = "id, user_id, activity, message_id, bot_reply_id, recorded_at";

/// Host/leech counter store.
pub struct MissionHistoryRepo;

impl MissionHistoryRepo {
    /// Record the `iterations` missions one chat message stands for and
    /// return the user's new count for `activity`.
    ///
    /// Returns `None` when the message was recorded before. The unique
    /// `(message_id, iteration)` index makes concurrent redeliveries insert
    /// nothing instead of counting twice.
    pub async fn record_message(
        pool: &PgPool,
        user_id: &str,
        activity: ActivityKind,
        message_id: &str,
        iterations: i64,
    ) -> Result<Option<i64>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let inserted = sqlx::query(
            "INSERT INTO mission_history (user_id, activity, message_id, iteration) \
             SELECT $1, $2, $3, g FROM generate_series(1, $4) AS g \
             ON CONFLICT DO NOTHING",
        )
        .bind(user_id)
        .bind(activity.as_str())
        .bind(message_id)
        .bind(iterations)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if inserted == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        let count = Self::count_in(&mut tx, user_id, activity).await?;
        tx.commit().await?;
        Ok(Some(count))
    }

    /// Insert `amount` records not tied to any message in one transaction
    /// and return the new count.
    pub async fn record_many(
        pool: &PgPool,
        user_id: &str,
        activity: ActivityKind,
        amount: i64,
    ) -> Result<i64, sqlx::Error> {
        let mut tx = pool.begin().await?;
        sqlx::query(
            "INSERT INTO mission_history (user_id, activity) \
             SELECT $1, $2 FROM generate_series(1, $3)",
        )
        .bind(user_id)
        .bind(activity.as_str())
        .bind(amount)
        .execute(&mut *tx)
        .await?;

        let count = Self::count_in(&mut tx, user_id, activity).await?;
        tx.commit().await?;
        Ok(count)
    }

    async fn count_in(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        user_id: &str,
        activity: ActivityKind,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM mission_history WHERE user_id = $1 AND activity = $2",
        )
        .bind(user_id)
        .bind(activity.as_str())
        .fetch_one(&mut **tx)
        .await
    }

    pub async fn count(
        pool: &PgPool,
        user_id: &str,
        activity: ActivityKind,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM mission_history WHERE user_id = $1 AND activity = $2",
        )
        .bind(user_id)
        .bind(activity.as_str())
        .fetch_one(pool)
        .await
    }

    /// First record created from a chat message.
    pub async fn find_by_message(
        pool: &PgPool,
        message_id: &str,
    ) -> Result<Option<MissionRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM mission_history WHERE message_id = $1 ORDER BY id LIMIT 1"
        );
        sqlx::query_as::<_, MissionRecord>(&query)
            .bind(message_id)
            .fetch_optional(pool)
            .await
    }

    /// Remember the bot's reply on every record of a message.
    pub async fn set_bot_reply(
        pool: &PgPool,
        message_id: &str,
        bot_reply_id: &str,
    ) -> Result<u64, sqlx::Error> {
        let result =
            sqlx::query("UPDATE mission_history SET bot_reply_id = $2 WHERE message_id = $1")
                .bind(message_id)
                .bind(bot_reply_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected())
    }

    pub async fn bot_reply_for(
        pool: &PgPool,
        message_id: &str,
    ) -> Result<Option<String>, sqlx::Error> {
        let reply: Option<Option<String>> = sqlx::query_scalar(
            "SELECT bot_reply_id FROM mission_history \
             WHERE message_id = $1 AND bot_reply_id IS NOT NULL LIMIT 1",
        )
        .bind(message_id)
        .fetch_optional(pool)
        .await?;
        Ok(reply.flatten())
    }

    /// Delete every record of a message. Returns the number removed.
    pub async fn delete_by_message(pool: &PgPool, message_id: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM mission_history WHERE message_id = $1")
            .bind(message_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Host and leech counts, optionally only since `since`.
    pub async fn user_stats(
        pool: &PgPool,
        user_id: &str,
        since: Option<Timestamp>,
    ) -> Result<UserStats, sqlx::Error> {
        let (hosts, leeches): (i64, i64) = sqlx::query_as(
            "SELECT \
                COUNT(*) FILTER (WHERE activity = 'host'), \
                COUNT(*) FILTER (WHERE activity = 'leech') \
             FROM mission_history \
             WHERE user_id = $1 AND ($2::timestamptz IS NULL OR recorded_at >= $2)",
        )
        .bind(user_id)
        .bind(since)
        .fetch_one(pool)
        .await?;
        Ok(UserStats { hosts, leeches })
    }

    pub async fn global_host_total(
        pool: &PgPool,
        since: Option<Timestamp>,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM mission_history \
             WHERE activity = 'host' AND ($1::timestamptz IS NULL OR recorded_at >= $1)",
        )
        .bind(since)
        .fetch_one(pool)
        .await
    }

    /// Top hosts, ties broken by user id.
    pub async fn leaderboard(
        pool: &PgPool,
        since: Option<Timestamp>,
        limit: i64,
    ) -> Result<Vec<LeaderboardEntry>, sqlx::Error> {
        let rows = sqlx::query_as::<_, UserCount>(
            "SELECT user_id, COUNT(*) AS count FROM mission_history \
             WHERE activity = 'host' AND ($1::timestamptz IS NULL OR recorded_at >= $1) \
             GROUP BY user_id \
             ORDER BY count DESC, user_id \
             LIMIT $2",
        )
        .bind(since)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| LeaderboardEntry {
                user_id: r.user_id,
                count: r.count,
            })
            .collect())
    }

    /// Delete a user's newest `amount` records of one activity. Returns the
    /// number removed.
    pub async fn remove_latest(
        pool: &PgPool,
        user_id: &str,
        activity: ActivityKind,
        amount: i64,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM mission_history WHERE id IN ( \
                SELECT id FROM mission_history \
                WHERE user_id = $1 AND activity = $2 \
                ORDER BY recorded_at DESC, id DESC \
                LIMIT $3)",
        )
        .bind(user_id)
        .bind(activity.as_str())
        .bind(amount)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Move every record from one user to another. Returns the number moved.
    pub async fn transfer(pool: &PgPool, from_user: &str, to_user: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("UPDATE mission_history SET user_id = $2 WHERE user_id = $1")
            .bind(from_user)
            .bind(to_user)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
