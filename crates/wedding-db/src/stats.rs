use chrono::{Days, Local, NaiveDate};
use rusqlite::params;
use tracing::{debug, warn};

use wedding_types::models::{LikeStats, TrendPoint};

use crate::{AggregationParseError, Database, Result};

/// Number of distinct like-bearing dates in the trend, and the width of the
/// weekly window (today included).
const WINDOW_DAYS: u64 = 7;

/// `?1` today, `?2` first day of the weekly window, `?3` trend length.
///
/// The trend is built in SQL as a JSON array, newest date first. Rows with
/// no timestamp count toward the total only.
const STATS_SQL: &str = "
    WITH daily AS (
        SELECT date(created_at) AS day, COUNT(*) AS count
        FROM likes
        WHERE date(created_at) IS NOT NULL
        GROUP BY day
        ORDER BY day DESC
        LIMIT ?3
    )
    SELECT
        (SELECT COUNT(*) FROM likes),
        (SELECT COUNT(*) FROM likes WHERE date(created_at) = ?1),
        (SELECT COUNT(*) FROM likes WHERE date(created_at) BETWEEN ?2 AND ?1),
        (SELECT json_group_array(json_object(
                    'date', day,
                    'count', count,
                    'percentage', COALESCE(
                        CAST(ROUND(count * 100.0 / NULLIF((SELECT MAX(count) FROM daily), 0)) AS INTEGER),
                        0)))
         FROM (SELECT day, count FROM daily ORDER BY day DESC))
";

impl Database {
    pub fn like_stats(&self) -> Result<LikeStats> {
        self.like_stats_on(Local::now().date_naive())
    }

    /// Stats as seen on the local calendar date `today`.
    pub fn like_stats_on(&self, today: NaiveDate) -> Result<LikeStats> {
        let week_start = today
            .checked_sub_days(Days::new(WINDOW_DAYS - 1))
            .unwrap_or(NaiveDate::MIN);

        let (total_likes, today_likes, weekly_likes, payload) = self.with_conn(|conn| {
            Ok(conn.query_row(
                STATS_SQL,
                params![
                    today.format("%Y-%m-%d").to_string(),
                    week_start.format("%Y-%m-%d").to_string(),
                    WINDOW_DAYS as i64,
                ],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, i64>(1)?,
                        row.get::<_, i64>(2)?,
                        row.get::<_, Option<String>>(3)?,
                    ))
                },
            )?)
        })?;

        let trend = decode_trend(payload.as_deref()).unwrap_or_else(|e| {
            warn!("Discarding like trend: {}", e);
            Vec::new()
        });

        let stats = LikeStats {
            total_likes,
            today_likes,
            weekly_likes,
            trend,
        };
        debug!(
            "Like stats: total={} today={} weekly={} trend_days={}",
            stats.total_likes,
            stats.today_likes,
            stats.weekly_likes,
            stats.trend.len()
        );
        Ok(stats)
    }
}

/// Decode the newest-first JSON trend and flip it to oldest-first.
pub fn decode_trend(
    payload: Option<&str>,
) -> std::result::Result<Vec<TrendPoint>, AggregationParseError> {
    let mut trend: Vec<TrendPoint> = serde_json::from_str(payload.unwrap_or("[]"))?;
    trend.reverse();
    Ok(trend)
}
