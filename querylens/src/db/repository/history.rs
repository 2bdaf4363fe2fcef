use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use libsql::{params, Connection};

use crate::error::{QueryLensError, Result};
use crate::models::HistoryEntry;

pub struct HistoryRepository;

impl HistoryRepository {
    /// Insert a query, assigning its id and timestamp.
    pub async fn append(conn: &Connection, query: &str) -> Result<HistoryEntry> {
        // Matches the stored precision.
        let timestamp = Utc::now().trunc_subsecs(6);

        conn.execute(
            r#"
            INSERT INTO history (query, timestamp)
            VALUES (?1, ?2)
            "#,
            params![query, format_timestamp(&timestamp)],
        )
        .await?;

        Ok(HistoryEntry {
            id: conn.last_insert_rowid(),
            query: query.to_string(),
            timestamp,
        })
    }

    /// Most recent entries first. Entries sharing a timestamp fall back to
    /// insertion order.
    pub async fn recent(conn: &Connection, limit: u32) -> Result<Vec<HistoryEntry>> {
        let mut rows = conn
            .query(
                r#"
                SELECT id, query, timestamp
                FROM history
                ORDER BY timestamp DESC, id DESC
                LIMIT ?1
                "#,
                params![limit as i64],
            )
            .await?;

        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            results.push(Self::row_to_entry(&row)?);
        }

        Ok(results)
    }

    pub async fn count(conn: &Connection) -> Result<u64> {
        let mut rows = conn.query("SELECT COUNT(*) FROM history", ()).await?;
        let count = match rows.next().await? {
            Some(row) => row.get::<i64>(0)?,
            None => 0,
        };
        Ok(count.max(0) as u64)
    }

    fn row_to_entry(row: &libsql::Row) -> Result<HistoryEntry> {
        Ok(HistoryEntry {
            id: row.get(0)?,
            query: row.get(1)?,
            timestamp: parse_timestamp(&row.get::<String>(2)?)?,
        })
    }
}

/// Fixed-width UTC form so that text ordering matches time ordering.
fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Accepts RFC 3339 as well as SQLite's `CURRENT_TIMESTAMP` layout.
fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|error| {
            QueryLensError::Internal(format!("Unparseable history timestamp '{value}': {error}"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::init_schema;

    async fn setup_test_db() -> Connection {
        let conn = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .unwrap()
            .connect()
            .unwrap();

        init_schema(&conn).await.unwrap();

        conn
    }

    #[tokio::test]
    async fn test_append_assigns_monotonic_ids() {
        let conn = setup_test_db().await;

        let first = HistoryRepository::append(&conn, "first").await.unwrap();
        let second = HistoryRepository::append(&conn, "second").await.unwrap();

        assert_eq!(first.query, "first");
        assert!(second.id > first.id);
        assert!(second.timestamp >= first.timestamp);
    }

    #[tokio::test]
    async fn test_recent_returns_newest_first_and_respects_limit() {
        let conn = setup_test_db().await;

        for i in 0..15 {
            HistoryRepository::append(&conn, &format!("query {i}"))
                .await
                .unwrap();
        }

        let recent = HistoryRepository::recent(&conn, 10).await.unwrap();
        let queries: Vec<&str> = recent.iter().map(|e| e.query.as_str()).collect();
        let expected: Vec<String> = (5..15).rev().map(|i| format!("query {i}")).collect();

        assert_eq!(queries, expected);
    }

    #[tokio::test]
    async fn test_recent_with_fewer_entries_than_limit() {
        let conn = setup_test_db().await;

        HistoryRepository::append(&conn, "only one").await.unwrap();

        let recent = HistoryRepository::recent(&conn, 10).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].query, "only one");
    }

    #[tokio::test]
    async fn test_recent_breaks_timestamp_ties_by_id() {
        let conn = setup_test_db().await;

        for query in ["a", "b", "c"] {
            conn.execute(
                "INSERT INTO history (query, timestamp) VALUES (?1, '2025-01-01 10:00:00')",
                params![query],
            )
            .await
            .unwrap();
        }

        let recent = HistoryRepository::recent(&conn, 10).await.unwrap();
        let queries: Vec<&str> = recent.iter().map(|e| e.query.as_str()).collect();
        assert_eq!(queries, vec!["c", "b", "a"]);
        assert_eq!(recent[0].timestamp.to_rfc3339(), "2025-01-01T10:00:00+00:00");
    }

    #[tokio::test]
    async fn test_count() {
        let conn = setup_test_db().await;
        assert_eq!(HistoryRepository::count(&conn).await.unwrap(), 0);

        HistoryRepository::append(&conn, "one").await.unwrap();
        HistoryRepository::append(&conn, "two").await.unwrap();
        assert_eq!(HistoryRepository::count(&conn).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_recent_rejects_corrupt_timestamp() {
        let conn = setup_test_db().await;

        conn.execute(
            "INSERT INTO history (query, timestamp) VALUES ('broken', 'yesterday-ish')",
            (),
        )
        .await
        .unwrap();

        let result = HistoryRepository::recent(&conn, 10).await;
        assert!(matches!(result, Err(QueryLensError::Internal(msg)) if msg.contains("yesterday-ish")));
    }

    #[test]
    fn test_timestamp_format_is_fixed_width() {
        let a = format_timestamp(&Utc::now());
        let b = format_timestamp(&DateTime::<Utc>::UNIX_EPOCH);
        assert_eq!(a.len(), b.len());
        assert!(a.ends_with('Z'));
    }
}
