use libsql::Connection;

use crate::error::Result;

pub async fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        -- Recent query log, append-only
        CREATE TABLE IF NOT EXISTS history (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            query TEXT NOT NULL,
            timestamp TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_history_timestamp ON history(timestamp);
        "#,
    )
    .await?;

    Ok(())
}
