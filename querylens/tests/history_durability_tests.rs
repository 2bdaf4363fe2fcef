mod common;

use querylens::db::{Database, HistoryStore, LibSqlBackend};
use tempfile::TempDir;

use common::{database_config, init_test_logger};

#[tokio::test]
async fn test_history_survives_reopen() {
    init_test_logger();
    let dir = TempDir::new().unwrap();
    let url = format!("file:{}", dir.path().join("search_history.db").display());

    {
        let backend = LibSqlBackend::new(Database::new(&database_config(url.clone())).await.unwrap());
        backend.append_history("first question").await.unwrap();
        backend.append_history("second question").await.unwrap();
    }

    let backend = LibSqlBackend::new(Database::new(&database_config(url)).await.unwrap());
    let recent = backend.recent_history(10).await.unwrap();
    let queries: Vec<&str> = recent.iter().map(|e| e.query.as_str()).collect();

    assert_eq!(queries, vec!["second question", "first question"]);
    assert!(recent[0].id > recent[1].id);
}

#[tokio::test]
async fn test_ids_keep_increasing_after_reopen() {
    init_test_logger();
    let dir = TempDir::new().unwrap();
    let url = format!("file:{}", dir.path().join("ids.db").display());

    let first = {
        let backend = LibSqlBackend::new(Database::new(&database_config(url.clone())).await.unwrap());
        backend.append_history("before restart").await.unwrap()
    };

    let backend = LibSqlBackend::new(Database::new(&database_config(url)).await.unwrap());
    let second = backend.append_history("after restart").await.unwrap();

    assert!(second.id > first.id);
    assert_eq!(backend.count_history().await.unwrap(), 2);
}
