//! SQLite-backed sentence queue and object store.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use super::{ObjectStore, Sentence, SentenceStore};
use crate::dispatcher::ObjectBinding;
use crate::error::{StoreError, StoreResult};
use crate::literal::parse_literal;

/// Create the `sentences` and `objects` tables when absent.
pub async fn init_schema(pool: &SqlitePool) -> StoreResult<()> {
    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS sentences (
               id INTEGER PRIMARY KEY AUTOINCREMENT,
               sentence TEXT NOT NULL,
               processed BOOLEAN NOT NULL DEFAULT 0
           )"#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS objects (
               id INTEGER PRIMARY KEY AUTOINCREMENT,
               name TEXT NOT NULL,
               value TEXT NOT NULL
           )"#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Sentence queue over the `sentences` table.
#[derive(Clone)]
pub struct SqliteSentenceStore {
    pool: SqlitePool,
}

impl SqliteSentenceStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Append a sentence to the queue, returning its id.
    pub async fn enqueue(&self, text: &str) -> StoreResult<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO sentences (sentence) VALUES ($1) RETURNING id",
        )
        .bind(text)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    pub async fn pending_count(&self) -> StoreResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM sentences WHERE processed = 0",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}

#[async_trait]
impl SentenceStore for SqliteSentenceStore {
    async fn next_unprocessed(&self) -> StoreResult<Option<Sentence>> {
        // Single statement keeps fetch-and-mark atomic, even with several
        // drivers sharing the queue.
        let row = sqlx::query(
            r#"UPDATE sentences
               SET processed = 1
               WHERE id = (
                   SELECT id FROM sentences WHERE processed = 0 ORDER BY id LIMIT 1
               )
               RETURNING id, sentence"#,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| Sentence {
            id: r.get("id"),
            text: r.get("sentence"),
        }))
    }
}

/// Named value store over the `objects` table.
#[derive(Clone)]
pub struct SqliteObjectStore {
    pool: SqlitePool,
}

impl SqliteObjectStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Store a name/literal pair. Literals are validated on read.
    pub async fn put(&self, name: &str, literal: &str) -> StoreResult<()> {
        sqlx::query("INSERT INTO objects (name, value) VALUES ($1, $2)")
            .bind(name)
            .bind(literal)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl ObjectStore for SqliteObjectStore {
    async fn snapshot(&self) -> StoreResult<ObjectBinding> {
        let rows = sqlx::query("SELECT name, value FROM objects ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        let mut values = HashMap::new();
        for row in rows {
            let name: String = row.get("name");
            let text: String = row.get("value");
            let value = parse_literal(&text).map_err(|_| StoreError::InvalidLiteral {
                name: name.clone(),
                text: text.clone(),
            })?;
            values.insert(name, value);
        }
        Ok(ObjectBinding::new(values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory pool");
        init_schema(&pool).await.expect("schema");
        pool
    }

    #[tokio::test]
    async fn test_fetch_marks_processed() {
        let store = SqliteSentenceStore::new(test_pool().await);
        store.enqueue("first sentence").await.unwrap();
        store.enqueue("second sentence").await.unwrap();

        let first = store.next_unprocessed().await.unwrap().expect("first");
        let second = store.next_unprocessed().await.unwrap().expect("second");
        assert_eq!(first.text, "first sentence");
        assert_eq!(second.text, "second sentence");
        assert_ne!(first.id, second.id);
        assert!(store.next_unprocessed().await.unwrap().is_none());
        assert_eq!(store.pending_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_snapshot_decodes_literals() {
        let pool = test_pool().await;
        let store = SqliteObjectStore::new(pool);
        store.put("greeting", "'Hello'").await.unwrap();
        store.put("number", "42").await.unwrap();
        store.put("flag", "True").await.unwrap();

        let binding = store.snapshot().await.unwrap();
        assert_eq!(binding.get("greeting"), Some(&Value::Str("Hello".into())));
        assert_eq!(binding.get("number"), Some(&Value::Num(42.0)));
        assert_eq!(binding.get("flag"), Some(&Value::Bool(true)));
        assert!(binding.get("missing").is_none());
    }

    #[tokio::test]
    async fn test_invalid_literal_is_store_error() {
        let pool = test_pool().await;
        let store = SqliteObjectStore::new(pool);
        store.put("payload", "__import__('os')").await.unwrap();

        let err = store.snapshot().await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::InvalidLiteral { ref name, .. } if name == "payload"
        ));
    }
}
