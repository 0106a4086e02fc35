use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::document::{Document, DocumentStore, FieldValue, Fields};
use crate::domain::errors::StoreError;

/// PostgreSQL implementation of DocumentStore
///
/// Keeps every collection in one `documents` table, with the field map
/// stored as JSONB. Partial updates merge with the `||` operator, so fields
/// absent from the patch are left untouched.
pub struct PostgresDocumentStore {
    pool: PgPool,
}

impl PostgresDocumentStore {
    /// Creates a new PostgresDocumentStore
    ///
    /// # Arguments
    /// * `pool` - SQLx connection pool for PostgreSQL
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the `documents` table if it does not exist yet
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                collection TEXT NOT NULL,
                id TEXT NOT NULL,
                fields JSONB NOT NULL DEFAULT '{}'::jsonb,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                PRIMARY KEY (collection, id)
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| store_error("Failed to create documents table", e))?;

        Ok(())
    }
}

#[async_trait]
impl DocumentStore for PostgresDocumentStore {
    async fn get_all(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, fields
            FROM documents
            WHERE collection = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(collection)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| store_error("Failed to fetch documents", e))?;

        rows.iter().map(document_from_row).collect()
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, fields
            FROM documents
            WHERE collection = $1 AND id = $2
            "#,
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| store_error("Failed to fetch document", e))?;

        row.as_ref().map(document_from_row).transpose()
    }

    async fn set(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO documents (collection, id, fields)
            VALUES ($1, $2, $3)
            ON CONFLICT (collection, id) DO UPDATE SET
                fields = EXCLUDED.fields,
                updated_at = NOW()
            "#,
        )
        .bind(collection)
        .bind(id)
        .bind(Json(fields))
        .execute(&self.pool)
        .await
        .map_err(|e| store_error("Failed to save document", e))?;

        Ok(())
    }

    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE documents
            SET fields = fields || $3, updated_at = NOW()
            WHERE collection = $1 AND id = $2
            "#,
        )
        .bind(collection)
        .bind(id)
        .bind(Json(fields))
        .execute(&self.pool)
        .await
        .map_err(|e| store_error("Failed to update document", e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }

        Ok(())
    }

    async fn add(&self, collection: &str, fields: Fields) -> Result<String, StoreError> {
        let id = Uuid::new_v4().simple().to_string();

        sqlx::query(
            r#"
            INSERT INTO documents (collection, id, fields)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(collection)
        .bind(&id)
        .bind(Json(fields))
        .execute(&self.pool)
        .await
        .map_err(|e| store_error("Failed to add document", e))?;

        Ok(id)
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        // No rows affected is fine: deletes are idempotent.
        sqlx::query(
            r#"
            DELETE FROM documents WHERE collection = $1 AND id = $2
            "#,
        )
        .bind(collection)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| store_error("Failed to delete document", e))?;

        Ok(())
    }
}

fn document_from_row(row: &sqlx::postgres::PgRow) -> Result<Document, StoreError> {
    let id: String = row
        .try_get("id")
        .map_err(|e| store_error("Invalid document row", e))?;
    let Json(raw): Json<serde_json::Map<String, serde_json::Value>> = row
        .try_get("fields")
        .map_err(|e| store_error("Invalid document fields", e))?;

    let fields = raw
        .into_iter()
        .map(|(name, value)| (name, field_value_from_json(value)))
        .collect();

    Ok(Document::new(id, fields))
}

/// Narrows arbitrary JSON to the closed set of field values
///
/// Anything that is not a string, an integer or null reads as `Null`.
fn field_value_from_json(value: serde_json::Value) -> FieldValue {
    match value {
        serde_json::Value::String(s) => FieldValue::String(s),
        serde_json::Value::Number(n) => n.as_i64().map_or(FieldValue::Null, FieldValue::Integer),
        _ => FieldValue::Null,
    }
}

fn store_error(context: &str, err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            StoreError::Unavailable(format!("{}: {}", context, err))
        }
        sqlx::Error::Database(db) if db.code().as_deref() == Some("42501") => {
            StoreError::PermissionDenied(format!("{}: {}", context, err))
        }
        _ => StoreError::Backend(format!("{}: {}", context, err)),
    }
}
