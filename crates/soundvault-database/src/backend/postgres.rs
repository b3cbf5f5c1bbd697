//! PostgreSQL storage backend.
//!
//! Builds SQL dynamically from the static schema descriptions, so the
//! backend needs no per-entity queries. The connection pool is expected
//! to point at a database running with serializable isolation; the
//! engine layers no in-process locking on top.

use async_trait::async_trait;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::{PgPool, Postgres, Row as SqlxRow};
use uuid::Uuid;

use soundvault_core::error::{AppError, ErrorKind};
use soundvault_core::AppResult;
use soundvault_core::types::{ColumnDef, ColumnType, Row, TableSchema, Value};

use super::{Backend, Transaction};

/// PostgreSQL relational backend over a sqlx connection pool.
#[derive(Debug, Clone)]
pub struct PostgresBackend {
    pool: PgPool,
}

impl PostgresBackend {
    /// Create a new backend over an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Backend for PostgresBackend {
    async fn begin(&self) -> AppResult<Box<dyn Transaction>> {
        let tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;
        Ok(Box::new(PostgresTransaction { tx }))
    }
}

struct PostgresTransaction {
    tx: sqlx::Transaction<'static, Postgres>,
}

#[async_trait]
impl Transaction for PostgresTransaction {
    async fn select(
        &mut self,
        schema: &'static TableSchema,
        filter: Option<(&str, &Value)>,
    ) -> AppResult<Vec<Row>> {
        let pk = primary_key(schema)?;
        let columns = column_list(schema);

        let sql = match filter {
            Some((column, _)) => format!(
                "SELECT {columns} FROM {} WHERE {column} = $1 ORDER BY created_at ASC, {} ASC",
                schema.table, pk.name
            ),
            None => format!(
                "SELECT {columns} FROM {} ORDER BY created_at ASC, {} ASC",
                schema.table, pk.name
            ),
        };

        let mut query = sqlx::query(&sql);
        if let Some((column, value)) = filter {
            let col = schema
                .column(column)
                .ok_or_else(|| AppError::schema(format!("unknown column '{column}'")))?;
            query = bind_value(query, col, value)?;
        }

        let rows = query.fetch_all(&mut *self.tx).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to select from {}", schema.table),
                e,
            )
        })?;

        rows.iter().map(|r| decode_row(schema, r)).collect()
    }

    async fn insert(&mut self, schema: &'static TableSchema, row: &Row) -> AppResult<()> {
        let columns = column_list(schema);
        let placeholders = (1..=schema.columns.len())
            .map(|n| format!("${n}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "INSERT INTO {} ({columns}) VALUES ({placeholders})",
            schema.table
        );

        let mut query = sqlx::query(&sql);
        for col in schema.columns {
            query = bind_value(query, col, &row.get_or_null(col.name))?;
        }

        query.execute(&mut *self.tx).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to insert into {}", schema.table),
                e,
            )
        })?;
        Ok(())
    }

    async fn update(&mut self, schema: &'static TableSchema, row: &Row) -> AppResult<()> {
        let pk = primary_key(schema)?;
        let assignments = schema
            .columns
            .iter()
            .filter(|c| !c.primary_key)
            .enumerate()
            .map(|(i, c)| format!("{} = ${}", c.name, i + 2))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE {} SET {assignments} WHERE {} = $1",
            schema.table, pk.name
        );

        let mut query = sqlx::query(&sql);
        query = bind_value(query, pk, &row.get_or_null(pk.name))?;
        for col in schema.columns.iter().filter(|c| !c.primary_key) {
            query = bind_value(query, col, &row.get_or_null(col.name))?;
        }

        query.execute(&mut *self.tx).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to update {}", schema.table),
                e,
            )
        })?;
        Ok(())
    }

    async fn delete(&mut self, schema: &'static TableSchema, id: &Value) -> AppResult<()> {
        let pk = primary_key(schema)?;
        let sql = format!("DELETE FROM {} WHERE {} = $1", schema.table, pk.name);

        let query = bind_value(sqlx::query(&sql), pk, id)?;
        query.execute(&mut *self.tx).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to delete from {}", schema.table),
                e,
            )
        })?;
        Ok(())
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        self.tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })
    }

    async fn rollback(self: Box<Self>) -> AppResult<()> {
        self.tx.rollback().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to roll back transaction", e)
        })
    }
}

fn primary_key(schema: &'static TableSchema) -> AppResult<&'static ColumnDef> {
    schema
        .primary_key()
        .ok_or_else(|| AppError::schema(format!("table '{}' has no primary key", schema.table)))
}

fn column_list(schema: &'static TableSchema) -> String {
    schema
        .columns
        .iter()
        .map(|c| c.name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Bind a dynamic value with the static type declared for its column.
fn bind_value<'q>(
    query: Query<'q, Postgres, PgArguments>,
    col: &'static ColumnDef,
    value: &Value,
) -> AppResult<Query<'q, Postgres, PgArguments>> {
    if !value.is_null() && !matches_type(col.ty, value) {
        return Err(AppError::internal(format!(
            "value of type {} bound to {:?} column '{}'",
            value.type_name(),
            col.ty,
            col.name
        )));
    }
    Ok(match col.ty {
        ColumnType::Uuid => query.bind(value.as_uuid()),
        ColumnType::Text => query.bind(value.as_text().map(str::to_string)),
        ColumnType::Integer => query.bind(value.as_integer()),
        ColumnType::Boolean => query.bind(value.as_boolean()),
    })
}

fn matches_type(ty: ColumnType, value: &Value) -> bool {
    matches!(
        (ty, value),
        (ColumnType::Uuid, Value::Uuid(_))
            | (ColumnType::Text, Value::Text(_))
            | (ColumnType::Integer, Value::Integer(_))
            | (ColumnType::Boolean, Value::Boolean(_))
    )
}

/// Decode one database row into the dynamic representation, column by
/// column as declared in the schema.
fn decode_row(schema: &'static TableSchema, pg_row: &PgRow) -> AppResult<Row> {
    let mut row = Row::new();
    for col in schema.columns {
        let value = match col.ty {
            ColumnType::Uuid => pg_row
                .try_get::<Option<Uuid>, _>(col.name)
                .map(|v| v.map(Value::Uuid)),
            ColumnType::Text => pg_row
                .try_get::<Option<String>, _>(col.name)
                .map(|v| v.map(Value::Text)),
            ColumnType::Integer => pg_row
                .try_get::<Option<i64>, _>(col.name)
                .map(|v| v.map(Value::Integer)),
            ColumnType::Boolean => pg_row
                .try_get::<Option<bool>, _>(col.name)
                .map(|v| v.map(Value::Boolean)),
        }
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to decode column '{}'", col.name),
                e,
            )
        })?
        .unwrap_or(Value::Null);
        row.set(col.name, value);
    }
    Ok(row)
}
