use async_trait::async_trait;
use sqlx::SqlitePool;

use super::storage_error;
use crate::domain::{
    models::{ExpenseType, ExpenseTypeId, NewExpenseType},
    ports::outbound::ExpenseTypeRepository,
    TravelError,
};

#[derive(sqlx::FromRow)]
struct ExpenseTypeRow {
    id: i64,
    name: String,
}

impl From<ExpenseTypeRow> for ExpenseType {
    fn from(row: ExpenseTypeRow) -> Self {
        ExpenseType::new(row.id, row.name)
    }
}

/// Maps a `UNIQUE (name)` violation to its domain error.
fn write_error(err: sqlx::Error) -> TravelError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            TravelError::DuplicateExpenseTypeName
        }
        _ => storage_error(err),
    }
}

pub struct SqliteExpenseTypeRepository {
    pool: SqlitePool,
}

impl SqliteExpenseTypeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ExpenseTypeRepository for SqliteExpenseTypeRepository {
    async fn list(&self) -> Result<Vec<ExpenseType>, TravelError> {
        let rows = sqlx::query_as::<_, ExpenseTypeRow>(
            r#"
            SELECT id, name
            FROM expense_types
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(rows.into_iter().map(ExpenseType::from).collect())
    }

    async fn get(&self, id: ExpenseTypeId) -> Result<Option<ExpenseType>, TravelError> {
        let row = sqlx::query_as::<_, ExpenseTypeRow>(
            r#"
            SELECT id, name
            FROM expense_types
            WHERE id = ?
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(row.map(ExpenseType::from))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<ExpenseType>, TravelError> {
        let row = sqlx::query_as::<_, ExpenseTypeRow>(
            r#"
            SELECT id, name
            FROM expense_types
            WHERE name = ?
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(row.map(ExpenseType::from))
    }

    async fn insert(&self, expense_type: &NewExpenseType) -> Result<ExpenseType, TravelError> {
        let row = sqlx::query_as::<_, ExpenseTypeRow>(
            r#"
            INSERT INTO expense_types (name)
            VALUES (?)
            RETURNING id, name
            "#,
        )
        .bind(&expense_type.name)
        .fetch_one(&self.pool)
        .await
        .map_err(write_error)?;

        Ok(row.into())
    }

    async fn update(&self, expense_type: &ExpenseType) -> Result<(), TravelError> {
        sqlx::query(
            r#"
            UPDATE expense_types
            SET name = ?
            WHERE id = ?
            "#,
        )
        .bind(&expense_type.name)
        .bind(expense_type.id.as_i64())
        .execute(&self.pool)
        .await
        .map_err(write_error)?;

        Ok(())
    }

    async fn delete(&self, id: ExpenseTypeId) -> Result<bool, TravelError> {
        let result = sqlx::query(
            r#"
            DELETE FROM expense_types
            WHERE id = ?
            "#,
        )
        .bind(id.as_i64())
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(result.rows_affected() > 0)
    }
}
