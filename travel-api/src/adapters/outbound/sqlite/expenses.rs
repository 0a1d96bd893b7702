use async_trait::async_trait;
use sqlx::SqlitePool;

use super::storage_error;
use crate::domain::{
    models::{BusinessTripId, Expense, ExpenseId, ExpenseTypeId, NewExpense},
    ports::outbound::ExpenseRepository,
    TravelError,
};

#[derive(sqlx::FromRow)]
struct ExpenseRow {
    id: i64,
    business_trip_id: i64,
    expense_type_id: i64,
    amount: f64,
}

impl From<ExpenseRow> for Expense {
    fn from(row: ExpenseRow) -> Self {
        Expense {
            id: ExpenseId::new(row.id),
            business_trip_id: BusinessTripId::new(row.business_trip_id),
            expense_type_id: ExpenseTypeId::new(row.expense_type_id),
            amount: row.amount,
        }
    }
}

pub struct SqliteExpenseRepository {
    pool: SqlitePool,
}

impl SqliteExpenseRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ExpenseRepository for SqliteExpenseRepository {
    async fn list(&self) -> Result<Vec<Expense>, TravelError> {
        let rows = sqlx::query_as::<_, ExpenseRow>(
            r#"
            SELECT id, business_trip_id, expense_type_id, amount
            FROM expenses
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(rows.into_iter().map(Expense::from).collect())
    }

    async fn list_by_trip(&self, id: BusinessTripId) -> Result<Vec<Expense>, TravelError> {
        let rows = sqlx::query_as::<_, ExpenseRow>(
            r#"
            SELECT id, business_trip_id, expense_type_id, amount
            FROM expenses
            WHERE business_trip_id = ?
            ORDER BY id
            "#,
        )
        .bind(id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(rows.into_iter().map(Expense::from).collect())
    }

    async fn get(&self, id: ExpenseId) -> Result<Option<Expense>, TravelError> {
        let row = sqlx::query_as::<_, ExpenseRow>(
            r#"
            SELECT id, business_trip_id, expense_type_id, amount
            FROM expenses
            WHERE id = ?
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(row.map(Expense::from))
    }

    async fn insert(&self, expense: &NewExpense) -> Result<Expense, TravelError> {
        let row = sqlx::query_as::<_, ExpenseRow>(
            r#"
            INSERT INTO expenses (business_trip_id, expense_type_id, amount)
            VALUES (?, ?, ?)
            RETURNING id, business_trip_id, expense_type_id, amount
            "#,
        )
        .bind(expense.business_trip_id.as_i64())
        .bind(expense.expense_type_id.as_i64())
        .bind(expense.amount)
        .fetch_one(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(row.into())
    }

    async fn update(&self, expense: &Expense) -> Result<(), TravelError> {
        sqlx::query(
            r#"
            UPDATE expenses
            SET business_trip_id = ?, expense_type_id = ?, amount = ?
            WHERE id = ?
            "#,
        )
        .bind(expense.business_trip_id.as_i64())
        .bind(expense.expense_type_id.as_i64())
        .bind(expense.amount)
        .bind(expense.id.as_i64())
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(())
    }

    async fn delete(&self, id: ExpenseId) -> Result<bool, TravelError> {
        let result = sqlx::query(
            r#"
            DELETE FROM expenses
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
