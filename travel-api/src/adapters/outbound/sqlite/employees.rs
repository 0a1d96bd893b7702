use async_trait::async_trait;
use sqlx::SqlitePool;

use super::storage_error;
use crate::domain::{
    models::{Employee, EmployeeId, NewEmployee},
    ports::outbound::EmployeeRepository,
    TravelError,
};

#[derive(sqlx::FromRow)]
struct EmployeeRow {
    id: i64,
    fio: String,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Employee::new(row.id, row.fio)
    }
}

pub struct SqliteEmployeeRepository {
    pool: SqlitePool,
}

impl SqliteEmployeeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeRepository for SqliteEmployeeRepository {
    async fn list(&self) -> Result<Vec<Employee>, TravelError> {
        let rows = sqlx::query_as::<_, EmployeeRow>(
            r#"
            SELECT id, fio
            FROM employees
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(rows.into_iter().map(Employee::from).collect())
    }

    async fn get(&self, id: EmployeeId) -> Result<Option<Employee>, TravelError> {
        let row = sqlx::query_as::<_, EmployeeRow>(
            r#"
            SELECT id, fio
            FROM employees
            WHERE id = ?
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(row.map(Employee::from))
    }

    async fn insert(&self, employee: &NewEmployee) -> Result<Employee, TravelError> {
        let row = sqlx::query_as::<_, EmployeeRow>(
            r#"
            INSERT INTO employees (fio)
            VALUES (?)
            RETURNING id, fio
            "#,
        )
        .bind(&employee.fio)
        .fetch_one(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(row.into())
    }

    async fn update(&self, employee: &Employee) -> Result<(), TravelError> {
        sqlx::query(
            r#"
            UPDATE employees
            SET fio = ?
            WHERE id = ?
            "#,
        )
        .bind(&employee.fio)
        .bind(employee.id.as_i64())
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(())
    }

    async fn delete(&self, id: EmployeeId) -> Result<bool, TravelError> {
        let result = sqlx::query(
            r#"
            DELETE FROM employees
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::sqlite::memory_pool;

    #[tokio::test]
    async fn insert_then_list_in_id_order() {
        let repo = SqliteEmployeeRepository::new(memory_pool().await);
        for fio in ["Б", "А"] {
            repo.insert(&NewEmployee {
                fio: fio.to_string(),
            })
            .await
            .unwrap();
        }

        let fios: Vec<_> = repo.list().await.unwrap().into_iter().map(|e| e.fio).collect();

        assert_eq!(fios, ["Б", "А"]);
    }

    #[tokio::test]
    async fn delete_reports_whether_a_row_was_removed() {
        let repo = SqliteEmployeeRepository::new(memory_pool().await);
        let employee = repo
            .insert(&NewEmployee {
                fio: "Орлов Олег".to_string(),
            })
            .await
            .unwrap();

        assert!(repo.delete(employee.id).await.unwrap());
        assert!(!repo.delete(employee.id).await.unwrap());
    }
}
