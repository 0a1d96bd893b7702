use async_trait::async_trait;
use sqlx::SqlitePool;

use super::storage_error;
use crate::domain::{
    models::{DestinationTripCount, EmployeeExpenseTotal, EmployeeTripCount, ExpenseTypeTotal},
    ports::outbound::AnalyticsRepository,
    TravelError,
};

#[derive(sqlx::FromRow)]
struct LabelTotalRow {
    label: String,
    total: f64,
}

#[derive(sqlx::FromRow)]
struct LabelCountRow {
    label: Option<String>,
    trip_count: i64,
}

/// Aggregates computed directly in SQL. Ties are broken by label so the
/// output is stable between calls.
pub struct SqliteAnalyticsRepository {
    pool: SqlitePool,
}

impl SqliteAnalyticsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnalyticsRepository for SqliteAnalyticsRepository {
    async fn total_expenses(&self) -> Result<f64, TravelError> {
        sqlx::query_scalar::<_, f64>(
            r#"
            SELECT COALESCE(SUM(amount), 0.0)
            FROM expenses
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(storage_error)
    }

    async fn expenses_by_employee(&self) -> Result<Vec<EmployeeExpenseTotal>, TravelError> {
        let rows = sqlx::query_as::<_, LabelTotalRow>(
            r#"
            SELECT employees.fio AS label, SUM(expenses.amount) AS total
            FROM employees
            JOIN business_trips ON business_trips.employee_id = employees.id
            JOIN expenses ON expenses.business_trip_id = business_trips.id
            GROUP BY employees.fio
            ORDER BY total DESC, label
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(rows
            .into_iter()
            .map(|row| EmployeeExpenseTotal {
                employee: row.label,
                total_expenses: row.total,
            })
            .collect())
    }

    async fn expenses_by_expense_type(&self) -> Result<Vec<ExpenseTypeTotal>, TravelError> {
        let rows = sqlx::query_as::<_, LabelTotalRow>(
            r#"
            SELECT expense_types.name AS label, SUM(expenses.amount) AS total
            FROM expense_types
            JOIN expenses ON expenses.expense_type_id = expense_types.id
            GROUP BY expense_types.name
            ORDER BY total DESC, label
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(rows
            .into_iter()
            .map(|row| ExpenseTypeTotal {
                expense_type: row.label,
                total_expenses: row.total,
            })
            .collect())
    }

    async fn employees_with_most_trips(
        &self,
        limit: u32,
    ) -> Result<Vec<EmployeeTripCount>, TravelError> {
        let rows = sqlx::query_as::<_, LabelCountRow>(
            r#"
            SELECT employees.fio AS label, COUNT(business_trips.id) AS trip_count
            FROM employees
            JOIN business_trips ON business_trips.employee_id = employees.id
            GROUP BY employees.fio
            ORDER BY trip_count DESC, label
            LIMIT ?
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(rows
            .into_iter()
            .map(|row| EmployeeTripCount {
                employee: row.label.unwrap_or_default(),
                trip_count: row.trip_count,
            })
            .collect())
    }

    async fn most_popular_destinations(
        &self,
        limit: u32,
    ) -> Result<Vec<DestinationTripCount>, TravelError> {
        let rows = sqlx::query_as::<_, LabelCountRow>(
            r#"
            SELECT destination AS label, COUNT(*) AS trip_count
            FROM business_trips
            GROUP BY destination
            ORDER BY trip_count DESC, label
            LIMIT ?
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(rows
            .into_iter()
            .map(|row| DestinationTripCount {
                destination: row.label,
                trip_count: row.trip_count,
            })
            .collect())
    }

    async fn average_expense_per_trip(&self) -> Result<f64, TravelError> {
        sqlx::query_scalar::<_, f64>(
            r#"
            SELECT COALESCE(AVG(trip_total), 0.0)
            FROM (
                SELECT SUM(amount) AS trip_total
                FROM expenses
                GROUP BY business_trip_id
            )
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(storage_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::sqlite::{memory_pool, repositories};
    use crate::domain::models::{
        BusinessTripId, EmployeeId, ExpenseTypeId, NewBusinessTrip, NewEmployee, NewExpense,
        NewExpenseType,
    };
    use time::macros::datetime;

    async fn add_trip(
        repos: &crate::domain::ports::outbound::Repositories,
        employee_id: EmployeeId,
        destination: Option<&str>,
    ) -> BusinessTripId {
        repos
            .business_trips
            .insert(&NewBusinessTrip {
                employee_id,
                destination: destination.map(str::to_string),
                start_trip: datetime!(2024-03-01 0:00 UTC),
                end_trip: datetime!(2024-03-03 0:00 UTC),
            })
            .await
            .unwrap()
            .id
    }

    async fn add_expense(
        repos: &crate::domain::ports::outbound::Repositories,
        trip: BusinessTripId,
        expense_type: ExpenseTypeId,
        amount: f64,
    ) {
        repos
            .expenses
            .insert(&NewExpense {
                business_trip_id: trip,
                expense_type_id: expense_type,
                amount,
            })
            .await
            .unwrap();
    }

    /// Two employees, three trips (one without expenses), two expense types.
    async fn seeded() -> SqliteAnalyticsRepository {
        let pool = memory_pool().await;
        let repos = repositories(pool.clone());

        let ivanov = repos
            .employees
            .insert(&NewEmployee {
                fio: "Иванов Иван Иванович".to_string(),
            })
            .await
            .unwrap()
            .id;
        let petrov = repos
            .employees
            .insert(&NewEmployee {
                fio: "Петров Петр Петрович".to_string(),
            })
            .await
            .unwrap()
            .id;
        let hotel = repos
            .expense_types
            .insert(&NewExpenseType {
                name: "Проживание".to_string(),
            })
            .await
            .unwrap()
            .id;
        let food = repos
            .expense_types
            .insert(&NewExpenseType {
                name: "Питание".to_string(),
            })
            .await
            .unwrap()
            .id;

        let moscow = add_trip(&repos, ivanov, Some("Москва")).await;
        let kazan = add_trip(&repos, ivanov, Some("Казань")).await;
        add_trip(&repos, petrov, Some("Москва")).await;

        add_expense(&repos, moscow, hotel, 9000.0).await;
        add_expense(&repos, moscow, food, 1000.0).await;
        add_expense(&repos, kazan, food, 2000.0).await;

        SqliteAnalyticsRepository::new(pool)
    }

    #[tokio::test]
    async fn empty_database_yields_zeroes() {
        let repo = SqliteAnalyticsRepository::new(memory_pool().await);

        assert_eq!(repo.total_expenses().await.unwrap(), 0.0);
        assert_eq!(repo.average_expense_per_trip().await.unwrap(), 0.0);
        assert!(repo.expenses_by_employee().await.unwrap().is_empty());
        assert!(repo.most_popular_destinations(5).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn totals_are_grouped_and_sorted_largest_first() {
        let repo = seeded().await;

        assert_eq!(repo.total_expenses().await.unwrap(), 12000.0);

        let by_employee = repo.expenses_by_employee().await.unwrap();
        assert_eq!(
            by_employee,
            vec![EmployeeExpenseTotal {
                employee: "Иванов Иван Иванович".to_string(),
                total_expenses: 12000.0,
            }]
        );

        let by_type: Vec<_> = repo
            .expenses_by_expense_type()
            .await
            .unwrap()
            .into_iter()
            .map(|row| (row.expense_type, row.total_expenses))
            .collect();
        assert_eq!(
            by_type,
            vec![
                ("Проживание".to_string(), 9000.0),
                ("Питание".to_string(), 3000.0),
            ]
        );
    }

    #[tokio::test]
    async fn trip_counts_respect_limit() {
        let repo = seeded().await;

        let top = repo.employees_with_most_trips(1).await.unwrap();
        assert_eq!(
            top,
            vec![EmployeeTripCount {
                employee: "Иванов Иван Иванович".to_string(),
                trip_count: 2,
            }]
        );

        let destinations = repo.most_popular_destinations(5).await.unwrap();
        assert_eq!(destinations[0].destination.as_deref(), Some("Москва"));
        assert_eq!(destinations[0].trip_count, 2);
        assert_eq!(destinations.len(), 2);
    }

    #[tokio::test]
    async fn average_ignores_trips_without_expenses() {
        let repo = seeded().await;

        // (10000 + 2000) / 2
        assert_eq!(repo.average_expense_per_trip().await.unwrap(), 6000.0);
    }
}
