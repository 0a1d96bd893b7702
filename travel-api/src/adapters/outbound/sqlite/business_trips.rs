use async_trait::async_trait;
use sqlx::SqlitePool;
use time::OffsetDateTime;

use super::storage_error;
use crate::domain::{
    models::{BusinessTrip, BusinessTripId, EmployeeId, NewBusinessTrip},
    ports::outbound::BusinessTripRepository,
    TravelError,
};

#[derive(sqlx::FromRow)]
struct BusinessTripRow {
    id: i64,
    employee_id: i64,
    destination: Option<String>,
    start_trip: OffsetDateTime,
    end_trip: OffsetDateTime,
}

impl From<BusinessTripRow> for BusinessTrip {
    fn from(row: BusinessTripRow) -> Self {
        BusinessTrip {
            id: BusinessTripId::new(row.id),
            employee_id: EmployeeId::new(row.employee_id),
            destination: row.destination,
            start_trip: row.start_trip,
            end_trip: row.end_trip,
        }
    }
}

pub struct SqliteBusinessTripRepository {
    pool: SqlitePool,
}

impl SqliteBusinessTripRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BusinessTripRepository for SqliteBusinessTripRepository {
    async fn list(&self) -> Result<Vec<BusinessTrip>, TravelError> {
        let rows = sqlx::query_as::<_, BusinessTripRow>(
            r#"
            SELECT id, employee_id, destination, start_trip, end_trip
            FROM business_trips
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(rows.into_iter().map(BusinessTrip::from).collect())
    }

    async fn list_by_employee(&self, id: EmployeeId) -> Result<Vec<BusinessTrip>, TravelError> {
        let rows = sqlx::query_as::<_, BusinessTripRow>(
            r#"
            SELECT id, employee_id, destination, start_trip, end_trip
            FROM business_trips
            WHERE employee_id = ?
            ORDER BY id
            "#,
        )
        .bind(id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(rows.into_iter().map(BusinessTrip::from).collect())
    }

    async fn get(&self, id: BusinessTripId) -> Result<Option<BusinessTrip>, TravelError> {
        let row = sqlx::query_as::<_, BusinessTripRow>(
            r#"
            SELECT id, employee_id, destination, start_trip, end_trip
            FROM business_trips
            WHERE id = ?
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(row.map(BusinessTrip::from))
    }

    async fn insert(&self, trip: &NewBusinessTrip) -> Result<BusinessTrip, TravelError> {
        let row = sqlx::query_as::<_, BusinessTripRow>(
            r#"
            INSERT INTO business_trips (employee_id, destination, start_trip, end_trip)
            VALUES (?, ?, ?, ?)
            RETURNING id, employee_id, destination, start_trip, end_trip
            "#,
        )
        .bind(trip.employee_id.as_i64())
        .bind(&trip.destination)
        .bind(trip.start_trip)
        .bind(trip.end_trip)
        .fetch_one(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(row.into())
    }

    async fn update(&self, trip: &BusinessTrip) -> Result<(), TravelError> {
        sqlx::query(
            r#"
            UPDATE business_trips
            SET employee_id = ?, destination = ?, start_trip = ?, end_trip = ?
            WHERE id = ?
            "#,
        )
        .bind(trip.employee_id.as_i64())
        .bind(&trip.destination)
        .bind(trip.start_trip)
        .bind(trip.end_trip)
        .bind(trip.id.as_i64())
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(())
    }

    async fn delete(&self, id: BusinessTripId) -> Result<bool, TravelError> {
        let result = sqlx::query(
            r#"
            DELETE FROM business_trips
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
    use crate::adapters::outbound::sqlite::{memory_pool, SqliteEmployeeRepository};
    use crate::domain::{models::NewEmployee, ports::outbound::EmployeeRepository};
    use time::macros::datetime;

    #[tokio::test]
    async fn timestamps_and_null_destination_survive_storage() {
        let pool = memory_pool().await;
        let employee = SqliteEmployeeRepository::new(pool.clone())
            .insert(&NewEmployee {
                fio: "Волков Виктор".to_string(),
            })
            .await
            .unwrap();
        let repo = SqliteBusinessTripRepository::new(pool);

        let trip = repo
            .insert(&NewBusinessTrip {
                employee_id: employee.id,
                destination: None,
                start_trip: datetime!(2024-07-01 8:30 +03:00),
                end_trip: datetime!(2024-07-04 20:00 +03:00),
            })
            .await
            .unwrap();
        let loaded = repo.get(trip.id).await.unwrap().unwrap();

        assert_eq!(loaded.destination, None);
        assert_eq!(loaded.start_trip, datetime!(2024-07-01 8:30 +03:00));
        assert_eq!(loaded.end_trip, datetime!(2024-07-04 20:00 +03:00));
    }

    #[tokio::test]
    async fn deleting_employee_cascades_to_trips() {
        let pool = memory_pool().await;
        let employees = SqliteEmployeeRepository::new(pool.clone());
        let employee = employees
            .insert(&NewEmployee {
                fio: "Волков Виктор".to_string(),
            })
            .await
            .unwrap();
        let repo = SqliteBusinessTripRepository::new(pool);
        repo.insert(&NewBusinessTrip {
            employee_id: employee.id,
            destination: Some("Сочи".to_string()),
            start_trip: datetime!(2024-07-01 0:00 UTC),
            end_trip: datetime!(2024-07-02 0:00 UTC),
        })
        .await
        .unwrap();

        employees.delete(employee.id).await.unwrap();

        assert!(repo.list().await.unwrap().is_empty());
    }
}
