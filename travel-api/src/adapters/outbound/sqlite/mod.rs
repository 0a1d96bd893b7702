//! SQLite implementations of the outbound repository ports.

use std::sync::Arc;

use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};

use crate::{config::DatabaseSettings, domain::ports::outbound::Repositories};

mod analytics;
mod business_trips;
mod employees;
mod expense_types;
mod expenses;

pub use analytics::SqliteAnalyticsRepository;
pub use business_trips::SqliteBusinessTripRepository;
pub use employees::SqliteEmployeeRepository;
pub use expense_types::SqliteExpenseTypeRepository;
pub use expenses::SqliteExpenseRepository;

/// Opens the pool and brings the schema up to date.
pub async fn connect(settings: &DatabaseSettings) -> Result<SqlitePool, sqlx::Error> {
    let pool = SqlitePoolOptions::new()
        .max_connections(settings.max_connections)
        .connect_with(settings.connect_options()?)
        .await?;

    sqlx::migrate!().run(&pool).await?;

    Ok(pool)
}

pub fn repositories(pool: SqlitePool) -> Repositories {
    Repositories {
        employees: Arc::new(SqliteEmployeeRepository::new(pool.clone())),
        expense_types: Arc::new(SqliteExpenseTypeRepository::new(pool.clone())),
        business_trips: Arc::new(SqliteBusinessTripRepository::new(pool.clone())),
        expenses: Arc::new(SqliteExpenseRepository::new(pool)),
    }
}

fn storage_error(err: sqlx::Error) -> crate::domain::TravelError {
    tracing::error!("database error: {err}");
    crate::domain::TravelError::storage(err.to_string())
}

/// A migrated in-memory database; one connection so every query sees the same data.
#[cfg(test)]
pub async fn memory_pool() -> SqlitePool {
    use std::str::FromStr;

    let options = sqlx::sqlite::SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .unwrap();

    sqlx::migrate!().run(&pool).await.unwrap();
    pool
}
