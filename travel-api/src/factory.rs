//! Composition root: the only place that wires concrete adapters into services.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::{
    adapters::outbound::sqlite::{self, SqliteAnalyticsRepository},
    app_state::AppState,
    domain::services::{
        AnalyticsServiceImpl, BusinessTripServiceImpl, EmployeeServiceImpl,
        ExpenseServiceImpl, ExpenseTypeServiceImpl,
    },
};

pub fn app_state(pool: SqlitePool) -> AppState {
    let repos = sqlite::repositories(pool.clone());
    let analytics_repo = Arc::new(SqliteAnalyticsRepository::new(pool));

    AppState {
        employees: Arc::new(EmployeeServiceImpl::new(repos.clone())),
        expense_types: Arc::new(ExpenseTypeServiceImpl::new(repos.clone())),
        business_trips: Arc::new(BusinessTripServiceImpl::new(repos.clone())),
        expenses: Arc::new(ExpenseServiceImpl::new(repos)),
        analytics: Arc::new(AnalyticsServiceImpl::new(analytics_repo)),
    }
}
