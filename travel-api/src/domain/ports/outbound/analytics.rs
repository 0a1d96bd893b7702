use async_trait::async_trait;

use crate::domain::{
    models::{DestinationTripCount, EmployeeExpenseTotal, EmployeeTripCount, ExpenseTypeTotal},
    TravelError,
};

/// Read-only aggregate queries over the stored records.
#[async_trait]
pub trait AnalyticsRepository: Send + Sync + 'static {
    /// Sum of every expense amount, `0.0` when there are none.
    async fn total_expenses(&self) -> Result<f64, TravelError>;

    async fn expenses_by_employee(&self) -> Result<Vec<EmployeeExpenseTotal>, TravelError>;

    async fn expenses_by_expense_type(&self) -> Result<Vec<ExpenseTypeTotal>, TravelError>;

    async fn employees_with_most_trips(
        &self,
        limit: u32,
    ) -> Result<Vec<EmployeeTripCount>, TravelError>;

    async fn most_popular_destinations(
        &self,
        limit: u32,
    ) -> Result<Vec<DestinationTripCount>, TravelError>;

    /// Mean of per-trip expense sums over trips with at least one expense.
    async fn average_expense_per_trip(&self) -> Result<f64, TravelError>;
}
