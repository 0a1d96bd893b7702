use async_trait::async_trait;

use crate::domain::{
    models::{
        AnalyticsSummary, DestinationTripCount, EmployeeExpenseTotal, EmployeeTripCount,
        ExpenseTypeTotal, ReportDataset, ReportFormat,
    },
    TravelError,
};

/// A rendered report ready to be sent as a file download.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedReport {
    pub file_name: &'static str,
    pub media_type: &'static str,
    pub content: String,
}

#[async_trait]
pub trait AnalyticsService: Send + Sync + 'static {
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

    async fn average_expense_per_trip(&self) -> Result<f64, TravelError>;

    /// Every aggregate at once, using the default top-N limit.
    async fn summary(&self) -> Result<AnalyticsSummary, TravelError>;

    async fn generate_report(
        &self,
        format: ReportFormat,
        dataset: ReportDataset,
    ) -> Result<RenderedReport, TravelError>;
}
