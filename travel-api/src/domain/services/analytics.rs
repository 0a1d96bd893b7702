use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{
    models::{
        AnalyticsSummary, DestinationTripCount, EmployeeExpenseTotal, EmployeeTripCount,
        ExpenseTypeTotal, ReportDataset, ReportFormat, DEFAULT_TOP_LIMIT,
    },
    ports::{
        inbound::{AnalyticsService, RenderedReport},
        outbound::AnalyticsRepository,
    },
    TravelError,
};

/// Implementation of the AnalyticsService inbound port.
///
/// Aggregation happens in the repository; this layer bundles the results
/// into the dashboard summary and renders downloadable reports from it.
pub struct AnalyticsServiceImpl<R: AnalyticsRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: AnalyticsRepository + ?Sized> AnalyticsServiceImpl<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R: AnalyticsRepository + ?Sized> AnalyticsService for AnalyticsServiceImpl<R> {
    async fn total_expenses(&self) -> Result<f64, TravelError> {
        self.repo.total_expenses().await
    }

    async fn expenses_by_employee(&self) -> Result<Vec<EmployeeExpenseTotal>, TravelError> {
        self.repo.expenses_by_employee().await
    }

    async fn expenses_by_expense_type(&self) -> Result<Vec<ExpenseTypeTotal>, TravelError> {
        self.repo.expenses_by_expense_type().await
    }

    async fn employees_with_most_trips(
        &self,
        limit: u32,
    ) -> Result<Vec<EmployeeTripCount>, TravelError> {
        self.repo.employees_with_most_trips(limit).await
    }

    async fn most_popular_destinations(
        &self,
        limit: u32,
    ) -> Result<Vec<DestinationTripCount>, TravelError> {
        self.repo.most_popular_destinations(limit).await
    }

    async fn average_expense_per_trip(&self) -> Result<f64, TravelError> {
        self.repo.average_expense_per_trip().await
    }

    async fn summary(&self) -> Result<AnalyticsSummary, TravelError> {
        Ok(AnalyticsSummary {
            total_expenses: self.repo.total_expenses().await?,
            expenses_by_employee: self.repo.expenses_by_employee().await?,
            expenses_by_expense_type: self.repo.expenses_by_expense_type().await?,
            employees_with_most_trips: self
                .repo
                .employees_with_most_trips(DEFAULT_TOP_LIMIT)
                .await?,
            most_popular_destinations: self
                .repo
                .most_popular_destinations(DEFAULT_TOP_LIMIT)
                .await?,
            average_expense_per_trip: self.repo.average_expense_per_trip().await?,
        })
    }

    async fn generate_report(
        &self,
        format: ReportFormat,
        dataset: ReportDataset,
    ) -> Result<RenderedReport, TravelError> {
        let summary = self.summary().await?;
        let data = dataset.select(&summary)?;
        let content = format.render(&data)?;

        tracing::info!(%format, %dataset, bytes = content.len(), "generated analytics report");

        Ok(RenderedReport {
            file_name: format.file_name(),
            media_type: format.media_type(),
            content,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedAnalytics;

    #[async_trait]
    impl AnalyticsRepository for FixedAnalytics {
        async fn total_expenses(&self) -> Result<f64, TravelError> {
            Ok(64800.0)
        }

        async fn expenses_by_employee(&self) -> Result<Vec<EmployeeExpenseTotal>, TravelError> {
            Ok(vec![EmployeeExpenseTotal {
                employee: "Иванов Иван Иванович".to_string(),
                total_expenses: 64800.0,
            }])
        }

        async fn expenses_by_expense_type(&self) -> Result<Vec<ExpenseTypeTotal>, TravelError> {
            Ok(vec![])
        }

        async fn employees_with_most_trips(
            &self,
            limit: u32,
        ) -> Result<Vec<EmployeeTripCount>, TravelError> {
            let rows = vec![
                EmployeeTripCount {
                    employee: "Иванов Иван Иванович".to_string(),
                    trip_count: 3,
                };
                7
            ];
            Ok(rows.into_iter().take(limit as usize).collect())
        }

        async fn most_popular_destinations(
            &self,
            _limit: u32,
        ) -> Result<Vec<DestinationTripCount>, TravelError> {
            Ok(vec![])
        }

        async fn average_expense_per_trip(&self) -> Result<f64, TravelError> {
            Ok(12960.0)
        }
    }

    fn service() -> AnalyticsServiceImpl<FixedAnalytics> {
        AnalyticsServiceImpl::new(Arc::new(FixedAnalytics))
    }

    #[tokio::test]
    async fn summary_uses_default_top_limit() {
        let summary = service().summary().await.unwrap();
        assert_eq!(
            summary.employees_with_most_trips.len(),
            DEFAULT_TOP_LIMIT as usize
        );
    }

    #[tokio::test]
    async fn text_report_for_single_dataset() {
        let report = service()
            .generate_report(ReportFormat::Text, ReportDataset::AverageExpensePerTrip)
            .await
            .unwrap();

        assert_eq!(report.file_name, "report.txt");
        assert_eq!(report.content, "average_expense_per_trip: 12960.00\n");
    }

    #[tokio::test]
    async fn json_report_for_everything() {
        let report = service()
            .generate_report(ReportFormat::Json, ReportDataset::All)
            .await
            .unwrap();

        assert_eq!(report.file_name, "report.json");
        assert_eq!(report.media_type, "application/json");
        let parsed: serde_json::Value = serde_json::from_str(&report.content).unwrap();
        assert_eq!(parsed["total_expenses"], 64800.0);
        assert_eq!(parsed["average_expense_per_trip"], "12960.00");
    }
}
