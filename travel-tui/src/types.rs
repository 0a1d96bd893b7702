use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// An employee as returned by travel-api. Nested trips are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Employee {
    pub id: i64,
    pub fio: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ExpenseType {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BusinessTrip {
    pub id: i64,
    pub employee_id: i64,
    pub destination: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub start_trip: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub end_trip: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Expense {
    pub id: i64,
    pub business_trip_id: i64,
    pub expense_type_id: i64,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EmployeeTotal {
    pub employee: String,
    pub total_expenses: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ExpenseTypeTotal {
    pub expense_type: String,
    pub total_expenses: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EmployeeTripCount {
    pub employee: String,
    pub trip_count: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DestinationCount {
    pub destination: Option<String>,
    pub trip_count: i64,
}

/// Payload of `GET /analytics/all_analytics`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct AnalyticsData {
    pub total_expenses: f64,
    pub expenses_by_employee: Vec<EmployeeTotal>,
    pub expenses_by_expense_type: Vec<ExpenseTypeTotal>,
    pub employees_with_most_trips: Vec<EmployeeTripCount>,
    pub most_popular_destinations: Vec<DestinationCount>,
    /// Two-decimal string, e.g. "6000.00".
    pub average_expense_per_trip: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    pub const ALL: [ReportFormat; 2] = [ReportFormat::Text, ReportFormat::Json];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFormat::Text => "text",
            ReportFormat::Json => "json",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == value)
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            ReportFormat::Text => "report.txt",
            ReportFormat::Json => "report.json",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportDataset {
    All,
    TotalExpenses,
    ExpensesByEmployee,
    ExpensesByExpenseType,
    EmployeesWithMostTrips,
    MostPopularDestinations,
    AverageExpensePerTrip,
}

impl ReportDataset {
    pub const ALL: [ReportDataset; 7] = [
        ReportDataset::All,
        ReportDataset::TotalExpenses,
        ReportDataset::ExpensesByEmployee,
        ReportDataset::ExpensesByExpenseType,
        ReportDataset::EmployeesWithMostTrips,
        ReportDataset::MostPopularDestinations,
        ReportDataset::AverageExpensePerTrip,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportDataset::All => "all",
            ReportDataset::TotalExpenses => "total_expenses",
            ReportDataset::ExpensesByEmployee => "expenses_by_employee",
            ReportDataset::ExpensesByExpenseType => "expenses_by_expense_type",
            ReportDataset::EmployeesWithMostTrips => "employees_with_most_trips",
            ReportDataset::MostPopularDestinations => "most_popular_destinations",
            ReportDataset::AverageExpensePerTrip => "average_expense_per_trip",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str() == value)
    }
}

/// A downloaded report: the server-provided filename and the raw body.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportFile {
    pub file_name: String,
    pub content: Vec<u8>,
}
