use serde::{Serialize, Serializer};

/// Default number of rows returned by the "top N" aggregates.
pub const DEFAULT_TOP_LIMIT: u32 = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeExpenseTotal {
    pub employee: String,
    pub total_expenses: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseTypeTotal {
    pub expense_type: String,
    pub total_expenses: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeTripCount {
    pub employee: String,
    pub trip_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DestinationTripCount {
    pub destination: Option<String>,
    pub trip_count: i64,
}

/// Every aggregate shown on the analytics dashboard, in one payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsSummary {
    pub total_expenses: f64,
    pub expenses_by_employee: Vec<EmployeeExpenseTotal>,
    pub expenses_by_expense_type: Vec<ExpenseTypeTotal>,
    pub employees_with_most_trips: Vec<EmployeeTripCount>,
    pub most_popular_destinations: Vec<DestinationTripCount>,
    #[serde(serialize_with = "two_decimals")]
    pub average_expense_per_trip: f64,
}

/// The average is published as a fixed two-decimal string, e.g. `"12960.00"`.
pub fn format_average(value: f64) -> String {
    format!("{value:.2}")
}

fn two_decimals<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_average(*value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_serializes_as_two_decimal_string() {
        let summary = AnalyticsSummary {
            total_expenses: 0.0,
            expenses_by_employee: vec![],
            expenses_by_expense_type: vec![],
            employees_with_most_trips: vec![],
            most_popular_destinations: vec![],
            average_expense_per_trip: 12960.0,
        };

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["average_expense_per_trip"], "12960.00");
        assert_eq!(json["total_expenses"], 0.0);
    }

    #[test]
    fn summary_keeps_field_order() {
        let summary = AnalyticsSummary {
            total_expenses: 1.0,
            expenses_by_employee: vec![],
            expenses_by_expense_type: vec![],
            employees_with_most_trips: vec![],
            most_popular_destinations: vec![],
            average_expense_per_trip: 1.0,
        };

        let json = serde_json::to_value(&summary).unwrap();
        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        assert_eq!(
            keys,
            [
                "total_expenses",
                "expenses_by_employee",
                "expenses_by_expense_type",
                "employees_with_most_trips",
                "most_popular_destinations",
                "average_expense_per_trip",
            ]
        );
    }
}
