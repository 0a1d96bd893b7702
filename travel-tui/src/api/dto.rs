use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeRequest {
    pub fio: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseTypeRequest {
    pub name: String,
}

/// Sent for both create and update; the API treats every field as a full
/// replacement when present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BusinessTripRequest {
    pub employee_id: i64,
    pub destination: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub start_trip: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub end_trip: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseRequest {
    pub business_trip_id: i64,
    pub expense_type_id: i64,
    pub amount: f64,
}

/// Error body produced by travel-api. `detail` may be a string or, for some
/// rejections, structured data.
#[derive(Deserialize)]
pub struct ErrorDto {
    pub detail: serde_json::Value,
}

impl ErrorDto {
    pub fn into_message(self) -> String {
        match self.detail {
            serde_json::Value::String(detail) => detail,
            other => other.to_string(),
        }
    }
}
