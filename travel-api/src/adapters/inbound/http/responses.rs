//! HTTP response types for the record endpoints.
//!
//! Field names and nesting match what the dashboard reads: an employee carries
//! its trips, a trip its expenses, an expense its type.

use serde::Serialize;
use time::OffsetDateTime;

use crate::domain::models::{
    BusinessTripDetails, BusinessTripId, EmployeeDetails, EmployeeId, ExpenseDetails, ExpenseId,
    ExpenseType, ExpenseTypeId,
};

#[derive(Debug, Serialize)]
pub struct ExpenseTypeResponse {
    pub name: String,
    pub id: ExpenseTypeId,
}

impl From<ExpenseType> for ExpenseTypeResponse {
    fn from(expense_type: ExpenseType) -> Self {
        Self {
            name: expense_type.name,
            id: expense_type.id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ExpenseResponse {
    pub business_trip_id: BusinessTripId,
    pub expense_type_id: ExpenseTypeId,
    pub amount: f64,
    pub id: ExpenseId,
    pub expense_type: ExpenseTypeResponse,
}

impl From<ExpenseDetails> for ExpenseResponse {
    fn from(details: ExpenseDetails) -> Self {
        let expense = details.expense;
        Self {
            business_trip_id: expense.business_trip_id,
            expense_type_id: expense.expense_type_id,
            amount: expense.amount,
            id: expense.id,
            expense_type: details.expense_type.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BusinessTripResponse {
    pub employee_id: EmployeeId,
    pub destination: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub start_trip: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub end_trip: OffsetDateTime,
    pub id: BusinessTripId,
    pub expenses: Vec<ExpenseResponse>,
}

impl From<BusinessTripDetails> for BusinessTripResponse {
    fn from(details: BusinessTripDetails) -> Self {
        let trip = details.trip;
        Self {
            employee_id: trip.employee_id,
            destination: trip.destination,
            start_trip: trip.start_trip,
            end_trip: trip.end_trip,
            id: trip.id,
            expenses: details.expenses.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EmployeeResponse {
    pub fio: String,
    pub id: EmployeeId,
    pub business_trips: Vec<BusinessTripResponse>,
}

impl From<EmployeeDetails> for EmployeeResponse {
    fn from(details: EmployeeDetails) -> Self {
        Self {
            fio: details.employee.fio,
            id: details.employee.id,
            business_trips: details.business_trips.into_iter().map(Into::into).collect(),
        }
    }
}

/// Confirmation body for deletes, e.g. `{"message": "Employee deleted"}`.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
