use time::OffsetDateTime;

use super::{BusinessTripId, EmployeeId, ExpenseDetails};
use crate::domain::TravelError;

/// A dated trip attributed to one employee.
#[derive(Debug, Clone, PartialEq)]
pub struct BusinessTrip {
    pub id: BusinessTripId,
    pub employee_id: EmployeeId,
    pub destination: Option<String>,
    pub start_trip: OffsetDateTime,
    pub end_trip: OffsetDateTime,
}

impl BusinessTrip {
    pub fn apply(&mut self, patch: BusinessTripPatch) {
        if let Some(employee_id) = patch.employee_id {
            self.employee_id = employee_id;
        }
        if let Some(destination) = patch.destination {
            self.destination = destination;
        }
        if let Some(start_trip) = patch.start_trip {
            self.start_trip = start_trip;
        }
        if let Some(end_trip) = patch.end_trip {
            self.end_trip = end_trip;
        }
    }

    pub fn validate(&self) -> Result<(), TravelError> {
        validate_period(self.start_trip, self.end_trip)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewBusinessTrip {
    pub employee_id: EmployeeId,
    pub destination: Option<String>,
    pub start_trip: OffsetDateTime,
    pub end_trip: OffsetDateTime,
}

impl NewBusinessTrip {
    pub fn validate(&self) -> Result<(), TravelError> {
        validate_period(self.start_trip, self.end_trip)
    }
}

/// Partial update. `destination: Some(None)` clears the destination.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BusinessTripPatch {
    pub employee_id: Option<EmployeeId>,
    pub destination: Option<Option<String>>,
    pub start_trip: Option<OffsetDateTime>,
    pub end_trip: Option<OffsetDateTime>,
}

/// A trip together with its expenses.
#[derive(Debug, Clone, PartialEq)]
pub struct BusinessTripDetails {
    pub trip: BusinessTrip,
    pub expenses: Vec<ExpenseDetails>,
}

fn validate_period(start: OffsetDateTime, end: OffsetDateTime) -> Result<(), TravelError> {
    if end < start {
        return Err(TravelError::InvalidDateRange);
    }
    Ok(())
}
