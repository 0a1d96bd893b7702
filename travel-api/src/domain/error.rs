use strum::Display;
use thiserror::Error;

/// The kinds of record the tracker stores, named the way error details read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Entity {
    #[strum(serialize = "Employee")]
    Employee,
    #[strum(serialize = "Expense Type")]
    ExpenseType,
    #[strum(serialize = "Business Trip")]
    BusinessTrip,
    #[strum(serialize = "Expense")]
    Expense,
}

/// Errors that can occur while managing travel records and analytics.
#[derive(Debug, Error)]
pub enum TravelError {
    #[error("{0} not found")]
    NotFound(Entity),
    #[error("{0} with id {1} does not exist")]
    MissingReference(Entity, i64),
    #[error("Expense Type with this name already exists")]
    DuplicateExpenseTypeName,
    #[error("end_trip must not be earlier than start_trip")]
    InvalidDateRange,
    #[error("{0}")]
    Validation(String),
    #[error("Invalid report type")]
    InvalidReportType(String),
    #[error("Invalid data type: {0}")]
    InvalidDataType(String),
    #[error("report generation failed: {0}")]
    Report(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl TravelError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_messages_use_display_names() {
        assert_eq!(
            TravelError::NotFound(Entity::BusinessTrip).to_string(),
            "Business Trip not found"
        );
        assert_eq!(
            TravelError::NotFound(Entity::ExpenseType).to_string(),
            "Expense Type not found"
        );
    }

    #[test]
    fn missing_reference_names_entity_and_id() {
        assert_eq!(
            TravelError::MissingReference(Entity::Employee, 9).to_string(),
            "Employee with id 9 does not exist"
        );
    }
}
