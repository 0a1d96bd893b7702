mod analytics;
mod assembly;
mod business_trips;
mod employees;
mod expense_types;
mod expenses;

pub use analytics::AnalyticsServiceImpl;
pub use business_trips::BusinessTripServiceImpl;
pub use employees::EmployeeServiceImpl;
pub use expense_types::ExpenseTypeServiceImpl;
pub use expenses::ExpenseServiceImpl;

use super::TravelError;

/// Rejects empty or whitespace-only text for a required field.
fn require_text(value: &str, field: &str) -> Result<(), TravelError> {
    if value.trim().is_empty() {
        return Err(TravelError::validation(format!("{field} must not be blank")));
    }
    Ok(())
}
