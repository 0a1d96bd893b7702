use std::sync::Arc;

mod analytics;
mod records;

pub use analytics::*;
pub use records::*;

/// The record repositories a service may need, bundled for injection.
#[derive(Clone)]
pub struct Repositories {
    pub employees: Arc<dyn EmployeeRepository>,
    pub expense_types: Arc<dyn ExpenseTypeRepository>,
    pub business_trips: Arc<dyn BusinessTripRepository>,
    pub expenses: Arc<dyn ExpenseRepository>,
}
