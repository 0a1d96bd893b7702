use std::sync::Arc;

use crate::domain::ports::inbound::{
    AnalyticsService, BusinessTripService, EmployeeService, ExpenseService, ExpenseTypeService,
};

/// Services shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub employees: Arc<dyn EmployeeService>,
    pub expense_types: Arc<dyn ExpenseTypeService>,
    pub business_trips: Arc<dyn BusinessTripService>,
    pub expenses: Arc<dyn ExpenseService>,
    pub analytics: Arc<dyn AnalyticsService>,
}
