use super::{BusinessTripId, ExpenseId, ExpenseType, ExpenseTypeId};

/// A single amount spent on a trip.
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub id: ExpenseId,
    pub business_trip_id: BusinessTripId,
    pub expense_type_id: ExpenseTypeId,
    pub amount: f64,
}

impl Expense {
    pub fn apply(&mut self, patch: ExpensePatch) {
        if let Some(business_trip_id) = patch.business_trip_id {
            self.business_trip_id = business_trip_id;
        }
        if let Some(expense_type_id) = patch.expense_type_id {
            self.expense_type_id = expense_type_id;
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub business_trip_id: BusinessTripId,
    pub expense_type_id: ExpenseTypeId,
    pub amount: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpensePatch {
    pub business_trip_id: Option<BusinessTripId>,
    pub expense_type_id: Option<ExpenseTypeId>,
    pub amount: Option<f64>,
}

/// An expense with its resolved type.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseDetails {
    pub expense: Expense,
    pub expense_type: ExpenseType,
}
