use async_trait::async_trait;

use crate::domain::{
    models::{
        BusinessTrip, BusinessTripId, Employee, EmployeeId, Expense, ExpenseId, ExpenseType,
        ExpenseTypeId, NewBusinessTrip, NewEmployee, NewExpense, NewExpenseType,
    },
    TravelError,
};

#[async_trait]
pub trait EmployeeRepository: Send + Sync + 'static {
    async fn list(&self) -> Result<Vec<Employee>, TravelError>;

    async fn get(&self, id: EmployeeId) -> Result<Option<Employee>, TravelError>;

    async fn insert(&self, employee: &NewEmployee) -> Result<Employee, TravelError>;

    async fn update(&self, employee: &Employee) -> Result<(), TravelError>;

    /// Returns `false` when no row had the given id.
    async fn delete(&self, id: EmployeeId) -> Result<bool, TravelError>;
}

#[async_trait]
pub trait ExpenseTypeRepository: Send + Sync + 'static {
    async fn list(&self) -> Result<Vec<ExpenseType>, TravelError>;

    async fn get(&self, id: ExpenseTypeId) -> Result<Option<ExpenseType>, TravelError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<ExpenseType>, TravelError>;

    async fn insert(&self, expense_type: &NewExpenseType) -> Result<ExpenseType, TravelError>;

    async fn update(&self, expense_type: &ExpenseType) -> Result<(), TravelError>;

    async fn delete(&self, id: ExpenseTypeId) -> Result<bool, TravelError>;
}

#[async_trait]
pub trait BusinessTripRepository: Send + Sync + 'static {
    async fn list(&self) -> Result<Vec<BusinessTrip>, TravelError>;

    async fn list_by_employee(&self, id: EmployeeId) -> Result<Vec<BusinessTrip>, TravelError>;

    async fn get(&self, id: BusinessTripId) -> Result<Option<BusinessTrip>, TravelError>;

    async fn insert(&self, trip: &NewBusinessTrip) -> Result<BusinessTrip, TravelError>;

    async fn update(&self, trip: &BusinessTrip) -> Result<(), TravelError>;

    async fn delete(&self, id: BusinessTripId) -> Result<bool, TravelError>;
}

#[async_trait]
pub trait ExpenseRepository: Send + Sync + 'static {
    async fn list(&self) -> Result<Vec<Expense>, TravelError>;

    async fn list_by_trip(&self, id: BusinessTripId) -> Result<Vec<Expense>, TravelError>;

    async fn get(&self, id: ExpenseId) -> Result<Option<Expense>, TravelError>;

    async fn insert(&self, expense: &NewExpense) -> Result<Expense, TravelError>;

    async fn update(&self, expense: &Expense) -> Result<(), TravelError>;

    async fn delete(&self, id: ExpenseId) -> Result<bool, TravelError>;
}
