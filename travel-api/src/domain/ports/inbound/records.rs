use async_trait::async_trait;

use crate::domain::{
    models::{
        BusinessTripDetails, BusinessTripId, BusinessTripPatch, EmployeeDetails, EmployeeId,
        EmployeePatch, ExpenseDetails, ExpenseId, ExpensePatch, ExpenseType, ExpenseTypeId,
        ExpenseTypePatch, NewBusinessTrip, NewEmployee, NewExpense, NewExpenseType,
    },
    TravelError,
};

#[async_trait]
pub trait EmployeeService: Send + Sync + 'static {
    async fn list_employees(&self) -> Result<Vec<EmployeeDetails>, TravelError>;

    async fn get_employee(&self, id: EmployeeId) -> Result<EmployeeDetails, TravelError>;

    async fn create_employee(&self, employee: NewEmployee)
        -> Result<EmployeeDetails, TravelError>;

    async fn update_employee(
        &self,
        id: EmployeeId,
        patch: EmployeePatch,
    ) -> Result<EmployeeDetails, TravelError>;

    async fn delete_employee(&self, id: EmployeeId) -> Result<(), TravelError>;
}

#[async_trait]
pub trait ExpenseTypeService: Send + Sync + 'static {
    async fn list_expense_types(&self) -> Result<Vec<ExpenseType>, TravelError>;

    async fn get_expense_type(&self, id: ExpenseTypeId) -> Result<ExpenseType, TravelError>;

    async fn create_expense_type(
        &self,
        expense_type: NewExpenseType,
    ) -> Result<ExpenseType, TravelError>;

    async fn update_expense_type(
        &self,
        id: ExpenseTypeId,
        patch: ExpenseTypePatch,
    ) -> Result<ExpenseType, TravelError>;

    /// Deletes the type and returns it as it was before deletion.
    async fn delete_expense_type(&self, id: ExpenseTypeId) -> Result<ExpenseType, TravelError>;
}

#[async_trait]
pub trait BusinessTripService: Send + Sync + 'static {
    async fn list_business_trips(&self) -> Result<Vec<BusinessTripDetails>, TravelError>;

    async fn get_business_trip(
        &self,
        id: BusinessTripId,
    ) -> Result<BusinessTripDetails, TravelError>;

    async fn create_business_trip(
        &self,
        trip: NewBusinessTrip,
    ) -> Result<BusinessTripDetails, TravelError>;

    async fn update_business_trip(
        &self,
        id: BusinessTripId,
        patch: BusinessTripPatch,
    ) -> Result<BusinessTripDetails, TravelError>;

    async fn delete_business_trip(&self, id: BusinessTripId) -> Result<(), TravelError>;
}

#[async_trait]
pub trait ExpenseService: Send + Sync + 'static {
    async fn list_expenses(&self) -> Result<Vec<ExpenseDetails>, TravelError>;

    async fn get_expense(&self, id: ExpenseId) -> Result<ExpenseDetails, TravelError>;

    async fn create_expense(&self, expense: NewExpense) -> Result<ExpenseDetails, TravelError>;

    async fn update_expense(
        &self,
        id: ExpenseId,
        patch: ExpensePatch,
    ) -> Result<ExpenseDetails, TravelError>;

    async fn delete_expense(&self, id: ExpenseId) -> Result<(), TravelError>;
}
