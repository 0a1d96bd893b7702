use async_trait::async_trait;

use crate::domain::{
    models::{
        BusinessTripId, Expense, ExpenseDetails, ExpenseId, ExpensePatch, ExpenseTypeId,
        NewExpense,
    },
    ports::{inbound::ExpenseService, outbound::Repositories},
    Entity, TravelError,
};

use super::assembly;

/// Implementation of the ExpenseService inbound port.
pub struct ExpenseServiceImpl {
    repos: Repositories,
}

impl ExpenseServiceImpl {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    async fn ensure_trip(&self, id: BusinessTripId) -> Result<(), TravelError> {
        match self.repos.business_trips.get(id).await? {
            Some(_) => Ok(()),
            None => Err(TravelError::MissingReference(
                Entity::BusinessTrip,
                id.as_i64(),
            )),
        }
    }

    async fn ensure_expense_type(&self, id: ExpenseTypeId) -> Result<(), TravelError> {
        match self.repos.expense_types.get(id).await? {
            Some(_) => Ok(()),
            None => Err(TravelError::MissingReference(
                Entity::ExpenseType,
                id.as_i64(),
            )),
        }
    }

    async fn with_type(&self, expense: Expense) -> Result<ExpenseDetails, TravelError> {
        let expense_type = self
            .repos
            .expense_types
            .get(expense.expense_type_id)
            .await?
            .ok_or(TravelError::MissingReference(
                Entity::ExpenseType,
                expense.expense_type_id.as_i64(),
            ))?;

        Ok(ExpenseDetails {
            expense,
            expense_type,
        })
    }
}

fn validate_amount(amount: f64) -> Result<(), TravelError> {
    if !amount.is_finite() {
        return Err(TravelError::validation("amount must be a finite number"));
    }
    Ok(())
}

#[async_trait]
impl ExpenseService for ExpenseServiceImpl {
    async fn list_expenses(&self) -> Result<Vec<ExpenseDetails>, TravelError> {
        let expenses = self.repos.expenses.list().await?;
        let expense_types = self.repos.expense_types.list().await?;
        Ok(assembly::expense_details(expenses, &expense_types))
    }

    async fn get_expense(&self, id: ExpenseId) -> Result<ExpenseDetails, TravelError> {
        let expense = self
            .repos
            .expenses
            .get(id)
            .await?
            .ok_or(TravelError::NotFound(Entity::Expense))?;

        self.with_type(expense).await
    }

    async fn create_expense(&self, expense: NewExpense) -> Result<ExpenseDetails, TravelError> {
        validate_amount(expense.amount)?;
        self.ensure_trip(expense.business_trip_id).await?;
        self.ensure_expense_type(expense.expense_type_id).await?;

        let expense = self.repos.expenses.insert(&expense).await?;
        tracing::debug!(expense_id = %expense.id, trip_id = %expense.business_trip_id, "created expense");

        self.with_type(expense).await
    }

    async fn update_expense(
        &self,
        id: ExpenseId,
        patch: ExpensePatch,
    ) -> Result<ExpenseDetails, TravelError> {
        let mut expense = self
            .repos
            .expenses
            .get(id)
            .await?
            .ok_or(TravelError::NotFound(Entity::Expense))?;

        if let Some(trip_id) = patch.business_trip_id {
            self.ensure_trip(trip_id).await?;
        }
        if let Some(type_id) = patch.expense_type_id {
            self.ensure_expense_type(type_id).await?;
        }

        expense.apply(patch);
        validate_amount(expense.amount)?;
        self.repos.expenses.update(&expense).await?;

        self.with_type(expense).await
    }

    async fn delete_expense(&self, id: ExpenseId) -> Result<(), TravelError> {
        if !self.repos.expenses.delete(id).await? {
            return Err(TravelError::NotFound(Entity::Expense));
        }
        Ok(())
    }
}
