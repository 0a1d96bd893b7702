use async_trait::async_trait;

use super::{assembly, require_text};
use crate::domain::{
    models::{EmployeeDetails, EmployeeId, EmployeePatch, NewEmployee},
    ports::{inbound::EmployeeService, outbound::Repositories},
    Entity, TravelError,
};

/// Implementation of the EmployeeService inbound port.
pub struct EmployeeServiceImpl {
    repos: Repositories,
}

impl EmployeeServiceImpl {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }
}

#[async_trait]
impl EmployeeService for EmployeeServiceImpl {
    async fn list_employees(&self) -> Result<Vec<EmployeeDetails>, TravelError> {
        let employees = self.repos.employees.list().await?;
        let trips = self.repos.business_trips.list().await?;
        let expenses = self.repos.expenses.list().await?;
        let expense_types = self.repos.expense_types.list().await?;

        let expenses = assembly::expense_details(expenses, &expense_types);
        let trips = assembly::trip_details(trips, expenses);
        Ok(assembly::employee_details(employees, trips))
    }

    async fn get_employee(&self, id: EmployeeId) -> Result<EmployeeDetails, TravelError> {
        let employee = self
            .repos
            .employees
            .get(id)
            .await?
            .ok_or(TravelError::NotFound(Entity::Employee))?;

        let trips = self.repos.business_trips.list_by_employee(id).await?;
        let business_trips = assembly::load_trip_details(&self.repos, trips).await?;

        Ok(EmployeeDetails {
            employee,
            business_trips,
        })
    }

    async fn create_employee(
        &self,
        employee: NewEmployee,
    ) -> Result<EmployeeDetails, TravelError> {
        require_text(&employee.fio, "fio")?;

        let employee = self.repos.employees.insert(&employee).await?;
        tracing::info!(employee_id = %employee.id, "created employee");

        Ok(EmployeeDetails {
            employee,
            business_trips: Vec::new(),
        })
    }

    async fn update_employee(
        &self,
        id: EmployeeId,
        patch: EmployeePatch,
    ) -> Result<EmployeeDetails, TravelError> {
        let mut employee = self
            .repos
            .employees
            .get(id)
            .await?
            .ok_or(TravelError::NotFound(Entity::Employee))?;

        employee.apply(patch);
        require_text(&employee.fio, "fio")?;
        self.repos.employees.update(&employee).await?;

        self.get_employee(id).await
    }

    async fn delete_employee(&self, id: EmployeeId) -> Result<(), TravelError> {
        if !self.repos.employees.delete(id).await? {
            return Err(TravelError::NotFound(Entity::Employee));
        }
        tracing::info!(employee_id = %id, "deleted employee and their trips");
        Ok(())
    }
}
