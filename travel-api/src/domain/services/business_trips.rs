use async_trait::async_trait;

use super::assembly;
use crate::domain::{
    models::{BusinessTripDetails, BusinessTripId, BusinessTripPatch, EmployeeId, NewBusinessTrip},
    ports::{inbound::BusinessTripService, outbound::Repositories},
    Entity, TravelError,
};

/// Implementation of the BusinessTripService inbound port.
///
/// A trip always belongs to an existing employee and never ends before it starts.
pub struct BusinessTripServiceImpl {
    repos: Repositories,
}

impl BusinessTripServiceImpl {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    async fn ensure_employee(&self, id: EmployeeId) -> Result<(), TravelError> {
        match self.repos.employees.get(id).await? {
            Some(_) => Ok(()),
            None => Err(TravelError::MissingReference(Entity::Employee, id.as_i64())),
        }
    }
}

#[async_trait]
impl BusinessTripService for BusinessTripServiceImpl {
    async fn list_business_trips(&self) -> Result<Vec<BusinessTripDetails>, TravelError> {
        let trips = self.repos.business_trips.list().await?;
        let expenses = self.repos.expenses.list().await?;
        let expense_types = self.repos.expense_types.list().await?;

        Ok(assembly::trip_details(
            trips,
            assembly::expense_details(expenses, &expense_types),
        ))
    }

    async fn get_business_trip(
        &self,
        id: BusinessTripId,
    ) -> Result<BusinessTripDetails, TravelError> {
        let trip = self
            .repos
            .business_trips
            .get(id)
            .await?
            .ok_or(TravelError::NotFound(Entity::BusinessTrip))?;

        assembly::load_trip_details(&self.repos, vec![trip])
            .await?
            .pop()
            .ok_or(TravelError::NotFound(Entity::BusinessTrip))
    }

    async fn create_business_trip(
        &self,
        trip: NewBusinessTrip,
    ) -> Result<BusinessTripDetails, TravelError> {
        trip.validate()?;
        self.ensure_employee(trip.employee_id).await?;

        let trip = self.repos.business_trips.insert(&trip).await?;
        tracing::info!(trip_id = %trip.id, employee_id = %trip.employee_id, "created business trip");

        Ok(BusinessTripDetails {
            trip,
            expenses: Vec::new(),
        })
    }

    async fn update_business_trip(
        &self,
        id: BusinessTripId,
        patch: BusinessTripPatch,
    ) -> Result<BusinessTripDetails, TravelError> {
        let mut trip = self
            .repos
            .business_trips
            .get(id)
            .await?
            .ok_or(TravelError::NotFound(Entity::BusinessTrip))?;

        if let Some(employee_id) = patch.employee_id {
            self.ensure_employee(employee_id).await?;
        }

        trip.apply(patch);
        trip.validate()?;
        self.repos.business_trips.update(&trip).await?;

        self.get_business_trip(id).await
    }

    async fn delete_business_trip(&self, id: BusinessTripId) -> Result<(), TravelError> {
        if !self.repos.business_trips.delete(id).await? {
            return Err(TravelError::NotFound(Entity::BusinessTrip));
        }
        tracing::info!(trip_id = %id, "deleted business trip and its expenses");
        Ok(())
    }
}
