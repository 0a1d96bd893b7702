//! Joins flat rows into the nested read models served by the API.

use std::collections::HashMap;

use itertools::Itertools;

use crate::domain::{
    models::{
        BusinessTrip, BusinessTripDetails, BusinessTripId, Employee, EmployeeDetails,
        EmployeeId, Expense, ExpenseDetails, ExpenseType, ExpenseTypeId,
    },
    ports::outbound::Repositories,
    TravelError,
};

pub(super) fn expense_details(
    expenses: Vec<Expense>,
    expense_types: &[ExpenseType],
) -> Vec<ExpenseDetails> {
    let types: HashMap<ExpenseTypeId, &ExpenseType> =
        expense_types.iter().map(|t| (t.id, t)).collect();

    expenses
        .into_iter()
        .filter_map(|expense| {
            let expense_type = types.get(&expense.expense_type_id)?;
            Some(ExpenseDetails {
                expense_type: (*expense_type).clone(),
                expense,
            })
        })
        .collect()
}

pub(super) fn trip_details(
    trips: Vec<BusinessTrip>,
    expenses: Vec<ExpenseDetails>,
) -> Vec<BusinessTripDetails> {
    let mut by_trip: HashMap<BusinessTripId, Vec<ExpenseDetails>> = expenses
        .into_iter()
        .into_group_map_by(|details| details.expense.business_trip_id);

    trips
        .into_iter()
        .map(|trip| BusinessTripDetails {
            expenses: by_trip.remove(&trip.id).unwrap_or_default(),
            trip,
        })
        .collect()
}

pub(super) fn employee_details(
    employees: Vec<Employee>,
    trips: Vec<BusinessTripDetails>,
) -> Vec<EmployeeDetails> {
    let mut by_employee: HashMap<EmployeeId, Vec<BusinessTripDetails>> = trips
        .into_iter()
        .into_group_map_by(|details| details.trip.employee_id);

    employees
        .into_iter()
        .map(|employee| EmployeeDetails {
            business_trips: by_employee.remove(&employee.id).unwrap_or_default(),
            employee,
        })
        .collect()
}

/// Loads the expenses of the given trips and nests them.
pub(super) async fn load_trip_details(
    repos: &Repositories,
    trips: Vec<BusinessTrip>,
) -> Result<Vec<BusinessTripDetails>, TravelError> {
    if trips.is_empty() {
        return Ok(Vec::new());
    }

    let expense_types = repos.expense_types.list().await?;
    let mut expenses = Vec::new();
    for trip in &trips {
        expenses.extend(repos.expenses.list_by_trip(trip.id).await?);
    }

    Ok(trip_details(trips, expense_details(expenses, &expense_types)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::ExpenseId;
    use time::macros::datetime;

    fn trip(id: i64, employee_id: i64) -> BusinessTrip {
        BusinessTrip {
            id: BusinessTripId::new(id),
            employee_id: EmployeeId::new(employee_id),
            destination: None,
            start_trip: datetime!(2024-03-01 0:00 UTC),
            end_trip: datetime!(2024-03-02 0:00 UTC),
        }
    }

    fn expense(id: i64, trip_id: i64, type_id: i64, amount: f64) -> Expense {
        Expense {
            id: ExpenseId::new(id),
            business_trip_id: BusinessTripId::new(trip_id),
            expense_type_id: ExpenseTypeId::new(type_id),
            amount,
        }
    }

    #[test]
    fn expenses_are_grouped_under_their_trip_in_order() {
        let types = vec![ExpenseType::new(1, "Hotel")];
        let details = expense_details(
            vec![
                expense(1, 2, 1, 10.0),
                expense(2, 1, 1, 20.0),
                expense(3, 2, 1, 30.0),
            ],
            &types,
        );

        let trips = trip_details(vec![trip(1, 1), trip(2, 1), trip(3, 1)], details);

        assert_eq!(trips.len(), 3);
        assert_eq!(trips[0].expenses.len(), 1);
        let second: Vec<_> = trips[1].expenses.iter().map(|e| e.expense.amount).collect();
        assert_eq!(second, vec![10.0, 30.0]);
        assert!(trips[2].expenses.is_empty());
    }

    #[test]
    fn expense_with_unknown_type_is_skipped() {
        let details = expense_details(vec![expense(1, 1, 99, 5.0)], &[]);
        assert!(details.is_empty());
    }

    #[test]
    fn employees_without_trips_get_an_empty_list() {
        let employees = vec![Employee::new(1, "Иванов И.И."), Employee::new(2, "Петров П.П.")];
        let trips = trip_details(vec![trip(1, 2)], Vec::new());

        let nested = employee_details(employees, trips);

        assert!(nested[0].business_trips.is_empty());
        assert_eq!(nested[1].business_trips.len(), 1);
    }
}
