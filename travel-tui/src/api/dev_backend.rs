use reqwest::StatusCode;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use time::macros::datetime;

use crate::api::client::ClientError;
use crate::api::dto::{BusinessTripRequest, EmployeeRequest, ExpenseRequest, ExpenseTypeRequest};
use crate::types::{
    AnalyticsData, BusinessTrip, DestinationCount, Employee, EmployeeTotal, EmployeeTripCount,
    Expense, ExpenseType, ExpenseTypeTotal, ReportDataset, ReportFile, ReportFormat,
};

const TOP_LIMIT: usize = 5;

/// In-memory stand-in for travel-api used by `travel-tui dev`.
#[derive(Debug, Clone)]
pub struct DevBackend {
    store: Arc<Mutex<DevStore>>,
}

#[derive(Debug, Default)]
struct DevStore {
    employees: Vec<Employee>,
    expense_types: Vec<ExpenseType>,
    business_trips: Vec<BusinessTrip>,
    expenses: Vec<Expense>,
    last_id: i64,
}

impl DevStore {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn has_employee(&self, id: i64) -> bool {
        self.employees.iter().any(|e| e.id == id)
    }

    fn check_trip(&self, body: &BusinessTripRequest) -> Result<(), ClientError> {
        if !self.has_employee(body.employee_id) {
            return Err(bad_request(format!(
                "Employee with id {} does not exist",
                body.employee_id
            )));
        }
        if body.end_trip < body.start_trip {
            return Err(bad_request("end_trip must not be earlier than start_trip"));
        }
        Ok(())
    }

    fn check_expense(&self, body: &ExpenseRequest) -> Result<(), ClientError> {
        if !self.business_trips.iter().any(|t| t.id == body.business_trip_id) {
            return Err(bad_request(format!(
                "Business Trip with id {} does not exist",
                body.business_trip_id
            )));
        }
        if !self.expense_types.iter().any(|t| t.id == body.expense_type_id) {
            return Err(bad_request(format!(
                "Expense Type with id {} does not exist",
                body.expense_type_id
            )));
        }
        Ok(())
    }

    fn check_type_name(&self, name: &str, except: Option<i64>) -> Result<(), ClientError> {
        let taken = self
            .expense_types
            .iter()
            .any(|t| t.name == name && Some(t.id) != except);
        if taken {
            return Err(bad_request("Expense Type with this name already exists"));
        }
        Ok(())
    }
}

fn bad_request(detail: impl Into<String>) -> ClientError {
    ClientError::server(StatusCode::BAD_REQUEST, detail)
}

fn not_found(entity: &str) -> ClientError {
    ClientError::server(StatusCode::NOT_FOUND, format!("{} not found", entity))
}

impl DevBackend {
    pub fn new() -> Self {
        Self {
            store: Arc::new(Mutex::new(seed_dev_store())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, DevStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn employees(&self) -> Vec<Employee> {
        self.lock().employees.clone()
    }

    pub fn create_employee(&self, body: &EmployeeRequest) -> Result<Employee, ClientError> {
        let mut store = self.lock();
        let employee = Employee {
            id: store.next_id(),
            fio: body.fio.clone(),
        };
        store.employees.push(employee.clone());
        Ok(employee)
    }

    pub fn update_employee(&self, id: i64, body: &EmployeeRequest) -> Result<Employee, ClientError> {
        let mut store = self.lock();
        let employee = store
            .employees
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| not_found("Employee"))?;
        employee.fio = body.fio.clone();
        Ok(employee.clone())
    }

    /// Cascades to the employee's trips and their expenses.
    pub fn delete_employee(&self, id: i64) -> Result<(), ClientError> {
        let mut store = self.lock();
        if !store.has_employee(id) {
            return Err(not_found("Employee"));
        }
        let trip_ids: Vec<i64> = store
            .business_trips
            .iter()
            .filter(|t| t.employee_id == id)
            .map(|t| t.id)
            .collect();
        store.employees.retain(|e| e.id != id);
        store.business_trips.retain(|t| t.employee_id != id);
        store
            .expenses
            .retain(|e| !trip_ids.contains(&e.business_trip_id));
        Ok(())
    }

    pub fn expense_types(&self) -> Vec<ExpenseType> {
        self.lock().expense_types.clone()
    }

    pub fn create_expense_type(&self, body: &ExpenseTypeRequest) -> Result<ExpenseType, ClientError> {
        let mut store = self.lock();
        store.check_type_name(&body.name, None)?;
        let expense_type = ExpenseType {
            id: store.next_id(),
            name: body.name.clone(),
        };
        store.expense_types.push(expense_type.clone());
        Ok(expense_type)
    }

    pub fn update_expense_type(
        &self,
        id: i64,
        body: &ExpenseTypeRequest,
    ) -> Result<ExpenseType, ClientError> {
        let mut store = self.lock();
        store.check_type_name(&body.name, Some(id))?;
        let expense_type = store
            .expense_types
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| not_found("Expense Type"))?;
        expense_type.name = body.name.clone();
        Ok(expense_type.clone())
    }

    pub fn delete_expense_type(&self, id: i64) -> Result<ExpenseType, ClientError> {
        let mut store = self.lock();
        let index = store
            .expense_types
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| not_found("Expense Type"))?;
        let removed = store.expense_types.remove(index);
        store.expenses.retain(|e| e.expense_type_id != id);
        Ok(removed)
    }

    pub fn business_trips(&self) -> Vec<BusinessTrip> {
        self.lock().business_trips.clone()
    }

    pub fn create_business_trip(
        &self,
        body: &BusinessTripRequest,
    ) -> Result<BusinessTrip, ClientError> {
        let mut store = self.lock();
        store.check_trip(body)?;
        let trip = BusinessTrip {
            id: store.next_id(),
            employee_id: body.employee_id,
            destination: body.destination.clone(),
            start_trip: body.start_trip,
            end_trip: body.end_trip,
        };
        store.business_trips.push(trip.clone());
        Ok(trip)
    }

    pub fn update_business_trip(
        &self,
        id: i64,
        body: &BusinessTripRequest,
    ) -> Result<BusinessTrip, ClientError> {
        let mut store = self.lock();
        if !store.business_trips.iter().any(|t| t.id == id) {
            return Err(not_found("Business Trip"));
        }
        store.check_trip(body)?;
        let trip = store
            .business_trips
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| not_found("Business Trip"))?;
        trip.employee_id = body.employee_id;
        trip.destination = body.destination.clone();
        trip.start_trip = body.start_trip;
        trip.end_trip = body.end_trip;
        Ok(trip.clone())
    }

    pub fn delete_business_trip(&self, id: i64) -> Result<(), ClientError> {
        let mut store = self.lock();
        if !store.business_trips.iter().any(|t| t.id == id) {
            return Err(not_found("Business Trip"));
        }
        store.business_trips.retain(|t| t.id != id);
        store.expenses.retain(|e| e.business_trip_id != id);
        Ok(())
    }

    pub fn expenses(&self) -> Vec<Expense> {
        self.lock().expenses.clone()
    }

    pub fn create_expense(&self, body: &ExpenseRequest) -> Result<Expense, ClientError> {
        let mut store = self.lock();
        store.check_expense(body)?;
        let expense = Expense {
            id: store.next_id(),
            business_trip_id: body.business_trip_id,
            expense_type_id: body.expense_type_id,
            amount: body.amount,
        };
        store.expenses.push(expense.clone());
        Ok(expense)
    }

    pub fn update_expense(&self, id: i64, body: &ExpenseRequest) -> Result<Expense, ClientError> {
        let mut store = self.lock();
        if !store.expenses.iter().any(|e| e.id == id) {
            return Err(not_found("Expense"));
        }
        store.check_expense(body)?;
        let expense = store
            .expenses
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| not_found("Expense"))?;
        expense.business_trip_id = body.business_trip_id;
        expense.expense_type_id = body.expense_type_id;
        expense.amount = body.amount;
        Ok(expense.clone())
    }

    pub fn delete_expense(&self, id: i64) -> Result<(), ClientError> {
        let mut store = self.lock();
        if !store.expenses.iter().any(|e| e.id == id) {
            return Err(not_found("Expense"));
        }
        store.expenses.retain(|e| e.id != id);
        Ok(())
    }

    /// Same aggregates, ordering and limits as `GET /analytics/all_analytics`.
    pub fn analytics(&self) -> AnalyticsData {
        let store = self.lock();

        let employee_of_trip: HashMap<i64, i64> = store
            .business_trips
            .iter()
            .map(|t| (t.id, t.employee_id))
            .collect();
        let fio: HashMap<i64, &str> = store
            .employees
            .iter()
            .map(|e| (e.id, e.fio.as_str()))
            .collect();
        let type_name: HashMap<i64, &str> = store
            .expense_types
            .iter()
            .map(|t| (t.id, t.name.as_str()))
            .collect();

        let mut by_employee: HashMap<&str, f64> = HashMap::new();
        let mut by_type: HashMap<&str, f64> = HashMap::new();
        let mut by_trip: HashMap<i64, f64> = HashMap::new();
        for expense in &store.expenses {
            if let Some(name) = employee_of_trip
                .get(&expense.business_trip_id)
                .and_then(|employee_id| fio.get(employee_id))
            {
                *by_employee.entry(*name).or_default() += expense.amount;
            }
            if let Some(name) = type_name.get(&expense.expense_type_id) {
                *by_type.entry(*name).or_default() += expense.amount;
            }
            *by_trip.entry(expense.business_trip_id).or_default() += expense.amount;
        }

        let mut trips_by_employee: HashMap<&str, i64> = HashMap::new();
        let mut trips_by_destination: HashMap<Option<&str>, i64> = HashMap::new();
        for trip in &store.business_trips {
            if let Some(name) = fio.get(&trip.employee_id) {
                *trips_by_employee.entry(*name).or_default() += 1;
            }
            *trips_by_destination
                .entry(trip.destination.as_deref())
                .or_default() += 1;
        }

        let average = if by_trip.is_empty() {
            0.0
        } else {
            by_trip.values().sum::<f64>() / by_trip.len() as f64
        };

        AnalyticsData {
            total_expenses: store.expenses.iter().map(|e| e.amount).sum(),
            expenses_by_employee: sorted_totals(by_employee)
                .into_iter()
                .map(|(employee, total_expenses)| EmployeeTotal {
                    employee,
                    total_expenses,
                })
                .collect(),
            expenses_by_expense_type: sorted_totals(by_type)
                .into_iter()
                .map(|(expense_type, total_expenses)| ExpenseTypeTotal {
                    expense_type,
                    total_expenses,
                })
                .collect(),
            employees_with_most_trips: top_counts(trips_by_employee)
                .into_iter()
                .map(|(employee, trip_count)| EmployeeTripCount {
                    employee: employee.to_string(),
                    trip_count,
                })
                .collect(),
            most_popular_destinations: top_counts(trips_by_destination)
                .into_iter()
                .map(|(destination, trip_count)| DestinationCount {
                    destination: destination.map(str::to_string),
                    trip_count,
                })
                .collect(),
            average_expense_per_trip: format!("{:.2}", average),
        }
    }

    pub fn report(
        &self,
        format: ReportFormat,
        dataset: ReportDataset,
    ) -> Result<ReportFile, ClientError> {
        let Value::Object(all) = serde_json::to_value(self.analytics())? else {
            return Err(ClientError::server(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Report generation failed",
            ));
        };
        let selected: Map<String, Value> = match dataset {
            ReportDataset::All => all,
            other => all
                .into_iter()
                .filter(|(key, _)| key == other.as_str())
                .collect(),
        };

        let content = match format {
            ReportFormat::Json => render_json(&selected)?,
            ReportFormat::Text => render_text(&selected).into_bytes(),
        };

        Ok(ReportFile {
            file_name: format.file_name().to_string(),
            content,
        })
    }
}

fn sorted_totals(totals: HashMap<&str, f64>) -> Vec<(String, f64)> {
    let mut rows: Vec<(String, f64)> = totals
        .into_iter()
        .map(|(label, total)| (label.to_string(), total))
        .collect();
    rows.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    rows
}

fn top_counts<K: Ord>(counts: HashMap<K, i64>) -> Vec<(K, i64)> {
    let mut rows: Vec<(K, i64)> = counts.into_iter().collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    rows.truncate(TOP_LIMIT);
    rows
}

/// Pretty JSON with four-space indentation, matching the API's files.
fn render_json(values: &Map<String, Value>) -> Result<Vec<u8>, ClientError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    values.serialize(&mut serializer)?;
    Ok(buf)
}

fn render_text(values: &Map<String, Value>) -> String {
    let mut out = String::new();
    for (key, value) in values {
        match value {
            Value::Array(items) if items.is_empty() => {
                out.push_str(&format!("{}: (empty)\n", key));
            }
            Value::Array(items) => {
                out.push_str(&format!("{}:\n", key));
                for item in items {
                    out.push_str(&format!("  - {}\n", text_item(item)));
                }
            }
            other => out.push_str(&format!("{}: {}\n", key, scalar(other))),
        }
    }
    out
}

fn text_item(item: &Value) -> String {
    match item {
        Value::Object(fields) => fields
            .iter()
            .map(|(k, v)| format!("{}: {}", k, scalar(v)))
            .collect::<Vec<_>>()
            .join(", "),
        other => scalar(other),
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "n/a".to_string(),
        other => other.to_string(),
    }
}

fn seed_dev_store() -> DevStore {
    let mut store = DevStore::default();

    for fio in [
        "Иванов Иван Иванович",
        "Петрова Анна Сергеевна",
        "Сидоров Павел Андреевич",
    ] {
        let id = store.next_id();
        store.employees.push(Employee {
            id,
            fio: fio.to_string(),
        });
    }

    for name in ["Проезд", "Проживание", "Суточные"] {
        let id = store.next_id();
        store.expense_types.push(ExpenseType {
            id,
            name: name.to_string(),
        });
    }

    let trips = [
        (1, Some("Москва"), datetime!(2024-03-01 0:00 UTC), datetime!(2024-03-05 0:00 UTC)),
        (2, Some("Казань"), datetime!(2024-04-10 0:00 UTC), datetime!(2024-04-12 0:00 UTC)),
        (1, Some("Москва"), datetime!(2024-05-20 0:00 UTC), datetime!(2024-05-24 0:00 UTC)),
        (3, None, datetime!(2024-06-03 0:00 UTC), datetime!(2024-06-04 0:00 UTC)),
    ];
    for (employee_id, destination, start_trip, end_trip) in trips {
        let id = store.next_id();
        store.business_trips.push(BusinessTrip {
            id,
            employee_id,
            destination: destination.map(str::to_string),
            start_trip,
            end_trip,
        });
    }

    // (trip, type, amount) against the ids assigned above.
    let expenses = [
        (7, 4, 12500.0),
        (7, 5, 18000.0),
        (7, 6, 3500.0),
        (8, 4, 6400.0),
        (8, 5, 7200.0),
        (9, 4, 11800.0),
        (9, 6, 3500.0),
    ];
    for (business_trip_id, expense_type_id, amount) in expenses {
        let id = store.next_id();
        store.expenses.push(Expense {
            id,
            business_trip_id,
            expense_type_id,
            amount,
        });
    }

    store
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trip_request(employee_id: i64) -> BusinessTripRequest {
        BusinessTripRequest {
            employee_id,
            destination: Some("Сочи".to_string()),
            start_trip: datetime!(2024-07-01 0:00 UTC),
            end_trip: datetime!(2024-07-03 0:00 UTC),
        }
    }

    #[test]
    fn seeded_expenses_reference_seeded_rows() {
        let backend = DevBackend::new();
        let trips = backend.business_trips();
        let types = backend.expense_types();

        for expense in backend.expenses() {
            assert!(trips.iter().any(|t| t.id == expense.business_trip_id));
            assert!(types.iter().any(|t| t.id == expense.expense_type_id));
        }
    }

    #[test]
    fn deleting_employee_cascades_to_trips_and_expenses() {
        let backend = DevBackend::new();

        backend.delete_employee(1).unwrap();

        assert!(backend.business_trips().iter().all(|t| t.employee_id != 1));
        let remaining_trips: Vec<i64> = backend.business_trips().iter().map(|t| t.id).collect();
        assert!(backend
            .expenses()
            .iter()
            .all(|e| remaining_trips.contains(&e.business_trip_id)));
    }

    #[test]
    fn duplicate_expense_type_name_is_rejected() {
        let backend = DevBackend::new();

        let err = backend
            .create_expense_type(&ExpenseTypeRequest {
                name: "Проезд".to_string(),
            })
            .unwrap_err();

        assert_eq!(err.to_string(), "Expense Type with this name already exists");
    }

    #[test]
    fn renaming_expense_type_to_its_own_name_is_allowed() {
        let backend = DevBackend::new();

        let updated = backend
            .update_expense_type(
                4,
                &ExpenseTypeRequest {
                    name: "Проезд".to_string(),
                },
            )
            .unwrap();

        assert_eq!(updated.name, "Проезд");
    }

    #[test]
    fn trip_for_missing_employee_is_rejected() {
        let backend = DevBackend::new();

        let err = backend.create_business_trip(&trip_request(99)).unwrap_err();

        assert!(matches!(
            err,
            ClientError::Server { status, .. } if status == StatusCode::BAD_REQUEST
        ));
        assert!(backend.create_business_trip(&trip_request(2)).is_ok());
    }

    #[test]
    fn analytics_match_seeded_data() {
        let analytics = DevBackend::new().analytics();

        assert_eq!(analytics.total_expenses, 62900.0);
        assert_eq!(analytics.expenses_by_employee[0].employee, "Иванов Иван Иванович");
        assert_eq!(analytics.expenses_by_employee[0].total_expenses, 49300.0);
        assert_eq!(analytics.most_popular_destinations[0].destination.as_deref(), Some("Москва"));
        assert_eq!(analytics.most_popular_destinations[0].trip_count, 2);
        // Trip 10 has no expenses and is left out of the average.
        assert_eq!(analytics.average_expense_per_trip, "20966.67");
    }

    #[test]
    fn text_report_lists_items_indented() {
        let report = DevBackend::new()
            .report(ReportFormat::Text, ReportDataset::MostPopularDestinations)
            .unwrap();
        let text = String::from_utf8(report.content).unwrap();

        assert_eq!(report.file_name, "report.txt");
        assert!(text.starts_with("most_popular_destinations:\n"));
        assert!(text.contains("  - destination: Москва, trip_count: 2\n"));
    }

    #[test]
    fn text_report_marks_missing_and_empty_values() {
        let report = DevBackend::new()
            .report(ReportFormat::Text, ReportDataset::MostPopularDestinations)
            .unwrap();
        let text = String::from_utf8(report.content).unwrap();
        assert!(text.contains("  - destination: n/a, trip_count: 1\n"));

        let mut values = Map::new();
        values.insert("expenses_by_employee".to_string(), Value::Array(Vec::new()));
        assert_eq!(render_text(&values), "expenses_by_employee: (empty)\n");
    }

    #[test]
    fn json_report_uses_four_space_indent() {
        let report = DevBackend::new()
            .report(ReportFormat::Json, ReportDataset::TotalExpenses)
            .unwrap();

        assert_eq!(report.file_name, "report.json");
        assert_eq!(
            String::from_utf8(report.content).unwrap(),
            "{\n    \"total_expenses\": 62900.0\n}"
        );
    }
}
