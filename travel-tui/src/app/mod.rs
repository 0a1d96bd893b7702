use crate::cache::{CacheKey, SessionCache};
use crate::config::TravelConfig;
use crate::types::{AnalyticsData, BusinessTrip, Employee, Expense, ExpenseType};
use std::collections::HashMap;
use std::path::PathBuf;

pub mod charts;
mod dialogs;
pub mod forms;
mod navigation;
mod state;
pub use state::{DeleteDialog, Dialog, FormDialog, FormMode, Page, RecordKind, ReportPicker};

/// A record as returned by a create or update call.
#[derive(Debug, Clone, PartialEq)]
pub enum Saved {
    Employee(Employee),
    ExpenseType(ExpenseType),
    BusinessTrip(BusinessTrip),
    Expense(Expense),
}

trait Keyed {
    fn key(&self) -> i64;
}

macro_rules! keyed {
    ($($ty:ty),*) => {
        $(impl Keyed for $ty {
            fn key(&self) -> i64 {
                self.id
            }
        })*
    };
}

keyed!(Employee, ExpenseType, BusinessTrip, Expense);

/// Replace the row with the same id, or append it.
fn upsert<T: Keyed>(list: &mut Vec<T>, item: T) {
    match list.iter_mut().find(|row| row.key() == item.key()) {
        Some(row) => *row = item,
        None => list.push(item),
    }
}

fn remove_by_id<T: Keyed>(list: &mut Vec<T>, id: i64) {
    list.retain(|row| row.key() != id);
}

/// Cache keys made stale by a successful mutation of `kind`.
pub fn stale_keys(kind: RecordKind, deleted: bool) -> &'static [CacheKey] {
    match (kind, deleted) {
        (RecordKind::BusinessTrip, _) => &[CacheKey::BusinessTrips, CacheKey::Analytics],
        (RecordKind::ExpenseType, _) => &[CacheKey::ExpenseTypes, CacheKey::Analytics],
        (RecordKind::Employee, true) => &[CacheKey::BusinessTrips, CacheKey::Analytics],
        (RecordKind::Employee, false) | (RecordKind::Expense, _) => &[CacheKey::Analytics],
    }
}

pub struct App {
    pub running: bool,
    pub page: Page,
    pub status_message: Option<String>,

    // Page data, each list as last fetched and patched
    pub employees: Vec<Employee>,
    pub expense_types: Vec<ExpenseType>,
    pub business_trips: Vec<BusinessTrip>,
    pub expenses: Vec<Expense>,
    pub analytics: Option<AnalyticsData>,

    // Highlighted row per page
    selected: HashMap<Page, usize>,

    // Overlays, drawn in this order on top of the page
    pub dialog: Option<Dialog>,
    pub report_picker: Option<ReportPicker>,
    pub alert: Option<String>,

    pub cache: SessionCache,
    pub download_dir: PathBuf,

    // Loading indicator
    pub is_loading: bool,
    pub throbber_state: throbber_widgets_tui::ThrobberState,
}

impl App {
    pub fn new(cfg: &TravelConfig) -> Self {
        Self {
            running: true,
            page: Page::Analytics,
            status_message: None,
            employees: Vec::new(),
            expense_types: Vec::new(),
            business_trips: Vec::new(),
            expenses: Vec::new(),
            analytics: None,
            selected: HashMap::new(),
            dialog: None,
            report_picker: None,
            alert: None,
            cache: SessionCache::new(cfg.cache_enabled),
            download_dir: cfg.download_dir.clone(),
            is_loading: false,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn set_employees(&mut self, employees: Vec<Employee>) {
        self.employees = employees;
        self.clamp_selection(Page::Employees);
    }

    pub fn set_expense_types(&mut self, expense_types: Vec<ExpenseType>) {
        self.expense_types = expense_types;
        self.clamp_selection(Page::ExpenseTypes);
    }

    pub fn set_business_trips(&mut self, business_trips: Vec<BusinessTrip>) {
        self.business_trips = business_trips;
        self.clamp_selection(Page::BusinessTrips);
    }

    pub fn set_expenses(&mut self, expenses: Vec<Expense>) {
        self.expenses = expenses;
        self.clamp_selection(Page::Expenses);
    }

    /// Patch the matching list with a created or updated record.
    pub fn apply_saved(&mut self, saved: Saved) {
        let kind = match saved {
            Saved::Employee(employee) => {
                upsert(&mut self.employees, employee);
                RecordKind::Employee
            }
            Saved::ExpenseType(expense_type) => {
                upsert(&mut self.expense_types, expense_type);
                RecordKind::ExpenseType
            }
            Saved::BusinessTrip(trip) => {
                upsert(&mut self.business_trips, trip);
                RecordKind::BusinessTrip
            }
            Saved::Expense(expense) => {
                upsert(&mut self.expenses, expense);
                RecordKind::Expense
            }
        };
        self.cache.invalidate(stale_keys(kind, false));
    }

    /// Remove exactly the deleted row from its list.
    pub fn apply_deleted(&mut self, kind: RecordKind, id: i64) {
        match kind {
            RecordKind::Employee => remove_by_id(&mut self.employees, id),
            RecordKind::ExpenseType => remove_by_id(&mut self.expense_types, id),
            RecordKind::BusinessTrip => remove_by_id(&mut self.business_trips, id),
            RecordKind::Expense => remove_by_id(&mut self.expenses, id),
        }
        if let Some(page) = Page::ALL.into_iter().find(|p| p.record_kind() == Some(kind)) {
            self.clamp_selection(page);
        }
        self.cache.invalidate(stale_keys(kind, true));
    }

    pub fn employee_label(&self, id: i64) -> String {
        self.employees
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.fio.clone())
            .unwrap_or_else(|| placeholder(id))
    }

    pub fn expense_type_label(&self, id: i64) -> String {
        self.expense_types
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.name.clone())
            .unwrap_or_else(|| placeholder(id))
    }

    /// Trips have no name of their own; they read as "destination (dates)".
    pub fn business_trip_label(&self, id: i64) -> String {
        self.business_trips
            .iter()
            .find(|t| t.id == id)
            .map(|t| {
                format!(
                    "{} ({} - {})",
                    charts::destination_label(t.destination.as_deref()),
                    forms::format_date(t.start_trip),
                    forms::format_date(t.end_trip)
                )
            })
            .unwrap_or_else(|| placeholder(id))
    }
}

fn placeholder(id: i64) -> String {
    format!("#{}", id)
}
