use super::{BusinessTripDetails, EmployeeId};

/// An employee who can be sent on business trips.
#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    pub id: EmployeeId,
    /// Full name (surname, given name, patronymic).
    pub fio: String,
}

impl Employee {
    pub fn new(id: impl Into<EmployeeId>, fio: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fio: fio.into(),
        }
    }

    pub fn apply(&mut self, patch: EmployeePatch) {
        if let Some(fio) = patch.fio {
            self.fio = fio;
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewEmployee {
    pub fio: String,
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeePatch {
    pub fio: Option<String>,
}

/// An employee together with their trips, as returned by read endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeDetails {
    pub employee: Employee,
    pub business_trips: Vec<BusinessTripDetails>,
}
