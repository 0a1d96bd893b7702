//! HTTP request bodies for the record endpoints.
//!
//! Create bodies carry every required field; update bodies make all fields
//! optional and only the ones present are applied.

use serde::{Deserialize, Deserializer};
use serde_with::{serde_as, DeserializeAs};
use time::{
    format_description::well_known::Rfc3339, macros::format_description, OffsetDateTime,
    PrimitiveDateTime,
};

use crate::domain::models::{
    BusinessTripId, BusinessTripPatch, EmployeeId, EmployeePatch, ExpensePatch, ExpenseTypeId,
    ExpenseTypePatch, NewBusinessTrip, NewEmployee, NewExpense, NewExpenseType,
};

/// Accepts RFC 3339 timestamps, or a naive `YYYY-MM-DDTHH:MM[:SS[.f]]`
/// which is read as UTC.
pub struct TripTimestamp;

impl<'de> DeserializeAs<'de, OffsetDateTime> for TripTimestamp {
    fn deserialize_as<D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_timestamp(&raw).ok_or_else(|| {
            serde::de::Error::custom(format!("{raw} is not a valid date and time"))
        })
    }
}

fn parse_timestamp(raw: &str) -> Option<OffsetDateTime> {
    if let Ok(parsed) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(parsed);
    }

    let naive = format_description!(
        "[year]-[month]-[day]T[hour]:[minute][optional [:[second][optional [.[subsecond]]]]]"
    );
    PrimitiveDateTime::parse(raw, naive)
        .ok()
        .map(PrimitiveDateTime::assume_utc)
}

#[derive(Debug, Deserialize)]
pub struct CreateEmployeeBody {
    pub fio: String,
}

impl From<CreateEmployeeBody> for NewEmployee {
    fn from(body: CreateEmployeeBody) -> Self {
        Self { fio: body.fio }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateEmployeeBody {
    pub fio: Option<String>,
}

impl From<UpdateEmployeeBody> for EmployeePatch {
    fn from(body: UpdateEmployeeBody) -> Self {
        Self { fio: body.fio }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateExpenseTypeBody {
    pub name: String,
}

impl From<CreateExpenseTypeBody> for NewExpenseType {
    fn from(body: CreateExpenseTypeBody) -> Self {
        Self { name: body.name }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateExpenseTypeBody {
    pub name: Option<String>,
}

impl From<UpdateExpenseTypeBody> for ExpenseTypePatch {
    fn from(body: UpdateExpenseTypeBody) -> Self {
        Self { name: body.name }
    }
}

#[serde_as]
#[derive(Debug, Deserialize)]
pub struct CreateBusinessTripBody {
    pub employee_id: EmployeeId,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde_as(as = "TripTimestamp")]
    pub start_trip: OffsetDateTime,
    #[serde_as(as = "TripTimestamp")]
    pub end_trip: OffsetDateTime,
}

impl From<CreateBusinessTripBody> for NewBusinessTrip {
    fn from(body: CreateBusinessTripBody) -> Self {
        Self {
            employee_id: body.employee_id,
            destination: body.destination,
            start_trip: body.start_trip,
            end_trip: body.end_trip,
        }
    }
}

/// `destination: null` clears the destination, an absent key leaves it as is.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct UpdateBusinessTripBody {
    pub employee_id: Option<EmployeeId>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub destination: Option<Option<String>>,
    #[serde_as(as = "Option<TripTimestamp>")]
    pub start_trip: Option<OffsetDateTime>,
    #[serde_as(as = "Option<TripTimestamp>")]
    pub end_trip: Option<OffsetDateTime>,
}

impl From<UpdateBusinessTripBody> for BusinessTripPatch {
    fn from(body: UpdateBusinessTripBody) -> Self {
        Self {
            employee_id: body.employee_id,
            destination: body.destination,
            start_trip: body.start_trip,
            end_trip: body.end_trip,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateExpenseBody {
    pub business_trip_id: BusinessTripId,
    pub expense_type_id: ExpenseTypeId,
    pub amount: f64,
}

impl From<CreateExpenseBody> for NewExpense {
    fn from(body: CreateExpenseBody) -> Self {
        Self {
            business_trip_id: body.business_trip_id,
            expense_type_id: body.expense_type_id,
            amount: body.amount,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateExpenseBody {
    pub business_trip_id: Option<BusinessTripId>,
    pub expense_type_id: Option<ExpenseTypeId>,
    pub amount: Option<f64>,
}

impl From<UpdateExpenseBody> for ExpensePatch {
    fn from(body: UpdateExpenseBody) -> Self {
        Self {
            business_trip_id: body.business_trip_id,
            expense_type_id: body.expense_type_id,
            amount: body.amount,
        }
    }
}
