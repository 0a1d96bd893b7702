use serde::{Deserialize, Serialize};
use std::fmt;

/// Declares a transparent identifier over the SQLite `INTEGER PRIMARY KEY`.
macro_rules! row_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            pub fn new(id: i64) -> Self {
                Self(id)
            }

            pub fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

row_id!(
    /// Identifier of an employee row.
    EmployeeId
);

row_id!(
    /// Identifier of an expense type row.
    ExpenseTypeId
);

row_id!(
    /// Identifier of a business trip row.
    BusinessTripId
);

row_id!(
    /// Identifier of a single expense row.
    ExpenseId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_serialize_as_plain_integers() {
        let json = serde_json::to_string(&EmployeeId::new(42)).unwrap();
        assert_eq!(json, "42");

        let id: ExpenseId = serde_json::from_str("7").unwrap();
        assert_eq!(id.as_i64(), 7);
    }
}
