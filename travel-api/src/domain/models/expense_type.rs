use super::ExpenseTypeId;

/// A category of expense, e.g. accommodation or per diem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseType {
    pub id: ExpenseTypeId,
    pub name: String,
}

impl ExpenseType {
    pub fn new(id: impl Into<ExpenseTypeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    pub fn apply(&mut self, patch: ExpenseTypePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpenseType {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseTypePatch {
    pub name: Option<String>,
}
