use crate::types::{ReportDataset, ReportFormat};

use super::forms::RecordForm;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Analytics,
    Employees,
    ExpenseTypes,
    BusinessTrips,
    Expenses,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::Analytics,
        Page::Employees,
        Page::ExpenseTypes,
        Page::BusinessTrips,
        Page::Expenses,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Page::Analytics => "Analytics",
            Page::Employees => "Employees",
            Page::ExpenseTypes => "Expense Types",
            Page::BusinessTrips => "Business Trips",
            Page::Expenses => "Expenses",
        }
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|p| p == self).unwrap_or(0)
    }

    pub fn next(&self) -> Page {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Page {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// `1`..`5` in side navigation order.
    pub fn from_digit(c: char) -> Option<Page> {
        let n = c.to_digit(10)? as usize;
        n.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    /// The record type edited on this page, if any.
    pub fn record_kind(&self) -> Option<RecordKind> {
        match self {
            Page::Analytics => None,
            Page::Employees => Some(RecordKind::Employee),
            Page::ExpenseTypes => Some(RecordKind::ExpenseType),
            Page::BusinessTrips => Some(RecordKind::BusinessTrip),
            Page::Expenses => Some(RecordKind::Expense),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Employee,
    ExpenseType,
    BusinessTrip,
    Expense,
}

impl RecordKind {
    pub fn label(&self) -> &'static str {
        match self {
            RecordKind::Employee => "Employee",
            RecordKind::ExpenseType => "Expense Type",
            RecordKind::BusinessTrip => "Business Trip",
            RecordKind::Expense => "Expense",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i64),
}

/// Create/edit dialog. Closing it drops the form, so reopening starts fresh.
#[derive(Debug, Clone, PartialEq)]
pub struct FormDialog {
    pub kind: RecordKind,
    pub mode: FormMode,
    pub form: RecordForm,
    /// Inline validation message; no request is sent while this is set.
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteDialog {
    pub kind: RecordKind,
    pub id: i64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Dialog {
    Form(FormDialog),
    Delete(DeleteDialog),
}

/// State of the report download picker on the analytics page.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ReportPicker {
    pub format_index: usize,
    pub dataset_index: usize,
}

impl ReportPicker {
    pub fn format(&self) -> ReportFormat {
        ReportFormat::ALL[self.format_index % ReportFormat::ALL.len()]
    }

    pub fn dataset(&self) -> ReportDataset {
        ReportDataset::ALL[self.dataset_index % ReportDataset::ALL.len()]
    }

    pub fn toggle_format(&mut self) {
        self.format_index = (self.format_index + 1) % ReportFormat::ALL.len();
    }

    pub fn next_dataset(&mut self) {
        self.dataset_index = (self.dataset_index + 1) % ReportDataset::ALL.len();
    }

    pub fn prev_dataset(&mut self) {
        let len = ReportDataset::ALL.len();
        self.dataset_index = (self.dataset_index + len - 1) % len;
    }
}

/// A text input with mid-string cursor support.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextInput {
    pub value: String,
    pub cursor: usize,
}

impl TextInput {
    pub fn from_str(s: &str) -> Self {
        Self {
            value: s.to_string(),
            cursor: s.len(),
        }
    }

    /// Insert a character at the cursor position.
    pub fn insert(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Delete the character immediately before the cursor (backspace).
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let new_cursor = self.prev_boundary(self.cursor);
        self.value.drain(new_cursor..self.cursor);
        self.cursor = new_cursor;
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.prev_boundary(self.cursor);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.value.len() {
            self.cursor = self.next_boundary(self.cursor);
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.value.len();
    }

    /// Returns the string split at the cursor: (before, after).
    pub fn split_at_cursor(&self) -> (&str, &str) {
        (&self.value[..self.cursor], &self.value[self.cursor..])
    }

    fn prev_boundary(&self, pos: usize) -> usize {
        let mut p = pos;
        loop {
            p -= 1;
            if self.value.is_char_boundary(p) {
                return p;
            }
        }
    }

    fn next_boundary(&self, pos: usize) -> usize {
        let mut p = pos + 1;
        while p <= self.value.len() && !self.value.is_char_boundary(p) {
            p += 1;
        }
        p
    }
}
