use super::*;

impl App {
    /// Switch to `page`. Callers enqueue the page load.
    pub fn switch_page(&mut self, page: Page) {
        self.page = page;
        self.status_message = None;
    }

    pub fn row_count(&self, page: Page) -> usize {
        match page {
            Page::Analytics => 0,
            Page::Employees => self.employees.len(),
            Page::ExpenseTypes => self.expense_types.len(),
            Page::BusinessTrips => self.business_trips.len(),
            Page::Expenses => self.expenses.len(),
        }
    }

    pub fn selected_index(&self, page: Page) -> Option<usize> {
        let count = self.row_count(page);
        if count == 0 {
            return None;
        }
        Some(self.selected.get(&page).copied().unwrap_or(0).min(count - 1))
    }

    /// Move the highlight down (vim-style j or down), stopping at the end.
    pub fn select_next(&mut self) {
        let page = self.page;
        if let Some(index) = self.selected_index(page) {
            let last = self.row_count(page) - 1;
            self.selected.insert(page, (index + 1).min(last));
        }
    }

    /// Move the highlight up (vim-style k or up), stopping at the top.
    pub fn select_previous(&mut self) {
        let page = self.page;
        if let Some(index) = self.selected_index(page) {
            self.selected.insert(page, index.saturating_sub(1));
        }
    }

    pub(super) fn clamp_selection(&mut self, page: Page) {
        match self.selected_index(page) {
            Some(index) => {
                self.selected.insert(page, index);
            }
            None => {
                self.selected.remove(&page);
            }
        }
    }

    /// Id of the highlighted row on the current page.
    pub fn selected_id(&self) -> Option<i64> {
        let index = self.selected_index(self.page)?;
        match self.page {
            Page::Analytics => None,
            Page::Employees => self.employees.get(index).map(|e| e.id),
            Page::ExpenseTypes => self.expense_types.get(index).map(|t| t.id),
            Page::BusinessTrips => self.business_trips.get(index).map(|t| t.id),
            Page::Expenses => self.expenses.get(index).map(|e| e.id),
        }
    }
}
