use super::forms::{self, ChoiceOption, RecordForm};
use super::*;

impl App {
    fn employee_options(&self) -> Vec<ChoiceOption> {
        self.employees
            .iter()
            .map(|e| ChoiceOption {
                id: e.id,
                label: e.fio.clone(),
            })
            .collect()
    }

    fn expense_type_options(&self) -> Vec<ChoiceOption> {
        self.expense_types
            .iter()
            .map(|t| ChoiceOption {
                id: t.id,
                label: t.name.clone(),
            })
            .collect()
    }

    fn business_trip_options(&self) -> Vec<ChoiceOption> {
        self.business_trips
            .iter()
            .map(|t| ChoiceOption {
                id: t.id,
                label: format!(
                    "{}, {}",
                    self.employee_label(t.employee_id),
                    self.business_trip_label(t.id)
                ),
            })
            .collect()
    }

    fn blank_form(&self, kind: RecordKind) -> RecordForm {
        match kind {
            RecordKind::Employee => forms::employee_form(""),
            RecordKind::ExpenseType => forms::expense_type_form(""),
            RecordKind::BusinessTrip => {
                forms::business_trip_form(self.employee_options(), None, "", None, None)
            }
            RecordKind::Expense => forms::expense_form(
                self.business_trip_options(),
                None,
                self.expense_type_options(),
                None,
                "",
            ),
        }
    }

    /// Form seeded from the record `id`, or `None` if it is no longer listed.
    fn seeded_form(&self, kind: RecordKind, id: i64) -> Option<RecordForm> {
        let form = match kind {
            RecordKind::Employee => {
                let employee = self.employees.iter().find(|e| e.id == id)?;
                forms::employee_form(&employee.fio)
            }
            RecordKind::ExpenseType => {
                let expense_type = self.expense_types.iter().find(|t| t.id == id)?;
                forms::expense_type_form(&expense_type.name)
            }
            RecordKind::BusinessTrip => {
                let trip = self.business_trips.iter().find(|t| t.id == id)?;
                forms::business_trip_form(
                    self.employee_options(),
                    Some(trip.employee_id),
                    trip.destination.as_deref().unwrap_or(""),
                    Some(trip.start_trip),
                    Some(trip.end_trip),
                )
            }
            RecordKind::Expense => {
                let expense = self.expenses.iter().find(|e| e.id == id)?;
                forms::expense_form(
                    self.business_trip_options(),
                    Some(expense.business_trip_id),
                    self.expense_type_options(),
                    Some(expense.expense_type_id),
                    &expense.amount.to_string(),
                )
            }
        };
        Some(form)
    }

    fn row_label(&self, kind: RecordKind, id: i64) -> String {
        match kind {
            RecordKind::Employee => self.employee_label(id),
            RecordKind::ExpenseType => self.expense_type_label(id),
            RecordKind::BusinessTrip => self.business_trip_label(id),
            RecordKind::Expense => self
                .expenses
                .iter()
                .find(|e| e.id == id)
                .map(|e| {
                    format!(
                        "{} · {}",
                        self.expense_type_label(e.expense_type_id),
                        charts::format_amount(e.amount)
                    )
                })
                .unwrap_or_else(|| placeholder(id)),
        }
    }

    pub fn open_create_dialog(&mut self) {
        let Some(kind) = self.page.record_kind() else {
            return;
        };
        self.dialog = Some(Dialog::Form(FormDialog {
            kind,
            mode: FormMode::Create,
            form: self.blank_form(kind),
            error: None,
        }));
    }

    pub fn open_edit_dialog(&mut self) {
        let (Some(kind), Some(id)) = (self.page.record_kind(), self.selected_id()) else {
            return;
        };
        if let Some(form) = self.seeded_form(kind, id) {
            self.dialog = Some(Dialog::Form(FormDialog {
                kind,
                mode: FormMode::Edit(id),
                form,
                error: None,
            }));
        }
    }

    pub fn open_delete_dialog(&mut self) {
        let (Some(kind), Some(id)) = (self.page.record_kind(), self.selected_id()) else {
            return;
        };
        self.dialog = Some(Dialog::Delete(DeleteDialog {
            kind,
            id,
            label: self.row_label(kind, id),
        }));
    }

    pub fn close_dialog(&mut self) {
        self.dialog = None;
    }

    pub fn form_dialog_mut(&mut self) -> Option<&mut FormDialog> {
        match &mut self.dialog {
            Some(Dialog::Form(dialog)) => Some(dialog),
            _ => None,
        }
    }

    pub fn open_report_picker(&mut self) {
        if self.page == Page::Analytics {
            self.report_picker = Some(ReportPicker::default());
        }
    }

    pub fn close_report_picker(&mut self) {
        self.report_picker = None;
    }

    /// Blocking message; every key but Enter/Esc is swallowed until dismissed.
    pub fn show_alert(&mut self, message: impl Into<String>) {
        self.alert = Some(message.into());
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::forms::{validate, FieldInput, Payload};
    use crate::app::tests::test_app;
    use time::macros::datetime;

    fn app_with_trip() -> App {
        let mut app = test_app();
        app.set_employees(vec![
            Employee {
                id: 1,
                fio: "Иванов Иван Иванович".to_string(),
            },
            Employee {
                id: 2,
                fio: "Петрова Анна Сергеевна".to_string(),
            },
        ]);
        app.set_business_trips(vec![BusinessTrip {
            id: 5,
            employee_id: 2,
            destination: None,
            start_trip: datetime!(2024-04-10 8:00 UTC),
            end_trip: datetime!(2024-04-12 20:00 +03:00),
        }]);
        app
    }

    #[test]
    fn edit_dialog_is_seeded_from_selected_row() {
        let mut app = app_with_trip();
        app.switch_page(Page::BusinessTrips);

        app.open_edit_dialog();

        let Some(Dialog::Form(dialog)) = &app.dialog else {
            panic!("expected a form dialog");
        };
        assert_eq!(dialog.mode, FormMode::Edit(5));
        let Ok(Payload::BusinessTrip(body)) = validate(dialog.kind, &dialog.form) else {
            panic!("seeded form should validate");
        };
        assert_eq!(body.employee_id, 2);
        assert_eq!(body.destination, None);
        assert_eq!(body.start_trip, datetime!(2024-04-10 8:00 UTC));
        assert_eq!(body.end_trip, datetime!(2024-04-12 20:00 +03:00));
    }

    #[test]
    fn create_dialog_starts_blank_with_sibling_options() {
        let mut app = app_with_trip();
        app.switch_page(Page::BusinessTrips);

        app.open_create_dialog();

        let Some(Dialog::Form(dialog)) = &app.dialog else {
            panic!("expected a form dialog");
        };
        assert_eq!(dialog.mode, FormMode::Create);
        let FieldInput::Choice { options, selected } = &dialog.form.fields[0].input else {
            panic!("employee field should be a choice");
        };
        assert_eq!(options.len(), 2);
        assert_eq!(*selected, None);
    }

    #[test]
    fn closing_and_reopening_resets_the_form() {
        let mut app = app_with_trip();
        app.switch_page(Page::Employees);
        app.open_create_dialog();
        if let Some(dialog) = app.form_dialog_mut() {
            dialog.form.insert_char('И');
        }

        app.close_dialog();
        app.open_create_dialog();

        let Some(Dialog::Form(dialog)) = &app.dialog else {
            panic!("expected a form dialog");
        };
        assert_eq!(dialog.form, forms::employee_form(""));
    }

    #[test]
    fn delete_dialog_names_the_row() {
        let mut app = app_with_trip();
        app.switch_page(Page::Employees);
        app.select_next();

        app.open_delete_dialog();

        assert_eq!(
            app.dialog,
            Some(Dialog::Delete(DeleteDialog {
                kind: RecordKind::Employee,
                id: 2,
                label: "Петрова Анна Сергеевна".to_string(),
            }))
        );
    }

    #[test]
    fn analytics_page_has_no_record_dialogs() {
        let mut app = app_with_trip();
        app.open_create_dialog();
        app.open_delete_dialog();
        assert_eq!(app.dialog, None);

        app.open_report_picker();
        assert!(app.report_picker.is_some());
    }
}
