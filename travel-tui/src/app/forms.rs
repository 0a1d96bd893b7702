use time::{macros::format_description, Date, OffsetDateTime};

use crate::api::dto::{BusinessTripRequest, EmployeeRequest, ExpenseRequest, ExpenseTypeRequest};

use super::state::{RecordKind, TextInput};

#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceOption {
    pub id: i64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldInput {
    Text(TextInput),
    /// A pick from a sibling list, cycled with Left/Right.
    Choice {
        options: Vec<ChoiceOption>,
        selected: Option<usize>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub label: &'static str,
    pub input: FieldInput,
    /// Time of day and offset reused when a date field is parsed back.
    pub anchor: Option<OffsetDateTime>,
}

impl FormField {
    pub fn text(label: &'static str, value: &str) -> Self {
        Self {
            label,
            input: FieldInput::Text(TextInput::from_str(value)),
            anchor: None,
        }
    }

    /// A `YYYY-MM-DD` text field seeded from an existing timestamp.
    pub fn date(label: &'static str, value: Option<OffsetDateTime>) -> Self {
        let text = value.map(format_date).unwrap_or_default();
        Self {
            anchor: value,
            ..Self::text(label, &text)
        }
    }

    pub fn choice(label: &'static str, options: Vec<ChoiceOption>, current: Option<i64>) -> Self {
        let selected = current.and_then(|id| options.iter().position(|o| o.id == id));
        Self {
            label,
            input: FieldInput::Choice { options, selected },
            anchor: None,
        }
    }

    fn text_value(&self) -> &str {
        match &self.input {
            FieldInput::Text(input) => input.value.as_str(),
            FieldInput::Choice { .. } => "",
        }
    }

    fn selected_id(&self) -> Option<i64> {
        match &self.input {
            FieldInput::Choice { options, selected } => {
                selected.and_then(|i| options.get(i)).map(|o| o.id)
            }
            FieldInput::Text(_) => None,
        }
    }
}

/// The editable fields of one record, in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordForm {
    pub fields: Vec<FormField>,
    pub focused: usize,
}

impl RecordForm {
    pub fn new(fields: Vec<FormField>) -> Self {
        Self { fields, focused: 0 }
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + 1) % self.fields.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + self.fields.len() - 1) % self.fields.len();
        }
    }

    fn focused_input(&mut self) -> Option<&mut FieldInput> {
        self.fields.get_mut(self.focused).map(|f| &mut f.input)
    }

    pub fn insert_char(&mut self, c: char) {
        if let Some(FieldInput::Text(input)) = self.focused_input() {
            input.insert(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(FieldInput::Text(input)) = self.focused_input() {
            input.backspace();
        }
    }

    /// Moves the cursor of a text field, or picks the previous option.
    pub fn left(&mut self) {
        match self.focused_input() {
            Some(FieldInput::Text(input)) => input.move_left(),
            Some(FieldInput::Choice { options, selected }) if !options.is_empty() => {
                *selected = Some(match *selected {
                    Some(0) | None => options.len() - 1,
                    Some(i) => i - 1,
                });
            }
            _ => {}
        }
    }

    /// Moves the cursor of a text field, or picks the next option.
    pub fn right(&mut self) {
        match self.focused_input() {
            Some(FieldInput::Text(input)) => input.move_right(),
            Some(FieldInput::Choice { options, selected }) if !options.is_empty() => {
                *selected = Some(match *selected {
                    None => 0,
                    Some(i) => (i + 1) % options.len(),
                });
            }
            _ => {}
        }
    }

    pub fn home(&mut self) {
        if let Some(FieldInput::Text(input)) = self.focused_input() {
            input.home();
        }
    }

    pub fn end(&mut self) {
        if let Some(FieldInput::Text(input)) = self.focused_input() {
            input.end();
        }
    }

    fn text(&self, index: usize) -> &str {
        self.fields.get(index).map(FormField::text_value).unwrap_or("")
    }

    fn choice(&self, index: usize) -> Option<i64> {
        self.fields.get(index).and_then(FormField::selected_id)
    }

    fn anchor(&self, index: usize) -> Option<OffsetDateTime> {
        self.fields.get(index).and_then(|f| f.anchor)
    }
}

/// A validated request body, ready to send.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Employee(EmployeeRequest),
    ExpenseType(ExpenseTypeRequest),
    BusinessTrip(BusinessTripRequest),
    Expense(ExpenseRequest),
}

pub fn employee_form(fio: &str) -> RecordForm {
    RecordForm::new(vec![FormField::text("Full name", fio)])
}

pub fn expense_type_form(name: &str) -> RecordForm {
    RecordForm::new(vec![FormField::text("Name", name)])
}

pub fn business_trip_form(
    employees: Vec<ChoiceOption>,
    employee_id: Option<i64>,
    destination: &str,
    start: Option<OffsetDateTime>,
    end: Option<OffsetDateTime>,
) -> RecordForm {
    RecordForm::new(vec![
        FormField::choice("Employee", employees, employee_id),
        FormField::text("Destination", destination),
        FormField::date("Start (YYYY-MM-DD)", start),
        FormField::date("End (YYYY-MM-DD)", end),
    ])
}

pub fn expense_form(
    trips: Vec<ChoiceOption>,
    trip_id: Option<i64>,
    types: Vec<ChoiceOption>,
    type_id: Option<i64>,
    amount: &str,
) -> RecordForm {
    RecordForm::new(vec![
        FormField::choice("Business trip", trips, trip_id),
        FormField::choice("Expense type", types, type_id),
        FormField::text("Amount", amount),
    ])
}

pub fn validate(kind: RecordKind, form: &RecordForm) -> Result<Payload, String> {
    match kind {
        RecordKind::Employee => {
            let fio = required(form.text(0), "Full name")?;
            Ok(Payload::Employee(EmployeeRequest { fio }))
        }
        RecordKind::ExpenseType => {
            let name = required(form.text(0), "Name")?;
            Ok(Payload::ExpenseType(ExpenseTypeRequest { name }))
        }
        RecordKind::BusinessTrip => {
            let employee_id = form.choice(0).ok_or("Choose an employee")?;
            let destination = Some(form.text(1).trim())
                .filter(|d| !d.is_empty())
                .map(str::to_string);
            let start_trip = parse_date(form.text(2), form.anchor(2), "Start date")?;
            let end_trip = parse_date(form.text(3), form.anchor(3), "End date")?;
            if end_trip < start_trip {
                return Err("End date must not be before start date".to_string());
            }
            Ok(Payload::BusinessTrip(BusinessTripRequest {
                employee_id,
                destination,
                start_trip,
                end_trip,
            }))
        }
        RecordKind::Expense => {
            let business_trip_id = form.choice(0).ok_or("Choose a business trip")?;
            let expense_type_id = form.choice(1).ok_or("Choose an expense type")?;
            let amount = parse_amount(form.text(2))?;
            Ok(Payload::Expense(ExpenseRequest {
                business_trip_id,
                expense_type_id,
                amount,
            }))
        }
    }
}

fn required(value: &str, field: &str) -> Result<String, String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(format!("{} must not be blank", field));
    }
    Ok(value.to_string())
}

/// `YYYY-MM-DD` at the anchor's time and offset, or midnight UTC without one.
fn parse_date(
    value: &str,
    anchor: Option<OffsetDateTime>,
    field: &str,
) -> Result<OffsetDateTime, String> {
    let format = format_description!("[year]-[month]-[day]");
    let date = Date::parse(value.trim(), &format)
        .map_err(|_| format!("{} must be a date like 2024-03-01", field))?;
    Ok(match anchor {
        Some(anchor) => date.with_time(anchor.time()).assume_offset(anchor.offset()),
        None => date.midnight().assume_utc(),
    })
}

fn parse_amount(value: &str) -> Result<f64, String> {
    value
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
        .ok_or_else(|| "Amount must be a number".to_string())
}

/// Inverse of the date parsing above, for seeding edit forms.
pub fn format_date(value: OffsetDateTime) -> String {
    let d = value.date();
    format!("{:04}-{:02}-{:02}", d.year(), d.month() as u8, d.day())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn options() -> Vec<ChoiceOption> {
        vec![
            ChoiceOption {
                id: 1,
                label: "Иванов Иван Иванович".to_string(),
            },
            ChoiceOption {
                id: 2,
                label: "Петрова Анна Сергеевна".to_string(),
            },
        ]
    }

    fn trip_form(employee_id: Option<i64>, destination: &str, start: &str, end: &str) -> RecordForm {
        let mut form = business_trip_form(options(), employee_id, destination, None, None);
        form.fields[2].input = FieldInput::Text(TextInput::from_str(start));
        form.fields[3].input = FieldInput::Text(TextInput::from_str(end));
        form
    }

    #[test]
    fn blank_name_is_rejected() {
        let form = employee_form("   ");
        assert_eq!(
            validate(RecordKind::Employee, &form),
            Err("Full name must not be blank".to_string())
        );
    }

    #[test]
    fn name_is_trimmed() {
        let form = expense_type_form("  Проезд ");
        assert_eq!(
            validate(RecordKind::ExpenseType, &form),
            Ok(Payload::ExpenseType(ExpenseTypeRequest {
                name: "Проезд".to_string()
            }))
        );
    }

    #[test]
    fn trip_requires_an_employee() {
        let form = trip_form(None, "", "2024-03-01", "2024-03-02");
        assert_eq!(
            validate(RecordKind::BusinessTrip, &form),
            Err("Choose an employee".to_string())
        );
    }

    #[test]
    fn trip_dates_must_be_ordered() {
        let form = trip_form(Some(2), "Казань", "2024-03-05", "2024-03-01");
        assert_eq!(
            validate(RecordKind::BusinessTrip, &form),
            Err("End date must not be before start date".to_string())
        );
    }

    #[test]
    fn valid_trip_builds_request_with_optional_destination() {
        let form = trip_form(Some(2), " ", "2024-03-01", "2024-03-01");

        let Ok(Payload::BusinessTrip(body)) = validate(RecordKind::BusinessTrip, &form) else {
            panic!("expected a trip payload");
        };
        assert_eq!(body.employee_id, 2);
        assert_eq!(body.destination, None);
        assert_eq!(body.start_trip, datetime!(2024-03-01 0:00 UTC));
    }

    #[test]
    fn seeded_trip_keeps_time_and_offset() {
        let start = datetime!(2024-09-02 8:00 UTC);
        let end = datetime!(2024-09-06 20:00 +03:00);
        let form = business_trip_form(options(), Some(1), "Сочи", Some(start), Some(end));
        assert_eq!(form.text(2), "2024-09-02");

        let Ok(Payload::BusinessTrip(body)) = validate(RecordKind::BusinessTrip, &form) else {
            panic!("expected a trip payload");
        };
        assert_eq!(body.start_trip, start);
        assert_eq!(body.end_trip, end);
    }

    #[test]
    fn changed_seeded_date_keeps_time_of_day() {
        let start = datetime!(2024-09-02 8:00 UTC);
        let mut form = business_trip_form(options(), Some(1), "", Some(start), Some(start));
        form.fields[3].input = FieldInput::Text(TextInput::from_str("2024-09-04"));

        let Ok(Payload::BusinessTrip(body)) = validate(RecordKind::BusinessTrip, &form) else {
            panic!("expected a trip payload");
        };
        assert_eq!(body.start_trip, start);
        assert_eq!(body.end_trip, datetime!(2024-09-04 8:00 UTC));
    }

    #[test]
    fn malformed_date_is_reported() {
        let form = trip_form(Some(1), "", "01.03.2024", "2024-03-02");
        assert_eq!(
            validate(RecordKind::BusinessTrip, &form),
            Err("Start date must be a date like 2024-03-01".to_string())
        );
    }

    #[test]
    fn expense_amount_must_be_finite() {
        for raw in ["", "abc", "inf", "NaN"] {
            let form = expense_form(options(), Some(1), options(), Some(2), raw);
            assert_eq!(
                validate(RecordKind::Expense, &form),
                Err("Amount must be a number".to_string()),
                "amount {raw:?}"
            );
        }

        let form = expense_form(options(), Some(1), options(), Some(2), "1500,50");
        assert_eq!(
            validate(RecordKind::Expense, &form),
            Ok(Payload::Expense(ExpenseRequest {
                business_trip_id: 1,
                expense_type_id: 2,
                amount: 1500.5
            }))
        );
    }

    #[test]
    fn choice_cycles_with_left_and_right() {
        let mut form = trip_form(None, "", "", "");

        form.right();
        assert_eq!(form.choice(0), Some(1));
        form.right();
        assert_eq!(form.choice(0), Some(2));
        form.right();
        assert_eq!(form.choice(0), Some(1));
        form.left();
        assert_eq!(form.choice(0), Some(2));
    }

    #[test]
    fn typing_goes_to_the_focused_text_field() {
        let mut form = trip_form(Some(1), "", "", "");
        form.insert_char('x');
        form.focus_next();
        form.insert_char('С');
        form.insert_char('x');
        form.backspace();

        assert_eq!(form.text(1), "С");
        form.focus_prev();
        form.focus_prev();
        assert_eq!(form.focused, 3);
    }

    #[test]
    fn dates_format_back_to_form_input() {
        assert_eq!(format_date(datetime!(2024-03-09 15:30 UTC)), "2024-03-09");
    }
}
