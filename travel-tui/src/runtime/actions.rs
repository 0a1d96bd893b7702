use crate::api::{save_report, ApiClient, ClientError};
use crate::app::forms::{self, Payload};
use crate::app::{App, Dialog, FormMode, Page, RecordKind, Saved};
use crate::cache::CacheKey;
use crate::types::{ReportDataset, ReportFormat};
use serde::{de::DeserializeOwned, Serialize};
use std::future::Future;

use super::action_queue::Action;

pub(super) async fn run_action(action: Action, app: &mut App, client: &ApiClient) {
    match action {
        Action::LoadPage { page, force } => load_page(app, client, page, force).await,
        Action::SubmitForm => submit_form(app, client).await,
        Action::ConfirmDelete => confirm_delete(app, client).await,
        Action::DownloadReport { format, dataset } => {
            download_report(app, client, format, dataset).await
        }
    }
}

/// Read-before-fetch against the session cache; a successful fetch is written
/// back. Failures are logged and leave the caller's state untouched.
async fn cached_fetch<T, F, Fut>(app: &mut App, key: CacheKey, force: bool, fetch: F) -> Option<T>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, ClientError>>,
{
    if !force {
        if let Some(value) = app.cache.get(key) {
            tracing::debug!(key = key.as_str(), "served from session cache");
            return Some(value);
        }
    }

    let value = fetched(app, key.as_str(), fetch().await)?;
    app.cache.put(key, &value);
    Some(value)
}

fn fetched<T>(app: &mut App, what: &str, result: Result<T, ClientError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::error!(what, error = %err, "failed to load");
            app.set_status(format!("Could not load {}: {}", what, err));
            None
        }
    }
}

async fn load_employees(app: &mut App, client: &ApiClient) {
    if let Some(employees) = fetched(app, "employees", client.list_employees().await) {
        app.set_employees(employees);
    }
}

async fn load_expenses(app: &mut App, client: &ApiClient) {
    if let Some(expenses) = fetched(app, "expenses", client.list_expenses().await) {
        app.set_expenses(expenses);
    }
}

async fn load_expense_types(app: &mut App, client: &ApiClient, force: bool) {
    let fetch = || client.list_expense_types();
    if let Some(types) = cached_fetch(app, CacheKey::ExpenseTypes, force, fetch).await {
        app.set_expense_types(types);
    }
}

async fn load_business_trips(app: &mut App, client: &ApiClient, force: bool) {
    let fetch = || client.list_business_trips();
    if let Some(trips) = cached_fetch(app, CacheKey::BusinessTrips, force, fetch).await {
        app.set_business_trips(trips);
    }
}

async fn load_analytics(app: &mut App, client: &ApiClient, force: bool) {
    let fetch = || client.all_analytics();
    if let Some(analytics) = cached_fetch(app, CacheKey::Analytics, force, fetch).await {
        app.analytics = Some(analytics);
    }
}

/// Each page fetches its own list plus the sibling lists its labels need.
async fn load_page(app: &mut App, client: &ApiClient, page: Page, force: bool) {
    if force {
        app.status_message = None;
    }
    match page {
        Page::Analytics => load_analytics(app, client, force).await,
        Page::Employees => load_employees(app, client).await,
        Page::ExpenseTypes => load_expense_types(app, client, force).await,
        Page::BusinessTrips => {
            load_business_trips(app, client, force).await;
            load_employees(app, client).await;
        }
        Page::Expenses => {
            load_expenses(app, client).await;
            load_business_trips(app, client, force).await;
            load_expense_types(app, client, force).await;
            // Trip labels in the expense form name the employee.
            load_employees(app, client).await;
        }
    }
    if force && app.status_message.is_none() {
        app.set_status(format!("{} refreshed", page.title()));
    }
}

async fn submit_form(app: &mut App, client: &ApiClient) {
    let Some(dialog) = app.form_dialog_mut() else {
        return;
    };
    let payload = match forms::validate(dialog.kind, &dialog.form) {
        Ok(payload) => payload,
        Err(message) => {
            dialog.error = Some(message);
            return;
        }
    };
    dialog.error = None;
    let (kind, mode) = (dialog.kind, dialog.mode);

    let result = match (payload, mode) {
        (Payload::Employee(body), FormMode::Create) => {
            client.create_employee(&body).await.map(Saved::Employee)
        }
        (Payload::Employee(body), FormMode::Edit(id)) => {
            client.update_employee(id, &body).await.map(Saved::Employee)
        }
        (Payload::ExpenseType(body), FormMode::Create) => {
            client.create_expense_type(&body).await.map(Saved::ExpenseType)
        }
        (Payload::ExpenseType(body), FormMode::Edit(id)) => client
            .update_expense_type(id, &body)
            .await
            .map(Saved::ExpenseType),
        (Payload::BusinessTrip(body), FormMode::Create) => client
            .create_business_trip(&body)
            .await
            .map(Saved::BusinessTrip),
        (Payload::BusinessTrip(body), FormMode::Edit(id)) => client
            .update_business_trip(id, &body)
            .await
            .map(Saved::BusinessTrip),
        (Payload::Expense(body), FormMode::Create) => {
            client.create_expense(&body).await.map(Saved::Expense)
        }
        (Payload::Expense(body), FormMode::Edit(id)) => {
            client.update_expense(id, &body).await.map(Saved::Expense)
        }
    };

    match result {
        Ok(saved) => {
            app.apply_saved(saved);
            app.close_dialog();
            let verb = match mode {
                FormMode::Create => "created",
                FormMode::Edit(_) => "updated",
            };
            tracing::info!(kind = kind.label(), verb, "record saved");
            app.set_status(format!("{} {}", kind.label(), verb));
        }
        Err(err) => {
            tracing::error!(kind = kind.label(), error = %err, "save failed");
            app.show_alert(err.to_string());
        }
    }
}

async fn confirm_delete(app: &mut App, client: &ApiClient) {
    let Some(Dialog::Delete(target)) = &app.dialog else {
        return;
    };
    let (kind, id) = (target.kind, target.id);

    let result = match kind {
        RecordKind::Employee => client.delete_employee(id).await,
        RecordKind::ExpenseType => client.delete_expense_type(id).await.map(|_| ()),
        RecordKind::BusinessTrip => client.delete_business_trip(id).await,
        RecordKind::Expense => client.delete_expense(id).await,
    };

    match result {
        Ok(()) => {
            app.apply_deleted(kind, id);
            app.close_dialog();
            tracing::info!(kind = kind.label(), id, "record deleted");
            app.set_status(format!("{} deleted", kind.label()));
        }
        Err(err) => {
            tracing::error!(kind = kind.label(), id, error = %err, "delete failed");
            app.show_alert(err.to_string());
        }
    }
}

async fn download_report(
    app: &mut App,
    client: &ApiClient,
    format: ReportFormat,
    dataset: ReportDataset,
) {
    app.close_report_picker();

    let saved = match client.download_report(format, dataset).await {
        Ok(report) => save_report(&report, &app.download_dir).await,
        Err(err) => Err(err),
    };

    match saved {
        Ok(path) => app.set_status(format!("Report saved to {}", path.display())),
        Err(err) => {
            tracing::error!(
                format = format.as_str(),
                dataset = dataset.as_str(),
                error = %err,
                "report download failed"
            );
            app.show_alert(err.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::test_app;
    use crate::types::{AnalyticsData, ExpenseType};

    fn dev_client() -> ApiClient {
        ApiClient::dev().unwrap()
    }

    #[tokio::test]
    async fn page_load_fills_lists_and_cache() {
        let client = dev_client();
        let mut app = test_app();

        run_action(
            Action::LoadPage {
                page: Page::Expenses,
                force: false,
            },
            &mut app,
            &client,
        )
        .await;

        assert_eq!(app.expenses.len(), client.list_expenses().await.unwrap().len());
        assert!(!app.business_trips.is_empty());
        assert!(app.cache.contains(CacheKey::BusinessTrips));
        assert!(app.cache.contains(CacheKey::ExpenseTypes));
    }

    #[tokio::test]
    async fn cached_key_is_served_without_fetching() {
        let client = dev_client();
        let mut app = test_app();
        let cached = vec![ExpenseType {
            id: 99,
            name: "Из кэша".to_string(),
        }];
        app.cache.put(CacheKey::ExpenseTypes, &cached);

        load_page(&mut app, &client, Page::ExpenseTypes, false).await;
        assert_eq!(app.expense_types, cached);

        load_page(&mut app, &client, Page::ExpenseTypes, true).await;
        assert_eq!(app.expense_types, client.list_expense_types().await.unwrap());
        assert_eq!(
            app.cache.get::<Vec<ExpenseType>>(CacheKey::ExpenseTypes),
            Some(app.expense_types.clone())
        );
    }

    #[tokio::test]
    async fn submitting_a_create_form_appends_and_closes() {
        let client = dev_client();
        let mut app = test_app();
        load_page(&mut app, &client, Page::Employees, false).await;
        app.cache.put(CacheKey::Analytics, &AnalyticsData::default());
        let before = app.employees.len();

        app.switch_page(Page::Employees);
        app.open_create_dialog();
        if let Some(dialog) = app.form_dialog_mut() {
            "Смирнова Ольга Петровна"
                .chars()
                .for_each(|c| dialog.form.insert_char(c));
        }
        run_action(Action::SubmitForm, &mut app, &client).await;

        assert_eq!(app.dialog, None);
        assert_eq!(app.employees.len(), before + 1);
        assert_eq!(
            app.employees.last().map(|e| e.fio.as_str()),
            Some("Смирнова Ольга Петровна")
        );
        assert!(!app.cache.contains(CacheKey::Analytics));
    }

    #[tokio::test]
    async fn invalid_form_stays_open_without_a_request() {
        let client = dev_client();
        let mut app = test_app();
        app.switch_page(Page::ExpenseTypes);
        app.open_create_dialog();

        submit_form(&mut app, &client).await;

        let Some(Dialog::Form(dialog)) = &app.dialog else {
            panic!("dialog should stay open");
        };
        assert_eq!(dialog.error.as_deref(), Some("Name must not be blank"));
        assert_eq!(app.alert, None);
        assert_eq!(
            client.list_expense_types().await.unwrap().len(),
            3,
            "nothing was created"
        );
    }

    #[tokio::test]
    async fn rejected_save_alerts_and_leaves_list_unchanged() {
        let client = dev_client();
        let mut app = test_app();
        load_page(&mut app, &client, Page::ExpenseTypes, false).await;
        let before = app.expense_types.clone();

        app.switch_page(Page::ExpenseTypes);
        app.open_create_dialog();
        if let Some(dialog) = app.form_dialog_mut() {
            "Проезд".chars().for_each(|c| dialog.form.insert_char(c));
        }
        submit_form(&mut app, &client).await;

        assert_eq!(
            app.alert.as_deref(),
            Some("Expense Type with this name already exists")
        );
        assert!(matches!(app.dialog, Some(Dialog::Form(_))));
        assert_eq!(app.expense_types, before);
    }

    #[tokio::test]
    async fn confirmed_delete_removes_the_row() {
        let client = dev_client();
        let mut app = test_app();
        load_page(&mut app, &client, Page::BusinessTrips, false).await;
        app.switch_page(Page::BusinessTrips);
        let target = app.selected_id().unwrap();
        let before = app.business_trips.len();

        app.open_delete_dialog();
        confirm_delete(&mut app, &client).await;

        assert_eq!(app.dialog, None);
        assert_eq!(app.business_trips.len(), before - 1);
        assert!(app.business_trips.iter().all(|t| t.id != target));
        assert!(!app.cache.contains(CacheKey::BusinessTrips));
        assert_eq!(app.status_message.as_deref(), Some("Business Trip deleted"));
    }

    #[tokio::test]
    async fn failed_delete_keeps_dialog_and_row() {
        let client = dev_client();
        let mut app = test_app();
        load_page(&mut app, &client, Page::Employees, false).await;
        app.switch_page(Page::Employees);
        let id = app.selected_id().unwrap();
        client.delete_employee(id).await.unwrap();

        app.open_delete_dialog();
        confirm_delete(&mut app, &client).await;

        assert_eq!(app.alert.as_deref(), Some("Employee not found"));
        assert!(matches!(app.dialog, Some(Dialog::Delete(_))));
        assert!(app.employees.iter().any(|e| e.id == id));
    }

    #[tokio::test]
    async fn report_is_written_to_download_dir() {
        let client = dev_client();
        let mut app = test_app();
        let dir = std::env::temp_dir().join(format!("travel-tui-actions-{}", std::process::id()));
        app.download_dir = dir.clone();
        app.open_report_picker();

        download_report(&mut app, &client, ReportFormat::Json, ReportDataset::TotalExpenses).await;

        let written = std::fs::read_to_string(dir.join("report.json")).unwrap();
        assert!(written.contains("\"total_expenses\""));
        assert_eq!(app.report_picker, None);
        assert!(app
            .status_message
            .as_deref()
            .is_some_and(|m| m.starts_with("Report saved to")));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
