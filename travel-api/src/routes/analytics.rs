use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::instrument;

use super::{ApiError, PathParams, QueryParams};
use crate::{
    app_state::AppState,
    domain::models::{
        format_average, AnalyticsSummary, DestinationTripCount, EmployeeExpenseTotal,
        EmployeeTripCount, ExpenseTypeTotal, ReportDataset, ReportFormat, DEFAULT_TOP_LIMIT,
    },
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/total_expenses", get(total_expenses))
        .route("/expenses_by_employee", get(expenses_by_employee))
        .route("/expenses_by_expense_type", get(expenses_by_expense_type))
        .route("/employees_with_most_trips", get(employees_with_most_trips))
        .route("/most_popular_destinations", get(most_popular_destinations))
        .route("/average_expense_per_trip", get(average_expense_per_trip))
        .route("/all_analytics", get(all_analytics))
        .route("/report/:format/:dataset", get(generate_report))
}

#[derive(Debug, Deserialize)]
struct LimitQuery {
    limit: Option<u32>,
}

impl LimitQuery {
    fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_TOP_LIMIT)
    }
}

#[instrument(name = "GET /analytics/total_expenses", skip(app_state))]
async fn total_expenses(State(app_state): State<AppState>) -> Result<Json<f64>, ApiError> {
    Ok(Json(app_state.analytics.total_expenses().await?))
}

#[instrument(name = "GET /analytics/expenses_by_employee", skip(app_state))]
async fn expenses_by_employee(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<EmployeeExpenseTotal>>, ApiError> {
    Ok(Json(app_state.analytics.expenses_by_employee().await?))
}

#[instrument(name = "GET /analytics/expenses_by_expense_type", skip(app_state))]
async fn expenses_by_expense_type(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<ExpenseTypeTotal>>, ApiError> {
    Ok(Json(app_state.analytics.expenses_by_expense_type().await?))
}

#[instrument(name = "GET /analytics/employees_with_most_trips", skip(app_state))]
async fn employees_with_most_trips(
    State(app_state): State<AppState>,
    QueryParams(query): QueryParams<LimitQuery>,
) -> Result<Json<Vec<EmployeeTripCount>>, ApiError> {
    let rows = app_state
        .analytics
        .employees_with_most_trips(query.limit())
        .await?;
    Ok(Json(rows))
}

#[instrument(name = "GET /analytics/most_popular_destinations", skip(app_state))]
async fn most_popular_destinations(
    State(app_state): State<AppState>,
    QueryParams(query): QueryParams<LimitQuery>,
) -> Result<Json<Vec<DestinationTripCount>>, ApiError> {
    let rows = app_state
        .analytics
        .most_popular_destinations(query.limit())
        .await?;
    Ok(Json(rows))
}

/// A bare JSON string such as `"12960.00"`.
#[instrument(name = "GET /analytics/average_expense_per_trip", skip(app_state))]
async fn average_expense_per_trip(
    State(app_state): State<AppState>,
) -> Result<Json<String>, ApiError> {
    let average = app_state.analytics.average_expense_per_trip().await?;
    Ok(Json(format_average(average)))
}

#[instrument(name = "GET /analytics/all_analytics", skip(app_state))]
async fn all_analytics(
    State(app_state): State<AppState>,
) -> Result<Json<AnalyticsSummary>, ApiError> {
    Ok(Json(app_state.analytics.summary().await?))
}

#[instrument(name = "GET /analytics/report/:format/:dataset", skip(app_state))]
async fn generate_report(
    State(app_state): State<AppState>,
    PathParams((format, dataset)): PathParams<(String, String)>,
) -> Result<Response, ApiError> {
    let format = ReportFormat::parse(&format)?;
    let dataset = ReportDataset::parse(&dataset)?;

    let report = app_state.analytics.generate_report(format, dataset).await?;

    Ok((
        [
            (header::CONTENT_TYPE, report.media_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment;filename={}", report.file_name),
            ),
        ],
        report.content,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use axum::{
        http::{header, Method, StatusCode},
        Router,
    };
    use serde_json::{json, Value};

    use crate::routes::test_support::{app, send, send_raw};

    /// Three employees with 3, 2 and 1 trips; expenses on four trips.
    async fn seeded_app() -> Router {
        let app = app().await;

        let mut type_ids = Vec::new();
        for name in ["Проживание", "Питание"] {
            let (_, body) = send(
                &app,
                Method::POST,
                "/expense_types",
                Some(json!({ "name": name })),
            )
            .await;
            type_ids.push(body["id"].clone());
        }

        let plan: [(&str, &[Option<&str>]); 3] = [
            ("Иванов Иван Иванович", &[Some("Москва"), Some("Москва"), Some("Казань")]),
            ("Петров Петр Петрович", &[Some("Москва"), None]),
            ("Сидоров Сидор Сидорович", &[Some("Казань")]),
        ];
        let mut trip_ids = Vec::new();
        for (fio, destinations) in plan {
            let (_, employee) =
                send(&app, Method::POST, "/employees", Some(json!({ "fio": fio }))).await;
            for destination in destinations {
                let (_, trip) = send(
                    &app,
                    Method::POST,
                    "/business_trips",
                    Some(json!({
                        "employee_id": employee["id"],
                        "destination": destination,
                        "start_trip": "2024-01-10T00:00:00Z",
                        "end_trip": "2024-01-12T00:00:00Z",
                    })),
                )
                .await;
                trip_ids.push(trip["id"].clone());
            }
        }

        // Trips 0, 1 (Ivanov), 3 (Petrov), 5 (Sidorov) get expenses.
        let expenses = [
            (0, 0, 10000.0),
            (0, 1, 2000.0),
            (1, 0, 6000.0),
            (3, 1, 3000.0),
            (5, 0, 3000.0),
        ];
        for (trip, kind, amount) in expenses {
            send(
                &app,
                Method::POST,
                "/expenses",
                Some(json!({
                    "business_trip_id": trip_ids[trip],
                    "expense_type_id": type_ids[kind],
                    "amount": amount,
                })),
            )
            .await;
        }

        app
    }

    #[tokio::test]
    async fn all_analytics_on_seeded_data() {
        let app = seeded_app().await;

        let (status, body) = send(&app, Method::GET, "/analytics/all_analytics", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_expenses"], 24000.0);
        assert_eq!(
            body["expenses_by_employee"],
            json!([
                { "employee": "Иванов Иван Иванович", "total_expenses": 18000.0 },
                { "employee": "Петров Петр Петрович", "total_expenses": 3000.0 },
                { "employee": "Сидоров Сидор Сидорович", "total_expenses": 3000.0 },
            ])
        );
        assert_eq!(
            body["expenses_by_expense_type"],
            json!([
                { "expense_type": "Проживание", "total_expenses": 19000.0 },
                { "expense_type": "Питание", "total_expenses": 5000.0 },
            ])
        );
        assert_eq!(
            body["employees_with_most_trips"][0],
            json!({ "employee": "Иванов Иван Иванович", "trip_count": 3 })
        );
        assert_eq!(
            body["most_popular_destinations"][0],
            json!({ "destination": "Москва", "trip_count": 3 })
        );
        // 24000 over four trips with expenses
        assert_eq!(body["average_expense_per_trip"], "6000.00");
    }

    #[tokio::test]
    async fn limit_query_caps_top_lists() {
        let app = seeded_app().await;

        let (_, top) = send(
            &app,
            Method::GET,
            "/analytics/employees_with_most_trips?limit=2",
            None,
        )
        .await;
        let (_, destinations) =
            send(&app, Method::GET, "/analytics/most_popular_destinations", None).await;

        assert_eq!(top.as_array().unwrap().len(), 2);
        assert_eq!(top[1]["trip_count"], 2);
        assert_eq!(destinations.as_array().unwrap().len(), 3);
        assert!(destinations
            .as_array()
            .unwrap()
            .iter()
            .any(|row| row["destination"] == Value::Null));
    }

    #[tokio::test]
    async fn single_value_endpoints_return_bare_values() {
        let app = seeded_app().await;

        let (_, total) = send(&app, Method::GET, "/analytics/total_expenses", None).await;
        let (_, average) =
            send(&app, Method::GET, "/analytics/average_expense_per_trip", None).await;

        assert_eq!(total, json!(24000.0));
        assert_eq!(average, json!("6000.00"));
    }

    #[tokio::test]
    async fn empty_database_reports_zero_average() {
        let app = app().await;

        let (_, body) = send(&app, Method::GET, "/analytics/all_analytics", None).await;

        assert_eq!(body["total_expenses"], 0.0);
        assert_eq!(body["average_expense_per_trip"], "0.00");
        assert_eq!(body["expenses_by_employee"], json!([]));
    }

    #[tokio::test]
    async fn text_report_is_an_attachment() {
        let app = seeded_app().await;

        let (status, headers, bytes) = send_raw(
            &app,
            Method::GET,
            "/analytics/report/text/total_expenses",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment;filename=report.txt"
        );
        assert!(headers[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/plain"));
        assert_eq!(String::from_utf8(bytes).unwrap(), "total_expenses: 24000.0\n");
    }

    #[tokio::test]
    async fn json_report_contains_every_dataset() {
        let app = seeded_app().await;

        let (_, headers, bytes) =
            send_raw(&app, Method::GET, "/analytics/report/json/all", None).await;

        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment;filename=report.json"
        );
        let report: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(report.as_object().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn invalid_report_parameters_are_rejected() {
        let app = app().await;

        let (status, body) = send(&app, Method::GET, "/analytics/report/pdf/all", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "detail": "Invalid report type" }));

        let (status, body) =
            send(&app, Method::GET, "/analytics/report/json/everything", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "detail": "Invalid data type: everything" }));
    }
}
