use axum::{extract::State, routing::get, Json, Router};
use tracing::instrument;

use super::{ApiError, PathParams, JsonBody};
use crate::{
    adapters::inbound::http::{
        CreateEmployeeBody, EmployeeResponse, MessageResponse, UpdateEmployeeBody,
    },
    app_state::AppState,
    domain::models::EmployeeId,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_employees).post(create_employee))
        .route(
            "/:id",
            get(get_employee).put(update_employee).delete(delete_employee),
        )
}

#[instrument(name = "GET /employees", skip(app_state))]
async fn list_employees(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<EmployeeResponse>>, ApiError> {
    let employees = app_state.employees.list_employees().await?;
    Ok(Json(employees.into_iter().map(Into::into).collect()))
}

#[instrument(name = "GET /employees/:id", skip(app_state))]
async fn get_employee(
    State(app_state): State<AppState>,
    PathParams(id): PathParams<i64>,
) -> Result<Json<EmployeeResponse>, ApiError> {
    let employee = app_state.employees.get_employee(EmployeeId::new(id)).await?;
    Ok(Json(employee.into()))
}

#[instrument(name = "POST /employees", skip(app_state))]
async fn create_employee(
    State(app_state): State<AppState>,
    JsonBody(body): JsonBody<CreateEmployeeBody>,
) -> Result<Json<EmployeeResponse>, ApiError> {
    let employee = app_state.employees.create_employee(body.into()).await?;
    Ok(Json(employee.into()))
}

#[instrument(name = "PUT /employees/:id", skip(app_state))]
async fn update_employee(
    State(app_state): State<AppState>,
    PathParams(id): PathParams<i64>,
    JsonBody(body): JsonBody<UpdateEmployeeBody>,
) -> Result<Json<EmployeeResponse>, ApiError> {
    let employee = app_state
        .employees
        .update_employee(EmployeeId::new(id), body.into())
        .await?;
    Ok(Json(employee.into()))
}

#[instrument(name = "DELETE /employees/:id", skip(app_state))]
async fn delete_employee(
    State(app_state): State<AppState>,
    PathParams(id): PathParams<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    app_state
        .employees
        .delete_employee(EmployeeId::new(id))
        .await?;
    Ok(Json(MessageResponse::new("Employee deleted")))
}
