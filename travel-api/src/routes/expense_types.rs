use axum::{extract::State, routing::get, Json, Router};
use tracing::instrument;

use super::{ApiError, PathParams, JsonBody};
use crate::{
    adapters::inbound::http::{CreateExpenseTypeBody, ExpenseTypeResponse, UpdateExpenseTypeBody},
    app_state::AppState,
    domain::models::ExpenseTypeId,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_expense_types).post(create_expense_type))
        .route(
            "/:id",
            get(get_expense_type)
                .put(update_expense_type)
                .delete(delete_expense_type),
        )
}

#[instrument(name = "GET /expense_types", skip(app_state))]
async fn list_expense_types(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<ExpenseTypeResponse>>, ApiError> {
    let expense_types = app_state.expense_types.list_expense_types().await?;
    Ok(Json(expense_types.into_iter().map(Into::into).collect()))
}

#[instrument(name = "GET /expense_types/:id", skip(app_state))]
async fn get_expense_type(
    State(app_state): State<AppState>,
    PathParams(id): PathParams<i64>,
) -> Result<Json<ExpenseTypeResponse>, ApiError> {
    let expense_type = app_state
        .expense_types
        .get_expense_type(ExpenseTypeId::new(id))
        .await?;
    Ok(Json(expense_type.into()))
}

#[instrument(name = "POST /expense_types", skip(app_state))]
async fn create_expense_type(
    State(app_state): State<AppState>,
    JsonBody(body): JsonBody<CreateExpenseTypeBody>,
) -> Result<Json<ExpenseTypeResponse>, ApiError> {
    let expense_type = app_state
        .expense_types
        .create_expense_type(body.into())
        .await?;
    Ok(Json(expense_type.into()))
}

#[instrument(name = "PUT /expense_types/:id", skip(app_state))]
async fn update_expense_type(
    State(app_state): State<AppState>,
    PathParams(id): PathParams<i64>,
    JsonBody(body): JsonBody<UpdateExpenseTypeBody>,
) -> Result<Json<ExpenseTypeResponse>, ApiError> {
    let expense_type = app_state
        .expense_types
        .update_expense_type(ExpenseTypeId::new(id), body.into())
        .await?;
    Ok(Json(expense_type.into()))
}

/// Responds with the type as it was before deletion.
#[instrument(name = "DELETE /expense_types/:id", skip(app_state))]
async fn delete_expense_type(
    State(app_state): State<AppState>,
    PathParams(id): PathParams<i64>,
) -> Result<Json<ExpenseTypeResponse>, ApiError> {
    let expense_type = app_state
        .expense_types
        .delete_expense_type(ExpenseTypeId::new(id))
        .await?;
    Ok(Json(expense_type.into()))
}
