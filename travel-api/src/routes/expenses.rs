use axum::{extract::State, routing::get, Json, Router};
use tracing::instrument;

use super::{ApiError, PathParams, JsonBody};
use crate::{
    adapters::inbound::http::{
        CreateExpenseBody, ExpenseResponse, MessageResponse, UpdateExpenseBody,
    },
    app_state::AppState,
    domain::models::ExpenseId,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_expenses).post(create_expense))
        .route(
            "/:id",
            get(get_expense).put(update_expense).delete(delete_expense),
        )
}

#[instrument(name = "GET /expenses", skip(app_state))]
async fn list_expenses(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<ExpenseResponse>>, ApiError> {
    let expenses = app_state.expenses.list_expenses().await?;
    Ok(Json(expenses.into_iter().map(Into::into).collect()))
}

#[instrument(name = "GET /expenses/:id", skip(app_state))]
async fn get_expense(
    State(app_state): State<AppState>,
    PathParams(id): PathParams<i64>,
) -> Result<Json<ExpenseResponse>, ApiError> {
    let expense = app_state.expenses.get_expense(ExpenseId::new(id)).await?;
    Ok(Json(expense.into()))
}

#[instrument(name = "POST /expenses", skip(app_state))]
async fn create_expense(
    State(app_state): State<AppState>,
    JsonBody(body): JsonBody<CreateExpenseBody>,
) -> Result<Json<ExpenseResponse>, ApiError> {
    let expense = app_state.expenses.create_expense(body.into()).await?;
    Ok(Json(expense.into()))
}

#[instrument(name = "PUT /expenses/:id", skip(app_state))]
async fn update_expense(
    State(app_state): State<AppState>,
    PathParams(id): PathParams<i64>,
    JsonBody(body): JsonBody<UpdateExpenseBody>,
) -> Result<Json<ExpenseResponse>, ApiError> {
    let expense = app_state
        .expenses
        .update_expense(ExpenseId::new(id), body.into())
        .await?;
    Ok(Json(expense.into()))
}

#[instrument(name = "DELETE /expenses/:id", skip(app_state))]
async fn delete_expense(
    State(app_state): State<AppState>,
    PathParams(id): PathParams<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    app_state.expenses.delete_expense(ExpenseId::new(id)).await?;
    Ok(Json(MessageResponse::new("Expense deleted")))
}
