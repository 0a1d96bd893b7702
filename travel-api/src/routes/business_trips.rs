use axum::{extract::State, routing::get, Json, Router};
use tracing::instrument;

use super::{ApiError, PathParams, JsonBody};
use crate::{
    adapters::inbound::http::{
        BusinessTripResponse, CreateBusinessTripBody, MessageResponse, UpdateBusinessTripBody,
    },
    app_state::AppState,
    domain::models::BusinessTripId,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_business_trips).post(create_business_trip))
        .route(
            "/:id",
            get(get_business_trip)
                .put(update_business_trip)
                .delete(delete_business_trip),
        )
}

#[instrument(name = "GET /business_trips", skip(app_state))]
async fn list_business_trips(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<BusinessTripResponse>>, ApiError> {
    let trips = app_state.business_trips.list_business_trips().await?;
    Ok(Json(trips.into_iter().map(Into::into).collect()))
}

#[instrument(name = "GET /business_trips/:id", skip(app_state))]
async fn get_business_trip(
    State(app_state): State<AppState>,
    PathParams(id): PathParams<i64>,
) -> Result<Json<BusinessTripResponse>, ApiError> {
    let trip = app_state
        .business_trips
        .get_business_trip(BusinessTripId::new(id))
        .await?;
    Ok(Json(trip.into()))
}

#[instrument(name = "POST /business_trips", skip(app_state))]
async fn create_business_trip(
    State(app_state): State<AppState>,
    JsonBody(body): JsonBody<CreateBusinessTripBody>,
) -> Result<Json<BusinessTripResponse>, ApiError> {
    let trip = app_state
        .business_trips
        .create_business_trip(body.into())
        .await?;
    Ok(Json(trip.into()))
}

#[instrument(name = "PUT /business_trips/:id", skip(app_state))]
async fn update_business_trip(
    State(app_state): State<AppState>,
    PathParams(id): PathParams<i64>,
    JsonBody(body): JsonBody<UpdateBusinessTripBody>,
) -> Result<Json<BusinessTripResponse>, ApiError> {
    let trip = app_state
        .business_trips
        .update_business_trip(BusinessTripId::new(id), body.into())
        .await?;
    Ok(Json(trip.into()))
}

#[instrument(name = "DELETE /business_trips/:id", skip(app_state))]
async fn delete_business_trip(
    State(app_state): State<AppState>,
    PathParams(id): PathParams<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    app_state
        .business_trips
        .delete_business_trip(BusinessTripId::new(id))
        .await?;
    Ok(Json(MessageResponse::new("Business Trip deleted")))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::{json, Value};

    use crate::routes::test_support::{app, send};

    async fn employee(app: &axum::Router) -> i64 {
        let (_, body) = send(
            app,
            Method::POST,
            "/employees",
            Some(json!({ "fio": "Попов Алексей" })),
        )
        .await;
        body["id"].as_i64().unwrap()
    }

    fn trip(employee_id: i64) -> Value {
        json!({
            "employee_id": employee_id,
            "destination": "Новосибирск",
            "start_trip": "2024-09-02T08:00:00Z",
            "end_trip": "2024-09-06T20:00:00Z",
        })
    }

    #[tokio::test]
    async fn create_returns_trip_without_expenses() {
        let app = app().await;
        let employee_id = employee(&app).await;

        let (status, body) = send(&app, Method::POST, "/business_trips", Some(trip(employee_id))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["destination"], "Новосибирск");
        assert_eq!(body["start_trip"], "2024-09-02T08:00:00Z");
        assert_eq!(body["expenses"], json!([]));
    }

    #[tokio::test]
    async fn unknown_employee_is_a_bad_request() {
        let app = app().await;

        let (status, body) = send(&app, Method::POST, "/business_trips", Some(trip(41))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Employee with id 41 does not exist");
    }

    #[tokio::test]
    async fn null_destination_clears_it_on_update() {
        let app = app().await;
        let employee_id = employee(&app).await;
        let (_, created) = send(&app, Method::POST, "/business_trips", Some(trip(employee_id))).await;
        let id = created["id"].as_i64().unwrap();

        let (status, updated) = send(
            &app,
            Method::PUT,
            &format!("/business_trips/{id}"),
            Some(json!({ "destination": null })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["destination"], Value::Null);
        assert_eq!(updated["end_trip"], "2024-09-06T20:00:00Z");
    }

    #[tokio::test]
    async fn delete_confirms_with_message() {
        let app = app().await;
        let employee_id = employee(&app).await;
        let (_, created) = send(&app, Method::POST, "/business_trips", Some(trip(employee_id))).await;
        let id = created["id"].as_i64().unwrap();

        let (_, body) = send(&app, Method::DELETE, &format!("/business_trips/{id}"), None).await;
        assert_eq!(body, json!({ "message": "Business Trip deleted" }));

        let (status, _) = send(&app, Method::DELETE, &format!("/business_trips/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
