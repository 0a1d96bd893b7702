use axum::{
    http::{header, Method},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower::Layer;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    normalize_path::{NormalizePath, NormalizePathLayer},
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::{app_state::AppState, routes};

pub fn create(app_state: AppState, app_url: String) -> Router<()> {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .expose_headers([header::CONTENT_DISPOSITION])
        .allow_credentials(true)
        .allow_origin(AllowOrigin::predicate(move |origin, _| {
            origin.to_str().unwrap_or_default() == app_url
        }));

    Router::new()
        .route("/", get(root))
        .nest("/employees", routes::employees::router())
        .nest("/expense_types", routes::expense_types::router())
        .nest("/business_trips", routes::business_trips::router())
        .nest("/expenses", routes::expenses::router())
        .nest("/analytics", routes::analytics::router())
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}

/// Strips trailing slashes before routing, so `/employees/` and `/employees` match.
pub fn normalize_paths(router: Router<()>) -> NormalizePath<Router<()>> {
    NormalizePathLayer::trim_trailing_slash().layer(router)
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "Travel expense API is running" }))
}
