pub(crate) mod analytics;
pub(crate) mod business_trips;
pub(crate) mod employees;
pub(crate) mod error;
pub(crate) mod expense_types;
pub(crate) mod expenses;

use axum::extract::{FromRequest, FromRequestParts};

pub(crate) use error::ApiError;

/// `axum::Json` whose rejections render as `{"detail": ...}`.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub(crate) struct JsonBody<T>(pub T);

/// `axum::extract::Path` whose rejections render as `{"detail": ...}`.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub(crate) struct PathParams<T>(pub T);

/// `axum::extract::Query` whose rejections render as `{"detail": ...}`.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub(crate) struct QueryParams<T>(pub T);

#[cfg(test)]
pub(crate) mod test_support {
    use axum::{
        body::Body,
        http::{header, HeaderMap, Method, Request, StatusCode},
        Router,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::{adapters::outbound::sqlite, factory, router};

    pub async fn app() -> Router {
        let pool = sqlite::memory_pool().await;
        router::create(factory::app_state(pool), "http://localhost:5173".to_string())
    }

    pub async fn send_raw(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, HeaderMap, Vec<u8>) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, headers, bytes.to_vec())
    }

    pub async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let (status, _, bytes) = send_raw(app, method, uri, body).await;
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }
}
