use axum::{
    body::{self, Body},
    extract::Request,
    middleware::Next,
    response::Response,
    Router,
};
use http_body_util::LengthLimitError;
use serde_json::Value;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{self, TraceLayer},
};
use tracing_subscriber::prelude::*;

use crate::{Error, Result};

/// Bodies larger than this are rejected before they reach a handler.
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

const REDACTED_FIELDS: [&str; 2] = ["password", "token"];

pub fn setup_tracing(json: bool) {
    let tracing = tracing_subscriber::registry().with(
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "notes_api=debug,tower_http=debug,axum::rejection=trace".into()),
    );

    if json {
        tracing.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        tracing
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_file(true)
                    .with_line_number(true)
                    .with_target(false),
            )
            .init();
    };
}

pub fn add_tracing_layer(app: Router) -> Router {
    app.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(|request: &Request<Body>| {
                        let request_id = request
                            .headers()
                            .get("x-request-id")
                            .and_then(|v| v.to_str().ok())
                            .unwrap_or_default();
                        tracing::span!(
                            tracing::Level::DEBUG,
                            "request",
                            method = %request.method(),
                            request_id = request_id,
                            uri = %request.uri(),
                        )
                    })
                    .on_request(trace::DefaultOnRequest::new())
                    .on_response(trace::DefaultOnResponse::new().include_headers(false))
                    .on_failure(trace::DefaultOnFailure::new()),
            ),
    )
}

/// Logs method, path and body of every request before it is dispatched.
pub async fn request_logger(request: Request, next: Next) -> Result<Response> {
    let (parts, body) = request.into_parts();
    let bytes = body::to_bytes(body, MAX_BODY_BYTES).await.map_err(|e| {
        let inner = e.into_inner();
        if exceeds_limit(&*inner) {
            Error::PayloadTooLarge(MAX_BODY_BYTES)
        } else {
            Error::BadRequest(format!("unreadable request body: {inner}"))
        }
    })?;

    tracing::info!("Method: {}", parts.method);
    tracing::info!("Path: {}", parts.uri.path());
    tracing::info!("Body: {}", loggable_body(&bytes));
    tracing::info!("---");

    Ok(next.run(Request::from_parts(parts, Body::from(bytes))).await)
}

fn exceeds_limit(error: &(dyn std::error::Error + 'static)) -> bool {
    let mut source = Some(error);
    while let Some(error) = source {
        if error.is::<LengthLimitError>() {
            return true;
        }
        source = error.source();
    }
    false
}

fn loggable_body(bytes: &[u8]) -> String {
    if bytes.is_empty() {
        return "{}".into();
    }

    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(mut map)) => {
            for field in REDACTED_FIELDS {
                if let Some(value) = map.get_mut(field) {
                    *value = Value::from("[redacted]");
                }
            }
            Value::Object(map).to_string()
        }
        Ok(value) => value.to_string(),
        Err(_) => String::from_utf8_lossy(bytes).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secrets_are_redacted() {
        let body = loggable_body(br#"{"username":"root","password":"sekret"}"#);

        assert!(body.contains("root"));
        assert!(!body.contains("sekret"));
        assert!(body.contains("[redacted]"));
    }

    #[tokio::test]
    async fn oversized_body_is_rejected() -> Result<()> {
        let db = crate::db::init_test_db().await?;
        let server = crate::tests::test_server(db, crate::app::routes).await?;

        let response = server
            .post("/api/users")
            .bytes(vec![b'a'; MAX_BODY_BYTES + 1].into())
            .content_type("application/json")
            .await;

        assert_eq!(response.status_code(), 413);
        assert_eq!(
            response.json::<crate::errors::ErrorResponse>().error,
            "request entity too large"
        );
        Ok(())
    }

    #[test]
    fn empty_and_non_json_bodies() {
        assert_eq!(loggable_body(b""), "{}");
        assert_eq!(loggable_body(b"plain text"), "plain text");
        assert_eq!(loggable_body(b"[1,2]"), "[1,2]");
    }
}
