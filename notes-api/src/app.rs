use std::sync::Arc;

use axum::{
    extract::State,
    handler::HandlerWithoutStateExt,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use rand::Rng;
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir};

use crate::{
    auth,
    config::Config,
    db::DB,
    errors::on_error,
    notes,
    shared::tracing::request_logger,
    state::AppState,
    testing, users,
};

pub struct AppParams<Router>
where
    Router: FnOnce(AppState) -> axum::Router,
{
    pub db: DB,
    pub config: Config,
    pub router: Router,
}

pub fn create<R>(AppParams { db, config, router }: AppParams<R>) -> Router
where
    R: FnOnce(AppState) -> Router,
{
    let static_files = ServeDir::new(&config.static_dir)
        .call_fallback_on_method_not_allowed(true)
        .not_found_service(unknown_endpoint.into_service());

    let state = AppState::new(db, config);

    Router::new()
        .route("/__version__", get(version))
        .route("/__heartbeat__", get(heartbeat))
        .route("/__lbheartbeat__", get(lbheartbeat))
        .with_state(state.clone())
        .merge(router(state))
        .method_not_allowed_fallback(unknown_endpoint)
        .fallback_service(static_files)
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(on_error))
                .layer(CorsLayer::permissive())
                .layer(middleware::from_fn(request_logger)),
        )
}

/// Every API router; the testing routes only when enabled in config.
pub fn routes(state: AppState) -> Router {
    let app = Router::new()
        .merge(notes::router(state.clone()))
        .merge(users::router(state.clone()))
        .merge(auth::router(state.clone()));

    if state.config.testing_routes {
        app.merge(testing::router(state))
    } else {
        app
    }
}

async fn unknown_endpoint() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "unknown endpoint" })))
}

async fn version(State(config): State<Arc<Config>>) -> impl IntoResponse {
    Json(json!({
        "source" : config.source,
        "version": config.version,
        "commit" : config.git_commit,
        "build"  : config.pipeline_id
    }))
}

async fn heartbeat() -> impl IntoResponse {
    let mut rng = rand::thread_rng();
    let random: u32 = rng.gen_range(0..=10000);

    Json(json!({
        "status" : "ok",
        "random": random,
    }))
}

async fn lbheartbeat() -> impl IntoResponse {
    ""
}
