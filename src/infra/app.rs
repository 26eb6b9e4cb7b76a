use axum::{Router, http};
use http::header::CONTENT_TYPE;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use uuid::Uuid;

use crate::adapters::{
    self,
    http::{app_error_impl::panic_response, app_state::AppState},
};

pub fn create_app(app_state: AppState) -> Router {
    let cors = match app_state.config.cors_origin.clone() {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([http::Method::GET, http::Method::POST])
            .allow_headers([CONTENT_TYPE]),
        None => CorsLayer::permissive(),
    };

    let static_dir = app_state.config.static_dir.clone();

    Router::new()
        .nest("/api", adapters::http::routes::router())
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .fallback_service(ServeDir::new(static_dir))
        .with_state(app_state)
        .layer(cors)
        .layer(SetResponseHeaderLayer::if_not_present(
            http::header::X_CONTENT_TYPE_OPTIONS,
            http::HeaderValue::from_static("nosniff"),
        ))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &http::Request<_>| {
                let request_id = Uuid::new_v4();
                tracing::info_span!(
                    "http-request",
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                    request_id = %request_id
                )
            }),
        )
}
