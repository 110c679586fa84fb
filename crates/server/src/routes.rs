pub mod configs;
pub mod health;

use axum::{
    http::{header, HeaderValue},
    middleware,
    response::Response,
    routing::get,
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::openapi;
use crate::state::ServerState;

/// Every response is JSON, error and empty-bodied ones included.
pub async fn json_content_type(mut res: Response) -> Response {
    res.headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    res
}

/// Build the full application router: probes, API docs, config CRUD and search.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let probes: Router<ServerState> = Router::new()
        .route("/healthz", get(health::healthz))
        .route("/readyz", get(health::readyz))
        .route("/api-docs/openapi.json", get(openapi::openapi_json));

    let config_routes: Router<ServerState> = Router::new()
        .route("/configs", get(configs::list).post(configs::create))
        .route(
            "/configs/:name",
            get(configs::get)
                .put(configs::update)
                .patch(configs::patch)
                .delete(configs::delete),
        )
        .route("/search", get(configs::search));

    probes
        .merge(config_routes)
        .with_state(state)
        .layer(middleware::map_response(json_content_type))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
