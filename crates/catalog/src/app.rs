use std::time::Duration;

use axum::{
    body::Body,
    extract::Request,
    http::{header, Method, StatusCode},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    context::{extract_request_id, RequestId},
    handlers::{
        categories::{get_category, manage_category},
        health::{livez, readyz},
        products::{get_product, manage_product},
        search::search_products,
    },
    state::AppState,
};

/// Assigns the request id once so the trace span and handlers agree on it.
async fn assign_request_id(mut request: Request) -> Request {
    let request_id = extract_request_id(request.headers());
    request.extensions_mut().insert(request_id);
    request
}

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState, request_timeout: Duration) -> Router {
    // CORS configuration for API endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let api_routes = Router::new()
        .route("/product", post(manage_product))
        .route("/product/{id}", get(get_product))
        .route("/product_category", post(manage_category))
        .route("/product_category/{id}", get(get_category))
        .route("/products/search", get(search_products))
        .layer(cors);

    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
        let request_id = request
            .extensions()
            .get::<RequestId>()
            .map(ToString::to_string)
            .unwrap_or_default();
        tracing::debug_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id,
        )
    });

    Router::new()
        .route("/livez", get(livez))
        .route("/readyz", get(readyz))
        .nest("/v1", api_routes)
        .layer(trace)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(middleware::map_request(assign_request_id))
        .with_state(state)
}
