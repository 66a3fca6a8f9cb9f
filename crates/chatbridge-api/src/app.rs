use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    config::Config,
    handlers::chat,
    middleware::{identity, logging},
    routes::health,
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(
    paths(health::health_check, chat::chat_socket),
    components(schemas(health::HealthResponse)),
    tags(
        (name = "health", description = "Service status"),
        (name = "chat", description = "Chat relay WebSocket")
    )
)]
pub struct ApiDoc;

pub fn build_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        // Health
        .route("/health", get(health::health_check))
        // Chat
        .route("/ws/chat", get(chat::chat_socket))
        .layer(middleware::from_fn_with_state(state.clone(), identity::resolve_user));

    Router::new()
        .merge(api_routes)
        .merge(SwaggerUi::new("/api/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(middleware::from_fn(logging::log_request))
        .layer(build_cors_layer(&state.config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn build_cors_layer(config: &Config) -> CorsLayer {
    if config.cors.enabled {
        let mut cors = CorsLayer::new()
            .allow_methods([axum::http::Method::GET, axum::http::Method::OPTIONS])
            .allow_headers(Any);

        if config.cors.origins.iter().any(|o| o == "*") {
            cors = cors.allow_origin(Any);
        } else {
            let origins: Vec<axum::http::HeaderValue> = config
                .cors
                .origins
                .iter()
                .filter_map(|origin| match origin.parse() {
                    Ok(parsed) => Some(parsed),
                    Err(_) => {
                        tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                        None
                    }
                })
                .collect();
            cors = cors.allow_origin(AllowOrigin::list(origins));
        }

        cors
    } else {
        CorsLayer::permissive()
    }
}
