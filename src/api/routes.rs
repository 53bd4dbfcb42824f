use crate::AppState;
use crate::api::{ApiDoc, handlers};
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;

/// Agent and conversation routes, relative to `/api`.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/profiler", post(handlers::profiler::profile_learner))
        .route("/recommender", post(handlers::recommender::recommend))
        .route("/assistant", post(handlers::assistant::ask))
        .route(
            "/assistant/conversations/{id}",
            get(handlers::assistant::get_conversation)
                .delete(handlers::assistant::clear_conversation),
        )
        .route("/agents", get(handlers::agents::list_agents))
}

/// The full application: routes, OpenAPI document, CORS and request tracing.
pub fn create_app(state: AppState) -> Router {
    let app = Router::new()
        .route("/health", get(handlers::health::health_check))
        .nest("/api", create_router());

    #[cfg(feature = "swagger-ui")]
    let app = app.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    #[cfg(not(feature = "swagger-ui"))]
    let app = app.route(
        "/api-docs/openapi.json",
        get(|| async { axum::Json(ApiDoc::openapi()) }),
    );

    app.layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    )
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}
