use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::logos;
use crate::session::{self, ServerState};

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: the `/logos` CRUD group, the uploads
/// file service, the session affordances, and the health probe.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let uploads_service = ServeDir::new(state.uploads.dir.clone());
    let uploads_path = state.uploads.public_path.clone();

    let logo_routes = Router::new()
        .route("/", get(logos::list))
        .route("/mine", get(logos::mine))
        .route("/add", get(logos::add_form).post(logos::add_submit))
        .route("/:id", get(logos::view))
        .route("/:id/edit", get(logos::edit_form).post(logos::edit_submit))
        .route("/:id/delete", get(logos::delete));

    Router::new()
        .route("/", get(logos::home))
        .route("/health", get(health))
        .route("/login", get(session::login))
        .route("/logout", get(session::logout))
        .nest("/logos", logo_routes)
        .nest_service(&uploads_path, uploads_service)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
