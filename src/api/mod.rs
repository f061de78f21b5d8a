mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::service::SessionService;

pub fn create_router(service: SessionService) -> Router {
    let api = Router::new()
        // Games
        .route("/game/new", post(handlers::create_game))
        .route("/game/{id}", get(handlers::get_game))
        .route("/game/{id}/make_guess", post(handlers::make_guess))
        // Health
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api/v1", api)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(service)
}
