use axum::Router;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

pub mod cli;
pub mod db;
pub mod extract;
pub mod routes;

mod state;
pub use state::*;

/// The whole http surface: the api, the landing page at `/` and static files
/// for everything else
pub fn app(state: AppState) -> Router {
    let args = state.args.clone();

    Router::new()
        .merge(routes::router())
        .route_service("/", ServeFile::new(&args.index_file))
        .fallback_service(ServeDir::new(&args.public_dir))
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
