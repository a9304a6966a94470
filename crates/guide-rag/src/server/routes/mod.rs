//! Routes for the question-answering server

pub mod ask;

use axum::{
    response::Html,
    routing::{get, post},
    Router,
};

use crate::server::state::AppState;

/// Build all routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(front_page))
        .route("/ask", post(ask::ask))
}

/// GET / - Question form for browsers
async fn front_page() -> Html<&'static str> {
    Html(include_str!("../../../static/index.html"))
}
