//! Ask endpoint

use axum::{extract::State, Json};
use std::time::Instant;

use crate::error::Result;
use crate::server::state::AppState;
use crate::types::{AskRequest, AskResponse};

/// POST /ask - Answer a question about the user guide
pub async fn ask(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskResponse>> {
    let start = Instant::now();

    tracing::info!("Question: \"{}\"", request.question);

    let answer = state.pipeline().answer(&request.question).await?;

    tracing::info!("Answered in {}ms", start.elapsed().as_millis());

    Ok(Json(AskResponse::new(request.question, answer)))
}
