use axum::{extract::State, response::Response};

use crate::{errors::ApiError, routes::raw_json, state::ServerState};

/// `GET /getIssues`: today's snapshot as written by the collector.
pub async fn get_issues(State(state): State<ServerState>) -> Result<Response, ApiError> {
    let today = (state.today)();
    let bytes = state.issues.read_for(today).await?;
    Ok(raw_json(bytes))
}
