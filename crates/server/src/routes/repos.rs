use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Response,
    Json,
};

use common::types::Ack;
use service::errors::ServiceError;

use crate::{errors::ApiError, routes::raw_json, state::ServerState};

/// Query pairs in request order; repeated keys are kept, not rejected.
type QueryPairs = Vec<(String, String)>;

fn query_pairs(query: Result<Query<QueryPairs>, QueryRejection>) -> Result<QueryPairs, ApiError> {
    query
        .map(|Query(pairs)| pairs)
        .map_err(|rejection| ApiError(ServiceError::Validation(rejection.body_text())))
}

/// First value for `key`, later repeats are ignored.
fn first<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
}

/// `GET /githubList`: the stored collection, byte for byte.
pub async fn github_list(State(state): State<ServerState>) -> Result<Response, ApiError> {
    let bytes = state.repos.list_raw().await?;
    Ok(raw_json(bytes))
}

/// `GET /addRepo?owner=..&name=..`
pub async fn add_repo(
    State(state): State<ServerState>,
    query: Result<Query<QueryPairs>, QueryRejection>,
) -> Result<Json<Ack>, ApiError> {
    let pairs = query_pairs(query)?;
    let owner = first(&pairs, "owner").unwrap_or_default();
    let name = first(&pairs, "name").unwrap_or_default();
    state.repos.add(owner, name).await?;
    Ok(Json(Ack::ok()))
}

/// `GET /deleteRepo?url=..`; answers success whether or not anything matched.
pub async fn delete_repo(
    State(state): State<ServerState>,
    query: Result<Query<QueryPairs>, QueryRejection>,
) -> Result<Json<Ack>, ApiError> {
    let pairs = query_pairs(query)?;
    state.repos.remove(first(&pairs, "url")).await?;
    Ok(Json(Ack::ok()))
}
