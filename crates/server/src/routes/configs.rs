use std::collections::HashSet;

use axum::{extract::{Path, Query, State}, http::StatusCode, Json};
use models::ConfigRecord;
use service::config::SearchQuery;
use tracing::info;

use crate::dto::{CreateConfigInput, JsonBody, UpdateConfigInput};
use crate::errors::JsonApiError;
use crate::state::ServerState;

/// List every config.
#[utoipa::path(
    get, path = "/configs", tag = "configs",
    responses(
        (status = 200, description = "OK", body = [crate::openapi::ConfigRecordDoc]),
        (status = 500, description = "Internal Server Error", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<ConfigRecord>>, JsonApiError> {
    let configs = state.config_svc.list()?;
    Ok(Json(configs))
}

/// Create a config.
#[utoipa::path(
    post, path = "/configs", tag = "configs",
    request_body = CreateConfigInput,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ConfigRecordDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorBodyDoc),
        (status = 409, description = "Conflict", body = crate::openapi::ErrorBodyDoc),
        (status = 500, description = "Internal Server Error", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    JsonBody(input): JsonBody<CreateConfigInput>,
) -> Result<(StatusCode, Json<ConfigRecord>), JsonApiError> {
    let record = input.into_record()?;
    info!(name = %record.name, "config_create_request");
    state.config_svc.create(record.clone())?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// Get a config by name.
#[utoipa::path(
    get, path = "/configs/{name}", tag = "configs",
    params(("name" = String, Path, description = "Config name")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::ConfigRecordDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    Path(name): Path<String>,
) -> Result<Json<ConfigRecord>, JsonApiError> {
    Ok(Json(state.config_svc.get(&name)?))
}

/// Replace the metadata of a config.
#[utoipa::path(
    put, path = "/configs/{name}", tag = "configs",
    params(("name" = String, Path, description = "Config name")),
    request_body = UpdateConfigInput,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorBodyDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(name): Path<String>,
    JsonBody(input): JsonBody<UpdateConfigInput>,
) -> Result<StatusCode, JsonApiError> {
    let metadata = input.into_metadata()?;
    state.config_svc.update(&name, metadata)?;
    Ok(StatusCode::OK)
}

/// Replace the metadata of a config; same as PUT.
#[utoipa::path(
    patch, path = "/configs/{name}", tag = "configs",
    params(("name" = String, Path, description = "Config name")),
    request_body = UpdateConfigInput,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorBodyDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn patch(
    state: State<ServerState>,
    name: Path<String>,
    input: JsonBody<UpdateConfigInput>,
) -> Result<StatusCode, JsonApiError> {
    update(state, name, input).await
}

/// Delete a config.
#[utoipa::path(
    delete, path = "/configs/{name}", tag = "configs",
    params(("name" = String, Path, description = "Config name")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Path(name): Path<String>,
) -> Result<StatusCode, JsonApiError> {
    state.config_svc.delete(&name)?;
    Ok(StatusCode::OK)
}

/// Search configs by metadata.
///
/// Every query parameter is one predicate, e.g. `?metadata.allergens.eggs=true&obj.aaa=bbb`.
/// A config matches when each path resolves to a string equal to the given value.
/// A repeated parameter keeps its first value.
#[utoipa::path(
    get, path = "/search", tag = "configs",
    responses(
        (status = 200, description = "Matching configs", body = [crate::openapi::ConfigRecordDoc]),
        (status = 500, description = "Internal Server Error", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn search(
    State(state): State<ServerState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<ConfigRecord>>, JsonApiError> {
    let query = predicates_from_params(params);
    let configs = state.config_svc.search(&query)?;
    Ok(Json(configs))
}

fn predicates_from_params(params: Vec<(String, String)>) -> SearchQuery {
    let mut seen = HashSet::new();
    params
        .into_iter()
        .filter(|(path, _)| seen.insert(path.clone()))
        .collect()
}
