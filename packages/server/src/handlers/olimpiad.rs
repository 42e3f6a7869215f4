use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::olimpiad::DatePair;
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::olimpiad::{
    OlimpiadListQuery, OlimpiadPayload, OlimpiadResponse, SetFeatureValueRequest,
};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Olimpiads",
    operation_id = "listOlimpiads",
    summary = "List olimpiads with optional filtering",
    description = "Returns olimpiads in insertion order. `status` and `subject` accept \
        comma-separated sets (empty means no restriction on that axis); `search` is a \
        case-insensitive substring match on the name. All predicates are ANDed.",
    params(OlimpiadListQuery),
    responses(
        (status = 200, description = "List of olimpiads", body = Vec<OlimpiadResponse>),
        (status = 400, description = "Unknown status in filter (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_olimpiads(
    State(state): State<AppState>,
    Query(query): Query<OlimpiadListQuery>,
) -> Result<Json<Vec<OlimpiadResponse>>, AppError> {
    let filter = query.into_filter()?;
    let olimpiads = state.store.list_olimpiads(&filter).await;
    Ok(Json(
        olimpiads.into_iter().map(OlimpiadResponse::from).collect(),
    ))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Olimpiads",
    operation_id = "createOlimpiad",
    summary = "Create a new olimpiad",
    description = "Creates an olimpiad. `name`, `subject` and `level` must be non-empty; \
        `status` defaults to `upcoming`. Feature values are validated against the current \
        feature registry before anything is written.",
    request_body = OlimpiadPayload,
    responses(
        (status = 201, description = "Olimpiad created", body = OlimpiadResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(name = %payload.name))]
pub async fn create_olimpiad(
    State(state): State<AppState>,
    AppJson(payload): AppJson<OlimpiadPayload>,
) -> Result<impl IntoResponse, AppError> {
    let olimpiad = state.store.create_olimpiad(payload.into_draft()).await?;
    Ok((StatusCode::CREATED, Json(OlimpiadResponse::from(olimpiad))))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Olimpiads",
    operation_id = "getOlimpiad",
    summary = "Get an olimpiad by ID",
    params(("id" = Uuid, Path, description = "Olimpiad ID")),
    responses(
        (status = 200, description = "Olimpiad details", body = OlimpiadResponse),
        (status = 404, description = "Olimpiad not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_olimpiad(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<OlimpiadResponse>, AppError> {
    let olimpiad = state.store.get_olimpiad(id).await?;
    Ok(Json(olimpiad.into()))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Olimpiads",
    operation_id = "updateOlimpiad",
    summary = "Replace an existing olimpiad",
    description = "Full-replace update with the same validation as create. The record's \
        id, creation time and position in listing order are preserved.",
    params(("id" = Uuid, Path, description = "Olimpiad ID")),
    request_body = OlimpiadPayload,
    responses(
        (status = 200, description = "Olimpiad updated", body = OlimpiadResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Olimpiad not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_olimpiad(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<OlimpiadPayload>,
) -> Result<Json<OlimpiadResponse>, AppError> {
    let olimpiad = state
        .store
        .update_olimpiad(id, payload.into_draft())
        .await?;
    Ok(Json(olimpiad.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Olimpiads",
    operation_id = "deleteOlimpiad",
    summary = "Delete an olimpiad by ID",
    params(("id" = Uuid, Path, description = "Olimpiad ID")),
    responses(
        (status = 204, description = "Olimpiad deleted"),
        (status = 404, description = "Olimpiad not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_olimpiad(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    state.store.delete_olimpiad(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/{id}/dates",
    tag = "Olimpiads",
    operation_id = "addOlimpiadDate",
    summary = "Append a labelled date to an olimpiad",
    description = "Dates keep insertion order (display order) and duplicates are allowed.",
    params(("id" = Uuid, Path, description = "Olimpiad ID")),
    request_body = DatePair,
    responses(
        (status = 200, description = "Updated olimpiad", body = OlimpiadResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Olimpiad not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn add_olimpiad_date(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<DatePair>,
) -> Result<Json<OlimpiadResponse>, AppError> {
    let olimpiad = state.store.add_date(id, payload).await?;
    Ok(Json(olimpiad.into()))
}

#[utoipa::path(
    put,
    path = "/{id}/features/{feature_id}",
    tag = "Olimpiads",
    operation_id = "setOlimpiadFeatureValue",
    summary = "Set a single feature value on an olimpiad",
    description = "The value must match the feature definition's kind. `null` or the \
        string `\"none\"` clears the value.",
    params(
        ("id" = Uuid, Path, description = "Olimpiad ID"),
        ("feature_id" = Uuid, Path, description = "Feature ID"),
    ),
    request_body = SetFeatureValueRequest,
    responses(
        (status = 200, description = "Updated olimpiad", body = OlimpiadResponse),
        (status = 400, description = "Value does not match the feature kind (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Olimpiad or feature not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id, feature_id))]
pub async fn set_olimpiad_feature(
    State(state): State<AppState>,
    Path((id, feature_id)): Path<(Uuid, Uuid)>,
    AppJson(payload): AppJson<SetFeatureValueRequest>,
) -> Result<Json<OlimpiadResponse>, AppError> {
    let olimpiad = state
        .store
        .set_feature_value(id, feature_id, &payload.value)
        .await?;
    Ok(Json(olimpiad.into()))
}
