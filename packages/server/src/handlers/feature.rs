use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::feature::{CreateFeatureRequest, FeatureResponse};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Features",
    operation_id = "listFeatures",
    summary = "List all feature definitions",
    description = "Returns every feature definition in creation order.",
    responses(
        (status = 200, description = "List of feature definitions", body = Vec<FeatureResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_features(State(state): State<AppState>) -> Json<Vec<FeatureResponse>> {
    let features = state.store.list_features().await;
    Json(features.into_iter().map(FeatureResponse::from).collect())
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Features",
    operation_id = "createFeature",
    summary = "Create a feature definition",
    description = "Defines a new typed attribute visible on every olimpiad. Existing \
        olimpiads are not modified: a record without the new key reads as \"not set\".",
    request_body = CreateFeatureRequest,
    responses(
        (status = 201, description = "Feature created", body = FeatureResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(name = %payload.name))]
pub async fn create_feature(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateFeatureRequest>,
) -> Result<impl IntoResponse, AppError> {
    let definition = state
        .store
        .create_feature(&payload.name, payload.kind)
        .await?;
    Ok((StatusCode::CREATED, Json(FeatureResponse::from(definition))))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Features",
    operation_id = "deleteFeature",
    summary = "Delete a feature definition",
    description = "Deletes the definition and cascade-removes its value from every \
        olimpiad. The cascade is atomic: no olimpiad keeps an orphaned value.",
    params(("id" = Uuid, Path, description = "Feature ID")),
    responses(
        (status = 204, description = "Feature deleted"),
        (status = 404, description = "Feature not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_feature(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    state.store.delete_feature(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
