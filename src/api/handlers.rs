use crate::meta::Metadata;
use crate::note::{Error, Note};
use crate::service::Service;
use crate::store::{Pagination, SortBy};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Shared state for the API handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Service,
    pub meta: Arc<Metadata>,
}

/// Error body rendered for any failed request.
#[derive(Debug, Serialize, Deserialize)]
pub struct ResponseError {
    pub message: String,
}

/// Wraps a domain error for transport, mapping it to a status code
/// and a user-facing message.
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            Error::NotFound => (StatusCode::NOT_FOUND, "Note not found"),
            Error::Exists => (StatusCode::CONFLICT, "Note already exists"),
            Error::NilId => (StatusCode::BAD_REQUEST, "Empty note identifier"),
            err => {
                tracing::error!(error = %err, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Unexpected error")
            }
        };

        (
            status,
            Json(ResponseError {
                message: message.to_owned(),
            }),
        )
            .into_response()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateRequest {
    pub note: Note,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateResponse {
    pub note: Note,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GetResponse {
    pub note: Note,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateRequest {
    pub note: Note,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateResponse {
    pub note: Note,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FetchResponse {
    pub notes: Vec<Note>,
    pub total_count: u64,
    pub total_pages: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MetaResponse {
    pub meta: Metadata,
}

/// Query parameters accepted by the fetch endpoint. Zero values take
/// the pagination defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FetchQuery {
    pub page: u64,
    pub size: u64,
    pub sort_by: SortBy,
    pub ascending: Option<bool>,
}

pub async fn create_note(
    State(state): State<AppState>,
    Json(req): Json<CreateRequest>,
) -> Result<Json<CreateResponse>, ApiError> {
    let note = state.service.create(&req.note).await?;
    Ok(Json(CreateResponse { note }))
}

pub async fn get_note(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GetResponse>, ApiError> {
    let note = state.service.get(id).await?;
    Ok(Json(GetResponse { note }))
}

pub async fn update_note(
    State(state): State<AppState>,
    Json(req): Json<UpdateRequest>,
) -> Result<Json<UpdateResponse>, ApiError> {
    let note = state.service.update(&req.note).await?;
    Ok(Json(UpdateResponse { note }))
}

pub async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteResponse>, ApiError> {
    state.service.delete(id).await?;
    Ok(Json(DeleteResponse {
        message: "Successfully Deleted".to_owned(),
    }))
}

pub async fn fetch_notes(
    State(state): State<AppState>,
    Query(query): Query<FetchQuery>,
) -> Result<Json<FetchResponse>, ApiError> {
    let pagination = Pagination {
        size: query.size,
        page: query.page,
        sort_by: query.sort_by,
        ascending: query.ascending.unwrap_or(true),
    };

    let result = state.service.fetch(&pagination).await?;
    Ok(Json(FetchResponse {
        notes: result.notes,
        total_count: result.total_count,
        total_pages: result.total_pages,
    }))
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "OK".to_owned(),
    })
}

pub async fn meta(State(state): State<AppState>) -> Json<MetaResponse> {
    Json(MetaResponse {
        meta: (*state.meta).clone(),
    })
}
