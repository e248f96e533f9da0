use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::Value;
use tracing::warn;

use folio_types::models::RecordId;

use crate::error::ApiError;
use crate::service::{CrudService, Resource};
use crate::state::AppState;

/// GET /api/progress-{updates,images} — newest first.
pub async fn list<R: Resource>(State(state): State<AppState>) -> Result<Json<Vec<R>>, ApiError> {
    let records = CrudService::<R>::new(&state.store).list()?;
    Ok(Json(records))
}

/// POST — 201 with the stored record.
pub async fn create<R: Resource>(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let body = json_body::<R>(body)?;
    let record = CrudService::<R>::new(&state.store).create(body)?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// PATCH /{id} — partial update.
pub async fn update<R: Resource>(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<R>, ApiError> {
    let id = record_id(id)?;
    let body = json_body::<R>(body)?;
    let service = CrudService::<R>::new(&state.store);
    match id {
        Some(id) => Ok(Json(service.update(id, body)?)),
        None => {
            service.check_patch(body)?;
            Err(ApiError::NotFound(R::NOT_FOUND.into()))
        }
    }
}

/// DELETE /{id} — 204 with an empty body.
pub async fn delete<R: Resource>(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Some(id) = record_id(id)? else {
        return Err(ApiError::NotFound(R::NOT_FOUND.into()));
    };
    CrudService::<R>::new(&state.store).delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Only a segment that is not an integer is malformed. Integers no record
/// can carry (zero, negative, past `u64`) come back as `None`.
fn record_id(id: Result<Path<String>, PathRejection>) -> Result<Option<RecordId>, ApiError> {
    let malformed = |reason: &dyn std::fmt::Display| {
        warn!("Malformed id: {}", reason);
        ApiError::InvalidInput("Invalid request".into())
    };
    let Path(raw) = id.map_err(|e| malformed(&e))?;
    parse_id(&raw).ok_or_else(|| malformed(&raw))
}

fn parse_id(raw: &str) -> Option<Option<RecordId>> {
    let (negative, digits) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if negative {
        return Some(None);
    }
    Some(digits.parse::<RecordId>().ok().filter(|id| *id > 0))
}

fn json_body<R: Resource>(body: Result<Json<Value>, JsonRejection>) -> Result<Value, ApiError> {
    body.map(|Json(value)| value).map_err(|e| {
        warn!(kind = R::KIND, "Unreadable body: {}", e);
        ApiError::InvalidInput(R::INVALID.into())
    })
}
