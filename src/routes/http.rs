//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs its parameters and basic result info.

use std::sync::Arc;

use axum::{
  extract::State,
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use tracing::{error, info, instrument, warn};

use crate::error::PlanError;
use crate::logic::{generate_batch, generate_worksheet, rng_for, BatchRequest, WorksheetRequest, MAX_VERSIONS};
use crate::problems::STANDARDS;
use crate::protocol::*;
use crate::state::AppState;

/// Handler-level failure, rendered as `{ "error": kind, "message": text }`.
#[derive(Debug)]
pub enum ApiError {
  Plan(PlanError),
  BadRequest(String),
  Internal(String),
}

impl From<PlanError> for ApiError {
  fn from(e: PlanError) -> Self {
    ApiError::Plan(e)
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, body) = match self {
      ApiError::Plan(e) => {
        let status = if e.is_bad_request() {
          StatusCode::BAD_REQUEST
        } else {
          StatusCode::UNPROCESSABLE_ENTITY
        };
        (status, ErrorOut::from(&e))
      }
      ApiError::BadRequest(message) => {
        (StatusCode::BAD_REQUEST, ErrorOut { error: "invalid_request".into(), message })
      }
      ApiError::Internal(message) => {
        (StatusCode::INTERNAL_SERVER_ERROR, ErrorOut { error: "internal".into(), message })
      }
    };
    (status, Json(body)).into_response()
  }
}

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse {
  Json(HealthOut { ok: true })
}

#[instrument(level = "info")]
pub async fn http_standards() -> impl IntoResponse {
  let list: Vec<StandardOut> = STANDARDS
    .iter()
    .map(|s| StandardOut { id: s.id.to_string(), description: s.description.to_string() })
    .collect();
  Json(list)
}

#[instrument(level = "info", skip(state))]
pub async fn http_riddle_lengths(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  let list: Vec<RiddleLengthOut> = state
    .catalog
    .lengths()
    .into_iter()
    .map(|(length, count)| RiddleLengthOut { length, count })
    .collect();
  Json(list)
}

#[instrument(level = "info", skip(state, body), fields(standard = %body.standard, count = body.count, use_riddles = body.use_riddles, seed = ?body.seed))]
pub async fn http_post_worksheet(
  State(state): State<Arc<AppState>>,
  Json(body): Json<WorksheetIn>,
) -> Result<Json<WorksheetOut>, ApiError> {
  let req = WorksheetRequest {
    standard: body.standard,
    count: body.count,
    use_riddles: body.use_riddles,
    allow_plain_fallback: body.allow_plain_fallback,
  };
  let seed = body.seed;
  let task_req = req.clone();
  let result = tokio::task::spawn_blocking(move || generate_worksheet(&state, &task_req, &mut rng_for(seed, 0)))
    .await
    .map_err(|e| {
      error!(target: "worksheet", error = %e, "Worksheet generation task failed");
      ApiError::Internal("worksheet generation failed".into())
    })?;
  match result {
    Ok(ws) => {
      info!(target: "worksheet", id = %ws.id, standard = %ws.standard, riddle = ws.riddle.is_some(), "HTTP worksheet served");
      Ok(Json(to_out(&ws)))
    }
    Err(e) => {
      warn!(target: "worksheet", standard = %req.standard, kind = e.kind(), error = %e, "HTTP worksheet failed");
      Err(e.into())
    }
  }
}

#[instrument(level = "info", skip(state, body), fields(standards = body.standards.len(), count = body.count, versions = body.versions))]
pub async fn http_post_batch(
  State(state): State<Arc<AppState>>,
  Json(body): Json<BatchIn>,
) -> Result<Json<BatchOut>, ApiError> {
  if body.standards.is_empty() {
    return Err(ApiError::BadRequest("standards must not be empty".into()));
  }
  if body.versions == 0 || body.versions > MAX_VERSIONS {
    return Err(ApiError::BadRequest(format!("versions must be between 1 and {MAX_VERSIONS}")));
  }

  let req = BatchRequest {
    standards: body.standards,
    count: body.count,
    versions: body.versions,
    use_riddles: body.use_riddles,
    allow_plain_fallback: body.allow_plain_fallback,
    seed: body.seed,
  };
  let items = tokio::task::spawn_blocking(move || generate_batch(&state, &req))
    .await
    .map_err(|e| {
      error!(target: "worksheet", error = %e, "Batch generation task failed");
      ApiError::Internal("batch generation failed".into())
    })?;

  Ok(Json(BatchOut { worksheets: items.iter().map(batch_item_out).collect() }))
}
