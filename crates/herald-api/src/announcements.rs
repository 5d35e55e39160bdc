//! Handlers for `/announcements` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/announcements/active` | Public; never fails |
//! | `GET`    | `/announcements/all` | `?username` required |
//! | `POST`   | `/announcements/` | `?username` required; body: [`AnnouncementDraft`]; 201 |
//! | `PUT`    | `/announcements/{id}` | `?username` required; body: [`AnnouncementChanges`] |
//! | `DELETE` | `/announcements/{id}` | `?username` required |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use herald_core::{
  AnnouncementService,
  announcement::{Announcement, AnnouncementChanges, AnnouncementDraft},
  auth::CallerVerifier,
  store::AnnouncementStore,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

type Service<S, V> = State<Arc<AnnouncementService<S, V>>>;

/// The caller identifier, passed as a query parameter.
#[derive(Debug, Default, Deserialize)]
pub struct CallerParams {
  pub username: Option<String>,
}

/// Response body of both list endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnnouncementList {
  pub announcements: Vec<Announcement>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Acknowledgement {
  pub message: String,
}

/// Unwrap a JSON body, reporting a missing caller ahead of a malformed body.
fn json_body<T, S, V>(
  service: &AnnouncementService<S, V>,
  caller: Option<&str>,
  body: Result<Json<T>, JsonRejection>,
) -> Result<T, ApiError>
where
  S: AnnouncementStore,
  V: CallerVerifier,
{
  match body {
    Ok(Json(value)) => Ok(value),
    Err(rejection) => {
      service.authenticate(caller)?;
      Err(ApiError::BadRequest(rejection.body_text()))
    }
  }
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /announcements/active`
pub async fn list_active<S, V>(State(service): Service<S, V>) -> Json<AnnouncementList>
where
  S: AnnouncementStore,
  V: CallerVerifier,
{
  Json(AnnouncementList { announcements: service.list_active().await })
}

/// `GET /announcements/all?username=<caller>`
pub async fn list_all<S, V>(
  State(service): Service<S, V>,
  Query(params): Query<CallerParams>,
) -> Result<Json<AnnouncementList>, ApiError>
where
  S: AnnouncementStore,
  V: CallerVerifier,
{
  let announcements = service.list_all(params.username.as_deref()).await?;
  Ok(Json(AnnouncementList { announcements }))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /announcements/?username=<caller>` — returns 201 + the stored record.
pub async fn create<S, V>(
  State(service): Service<S, V>,
  Query(params): Query<CallerParams>,
  body: Result<Json<AnnouncementDraft>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: AnnouncementStore,
  V: CallerVerifier,
{
  let caller = params.username.as_deref();
  let draft = json_body(&service, caller, body)?;
  let created = service.create(caller, draft).await?;
  Ok((StatusCode::CREATED, Json(created)))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /announcements/{id}?username=<caller>` — partial update.
pub async fn update<S, V>(
  State(service): Service<S, V>,
  Path(id): Path<String>,
  Query(params): Query<CallerParams>,
  body: Result<Json<AnnouncementChanges>, JsonRejection>,
) -> Result<Json<Announcement>, ApiError>
where
  S: AnnouncementStore,
  V: CallerVerifier,
{
  let caller = params.username.as_deref();
  let changes = json_body(&service, caller, body)?;
  let updated = service.update(caller, &id, changes).await?;
  Ok(Json(updated))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /announcements/{id}?username=<caller>`
pub async fn delete<S, V>(
  State(service): Service<S, V>,
  Path(id): Path<String>,
  Query(params): Query<CallerParams>,
) -> Result<Json<Acknowledgement>, ApiError>
where
  S: AnnouncementStore,
  V: CallerVerifier,
{
  service.delete(params.username.as_deref(), &id).await?;
  Ok(Json(Acknowledgement { message: "Announcement deleted successfully".to_owned() }))
}
