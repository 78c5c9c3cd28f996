//! Generic handlers for the eight record collections.
//!
//! Every [`Record`] kind is mounted under its [`RecordKind::path`]:
//!
//! | Method   | Path                | Notes |
//! |----------|---------------------|-------|
//! | `GET`    | `/{kind}`           | Query string maps onto the kind's filter |
//! | `POST`   | `/{kind}`           | Body: the kind's draft; 201 on success |
//! | `GET`    | `/{kind}/{key}`     | 404 if not found |
//! | `PUT`    | `/{kind}/{key}`     | Body: the kind's draft |
//! | `DELETE` | `/{kind}/{key}`     | 204 on success; 409 if still referenced |
//!
//! [`RecordKind::path`]: colliery_core::record::RecordKind::path

use std::{fmt::Display, str::FromStr};

use axum::{
  Json, Router,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
  routing::get,
};
use colliery_core::{record::Record, store::Repository};

use crate::{ApiState, error::ApiError};

/// The collection and item routes for record kind `R`.
pub fn routes<S, R>() -> Router<ApiState<S>>
where
  S: Repository<R> + 'static,
  R: Record,
  <R::Key as FromStr>::Err: Display,
{
  let collection = format!("/{}", R::KIND.path());
  let item = format!("{collection}/{{key}}");

  Router::new()
    .route(&collection, get(list::<S, R>).post(create::<S, R>))
    .route(&item, get(get_one::<S, R>).put(update::<S, R>).delete(delete_one::<S, R>))
}

fn parse_key<R>(raw: &str) -> Result<R::Key, ApiError>
where
  R: Record,
  <R::Key as FromStr>::Err: Display,
{
  raw
    .parse()
    .map_err(|e| ApiError::InvalidInput(format!("bad {} key {raw:?}: {e}", R::KIND)))
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /{kind}[?filter...]`
pub async fn list<S, R>(
  State(state): State<ApiState<S>>,
  Query(filter): Query<R::Filter>,
) -> Result<Json<Vec<R>>, ApiError>
where
  S: Repository<R>,
  R: Record,
{
  let records = state.store.list(filter).await.map_err(ApiError::from_store)?;
  Ok(Json(records))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /{kind}`
pub async fn create<S, R>(
  State(state): State<ApiState<S>>,
  Json(draft): Json<R::Draft>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Repository<R>,
  R: Record,
{
  let record = state.store.create(draft).await.map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(record)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /{kind}/{key}`
pub async fn get_one<S, R>(
  State(state): State<ApiState<S>>,
  Path(raw): Path<String>,
) -> Result<Json<R>, ApiError>
where
  S: Repository<R>,
  R: Record,
  <R::Key as FromStr>::Err: Display,
{
  let key = parse_key::<R>(&raw)?;
  let record = state
    .store
    .get(key)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("{} {raw} not found", R::KIND)))?;
  Ok(Json(record))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /{kind}/{key}`
pub async fn update<S, R>(
  State(state): State<ApiState<S>>,
  Path(raw): Path<String>,
  Json(draft): Json<R::Draft>,
) -> Result<Json<R>, ApiError>
where
  S: Repository<R>,
  R: Record,
  <R::Key as FromStr>::Err: Display,
{
  let key = parse_key::<R>(&raw)?;
  let record = state.store.update(key, draft).await.map_err(ApiError::from_store)?;
  Ok(Json(record))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /{kind}/{key}`
pub async fn delete_one<S, R>(
  State(state): State<ApiState<S>>,
  Path(raw): Path<String>,
) -> Result<StatusCode, ApiError>
where
  S: Repository<R>,
  R: Record,
  <R::Key as FromStr>::Err: Display,
{
  let key = parse_key::<R>(&raw)?;
  state.store.delete(key).await.map_err(ApiError::from_store)?;
  Ok(StatusCode::NO_CONTENT)
}
