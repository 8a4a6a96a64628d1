//! Platform and dashboard handlers

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};

use crate::{
  entity::{Platform, platform},
  model::{PlatformData, UserWithStats},
  prelude::*,
  server::auth,
  state::AppState,
};

pub async fn health() -> &'static str {
  "OK"
}

pub async fn dashboard(
  State(app): State<Arc<AppState>>,
  jar: CookieJar,
) -> Result<Json<UserWithStats>> {
  let user = auth::authenticate(&app, &jar).await?;
  let stats = app.sv().stats.user_with_stats(&user).await?;
  Ok(Json(stats))
}

#[derive(Debug, Deserialize)]
pub struct VerifyReq {
  pub username: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyRes {
  pub exists: bool,
}

/// Existence probe; deliberately unauthenticated so signup flows can
/// validate handles before an account exists.
pub async fn verify(
  State(app): State<Arc<AppState>>,
  Path(kind): Path<Platform>,
  Json(req): Json<VerifyReq>,
) -> Result<Json<VerifyRes>> {
  if req.username.trim().is_empty() {
    return Err(Error::Validation("username is required".to_string()));
  }

  let exists = app.fetcher.check_username(kind, req.username.trim()).await;
  Ok(Json(VerifyRes { exists }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPlatformReq {
  pub platform_type: String,
  pub username: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPlatformRes {
  pub success: bool,
  pub message: String,
  pub platform: platform::Model,
  pub platform_data: PlatformData,
  pub stale: bool,
}

pub async fn add_platform(
  State(app): State<Arc<AppState>>,
  jar: CookieJar,
  Json(req): Json<AddPlatformReq>,
) -> Result<(StatusCode, Json<AddPlatformRes>)> {
  let user = auth::authenticate(&app, &jar).await?;

  if req.username.trim().is_empty() {
    return Err(Error::Validation("username is required".to_string()));
  }
  let kind = Platform::parse(&req.platform_type)
    .ok_or_else(|| Error::UnknownPlatform(req.platform_type.clone()))?;

  let username = req.username.trim();
  if !app.fetcher.check_username(kind, username).await {
    return Err(Error::UsernameNotFound(username.to_string()));
  }

  let connection = app.sv().platform.connect(user.id, kind, username).await?;

  info!("user {} connected {kind} as `{username}`", user.id);

  // initial refresh; the connection stays even if this fails mid-way
  let (platform_data, stale_reason) =
    app.refresh().run_for(user.id, kind, username).await?;

  Ok((
    StatusCode::CREATED,
    Json(AddPlatformRes {
      success: true,
      message: "Platform connected successfully".to_string(),
      platform: connection,
      platform_data,
      stale: stale_reason.is_some(),
    }),
  ))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletePlatformReq {
  pub platform_type: String,
}

pub async fn delete_platform(
  State(app): State<Arc<AppState>>,
  jar: CookieJar,
  Json(req): Json<DeletePlatformReq>,
) -> Result<Json<json::Value>> {
  let user = auth::authenticate(&app, &jar).await?;

  let kind = Platform::parse(&req.platform_type)
    .ok_or_else(|| Error::UnknownPlatform(req.platform_type.clone()))?;

  app.sv().platform.disconnect(user.id, kind).await?;

  info!("user {} disconnected {kind}", user.id);

  Ok(Json(json::json!({
    "success": true,
    "message": "Platform disconnected successfully",
  })))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRes {
  pub platform_data: PlatformData,
  /// true when the snapshot came from the degraded/placeholder path
  pub stale: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub stale_reason: Option<String>,
}

pub async fn refresh(
  State(app): State<Arc<AppState>>,
  Path(kind): Path<Platform>,
  jar: CookieJar,
) -> Result<Json<RefreshRes>> {
  let user = auth::authenticate(&app, &jar).await?;

  let (platform_data, stale_reason) =
    app.refresh().run(user.id, kind).await?;

  Ok(Json(RefreshRes {
    platform_data,
    stale: stale_reason.is_some(),
    stale_reason,
  }))
}
