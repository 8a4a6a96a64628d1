//! Auth handlers - register, login, logout, me
//!
//! The session token travels in an HttpOnly cookie and is resolved
//! against the `sessions` table on every authenticated request.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::{Deserialize, Serialize};

use crate::{
  entity::user,
  model::PublicUser,
  prelude::*,
  state::AppState,
};

pub const SESSION_COOKIE: &str = "codetrack_session";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterReq {
  pub username: String,
  pub email: String,
  pub password: String,
  #[serde(default)]
  pub full_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginReq {
  pub username: String,
  pub password: String,
}

#[derive(Debug, Serialize)]
pub struct UserRes {
  pub user: PublicUser,
}

/// Resolves the session cookie to a user, or 401.
pub async fn authenticate(
  app: &AppState,
  jar: &CookieJar,
) -> Result<user::Model> {
  let token = jar.get(SESSION_COOKIE).ok_or(Error::Unauthorized)?;
  app.sv().session.resolve(token.value()).await?.ok_or(Error::Unauthorized)
}

fn session_cookie(token: String) -> Cookie<'static> {
  Cookie::build((SESSION_COOKIE, token)).path("/").http_only(true).build()
}

pub async fn register(
  State(app): State<Arc<AppState>>,
  jar: CookieJar,
  Json(req): Json<RegisterReq>,
) -> Result<(StatusCode, CookieJar, Json<UserRes>)> {
  if req.username.trim().is_empty()
    || req.email.trim().is_empty()
    || req.password.is_empty()
  {
    return Err(Error::Validation(
      "username, email and password are required".to_string(),
    ));
  }
  if !req.email.contains('@') {
    return Err(Error::Validation("email is not valid".to_string()));
  }

  let user = app
    .sv()
    .user
    .create(req.username.trim(), req.email.trim(), &req.password, req.full_name)
    .await?;

  info!("registered user `{}`", user.username);

  let token = app.sv().session.open(user.id).await?;
  let jar = jar.add(session_cookie(token));

  Ok((StatusCode::CREATED, jar, Json(UserRes { user: user.into() })))
}

pub async fn login(
  State(app): State<Arc<AppState>>,
  jar: CookieJar,
  Json(req): Json<LoginReq>,
) -> Result<(CookieJar, Json<UserRes>)> {
  let user =
    app.sv().user.verify_credentials(&req.username, &req.password).await?;

  let token = app.sv().session.open(user.id).await?;
  let jar = jar.add(session_cookie(token));

  Ok((jar, Json(UserRes { user: user.into() })))
}

pub async fn logout(
  State(app): State<Arc<AppState>>,
  jar: CookieJar,
) -> Result<(CookieJar, Json<json::Value>)> {
  if let Some(cookie) = jar.get(SESSION_COOKIE) {
    app.sv().session.close(cookie.value()).await?;
  }

  let jar = jar.remove(Cookie::build((SESSION_COOKIE, "")).path("/"));

  Ok((
    jar,
    Json(json::json!({
      "success": true,
      "message": "Logged out successfully",
    })),
  ))
}

pub async fn me(
  State(app): State<Arc<AppState>>,
  jar: CookieJar,
) -> Result<Json<UserRes>> {
  let user = authenticate(&app, &jar).await?;
  Ok(Json(UserRes { user: user.into() }))
}
