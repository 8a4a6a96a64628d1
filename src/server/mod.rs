//! HTTP API - router and middleware

mod auth;
mod handlers;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
  cors::{Any, CorsLayer},
  trace::TraceLayer,
};

use crate::state::AppState;

pub fn router(app: Arc<AppState>) -> Router {
  Router::new()
    .route("/health", get(handlers::health))
    .route("/api/auth/register", post(auth::register))
    .route("/api/auth/login", post(auth::login))
    .route("/api/auth/logout", post(auth::logout))
    .route("/api/auth/me", get(auth::me))
    .route("/api/dashboard", get(handlers::dashboard))
    .route("/api/verify/{platform}", post(handlers::verify))
    .route("/api/platforms/add", post(handlers::add_platform))
    .route("/api/platforms/delete", post(handlers::delete_platform))
    .route("/api/{platform}/refresh", post(handlers::refresh))
    .layer(
      ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(
        CorsLayer::new()
          .allow_origin(Any)
          .allow_methods(Any)
          .allow_headers(Any),
      ),
    )
    .with_state(app)
}

#[cfg(test)]
mod tests {
  use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
  };
  use tower::ServiceExt;

  use super::*;
  use crate::state::{AppState, Config};

  async fn test_app() -> Router {
    let state =
      AppState::with_config("sqlite::memory:", Config::default()).await;
    router(Arc::new(state))
  }

  fn json_post(uri: &str, body: json::Value) -> Request<Body> {
    Request::builder()
      .method("POST")
      .uri(uri)
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from(body.to_string()))
      .unwrap()
  }

  async fn body_json(response: axum::response::Response) -> json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    json::from_slice(&bytes).unwrap()
  }

  async fn register_alice(app: &Router) -> (String, i64) {
    let response = app
      .clone()
      .oneshot(json_post(
        "/api/auth/register",
        json::json!({
          "username": "alice",
          "email": "alice@example.com",
          "password": "hunter2",
        }),
      ))
      .await
      .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let cookie = response
      .headers()
      .get(header::SET_COOKIE)
      .unwrap()
      .to_str()
      .unwrap()
      .to_string();
    let body = body_json(response).await;
    (cookie, body["user"]["id"].as_i64().unwrap())
  }

  #[tokio::test]
  async fn health_endpoint() {
    let app = test_app().await;
    let response = app
      .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
      .await
      .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
  }

  #[tokio::test]
  async fn register_login_me_roundtrip() {
    let app = test_app().await;
    let (cookie, id) = register_alice(&app).await;

    let response = app
      .clone()
      .oneshot(json_post(
        "/api/auth/login",
        json::json!({ "username": "alice", "password": "hunter2" }),
      ))
      .await
      .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
      .oneshot(
        Request::builder()
          .uri("/api/auth/me")
          .header(header::COOKIE, cookie)
          .body(Body::empty())
          .unwrap(),
      )
      .await
      .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let me = body_json(response).await;
    assert_eq!(me["user"]["id"].as_i64().unwrap(), id);
  }

  #[tokio::test]
  async fn duplicate_registration_is_rejected() {
    let app = test_app().await;
    register_alice(&app).await;

    let response = app
      .oneshot(json_post(
        "/api/auth/register",
        json::json!({
          "username": "alice",
          "email": "second@example.com",
          "password": "pw",
        }),
      ))
      .await
      .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
  }

  #[tokio::test]
  async fn missing_fields_are_a_validation_error() {
    let app = test_app().await;
    let response = app
      .oneshot(json_post(
        "/api/auth/register",
        json::json!({ "username": "", "email": "a@b.c", "password": "pw" }),
      ))
      .await
      .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn wrong_password_is_unauthorized() {
    let app = test_app().await;
    register_alice(&app).await;

    let response = app
      .oneshot(json_post(
        "/api/auth/login",
        json::json!({ "username": "alice", "password": "wrong" }),
      ))
      .await
      .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
  }

  #[tokio::test]
  async fn me_without_session_is_unauthorized() {
    let app = test_app().await;
    let response = app
      .oneshot(
        Request::builder()
          .uri("/api/auth/me")
          .body(Body::empty())
          .unwrap(),
      )
      .await
      .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
  }

  #[tokio::test]
  async fn logout_invalidates_the_session() {
    let app = test_app().await;
    let (cookie, _) = register_alice(&app).await;

    let response = app
      .clone()
      .oneshot(
        Request::builder()
          .method("POST")
          .uri("/api/auth/logout")
          .header(header::COOKIE, cookie.clone())
          .body(Body::empty())
          .unwrap(),
      )
      .await
      .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
      .oneshot(
        Request::builder()
          .uri("/api/auth/me")
          .header(header::COOKIE, cookie)
          .body(Body::empty())
          .unwrap(),
      )
      .await
      .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
  }

  #[tokio::test]
  async fn dashboard_for_a_fresh_user_is_empty() {
    let app = test_app().await;
    let (cookie, id) = register_alice(&app).await;

    let response = app
      .oneshot(
        Request::builder()
          .uri("/api/dashboard")
          .header(header::COOKIE, cookie)
          .body(Body::empty())
          .unwrap(),
      )
      .await
      .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let dashboard = body_json(response).await;
    assert_eq!(dashboard["id"].as_i64().unwrap(), id);
    assert_eq!(dashboard["platforms"], json::json!([]));
    assert_eq!(dashboard["platformData"], json::json!([]));
  }

  #[tokio::test]
  async fn refresh_of_unconnected_platform_is_not_found() {
    let app = test_app().await;
    let (cookie, _) = register_alice(&app).await;

    let response = app
      .oneshot(
        Request::builder()
          .method("POST")
          .uri("/api/leetcode/refresh")
          .header(header::COOKIE, cookie)
          .body(Body::empty())
          .unwrap(),
      )
      .await
      .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn unknown_platform_in_path_is_a_client_error() {
    let app = test_app().await;
    let (cookie, _) = register_alice(&app).await;

    let response = app
      .oneshot(
        Request::builder()
          .method("POST")
          .uri("/api/topcoder/refresh")
          .header(header::COOKIE, cookie)
          .body(Body::empty())
          .unwrap(),
      )
      .await
      .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
  }
}
