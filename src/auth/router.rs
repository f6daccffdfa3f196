use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;

use super::{AuthError, AuthStub, LoginRequest, SignupRequest};

pub fn auth_router(stub: Arc<AuthStub>) -> Router {
    Router::new()
        .route("/api/v1/auth/login", post(login_handler))
        .route("/api/v1/auth/signup", post(signup_handler))
        .with_state(stub)
}

pub(crate) async fn login_handler(
    State(stub): State<Arc<AuthStub>>,
    Json(request): Json<LoginRequest>,
) -> Response {
    match stub.login(request).await {
        Ok(ack) => (StatusCode::OK, Json(ack)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn signup_handler(
    State(stub): State<Arc<AuthStub>>,
    Json(request): Json<SignupRequest>,
) -> Response {
    match stub.signup(request).await {
        Ok(ack) => (StatusCode::CREATED, Json(ack)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: AuthError) -> Response {
    let status = match error {
        AuthError::MissingCredentials => StatusCode::BAD_REQUEST,
        AuthError::PasswordMismatch => StatusCode::UNPROCESSABLE_ENTITY,
    };
    let payload = json!({ "error": error.to_string() });
    (status, Json(payload)).into_response()
}
