//! Authentication handlers.

use axum::{extract::State, response::Json, routing::post, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::{not_blank, ValidatedJson};
use crate::api::AppState;
use crate::errors::AppResult;
use crate::services::AuthSession;
use crate::types::Created;

/// User registration request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct RegisterRequest {
    #[validate(custom(function = "not_blank", message = "Name is required"))]
    #[schema(example = "Ann")]
    pub name: String,
    #[validate(custom(function = "not_blank", message = "Email is required"))]
    #[schema(example = "ann@x.com")]
    pub email: String,
    #[validate(custom(function = "not_blank", message = "Password is required"))]
    #[schema(example = "pw1")]
    pub password: String,
}

/// User login request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct LoginRequest {
    #[validate(custom(function = "not_blank", message = "Email is required"))]
    #[schema(example = "ann@x.com")]
    pub email: String,
    #[validate(custom(function = "not_blank", message = "Password is required"))]
    #[schema(example = "pw1")]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    #[schema(example = "User registered")]
    pub message: String,
    #[schema(example = 7)]
    pub user_id: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    #[schema(example = "Login successful")]
    pub message: String,
    #[serde(flatten)]
    pub session: AuthSession,
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = RegisterResponse),
        (status = 400, description = "Missing fields"),
        (status = 409, description = "Email already exists")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<Created<RegisterResponse>> {
    let user = state
        .auth_service
        .register(payload.name, payload.email, payload.password)
        .await?;

    Ok(Created(RegisterResponse {
        message: "User registered".to_string(),
        user_id: user.id,
    }))
}

/// Check credentials and obtain a session token
#[utoipa::path(
    post,
    path = "/api/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Missing fields"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let session = state
        .auth_service
        .login(payload.email, payload.password)
        .await?;

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        session,
    }))
}
