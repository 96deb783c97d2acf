//! User management handlers.

use axum::{extract::State, response::Json, routing::get, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::{IdPath, ValidatedJson};
use crate::api::middleware::{require_admin, require_self_or_admin, CurrentUser};
use crate::api::AppState;
use crate::domain::{UserProfile, UserSummary};
use crate::errors::{AppError, AppResult};
use crate::services::ProfileUpdate;
use crate::types::MessageResponse;

/// Profile update request; any subset of the fields
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[schema(example = "Ann B.")]
    pub name: Option<String>,
    #[schema(example = "ann@y.com")]
    pub email: Option<String>,
    #[schema(example = "pw2")]
    pub new_password: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CountResponse {
    #[schema(example = 42)]
    pub count: u64,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/count", get(count_users))
        .route(
            "/users/:id",
            get(get_user).put(update_profile).delete(delete_user),
        )
}

/// Count accounts with role `user` (admin only)
#[utoipa::path(
    get,
    path = "/api/users/count",
    tag = "Users",
    responses(
        (status = 200, description = "Number of users", body = CountResponse),
        (status = 403, description = "Admin access required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn count_users(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<CountResponse>> {
    require_admin(&current_user)?;

    let count = state.user_service.count_users().await?;
    Ok(Json(CountResponse { count }))
}

/// List accounts with role `user` (admin only)
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses(
        (status = 200, description = "Users ascending by ID", body = Vec<UserSummary>),
        (status = 403, description = "Admin access required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_users(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<UserSummary>>> {
    require_admin(&current_user)?;

    let users = state.user_service.list_users().await?;
    Ok(Json(users))
}

/// Get name and email of an account
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User profile", body = UserProfile),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_user(
    State(state): State<AppState>,
    current_user: CurrentUser,
    IdPath(id): IdPath,
) -> AppResult<Json<UserProfile>> {
    require_self_or_admin(&current_user, id)?;

    let profile = state.user_service.get_profile(id).await?;
    Ok(Json(profile))
}

/// Update your own profile
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = i32, Path, description = "User ID")),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = MessageResponse),
        (status = 400, description = "Nothing to update or invalid password"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Email already exists")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_profile(
    State(state): State<AppState>,
    current_user: CurrentUser,
    IdPath(id): IdPath,
    ValidatedJson(payload): ValidatedJson<UpdateProfileRequest>,
) -> AppResult<Json<MessageResponse>> {
    if current_user.id != id {
        return Err(AppError::forbidden("Only the owner can update this profile"));
    }

    state
        .user_service
        .update_profile(
            id,
            ProfileUpdate {
                name: payload.name,
                email: payload.email,
                new_password: payload.new_password,
            },
        )
        .await?;

    Ok(Json(MessageResponse::new("Profile updated")))
}

/// Delete a `user` account and its tickets (admin only)
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 403, description = "Admin access required, or target missing or an admin")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_user(
    State(state): State<AppState>,
    current_user: CurrentUser,
    IdPath(id): IdPath,
) -> AppResult<Json<MessageResponse>> {
    require_admin(&current_user)?;

    state.user_service.delete_user(id).await?;
    Ok(Json(MessageResponse::new("User deleted")))
}
