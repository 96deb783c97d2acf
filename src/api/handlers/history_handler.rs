//! Deleted-ticket history handler.

use axum::{extract::State, response::Json, routing::get, Router};

use crate::api::middleware::{require_admin, CurrentUser};
use crate::api::AppState;
use crate::domain::DeletedTicket;
use crate::errors::AppResult;

pub fn history_routes() -> Router<AppState> {
    Router::new().route("/history/deleted-tickets", get(recent_deletions))
}

/// Latest archived tickets, newest first (admin only)
#[utoipa::path(
    get,
    path = "/api/history/deleted-tickets",
    tag = "History",
    responses(
        (status = 200, description = "Up to three archived tickets", body = Vec<DeletedTicket>),
        (status = 403, description = "Admin access required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn recent_deletions(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<DeletedTicket>>> {
    require_admin(&current_user)?;

    let history = state.ticket_service.recent_deletions().await?;
    Ok(Json(history))
}
