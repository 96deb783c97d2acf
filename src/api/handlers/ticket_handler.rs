//! Ticket handlers.

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::{not_blank, IdPath, ValidatedJson};
use crate::api::middleware::{require_admin, require_self_or_admin, CurrentUser};
use crate::api::AppState;
use crate::domain::{Ticket, TicketPriority, TicketStatus, TicketWithOwner};
use crate::errors::{AppError, AppResult};
use crate::types::{Created, MessageResponse};

/// Ticket creation request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct CreateTicketRequest {
    #[validate(required(message = "user_id is required"))]
    #[schema(example = 7)]
    pub user_id: Option<i32>,
    #[validate(custom(function = "not_blank", message = "Title is required"))]
    #[schema(example = "Printer down")]
    pub title: String,
    #[validate(custom(function = "not_blank", message = "Description is required"))]
    #[schema(example = "The second floor printer does not respond")]
    pub description: String,
    #[validate(custom(function = "not_blank", message = "Priority is required"))]
    #[schema(example = "alta")]
    pub priority: String,
}

/// Status change request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct UpdateStatusRequest {
    #[validate(custom(function = "not_blank", message = "Status is required"))]
    #[schema(example = "In lavorazione")]
    pub status: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TicketCreatedResponse {
    #[schema(example = "Ticket created")]
    pub message: String,
    #[schema(example = 12)]
    pub ticket_id: i32,
}

/// Create ticket routes
pub fn ticket_routes() -> Router<AppState> {
    Router::new()
        .route("/tickets", post(create_ticket))
        .route(
            "/tickets/:id",
            get(list_user_tickets)
                .put(update_ticket_status)
                .delete(delete_ticket),
        )
        .route("/all-tickets", get(list_all_tickets))
}

/// Open a ticket
#[utoipa::path(
    post,
    path = "/api/tickets",
    tag = "Tickets",
    request_body = CreateTicketRequest,
    responses(
        (status = 201, description = "Ticket created", body = TicketCreatedResponse),
        (status = 400, description = "Missing fields or invalid priority"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Tickets can only be opened for yourself"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_ticket(
    State(state): State<AppState>,
    current_user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<CreateTicketRequest>,
) -> AppResult<Created<TicketCreatedResponse>> {
    let user_id = payload
        .user_id
        .ok_or_else(|| AppError::validation("user_id is required"))?;
    require_self_or_admin(&current_user, user_id)?;

    let priority = payload.priority.trim().parse::<TicketPriority>()?;

    let ticket = state
        .ticket_service
        .create_ticket(user_id, payload.title, payload.description, priority)
        .await?;

    Ok(Created(TicketCreatedResponse {
        message: "Ticket created".to_string(),
        ticket_id: ticket.id,
    }))
}

/// List the tickets of one user, newest first
#[utoipa::path(
    get,
    path = "/api/tickets/{id}",
    tag = "Tickets",
    params(("id" = i32, Path, description = "Owner user ID")),
    responses(
        (status = 200, description = "Tickets of the user", body = Vec<Ticket>),
        (status = 400, description = "Invalid user ID"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not the owner")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_user_tickets(
    State(state): State<AppState>,
    current_user: CurrentUser,
    IdPath(user_id): IdPath,
) -> AppResult<Json<Vec<Ticket>>> {
    require_self_or_admin(&current_user, user_id)?;

    let tickets = state.ticket_service.list_for_user(user_id).await?;
    Ok(Json(tickets))
}

/// List every ticket with owner details (admin only)
#[utoipa::path(
    get,
    path = "/api/all-tickets",
    tag = "Tickets",
    responses(
        (status = 200, description = "All tickets", body = Vec<TicketWithOwner>),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admin access required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_all_tickets(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<TicketWithOwner>>> {
    require_admin(&current_user)?;

    let tickets = state.ticket_service.list_all().await?;
    Ok(Json(tickets))
}

/// Change a ticket's status (admin only)
#[utoipa::path(
    put,
    path = "/api/tickets/{id}",
    tag = "Tickets",
    params(("id" = i32, Path, description = "Ticket ID")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = MessageResponse),
        (status = 400, description = "Missing or invalid status"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Ticket not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_ticket_status(
    State(state): State<AppState>,
    current_user: CurrentUser,
    IdPath(id): IdPath,
    ValidatedJson(payload): ValidatedJson<UpdateStatusRequest>,
) -> AppResult<Json<MessageResponse>> {
    require_admin(&current_user)?;

    let status = payload.status.trim().parse::<TicketStatus>()?;
    state.ticket_service.update_status(id, status).await?;

    Ok(Json(MessageResponse::new("Ticket status updated")))
}

/// Delete a ticket, archiving a snapshot first (admin only)
#[utoipa::path(
    delete,
    path = "/api/tickets/{id}",
    tag = "Tickets",
    params(("id" = i32, Path, description = "Ticket ID")),
    responses(
        (status = 200, description = "Ticket deleted", body = MessageResponse),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Ticket not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_ticket(
    State(state): State<AppState>,
    current_user: CurrentUser,
    IdPath(id): IdPath,
) -> AppResult<Json<MessageResponse>> {
    require_admin(&current_user)?;

    state.ticket_service.delete_ticket(id).await?;
    Ok(Json(MessageResponse::new("Ticket deleted")))
}
