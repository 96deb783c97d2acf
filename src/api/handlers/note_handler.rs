//! Note handlers (admin tooling).

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
use crate::api::middleware::{require_admin, CurrentUser};
use crate::api::AppState;
use crate::domain::NoteWithAuthor;
use crate::errors::{AppError, AppResult};
use crate::types::Created;

/// Note creation request; `user_id` is the authoring admin
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct CreateNoteRequest {
    #[validate(required(message = "ticket_id is required"))]
    #[schema(example = 12)]
    pub ticket_id: Option<i32>,
    #[validate(required(message = "user_id is required"))]
    #[schema(example = 1)]
    pub user_id: Option<i32>,
    #[validate(custom(function = "not_blank", message = "Content is required"))]
    #[schema(example = "Called the user, waiting for a reply")]
    pub content: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NoteCreatedResponse {
    #[schema(example = "Note added")]
    pub message: String,
    #[schema(example = 3)]
    pub note_id: i32,
}

/// Create note routes
pub fn note_routes() -> Router<AppState> {
    Router::new()
        .route("/notes", post(add_note))
        .route("/tickets/:id/notes", get(list_notes))
}

/// Attach a note to a ticket (admin only)
#[utoipa::path(
    post,
    path = "/api/notes",
    tag = "Notes",
    request_body = CreateNoteRequest,
    responses(
        (status = 201, description = "Note added", body = NoteCreatedResponse),
        (status = 400, description = "Missing fields"),
        (status = 403, description = "Admin access required or author mismatch"),
        (status = 404, description = "Ticket not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn add_note(
    State(state): State<AppState>,
    current_user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<CreateNoteRequest>,
) -> AppResult<Created<NoteCreatedResponse>> {
    require_admin(&current_user)?;

    let (Some(ticket_id), Some(author_id)) = (payload.ticket_id, payload.user_id) else {
        return Err(AppError::validation("ticket_id and user_id are required"));
    };
    if author_id != current_user.id {
        return Err(AppError::forbidden("Notes can only be authored as yourself"));
    }

    let note = state
        .note_service
        .add_note(ticket_id, author_id, payload.content)
        .await?;

    Ok(Created(NoteCreatedResponse {
        message: "Note added".to_string(),
        note_id: note.id,
    }))
}

/// List the notes on a ticket, newest first (admin only)
#[utoipa::path(
    get,
    path = "/api/tickets/{id}/notes",
    tag = "Notes",
    params(("id" = i32, Path, description = "Ticket ID")),
    responses(
        (status = 200, description = "Notes on the ticket", body = Vec<NoteWithAuthor>),
        (status = 403, description = "Admin access required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_notes(
    State(state): State<AppState>,
    current_user: CurrentUser,
    IdPath(ticket_id): IdPath,
) -> AppResult<Json<Vec<NoteWithAuthor>>> {
    require_admin(&current_user)?;

    let notes = state.note_service.list_notes(ticket_id).await?;
    Ok(Json(notes))
}
