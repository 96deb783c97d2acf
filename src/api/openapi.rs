//! OpenAPI documentation configuration.
//!
//! Served through Swagger UI at `/swagger-ui`.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    auth_handler, history_handler, note_handler, ticket_handler, user_handler,
};
use crate::domain::{
    DeletedTicket, NoteWithAuthor, Ticket, TicketPriority, TicketStatus, TicketWithOwner,
    UserProfile, UserRole, UserSummary,
};
use crate::services::AuthSession;
use crate::types::MessageResponse;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Helpdesk API",
        version = "0.1.0",
        description = "Support tickets, admin notes and user management",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        auth_handler::register,
        auth_handler::login,
        ticket_handler::create_ticket,
        ticket_handler::list_user_tickets,
        ticket_handler::list_all_tickets,
        ticket_handler::update_ticket_status,
        ticket_handler::delete_ticket,
        note_handler::add_note,
        note_handler::list_notes,
        user_handler::count_users,
        user_handler::list_users,
        user_handler::get_user,
        user_handler::update_profile,
        user_handler::delete_user,
        history_handler::recent_deletions,
    ),
    components(
        schemas(
            UserRole,
            UserSummary,
            UserProfile,
            Ticket,
            TicketPriority,
            TicketStatus,
            TicketWithOwner,
            NoteWithAuthor,
            DeletedTicket,
            AuthSession,
            MessageResponse,
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            auth_handler::RegisterResponse,
            auth_handler::LoginResponse,
            ticket_handler::CreateTicketRequest,
            ticket_handler::UpdateStatusRequest,
            ticket_handler::TicketCreatedResponse,
            note_handler::CreateNoteRequest,
            note_handler::NoteCreatedResponse,
            user_handler::UpdateProfileRequest,
            user_handler::CountResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration and login"),
        (name = "Tickets", description = "Support tickets"),
        (name = "Notes", description = "Internal admin notes on tickets"),
        (name = "Users", description = "User management"),
        (name = "History", description = "Recently deleted tickets")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /api/login"))
                        .build(),
                ),
            );
        }
    }
}
