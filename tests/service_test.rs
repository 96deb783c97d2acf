//! Service unit tests against mocked repositories.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use mockall::predicate::eq;

use helpdesk::config::Config;
use helpdesk::domain::{
    DeletedTicket, NewNote, NewTicket, NewUser, Note, NoteWithAuthor, Password, Ticket,
    TicketPriority, TicketStatus, TicketWithOwner, User, UserRole,
};
use helpdesk::errors::{AppError, AppResult};
use helpdesk::infra::repositories::{
    MockArchiveRepository, MockNoteRepository, MockTicketRepository, MockUserRepository,
};
use helpdesk::infra::{
    ArchiveRepository, NoteRepository, TicketRepository, TransactionContext, UnitOfWork,
    UserRepository,
};
use helpdesk::services::{
    AuthService, Authenticator, NoteManager, NoteService, TicketManager, TicketService,
    UserManager, UserService,
};

/// Unit of Work over mocked repositories; transactions are not available.
struct TestUnitOfWork {
    users: Arc<MockUserRepository>,
    tickets: Arc<MockTicketRepository>,
    notes: Arc<MockNoteRepository>,
    archive: Arc<MockArchiveRepository>,
}

impl TestUnitOfWork {
    fn new() -> Self {
        Self {
            users: Arc::new(MockUserRepository::new()),
            tickets: Arc::new(MockTicketRepository::new()),
            notes: Arc::new(MockNoteRepository::new()),
            archive: Arc::new(MockArchiveRepository::new()),
        }
    }

    fn with_users(mut self, users: MockUserRepository) -> Self {
        self.users = Arc::new(users);
        self
    }

    fn with_tickets(mut self, tickets: MockTicketRepository) -> Self {
        self.tickets = Arc::new(tickets);
        self
    }

    fn with_notes(mut self, notes: MockNoteRepository) -> Self {
        self.notes = Arc::new(notes);
        self
    }

    fn with_archive(mut self, archive: MockArchiveRepository) -> Self {
        self.archive = Arc::new(archive);
        self
    }
}

#[async_trait]
impl UnitOfWork for TestUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn tickets(&self) -> Arc<dyn TicketRepository> {
        self.tickets.clone()
    }

    fn notes(&self) -> Arc<dyn NoteRepository> {
        self.notes.clone()
    }

    fn archive(&self) -> Arc<dyn ArchiveRepository> {
        self.archive.clone()
    }

    async fn transaction_serializable<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        Err(AppError::internal("Transactions not supported in test mock"))
    }
}

fn test_config() -> Config {
    Config::builder("test-secret-key-for-testing-only-32chars")
        .admin("admin@helpdesk.local", "admin-password")
        .build()
        .unwrap()
}

fn test_user(id: i32, role: UserRole, password: &str) -> User {
    User {
        id,
        email: format!("user{}@x.com", id),
        password_hash: Password::new(password).unwrap().into_string(),
        name: format!("User {}", id),
        role,
        created_at: Utc::now(),
    }
}

fn test_ticket(id: i32, user_id: i32) -> Ticket {
    Ticket {
        id,
        user_id,
        title: "Printer down".to_string(),
        description: "No paper".to_string(),
        priority: TicketPriority::Low,
        status: TicketStatus::Pending,
        created_at: Utc::now(),
    }
}

// =============================================================================
// AuthService
// =============================================================================

#[tokio::test]
async fn test_register_rejects_existing_email() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .with(eq("ann@x.com"))
        .returning(|_| Ok(Some(test_user(1, UserRole::User, "pw1"))));
    users.expect_create().never();

    let auth = Authenticator::new(Arc::new(TestUnitOfWork::new().with_users(users)), test_config());
    let result = auth
        .register("Ann".to_string(), "ann@x.com".to_string(), "pw1".to_string())
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn test_register_trims_and_hashes() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_email().returning(|_| Ok(None));
    users
        .expect_create()
        .withf(|u| {
            u.name == "Ann"
                && u.email == "ann@x.com"
                && u.role == UserRole::User
                && !u.password_hash.contains("pw1")
                && Password::from_hash(u.password_hash.clone()).verify("pw1")
        })
        .returning(|u| {
            Ok(User {
                id: 5,
                email: u.email,
                password_hash: u.password_hash,
                name: u.name,
                role: u.role,
                created_at: Utc::now(),
            })
        });

    let auth = Authenticator::new(Arc::new(TestUnitOfWork::new().with_users(users)), test_config());
    let user = auth
        .register(" Ann ".to_string(), " ann@x.com ".to_string(), " pw1 ".to_string())
        .await
        .unwrap();

    assert_eq!(user.id, 5);
}

#[tokio::test]
async fn test_register_blank_field_is_validation_error() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_email().never();

    let auth = Authenticator::new(Arc::new(TestUnitOfWork::new().with_users(users)), test_config());
    let result = auth
        .register("   ".to_string(), "ann@x.com".to_string(), "pw1".to_string())
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn test_login_issues_verifiable_token() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .returning(|_| Ok(Some(test_user(3, UserRole::Admin, "secret"))));

    let auth = Authenticator::new(Arc::new(TestUnitOfWork::new().with_users(users)), test_config());
    let session = auth
        .login("user3@x.com".to_string(), "secret".to_string())
        .await
        .unwrap();

    assert_eq!(session.user_id, 3);
    assert_eq!(session.role, UserRole::Admin);
    assert_eq!(session.token_type, "Bearer");
    assert_eq!(session.expires_in, 24 * 3600);

    let claims = auth.verify_token(&session.token).unwrap();
    assert_eq!(claims.sub, 3);
    assert_eq!(claims.role, "admin");
}

#[tokio::test]
async fn test_login_failures_share_one_error() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .with(eq("known@x.com"))
        .returning(|_| Ok(Some(test_user(1, UserRole::User, "right"))));
    users
        .expect_find_by_email()
        .with(eq("ghost@x.com"))
        .returning(|_| Ok(None));

    let auth = Authenticator::new(Arc::new(TestUnitOfWork::new().with_users(users)), test_config());

    let wrong = auth
        .login("known@x.com".to_string(), "wrong".to_string())
        .await
        .unwrap_err();
    let unknown = auth
        .login("ghost@x.com".to_string(), "right".to_string())
        .await
        .unwrap_err();

    assert!(matches!(wrong, AppError::InvalidCredentials));
    assert!(matches!(unknown, AppError::InvalidCredentials));
    assert_eq!(wrong.user_message(), unknown.user_message());
}

#[tokio::test]
async fn test_verify_token_rejects_foreign_signature() {
    let auth = Authenticator::new(Arc::new(TestUnitOfWork::new()), test_config());
    let other = Authenticator::new(
        Arc::new(TestUnitOfWork::new()),
        Config::builder("another-secret-key-that-is-32-chars-long!")
            .build()
            .unwrap(),
    );

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .returning(|_| Ok(Some(test_user(1, UserRole::User, "pw"))));
    let uow = TestUnitOfWork::new().with_users(users);
    let issuer = Authenticator::new(Arc::new(uow), test_config());
    let session = issuer
        .login("user1@x.com".to_string(), "pw".to_string())
        .await
        .unwrap();

    assert!(auth.verify_token(&session.token).is_ok());
    assert!(matches!(other.verify_token(&session.token), Err(AppError::Jwt(_))));
}

#[tokio::test]
async fn test_seed_admin_runs_once() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .with(eq("admin@helpdesk.local"))
        .times(1)
        .returning(|_| Ok(None));
    users
        .expect_create()
        .withf(|u| u.role == UserRole::Admin && u.email == "admin@helpdesk.local")
        .times(1)
        .returning(|u| {
            Ok(User {
                id: 1,
                email: u.email,
                password_hash: u.password_hash,
                name: u.name,
                role: u.role,
                created_at: Utc::now(),
            })
        });

    let auth = Authenticator::new(Arc::new(TestUnitOfWork::new().with_users(users)), test_config());
    assert!(auth.seed_admin().await.unwrap());

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .returning(|_| Ok(Some(test_user(1, UserRole::Admin, "admin-password"))));
    users.expect_create().never();

    let auth = Authenticator::new(Arc::new(TestUnitOfWork::new().with_users(users)), test_config());
    assert!(!auth.seed_admin().await.unwrap());
}

// =============================================================================
// UserService
// =============================================================================

#[tokio::test]
async fn test_roster_counts_and_lists_only_users() {
    let mut users = MockUserRepository::new();
    users
        .expect_count_by_role()
        .with(eq(UserRole::User))
        .returning(|_| Ok(2));
    users
        .expect_list_by_role()
        .with(eq(UserRole::User))
        .returning(|_| {
            Ok(vec![
                test_user(2, UserRole::User, "a"),
                test_user(3, UserRole::User, "b"),
            ])
        });

    let service = UserManager::new(Arc::new(TestUnitOfWork::new().with_users(users)));

    assert_eq!(service.count_users().await.unwrap(), 2);
    let listed = service.list_users().await.unwrap();
    assert_eq!(listed.iter().map(|u| u.id).collect::<Vec<_>>(), vec![2, 3]);
}

#[tokio::test]
async fn test_get_profile_not_found() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().returning(|_| Ok(None));

    let service = UserManager::new(Arc::new(TestUnitOfWork::new().with_users(users)));
    let result = service.get_profile(9).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_delete_user_refuses_admins_and_missing() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .with(eq(1))
        .returning(|id| Ok(Some(test_user(id, UserRole::Admin, "pw"))));
    users.expect_find_by_id().with(eq(9)).returning(|_| Ok(None));
    users.expect_delete().never();

    let service = UserManager::new(Arc::new(TestUnitOfWork::new().with_users(users)));

    assert!(matches!(service.delete_user(1).await, Err(AppError::Forbidden(_))));
    assert!(matches!(service.delete_user(9).await, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn test_delete_user_removes_regular_account() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(|id| Ok(Some(test_user(id, UserRole::User, "pw"))));
    users.expect_delete().with(eq(4)).times(1).returning(|_| Ok(1));

    let service = UserManager::new(Arc::new(TestUnitOfWork::new().with_users(users)));
    assert!(service.delete_user(4).await.is_ok());
}

// =============================================================================
// TicketService
// =============================================================================

#[tokio::test]
async fn test_create_ticket_for_missing_user() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().returning(|_| Ok(None));
    let mut tickets = MockTicketRepository::new();
    tickets.expect_create().never();

    let uow = TestUnitOfWork::new()
        .with_users(users)
        .with_tickets(tickets);
    let service = TicketManager::new(Arc::new(uow));
    let result = service
        .create_ticket(9, "t".to_string(), "d".to_string(), TicketPriority::High)
        .await;

    assert!(matches!(result, Err(AppError::NotFound(ref e)) if e == "User"));
}

#[tokio::test]
async fn test_create_ticket_trims_text() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(|id| Ok(Some(test_user(id, UserRole::User, "pw"))));
    let mut tickets = MockTicketRepository::new();
    tickets
        .expect_create()
        .withf(|t| t.title == "Printer down" && t.description == "No paper" && t.user_id == 2)
        .returning(|t| {
            Ok(Ticket {
                priority: t.priority,
                ..test_ticket(10, t.user_id)
            })
        });

    let uow = TestUnitOfWork::new()
        .with_users(users)
        .with_tickets(tickets);
    let service = TicketManager::new(Arc::new(uow));
    let ticket = service
        .create_ticket(
            2,
            "  Printer down ".to_string(),
            "No paper\n".to_string(),
            TicketPriority::High,
        )
        .await
        .unwrap();

    assert_eq!(ticket.id, 10);
    assert_eq!(ticket.status, TicketStatus::Pending);
    assert_eq!(ticket.priority, TicketPriority::High);
}

#[tokio::test]
async fn test_update_status_of_missing_ticket() {
    let mut tickets = MockTicketRepository::new();
    tickets
        .expect_update_status()
        .with(eq(7), eq(TicketStatus::Resolved))
        .returning(|_, _| Ok(0));

    let uow = TestUnitOfWork::new().with_tickets(tickets);
    let service = TicketManager::new(Arc::new(uow));

    let result = service.update_status(7, TicketStatus::Resolved).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_recent_deletions_are_capped_at_three() {
    let mut archive = MockArchiveRepository::new();
    archive.expect_recent().with(eq(3)).returning(|_| Ok(vec![]));

    let uow = TestUnitOfWork::new().with_archive(archive);
    let service = TicketManager::new(Arc::new(uow));

    assert!(service.recent_deletions().await.unwrap().is_empty());
}

// =============================================================================
// NoteService
// =============================================================================

#[tokio::test]
async fn test_add_note_to_missing_ticket() {
    let mut tickets = MockTicketRepository::new();
    tickets.expect_find_by_id().returning(|_| Ok(None));
    let mut notes = MockNoteRepository::new();
    notes.expect_create().never();

    let uow = TestUnitOfWork::new()
        .with_tickets(tickets)
        .with_notes(notes);
    let service = NoteManager::new(Arc::new(uow));
    let result = service.add_note(99, 1, "hello".to_string()).await;

    assert!(matches!(result, Err(AppError::NotFound(ref e)) if e == "Ticket"));
}

#[tokio::test]
async fn test_add_note_requires_content() {
    let uow = TestUnitOfWork::new();
    let service = NoteManager::new(Arc::new(uow));

    let result = service.add_note(1, 1, " \t ".to_string()).await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn test_add_note_records_author() {
    let mut tickets = MockTicketRepository::new();
    tickets
        .expect_find_by_id()
        .returning(|id| Ok(Some(test_ticket(id, 2))));
    let mut notes = MockNoteRepository::new();
    notes
        .expect_create()
        .withf(|n| n.ticket_id == 4 && n.admin_id == 1 && n.content == "Called the user")
        .returning(|n| {
            Ok(Note {
                id: 8,
                ticket_id: n.ticket_id,
                admin_id: Some(n.admin_id),
                content: n.content,
                created_at: Utc::now(),
            })
        });

    let uow = TestUnitOfWork::new()
        .with_tickets(tickets)
        .with_notes(notes);
    let service = NoteManager::new(Arc::new(uow));
    let note = service
        .add_note(4, 1, " Called the user ".to_string())
        .await
        .unwrap();

    assert_eq!(note.id, 8);
    assert_eq!(note.admin_id, Some(1));
}
