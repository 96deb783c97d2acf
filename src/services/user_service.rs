//! User service - Account roster and profile management.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{optional_text, Password, ProfileChanges, UserProfile, UserRole, UserSummary};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::with_transaction;

/// Requested profile changes, as received from the owner
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub new_password: Option<String>,
}

/// User service trait for dependency injection.
///
/// Roster operations only ever see accounts with role `user`.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Number of `user` accounts
    async fn count_users(&self) -> AppResult<u64>;

    /// `user` accounts, ascending by ID
    async fn list_users(&self) -> AppResult<Vec<UserSummary>>;

    /// Name and email of one account
    async fn get_profile(&self, id: i32) -> AppResult<UserProfile>;

    /// Delete a `user` account together with its tickets.
    /// Missing accounts and admins are refused with `Forbidden`.
    async fn delete_user(&self, id: i32) -> AppResult<()>;

    /// Apply any subset of name, email and password as one update
    async fn update_profile(&self, id: i32, update: ProfileUpdate) -> AppResult<()>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

/// Trim and hash the requested fields.
fn stage_changes(update: ProfileUpdate) -> AppResult<ProfileChanges> {
    let password_hash = match update.new_password {
        Some(plain) => {
            let plain = plain.trim();
            if plain.is_empty() {
                return Err(AppError::validation(
                    "New password must contain at least 1 character",
                ));
            }
            Some(Password::new(plain)?.into_string())
        }
        None => None,
    };

    let changes = ProfileChanges {
        name: optional_text(update.name),
        email: optional_text(update.email),
        password_hash,
    };

    if changes.is_empty() {
        return Err(AppError::validation("Nothing to update"));
    }
    Ok(changes)
}

#[async_trait]
impl<U: UnitOfWork + 'static> UserService for UserManager<U> {
    async fn count_users(&self) -> AppResult<u64> {
        self.uow.users().count_by_role(UserRole::User).await
    }

    async fn list_users(&self) -> AppResult<Vec<UserSummary>> {
        let users = self.uow.users().list_by_role(UserRole::User).await?;
        Ok(users.into_iter().map(UserSummary::from).collect())
    }

    async fn get_profile(&self, id: i32) -> AppResult<UserProfile> {
        self.uow
            .users()
            .find_by_id(id)
            .await?
            .map(UserProfile::from)
            .ok_or_not_found("User")
    }

    async fn delete_user(&self, id: i32) -> AppResult<()> {
        match self.uow.users().find_by_id(id).await? {
            Some(user) if !user.is_admin() => {}
            _ => return Err(AppError::forbidden("This user cannot be deleted")),
        }

        if self.uow.users().delete(id).await? == 0 {
            return Err(AppError::not_found("User"));
        }

        tracing::info!(user_id = id, "User deleted");
        Ok(())
    }

    async fn update_profile(&self, id: i32, update: ProfileUpdate) -> AppResult<()> {
        let changes = stage_changes(update)?;

        with_transaction!(self.uow, |ctx| {
            if let Some(email) = changes.email.as_deref() {
                if ctx.users().email_taken_by_other(email, id).await? {
                    return Err(AppError::conflict("Email"));
                }
            }
            ctx.users().update_profile(id, changes).await
        })?;

        tracing::info!(user_id = id, "Profile updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_changes_requires_a_field() {
        let err = stage_changes(ProfileUpdate::default()).unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == "Nothing to update"));
    }

    #[test]
    fn test_stage_changes_treats_blank_name_as_absent() {
        let update = ProfileUpdate {
            name: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(stage_changes(update).is_err());
    }

    #[test]
    fn test_stage_changes_rejects_blank_password() {
        let update = ProfileUpdate {
            name: Some("Ann".to_string()),
            new_password: Some("  ".to_string()),
            ..Default::default()
        };
        let err = stage_changes(update).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_stage_changes_trims_and_hashes() {
        let update = ProfileUpdate {
            name: Some(" Ann ".to_string()),
            email: Some(" ann@y.com ".to_string()),
            new_password: Some(" pw2 ".to_string()),
        };
        let changes = stage_changes(update).unwrap();
        assert_eq!(changes.name.as_deref(), Some("Ann"));
        assert_eq!(changes.email.as_deref(), Some("ann@y.com"));

        let hash = changes.password_hash.unwrap();
        assert!(Password::from_hash(hash).verify("pw2"));
    }
}
