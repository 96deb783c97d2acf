//! User repository implementation.

use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::{NewUser, ProfileChanges, User, UserRole};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>>;

    /// Find user by exact email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Insert a new account; a duplicate email surfaces as a conflict
    async fn create(&self, user: NewUser) -> AppResult<User>;

    /// List accounts with the given role, ascending by ID
    async fn list_by_role(&self, role: UserRole) -> AppResult<Vec<User>>;

    /// Count accounts with the given role
    async fn count_by_role(&self, role: UserRole) -> AppResult<u64>;

    /// Delete user by ID, returning the number of removed rows
    async fn delete(&self, id: i32) -> AppResult<u64>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        find_by_id(&self.db, id).await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;

        result.map(User::try_from).transpose()
    }

    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let active_model = ActiveModel {
            email: Set(new_user.email),
            password_hash: Set(new_user.password_hash),
            name: Set(new_user.name),
            role: Set(new_user.role.as_str().to_string()),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| AppError::from_unique_violation(e, "Email"))?;
        User::try_from(model)
    }

    async fn list_by_role(&self, role: UserRole) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .filter(user::Column::Role.eq(role.as_str()))
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await?;

        models.into_iter().map(User::try_from).collect()
    }

    async fn count_by_role(&self, role: UserRole) -> AppResult<u64> {
        let count = UserEntity::find()
            .filter(user::Column::Role.eq(role.as_str()))
            .count(&self.db)
            .await?;
        Ok(count)
    }

    async fn delete(&self, id: i32) -> AppResult<u64> {
        let result = UserEntity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected)
    }
}

async fn find_by_id<C: ConnectionTrait>(db: &C, id: i32) -> AppResult<Option<User>> {
    let result = UserEntity::find_by_id(id).one(db).await?;
    result.map(User::try_from).transpose()
}

/// Whether an account other than `id` already owns `email`.
pub(crate) async fn email_taken_by_other<C: ConnectionTrait>(
    db: &C,
    email: &str,
    id: i32,
) -> AppResult<bool> {
    let count = UserEntity::find()
        .filter(user::Column::Email.eq(email))
        .filter(user::Column::Id.ne(id))
        .count(db)
        .await?;
    Ok(count > 0)
}

/// Apply staged profile changes as one UPDATE, returning affected rows.
pub(crate) async fn update_profile<C: ConnectionTrait>(
    db: &C,
    id: i32,
    changes: ProfileChanges,
) -> AppResult<u64> {
    let mut update = UserEntity::update_many().filter(user::Column::Id.eq(id));

    if let Some(name) = changes.name {
        update = update.col_expr(user::Column::Name, Expr::value(name));
    }
    if let Some(email) = changes.email {
        update = update.col_expr(user::Column::Email, Expr::value(email));
    }
    if let Some(password_hash) = changes.password_hash {
        update = update.col_expr(user::Column::PasswordHash, Expr::value(password_hash));
    }

    let result = update
        .exec(db)
        .await
        .map_err(|e| AppError::from_unique_violation(e, "Email"))?;
    Ok(result.rows_affected)
}
