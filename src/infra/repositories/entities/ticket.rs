//! Ticket database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Ticket;
use crate::errors::AppError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tickets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub priority: String,
    pub status: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "super::note::Entity")]
    Notes,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::note::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Ticket {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let corrupt = |field: &str, value: &str| {
            AppError::internal(format!("ticket {} has unknown {} {:?}", model.id, field, value))
        };
        let priority = model
            .priority
            .parse()
            .map_err(|_| corrupt("priority", &model.priority))?;
        let status = model
            .status
            .parse()
            .map_err(|_| corrupt("status", &model.status))?;

        Ok(Ticket {
            id: model.id,
            user_id: model.user_id,
            title: model.title,
            description: model.description,
            priority,
            status,
            created_at: model.created_at,
        })
    }
}
